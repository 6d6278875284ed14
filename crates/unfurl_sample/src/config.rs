//! Sample configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level sample configuration (unfurl.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct SampleConfig {
    /// Number of rows in the list
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Row holders kept alive and rebound while paging
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Simulated frame interval
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
    /// Frames allowed for any single step to settle
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
    /// Physical pixels per density-independent pixel
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub row: RowConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

fn default_rows() -> usize {
    30
}

fn default_pool_size() -> usize {
    8
}

fn default_frame_ms() -> f32 {
    16.0
}

fn default_max_frames() -> usize {
    120
}

fn default_density() -> f32 {
    2.0
}

/// Window size in dp
#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width_dp: f32,
    #[serde(default = "default_height")]
    pub height_dp: f32,
}

fn default_width() -> f32 {
    360.0
}

fn default_height() -> f32 {
    640.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width_dp: default_width(),
            height_dp: default_height(),
        }
    }
}

/// Row geometry in dp
#[derive(Debug, Deserialize, Serialize)]
pub struct RowConfig {
    /// Title strip, always visible
    #[serde(default = "default_title")]
    pub title_dp: f32,
    /// Body shown only while expanded
    #[serde(default = "default_body")]
    pub body_dp: f32,
}

fn default_title() -> f32 {
    48.0
}

fn default_body() -> f32 {
    160.0
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            title_dp: default_title(),
            body_dp: default_body(),
        }
    }
}

/// Auto-scroll behaviour of every row
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub expand: bool,
    #[serde(default)]
    pub expand_offset_dp: f32,
    #[serde(default = "default_true")]
    pub collapse: bool,
    #[serde(default)]
    pub collapse_offset_dp: f32,
}

fn default_true() -> bool {
    true
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            expand: true,
            expand_offset_dp: 0.0,
            collapse: true,
            collapse_offset_dp: 0.0,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            pool_size: default_pool_size(),
            frame_ms: default_frame_ms(),
            max_frames: default_max_frames(),
            density: default_density(),
            window: WindowConfig::default(),
            row: RowConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl SampleConfig {
    /// Load configuration from a file or a directory containing unfurl.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("unfurl.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SampleConfig = toml::from_str(content)?;
        if config.pool_size == 0 {
            anyhow::bail!("pool_size must be at least 1");
        }
        if config.density <= 0.0 {
            anyhow::bail!("density must be positive, got {}", config.density);
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
