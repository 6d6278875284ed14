//! Layout style helpers

pub use taffy::prelude::*;
use taffy::{Overflow, Point};

/// Helper to create common layout styles
pub struct LayoutStyle;

impl LayoutStyle {
    /// Vertical linear layout: children stacked top to bottom, full width
    pub fn column() -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            ..Default::default()
        }
    }

    /// Vertical container with a fixed viewport height, used for lists
    pub fn viewport(height: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::Auto,
                height: Dimension::Length(height),
            },
            overflow: Point {
                x: Overflow::Visible,
                y: Overflow::Scroll,
            },
            ..Default::default()
        }
    }

    /// Full-size root of a window
    pub fn window(width: f32, height: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            ..Self::fixed_size(width, height)
        }
    }

    /// A leaf of fixed height that stretches to its parent's width
    pub fn fixed_height(height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Auto,
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    /// Create a fixed size style
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }
}
