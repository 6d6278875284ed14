//! Fixed-duration tweens
//!
//! A tween only tracks time. Callers read the normalized progress and map it
//! onto whatever they animate, usually with [`lerp`].

/// Duration used by expand/collapse animations and list smooth scrolls
pub const DEFAULT_DURATION_MS: u32 = 300;

/// Linear interpolation between `start` and `end` at progress `t`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    (end - start) * t + start
}

/// A single fixed-duration animation on a normalized timeline
#[derive(Clone, Debug)]
pub struct Tween {
    duration_ms: u32,
    elapsed_ms: f32,
    playing: bool,
}

impl Tween {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Create a tween that is already running
    pub fn started(duration_ms: u32) -> Self {
        let mut tween = Self::new(duration_ms);
        tween.start();
        tween
    }

    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Normalized progress in `[0.0, 1.0]`
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Whether the full duration has elapsed
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance the tween and return the new progress.
    ///
    /// Returns `None` when the tween is not playing. The tween stops itself
    /// on the tick that reaches `t = 1.0`, so that value is reported once.
    pub fn tick(&mut self, dt_ms: f32) -> Option<f32> {
        if !self.playing {
            return None;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let t = self.progress();
        if t >= 1.0 {
            self.elapsed_ms = self.duration_ms as f32;
            self.playing = false;
        }
        Some(t)
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(50.0, 200.0, 0.0), 50.0);
        assert_eq!(lerp(50.0, 200.0, 1.0), 200.0);
        assert_eq!(lerp(50.0, 200.0, 0.5), 125.0);
        assert_eq!(lerp(200.0, 50.0, 0.5), 125.0);
    }

    #[test]
    fn test_tick_reaches_one_exactly_once() {
        let mut tween = Tween::started(300);

        assert_eq!(tween.tick(150.0), Some(0.5));
        assert!(tween.is_playing());

        assert_eq!(tween.tick(200.0), Some(1.0));
        assert!(!tween.is_playing());
        assert!(tween.is_finished());

        assert_eq!(tween.tick(16.0), None);
    }

    #[test]
    fn test_not_started_does_not_advance() {
        let mut tween = Tween::new(300);
        assert_eq!(tween.tick(100.0), None);
        assert_eq!(tween.progress(), 0.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::started(0);
        assert_eq!(tween.tick(0.0), Some(1.0));
        assert!(!tween.is_playing());
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut tween = Tween::started(100);
        tween.tick(40.0);
        assert_eq!(tween.tick(-30.0), Some(0.4));
    }
}
