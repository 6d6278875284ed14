//! Expand/collapse animation sessions
//!
//! A session interpolates linearly from a start height to an end height over
//! a fixed duration. At most one session exists per layout: starting a new
//! one cancels the previous tween before the new one is scheduled, so frames
//! from two sessions can never interleave.

use unfurl_animation::{lerp, AnimationId, AnimationScheduler, DEFAULT_DURATION_MS};

use crate::tree::ViewId;

/// Height at normalized time `t` between `start` and `end`
pub fn interpolate_height(start: i32, end: i32, t: f32) -> i32 {
    lerp(start as f32, end as f32, t.clamp(0.0, 1.0)) as i32
}

/// One running expand or collapse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSession {
    pub id: AnimationId,
    pub start_height: i32,
    pub end_height: i32,
    /// True when animating toward the expanded state
    pub expanding: bool,
}

impl AnimationSession {
    pub fn height_at(&self, t: f32) -> i32 {
        interpolate_height(self.start_height, self.end_height, t)
    }
}

/// Owns the session of one expandable layout
#[derive(Debug)]
pub struct ExpandAnimator {
    session: Option<AnimationSession>,
    duration_ms: u32,
}

impl ExpandAnimator {
    pub fn new() -> Self {
        Self {
            session: None,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Replace any running session with a new one
    pub fn start(
        &mut self,
        owner: ViewId,
        scheduler: &mut AnimationScheduler<ViewId>,
        start_height: i32,
        end_height: i32,
        expanding: bool,
    ) -> AnimationSession {
        self.cancel(scheduler);

        let id = scheduler.start(owner, self.duration_ms);
        let session = AnimationSession {
            id,
            start_height,
            end_height,
            expanding,
        };
        tracing::debug!(?owner, start_height, end_height, expanding, "expand animation started");
        self.session = Some(session);
        session
    }

    /// Drop the running session without completing it
    pub fn cancel(&mut self, scheduler: &mut AnimationScheduler<ViewId>) -> Option<AnimationSession> {
        let session = self.session.take()?;
        scheduler.cancel(session.id);
        Some(session)
    }

    /// Session owning `id`, ignoring frames of superseded sessions
    pub fn session_for(&self, id: AnimationId) -> Option<&AnimationSession> {
        self.session.as_ref().filter(|session| session.id == id)
    }

    /// End the session owning `id`
    pub fn finish(&mut self, id: AnimationId) -> Option<AnimationSession> {
        self.session_for(id)?;
        self.session.take()
    }
}

impl Default for ExpandAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owner() -> ViewId {
        let mut views: SlotMap<ViewId, ()> = SlotMap::with_key();
        views.insert(())
    }

    #[test]
    fn test_interpolation_endpoints_and_midpoint() {
        assert_eq!(interpolate_height(50, 200, 0.0), 50);
        assert_eq!(interpolate_height(50, 200, 0.5), 125);
        assert_eq!(interpolate_height(50, 200, 1.0), 200);
        assert_eq!(interpolate_height(200, 50, 1.0), 50);
    }

    #[test]
    fn test_interpolation_is_monotonic() {
        for (start, end) in [(50, 200), (200, 50), (0, 37), (13, 13)] {
            let mut previous = start;
            for step in 0..=100 {
                let height = interpolate_height(start, end, step as f32 / 100.0);
                if end >= start {
                    assert!(height >= previous && height <= end);
                } else {
                    assert!(height <= previous && height >= end);
                }
                previous = height;
            }
            assert_eq!(previous, end);
        }
    }

    #[test]
    fn test_start_replaces_running_session() {
        let mut scheduler = AnimationScheduler::new();
        let mut animator = ExpandAnimator::new();
        let view = owner();

        let first = animator.start(view, &mut scheduler, 50, 200, true);
        scheduler.tick(100.0);
        let second = animator.start(view, &mut scheduler, 100, 50, false);

        assert!(!scheduler.is_active(first.id));
        assert!(scheduler.is_active(second.id));
        assert_eq!(scheduler.len(), 1);
        assert!(animator.session_for(first.id).is_none());
        assert_eq!(animator.session_for(second.id), Some(&second));
    }

    #[test]
    fn test_finish_only_matches_current_session() {
        let mut scheduler = AnimationScheduler::new();
        let mut animator = ExpandAnimator::new();
        let view = owner();

        let first = animator.start(view, &mut scheduler, 0, 10, true);
        let second = animator.start(view, &mut scheduler, 5, 0, false);

        assert_eq!(animator.finish(first.id), None);
        assert!(animator.is_running());
        assert_eq!(animator.finish(second.id), Some(second));
        assert!(!animator.is_running());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = AnimationScheduler::new();
        let mut animator = ExpandAnimator::new();
        let session = animator.start(owner(), &mut scheduler, 0, 10, true);

        assert_eq!(animator.cancel(&mut scheduler), Some(session));
        assert!(scheduler.is_empty());
        assert_eq!(animator.cancel(&mut scheduler), None);
    }
}
