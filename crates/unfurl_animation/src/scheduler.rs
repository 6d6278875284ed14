//! Animation scheduler
//!
//! Owns every running tween and advances them from the host clock. Each tween
//! is tagged with an owner key so the host can route frames back to whoever
//! started the animation.

use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct AnimationId;
}

/// One tick of one animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame<K> {
    pub id: AnimationId,
    pub owner: K,
    /// Normalized progress in `[0.0, 1.0]`
    pub t: f32,
    /// Set on the frame that reports `t = 1.0`; the tween is gone afterwards
    pub finished: bool,
}

struct Entry<K> {
    owner: K,
    tween: Tween,
}

/// The animation scheduler that ticks all active tweens
pub struct AnimationScheduler<K> {
    entries: SlotMap<AnimationId, Entry<K>>,
}

impl<K: Copy> AnimationScheduler<K> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Start a tween of `duration_ms` on behalf of `owner`
    pub fn start(&mut self, owner: K, duration_ms: u32) -> AnimationId {
        let id = self.entries.insert(Entry {
            owner,
            tween: Tween::started(duration_ms),
        });
        tracing::trace!(?id, duration_ms, "animation started");
        id
    }

    /// Remove a tween. Returns false if it already finished or was cancelled.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let removed = self.entries.remove(id).is_some();
        if removed {
            tracing::trace!(?id, "animation cancelled");
        }
        removed
    }

    pub fn is_active(&self, id: AnimationId) -> bool {
        self.entries.contains_key(id)
    }

    /// Advance all tweens by `dt_ms` and collect their frames.
    ///
    /// Finished tweens are removed after reporting their final frame.
    pub fn tick(&mut self, dt_ms: f32) -> SmallVec<[AnimationFrame<K>; 4]> {
        let mut frames: SmallVec<[AnimationFrame<K>; 4]> = SmallVec::new();
        for (id, entry) in self.entries.iter_mut() {
            if let Some(t) = entry.tween.tick(dt_ms) {
                frames.push(AnimationFrame {
                    id,
                    owner: entry.owner,
                    t,
                    finished: !entry.tween.is_playing(),
                });
            }
        }

        for frame in frames.iter().filter(|f| f.finished) {
            self.entries.remove(frame.id);
        }

        frames
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy> Default for AnimationScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
