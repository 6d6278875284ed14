//! Fold state machine
//!
//! Tracks whether an expandable layout is collapsed or expanded, whether an
//! animation is running, and the three heights that drive measurement:
//!
//! - `collapsed`: height shown while collapsed, `0` until known
//! - `expanded`: natural content height from the last measure pass
//! - `current`: height reported to layout, [`UNSET_HEIGHT`] for "natural"

use crate::error::{LayoutError, Result};

/// `current` value meaning "report the natural measured height"
pub const UNSET_HEIGHT: i32 = -1;

/// Transitions kept for debugging
const HISTORY_LIMIT: usize = 32;

/// Steady state of an expandable layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FoldState {
    #[default]
    Collapsed,
    Expanded,
}

impl FoldState {
    pub fn from_collapsed(collapsed: bool) -> Self {
        if collapsed {
            FoldState::Collapsed
        } else {
            FoldState::Expanded
        }
    }

    pub fn is_collapsed(self) -> bool {
        self == FoldState::Collapsed
    }

    pub fn is_expanded(self) -> bool {
        self == FoldState::Expanded
    }

    pub fn flipped(self) -> Self {
        match self {
            FoldState::Collapsed => FoldState::Expanded,
            FoldState::Expanded => FoldState::Collapsed,
        }
    }
}

/// Events accepted by the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldEvent {
    Init { collapsed: bool },
    Toggle,
    Expand,
    Collapse,
}

impl FoldEvent {
    /// State reached when this event arrives in `from`
    pub fn target(self, from: FoldState) -> FoldState {
        match self {
            FoldEvent::Init { collapsed } => FoldState::from_collapsed(collapsed),
            FoldEvent::Toggle => from.flipped(),
            FoldEvent::Expand => FoldState::Expanded,
            FoldEvent::Collapse => FoldState::Collapsed,
        }
    }
}

/// Heights and fold state of one expandable layout
#[derive(Clone, Debug)]
pub struct HeightState {
    collapsed: i32,
    expanded: i32,
    current: i32,
    state: FoldState,
    animating: bool,
    measured: bool,
    history: Vec<(FoldState, FoldEvent, FoldState)>,
}

impl HeightState {
    pub fn new() -> Self {
        Self {
            collapsed: 0,
            expanded: 0,
            current: UNSET_HEIGHT,
            state: FoldState::Collapsed,
            animating: false,
            measured: false,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> FoldState {
        self.state
    }

    pub fn collapsed_height(&self) -> i32 {
        self.collapsed
    }

    pub fn expanded_height(&self) -> i32 {
        self.expanded
    }

    pub fn current_height(&self) -> i32 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether a measure pass has run since creation
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Get transition history
    pub fn history(&self) -> &[(FoldState, FoldEvent, FoldState)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Apply an event and return the new state
    pub fn send(&mut self, event: FoldEvent) -> FoldState {
        let from = self.state;
        let to = event.target(from);
        self.state = to;

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
        to
    }

    pub fn set_current(&mut self, height: i32) {
        self.current = height;
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Forget the collapsed height so the next measure pass derives it again
    pub fn invalidate_collapsed(&mut self) {
        self.collapsed = 0;
    }

    /// Whether the measure pass should derive the collapsed height
    pub fn needs_collapsed_height(&self) -> bool {
        self.collapsed == 0
    }

    /// Reject heights where expanding would shrink the layout
    pub fn check_heights(&self) -> Result<()> {
        if self.measured && self.expanded < self.collapsed {
            return Err(LayoutError::InvertedHeights {
                collapsed: self.collapsed,
                expanded: self.expanded,
            });
        }
        Ok(())
    }

    /// Height a transition into `state` should end at
    pub fn target_height(&self, state: FoldState, expanded_offset: i32, collapsed_offset: i32) -> i32 {
        match state {
            FoldState::Expanded if !self.measured => UNSET_HEIGHT,
            FoldState::Expanded => self.expanded + expanded_offset,
            FoldState::Collapsed => self.collapsed + collapsed_offset,
        }
    }

    /// Set the state and height directly, without animating
    pub fn init(&mut self, collapsed: bool) {
        self.send(FoldEvent::Init { collapsed });
        self.current = self.target_height(self.state, 0, 0);
        self.animating = false;
    }

    /// Fold measurement results in and return the height to report, if it
    /// differs from the natural one.
    ///
    /// `derived_collapsed` is the edge-marker height, computed by the caller
    /// only while [`needs_collapsed_height`](Self::needs_collapsed_height).
    pub fn measure(&mut self, natural: i32, derived_collapsed: Option<i32>) -> Option<i32> {
        if let Some(collapsed) = derived_collapsed.filter(|h| *h > 0) {
            if self.collapsed != collapsed {
                tracing::debug!(collapsed, "collapsed height derived");
                self.collapsed = collapsed;
                if self.state.is_collapsed() && !self.animating {
                    self.current = collapsed;
                }
            }
        }

        self.expanded = natural;
        self.measured = true;
        if self.expanded < self.collapsed {
            tracing::warn!(
                collapsed = self.collapsed,
                expanded = self.expanded,
                "content is shorter than its collapsed height"
            );
        }

        (self.current >= 0 && self.current != natural).then_some(self.current)
    }
}

impl Default for HeightState {
    fn default() -> Self {
        Self::new()
    }
}
