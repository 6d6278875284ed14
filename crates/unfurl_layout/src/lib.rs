//! Unfurl Layout
//!
//! Expandable containers on a Taffy-backed view tree.
//!
//! An [`ExpandableLayout`] shows a leading part of its children while
//! collapsed and all of them while expanded, animating its height between the
//! two. When it lives inside a scroll container, it can scroll that container
//! after the animation so the revealed content, or the collapsed header,
//! stays in view.
//!
//! # Modules
//!
//! - [`tree`]: measured view tree with parent links, margins and scroll containers
//! - [`geometry`]: edge positions relative to ancestors, scroll ancestor lookup
//! - [`state`]: collapsed/expanded state machine and height bookkeeping
//! - [`animator`]: linear height interpolation sessions
//! - [`autoscroll`]: post-animation scroll decisions
//! - [`expandable`]: the expandable layout itself
//! - [`host`]: frame loop tying tree, animations and layouts together

pub mod animator;
pub mod autoscroll;
pub mod error;
pub mod expandable;
pub mod geometry;
pub mod host;
pub mod scroll;
pub mod state;
pub mod style;
pub mod tree;

pub use animator::{interpolate_height, AnimationSession, ExpandAnimator};
pub use autoscroll::{plan_scroll, ScrollPolicy, ScrollRequest};
pub use error::{LayoutError, Result};
pub use expandable::{ExpandableLayout, OnExpandListener};
pub use geometry::{descendant_bottom, descendant_top, find_scrollable_ancestor, MAX_ANCESTOR_DEPTH};
pub use host::{FrameReport, LayoutHost};
pub use scroll::{ListScroller, RecyclerScroller, ScrollableContainer};
pub use state::{FoldEvent, FoldState, HeightState, UNSET_HEIGHT};
pub use style::LayoutStyle;
pub use tree::{Margins, ViewId, ViewTree};

/// Commonly used types
pub mod prelude {
    pub use crate::{
        ExpandableLayout, FoldState, LayoutError, LayoutHost, LayoutStyle, ListScroller, Margins,
        OnExpandListener, RecyclerScroller, ScrollPolicy, ScrollableContainer, ViewId, ViewTree,
    };
}
