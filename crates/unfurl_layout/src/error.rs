//! Layout error types

use thiserror::Error;

use crate::tree::ViewId;

/// Layout-related errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The id does not name a live view (removed, or from another tree)
    #[error("unknown view {0:?}")]
    UnknownView(ViewId),

    /// Geometry was requested against an ancestor that does not contain the view
    #[error("view {view:?} is not contained in {ancestor:?}")]
    NotDescendant { view: ViewId, ancestor: ViewId },

    /// The parent chain is deeper than the walk allows
    #[error("ancestor walk from {view:?} exceeded {limit} levels")]
    DepthExceeded { view: ViewId, limit: usize },

    /// The expanded height is smaller than the collapsed height
    #[error("expanded height {expanded} is smaller than collapsed height {collapsed}")]
    InvertedHeights { collapsed: i32, expanded: i32 },

    /// The view has no expandable layout registered
    #[error("view {0:?} is not an expandable layout")]
    NotExpandable(ViewId),

    /// Failure reported by the layout engine
    #[error("layout engine error: {0}")]
    Engine(#[from] taffy::TaffyError),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
