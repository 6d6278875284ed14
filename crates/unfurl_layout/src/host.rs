//! Layout host
//!
//! Owns the view tree, the animation scheduler and every expandable layout,
//! and runs them in frame order: animation frames, measure pass, smooth
//! scrolls, then completions. Scrolls requested by a completion start moving
//! on the next frame.

use slotmap::SecondaryMap;
use unfurl_animation::{AnimationId, AnimationScheduler};

use crate::error::{LayoutError, Result};
use crate::expandable::ExpandableLayout;
use crate::style::LayoutStyle;
use crate::tree::{ViewId, ViewTree};

/// What happened during one [`LayoutHost::frame`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Animations or smooth scrolls are still running
    pub animating: bool,
    /// A scroll container moved this frame
    pub scrolled: bool,
    /// Expand/collapse animations that completed this frame
    pub completed: usize,
}

/// Window-level owner of views, animations and expandable layouts
pub struct LayoutHost {
    tree: ViewTree,
    animations: AnimationScheduler<ViewId>,
    expandables: SecondaryMap<ViewId, ExpandableLayout>,
    width: f32,
    height: f32,
}

impl LayoutHost {
    /// Create a host with a window root of the given size
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let mut tree = ViewTree::new();
        let root = tree.create_view(LayoutStyle::window(width, height))?;
        tree.set_root(root)?;
        Ok(Self {
            tree,
            animations: AnimationScheduler::new(),
            expandables: SecondaryMap::new(),
            width,
            height,
        })
    }

    pub fn root(&self) -> Option<ViewId> {
        self.tree.root()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn animations(&self) -> &AnimationScheduler<ViewId> {
        &self.animations
    }

    // =========================================================================
    // Expandable layouts
    // =========================================================================

    /// Create a vertical expandable view under `parent`
    pub fn create_expandable(&mut self, parent: ViewId) -> Result<ViewId> {
        let view = self.tree.create_view(LayoutStyle::column())?;
        self.tree.add_child(parent, view)?;
        self.make_expandable(view)?;
        Ok(view)
    }

    /// Give an existing view expand/collapse behaviour
    pub fn make_expandable(&mut self, view: ViewId) -> Result<()> {
        if !self.tree.contains(view) {
            return Err(LayoutError::UnknownView(view));
        }
        self.expandables.insert(view, ExpandableLayout::new(view));
        Ok(())
    }

    pub fn expandable(&self, view: ViewId) -> Result<&ExpandableLayout> {
        self.expandables
            .get(view)
            .ok_or(LayoutError::NotExpandable(view))
    }

    pub fn expandable_mut(&mut self, view: ViewId) -> Result<&mut ExpandableLayout> {
        self.expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))
    }

    /// Attach-to-window event for an expandable view
    pub fn attach(&mut self, view: ViewId) -> Result<()> {
        let Self {
            tree, expandables, ..
        } = self;
        let layout = expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?;
        layout.on_attached(tree);
        Ok(())
    }

    /// Detach-from-window event for an expandable view
    pub fn detach(&mut self, view: ViewId) -> Result<()> {
        let Self {
            animations,
            expandables,
            ..
        } = self;
        let layout = expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?;
        layout.on_detached(animations);
        Ok(())
    }

    /// Destroy a view subtree, detaching any expandable layouts inside it
    pub fn remove_view(&mut self, view: ViewId) -> Result<()> {
        for removed in self.tree.remove_view(view)? {
            if let Some(mut layout) = self.expandables.remove(removed) {
                layout.on_detached(&mut self.animations);
            }
        }
        Ok(())
    }

    pub fn init_state(&mut self, view: ViewId, collapsed: bool) -> Result<()> {
        let Self {
            animations,
            expandables,
            ..
        } = self;
        expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?
            .init_state(collapsed, animations)
    }

    pub fn toggle(&mut self, view: ViewId) -> Result<()> {
        self.toggle_with_offset(view, 0, 0)
    }

    pub fn toggle_with_offset(
        &mut self,
        view: ViewId,
        expanded_offset: i32,
        collapsed_offset: i32,
    ) -> Result<()> {
        let Self {
            tree,
            animations,
            expandables,
            ..
        } = self;
        expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?
            .toggle_with_offset(expanded_offset, collapsed_offset, tree, animations)
    }

    pub fn expand(&mut self, view: ViewId, animated: bool) -> Result<()> {
        let Self {
            tree,
            animations,
            expandables,
            ..
        } = self;
        expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?
            .expand(animated, tree, animations)
    }

    pub fn collapse(&mut self, view: ViewId, animated: bool) -> Result<()> {
        let Self {
            tree,
            animations,
            expandables,
            ..
        } = self;
        expandables
            .get_mut(view)
            .ok_or(LayoutError::NotExpandable(view))?
            .collapse(animated, tree, animations)
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Whether the next frame has layout work to do
    pub fn needs_layout(&self) -> bool {
        self.tree.needs_layout()
            || self
                .expandables
                .iter()
                .any(|(view, l)| l.layout_requested() && self.tree.is_attached(view))
    }

    /// Measure pass.
    ///
    /// Expandable layouts are measured deepest first: each is laid out at its
    /// natural height, then pinned to the height it reports, so outer layouts
    /// see the final size of inner ones.
    pub fn layout(&mut self) -> Result<()> {
        let Self {
            tree,
            expandables,
            width,
            height,
            ..
        } = self;

        let mut order: Vec<(usize, ViewId)> = expandables
            .keys()
            .filter(|view| tree.is_attached(*view))
            .map(|view| (tree.depth(view), view))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0));

        // One whole-tree pass per attached expandable, so a frame costs
        // rows x tree size. Scroll ranges are only refreshed by the final pass.
        for (_, view) in order {
            tree.set_height(view, None)?;
            tree.measure_layout(*width, *height)?;
            if let Some(layout) = expandables.get_mut(view) {
                layout.on_measure(tree)?;
            }
        }

        tree.compute_layout(*width, *height)
    }

    /// Advance the host clock by `dt_ms`.
    ///
    /// Every animation that finished this frame is completed even when the
    /// measure pass or another completion fails. The first error is returned
    /// once all of them have run.
    pub fn frame(&mut self, dt_ms: f32) -> Result<FrameReport> {
        let mut report = FrameReport::default();

        let mut finished: Vec<(ViewId, AnimationId)> = Vec::new();
        for frame in self.animations.tick(dt_ms) {
            let Some(layout) = self.expandables.get_mut(frame.owner) else {
                continue;
            };
            if layout.on_animation_frame(frame.id, frame.t) && frame.finished {
                finished.push((frame.owner, frame.id));
            }
        }

        let mut first_error = None;
        if self.needs_layout() {
            if let Err(err) = self.layout() {
                tracing::warn!(%err, "measure pass failed");
                first_error = Some(err);
            }
        }
        let geometry_valid = first_error.is_none();
        report.scrolled = self.tree.tick_scrollers(dt_ms);

        for (view, id) in finished {
            let Self {
                tree, expandables, ..
            } = self;
            let Some(layout) = expandables.get_mut(view) else {
                continue;
            };
            let request = match layout.on_animation_end(id, tree) {
                Ok(request) => request,
                Err(err) => {
                    tracing::warn!(?view, %err, "animation completion failed");
                    first_error.get_or_insert(err);
                    None
                }
            };
            report.completed += 1;

            // Stale geometry after a failed measure pass; skip the scroll
            let Some(request) = request.filter(|_| geometry_valid) else {
                continue;
            };
            if let Some(scroller) = tree.scroller_mut(request.container) {
                scroller.scroll_by(request.dx, request.dy);
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        report.animating = self.animations.has_active_animations() || self.tree.is_scrolling();
        Ok(report)
    }

    /// Run frames of `frame_ms` until nothing animates, up to `max_frames`.
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, frame_ms: f32, max_frames: usize) -> Result<usize> {
        for count in 1..=max_frames {
            if !self.frame(frame_ms)?.animating {
                return Ok(count);
            }
        }
        tracing::warn!(max_frames, "host still animating after frame limit");
        Ok(max_frames)
    }
}
