//! Expandable layout
//!
//! A vertical container that shows either a leading part of its children
//! (collapsed) or all of them (expanded), animating its height between the
//! two and optionally scrolling the enclosing list so the change stays
//! visible.
//!
//! The collapsed height comes from an edge view: everything below that view's
//! bottom edge (plus an offset) is hidden while collapsed.
//!
//! # Example
//!
//! ```rust,ignore
//! use unfurl_layout::prelude::*;
//!
//! let mut host = LayoutHost::new(360.0, 640.0)?;
//! let card = host.create_expandable(list)?;
//! let title = host.tree_mut().create_view(LayoutStyle::fixed_height(48.0))?;
//! host.tree_mut().add_child(card, title)?;
//!
//! let layout = host.expandable_mut(card)?;
//! layout.set_collapsed_edge_view(title, 0);
//! layout.set_expand_with_scroll(true, 0);
//! layout.set_on_expand_listener(|expanded: bool| println!("expanded: {expanded}"));
//!
//! host.attach(card)?;
//! host.toggle(card)?;
//! ```
//!
//! # Lifecycle
//!
//! The host drives every method here: attach/detach, the measure pass, and
//! animation frames. A toggle issued while an animation is running replaces
//! it, starting from the height currently on screen; the replaced animation
//! never reports completion.

use unfurl_animation::{AnimationId, AnimationScheduler};

use crate::animator::ExpandAnimator;
use crate::autoscroll::{plan_scroll, ScrollPolicy, ScrollRequest};
use crate::error::Result;
use crate::geometry::{descendant_bottom, find_scrollable_ancestor};
use crate::state::{FoldEvent, FoldState, HeightState};
use crate::tree::{ViewId, ViewTree};

/// Callbacks fired by an expandable layout
pub trait OnExpandListener {
    /// Fired once per completed expand or collapse
    fn on_expand(&mut self, expanded: bool);

    /// Fired on every animation frame. The returned pixels are added to the
    /// interpolated height.
    fn on_animating(&mut self, _expanding: bool, _t: f32) -> i32 {
        0
    }
}

impl<F: FnMut(bool)> OnExpandListener for F {
    fn on_expand(&mut self, expanded: bool) {
        self(expanded)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EdgeMarker {
    view: ViewId,
    offset: i32,
}

/// Expand/collapse state of one view in a [`ViewTree`]
pub struct ExpandableLayout {
    view: ViewId,
    heights: HeightState,
    edge: Option<EdgeMarker>,
    policy: ScrollPolicy,
    scroll_ancestor: Option<ViewId>,
    animator: ExpandAnimator,
    listener: Option<Box<dyn OnExpandListener>>,
    layout_requested: bool,
}

impl ExpandableLayout {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            heights: HeightState::new(),
            edge: None,
            policy: ScrollPolicy::default(),
            scroll_ancestor: None,
            animator: ExpandAnimator::new(),
            listener: None,
            layout_requested: true,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn state(&self) -> FoldState {
        self.heights.state()
    }

    pub fn is_collapsed(&self) -> bool {
        self.heights.state().is_collapsed()
    }

    pub fn is_animating(&self) -> bool {
        self.heights.is_animating()
    }

    pub fn heights(&self) -> &HeightState {
        &self.heights
    }

    pub fn collapsed_height(&self) -> i32 {
        self.heights.collapsed_height()
    }

    pub fn expanded_height(&self) -> i32 {
        self.heights.expanded_height()
    }

    pub fn current_height(&self) -> i32 {
        self.heights.current_height()
    }

    pub fn policy(&self) -> &ScrollPolicy {
        &self.policy
    }

    pub fn scroll_ancestor(&self) -> Option<ViewId> {
        self.scroll_ancestor
    }

    pub fn edge_view(&self) -> Option<ViewId> {
        self.edge.map(|edge| edge.view)
    }

    pub fn animator(&self) -> &ExpandAnimator {
        &self.animator
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Hide everything below `view`'s bottom edge (plus `offset`) when collapsed.
    ///
    /// Setting the same view and offset again does nothing.
    pub fn set_collapsed_edge_view(&mut self, view: ViewId, offset: i32) {
        let edge = EdgeMarker { view, offset };
        if self.edge == Some(edge) {
            return;
        }
        self.edge = Some(edge);
        self.heights.invalidate_collapsed();
        self.request_layout();
    }

    pub fn set_on_expand_listener(&mut self, listener: impl OnExpandListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_on_expand_listener(&mut self) {
        self.listener = None;
    }

    /// Scroll the list down after expanding if the layout ends below its viewport
    pub fn set_expand_with_scroll(&mut self, enabled: bool, offset: i32) {
        self.policy.expand_with_scroll = enabled;
        self.policy.expand_scroll_offset = offset;
    }

    /// Scroll the list up after collapsing if the layout starts above its viewport
    pub fn set_collapse_with_scroll(&mut self, enabled: bool, offset: i32) {
        self.policy.collapse_with_scroll = enabled;
        self.policy.collapse_scroll_offset = offset;
    }

    pub fn set_scroll_policy(&mut self, policy: ScrollPolicy) {
        self.policy = policy;
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Jump to a state without animating
    pub fn init_state(
        &mut self,
        collapsed: bool,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.heights.check_heights()?;
        self.animator.cancel(animations);
        self.heights.init(collapsed);
        self.request_layout();
        Ok(())
    }

    /// Animate to the opposite state
    pub fn toggle(
        &mut self,
        tree: &ViewTree,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.toggle_with_offset(0, 0, tree, animations)
    }

    /// Animate to the opposite state, adding one-shot offsets to the target heights
    pub fn toggle_with_offset(
        &mut self,
        expanded_offset: i32,
        collapsed_offset: i32,
        tree: &ViewTree,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.move_to(
            FoldEvent::Toggle,
            true,
            expanded_offset,
            collapsed_offset,
            tree,
            animations,
        )
    }

    pub fn expand(
        &mut self,
        animated: bool,
        tree: &ViewTree,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.move_to(FoldEvent::Expand, animated, 0, 0, tree, animations)
    }

    pub fn collapse(
        &mut self,
        animated: bool,
        tree: &ViewTree,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.move_to(FoldEvent::Collapse, animated, 0, 0, tree, animations)
    }

    fn move_to(
        &mut self,
        event: FoldEvent,
        animated: bool,
        expanded_offset: i32,
        collapsed_offset: i32,
        tree: &ViewTree,
        animations: &mut AnimationScheduler<ViewId>,
    ) -> Result<()> {
        self.heights.check_heights()?;
        let start = self.displayed_height(tree);

        // State flips before the session starts, so listeners see the target
        let target = self.heights.send(event);
        let end = self
            .heights
            .target_height(target, expanded_offset, collapsed_offset);

        if animated && self.heights.is_measured() {
            self.animator
                .start(self.view, animations, start, end, target.is_expanded());
            self.heights.set_animating(true);
        } else {
            self.animator.cancel(animations);
            self.heights.set_animating(false);
            self.heights.set_current(end);
            self.request_layout();
        }
        Ok(())
    }

    /// Height currently on screen
    fn displayed_height(&self, tree: &ViewTree) -> i32 {
        match self.heights.current_height() {
            current if current >= 0 => current,
            _ => tree.height(self.view).unwrap_or(0),
        }
    }

    // =========================================================================
    // Host lifecycle
    // =========================================================================

    /// Resolve the scroll container this layout lives in
    pub fn on_attached(&mut self, tree: &ViewTree) {
        self.scroll_ancestor = find_scrollable_ancestor(tree, self.view);
        tracing::debug!(view = ?self.view, scroll_ancestor = ?self.scroll_ancestor, "attached");
        self.request_layout();
    }

    /// Drop the scroll container and settle any running animation at its end height
    pub fn on_detached(&mut self, animations: &mut AnimationScheduler<ViewId>) {
        self.scroll_ancestor = None;
        if let Some(session) = self.animator.cancel(animations) {
            self.heights.set_current(session.end_height);
            self.heights.set_animating(false);
            self.request_layout();
        }
        tracing::debug!(view = ?self.view, "detached");
    }

    /// Measure pass. The tree must hold this view's natural layout; the height
    /// to report is written back as the view's fixed height.
    pub fn on_measure(&mut self, tree: &mut ViewTree) -> Result<()> {
        let natural = tree.height(self.view)?;

        let derived = match self.edge {
            Some(edge) if self.heights.needs_collapsed_height() => {
                if tree.contains(edge.view) {
                    Some(descendant_bottom(tree, Some(self.view), Some(edge.view))? + edge.offset)
                } else {
                    tracing::trace!(view = ?self.view, "edge view is gone");
                    None
                }
            }
            _ => None,
        };

        let reported = self.heights.measure(natural, derived);
        tracing::trace!(view = ?self.view, natural, ?reported, "measured");
        tree.set_height(self.view, reported)?;
        self.layout_requested = false;
        Ok(())
    }

    /// Apply one animation frame. Returns false for frames of other sessions.
    pub fn on_animation_frame(&mut self, id: AnimationId, t: f32) -> bool {
        let Some(session) = self.animator.session_for(id).copied() else {
            return false;
        };

        let mut height = session.height_at(t);
        if let Some(listener) = self.listener.as_mut() {
            height += listener.on_animating(session.expanding, t);
        }
        self.heights.set_current(height);
        self.request_layout();
        true
    }

    /// Complete the session `id` after its final frame has been laid out.
    ///
    /// Notifies the listener and returns the scroll the enclosing list
    /// should perform, if any.
    pub fn on_animation_end(
        &mut self,
        id: AnimationId,
        tree: &ViewTree,
    ) -> Result<Option<ScrollRequest>> {
        if self.animator.finish(id).is_none() {
            return Ok(None);
        }
        self.heights.set_animating(false);

        let expanded = self.state().is_expanded();
        tracing::debug!(view = ?self.view, expanded, "expand animation finished");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_expand(expanded);
        }

        let Some(container) = self.scroll_ancestor.filter(|c| tree.contains(*c)) else {
            return Ok(None);
        };
        plan_scroll(
            tree,
            self.view,
            container,
            self.state(),
            &self.heights,
            &self.policy,
        )
    }

    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    pub fn layout_requested(&self) -> bool {
        self.layout_requested
    }
}

impl std::fmt::Debug for ExpandableLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableLayout")
            .field("view", &self.view)
            .field("heights", &self.heights)
            .field("edge", &self.edge)
            .field("policy", &self.policy)
            .field("scroll_ancestor", &self.scroll_ancestor)
            .field("animator", &self.animator)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
