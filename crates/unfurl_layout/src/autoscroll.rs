//! Auto-scroll after expand/collapse
//!
//! When an animation completes inside a scroll container, the container may
//! need to move so the layout stays in view: after expanding, its bottom
//! edge should not hang below the viewport; after collapsing, its top edge
//! should not sit above it.
//!
//! All positions are measured in the frame of the container's own parent,
//! where the container's top and bottom are its visible edges.

use crate::error::Result;
use crate::geometry::{descendant_bottom, descendant_top};
use crate::state::{FoldState, HeightState};
use crate::tree::{ViewId, ViewTree};

/// Whether and how far to scroll the enclosing container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollPolicy {
    /// Scroll down when the expanded layout extends past the viewport bottom
    pub expand_with_scroll: bool,
    /// Extra distance added to an expand scroll
    pub expand_scroll_offset: i32,
    /// Scroll up when the collapsed layout starts above the viewport top
    pub collapse_with_scroll: bool,
    /// Distance kept between the viewport top and the collapsed layout
    pub collapse_scroll_offset: i32,
}

/// A relative scroll to submit to a container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub container: ViewId,
    pub dx: i32,
    pub dy: i32,
}

/// Decide the scroll for `view` that just settled into `state`.
///
/// Returns `None` when nothing should move; a zero distance is never
/// requested.
pub fn plan_scroll(
    tree: &ViewTree,
    view: ViewId,
    container: ViewId,
    state: FoldState,
    heights: &HeightState,
    policy: &ScrollPolicy,
) -> Result<Option<ScrollRequest>> {
    let Some(frame) = tree.parent(container) else {
        tracing::debug!(?container, "scroll container has no parent, skipping auto-scroll");
        return Ok(None);
    };
    let frame = Some(frame);

    let dy = match state {
        FoldState::Expanded if policy.expand_with_scroll => {
            let container_bottom = tree.bottom(container)?;
            let top = descendant_top(tree, frame, Some(view))?;
            if top + heights.expanded_height() > container_bottom {
                descendant_bottom(tree, frame, Some(view))? - container_bottom
                    + policy.expand_scroll_offset
            } else {
                0
            }
        }
        FoldState::Collapsed if policy.collapse_with_scroll => {
            let container_top = tree.top(container)?;
            let bottom = descendant_bottom(tree, frame, Some(view))?;
            if bottom - heights.collapsed_height() < container_top {
                descendant_top(tree, frame, Some(view))? - container_top
                    - policy.collapse_scroll_offset
            } else {
                0
            }
        }
        _ => 0,
    };

    if dy == 0 {
        return Ok(None);
    }
    tracing::debug!(?view, ?container, dy, ?state, "auto-scroll");
    Ok(Some(ScrollRequest {
        container,
        dx: 0,
        dy,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{RecyclerScroller, ScrollableContainer};
    use crate::style::LayoutStyle;

    struct Fixture {
        tree: ViewTree,
        list: ViewId,
        card: ViewId,
    }

    /// root > list(viewport 300)[filler(lead) + card(card_height) + filler(600)]
    fn fixture(lead: f32, card_height: f32) -> Fixture {
        let mut tree = ViewTree::new();
        let root = tree.create_view(LayoutStyle::window(360.0, 640.0)).unwrap();
        tree.set_root(root).unwrap();
        let list = tree.create_view(LayoutStyle::viewport(300.0)).unwrap();
        tree.add_child(root, list).unwrap();
        tree.set_scroller(list, Box::new(RecyclerScroller::new()))
            .unwrap();

        for height in [lead, card_height, 600.0] {
            let row = tree.create_view(LayoutStyle::fixed_height(height)).unwrap();
            tree.add_child(list, row).unwrap();
        }
        let card = tree.children(list)[1];
        tree.compute_layout(360.0, 640.0).unwrap();
        Fixture { tree, list, card }
    }

    fn heights(collapsed: i32, expanded: i32) -> HeightState {
        let mut heights = HeightState::new();
        heights.measure(expanded, Some(collapsed));
        heights
    }

    fn expand_policy(offset: i32) -> ScrollPolicy {
        ScrollPolicy {
            expand_with_scroll: true,
            expand_scroll_offset: offset,
            ..Default::default()
        }
    }

    fn collapse_policy(offset: i32) -> ScrollPolicy {
        ScrollPolicy {
            collapse_with_scroll: true,
            collapse_scroll_offset: offset,
            ..Default::default()
        }
    }

    #[test]
    fn test_expand_past_viewport_scrolls_down() {
        let f = fixture(140.0, 200.0);
        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Expanded,
            &heights(50, 200),
            &expand_policy(8),
        )
        .unwrap();

        assert_eq!(
            request,
            Some(ScrollRequest {
                container: f.list,
                dx: 0,
                dy: 48
            })
        );
    }

    #[test]
    fn test_expand_inside_viewport_is_left_alone() {
        let f = fixture(100.0, 200.0);
        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Expanded,
            &heights(50, 200),
            &expand_policy(0),
        )
        .unwrap();
        assert_eq!(request, None);
    }

    #[test]
    fn test_disabled_policy_never_scrolls() {
        let f = fixture(140.0, 200.0);
        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Expanded,
            &heights(50, 200),
            &ScrollPolicy::default(),
        )
        .unwrap();
        assert_eq!(request, None);

        // an expand policy says nothing about collapsing
        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Collapsed,
            &heights(50, 200),
            &expand_policy(0),
        )
        .unwrap();
        assert_eq!(request, None);
    }

    #[test]
    fn test_collapse_above_viewport_scrolls_up() {
        let mut f = fixture(100.0, 50.0);
        f.tree.scroller_mut(f.list).unwrap().scroll_by(0, 200);
        while f.tree.is_scrolling() {
            f.tree.tick_scrollers(16.0);
        }
        assert_eq!(f.tree.top(f.card).unwrap(), -100);

        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Collapsed,
            &heights(50, 200),
            &collapse_policy(16),
        )
        .unwrap();
        assert_eq!(request.map(|r| r.dy), Some(-116));
    }

    #[test]
    fn test_collapse_with_visible_header_is_left_alone() {
        let f = fixture(100.0, 50.0);
        let request = plan_scroll(
            &f.tree,
            f.card,
            f.list,
            FoldState::Collapsed,
            &heights(50, 200),
            &collapse_policy(0),
        )
        .unwrap();
        assert_eq!(request, None);
    }

    #[test]
    fn test_root_container_is_skipped() {
        let mut tree = ViewTree::new();
        let list = tree.create_view(LayoutStyle::viewport(300.0)).unwrap();
        tree.set_root(list).unwrap();
        tree.set_scroller(list, Box::new(RecyclerScroller::new()))
            .unwrap();
        let card = tree.create_view(LayoutStyle::fixed_height(900.0)).unwrap();
        tree.add_child(list, card).unwrap();
        tree.compute_layout(360.0, 640.0).unwrap();

        let request = plan_scroll(
            &tree,
            card,
            list,
            FoldState::Expanded,
            &heights(50, 900),
            &expand_policy(0),
        )
        .unwrap();
        assert_eq!(request, None);
    }
}
