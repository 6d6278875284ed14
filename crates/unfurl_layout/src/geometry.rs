//! Ancestor geometry
//!
//! Resolves a view's edges in the coordinate space of one of its ancestors by
//! walking parent links and summing local offsets, and finds the nearest
//! scrollable ancestor of a view.

use crate::error::{LayoutError, Result};
use crate::tree::{ViewId, ViewTree};

/// Upper bound on parent links followed by any walk
pub const MAX_ANCESTOR_DEPTH: usize = 512;

/// Top edge of `view` relative to `ancestor`.
///
/// A missing ancestor or view resolves to `0`, as does a view that has no
/// parent at all. A parent chain that ends before meeting `ancestor` is an
/// error.
pub fn descendant_top(
    tree: &ViewTree,
    ancestor: Option<ViewId>,
    view: Option<ViewId>,
) -> Result<i32> {
    let (Some(ancestor), Some(view)) = (ancestor, view) else {
        return Ok(0);
    };
    if !tree.contains(ancestor) {
        return Err(LayoutError::UnknownView(ancestor));
    }
    if !tree.contains(view) {
        return Err(LayoutError::UnknownView(view));
    }
    if view == ancestor || tree.parent(view).is_none() {
        return Ok(0);
    }

    let mut top = 0;
    let mut current = view;
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let Some(parent) = tree.parent(current) else {
            return Err(LayoutError::NotDescendant { view, ancestor });
        };
        top += tree.top(current)?;
        if parent == ancestor {
            return Ok(top);
        }
        current = parent;
    }

    Err(LayoutError::DepthExceeded {
        view,
        limit: MAX_ANCESTOR_DEPTH,
    })
}

/// Bottom edge of `view` relative to `ancestor`, including its bottom margin
pub fn descendant_bottom(
    tree: &ViewTree,
    ancestor: Option<ViewId>,
    view: Option<ViewId>,
) -> Result<i32> {
    let (Some(_), Some(id)) = (ancestor, view) else {
        return Ok(0);
    };
    let top = descendant_top(tree, ancestor, view)?;
    Ok(top + tree.height(id)? + tree.margins(id)?.bottom)
}

/// Nearest ancestor of `view` that carries a scroll container
pub fn find_scrollable_ancestor(tree: &ViewTree, view: ViewId) -> Option<ViewId> {
    let mut current = tree.parent(view);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let id = current?;
        if tree.is_scrollable(id) {
            return Some(id);
        }
        current = tree.parent(id);
    }
    tracing::warn!(?view, "scrollable ancestor search gave up");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{ListScroller, RecyclerScroller};
    use crate::style::LayoutStyle;
    use crate::tree::Margins;

    struct Fixture {
        tree: ViewTree,
        root: ViewId,
        outer: ViewId,
        inner: ViewId,
        leaf: ViewId,
    }

    /// root > spacer(30) + outer > spacer(20) + inner > spacer(10) + leaf(40)
    fn nested() -> Fixture {
        let mut tree = ViewTree::new();
        let root = tree.create_view(LayoutStyle::window(300.0, 600.0)).unwrap();
        tree.set_root(root).unwrap();

        let add = |tree: &mut ViewTree, parent: ViewId, height: Option<f32>| {
            let style = match height {
                Some(h) => LayoutStyle::fixed_height(h),
                None => LayoutStyle::column(),
            };
            let id = tree.create_view(style).unwrap();
            tree.add_child(parent, id).unwrap();
            id
        };

        add(&mut tree, root, Some(30.0));
        let outer = add(&mut tree, root, None);
        add(&mut tree, outer, Some(20.0));
        let inner = add(&mut tree, outer, None);
        add(&mut tree, inner, Some(10.0));
        let leaf = add(&mut tree, inner, Some(40.0));
        tree.set_margins(leaf, Margins::vertical(0, 6)).unwrap();

        tree.compute_layout(300.0, 600.0).unwrap();
        Fixture {
            tree,
            root,
            outer,
            inner,
            leaf,
        }
    }

    #[test]
    fn test_top_sums_every_generation() {
        let f = nested();
        assert_eq!(descendant_top(&f.tree, Some(f.inner), Some(f.leaf)).unwrap(), 10);
        assert_eq!(descendant_top(&f.tree, Some(f.outer), Some(f.leaf)).unwrap(), 30);
        assert_eq!(descendant_top(&f.tree, Some(f.root), Some(f.leaf)).unwrap(), 60);
    }

    #[test]
    fn test_top_is_transitive() {
        let f = nested();
        let via_outer = descendant_top(&f.tree, Some(f.root), Some(f.outer)).unwrap()
            + descendant_top(&f.tree, Some(f.outer), Some(f.leaf)).unwrap();
        assert_eq!(
            via_outer,
            descendant_top(&f.tree, Some(f.root), Some(f.leaf)).unwrap()
        );
    }

    #[test]
    fn test_bottom_includes_height_and_margin() {
        let f = nested();
        assert_eq!(
            descendant_bottom(&f.tree, Some(f.inner), Some(f.leaf)).unwrap(),
            10 + 40 + 6
        );
        assert_eq!(
            descendant_bottom(&f.tree, Some(f.root), Some(f.leaf)).unwrap(),
            60 + 40 + 6
        );
    }

    #[test]
    fn test_missing_arguments_resolve_to_zero() {
        let f = nested();
        assert_eq!(descendant_top(&f.tree, None, Some(f.leaf)).unwrap(), 0);
        assert_eq!(descendant_top(&f.tree, Some(f.root), None).unwrap(), 0);
        assert_eq!(descendant_bottom(&f.tree, Some(f.root), None).unwrap(), 0);
        assert_eq!(descendant_bottom(&f.tree, None, Some(f.leaf)).unwrap(), 0);
    }

    #[test]
    fn test_view_relative_to_itself() {
        let f = nested();
        assert_eq!(descendant_top(&f.tree, Some(f.inner), Some(f.inner)).unwrap(), 0);
    }

    #[test]
    fn test_unrelated_ancestor_is_an_error() {
        let f = nested();
        // inner is not inside leaf
        let err = descendant_top(&f.tree, Some(f.leaf), Some(f.inner)).unwrap_err();
        assert!(matches!(err, LayoutError::NotDescendant { .. }));

        let err = descendant_bottom(&f.tree, Some(f.leaf), Some(f.outer)).unwrap_err();
        assert!(matches!(err, LayoutError::NotDescendant { .. }));
    }

    #[test]
    fn test_removed_view_is_an_error() {
        let mut f = nested();
        f.tree.remove_view(f.inner).unwrap();
        let err = descendant_top(&f.tree, Some(f.root), Some(f.leaf)).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownView(_)));
    }

    #[test]
    fn test_finds_nearest_scrollable_ancestor() {
        let mut f = nested();
        assert_eq!(find_scrollable_ancestor(&f.tree, f.leaf), None);

        f.tree
            .set_scroller(f.root, Box::new(ListScroller::new()))
            .unwrap();
        assert_eq!(find_scrollable_ancestor(&f.tree, f.leaf), Some(f.root));

        f.tree
            .set_scroller(f.outer, Box::new(RecyclerScroller::new()))
            .unwrap();
        assert_eq!(find_scrollable_ancestor(&f.tree, f.leaf), Some(f.outer));
        // the view itself is never its own scroll ancestor
        assert_eq!(find_scrollable_ancestor(&f.tree, f.outer), Some(f.root));
    }
}
