//! View tree management
//!
//! Views are slotmap keys mapped onto Taffy nodes. The tree keeps its own
//! parent links and margins so geometry can be resolved without going back
//! through Taffy, and scroll containers are attached to nodes as
//! [`ScrollableContainer`] trait objects.
//!
//! Children stack like a vertical linear layout: they never shrink to fit
//! their parent, so a container reporting a reduced height clips its content
//! instead of squeezing it.

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::error::{LayoutError, Result};
use crate::scroll::ScrollableContainer;

new_key_type! {
    pub struct ViewId;
}

/// A scroll container owned by a view
pub type BoxedScroller = Box<dyn ScrollableContainer>;

/// Layout margins in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn vertical(top: i32, bottom: i32) -> Self {
        Self {
            top,
            bottom,
            ..Default::default()
        }
    }
}

struct ViewNode {
    taffy: NodeId,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    margins: Margins,
    scroller: Option<BoxedScroller>,
}

/// Measured tree of views backed by Taffy
pub struct ViewTree {
    taffy: TaffyTree,
    nodes: SlotMap<ViewId, ViewNode>,
    root: Option<ViewId>,
    needs_layout: bool,
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: SlotMap::with_key(),
            root: None,
            needs_layout: true,
        }
    }

    /// Create a detached view with the given style
    pub fn create_view(&mut self, style: Style) -> Result<ViewId> {
        let taffy = self.taffy.new_leaf(style)?;
        let id = self.nodes.insert(ViewNode {
            taffy,
            parent: None,
            children: Vec::new(),
            margins: Margins::default(),
            scroller: None,
        });
        Ok(id)
    }

    /// Make `id` the window root. Only views under the root are attached.
    pub fn set_root(&mut self, id: ViewId) -> Result<()> {
        self.node(id)?;
        self.root = Some(id);
        self.needs_layout = true;
        Ok(())
    }

    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` to `parent`, moving it out of any previous parent
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        let parent_node = self.node(parent)?.taffy;
        let child_node = self.node(child)?.taffy;

        if let Some(old_parent) = self.node(child)?.parent {
            self.remove_child(old_parent, child)?;
        }

        let mut style = self.taffy.style(child_node)?.clone();
        style.flex_shrink = 0.0;
        self.taffy.set_style(child_node, style)?;
        self.taffy.add_child(parent_node, child_node)?;

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.needs_layout = true;
        Ok(())
    }

    /// Detach `child` from `parent` without destroying it
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        let parent_node = self.node(parent)?.taffy;
        let child_node = self.node(child)?.taffy;
        if self.node(child)?.parent != Some(parent) {
            return Err(LayoutError::NotDescendant {
                view: child,
                ancestor: parent,
            });
        }

        self.taffy.remove_child(parent_node, child_node)?;
        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;
        self.needs_layout = true;
        Ok(())
    }

    /// Destroy a view and its whole subtree, returning every removed id
    pub fn remove_view(&mut self, id: ViewId) -> Result<Vec<ViewId>> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                self.taffy.remove(node.taffy)?;
                pending.extend(node.children);
                removed.push(current);
            }
        }

        if self.root.is_some_and(|root| removed.contains(&root)) {
            self.root = None;
        }
        self.needs_layout = true;
        Ok(removed)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of ancestors above `id`
    pub fn depth(&self, id: ViewId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Whether `id` hangs under the window root
    pub fn is_attached(&self, id: ViewId) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let mut current = Some(id);
        while let Some(view) = current {
            if view == root {
                return true;
            }
            current = self.parent(view);
        }
        false
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn style(&self, id: ViewId) -> Result<&Style> {
        Ok(self.taffy.style(self.node(id)?.taffy)?)
    }

    /// Edit the style of a view in place
    pub fn update_style(&mut self, id: ViewId, edit: impl FnOnce(&mut Style)) -> Result<()> {
        let node = self.node(id)?.taffy;
        let mut style = self.taffy.style(node)?.clone();
        edit(&mut style);
        self.taffy.set_style(node, style)?;
        self.needs_layout = true;
        Ok(())
    }

    /// Set the height a view asks for: `Some(px)` fixes it, `None` sizes to content
    pub fn set_height(&mut self, id: ViewId, height: Option<i32>) -> Result<()> {
        let dimension = match height {
            Some(px) => Dimension::Length(px as f32),
            None => Dimension::Auto,
        };
        if self.style(id)?.size.height == dimension {
            return Ok(());
        }
        self.update_style(id, |style| style.size.height = dimension)
    }

    pub fn set_margins(&mut self, id: ViewId, margins: Margins) -> Result<()> {
        self.node_mut(id)?.margins = margins;
        self.update_style(id, |style| {
            style.margin = Rect {
                left: LengthPercentageAuto::Length(margins.left as f32),
                right: LengthPercentageAuto::Length(margins.right as f32),
                top: LengthPercentageAuto::Length(margins.top as f32),
                bottom: LengthPercentageAuto::Length(margins.bottom as f32),
            }
        })
    }

    pub fn margins(&self, id: ViewId) -> Result<Margins> {
        Ok(self.node(id)?.margins)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Turn a view into a scroll container
    pub fn set_scroller(&mut self, id: ViewId, scroller: BoxedScroller) -> Result<()> {
        self.node_mut(id)?.scroller = Some(scroller);
        self.needs_layout = true;
        Ok(())
    }

    pub fn is_scrollable(&self, id: ViewId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.scroller.is_some())
    }

    pub fn scroller(&self, id: ViewId) -> Option<&BoxedScroller> {
        self.nodes.get(id)?.scroller.as_ref()
    }

    pub fn scroller_mut(&mut self, id: ViewId) -> Option<&mut BoxedScroller> {
        self.nodes.get_mut(id)?.scroller.as_mut()
    }

    /// Scroll offset a view applies to its children, `(0, 0)` if not scrollable
    pub fn scroll_offset(&self, id: ViewId) -> (i32, i32) {
        self.scroller(id)
            .map(|scroller| scroller.scroll_offset())
            .unwrap_or((0, 0))
    }

    /// Advance every running smooth scroll. Returns true if any offset moved.
    pub fn tick_scrollers(&mut self, dt_ms: f32) -> bool {
        let mut moved = false;
        for node in self.nodes.values_mut() {
            if let Some(scroller) = node.scroller.as_mut() {
                moved |= scroller.tick(dt_ms);
            }
        }
        moved
    }

    pub fn is_scrolling(&self) -> bool {
        self.nodes
            .values()
            .filter_map(|node| node.scroller.as_ref())
            .any(|scroller| scroller.is_scrolling())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn request_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Lay out the tree from the root and refresh scroll ranges
    pub fn compute_layout(&mut self, width: f32, height: f32) -> Result<()> {
        self.measure_layout(width, height)?;

        let containers: Vec<ViewId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.scroller.is_some())
            .map(|(id, _)| id)
            .collect();
        for id in containers {
            let (max_x, max_y) = self.scroll_range(id)?;
            if let Some(scroller) = self.scroller_mut(id) {
                scroller.set_scroll_range(max_x, max_y);
            }
        }

        self.needs_layout = false;
        Ok(())
    }

    /// Lay out the tree without touching scroll ranges or the layout flag
    pub(crate) fn measure_layout(&mut self, width: f32, height: f32) -> Result<()> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let root_node = self.node(root)?.taffy;
        self.taffy.compute_layout(
            root_node,
            Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::Definite(height),
            },
        )?;
        Ok(())
    }

    /// How far a container's content extends past its viewport
    fn scroll_range(&self, id: ViewId) -> Result<(i32, i32)> {
        let viewport = self.layout(id)?.size;
        let mut content_right = 0.0f32;
        let mut content_bottom = 0.0f32;
        for &child in self.children(id) {
            let layout = self.layout(child)?;
            let margins = self.node(child)?.margins;
            content_right =
                content_right.max(layout.location.x + layout.size.width + margins.right as f32);
            content_bottom =
                content_bottom.max(layout.location.y + layout.size.height + margins.bottom as f32);
        }
        Ok((
            (content_right - viewport.width).round().max(0.0) as i32,
            (content_bottom - viewport.height).round().max(0.0) as i32,
        ))
    }

    fn layout(&self, id: ViewId) -> Result<&Layout> {
        Ok(self.taffy.layout(self.node(id)?.taffy)?)
    }

    /// Top edge relative to the parent, after the parent's scroll offset
    pub fn top(&self, id: ViewId) -> Result<i32> {
        let y = self.layout(id)?.location.y.round() as i32;
        let scroll_y = self.parent(id).map_or(0, |p| self.scroll_offset(p).1);
        Ok(y - scroll_y)
    }

    /// Bottom edge relative to the parent (`top + height`, margins excluded)
    pub fn bottom(&self, id: ViewId) -> Result<i32> {
        Ok(self.top(id)? + self.height(id)?)
    }

    /// Measured height from the last layout pass
    pub fn height(&self, id: ViewId) -> Result<i32> {
        Ok(self.layout(id)?.size.height.round() as i32)
    }

    /// Measured width from the last layout pass
    pub fn width(&self, id: ViewId) -> Result<i32> {
        Ok(self.layout(id)?.size.width.round() as i32)
    }

    fn node(&self, id: ViewId) -> Result<&ViewNode> {
        self.nodes.get(id).ok_or(LayoutError::UnknownView(id))
    }

    fn node_mut(&mut self, id: ViewId) -> Result<&mut ViewNode> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownView(id))
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}
