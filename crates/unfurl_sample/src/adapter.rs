//! List adapter
//!
//! Builds expandable rows and binds them to list positions. The expand state
//! of every position lives here, not in the rows, so it survives a row being
//! recycled for another position.

use anyhow::{Context, Result};
use unfurl_layout::prelude::*;

use crate::holder::RowHolder;

/// Pixel geometry and scroll behaviour shared by all rows
#[derive(Clone, Copy, Debug)]
pub struct RowStyle {
    pub title_px: i32,
    pub body_px: i32,
    pub policy: ScrollPolicy,
}

pub struct DemoAdapter {
    expand_state: Vec<bool>,
    style: RowStyle,
}

impl DemoAdapter {
    pub fn new(item_count: usize, style: RowStyle) -> Self {
        Self {
            expand_state: vec![false; item_count],
            style,
        }
    }

    pub fn item_count(&self) -> usize {
        self.expand_state.len()
    }

    /// Saved state of `position`
    pub fn is_expanded(&self, position: usize) -> bool {
        self.expand_state.get(position).copied().unwrap_or(false)
    }

    /// Build an unbound row at the end of `list`
    pub fn create_row(&self, host: &mut LayoutHost, list: ViewId) -> Result<RowHolder> {
        let card = host.create_expandable(list)?;

        let tree = host.tree_mut();
        let title = tree.create_view(LayoutStyle::fixed_height(self.style.title_px as f32))?;
        let body = tree.create_view(LayoutStyle::fixed_height(self.style.body_px as f32))?;
        tree.add_child(card, title)?;
        tree.add_child(card, body)?;

        let layout = host.expandable_mut(card)?;
        layout.set_collapsed_edge_view(title, 0);
        layout.set_scroll_policy(self.style.policy);
        host.attach(card)?;

        Ok(RowHolder::new(card, title, body))
    }

    /// Show `position` in `holder`, restoring its saved state without animating
    pub fn bind_row(
        &self,
        host: &mut LayoutHost,
        holder: &mut RowHolder,
        position: usize,
    ) -> Result<()> {
        let expanded = *self.expand_state.get(position).with_context(|| {
            format!(
                "position {position} is out of range ({} rows)",
                self.item_count()
            )
        })?;

        holder.bind(position);
        host.init_state(holder.card, !expanded)?;
        host.expandable_mut(holder.card)?
            .set_on_expand_listener(move |expanded: bool| {
                tracing::info!(position, expanded, "row settled");
            });
        Ok(())
    }

    /// Park a holder that has no position to show
    pub fn unbind_row(&self, host: &mut LayoutHost, holder: &mut RowHolder) -> Result<()> {
        holder.unbind();
        host.init_state(holder.card, true)?;
        host.expandable_mut(holder.card)?.clear_on_expand_listener();
        Ok(())
    }

    /// Title tapped: animate the row and remember its new state
    pub fn on_title_click(&mut self, host: &mut LayoutHost, holder: &RowHolder) -> Result<()> {
        let position = holder.position().context("row is not bound")?;
        host.toggle(holder.card)?;
        if let Some(expanded) = self.expand_state.get_mut(position) {
            *expanded = !*expanded;
        }
        Ok(())
    }
}
