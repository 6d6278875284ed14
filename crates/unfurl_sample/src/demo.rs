//! Scripted demo list
//!
//! A fixed pool of row holders in a scrolling list. Paging rebinds every
//! holder to the next block of positions, the way a recycling list reuses
//! rows that scrolled out of view.

use anyhow::{Context, Result};
use unfurl_layout::prelude::*;

use crate::adapter::{DemoAdapter, RowStyle};
use crate::config::SampleConfig;
use crate::holder::RowHolder;
use crate::units::dip_to_px;

pub struct DemoList {
    host: LayoutHost,
    list: ViewId,
    adapter: DemoAdapter,
    holders: Vec<RowHolder>,
    page: usize,
    frame_ms: f32,
    max_frames: usize,
}

impl DemoList {
    pub fn new(config: &SampleConfig) -> Result<Self> {
        let px = |dp: f32| dip_to_px(config.density, dp);
        let width = px(config.window.width_dp) as f32;
        let height = px(config.window.height_dp) as f32;

        let mut host = LayoutHost::new(width, height)?;
        let root = host.root().context("layout host has no window root")?;
        let tree = host.tree_mut();
        let list = tree.create_view(LayoutStyle::viewport(height))?;
        tree.add_child(root, list)?;
        tree.set_scroller(list, Box::new(RecyclerScroller::new()))?;

        let style = RowStyle {
            title_px: px(config.row.title_dp),
            body_px: px(config.row.body_dp),
            policy: ScrollPolicy {
                expand_with_scroll: config.scroll.expand,
                expand_scroll_offset: px(config.scroll.expand_offset_dp),
                collapse_with_scroll: config.scroll.collapse,
                collapse_scroll_offset: px(config.scroll.collapse_offset_dp),
            },
        };
        let adapter = DemoAdapter::new(config.rows, style);
        let holders = (0..config.pool_size)
            .map(|_| adapter.create_row(&mut host, list))
            .collect::<Result<Vec<_>>>()?;

        let mut demo = Self {
            host,
            list,
            adapter,
            holders,
            page: 0,
            frame_ms: config.frame_ms,
            max_frames: config.max_frames,
        };
        demo.show_page(0)?;
        Ok(demo)
    }

    pub fn adapter(&self) -> &DemoAdapter {
        &self.adapter
    }

    pub fn holders(&self) -> &[RowHolder] {
        &self.holders
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.adapter
            .item_count()
            .div_ceil(self.holders.len().max(1))
            .max(1)
    }

    /// Rebind every holder to the positions of `page` and scroll back to the top
    pub fn show_page(&mut self, page: usize) -> Result<()> {
        if page >= self.page_count() {
            anyhow::bail!("page {page} out of range ({} pages)", self.page_count());
        }

        let first = page * self.holders.len();
        for (slot, holder) in self.holders.iter_mut().enumerate() {
            let position = first + slot;
            if position < self.adapter.item_count() {
                self.adapter.bind_row(&mut self.host, holder, position)?;
            } else {
                self.adapter.unbind_row(&mut self.host, holder)?;
            }
        }
        self.page = page;

        if let Some(scroller) = self.host.tree_mut().scroller_mut(self.list) {
            scroller.scroll_to(0, 0);
        }
        tracing::debug!(page, first, "page bound");
        self.settle()?;
        Ok(())
    }

    /// Tap the title of the row in `slot`
    pub fn click(&mut self, slot: usize) -> Result<()> {
        let holder = *self
            .holders
            .get(slot)
            .with_context(|| format!("no row holder in slot {slot}"))?;
        self.adapter.on_title_click(&mut self.host, &holder)
    }

    /// Run frames until nothing moves. Returns the number of frames run.
    pub fn settle(&mut self) -> Result<usize> {
        Ok(self.host.run_until_idle(self.frame_ms, self.max_frames)?)
    }

    pub fn row_height(&self, slot: usize) -> Result<i32> {
        let holder = self
            .holders
            .get(slot)
            .with_context(|| format!("no row holder in slot {slot}"))?;
        Ok(self.host.tree().height(holder.card)?)
    }

    pub fn scroll_offset(&self) -> i32 {
        self.host.tree().scroll_offset(self.list).1
    }

    /// Log every row of the current page
    pub fn log_rows(&self) -> Result<()> {
        for holder in &self.holders {
            let Some(position) = holder.position() else {
                continue;
            };
            let tree = self.host.tree();
            tracing::info!(
                position,
                expanded = self.adapter.is_expanded(position),
                height = tree.height(holder.card)?,
                title_bottom = tree.bottom(holder.title)?,
                body_top = tree.top(holder.body)?,
                "row"
            );
        }
        Ok(())
    }
}

/// Expand two rows, page away and back, then collapse one again
pub fn run(config: &SampleConfig) -> Result<()> {
    let mut demo = DemoList::new(config)?;
    tracing::info!(
        rows = demo.adapter().item_count(),
        pool = demo.holders().len(),
        pages = demo.page_count(),
        "list ready"
    );

    let last = demo.holders().len().saturating_sub(1);
    for slot in [0, last] {
        demo.click(slot)?;
        let frames = demo.settle()?;
        tracing::info!(
            slot,
            frames,
            height = demo.row_height(slot)?,
            scroll = demo.scroll_offset(),
            "toggled"
        );
    }

    if demo.page_count() > 1 {
        demo.show_page(1)?;
        tracing::info!(page = demo.page(), "paged forward");
        demo.log_rows()?;
        demo.show_page(0)?;
        tracing::info!(page = demo.page(), "paged back");
    }
    demo.log_rows()?;

    demo.click(0)?;
    let frames = demo.settle()?;
    tracing::info!(
        frames,
        height = demo.row_height(0)?,
        scroll = demo.scroll_offset(),
        "collapsed first row"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1px per dp, a 200px list and rows of 48 + 160
    fn config(rows: usize, pool_size: usize) -> SampleConfig {
        let mut config = SampleConfig::default();
        config.rows = rows;
        config.pool_size = pool_size;
        config.density = 1.0;
        config.window.height_dp = 200.0;
        config.max_frames = 200;
        config
    }

    #[test]
    fn test_rows_start_collapsed() {
        let demo = DemoList::new(&config(10, 4)).unwrap();
        assert_eq!(demo.page_count(), 3);
        for slot in 0..4 {
            assert_eq!(demo.row_height(slot).unwrap(), 48);
        }
    }

    #[test]
    fn test_state_survives_paging() {
        let mut demo = DemoList::new(&config(10, 4)).unwrap();
        demo.click(1).unwrap();
        demo.settle().unwrap();
        assert_eq!(demo.row_height(1).unwrap(), 208);

        demo.show_page(1).unwrap();
        assert_eq!(demo.holders()[1].position(), Some(5));
        assert_eq!(demo.row_height(1).unwrap(), 48);

        demo.show_page(0).unwrap();
        assert_eq!(demo.row_height(1).unwrap(), 208);
        assert!(demo.adapter().is_expanded(1));
    }

    #[test]
    fn test_last_page_leaves_spare_holders_unbound() {
        let mut demo = DemoList::new(&config(10, 4)).unwrap();
        demo.show_page(2).unwrap();

        let positions: Vec<_> = demo.holders().iter().map(|h| h.position()).collect();
        assert_eq!(positions, vec![Some(8), Some(9), None, None]);
        assert!(demo.click(3).is_err());
        assert!(demo.show_page(3).is_err());
    }

    #[test]
    fn test_expanding_last_row_scrolls_it_into_view() {
        let mut demo = DemoList::new(&config(4, 4)).unwrap();
        // row 3 sits at 144..192, expanded it ends at 352
        demo.click(3).unwrap();
        demo.settle().unwrap();
        assert_eq!(demo.scroll_offset(), 152);

        demo.show_page(0).unwrap();
        assert_eq!(demo.scroll_offset(), 0);
    }
}
