//! Row holder

use unfurl_layout::ViewId;

/// Views of one recycled list row
#[derive(Clone, Copy, Debug)]
pub struct RowHolder {
    /// The expandable container
    pub card: ViewId,
    /// Title strip, the collapsed edge of `card`
    pub title: ViewId,
    pub body: ViewId,
    position: Option<usize>,
}

impl RowHolder {
    pub fn new(card: ViewId, title: ViewId, body: ViewId) -> Self {
        Self {
            card,
            title,
            body,
            position: None,
        }
    }

    /// Adapter position currently bound, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn bind(&mut self, position: usize) {
        self.position = Some(position);
    }

    pub(crate) fn unbind(&mut self) {
        self.position = None;
    }
}
