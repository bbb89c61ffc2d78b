//! In-memory clipboard and the offset-clone step shared by paste and
//! duplicate.

use crate::element::{max_z_index, Element};

/// Offset applied to pasted and duplicated elements on both axes.
pub const PASTE_OFFSET: i32 = 20;

/// Copied elements, held by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    items: Vec<Element>,
}

impl Clipboard {
    /// Empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with copies of `elements`.
    pub fn copy<'a, I: IntoIterator<Item = &'a Element>>(&mut self, elements: I) {
        self.items = elements.into_iter().cloned().collect();
    }

    /// Copied elements.
    #[must_use]
    pub fn items(&self) -> &[Element] {
        &self.items
    }

    /// Number of copied elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been copied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Clone `sources` under fresh ids, offset by [`PASTE_OFFSET`] and stacked
/// above everything in `existing` in source order.
#[must_use]
pub fn clone_with_offset(sources: &[Element], existing: &[Element]) -> Vec<Element> {
    let base = max_z_index(existing);
    sources
        .iter()
        .zip(1..)
        .map(|(source, step)| {
            source
                .duplicate(PASTE_OFFSET, PASTE_OFFSET)
                .with_z_index(base.saturating_add(step))
        })
        .collect()
}
