//! The set of currently selected element ids.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Ordered, duplicate-free set of selected ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection.
    pub fn replace<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        self.ids.clear();
        self.extend(ids);
    }

    /// Add ids not already selected.
    pub fn extend<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Flip membership of each id.
    pub fn toggle<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        for id in ids {
            if let Some(pos) = self.ids.iter().position(|s| *s == id) {
                self.ids.remove(pos);
            } else {
                self.ids.push(id);
            }
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only ids satisfying `keep`.
    pub fn retain<F: FnMut(&ElementId) -> bool>(&mut self, keep: F) {
        self.ids.retain(keep);
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected id when exactly one is selected.
    #[must_use]
    pub fn single(&self) -> Option<ElementId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_symmetric_difference() {
        let (a, b, c) = (ElementId::new(), ElementId::new(), ElementId::new());
        let mut s = Selection::new();
        s.replace([a, b]);
        s.toggle([b, c]);
        assert_eq!(s.ids(), &[a, c]);
    }

    #[test]
    fn replace_dedups() {
        let a = ElementId::new();
        let mut s = Selection::new();
        s.replace([a, a]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.single(), Some(a));
    }

    #[test]
    fn single_requires_exactly_one() {
        let mut s = Selection::new();
        assert_eq!(s.single(), None);
        s.replace([ElementId::new(), ElementId::new()]);
        assert_eq!(s.single(), None);
    }
}
