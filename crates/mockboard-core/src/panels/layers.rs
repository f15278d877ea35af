//! Layers list with drag-and-drop reordering, plus the layer note.

use crate::element::{ElementId, ElementKind};
use crate::store::ElementStore;

/// One row of the layers list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub id: ElementId,
    pub label: &'static str,
    pub kind: ElementKind,
    pub z_index: u32,
    pub selected: bool,
}

/// Free-text note shown under the layers list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNote {
    pub text: String,
    pub visible: bool,
}

impl LayerNote {
    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

/// The layers panel.
#[derive(Debug, Clone, Default)]
pub struct LayersPanel {
    rows: Vec<LayerRow>,
    /// Row currently being dragged.
    dragged: Option<ElementId>,
    pub note: LayerNote,
}

impl LayersPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild rows topmost first.
    pub fn rebuild(&mut self, store: &ElementStore, selected: Option<&ElementId>) {
        self.rows = store
            .by_z_desc()
            .into_iter()
            .map(|e| LayerRow {
                id: e.id.clone(),
                label: e.kind.name(),
                kind: e.kind,
                z_index: e.z_index,
                selected: Some(&e.id) == selected,
            })
            .collect();
    }

    pub fn rows(&self) -> &[LayerRow] {
        &self.rows
    }

    pub fn dragged(&self) -> Option<&ElementId> {
        self.dragged.as_ref()
    }

    pub fn drag_start(&mut self, id: ElementId) {
        self.dragged = Some(id);
    }

    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    /// Drop the dragged row onto `target`.
    ///
    /// Returns the pair of ids to swap, or `None` when nothing is being
    /// dragged or the row is dropped onto itself.
    pub fn drop_on(&mut self, target: &ElementId) -> Option<(ElementId, ElementId)> {
        let dragged = self.dragged.take()?;
        if &dragged == target {
            return None;
        }
        Some((dragged, target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn store_with(n: usize) -> (ElementStore, Vec<ElementId>) {
        let mut store = ElementStore::new();
        let mut ids = Vec::new();
        for i in 0..n {
            let el = Element::new(ElementKind::ALL[i % 4]);
            ids.push(el.id.clone());
            store.push(el);
        }
        (store, ids)
    }

    #[test]
    fn test_rows_topmost_first() {
        let (store, ids) = store_with(3);
        let mut panel = LayersPanel::new();
        panel.rebuild(&store, Some(&ids[0]));

        let order: Vec<&ElementId> = panel.rows().iter().map(|r| &r.id).collect();
        assert_eq!(order, vec![&ids[2], &ids[1], &ids[0]]);
        assert_eq!(panel.rows()[0].label, "preset-card");
        assert!(panel.rows()[2].selected);
        assert!(!panel.rows()[0].selected);
    }

    #[test]
    fn test_drop_returns_swap_pair() {
        let (_, ids) = store_with(2);
        let mut panel = LayersPanel::new();
        panel.drag_start(ids[0].clone());
        assert_eq!(panel.drop_on(&ids[1]), Some((ids[0].clone(), ids[1].clone())));
        assert!(panel.dragged().is_none());
    }

    #[test]
    fn test_drop_noops() {
        let (_, ids) = store_with(1);
        let mut panel = LayersPanel::new();
        assert_eq!(panel.drop_on(&ids[0]), None);
        panel.drag_start(ids[0].clone());
        assert_eq!(panel.drop_on(&ids[0]), None);
    }

    #[test]
    fn test_note_toggle() {
        let mut note = LayerNote::default();
        assert!(note.toggle());
        assert!(!note.toggle());
    }
}
