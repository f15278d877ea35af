//! Ordered element storage.
//!
//! Array order is stacking order (back to front). The z-index of every
//! element is its position + 1, and an id → position index is kept in step
//! with every structural change.

use crate::element::{Element, ElementId};
use std::collections::HashMap;

/// The ordered element list plus its id index.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from elements in stacking order.
    ///
    /// Later duplicates of an id are dropped. z-indices are renumbered.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        for element in elements {
            if store.index.contains_key(&element.id) {
                log::warn!("Dropping element with duplicate id {}", element.id);
                continue;
            }
            store.index.insert(element.id.clone(), store.elements.len());
            store.elements.push(element);
        }
        store.renumber();
        store
    }

    /// Append an element on top of the stack, assigning the next z-index.
    ///
    /// Returns `false` (and does nothing) if the id is already present.
    pub fn push(&mut self, mut element: Element) -> bool {
        if self.index.contains_key(&element.id) {
            return false;
        }
        element.z_index = self.elements.len() as u32 + 1;
        self.index.insert(element.id.clone(), self.elements.len());
        self.elements.push(element);
        true
    }

    /// Remove an element and close the gap in the z-order.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let pos = self.index.remove(id)?;
        let removed = self.elements.remove(pos);
        self.renumber();
        Some(removed)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
    }

    /// Swap the stacking positions of two elements.
    ///
    /// Returns `true` if both exist and they are distinct.
    pub fn swap(&mut self, a: &ElementId, b: &ElementId) -> bool {
        if a == b {
            return false;
        }
        let (Some(&from), Some(&to)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        self.elements.swap(from, to);
        self.renumber();
        true
    }

    /// Reassign z-indices from array order and rebuild the index.
    pub fn renumber(&mut self) {
        self.index.clear();
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.z_index = i as u32 + 1;
            self.index.insert(element.id.clone(), i);
        }
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.index.get(id).map(|&i| &self.elements[i])
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        let i = *self.index.get(id)?;
        self.elements.get_mut(i)
    }

    /// Position of an element in stacking order (0 = bottom).
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// Elements front to back (highest z-index first).
    pub fn by_z_desc(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        ordered
    }

    /// Whether z-indices are exactly 1..=N in array order.
    pub fn is_dense(&self) -> bool {
        self.elements
            .iter()
            .enumerate()
            .all(|(i, e)| e.z_index == i as u32 + 1 && self.index.get(&e.id) == Some(&i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn store_with(n: usize) -> (ElementStore, Vec<ElementId>) {
        let mut store = ElementStore::new();
        let mut ids = Vec::new();
        for _ in 0..n {
            let el = Element::new(ElementKind::Rectangle);
            ids.push(el.id.clone());
            store.push(el);
        }
        (store, ids)
    }

    #[test]
    fn test_push_assigns_next_z() {
        let (store, ids) = store_with(3);
        assert_eq!(store.get(&ids[0]).unwrap().z_index, 1);
        assert_eq!(store.get(&ids[2]).unwrap().z_index, 3);
        assert!(store.is_dense());
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let (mut store, ids) = store_with(1);
        let mut dup = Element::new(ElementKind::Text);
        dup.id = ids[0].clone();
        assert!(!store.push(dup));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_keeps_dense() {
        let (mut store, ids) = store_with(4);
        store.remove(&ids[1]).unwrap();
        assert!(store.is_dense());
        assert_eq!(store.get(&ids[2]).unwrap().z_index, 2);
        assert_eq!(store.position(&ids[3]), Some(2));
        assert!(store.remove(&ids[1]).is_none());
    }

    #[test]
    fn test_dense_over_mixed_sequence() {
        let mut store = ElementStore::new();
        let mut live = Vec::new();
        for step in 0..30 {
            if step % 3 == 2 && !live.is_empty() {
                let id: ElementId = live.remove(step % live.len());
                store.remove(&id);
            } else {
                let el = Element::new(ElementKind::ALL[step % 4]);
                live.push(el.id.clone());
                store.push(el);
            }
            assert!(store.is_dense());
            assert_eq!(store.len(), live.len());
        }
    }

    #[test]
    fn test_swap() {
        let (mut store, ids) = store_with(3);
        assert!(store.swap(&ids[0], &ids[2]));
        assert_eq!(store.position(&ids[0]), Some(2));
        assert_eq!(store.get(&ids[0]).unwrap().z_index, 3);
        assert_eq!(store.get(&ids[2]).unwrap().z_index, 1);
        assert_eq!(store.get(&ids[1]).unwrap().z_index, 2);
        assert!(store.is_dense());
    }

    #[test]
    fn test_swap_noop_cases() {
        let (mut store, ids) = store_with(2);
        assert!(!store.swap(&ids[0], &ids[0]));
        assert!(!store.swap(&ids[0], &ElementId::from("missing")));
        assert_eq!(store.position(&ids[0]), Some(0));
    }

    #[test]
    fn test_from_elements_renumbers_and_dedups() {
        let mut a = Element::new(ElementKind::Rectangle);
        a.z_index = 7;
        let mut b = Element::new(ElementKind::Text);
        b.z_index = 2;
        let mut dup = Element::new(ElementKind::Text);
        dup.id = a.id.clone();

        let store = ElementStore::from_elements(vec![a.clone(), b.clone(), dup]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a.id).unwrap().z_index, 1);
        assert_eq!(store.get(&a.id).unwrap().kind, ElementKind::Rectangle);
        assert_eq!(store.get(&b.id).unwrap().z_index, 2);
    }

    #[test]
    fn test_by_z_desc() {
        let (store, ids) = store_with(3);
        let order: Vec<&ElementId> = store.by_z_desc().into_iter().map(|e| &e.id).collect();
        assert_eq!(order, vec![&ids[2], &ids[1], &ids[0]]);
    }
}
