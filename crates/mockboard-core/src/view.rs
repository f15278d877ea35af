//! Visual binder: one visual node per element record.
//!
//! Nodes are what a front end draws. Records flow onto nodes through
//! [`apply_to_visual`]; geometry changed on a node during a gesture flows
//! back through [`sync_from_visual`]. Nothing else crosses between the two.

use crate::color::parse_color;
use crate::element::{Element, ElementId, ElementKind};
use crate::error::{EditError, EditResult};
use crate::handles::rotate_about;
use crate::store::ElementStore;
use crate::theme::Theme;
use kurbo::{Point, Rect};
use peniko::Color;
use std::collections::HashMap;

/// The on-screen counterpart of an element.
#[derive(Debug, Clone)]
pub struct VisualNode {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Displayed frame in canvas coordinates.
    pub frame: Rect,
    /// Fill as written on the record.
    pub background: String,
    /// Parsed fill, `None` if the record holds an unparsable color.
    pub fill: Option<Color>,
    pub z_index: u32,
    /// Degrees, clockwise.
    pub rotation: f64,
    /// Displayed content for text-bearing kinds.
    pub text: Option<String>,
    pub selected: bool,
}

impl VisualNode {
    /// Build a node from a record.
    pub fn from_element(element: &Element) -> Self {
        let mut node = Self {
            id: element.id.clone(),
            kind: element.kind,
            frame: Rect::ZERO,
            background: String::new(),
            fill: None,
            z_index: 0,
            rotation: 0.0,
            text: None,
            selected: false,
        };
        node.apply(element);
        node
    }

    /// Push every record field onto the node.
    fn apply(&mut self, element: &Element) {
        self.frame = element.bounds();
        if self.background != element.color {
            self.fill = parse_color(&element.color);
            self.background = element.color.clone();
        }
        self.z_index = element.z_index;
        self.rotation = element.rotation;
        self.text = element.kind.is_text_bearing().then(|| element.text.clone());
    }

    pub fn left(&self) -> f64 {
        self.frame.x0
    }

    pub fn top(&self) -> f64 {
        self.frame.y0
    }

    pub fn width(&self) -> f64 {
        self.frame.width()
    }

    pub fn height(&self) -> f64 {
        self.frame.height()
    }

    /// Move the node keeping its size.
    pub fn set_origin(&mut self, origin: Point) {
        self.frame = Rect::from_origin_size(origin, self.frame.size());
    }

    /// Whether a canvas point lies inside the rotated frame.
    pub fn contains(&self, point: Point) -> bool {
        let center = self.frame.center();
        // Undo the rotation so the test runs against the axis-aligned frame
        let local = rotate_about(center, point.x - center.x, point.y - center.y, -self.rotation);
        self.frame.contains(local)
    }
}

/// All visual nodes plus canvas-level presentation.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: HashMap<ElementId, VisualNode>,
    canvas_background: Option<String>,
    theme: Theme,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every node from the store.
    pub fn render(&mut self, store: &ElementStore, selected: Option<&ElementId>) {
        self.nodes.clear();
        for element in store.iter() {
            self.build(element);
        }
        self.set_selected(selected);
    }

    /// Construct the node for one element, replacing any existing one.
    pub fn build(&mut self, element: &Element) {
        log::debug!("Building node for {} ({})", element.id, element.kind);
        self.nodes.insert(element.id.clone(), VisualNode::from_element(element));
    }

    pub fn remove(&mut self, id: &ElementId) -> Option<VisualNode> {
        self.nodes.remove(id)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn node(&self, id: &ElementId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &ElementId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mark exactly one node (or none) as selected.
    pub fn set_selected(&mut self, id: Option<&ElementId>) {
        for node in self.nodes.values_mut() {
            node.selected = Some(&node.id) == id;
        }
    }

    /// Copy z-indices from the store after a reorder.
    pub fn restack(&mut self, store: &ElementStore) {
        for element in store.iter() {
            if let Some(node) = self.nodes.get_mut(&element.id) {
                node.z_index = element.z_index;
            }
        }
    }

    /// Node ids front to back.
    pub fn stacking_order(&self) -> Vec<ElementId> {
        let mut nodes: Vec<&VisualNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        nodes.into_iter().map(|n| n.id.clone()).collect()
    }

    /// The topmost node containing a point.
    pub fn topmost_at(&self, point: Point) -> Option<&VisualNode> {
        self.nodes
            .values()
            .filter(|n| n.contains(point))
            .max_by_key(|n| n.z_index)
    }

    pub fn canvas_background(&self) -> Option<&str> {
        self.canvas_background.as_deref()
    }

    pub fn set_canvas_background(&mut self, color: Option<String>) {
        self.canvas_background = color;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Swap the root theme class.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

/// Pull displayed geometry and rotation back into the record.
pub fn sync_from_visual(
    store: &mut ElementStore,
    view: &ViewTree,
    id: &ElementId,
) -> EditResult<()> {
    let node = view
        .node(id)
        .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
    let element = store
        .get_mut(id)
        .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
    element.set_bounds(node.frame);
    element.rotation = node.rotation;
    Ok(())
}

/// Push the record's fields onto its node.
pub fn apply_to_visual(
    store: &ElementStore,
    view: &mut ViewTree,
    id: &ElementId,
) -> EditResult<()> {
    let element = store
        .get(id)
        .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
    match view.node_mut(id) {
        Some(node) => node.apply(element),
        None => view.build(element),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(kinds: &[ElementKind]) -> (ElementStore, Vec<ElementId>) {
        let mut store = ElementStore::new();
        let ids = kinds
            .iter()
            .map(|&kind| {
                let el = Element::new(kind);
                let id = el.id.clone();
                store.push(el);
                id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_render_builds_one_node_per_element() {
        let (store, ids) = store_with(&[ElementKind::Rectangle, ElementKind::Text]);
        let mut view = ViewTree::new();
        view.render(&store, Some(&ids[1]));

        assert_eq!(view.len(), 2);
        assert!(!view.node(&ids[0]).unwrap().selected);
        assert!(view.node(&ids[1]).unwrap().selected);
        assert_eq!(view.node(&ids[1]).unwrap().text.as_deref(), Some("Text"));
        assert!(view.node(&ids[0]).unwrap().text.is_none());
    }

    #[test]
    fn test_sync_from_visual_copies_geometry() {
        let (mut store, ids) = store_with(&[ElementKind::Rectangle]);
        let mut view = ViewTree::new();
        view.render(&store, None);

        let node = view.node_mut(&ids[0]).unwrap();
        node.frame = Rect::new(10.0, 20.0, 90.0, 80.0);
        node.rotation = 45.0;
        sync_from_visual(&mut store, &view, &ids[0]).unwrap();

        let el = store.get(&ids[0]).unwrap();
        assert!((el.x - 10.0).abs() < f64::EPSILON);
        assert!((el.y - 20.0).abs() < f64::EPSILON);
        assert!((el.width - 80.0).abs() < f64::EPSILON);
        assert!((el.height - 60.0).abs() < f64::EPSILON);
        assert!((el.rotation - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_to_visual_pushes_fields() {
        let (mut store, ids) = store_with(&[ElementKind::Text]);
        let mut view = ViewTree::new();
        view.render(&store, None);

        {
            let el = store.get_mut(&ids[0]).unwrap();
            el.x = 5.0;
            el.color = "#00ff00".to_string();
            el.text = "Hello".to_string();
        }
        apply_to_visual(&store, &mut view, &ids[0]).unwrap();

        let node = view.node(&ids[0]).unwrap();
        assert!((node.left() - 5.0).abs() < f64::EPSILON);
        assert_eq!(node.background, "#00ff00");
        assert_eq!(node.fill.unwrap().to_rgba8().g, 255);
        assert_eq!(node.text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_missing_ids_error() {
        let (mut store, _) = store_with(&[ElementKind::Text]);
        let mut view = ViewTree::new();
        let missing = ElementId::from("nope");
        assert_eq!(
            sync_from_visual(&mut store, &view, &missing),
            Err(EditError::ElementNotFound(missing.clone()))
        );
        assert!(apply_to_visual(&store, &mut view, &missing).is_err());
    }

    #[test]
    fn test_topmost_at_prefers_higher_z() {
        let (store, ids) = store_with(&[ElementKind::Rectangle, ElementKind::Text]);
        let mut view = ViewTree::new();
        view.render(&store, None);

        // Both cover (150, 150); text is on top
        assert_eq!(view.topmost_at(Point::new(150.0, 150.0)).unwrap().id, ids[1]);
        // Only the rectangle reaches (380, 280)
        assert_eq!(view.topmost_at(Point::new(380.0, 280.0)).unwrap().id, ids[0]);
        assert!(view.topmost_at(Point::new(10.0, 10.0)).is_none());
        assert_eq!(view.stacking_order(), vec![ids[1].clone(), ids[0].clone()]);
    }

    #[test]
    fn test_contains_respects_rotation() {
        let (store, ids) = store_with(&[ElementKind::Rectangle]);
        let mut view = ViewTree::new();
        view.render(&store, None);
        let node = view.node_mut(&ids[0]).unwrap();
        // 300x200 frame centered at (250, 200)
        assert!(node.contains(Point::new(390.0, 200.0)));
        node.rotation = 90.0;
        // Rotated a quarter turn the frame spans 200 wide, 300 tall
        assert!(!node.contains(Point::new(390.0, 200.0)));
        assert!(node.contains(Point::new(250.0, 340.0)));
    }
}
