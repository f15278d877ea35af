//! The editor: owns the state and every component, and routes input.
//!
//! Every user action enters as an [`Intent`] (or the matching method),
//! mutates [`EditorState`], updates the bound view and panels, and
//! persists. Gestures write only to visual nodes until pointer-up, when
//! the record is synced from the node.

use crate::color::is_valid_color;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementKind};
use crate::error::{EditError, EditResult};
use crate::export::{self, Download, ExportError};
use crate::gesture::{Gesture, GestureKind, GestureLimits};
use crate::handles::{HandleKind, hit_test_handles};
use crate::input::{Key, Modifiers, PointerEvent};
use crate::keyboard::{KeyAction, action_for};
use crate::panels::properties::{apply_edit, parse_input};
use crate::panels::{LayerNote, LayersPanel, PropertiesPanel, PropertyEdit, PropertyField};
use crate::persist::{LoadOutcome, PersistenceAdapter};
use crate::storage::Storage;
use crate::store::ElementStore;
use crate::theme::Theme;
use crate::view::{ViewTree, apply_to_visual, sync_from_visual};
use kurbo::{Point, Size};

/// Session state: the element list, selection and canvas background.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub elements: ElementStore,
    pub selected_id: Option<ElementId>,
    pub canvas_color: Option<String>,
}

/// A UI event translated into one editor mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddElement(ElementKind),
    SelectElement(ElementId),
    DeleteElement(ElementId),
    /// Click on empty canvas.
    ClickCanvas,
    Pointer(PointerEvent),
    KeyDown(Key),
    EditProperty { field: PropertyField, value: String },
    PropertiesFocus(bool),
    LayerClick(ElementId),
    LayerDragStart(ElementId),
    LayerDrop(ElementId),
    LayerDragEnd,
    SetCanvasColor(Option<String>),
    SetTheme(Theme),
    SetNote(String),
    ToggleNote,
}

/// What startup found in storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadReport {
    /// No saved state.
    Empty,
    /// Saved state restored.
    Restored { elements: usize },
    /// Saved state could not be decoded; the editor started empty.
    Corrupt(String),
    /// Storage could not be read; the editor started empty.
    Unavailable(String),
}

/// The top-level controller.
pub struct Editor<S: Storage> {
    config: EditorConfig,
    state: EditorState,
    view: ViewTree,
    properties: PropertiesPanel,
    layers: LayersPanel,
    /// Active pointer gesture; present only between pointer-down and pointer-up.
    gesture: Option<Gesture>,
    theme: Theme,
    persistence: PersistenceAdapter<S>,
}

impl<S: Storage> Editor<S> {
    /// Create an empty editor without reading storage.
    pub fn new(storage: S, config: EditorConfig) -> Self {
        let persistence = PersistenceAdapter::new(storage, &config);
        Self {
            config,
            state: EditorState::default(),
            view: ViewTree::new(),
            properties: PropertiesPanel::new(),
            layers: LayersPanel::new(),
            gesture: None,
            theme: Theme::default(),
            persistence,
        }
    }

    /// Create an editor and rehydrate it from storage.
    pub fn open(storage: S, config: EditorConfig) -> (Self, LoadReport) {
        let mut editor = Self::new(storage, config);
        let report = editor.load();
        (editor, report)
    }

    /// Read saved state, theme and note, then rebuild the view and panels.
    pub fn load(&mut self) -> LoadReport {
        self.gesture = None;
        self.state = EditorState::default();

        let report = match self.persistence.load() {
            Ok(LoadOutcome::Empty) => LoadReport::Empty,
            Ok(LoadOutcome::Restored(snapshot)) => {
                self.state.elements = ElementStore::from_elements(snapshot.elements);
                self.state.canvas_color = snapshot.canvas_color;
                log::info!("Restored {} elements", self.state.elements.len());
                LoadReport::Restored {
                    elements: self.state.elements.len(),
                }
            }
            Ok(LoadOutcome::Corrupt(e)) => {
                log::warn!("{}; starting with an empty canvas", e);
                LoadReport::Corrupt(e.to_string())
            }
            Err(e) => {
                log::warn!("Failed to read saved state: {}", e);
                LoadReport::Unavailable(e.to_string())
            }
        };

        match self.persistence.load_theme() {
            Ok(Some(name)) => match name.parse::<Theme>() {
                Ok(theme) => self.theme = theme,
                Err(e) => log::warn!("Ignoring saved theme: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Failed to read theme: {}", e),
        }
        match self.persistence.load_note() {
            Ok(note) => self.layers.note.text = note.unwrap_or_default(),
            Err(e) => log::warn!("Failed to read layer note: {}", e),
        }

        self.view.set_theme(self.theme);
        self.view.set_canvas_background(self.state.canvas_color.clone());
        self.view.render(&self.state.elements, None);
        self.layers.rebuild(&self.state.elements, None);
        self.properties.show_canvas(self.state.canvas_color.as_deref());
        report
    }

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> EditResult<()> {
        match intent {
            Intent::AddElement(kind) => {
                self.create_element(kind);
            }
            Intent::SelectElement(id) | Intent::LayerClick(id) => self.select(&id)?,
            Intent::DeleteElement(id) => {
                self.delete_element(&id)?;
            }
            Intent::ClickCanvas => self.deselect(),
            Intent::Pointer(PointerEvent::Down { position, .. }) => {
                self.pointer_down(position);
            }
            Intent::Pointer(PointerEvent::Move { position, modifiers }) => {
                self.pointer_move(position, modifiers);
            }
            Intent::Pointer(PointerEvent::Up { .. }) => {
                self.pointer_up();
            }
            Intent::KeyDown(key) => {
                self.key_down(&key)?;
            }
            Intent::EditProperty { field, value } => self.edit_property(field, &value)?,
            Intent::PropertiesFocus(focused) => self.properties.set_focused(focused),
            Intent::LayerDragStart(id) => self.layer_drag_start(&id)?,
            Intent::LayerDrop(target) => {
                self.layer_drop(&target);
            }
            Intent::LayerDragEnd => self.layers.drag_end(),
            Intent::SetCanvasColor(color) => self.set_canvas_color(color)?,
            Intent::SetTheme(theme) => self.set_theme(theme),
            Intent::SetNote(text) => self.set_note(text),
            Intent::ToggleNote => {
                self.toggle_note();
            }
        }
        Ok(())
    }

    /// Add an element of `kind` on top, select it and persist.
    pub fn create_element(&mut self, kind: ElementKind) -> ElementId {
        let element = Element::new(kind);
        let id = element.id.clone();
        self.state.elements.push(element);
        if let Some(element) = self.state.elements.get(&id) {
            self.view.build(element);
            log::debug!("Created {} {} at z {}", kind, id, element.z_index);
        }
        self.select_existing(id.clone());
        self.persist();
        id
    }

    /// Remove an element, its node and, if selected, the selection.
    pub fn delete_element(&mut self, id: &ElementId) -> EditResult<Element> {
        let removed = self
            .state
            .elements
            .remove(id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
        self.view.remove(id);
        self.view.restack(&self.state.elements);
        if self.gesture.as_ref().is_some_and(|g| &g.element_id == id) {
            self.gesture = None;
        }
        if self.state.selected_id.as_ref() == Some(id) {
            self.state.selected_id = None;
            self.properties.show_canvas(self.state.canvas_color.as_deref());
        }
        self.layers.rebuild(&self.state.elements, self.state.selected_id.as_ref());
        log::debug!("Deleted {} {}", removed.kind, id);
        self.persist();
        Ok(removed)
    }

    /// Select an element and open its properties.
    pub fn select(&mut self, id: &ElementId) -> EditResult<()> {
        if !self.state.elements.contains(id) {
            return Err(EditError::ElementNotFound(id.clone()));
        }
        self.select_existing(id.clone());
        Ok(())
    }

    fn select_existing(&mut self, id: ElementId) {
        self.view.set_selected(Some(&id));
        self.layers.rebuild(&self.state.elements, Some(&id));
        if let Some(element) = self.state.elements.get(&id) {
            self.properties.set_focused(false);
            self.properties.show_element(element);
        }
        self.state.selected_id = Some(id);
    }

    /// Clear the selection and show the canvas background input.
    pub fn deselect(&mut self) {
        self.state.selected_id = None;
        self.view.set_selected(None);
        self.layers.rebuild(&self.state.elements, None);
        self.properties.set_focused(false);
        self.properties.show_canvas(self.state.canvas_color.as_deref());
    }

    /// Start a gesture on an element.
    ///
    /// Returns `Ok(false)` if another gesture is already active.
    pub fn begin_gesture(
        &mut self,
        id: &ElementId,
        kind: GestureKind,
        pointer: Point,
    ) -> EditResult<bool> {
        if self.gesture.is_some() {
            return Ok(false);
        }
        let node = self
            .view
            .node(id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
        log::debug!("Begin {:?} on {}", kind, id);
        self.gesture = Some(Gesture::begin(id.clone(), kind, pointer, node.frame, node.rotation));
        Ok(true)
    }

    /// Pointer pressed on the canvas.
    ///
    /// Handles of the selected element win over element bodies; a press on
    /// a body selects it and starts a drag; a press on empty canvas clears
    /// the selection.
    pub fn pointer_down(&mut self, position: Point) -> Option<GestureKind> {
        if self.gesture.is_some() {
            return None;
        }

        let handle_hit = self.state.selected_id.as_ref().and_then(|id| {
            let node = self.view.node(id)?;
            let handle = hit_test_handles(
                node.frame,
                node.rotation,
                self.config.rotate_handle_offset,
                position,
                self.config.handle_tolerance,
            )?;
            Some((id.clone(), handle))
        });
        if let Some((id, handle)) = handle_hit {
            let kind = match handle {
                HandleKind::Corner(corner) => GestureKind::Resize(corner),
                HandleKind::Rotate => GestureKind::Rotate,
            };
            return self.begin_gesture(&id, kind, position).ok()?.then_some(kind);
        }

        match self.view.topmost_at(position).map(|n| n.id.clone()) {
            Some(id) => {
                self.select_existing(id.clone());
                self.begin_gesture(&id, GestureKind::Drag, position)
                    .ok()?
                    .then_some(GestureKind::Drag)
            }
            None => {
                self.deselect();
                None
            }
        }
    }

    /// Pointer moved. Updates the active gesture's node only.
    pub fn pointer_move(&mut self, position: Point, modifiers: Modifiers) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let limits = GestureLimits {
            min_size: self.config.min_size,
            rotation_snap: self.config.rotation_snap_degrees,
        };
        let out = gesture.update(position, modifiers.shift, limits);
        match self.view.node_mut(&gesture.element_id) {
            Some(node) => {
                node.frame = out.frame;
                node.rotation = out.rotation;
                true
            }
            None => false,
        }
    }

    /// Pointer released: end the gesture, sync the record and persist.
    pub fn pointer_up(&mut self) -> Option<ElementId> {
        let gesture = self.gesture.take()?;
        let id = &gesture.element_id;
        if let Err(e) = sync_from_visual(&mut self.state.elements, &self.view, id) {
            log::warn!("Gesture ended on a missing element: {}", e);
            return None;
        }
        log::debug!("End {:?} on {}", gesture.kind, gesture.element_id);
        self.refresh_properties();
        self.persist();
        Some(gesture.element_id)
    }

    /// Handle a key press. Returns whether the key did anything.
    pub fn key_down(&mut self, key: &Key) -> EditResult<bool> {
        let Some(id) = self.state.selected_id.clone() else {
            return Ok(false);
        };
        let Some(action) = action_for(key, self.config.nudge_step) else {
            return Ok(false);
        };
        match action {
            KeyAction::Delete => {
                self.delete_element(&id)?;
            }
            KeyAction::Deselect => self.deselect(),
            KeyAction::Nudge(delta) => {
                let node = self
                    .view
                    .node_mut(&id)
                    .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
                let origin = node.frame.origin() + delta;
                node.set_origin(origin);
                sync_from_visual(&mut self.state.elements, &self.view, &id)?;
                self.refresh_properties();
                self.persist();
            }
        }
        Ok(true)
    }

    /// Apply an input event from the properties panel.
    ///
    /// With no selection only the canvas color can be edited.
    pub fn edit_property(&mut self, field: PropertyField, raw: &str) -> EditResult<()> {
        let edit = parse_input(field, raw)?;
        // Clamped or normalized values are shown as stored
        let shown = match self.state.selected_id.clone() {
            Some(id) => {
                let element = self
                    .state
                    .elements
                    .get_mut(&id)
                    .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
                apply_edit(element, edit, self.config.min_size)?;
                let shown = field.read(element);
                apply_to_visual(&self.state.elements, &mut self.view, &id)?;
                shown
            }
            None => match edit {
                PropertyEdit::Color(color) => {
                    self.state.canvas_color = Some(color.clone());
                    self.view.set_canvas_background(self.state.canvas_color.clone());
                    color
                }
                _ => return Err(EditError::NoSelection(field.name())),
            },
        };
        self.properties.set_value(field, &shown);
        self.persist();
        Ok(())
    }

    /// Mark whether an input inside the properties panel holds focus.
    pub fn set_properties_focus(&mut self, focused: bool) {
        self.properties.set_focused(focused);
    }

    /// Set or clear the canvas background.
    pub fn set_canvas_color(&mut self, color: Option<String>) -> EditResult<()> {
        if let Some(c) = &color {
            if !is_valid_color(c) {
                return Err(EditError::InvalidColor(c.clone()));
            }
        }
        self.state.canvas_color = color;
        self.view.set_canvas_background(self.state.canvas_color.clone());
        if self.state.selected_id.is_none() {
            self.refresh_properties();
        }
        self.persist();
        Ok(())
    }

    pub fn layer_drag_start(&mut self, id: &ElementId) -> EditResult<()> {
        if !self.state.elements.contains(id) {
            return Err(EditError::ElementNotFound(id.clone()));
        }
        self.layers.drag_start(id.clone());
        Ok(())
    }

    pub fn layer_drag_end(&mut self) {
        self.layers.drag_end();
    }

    /// Drop the dragged layer row onto `target`, swapping the two elements.
    ///
    /// Returns whether anything moved.
    pub fn layer_drop(&mut self, target: &ElementId) -> bool {
        let Some((dragged, target)) = self.layers.drop_on(target) else {
            return false;
        };
        if !self.state.elements.swap(&dragged, &target) {
            return false;
        }
        self.view.restack(&self.state.elements);
        self.layers.rebuild(&self.state.elements, self.state.selected_id.as_ref());
        log::debug!("Swapped layers {} and {}", dragged, target);
        self.persist();
        true
    }

    /// Swap two layers as one drag-and-drop.
    pub fn swap_layers(&mut self, dragged: &ElementId, target: &ElementId) -> EditResult<bool> {
        self.layer_drag_start(dragged)?;
        let moved = self.layer_drop(target);
        self.layers.drag_end();
        Ok(moved)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.view.set_theme(theme);
        if let Err(e) = self.persistence.save_theme(theme) {
            log::warn!("Failed to save theme: {}", e);
        }
    }

    pub fn set_note(&mut self, text: String) {
        if let Err(e) = self.persistence.save_note(&text) {
            log::warn!("Failed to save layer note: {}", e);
        }
        self.layers.note.text = text;
    }

    /// Show or hide the layer note. Returns the new visibility.
    pub fn toggle_note(&mut self) -> bool {
        self.layers.note.toggle()
    }

    /// Remove everything after `confirm` agrees. Returns whether it cleared.
    pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.gesture = None;
        self.state = EditorState::default();
        self.view.clear();
        self.view.set_canvas_background(None);
        self.layers.rebuild(&self.state.elements, None);
        self.properties.set_focused(false);
        self.properties.show_canvas(None);
        if let Err(e) = self.persistence.clear() {
            log::warn!("Failed to remove saved state: {}", e);
        }
        log::info!("Cleared canvas");
        true
    }

    /// The persisted state text as a `design.json` download.
    pub fn export_json(&self) -> Result<Download, ExportError> {
        let download = export::export_json(self.persistence.load_raw()?)?;
        log::info!("Exported {} bytes of JSON", download.contents.len());
        Ok(download)
    }

    /// The current elements as a `design.html` download.
    pub fn export_html(&self) -> Result<Download, ExportError> {
        let canvas = Size::new(self.config.export_width, self.config.export_height);
        let download = export::export_html(
            self.state.elements.as_slice(),
            self.state.canvas_color.as_deref(),
            canvas,
        )?;
        log::info!("Exported {} elements as HTML", self.state.elements.len());
        Ok(download)
    }

    fn refresh_properties(&mut self) {
        let selected = self
            .state
            .selected_id
            .as_ref()
            .and_then(|id| self.state.elements.get(id));
        self.properties.refresh(selected, self.state.canvas_color.as_deref());
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(
            self.state.elements.as_slice(),
            self.state.canvas_color.as_deref(),
        ) {
            log::warn!("Failed to save state: {}", e);
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn elements(&self) -> &ElementStore {
        &self.state.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.state.elements.get(id)
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<&Element> {
        self.state
            .selected_id
            .as_ref()
            .and_then(|id| self.state.elements.get(id))
    }

    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn properties(&self) -> &PropertiesPanel {
        &self.properties
    }

    pub fn layers(&self) -> &LayersPanel {
        &self.layers
    }

    pub fn note(&self) -> &LayerNote {
        &self.layers.note
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }
}
