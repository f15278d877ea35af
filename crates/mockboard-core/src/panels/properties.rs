//! Properties form for the selected element or the canvas background.

use crate::color::is_valid_color;
use crate::element::{Element, ElementId};
use crate::error::{EditError, EditResult};
use crate::gesture::normalize_degrees;
use std::fmt;
use std::str::FromStr;

/// Background shown in the form when no canvas color has been set.
pub const DEFAULT_CANVAS_COLOR: &str = "#ffffff";

/// An editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    Width,
    Height,
    X,
    Y,
    Color,
    Rotation,
    Text,
}

/// HTML input type backing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Number,
    Color,
    Text,
}

impl PropertyField {
    pub fn name(self) -> &'static str {
        match self {
            PropertyField::Width => "width",
            PropertyField::Height => "height",
            PropertyField::X => "x",
            PropertyField::Y => "y",
            PropertyField::Color => "color",
            PropertyField::Rotation => "rotation",
            PropertyField::Text => "text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyField::Width => "Width",
            PropertyField::Height => "Height",
            PropertyField::X => "X",
            PropertyField::Y => "Y",
            PropertyField::Color => "Color",
            PropertyField::Rotation => "Rotation",
            PropertyField::Text => "Text",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            PropertyField::Color => InputKind::Color,
            PropertyField::Text => InputKind::Text,
            _ => InputKind::Number,
        }
    }

    /// Fields shown for an element, in form order.
    pub fn for_element(element: &Element) -> Vec<PropertyField> {
        let mut fields = vec![
            PropertyField::Width,
            PropertyField::Height,
            PropertyField::X,
            PropertyField::Y,
            PropertyField::Color,
            PropertyField::Rotation,
        ];
        if element.kind.is_text_bearing() {
            fields.push(PropertyField::Text);
        }
        fields
    }

    /// Current value of this field on an element, as the input displays it.
    pub fn read(self, element: &Element) -> String {
        match self {
            PropertyField::Width => element.width.to_string(),
            PropertyField::Height => element.height.to_string(),
            PropertyField::X => element.x.to_string(),
            PropertyField::Y => element.y.to_string(),
            PropertyField::Color => element.color.clone(),
            PropertyField::Rotation => element.rotation.to_string(),
            PropertyField::Text => element.text.clone(),
        }
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "width" | "w" => Ok(PropertyField::Width),
            "height" | "h" => Ok(PropertyField::Height),
            "x" | "left" => Ok(PropertyField::X),
            "y" | "top" => Ok(PropertyField::Y),
            "color" | "background" => Ok(PropertyField::Color),
            "rotation" | "angle" => Ok(PropertyField::Rotation),
            "text" => Ok(PropertyField::Text),
            _ => Err(EditError::UnknownField(s.to_string())),
        }
    }
}

/// A parsed input value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Number(PropertyField, f64),
    Color(String),
    Text(String),
}

/// Parse the raw value of an input event.
///
/// Numbers must be finite; colors keep their raw string once validated.
pub fn parse_input(field: PropertyField, raw: &str) -> EditResult<PropertyEdit> {
    match field.input_kind() {
        InputKind::Number => {
            let value: f64 = raw.trim().parse().map_err(|_| EditError::InvalidNumber {
                field: field.name(),
                value: raw.to_string(),
            })?;
            if !value.is_finite() {
                return Err(EditError::InvalidNumber {
                    field: field.name(),
                    value: raw.to_string(),
                });
            }
            Ok(PropertyEdit::Number(field, value))
        }
        InputKind::Color => {
            if is_valid_color(raw) {
                Ok(PropertyEdit::Color(raw.to_string()))
            } else {
                Err(EditError::InvalidColor(raw.to_string()))
            }
        }
        InputKind::Text => Ok(PropertyEdit::Text(raw.to_string())),
    }
}

/// Write a parsed edit into an element.
///
/// Sizes are clamped to `min_size`; rotation is normalized into `[0, 360)`.
pub fn apply_edit(element: &mut Element, edit: PropertyEdit, min_size: f64) -> EditResult<()> {
    match edit {
        PropertyEdit::Number(field, value) => match field {
            PropertyField::Width => element.width = value.max(min_size),
            PropertyField::Height => element.height = value.max(min_size),
            PropertyField::X => element.x = value,
            PropertyField::Y => element.y = value,
            PropertyField::Rotation => element.rotation = normalize_degrees(value),
            PropertyField::Color | PropertyField::Text => {
                return Err(EditError::UnknownField(field.name().to_string()));
            }
        },
        PropertyEdit::Color(color) => element.color = color,
        PropertyEdit::Text(text) => {
            if !element.kind.is_text_bearing() {
                return Err(EditError::NotTextBearing(element.id.clone()));
            }
            element.text = text;
        }
    }
    Ok(())
}

/// One rendered form row.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub field: PropertyField,
    pub value: String,
}

/// What the panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Only the canvas background input.
    Canvas { color: String },
    /// The form for one element.
    Element { id: ElementId, rows: Vec<PropertyRow> },
}

/// The properties panel.
#[derive(Debug, Clone)]
pub struct PropertiesPanel {
    content: PanelContent,
    /// An input inside the panel holds focus.
    focused: bool,
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertiesPanel {
    pub fn new() -> Self {
        Self {
            content: PanelContent::Canvas {
                color: DEFAULT_CANVAS_COLOR.to_string(),
            },
            focused: false,
        }
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// The element the form is bound to, if any.
    pub fn element_id(&self) -> Option<&ElementId> {
        match &self.content {
            PanelContent::Element { id, .. } => Some(id),
            PanelContent::Canvas { .. } => None,
        }
    }

    /// Displayed value of a field, if that row exists.
    pub fn value(&self, field: PropertyField) -> Option<&str> {
        match &self.content {
            PanelContent::Element { rows, .. } => rows
                .iter()
                .find(|r| r.field == field)
                .map(|r| r.value.as_str()),
            PanelContent::Canvas { color } => {
                (field == PropertyField::Color).then_some(color.as_str())
            }
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Render the form for an element.
    pub fn show_element(&mut self, element: &Element) {
        let rows = PropertyField::for_element(element)
            .into_iter()
            .map(|field| PropertyRow {
                field,
                value: field.read(element),
            })
            .collect();
        self.content = PanelContent::Element {
            id: element.id.clone(),
            rows,
        };
    }

    /// Render the canvas background input.
    pub fn show_canvas(&mut self, canvas_color: Option<&str>) {
        self.content = PanelContent::Canvas {
            color: canvas_color.unwrap_or(DEFAULT_CANVAS_COLOR).to_string(),
        };
    }

    /// Update the displayed value of one row.
    pub fn set_value(&mut self, field: PropertyField, value: &str) {
        match &mut self.content {
            PanelContent::Element { rows, .. } => {
                if let Some(row) = rows.iter_mut().find(|r| r.field == field) {
                    row.value = value.to_string();
                }
            }
            PanelContent::Canvas { color } => {
                if field == PropertyField::Color {
                    *color = value.to_string();
                }
            }
        }
    }

    /// Re-render for the current selection unless an input holds focus.
    ///
    /// Returns whether the panel was re-rendered.
    pub fn refresh(&mut self, selected: Option<&Element>, canvas_color: Option<&str>) -> bool {
        if self.focused {
            return false;
        }
        match selected {
            Some(element) => self.show_element(element),
            None => self.show_canvas(canvas_color),
        }
        true
    }
}
