//! Element records placed on the canvas.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Where new elements are placed.
pub const DEFAULT_ORIGIN: Point = Point::new(100.0, 100.0);

/// Stable element identifier.
///
/// New ids are UUID v4 strings, but any string read back from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of an element, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle,
    Text,
    PresetCard,
    PresetButton,
}

/// Geometry and style a freshly created element starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub text: &'static str,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Rectangle,
        ElementKind::Text,
        ElementKind::PresetCard,
        ElementKind::PresetButton,
    ];

    /// The serialized name, also used as the layer row label.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Text => "text",
            ElementKind::PresetCard => "preset-card",
            ElementKind::PresetButton => "preset-button",
        }
    }

    /// Whether the element displays its `text` field.
    pub fn is_text_bearing(self) -> bool {
        !matches!(self, ElementKind::Rectangle)
    }

    /// Default size, fill and content for this kind.
    pub fn defaults(self) -> KindDefaults {
        match self {
            ElementKind::Rectangle => KindDefaults {
                width: 300.0,
                height: 200.0,
                color: "#ff0000",
                text: "",
            },
            ElementKind::Text => KindDefaults {
                width: 250.0,
                height: 120.0,
                color: "#333333",
                text: "Text",
            },
            ElementKind::PresetCard => KindDefaults {
                width: 280.0,
                height: 180.0,
                color: "#ffffff",
                text: "Card",
            },
            ElementKind::PresetButton => KindDefaults {
                width: 160.0,
                height: 48.0,
                color: "#3b82f6",
                text: "Button",
            },
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(ElementKind::Rectangle),
            "text" => Ok(ElementKind::Text),
            "preset-card" | "card" => Ok(ElementKind::PresetCard),
            "preset-button" | "button" => Ok(ElementKind::PresetButton),
            other => Err(format!("unknown element kind: {other}")),
        }
    }
}

/// One element record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[serde(default)]
    pub text: String,
    /// Stacking order, 1-based. Owned by the store.
    #[serde(default)]
    pub z_index: u32,
    /// Clockwise rotation about the center, in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl Element {
    /// Create an element of the given kind with its default geometry.
    ///
    /// The z-index is left at 0 until the element is added to a store.
    pub fn new(kind: ElementKind) -> Self {
        let defaults = kind.defaults();
        Self {
            id: ElementId::new(),
            kind,
            x: DEFAULT_ORIGIN.x,
            y: DEFAULT_ORIGIN.y,
            width: defaults.width,
            height: defaults.height,
            color: defaults.color.to_string(),
            text: defaults.text.to_string(),
            z_index: 0,
            rotation: 0.0,
        }
    }

    /// The element's frame as a rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Overwrite position and size from a rect.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }
}
