//! Side panels: properties form and layers list.

pub mod layers;
pub mod properties;

pub use layers::{LayerNote, LayerRow, LayersPanel};
pub use properties::{
    InputKind, PanelContent, PropertiesPanel, PropertyEdit, PropertyField, PropertyRow,
    DEFAULT_CANVAS_COLOR,
};
