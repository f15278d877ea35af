//! Error types for editor operations.

use crate::element::ElementId;
use thiserror::Error;

/// Result type for editor operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors raised while mutating the editor state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
    #[error("Unknown property: {0}")]
    UnknownField(String),
    #[error("Element {0} has no text content")]
    NotTextBearing(ElementId),
    #[error("Property {0} requires a selected element")]
    NoSelection(&'static str),
}
