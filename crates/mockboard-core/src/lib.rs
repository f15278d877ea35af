//! Mockboard Core Library
//!
//! Headless engine for the Mockboard design editor: the element model,
//! the bound view, gestures, side panels, keyboard handling, persistence
//! and export.

pub mod color;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod export;
pub mod gesture;
pub mod handles;
pub mod input;
pub mod keyboard;
pub mod panels;
pub mod persist;
pub mod storage;
pub mod store;
pub mod theme;
pub mod view;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorState, Intent, LoadReport};
pub use element::{Element, ElementId, ElementKind};
pub use error::{EditError, EditResult};
pub use export::{Download, ExportError};
pub use gesture::{Gesture, GestureKind};
pub use handles::{Corner, HandleKind};
pub use input::{Key, Modifiers, PointerEvent};
pub use panels::{LayersPanel, PropertiesPanel, PropertyField};
pub use persist::{LoadOutcome, PersistenceAdapter};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use store::ElementStore;
pub use theme::Theme;
pub use view::{ViewTree, VisualNode};
