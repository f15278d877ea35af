//! Encoding of editor state to and from its persisted text form.
//!
//! State is written as `{"elements": [...], "canvasColor": ...}`. Older
//! saves hold a bare element array; both shapes decode.

use crate::config::EditorConfig;
use crate::element::Element;
use crate::storage::{Storage, StorageError, StorageResult};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted state could not be decoded.
#[derive(Debug, Error)]
#[error("Corrupt saved state: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WrappedRef<'a> {
    elements: &'a [Element],
    canvas_color: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredState {
    Wrapped {
        elements: Vec<Element>,
        #[serde(default, rename = "canvasColor")]
        canvas_color: Option<String>,
    },
    Bare(Vec<Element>),
}

/// Which persisted shape a snapshot was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Wrapped,
    Bare,
}

/// Decoded editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub canvas_color: Option<String>,
    pub encoding: Encoding,
}

/// Encode state in the wrapped shape.
pub fn encode(
    elements: &[Element],
    canvas_color: Option<&str>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WrappedRef {
        elements,
        canvas_color,
    })
}

/// Encode state as a bare element array.
pub fn encode_bare(elements: &[Element]) -> Result<String, serde_json::Error> {
    serde_json::to_string(elements)
}

/// Decode either persisted shape.
pub fn decode(text: &str) -> Result<Snapshot, DecodeError> {
    // Parse to a value first so syntax errors surface from serde_json directly
    let value: serde_json::Value = serde_json::from_str(text)?;
    let snapshot = match serde_json::from_value(value)? {
        StoredState::Wrapped {
            elements,
            canvas_color,
        } => Snapshot {
            elements,
            canvas_color,
            encoding: Encoding::Wrapped,
        },
        StoredState::Bare(elements) => Snapshot {
            elements,
            canvas_color: None,
            encoding: Encoding::Bare,
        },
    };
    Ok(snapshot)
}

/// Result of reading the state key at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing saved yet.
    Empty,
    /// Saved state decoded.
    Restored(Snapshot),
    /// Saved state exists but cannot be decoded.
    Corrupt(DecodeError),
}

/// Reads and writes the editor's keys in a [`Storage`].
pub struct PersistenceAdapter<S: Storage> {
    storage: S,
    state_key: String,
    theme_key: String,
    note_key: String,
}

impl<S: Storage> PersistenceAdapter<S> {
    pub fn new(storage: S, config: &EditorConfig) -> Self {
        Self {
            storage,
            state_key: config.state_key.clone(),
            theme_key: config.theme_key.clone(),
            note_key: config.note_key.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Encode and write the state. Returns the written text.
    pub fn save(&self, elements: &[Element], canvas_color: Option<&str>) -> StorageResult<String> {
        let text = encode(elements, canvas_color)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(&self.state_key, &text)?;
        log::debug!("Saved {} elements under {}", elements.len(), self.state_key);
        Ok(text)
    }

    /// Read and decode the state.
    pub fn load(&self) -> StorageResult<LoadOutcome> {
        let Some(text) = self.storage.load_optional(&self.state_key)? else {
            return Ok(LoadOutcome::Empty);
        };
        Ok(match decode(&text) {
            Ok(snapshot) => LoadOutcome::Restored(snapshot),
            Err(e) => LoadOutcome::Corrupt(e),
        })
    }

    /// The persisted state text exactly as stored.
    pub fn load_raw(&self) -> StorageResult<Option<String>> {
        self.storage.load_optional(&self.state_key)
    }

    /// Remove the persisted state.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.delete(&self.state_key)
    }

    pub fn save_theme(&self, theme: Theme) -> StorageResult<()> {
        self.storage.save(&self.theme_key, theme.name())
    }

    /// The stored theme name, if any.
    pub fn load_theme(&self) -> StorageResult<Option<String>> {
        self.storage.load_optional(&self.theme_key)
    }

    pub fn save_note(&self, note: &str) -> StorageResult<()> {
        self.storage.save(&self.note_key, note)
    }

    pub fn load_note(&self) -> StorageResult<Option<String>> {
        self.storage.load_optional(&self.note_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::storage::MemoryStorage;

    fn sample() -> Vec<Element> {
        let mut rect = Element::new(ElementKind::Rectangle);
        rect.z_index = 1;
        rect.rotation = 30.0;
        let mut text = Element::new(ElementKind::Text);
        text.z_index = 2;
        text.text = "Hello \"quoted\" <b>".to_string();
        vec![rect, text]
    }

    #[test]
    fn test_wrapped_round_trip() {
        let elements = sample();
        let text = encode(&elements, Some("#eeeeee")).unwrap();
        let snapshot = decode(&text).unwrap();
        assert_eq!(snapshot.encoding, Encoding::Wrapped);
        assert_eq!(snapshot.elements, elements);
        assert_eq!(snapshot.canvas_color.as_deref(), Some("#eeeeee"));
    }

    #[test]
    fn test_bare_round_trip() {
        let elements = sample();
        let text = encode_bare(&elements).unwrap();
        let snapshot = decode(&text).unwrap();
        assert_eq!(snapshot.encoding, Encoding::Bare);
        assert_eq!(snapshot.elements, elements);
        assert_eq!(snapshot.canvas_color, None);
    }

    #[test]
    fn test_null_canvas_color() {
        let text = encode(&sample(), None).unwrap();
        assert!(text.contains(r#""canvasColor":null"#));
        assert_eq!(decode(&text).unwrap().canvas_color, None);
    }

    #[test]
    fn test_decodes_browser_written_state() {
        let text = r##"[{"id":"7f0c","type":"text","x":100,"y":100,"width":250,"height":120,"color":"#333333","text":"Text","zIndex":1}]"##;
        let snapshot = decode(text).unwrap();
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.elements[0].kind, ElementKind::Text);
        assert!((snapshot.elements[0].width - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corrupt_text() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"{"elements": 5}"#).is_err());
        assert!(decode("null").is_err());
    }

    #[test]
    fn test_adapter_outcomes() {
        let config = EditorConfig::default();
        let adapter = PersistenceAdapter::new(MemoryStorage::new(), &config);
        assert!(matches!(adapter.load().unwrap(), LoadOutcome::Empty));

        let written = adapter.save(&sample(), None).unwrap();
        assert_eq!(adapter.load_raw().unwrap(), Some(written));
        assert!(matches!(adapter.load().unwrap(), LoadOutcome::Restored(_)));

        adapter.storage().save("figma-state", "garbage").unwrap();
        assert!(matches!(adapter.load().unwrap(), LoadOutcome::Corrupt(_)));

        adapter.clear().unwrap();
        assert!(matches!(adapter.load().unwrap(), LoadOutcome::Empty));
    }

    #[test]
    fn test_theme_and_note_keys() {
        let config = EditorConfig::default();
        let adapter = PersistenceAdapter::new(MemoryStorage::new(), &config);
        adapter.save_theme(Theme::Dark).unwrap();
        adapter.save_note("remember the header").unwrap();
        assert_eq!(adapter.storage().load("editor-theme").unwrap(), "dark");
        assert_eq!(adapter.load_note().unwrap().as_deref(), Some("remember the header"));
    }
}
