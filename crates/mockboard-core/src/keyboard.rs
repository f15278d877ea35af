//! Keyboard bindings for the selected element.

use crate::input::Key;
use kurbo::Vec2;

/// What a key press does to the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Remove the selected element.
    Delete,
    /// Move the selected element by an offset.
    Nudge(Vec2),
    /// Clear the selection.
    Deselect,
}

/// Resolve a key into an action, given the nudge step in pixels.
pub fn action_for(key: &Key, step: f64) -> Option<KeyAction> {
    match key {
        Key::Delete => Some(KeyAction::Delete),
        Key::Escape => Some(KeyAction::Deselect),
        Key::ArrowLeft => Some(KeyAction::Nudge(Vec2::new(-step, 0.0))),
        Key::ArrowRight => Some(KeyAction::Nudge(Vec2::new(step, 0.0))),
        Key::ArrowUp => Some(KeyAction::Nudge(Vec2::new(0.0, -step))),
        Key::ArrowDown => Some(KeyAction::Nudge(Vec2::new(0.0, step))),
        Key::Other(_) => None,
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Delete", "Delete selected element"),
            Shortcut::new("ArrowLeft", "Nudge selected element left"),
            Shortcut::new("ArrowRight", "Nudge selected element right"),
            Shortcut::new("ArrowUp", "Nudge selected element up"),
            Shortcut::new("ArrowDown", "Nudge selected element down"),
            Shortcut::new("Escape", "Clear selection"),
            Shortcut::new("Shift+Rotate", "Snap rotation to 15° steps"),
        ]
    }

    /// Render the shortcut list as aligned text lines.
    pub fn describe() -> String {
        Self::all()
            .iter()
            .map(|s| format!("  {:14} {}", s.key, s.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_nudges() {
        assert_eq!(
            action_for(&Key::ArrowLeft, 5.0),
            Some(KeyAction::Nudge(Vec2::new(-5.0, 0.0)))
        );
        assert_eq!(
            action_for(&Key::ArrowDown, 5.0),
            Some(KeyAction::Nudge(Vec2::new(0.0, 5.0)))
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(action_for(&Key::Other("a".to_string()), 5.0), None);
        assert_eq!(action_for(&Key::Delete, 5.0), Some(KeyAction::Delete));
    }

    #[test]
    fn test_registry_lists_every_binding() {
        let text = ShortcutRegistry::describe();
        for key in ["Delete", "ArrowLeft", "Escape"] {
            assert!(text.contains(key));
        }
    }
}
