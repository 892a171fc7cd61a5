//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`BindingAction`]s.
//! The `with_defaults()` constructor installs the standard form bindings
//! (Ctrl+C / Esc to quit, Tab / BackTab to move focus).

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};
use super::message::Message;

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
pub enum BindingAction {
    /// Quit the application.
    Quit,
    /// Move focus to the next focusable widget.
    FocusNext,
    /// Move focus to the previous focusable widget.
    FocusPrevious,
    /// A named custom action.
    Custom(String),
    /// Produce a message via a factory function.
    Message(fn() -> Box<dyn Message>),
}

impl std::fmt::Debug for BindingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::FocusNext => write!(f, "FocusNext"),
            Self::FocusPrevious => write!(f, "FocusPrevious"),
            Self::Custom(name) => write!(f, "Custom({name:?})"),
            Self::Message(_) => write!(f, "Message(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with standard default bindings.
    ///
    /// Defaults:
    /// - `Ctrl+C` -> Quit
    /// - `Esc` -> Quit
    /// - `Tab` -> FocusNext
    /// - `BackTab` (Shift+Tab) -> FocusPrevious
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        registry.bind(Key::Escape, Modifiers::NONE, BindingAction::Quit);
        registry.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusNext);
        registry.bind(Key::BackTab, Modifiers::NONE, BindingAction::FocusPrevious);
        registry
    }

    /// Register a key binding.
    ///
    /// If a binding already exists for this key+modifier combination, it is
    /// replaced.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding.
    ///
    /// Returns the removed action, if any.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a given key event.
    ///
    /// Returns `None` if no matching binding is found; unresolved keys fall
    /// through to the focused widget.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::message::Quit;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let reg = KeyBindingRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn with_defaults_has_four_bindings() {
        let reg = KeyBindingRegistry::with_defaults();
        assert_eq!(reg.len(), 4);
    }

    // ── Bind / unbind / resolve ──────────────────────────────────────

    #[test]
    fn bind_and_resolve() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Char('q'), Modifiers::NONE, BindingAction::Quit);
        let action = reg.resolve(&KeyEvent::plain(Key::Char('q')));
        assert!(matches!(action, Some(BindingAction::Quit)));
    }

    #[test]
    fn resolve_requires_matching_modifiers() {
        let reg = KeyBindingRegistry::with_defaults();
        assert!(reg
            .resolve(&KeyEvent::new(Key::Char('c'), Modifiers::CTRL))
            .is_some());
        assert!(reg.resolve(&KeyEvent::plain(Key::Char('c'))).is_none());
    }

    #[test]
    fn resolve_unbound_key() {
        let reg = KeyBindingRegistry::with_defaults();
        assert!(reg.resolve(&KeyEvent::plain(Key::Char('z'))).is_none());
    }

    #[test]
    fn bind_replaces_existing() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Enter, Modifiers::NONE, BindingAction::Quit);
        reg.bind(Key::Enter, Modifiers::NONE, BindingAction::FocusNext);
        assert_eq!(reg.len(), 1);
        assert!(matches!(
            reg.resolve(&KeyEvent::plain(Key::Enter)),
            Some(BindingAction::FocusNext)
        ));
    }

    #[test]
    fn unbind_removes() {
        let mut reg = KeyBindingRegistry::with_defaults();
        let removed = reg.unbind(Key::Tab, Modifiers::NONE);
        assert!(matches!(removed, Some(BindingAction::FocusNext)));
        assert!(reg.resolve(&KeyEvent::plain(Key::Tab)).is_none());
    }

    #[test]
    fn unbind_missing_returns_none() {
        let mut reg = KeyBindingRegistry::new();
        assert!(reg.unbind(Key::Tab, Modifiers::NONE).is_none());
    }

    // ── Custom / Message actions ─────────────────────────────────────

    #[test]
    fn custom_action_keeps_name() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(
            Key::Char('r'),
            Modifiers::CTRL,
            BindingAction::Custom("reset".into()),
        );
        match reg.resolve(&KeyEvent::new(Key::Char('r'), Modifiers::CTRL)) {
            Some(BindingAction::Custom(name)) => assert_eq!(name, "reset"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn message_action_produces_message() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(
            Key::Char('q'),
            Modifiers::ALT,
            BindingAction::Message(|| Box::new(Quit)),
        );
        match reg.resolve(&KeyEvent::new(Key::Char('q'), Modifiers::ALT)) {
            Some(BindingAction::Message(factory)) => {
                assert_eq!(factory().message_name(), "Quit");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn debug_formats() {
        assert_eq!(format!("{:?}", BindingAction::Quit), "Quit");
        assert_eq!(
            format!("{:?}", BindingAction::Custom("x".into())),
            "Custom(\"x\")"
        );
        assert_eq!(
            format!("{:?}", BindingAction::Message(|| Box::new(Quit))),
            "Message(<fn>)"
        );
    }
}
