//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`InputEvent`], [`KeyEvent`], [`MouseEvent`] and supporting types.
//! Crossterm events are converted via `From` impls so the rest of the
//! toolkit never depends on crossterm directly.

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key event with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A mouse event with action, position, and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::BackTab => Key::BackTab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            // Map unsupported key codes to Escape as a fallback.
            _ => Key::Escape,
        };
        let modifiers = convert_modifiers(ct.modifiers);
        KeyEvent { code, modifiers }
    }
}

/// Convert a crossterm mouse button to our `MouseBtn`.
fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        match ct {
            crossterm::event::Event::Key(ke) => InputEvent::Key(KeyEvent::from(ke)),
            crossterm::event::Event::Mouse(me) => {
                let modifiers = convert_modifiers(me.modifiers);
                let kind = match me.kind {
                    crossterm::event::MouseEventKind::Down(b) => {
                        MouseAction::Down(convert_mouse_button(b))
                    }
                    crossterm::event::MouseEventKind::Up(b) => {
                        MouseAction::Up(convert_mouse_button(b))
                    }
                    crossterm::event::MouseEventKind::Drag(b) => {
                        MouseAction::Drag(convert_mouse_button(b))
                    }
                    crossterm::event::MouseEventKind::Moved => MouseAction::Moved,
                    crossterm::event::MouseEventKind::ScrollUp => MouseAction::ScrollUp,
                    // Map any other scroll variants to ScrollDown.
                    _ => MouseAction::ScrollDown,
                };
                InputEvent::Mouse(MouseEvent {
                    kind,
                    x: me.column,
                    y: me.row,
                    modifiers,
                })
            }
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize {
                width: w,
                height: h,
            },
            crossterm::event::Event::FocusGained => InputEvent::FocusGained,
            crossterm::event::Event::FocusLost => InputEvent::FocusLost,
            crossterm::event::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------------

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn modifiers_single_flag() {
        assert!(Modifiers::CTRL.contains(Modifiers::CTRL));
        assert!(!Modifiers::CTRL.contains(Modifiers::SHIFT));
        assert!(!Modifiers::CTRL.is_empty());
    }

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
    }

    #[test]
    fn modifiers_bitand() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert_eq!(mods & Modifiers::CTRL, Modifiers::CTRL);
        assert_eq!(mods & Modifiers::ALT, Modifiers::NONE);
    }

    // -----------------------------------------------------------------------
    // KeyEvent
    // -----------------------------------------------------------------------

    #[test]
    fn key_event_plain() {
        let e = KeyEvent::plain(Key::Enter);
        assert_eq!(e.code, Key::Enter);
        assert!(e.modifiers.is_empty());
    }

    // -----------------------------------------------------------------------
    // crossterm conversions
    // -----------------------------------------------------------------------

    #[test]
    fn convert_char_key() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('x'),
            crossterm::event::KeyModifiers::NONE,
        );
        let e = KeyEvent::from(ct);
        assert_eq!(e.code, Key::Char('x'));
        assert!(e.modifiers.is_empty());
    }

    #[test]
    fn convert_ctrl_modifier() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        let e = KeyEvent::from(ct);
        assert_eq!(e.code, Key::Char('c'));
        assert!(e.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn convert_navigation_keys() {
        for (ct_code, key) in [
            (crossterm::event::KeyCode::Enter, Key::Enter),
            (crossterm::event::KeyCode::Tab, Key::Tab),
            (crossterm::event::KeyCode::BackTab, Key::BackTab),
            (crossterm::event::KeyCode::Backspace, Key::Backspace),
            (crossterm::event::KeyCode::Home, Key::Home),
            (crossterm::event::KeyCode::End, Key::End),
            (crossterm::event::KeyCode::Up, Key::Up),
            (crossterm::event::KeyCode::Down, Key::Down),
        ] {
            let ct = crossterm::event::KeyEvent::new(
                ct_code,
                crossterm::event::KeyModifiers::NONE,
            );
            assert_eq!(KeyEvent::from(ct).code, key);
        }
    }

    #[test]
    fn convert_unknown_key_falls_back_to_escape() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::F(5),
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from(ct).code, Key::Escape);
    }

    #[test]
    fn convert_resize_event() {
        let e = InputEvent::from(crossterm::event::Event::Resize(100, 30));
        assert_eq!(
            e,
            InputEvent::Resize {
                width: 100,
                height: 30
            }
        );
    }

    #[test]
    fn convert_paste_event() {
        let e = InputEvent::from(crossterm::event::Event::Paste("hello".into()));
        assert_eq!(e, InputEvent::Paste("hello".into()));
    }

    #[test]
    fn convert_mouse_down() {
        let ct = crossterm::event::Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(
                crossterm::event::MouseButton::Left,
            ),
            column: 4,
            row: 7,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        let e = InputEvent::from(ct);
        assert_eq!(
            e,
            InputEvent::Mouse(MouseEvent {
                kind: MouseAction::Down(MouseBtn::Left),
                x: 4,
                y: 7,
                modifiers: Modifiers::NONE,
            })
        );
    }
}
