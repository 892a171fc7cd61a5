//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode and
//! provides methods to simulate user input (key presses, typing, pasting,
//! mouse clicks, resize), process messages, and read the rendered screen as
//! plain text.

use crate::app::{App, AppConfig};
use crate::event::input::{
    InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
};
use crate::form::field::FieldRegistry;
use crate::form::store::FormStore;

use super::snapshot::surface_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use formline::testing::Pilot;
/// use formline::event::Key;
///
/// let mut pilot = Pilot::new(80, 24);
/// pilot.tab();
/// pilot.type_text("Jane");
/// assert_eq!(pilot.store().state().value("firstName"), Some("Jane"));
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Create a headless app around the standard user form.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_registry(FieldRegistry::user_form(), width, height)
    }

    /// Create a headless app around a custom registry.
    pub fn with_registry(registry: FieldRegistry, width: u16, height: u16) -> Self {
        Self {
            app: App::new_headless(registry, width, height),
        }
    }

    /// Create a headless app around the standard user form with a config.
    pub fn with_config(config: AppConfig, width: u16, height: u16) -> Self {
        Self {
            app: App::new_headless_with(FieldRegistry::user_form(), config, width, height),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::plain(key)));
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Simulate typing each character of `text` as individual key presses.
    ///
    /// Messages are processed after each character, the way the live event
    /// loop drains the queue between input events.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
            self.process();
        }
    }

    /// Simulate a bracketed paste into the focused widget.
    pub fn paste(&mut self, text: &str) {
        self.app.handle_input(InputEvent::Paste(text.to_owned()));
    }

    /// Press Tab (focus next) and process.
    pub fn tab(&mut self) {
        self.press_key(Key::Tab);
        self.process();
    }

    /// Press Shift+Tab (focus previous) and process.
    pub fn back_tab(&mut self) {
        self.press_key(Key::BackTab);
        self.process();
    }

    /// Simulate a left-button mouse click at (x, y).
    pub fn click(&mut self, x: u16, y: u16) {
        self.app.handle_input(InputEvent::Mouse(MouseEvent {
            kind: MouseAction::Down(MouseBtn::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }));
    }

    /// Simulate a terminal resize to the given dimensions.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Process all pending messages in the app's dispatcher.
    pub fn process(&mut self) {
        self.app.handle_messages();
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Render the current frame and return it as plain text.
    pub fn screen_text(&mut self) -> String {
        surface_to_string(self.app.screen.render())
    }

    /// The app's form store.
    pub fn store(&self) -> &FormStore {
        self.app.screen.store()
    }

    /// Whether the app is still running.
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    /// Whether a valid form was submitted.
    pub fn is_submitted(&self) -> bool {
        self.app.is_submitted()
    }

    /// Borrow the underlying app immutably.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Borrow the underlying app mutably.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

// ===========================================================================
// Tests
// ===========================================================================
