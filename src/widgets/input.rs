//! TextInput widget: a focusable single-line editor.
//!
//! Supports cursor movement, character insertion/deletion, and placeholder
//! text. The cursor position is tracked as a byte offset into the value
//! string; all cursor operations are char-boundary safe.

use std::any::Any;

use crate::event::input::{Key, KeyEvent, Modifiers};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::{RenderCtx, Widget};

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// A single-line text editor with cursor and placeholder.
///
/// # Examples
///
/// ```ignore
/// let input = TextInput::new()
///     .with_placeholder("Please enter a First Name")
///     .with_value("Jane");
/// ```
pub struct TextInput {
    value: String,
    placeholder: String,
    cursor: usize,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
        }
    }

    /// Set the placeholder text (builder pattern).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the initial value (builder pattern).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.len();
        self
    }

    /// Return the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Return the placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Set the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clear the value and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_boundary();
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    /// Delete the character after the cursor (delete forward).
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = self.next_char_boundary();
        self.value.drain(self.cursor..next);
    }

    /// Move the cursor left by one character.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary();
        }
    }

    /// Move the cursor right by one character.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_char_boundary();
        }
    }

    /// Move the cursor to the start of the input.
    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the input.
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Return the cursor position (byte offset).
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Apply a key event to the editor.
    ///
    /// Returns `true` when the value changed (not on plain cursor motion).
    /// Key events carrying Ctrl or Alt are ignored — those belong to key
    /// bindings, not text entry.
    pub fn apply_key(&mut self, event: KeyEvent) -> bool {
        if event.modifiers.contains(Modifiers::CTRL) || event.modifiers.contains(Modifiers::ALT)
        {
            return false;
        }
        match event.code {
            Key::Char(ch) => {
                self.insert_char(ch);
                true
            }
            Key::Backspace => {
                let had = self.cursor > 0;
                self.delete_char();
                had
            }
            Key::Delete => {
                let had = self.cursor < self.value.len();
                self.delete_forward();
                had
            }
            Key::Left => {
                self.move_cursor_left();
                false
            }
            Key::Right => {
                self.move_cursor_right();
                false
            }
            Key::Home => {
                self.move_cursor_home();
                false
            }
            Key::End => {
                self.move_cursor_end();
                false
            }
            _ => false,
        }
    }

    /// Insert pasted text at the cursor, skipping line breaks.
    ///
    /// Returns `true` when anything was inserted.
    pub fn apply_paste(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
            changed = true;
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Find the byte offset of the previous character boundary.
    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    /// Find the byte offset of the next character boundary.
    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextInput {
    fn widget_type(&self) -> &str {
        "TextInput"
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn on_key(&mut self, event: KeyEvent) -> Vec<Box<dyn crate::event::message::Message>> {
        self.apply_key(event);
        Vec::new()
    }

    fn render(&self, region: Region, ctx: &RenderCtx<'_>) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let width = region.width as usize;
        let is_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let (display, style) = if is_placeholder {
            (self.placeholder.as_str(), ctx.theme.placeholder.clone())
        } else {
            (self.value.as_str(), ctx.theme.value.clone())
        };

        let mut strip = Strip::new(region.y, region.x);
        let truncated: String = display.chars().take(width).collect();
        strip.push_str(&truncated, style);
        strip.fill(region.width, ctx.theme.value.clone());

        // The cursor cell renders in reverse video while focused.
        if ctx.focused && width > 0 {
            let col = self.value[..self.cursor].chars().count().min(width - 1);
            strip.restyle(col, |s| s.reverse = true);
        }

        vec![strip]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
