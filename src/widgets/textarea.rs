//! TextArea widget: a focusable multi-line editor.
//!
//! Shares the single-line editor's contract (char-boundary-safe cursor,
//! placeholder, apply_key) and adds line breaks via Enter plus vertical
//! cursor movement. Lines are separated by `'\n'` in the value.

use std::any::Any;

use crate::event::input::{Key, KeyEvent, Modifiers};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::{RenderCtx, Widget};

/// Default number of editor rows a text area occupies.
const DEFAULT_ROWS: i32 = 3;

// ---------------------------------------------------------------------------
// TextArea
// ---------------------------------------------------------------------------

/// A multi-line text editor with cursor and placeholder.
///
/// # Examples
///
/// ```ignore
/// let area = TextArea::new()
///     .with_placeholder("Please enter a Message")
///     .with_rows(5);
/// ```
pub struct TextArea {
    value: String,
    placeholder: String,
    cursor: usize,
    rows: i32,
}

impl TextArea {
    /// Create a new empty text area.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            rows: DEFAULT_ROWS,
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

    /// Set the number of editor rows (builder pattern).
    pub fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows.max(1);
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

    /// Number of editor rows.
    pub fn rows(&self) -> i32 {
        self.rows
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

    /// Return the cursor position (byte offset).
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// The cursor's (line, column), counted in lines and characters.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let col = before.rsplit('\n').next().unwrap_or("").chars().count();
        (line, col)
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a line break at the current cursor position.
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
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

    /// Move the cursor left by one character (crossing line breaks).
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary();
        }
    }

    /// Move the cursor right by one character (crossing line breaks).
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_char_boundary();
        }
    }

    /// Move the cursor up one line, keeping the column where possible.
    pub fn move_cursor_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        self.cursor = self.byte_at(line - 1, col);
    }

    /// Move the cursor down one line, keeping the column where possible.
    pub fn move_cursor_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line + 1 >= self.line_count() {
            return;
        }
        self.cursor = self.byte_at(line + 1, col);
    }

    /// Move the cursor to the start of the current line.
    pub fn move_cursor_line_home(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.byte_at(line, 0);
    }

    /// Move the cursor to the end of the current line.
    pub fn move_cursor_line_end(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.byte_at(line, usize::MAX);
    }

    /// Apply a key event to the editor.
    ///
    /// Returns `true` when the value changed (not on plain cursor motion).
    /// Key events carrying Ctrl or Alt are ignored.
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
            Key::Enter => {
                self.insert_newline();
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
            Key::Up => {
                self.move_cursor_up();
                false
            }
            Key::Down => {
                self.move_cursor_down();
                false
            }
            Key::Home => {
                self.move_cursor_line_home();
                false
            }
            Key::End => {
                self.move_cursor_line_end();
                false
            }
            _ => false,
        }
    }

    /// Insert pasted text at the cursor, keeping line breaks.
    ///
    /// Returns `true` when anything was inserted.
    pub fn apply_paste(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars().filter(|c| *c != '\r') {
            self.insert_char(ch);
            changed = true;
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn line_count(&self) -> usize {
        self.value.matches('\n').count() + 1
    }

    /// Byte offsets at which each line starts.
    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, ch) in self.value.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    /// Byte offset of (line, col), with col clamped to the line length.
    fn byte_at(&self, line: usize, col: usize) -> usize {
        let starts = self.line_starts();
        let start = starts[line];
        let end = starts
            .get(line + 1)
            .map(|s| s - 1)
            .unwrap_or(self.value.len());
        let line_str = &self.value[start..end];
        let within = line_str
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line_str.len());
        start + within
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextArea {
    fn widget_type(&self) -> &str {
        "TextArea"
    }

    fn desired_height(&self) -> i32 {
        self.rows
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
        let height = region.height as usize;
        let is_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let (text, style) = if is_placeholder {
            (self.placeholder.as_str(), ctx.theme.placeholder.clone())
        } else {
            (self.value.as_str(), ctx.theme.value.clone())
        };

        let mut strips: Vec<Strip> = text
            .split('\n')
            .take(height)
            .enumerate()
            .map(|(i, line)| {
                let mut strip = Strip::new(region.y + i as i32, region.x);
                let truncated: String = line.chars().take(width).collect();
                strip.push_str(&truncated, style.clone());
                strip.fill(region.width, ctx.theme.value.clone());
                strip
            })
            .collect();

        // Pad remaining rows so the editor's full height paints.
        for i in strips.len()..height {
            let mut strip = Strip::new(region.y + i as i32, region.x);
            strip.fill(region.width, ctx.theme.value.clone());
            strips.push(strip);
        }

        if ctx.focused && width > 0 {
            let (line, col) = self.cursor_line_col();
            if line < height {
                strips[line].restyle(col.min(width - 1), |s| s.reverse = true);
            }
        }

        strips
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
