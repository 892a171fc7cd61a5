//! Widget trait: render, focus, input handling.
//!
//! The `Widget` trait is the core abstraction for all UI elements in
//! formline. Every widget knows its type name, how tall it wants to be, and
//! how to render itself into strips within a given region. Interactive
//! widgets additionally handle key and paste input, answering with messages
//! for the application loop.

use std::any::Any;

use crate::event::input::KeyEvent;
use crate::event::message::Message;
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::render::theme::Theme;

// ---------------------------------------------------------------------------
// RenderCtx
// ---------------------------------------------------------------------------

/// Per-widget context handed to `render`.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx<'a> {
    /// The active theme.
    pub theme: &'a Theme,
    /// Whether this widget currently holds focus.
    pub focused: bool,
}

impl<'a> RenderCtx<'a> {
    /// Create a context for an unfocused widget.
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            focused: false,
        }
    }

    /// Set the focused flag (builder pattern).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets in formline.
///
/// Widget is object-safe: the screen stores `Box<dyn Widget>` in its arena
/// and routes input to whichever widget holds focus.
pub trait Widget {
    /// The type name for this widget (e.g. "Button", "Field").
    fn widget_type(&self) -> &str;

    /// How many rows this widget wants in a vertical stack layout.
    fn desired_height(&self) -> i32 {
        1
    }

    /// Render this widget's content into strips within the given region.
    fn render(&self, region: Region, ctx: &RenderCtx<'_>) -> Vec<Strip>;

    /// Whether this widget can receive keyboard focus.
    ///
    /// Defaults to `false`. Override for interactive widgets.
    fn can_focus(&self) -> bool {
        false
    }

    /// Handle a key event while focused.
    ///
    /// Returns messages for the application loop. The default ignores input.
    fn on_key(&mut self, _event: KeyEvent) -> Vec<Box<dyn Message>> {
        Vec::new()
    }

    /// Handle pasted text while focused.
    ///
    /// Returns messages for the application loop. The default ignores input.
    fn on_paste(&mut self, _text: &str) -> Vec<Box<dyn Message>> {
        Vec::new()
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
