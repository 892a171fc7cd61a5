//! Button widget: an interactive, focusable button.
//!
//! Renders a label centered within its region. A disabled button cannot be
//! focused and swallows activation keys.

use std::any::Any;

use crate::event::input::{Key, KeyEvent};
use crate::event::message::{Message, SubmitPressed};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::{RenderCtx, Widget};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button widget with a centered label.
///
/// Enter or space while focused activates the button, producing a
/// [`SubmitPressed`] message. Disabling blocks both focus and activation.
///
/// # Examples
///
/// ```ignore
/// let btn = Button::new("Submit").disabled(true);
/// ```
pub struct Button {
    label: String,
    disabled: bool,
}

impl Button {
    /// Create a new enabled button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }

    /// Set whether the button is disabled (builder pattern).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the button in place.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn desired_height(&self) -> i32 {
        3
    }

    fn can_focus(&self) -> bool {
        !self.disabled
    }

    fn on_key(&mut self, event: KeyEvent) -> Vec<Box<dyn Message>> {
        if self.disabled || !event.modifiers.is_empty() {
            return Vec::new();
        }
        match event.code {
            Key::Enter | Key::Char(' ') => vec![Box::new(SubmitPressed)],
            _ => Vec::new(),
        }
    }

    fn render(&self, region: Region, ctx: &RenderCtx<'_>) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let mut style = if self.disabled {
            ctx.theme.button_disabled.clone()
        } else {
            ctx.theme.button.clone()
        };
        if ctx.focused && !self.disabled {
            style.reverse = true;
        }

        let width = region.width as usize;
        // Middle row for 3+ height, first row for short buttons.
        let label_row = if region.height >= 3 { 1 } else { 0 };

        let label: String = self.label.chars().take(width).collect();
        let label_len = label.chars().count();

        (0..region.height)
            .map(|row| {
                let mut strip = Strip::new(region.y + row, region.x);
                if row == label_row {
                    let pad_left = (width.saturating_sub(label_len)) / 2;
                    for _ in 0..pad_left {
                        strip.push(' ', style.clone());
                    }
                    strip.push_str(&label, style.clone());
                }
                strip.fill(region.width, style.clone());
                strip
            })
            .collect()
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
