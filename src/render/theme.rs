//! Theme: named cell styles for the parts of a form.
//!
//! Widgets never hardcode colors; they pick the role they need from the
//! theme handed to them through the render context.

use super::strip::CellStyle;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// The set of styles a form screen renders with.
///
/// The default theme mirrors a conventional web form: bold labels, dim
/// placeholder text, red italic error lines, reverse-video focus highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// The form title line.
    pub title: CellStyle,
    /// Field labels above each editor.
    pub label: CellStyle,
    /// Entered text inside editors.
    pub value: CellStyle,
    /// Placeholder text shown while an editor is empty.
    pub placeholder: CellStyle,
    /// Inline validation error lines.
    pub error: CellStyle,
    /// The enabled submit button.
    pub button: CellStyle,
    /// The disabled submit button.
    pub button_disabled: CellStyle,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            title: CellStyle::new().bold().underline(),
            label: CellStyle::new().bold(),
            value: CellStyle::new(),
            placeholder: CellStyle::new().dim(),
            error: CellStyle::new().with_fg("red").italic(),
            button: CellStyle::new().bold().with_fg("green"),
            button_disabled: CellStyle::new().dim(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
