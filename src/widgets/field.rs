//! Field widget: one labeled, validated form field.
//!
//! Composes a label row, an editor (single-line input or multi-line text
//! area, per the field definition's kind), and an inline error row. Every
//! edit that changes the editor's value is reported to the application loop
//! as a [`ValueEdited`] message carrying the field id and the full new
//! value; the screen applies it to the store and writes the resulting error
//! back via [`Field::set_error`].

use std::any::Any;

use crate::event::input::KeyEvent;
use crate::event::message::{Message, ValueEdited};
use crate::form::field::{FieldDefinition, InputKind};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::{RenderCtx, Widget};

use super::input::TextInput;
use super::textarea::TextArea;

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The editor variant behind a field.
///
/// Both variants share an identical editing contract; they differ only in
/// rendering and in which keys they consume.
pub enum Editor {
    Line(TextInput),
    Area(TextArea),
}

impl Editor {
    fn value(&self) -> &str {
        match self {
            Editor::Line(input) => input.value(),
            Editor::Area(area) => area.value(),
        }
    }

    fn set_value(&mut self, value: &str) {
        match self {
            Editor::Line(input) => input.set_value(value),
            Editor::Area(area) => area.set_value(value),
        }
    }

    fn apply_key(&mut self, event: KeyEvent) -> bool {
        match self {
            Editor::Line(input) => input.apply_key(event),
            Editor::Area(area) => area.apply_key(event),
        }
    }

    fn apply_paste(&mut self, text: &str) -> bool {
        match self {
            Editor::Line(input) => input.apply_paste(text),
            Editor::Area(area) => area.apply_paste(text),
        }
    }

    fn rows(&self) -> i32 {
        match self {
            Editor::Line(_) => 1,
            Editor::Area(area) => area.rows(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One form field: label, editor, and inline error.
///
/// # Examples
///
/// ```ignore
/// let registry = FieldRegistry::user_form();
/// let field = Field::from_definition(registry.get("email").unwrap());
/// ```
pub struct Field {
    id: String,
    label: String,
    editor: Editor,
    error: Option<String>,
}

impl Field {
    /// Build a field widget from a registry definition.
    pub fn from_definition(def: &FieldDefinition) -> Self {
        let editor = match def.kind() {
            InputKind::Text | InputKind::Email => {
                Editor::Line(TextInput::new().with_placeholder(def.placeholder()))
            }
            InputKind::TextArea => {
                Editor::Area(TextArea::new().with_placeholder(def.placeholder()))
            }
        };
        Self {
            id: def.id().to_owned(),
            label: def.label().to_owned(),
            editor,
            error: None,
        }
    }

    /// The field id this widget edits.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label rendered above the editor.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The editor's current value.
    pub fn value(&self) -> &str {
        self.editor.value()
    }

    /// Replace the editor's value without emitting a message.
    pub fn set_value(&mut self, value: &str) {
        self.editor.set_value(value);
    }

    /// The inline error currently shown, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set or clear the inline error.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Whether the editor is multi-line.
    pub fn is_multiline(&self) -> bool {
        matches!(self.editor, Editor::Area(_))
    }

    fn edit_message(&self) -> Box<dyn Message> {
        Box::new(ValueEdited::new(self.id.clone(), self.editor.value()))
    }
}

impl Widget for Field {
    fn widget_type(&self) -> &str {
        "Field"
    }

    fn desired_height(&self) -> i32 {
        // Label row + editor rows + error row.
        1 + self.editor.rows() + 1
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn on_key(&mut self, event: KeyEvent) -> Vec<Box<dyn Message>> {
        if self.editor.apply_key(event) {
            vec![self.edit_message()]
        } else {
            Vec::new()
        }
    }

    fn on_paste(&mut self, text: &str) -> Vec<Box<dyn Message>> {
        if self.editor.apply_paste(text) {
            vec![self.edit_message()]
        } else {
            Vec::new()
        }
    }

    fn render(&self, region: Region, ctx: &RenderCtx<'_>) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let width = region.width as usize;
        let mut strips = Vec::new();

        let label_region = region.row(0);
        if !label_region.is_empty() {
            let mut strip = Strip::new(label_region.y, label_region.x);
            let truncated: String = self.label.chars().take(width).collect();
            strip.push_str(&truncated, ctx.theme.label.clone());
            strips.push(strip);
        }

        let editor_region = region.rows(1, self.editor.rows());
        match &self.editor {
            Editor::Line(input) => strips.extend(input.render(editor_region, ctx)),
            Editor::Area(area) => strips.extend(area.render(editor_region, ctx)),
        }

        if let Some(error) = &self.error {
            let error_region = region.row(1 + self.editor.rows());
            if !error_region.is_empty() {
                let mut strip = Strip::new(error_region.y, error_region.x);
                let truncated: String = error.chars().take(width).collect();
                strip.push_str(&truncated, ctx.theme.error.clone());
                strips.push(strip);
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
