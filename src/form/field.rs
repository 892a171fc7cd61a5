//! Field definitions and the ordered field registry.
//!
//! A [`FieldRegistry`] is the canonical, ordered description of which fields
//! a form has and how each is labeled, rendered, and validated. It is built
//! once and never mutated; both the store and the rendering layer iterate it
//! in definition order.

use std::fmt;

use super::rules::{self, Validator};

// ---------------------------------------------------------------------------
// InputKind
// ---------------------------------------------------------------------------

/// How a field's editor is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Single-line free text.
    Text,
    /// Single-line text rendered like [`InputKind::Text`]; the distinction
    /// only matters for the field's validation rule and semantics.
    Email,
    /// Multi-line text.
    TextArea,
}

impl InputKind {
    /// Whether this kind edits multiple lines.
    pub fn is_multiline(self) -> bool {
        matches!(self, InputKind::TextArea)
    }
}

// ---------------------------------------------------------------------------
// FieldDefinition
// ---------------------------------------------------------------------------

/// One field of a form: identity, presentation, and validation rule.
///
/// The validation rule travels with the definition, so consumers never
/// switch on field ids to find the right rule.
pub struct FieldDefinition {
    id: String,
    label: String,
    kind: InputKind,
    placeholder: String,
    validator: Option<Validator>,
}

impl FieldDefinition {
    /// Create a new definition with no placeholder and no validation rule.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            placeholder: String::new(),
            validator: None,
        }
    }

    /// Set the placeholder text (builder pattern).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Attach a validation rule (builder pattern).
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The field's stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label rendered above the editor.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The editor kind.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// The placeholder shown while the field is empty.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether this field carries a validation rule.
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Apply this field's rule to `value`.
    ///
    /// Returns the error message when the value fails, `None` when it
    /// passes or when the field has no rule.
    pub fn validate(&self, value: &str) -> Option<String> {
        self.validator.as_ref().and_then(|rule| rule(value))
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("placeholder", &self.placeholder)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors raised while building a [`FieldRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate field id: {0}")]
    DuplicateId(String),
}

// ---------------------------------------------------------------------------
// FieldRegistry
// ---------------------------------------------------------------------------

/// An ordered, immutable sequence of field definitions.
///
/// Field ids are unique within a registry; construction fails otherwise.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    /// Build a registry from definitions, preserving their order.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, RegistryError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.id == field.id) {
                return Err(RegistryError::DuplicateId(field.id.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// The standard user contact form: first name, last name, email, and a
    /// free-text message of at least ten characters.
    pub fn user_form() -> Self {
        Self::new(vec![
            FieldDefinition::new("firstName", "First Name", InputKind::Text)
                .with_placeholder("Please enter a First Name")
                .with_validator(rules::required("First Name is a required field")),
            FieldDefinition::new("lastName", "Last Name", InputKind::Text)
                .with_placeholder("Please enter a Last Name")
                .with_validator(rules::required("Last Name is a required field")),
            FieldDefinition::new("email", "Email", InputKind::Email)
                .with_placeholder("Please enter an Email")
                .with_validator(rules::email_format("Invalid email format")),
            FieldDefinition::new("message", "Message", InputKind::TextArea)
                .with_placeholder("Please enter a Message")
                .with_validator(rules::min_len(
                    10,
                    "Message should be at least 10 characters long",
                )),
        ])
        .expect("user form field ids are unique")
    }

    /// Iterate the definitions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    /// Iterate the field ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether a field with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
