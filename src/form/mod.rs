//! The form core: field registry, validation rules, and the form store.
//!
//! This module is deliberately free of any rendering concern. A form is
//! described by an ordered [`FieldRegistry`] of field definitions, each
//! carrying its own validation rule; a [`FormStore`] owns the single mutable
//! [`FormState`] (current values and current per-field errors) and applies
//! the two state transitions — update a value, revalidate a field — while
//! notifying subscribed listeners. Overall submit-eligibility is derived
//! fresh on every [`FormStore::is_valid`] call, never cached.

pub mod field;
pub mod rules;
pub mod store;

pub use field::{FieldDefinition, FieldRegistry, InputKind, RegistryError};
pub use rules::{email_format, min_len, required, Validator};
pub use store::{FormState, FormStore, ListenerId};
