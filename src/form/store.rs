//! The form store: one state object, two transitions, derived validity.
//!
//! [`FormStore`] owns the single mutable [`FormState`] for a form. State
//! changes happen only through [`FormStore::update_value`] and
//! [`FormStore::validate_field`]; the rendering layer calls them in that
//! order for every edit event and reads the state back through accessors.
//! Stores are plain values — construct as many as you need, one per form.

use std::collections::BTreeMap;

use super::field::FieldRegistry;

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Current values and validation errors, keyed by field id.
///
/// `values` always holds exactly one entry per registered field. `errors`
/// holds an entry only while the field's own rule rejects its own current
/// value; a passing or unvalidated field has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
}

impl FormState {
    fn new(registry: &FieldRegistry) -> Self {
        Self {
            values: registry
                .ids()
                .map(|id| (id.to_owned(), String::new()))
                .collect(),
            errors: BTreeMap::new(),
        }
    }

    /// The current value of a field, or `None` for unknown ids.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// The current error of a field, or `None` when it passes (or is
    /// unknown, or has not been validated since it last passed).
    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// All values, in field-id order.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// All active errors, in field-id order.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Whether any field currently has an active error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ListenerId
// ---------------------------------------------------------------------------

/// Identifies a subscribed change listener inside a [`FormStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(&FormState)>;

// ---------------------------------------------------------------------------
// FormStore
// ---------------------------------------------------------------------------

/// Owns a form's registry, its state, and its change listeners.
pub struct FormStore {
    registry: FieldRegistry,
    state: FormState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl FormStore {
    /// Create a store for `registry` with every value empty and no errors.
    pub fn new(registry: FieldRegistry) -> Self {
        let state = FormState::new(&registry);
        Self {
            registry,
            state,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The registry this store was built from.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Replace the value of `id` with `value`.
    ///
    /// All other values and all errors stay untouched; the error for `id`
    /// itself is only recomputed by [`validate_field`](Self::validate_field).
    /// Unknown ids are a no-op. Listeners are notified.
    pub fn update_value(&mut self, id: &str, value: impl Into<String>) {
        if !self.registry.contains(id) {
            return;
        }
        self.state.values.insert(id.to_owned(), value.into());
        self.notify();
    }

    /// Recompute the error for exactly `id` from its current value.
    ///
    /// Applies the field's own rule to the value as it stands now and
    /// replaces the error slot with the outcome. Nothing else changes.
    /// Unknown ids are a no-op; fields without a rule never gain an error.
    /// Listeners are notified when the error slot actually changed.
    pub fn validate_field(&mut self, id: &str) {
        let Some(def) = self.registry.get(id) else {
            return;
        };
        let current = self.state.values.get(id).map(String::as_str).unwrap_or("");
        let outcome = def.validate(current);

        let changed = match &outcome {
            Some(message) => self.state.errors.get(id) != Some(message),
            None => self.state.errors.contains_key(id),
        };
        match outcome {
            Some(message) => {
                self.state.errors.insert(id.to_owned(), message);
            }
            None => {
                self.state.errors.remove(id);
            }
        }
        if changed {
            self.notify();
        }
    }

    // -----------------------------------------------------------------------
    // Derived validity
    // -----------------------------------------------------------------------

    /// Whether the form may be submitted right now.
    ///
    /// True iff every registered field has a non-empty value AND no field
    /// has an active error. Recomputed fresh on every call, so it can never
    /// go stale relative to the state: a freshly-created form is invalid
    /// (everything empty) even though no error is showing yet.
    pub fn is_valid(&self) -> bool {
        self.state.values.values().all(|v| !v.is_empty()) && self.state.errors.is_empty()
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Subscribe to state changes. The listener runs after every applied
    /// transition, with the new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&FormState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `true` if it was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Run every listener against the current state.
    ///
    /// Listeners are taken out of the store while they run, so a listener
    /// may subscribe further listeners without aliasing the store.
    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(&self.state);
        }
        let added = std::mem::take(&mut self.listeners);
        listeners.extend(added);
        self.listeners = listeners;
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("registry", &self.registry)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::form::field::{FieldDefinition, InputKind};

    fn user_store() -> FormStore {
        FormStore::new(FieldRegistry::user_form())
    }

    /// Apply the edit-event pairing: update, then validate the same field.
    fn edit(store: &mut FormStore, id: &str, value: &str) {
        store.update_value(id, value);
        store.validate_field(id);
    }

    // -----------------------------------------------------------------------
    // Initial state
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_store_has_one_empty_value_per_field() {
        let store = user_store();
        assert_eq!(store.state().values().len(), 4);
        for id in ["firstName", "lastName", "email", "message"] {
            assert_eq!(store.state().value(id), Some(""));
            assert_eq!(store.state().error(id), None);
        }
        assert!(!store.state().has_errors());
    }

    #[test]
    fn fresh_store_is_invalid() {
        // Everything empty and error-free still blocks submission.
        assert!(!user_store().is_valid());
    }

    // -----------------------------------------------------------------------
    // update_value
    // -----------------------------------------------------------------------

    #[test]
    fn update_value_replaces_only_that_value() {
        let mut store = user_store();
        store.update_value("firstName", "Jane");
        assert_eq!(store.state().value("firstName"), Some("Jane"));
        assert_eq!(store.state().value("lastName"), Some(""));
        assert!(store.state().errors().is_empty());
    }

    #[test]
    fn update_value_does_not_touch_errors() {
        let mut store = user_store();
        store.validate_field("firstName");
        assert!(store.state().error("firstName").is_some());
        // A new value does not clear the stale error until revalidation.
        store.update_value("firstName", "Jane");
        assert_eq!(
            store.state().error("firstName"),
            Some("First Name is a required field")
        );
    }

    #[test]
    fn update_value_unknown_id_is_noop() {
        let mut store = user_store();
        store.update_value("nickname", "JD");
        assert_eq!(store.state().values().len(), 4);
        assert_eq!(store.state().value("nickname"), None);
    }

    // -----------------------------------------------------------------------
    // validate_field
    // -----------------------------------------------------------------------

    #[test]
    fn validate_empty_required_field_sets_message() {
        let mut store = user_store();
        store.validate_field("firstName");
        assert_eq!(
            store.state().error("firstName"),
            Some("First Name is a required field")
        );
        store.validate_field("lastName");
        assert_eq!(
            store.state().error("lastName"),
            Some("Last Name is a required field")
        );
    }

    #[test]
    fn validate_clears_error_once_value_passes() {
        let mut store = user_store();
        store.validate_field("firstName");
        store.update_value("firstName", "Jane");
        store.validate_field("firstName");
        assert_eq!(store.state().error("firstName"), None);
    }

    #[test]
    fn validate_email_rejects_malformed_and_empty_alike() {
        let mut store = user_store();
        edit(&mut store, "email", "not-an-email");
        assert_eq!(store.state().error("email"), Some("Invalid email format"));

        // Emptying the email reports the same format message, not a
        // required-field message. Observed behavior, kept as-is.
        edit(&mut store, "email", "");
        assert_eq!(store.state().error("email"), Some("Invalid email format"));

        edit(&mut store, "email", "a@b.com");
        assert_eq!(store.state().error("email"), None);
    }

    #[test]
    fn validate_message_length_boundary() {
        let mut store = user_store();
        edit(&mut store, "message", "123456789");
        assert_eq!(
            store.state().error("message"),
            Some("Message should be at least 10 characters long")
        );
        edit(&mut store, "message", "1234567890");
        assert_eq!(store.state().error("message"), None);
    }

    #[test]
    fn validate_only_touches_named_field() {
        let mut store = user_store();
        edit(&mut store, "email", "broken");
        store.validate_field("firstName");
        assert_eq!(store.state().error("email"), Some("Invalid email format"));
        assert_eq!(store.state().errors().len(), 2);
    }

    #[test]
    fn validate_unknown_id_is_noop() {
        let mut store = user_store();
        store.validate_field("nickname");
        assert!(store.state().errors().is_empty());
    }

    #[test]
    fn validate_field_without_rule_stays_clean() {
        let registry = FieldRegistry::new(vec![FieldDefinition::new(
            "note",
            "Note",
            InputKind::Text,
        )])
        .unwrap();
        let mut store = FormStore::new(registry);
        store.validate_field("note");
        assert_eq!(store.state().error("note"), None);
    }

    #[test]
    fn validate_is_idempotent() {
        let mut store = user_store();
        store.validate_field("firstName");
        let first = store.state().error("firstName").map(str::to_owned);
        store.validate_field("firstName");
        assert_eq!(store.state().error("firstName").map(str::to_owned), first);

        edit(&mut store, "firstName", "Jane");
        store.validate_field("firstName");
        assert_eq!(store.state().error("firstName"), None);
    }

    // -----------------------------------------------------------------------
    // is_valid
    // -----------------------------------------------------------------------

    #[test]
    fn is_valid_requires_all_values_and_no_errors() {
        let mut store = user_store();
        edit(&mut store, "firstName", "Jane");
        edit(&mut store, "lastName", "Doe");
        edit(&mut store, "email", "jane@doe.com");
        assert!(!store.is_valid()); // message still empty

        edit(&mut store, "message", "Hello there!");
        assert!(store.is_valid());
    }

    #[test]
    fn is_valid_flips_false_when_any_value_empties() {
        let mut store = user_store();
        edit(&mut store, "firstName", "Jane");
        edit(&mut store, "lastName", "Doe");
        edit(&mut store, "email", "jane@doe.com");
        edit(&mut store, "message", "Hello there!");
        assert!(store.is_valid());

        store.update_value("lastName", "");
        assert!(!store.is_valid());
    }

    #[test]
    fn is_valid_flips_false_when_any_error_appears() {
        let mut store = user_store();
        edit(&mut store, "firstName", "Jane");
        edit(&mut store, "lastName", "Doe");
        edit(&mut store, "email", "jane@doe.com");
        edit(&mut store, "message", "Hello there!");
        assert!(store.is_valid());

        edit(&mut store, "email", "broken");
        assert!(!store.is_valid());
    }

    #[test]
    fn is_valid_is_read_time_not_cached() {
        let mut store = user_store();
        edit(&mut store, "firstName", "Jane");
        edit(&mut store, "lastName", "Doe");
        edit(&mut store, "email", "jane@doe.com");
        edit(&mut store, "message", "Hello there!");
        assert!(store.is_valid());
        // Mutate without an intervening explicit recompute; the next read
        // observes the new state directly.
        store.update_value("message", "");
        assert!(!store.is_valid());
        store.update_value("message", "Hello once more");
        assert!(store.is_valid());
    }

    #[test]
    fn two_stores_are_isolated() {
        let mut a = user_store();
        let b = user_store();
        edit(&mut a, "firstName", "Jane");
        assert_eq!(a.state().value("firstName"), Some("Jane"));
        assert_eq!(b.state().value("firstName"), Some(""));
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    #[test]
    fn listener_runs_on_update() {
        let mut store = user_store();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        store.subscribe(move |_| count_c.set(count_c.get() + 1));

        store.update_value("firstName", "J");
        assert_eq!(count.get(), 1);
        store.update_value("firstName", "Ja");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn listener_sees_new_state() {
        let mut store = user_store();
        let seen = Rc::new(Cell::new(false));
        let seen_c = seen.clone();
        store.subscribe(move |state| {
            seen_c.set(state.value("firstName") == Some("Jane"));
        });
        store.update_value("firstName", "Jane");
        assert!(seen.get());
    }

    #[test]
    fn validate_notifies_only_when_error_slot_changes() {
        let mut store = user_store();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        store.subscribe(move |_| count_c.set(count_c.get() + 1));

        store.validate_field("firstName"); // error appears
        assert_eq!(count.get(), 1);
        store.validate_field("firstName"); // same error, no change
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = user_store();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        let id = store.subscribe(move |_| count_c.set(count_c.get() + 1));

        store.update_value("firstName", "J");
        assert_eq!(count.get(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update_value("firstName", "Ja");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unknown_id_transitions_do_not_notify() {
        let mut store = user_store();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        store.subscribe(move |_| count_c.set(count_c.get() + 1));

        store.update_value("nickname", "JD");
        store.validate_field("nickname");
        assert_eq!(count.get(), 0);
    }

    // -----------------------------------------------------------------------
    // End-to-end fill
    // -----------------------------------------------------------------------

    #[test]
    fn filling_every_field_validly_ends_clean() {
        let mut store = user_store();
        edit(&mut store, "firstName", "Jane");
        edit(&mut store, "lastName", "Doe");
        edit(&mut store, "email", "jane@doe.com");
        edit(&mut store, "message", "Hello there!");

        assert!(store.is_valid());
        assert!(store.state().errors().is_empty());
        assert_eq!(store.state().value("firstName"), Some("Jane"));
        assert_eq!(store.state().value("lastName"), Some("Doe"));
        assert_eq!(store.state().value("email"), Some("jane@doe.com"));
        assert_eq!(store.state().value("message"), Some("Hello there!"));
    }

    #[test]
    fn validation_never_reads_other_fields() {
        // Validation of one field never reads another field's value.
        let mut store = user_store();
        edit(&mut store, "message", "Hello there!");
        assert_eq!(store.state().error("message"), None);
        assert_eq!(store.state().error("firstName"), None);
        assert!(!store.is_valid());
    }
}
