//! Message trait, envelope, and built-in messages.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with the widget that produced it.
//! Built-in messages: [`Quit`], [`FocusNext`], [`FocusPrevious`],
//! [`ValueEdited`], [`SubmitPressed`], [`Custom`].

use std::any::Any;

use crate::widget::WidgetId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// All messages must implement `as_any` for downcasting and `message_name`
/// for debug/logging purposes.
pub trait Message: 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with its origin.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The widget that produced this message, when one did. `None` for
    /// messages produced by key bindings or the app itself.
    pub sender: Option<WidgetId>,
    /// Whether this message has been handled.
    pub handled: bool,
}

impl Envelope {
    /// Create a new envelope with no sending widget.
    pub fn new(message: impl Message) -> Self {
        Self {
            message: Box::new(message),
            sender: None,
            handled: false,
        }
    }

    /// Create a new envelope sent by a specific widget.
    pub fn from_widget(message: Box<dyn Message>, sender: WidgetId) -> Self {
        Self {
            message,
            sender: Some(sender),
            handled: false,
        }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Mark this envelope as handled.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .field("handled", &self.handled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// Request application shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quit;

impl Message for Quit {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "Quit"
    }
}

/// Move focus to the next focusable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusNext;

impl Message for FocusNext {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "FocusNext"
    }
}

/// Move focus to the previous focusable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPrevious;

impl Message for FocusPrevious {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "FocusPrevious"
    }
}

/// A field's editor produced a new value.
///
/// The receiver applies the value update and then revalidates the same
/// field, in that order, before the next event is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEdited {
    pub field: String,
    pub value: String,
}

impl ValueEdited {
    /// Create a new edit message.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Message for ValueEdited {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "ValueEdited"
    }
}

/// The submit button was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPressed;

impl Message for SubmitPressed {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "SubmitPressed"
    }
}

/// User-defined string message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom(pub String);

impl Custom {
    /// Create a new custom message.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Message for Custom {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "Custom"
    }
}

// ===========================================================================
// Tests
// ===========================================================================
