//! # formline
//!
//! A reactive terminal form toolkit built on [crossterm](https://crates.io/crates/crossterm).
//!
//! formline renders a set of labeled fields (single-line inputs, email inputs,
//! multi-line text areas) backed by a centralized form store that tracks field
//! values and per-field validation errors, with a submit control that is only
//! enabled while the whole form is valid. The validation core is pure and
//! synchronous; everything around it is conventional TUI plumbing.
//!
//! ## Core Systems
//!
//! - **[`form`]** — Field registry, validation rules, and the form store
//! - **[`widget`]** — Widget trait and render context
//! - **[`widgets`]** — Built-in widgets: Label, TextInput, TextArea, Button, Field
//! - **[`event`]** — Input events, messages, key bindings, dispatch queue
//! - **[`render`]** — Strips, surface diffing, theme, crossterm driver
//! - **[`screen`]** — Form screen with focus chain and layout
//! - **[`app`]** — Application struct tying everything together
//! - **[`geometry`]** — Offset, Size, Region primitives
//! - **[`testing`]** — Headless pilot and plain-text render helpers

// Foundation
pub mod geometry;

// Validation core
pub mod form;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod screen;

// Test support
pub mod testing;
