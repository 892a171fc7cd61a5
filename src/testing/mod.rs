//! Test support: headless pilot and plain-text render helpers.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, render_to_string_with, strips_to_string, surface_to_string};
