//! Widget abstraction: the object-safe trait and widget identity.

pub mod traits;

pub use traits::{RenderCtx, Widget};

slotmap::new_key_type! {
    /// Identifies a widget inside a screen's arena.
    pub struct WidgetId;
}
