//! Built-in widgets: Label, TextInput, TextArea, Button, Field.

pub mod button;
pub mod field;
pub mod input;
pub mod label;
pub mod textarea;

pub use button::Button;
pub use field::Field;
pub use input::TextInput;
pub use label::Label;
pub use textarea::TextArea;
