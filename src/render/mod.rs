//! Rendering pipeline: strips, surface diffing, theme, terminal driver.

pub mod driver;
pub mod strip;
pub mod surface;
pub mod theme;

pub use driver::Driver;
pub use strip::{CellStyle, Strip, StyledCell};
pub use surface::{CellUpdate, Surface};
pub use theme::Theme;
