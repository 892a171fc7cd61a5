//! Label widget: displays fixed text content.
//!
//! The simplest widget in formline. Renders one or more lines of immutable
//! text; a title label uses the theme's title style instead of the plain
//! value style.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::{RenderCtx, Widget};

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A widget that displays fixed, non-interactive text.
///
/// Lines are split on `'\n'`. Each line renders as one [`Strip`], truncated
/// to the region width and limited to the region height.
pub struct Label {
    text: String,
    title: bool,
}

impl Label {
    /// Create a plain label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: false,
        }
    }

    /// Create a label rendered in the theme's title style.
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: true,
        }
    }

    /// Return the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this label renders as a title.
    pub fn is_title(&self) -> bool {
        self.title
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn desired_height(&self) -> i32 {
        self.text.split('\n').count() as i32
    }

    fn render(&self, region: Region, ctx: &RenderCtx<'_>) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let style = if self.title {
            ctx.theme.title.clone()
        } else {
            ctx.theme.value.clone()
        };
        let max_width = region.width as usize;
        let max_height = region.height as usize;

        self.text
            .split('\n')
            .take(max_height)
            .enumerate()
            .map(|(i, line)| {
                let mut strip = Strip::new(region.y + i as i32, region.x);
                let truncated: String = line.chars().take(max_width).collect();
                strip.push_str(&truncated, style.clone());
                strip
            })
            .collect()
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
