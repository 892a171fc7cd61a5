//! Snapshot rendering helpers.
//!
//! Functions for converting rendered output (strips, surfaces) into plain
//! text suitable for snapshot testing and assertions.

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::render::surface::Surface;
use crate::render::theme::Theme;
use crate::widget::traits::{RenderCtx, Widget};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a widget to a plain text string using the default theme,
/// unfocused.
///
/// The widget is rendered into a region of `width` x `height` cells at the
/// origin. Each row becomes one line, right-trimmed of spaces; lines are
/// separated by `'\n'` with no trailing newline.
///
/// # Examples
///
/// ```ignore
/// use formline::testing::render_to_string;
/// use formline::widgets::Label;
///
/// let output = render_to_string(&Label::new("Hello"), 20, 1);
/// assert!(output.contains("Hello"));
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    let theme = Theme::default();
    render_to_string_with(widget, width, height, &RenderCtx::new(&theme))
}

/// Render a widget to a plain text string with a custom render context.
///
/// Same as [`render_to_string`] but the caller controls theme and focus.
pub fn render_to_string_with(
    widget: &dyn Widget,
    width: i32,
    height: i32,
    ctx: &RenderCtx<'_>,
) -> String {
    let region = Region::new(0, 0, width, height);
    let strips = widget.render(region, ctx);
    strips_to_string(&strips, width, height)
}

/// Convert raw strips to a plain text string.
///
/// Builds a `width` x `height` grid of spaces, overlays each strip's cells
/// at their (x, y) positions, right-trims each row, and joins rows with
/// `'\n'`.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let w = width as usize;
    let h = height as usize;
    let mut grid: Vec<Vec<char>> = vec![vec![' '; w]; h];

    for strip in strips {
        let y = strip.y;
        if y < 0 || y >= height {
            continue;
        }
        let row = y as usize;
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if x < 0 || x >= width {
                continue;
            }
            grid[row][x as usize] = cell.ch;
        }
    }

    grid_to_string(&grid)
}

/// Convert a composed surface to a plain text string.
///
/// Each row is right-trimmed of spaces; rows are joined with `'\n'`.
pub fn surface_to_string(surface: &Surface) -> String {
    let mut grid: Vec<Vec<char>> =
        vec![vec![' '; surface.width as usize]; surface.height as usize];
    for (y, row) in grid.iter_mut().enumerate() {
        for (x, slot) in row.iter_mut().enumerate() {
            if let Some(cell) = surface.get(x as u16, y as u16) {
                *slot = cell.ch;
            }
        }
    }
    grid_to_string(&grid)
}

fn grid_to_string(grid: &[Vec<char>]) -> String {
    grid.iter()
        .map(|row| {
            let line: String = row.iter().collect();
            line.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;
    use crate::widgets::{Button, Label, TextInput};

    #[test]
    fn render_label_to_string() {
        let output = render_to_string(&Label::new("Hello"), 20, 1);
        assert_eq!(output, "Hello");
    }

    #[test]
    fn render_trims_trailing_spaces() {
        let output = render_to_string(&TextInput::new().with_value("hi"), 10, 1);
        assert_eq!(output, "hi");
    }

    #[test]
    fn render_button_centered() {
        let output = render_to_string(&Button::new("OK"), 10, 3);
        let lines: Vec<&str> = output.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "    OK");
    }

    #[test]
    fn strips_to_string_overlays_positions() {
        let mut a = Strip::new(0, 2);
        a.push_str("ab", CellStyle::default());
        let mut b = Strip::new(1, 0);
        b.push_str("cd", CellStyle::default());
        let output = strips_to_string(&[a, b], 6, 2);
        assert_eq!(output, "  ab\ncd");
    }

    #[test]
    fn strips_out_of_bounds_are_clipped() {
        let mut s = Strip::new(5, 0);
        s.push_str("x", CellStyle::default());
        let output = strips_to_string(&[s], 3, 2);
        assert_eq!(output, "\n");
    }

    #[test]
    fn zero_dimensions_give_empty_string() {
        assert_eq!(strips_to_string(&[], 0, 5), "");
        assert_eq!(strips_to_string(&[], 5, 0), "");
    }

    #[test]
    fn surface_to_string_roundtrip() {
        use crate::geometry::Region;
        use crate::render::surface::Surface;

        let mut surface = Surface::new(6, 2);
        let mut s = Strip::new(1, 1);
        s.push_str("ok", CellStyle::default());
        surface.blit(&[s], Region::new(0, 0, 6, 2));
        assert_eq!(surface_to_string(&surface), "\n ok");
    }
}
