//! Surface: the full-screen cell buffer and frame diffing.
//!
//! The `Surface` holds a 2D grid of `StyledCell`s representing one rendered
//! frame. Widgets render into `Strip`s, which are blitted into the surface
//! with clipping. The `diff` method compares two frames and produces only
//! the `CellUpdate`s needed to transition between them, so the driver can
//! emit minimal terminal escape sequences.

use crate::geometry::{Region, Size};

use super::strip::{CellStyle, Strip, StyledCell};

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A screen-sized buffer of styled cells.
///
/// `cells[y][x]` is the cell at column x, row y. The form screen clears and
/// repaints the surface each frame; `diff` against the previous frame keeps
/// terminal output small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    cells: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Surface {
    /// Create a new blank surface of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: Self::blank_grid(width, height),
            width,
            height,
        }
    }

    /// Resize the surface. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = Self::blank_grid(width, height);
    }

    /// Reset every cell to a blank with default style.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                *cell = StyledCell::blank();
            }
        }
    }

    /// Fill every cell with a blank in the given style.
    pub fn fill(&mut self, style: CellStyle) {
        for row in &mut self.cells {
            for cell in row {
                *cell = StyledCell::blank_styled(style.clone());
            }
        }
    }

    /// The surface dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    /// The full surface area as a region.
    pub fn region(&self) -> Region {
        self.size().to_region()
    }

    /// Place rendered strips into the buffer, clipped to `clip` and to the
    /// surface bounds.
    pub fn blit(&mut self, strips: &[Strip], clip: Region) {
        let clip = clip.intersection(self.region());
        if clip.is_empty() {
            return;
        }

        for strip in strips {
            let y = strip.y;
            if y < clip.y || y >= clip.bottom() {
                continue;
            }
            let row = &mut self.cells[y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x < clip.x || x >= clip.right() {
                    continue;
                }
                row[x as usize] = cell.clone();
            }
        }
    }

    /// The cell at (x, y), if in bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Compare this frame against a previous frame and return only the
    /// changed cells.
    ///
    /// Cells outside the overlap of the two sizes are not reported; after a
    /// resize the caller should clear the terminal and repaint from blank.
    pub fn diff(&self, previous: &Surface) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        let h = self.height.min(previous.height) as usize;
        let w = self.width.min(previous.width) as usize;

        for y in 0..h {
            for x in 0..w {
                if self.cells[y][x] != previous.cells[y][x] {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: self.cells[y][x].clone(),
                    });
                }
            }
        }
        updates
    }

    fn blank_grid(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        vec![vec![StyledCell::blank(); width as usize]; height as usize]
    }
}

// ===========================================================================
// Tests
// ===========================================================================
