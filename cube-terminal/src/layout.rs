/// Screen layout for the terminal preview
use cube_core::CubeId;

/// Rows above the cube row: title bar and page heading
pub const HEADER_ROWS: usize = 3;
/// Rows below the cube row: gap, media heading, image line, upload button, status
pub const FOOTER_ROWS: usize = 6;
pub const GAP: usize = 2;
pub const MAX_CUBE_COLS: usize = 40;
/// Smallest cube that still reads as a cube
pub const MIN_CUBE_ROWS: usize = 4;

/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        (self.x..self.right()).contains(&col) && (self.y..self.bottom()).contains(&row)
    }
}

/// Where each part of a page goes for a given terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: usize,
    pub rows: usize,
    pub cubes: [Viewport; 3],
    pub media_row: usize,
    pub status_row: usize,
}

impl Layout {
    /// `None` when the terminal cannot fit three cubes side by side
    pub fn compute(cols: usize, rows: usize) -> Option<Self> {
        let per_cube = cols.saturating_sub(2 * GAP) / 3;
        let cube_rows = rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS);

        // Cells are roughly twice as tall as they are wide
        let width = per_cube.min(MAX_CUBE_COLS).min(cube_rows * 2) & !1;
        let height = width / 2;
        if height < MIN_CUBE_ROWS {
            return None;
        }

        let total = width * 3 + GAP * 2;
        let left = (cols - total) / 2;
        let cubes = [0, 1, 2].map(|i| Viewport::new(left + i * (width + GAP), HEADER_ROWS, width, height));

        Some(Self {
            cols,
            rows,
            cubes,
            media_row: HEADER_ROWS + height + 1,
            status_row: rows - 1,
        })
    }

    pub fn cube_at(&self, col: usize, row: usize) -> Option<CubeId> {
        CubeId::ALL
            .into_iter()
            .find(|id| self.cubes[id.index()].contains(col, row))
    }
}
