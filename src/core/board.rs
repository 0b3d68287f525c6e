//! Board grid and collision oracle.
//!
//! The board is a ROWS x COLS grid of cell ids (0 = empty, 1..=7 = color),
//! stored row-major in a flat buffer. Coordinates: (x, y) with x in
//! 0..cols left to right and y in 0..rows top to bottom. Pieces may extend
//! above the visible top (y < 0) at spawn; those cells never collide.

use arrayvec::ArrayVec;

use crate::core::shapes::ShapeMatrix;
use crate::types::Cell;

/// The playfield grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are validated by `GameConfig`
    /// before a session is constructed.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.cols as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Cell value at (x, y); `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v != 0)
    }

    /// Collision oracle: true iff any occupied cell of `matrix` placed at
    /// (x, y) falls below the last row, outside the column bounds, or on
    /// an occupied board cell. Cells above the top (board y < 0) never
    /// collide, permitting spawn overhang.
    pub fn collides(&self, matrix: &ShapeMatrix, x: i32, y: i32) -> bool {
        for (mx, my, _) in matrix.occupied() {
            let ax = x + mx as i32;
            let ay = y + my as i32;
            if ay >= self.rows as i32 || ax < 0 || ax >= self.cols as i32 {
                return true;
            }
            if ay >= 0 && self.cells[ay as usize * self.cols + ax as usize] != 0 {
                return true;
            }
        }
        false
    }

    /// Merge a shape's occupied cells into the grid. Cells above the top
    /// or outside the grid are dropped silently.
    pub fn merge(&mut self, matrix: &ShapeMatrix, x: i32, y: i32) {
        for (mx, my, v) in matrix.occupied() {
            self.set(x + mx as i32, y + my as i32, v);
        }
    }

    fn row_full(&self, y: usize) -> bool {
        let start = y * self.cols;
        self.cells[start..start + self.cols].iter().all(|&c| c != 0)
    }

    /// Remove every full row, shifting the rows above down and inserting
    /// empty rows at the top. Returns the cleared row indices, bottom to
    /// top. A single lock can complete at most 4 rows.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let cols = self.cols;
        let mut write_y = self.rows;

        for read_y in (0..self.rows).rev() {
            if self.row_full(read_y) && !cleared.is_full() {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * cols;
                    let dst = write_y * cols;
                    self.cells.copy_within(src..src + cols, dst);
                }
            }
        }

        for cell in &mut self.cells[..write_y * cols] {
            *cell = 0;
        }

        cleared
    }

    /// Height of a column: rows from the first occupied cell down to the
    /// floor, 0 for an empty column.
    pub fn column_height(&self, x: usize) -> usize {
        for y in 0..self.rows {
            if self.cells[y * self.cols + x] != 0 {
                return self.rows - y;
            }
        }
        0
    }

    /// Height of the tallest column.
    pub fn stack_height(&self) -> usize {
        for y in 0..self.rows {
            let start = y * self.cols;
            if self.cells[start..start + self.cols].iter().any(|&c| c != 0) {
                return self.rows - y;
            }
        }
        0
    }

    /// Row-major view of the grid.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}
