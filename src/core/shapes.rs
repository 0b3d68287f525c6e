//! Shape catalog and matrix rotation.
//!
//! Shapes are square matrices of cell ids (0 = empty, 1..=7 = color id),
//! with an explicit side length per shape: I is 4x4, O is 2x2, the rest
//! are 3x3. Rotation returns a new matrix via transpose + reverse and
//! never aliases the catalog entries.

use crate::types::{Cell, PieceKind, Spin};

/// Largest shape side length (the I piece).
pub const MATRIX_MAX: usize = 4;

/// A square shape matrix with explicit side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[Cell; MATRIX_MAX]; MATRIX_MAX],
}

impl ShapeMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value at (x, y) within the matrix. Out-of-matrix reads are 0.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x < self.size && y < self.size {
            self.cells[y][x]
        } else {
            0
        }
    }

    /// Iterate occupied cells as (x, y, value).
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| {
            (0..size).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != 0).then_some((x, y, v))
            })
        })
    }

    /// 90-degree rotation: transpose, then reverse rows (cw) or reverse
    /// row order (ccw).
    pub fn rotated(&self, dir: Spin) -> Self {
        let n = self.size;
        let mut out = Self {
            size: n,
            cells: [[0; MATRIX_MAX]; MATRIX_MAX],
        };
        for y in 0..n {
            for x in 0..n {
                match dir {
                    Spin::Cw => out.cells[y][x] = self.cells[n - 1 - x][y],
                    Spin::Ccw => out.cells[y][x] = self.cells[x][n - 1 - y],
                }
            }
        }
        out
    }
}

/// Kick offsets tried in order when a rotation collides: in place, one
/// column either side, one row up, two columns either side.
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Canonical (spawn-orientation) matrix for a shape.
pub fn catalog(kind: PieceKind) -> ShapeMatrix {
    const fn m2(rows: [[Cell; 2]; 2]) -> ShapeMatrix {
        let mut cells = [[0; MATRIX_MAX]; MATRIX_MAX];
        let mut y = 0;
        while y < 2 {
            let mut x = 0;
            while x < 2 {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        ShapeMatrix { size: 2, cells }
    }
    const fn m3(rows: [[Cell; 3]; 3]) -> ShapeMatrix {
        let mut cells = [[0; MATRIX_MAX]; MATRIX_MAX];
        let mut y = 0;
        while y < 3 {
            let mut x = 0;
            while x < 3 {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        ShapeMatrix { size: 3, cells }
    }

    match kind {
        PieceKind::I => ShapeMatrix {
            size: 4,
            cells: [
                [0, 6, 0, 0],
                [0, 6, 0, 0],
                [0, 6, 0, 0],
                [0, 6, 0, 0],
            ],
        },
        PieceKind::L => m3([[0, 5, 0], [0, 5, 0], [0, 5, 5]]),
        PieceKind::J => m3([[0, 7, 0], [0, 7, 0], [7, 7, 0]]),
        PieceKind::O => m2([[4, 4], [4, 4]]),
        PieceKind::Z => m3([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        PieceKind::S => m3([[0, 2, 2], [2, 2, 0], [0, 0, 0]]),
        PieceKind::T => m3([[0, 3, 0], [3, 3, 3], [0, 0, 0]]),
    }
}
