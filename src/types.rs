//! Core types shared across the crate.
//!
//! Pure data types with no dependencies beyond serde derives.

use serde::{Deserialize, Serialize};

/// Default board dimensions (columns x rows).
pub const DEFAULT_COLS: usize = 14;
pub const DEFAULT_ROWS: usize = 30;

/// Game timing constants (milliseconds).
pub const BASE_DROP_MS: u32 = 1000;
pub const MIN_DROP_MS: u32 = 50;
pub const LOCK_DELAY_MS: u32 = 500;
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Ticks longer than this are clamped so a stalled process cannot
/// fast-forward the simulation.
pub const MAX_TICK_MS: u32 = 250;

/// Delay between autopilot actions (milliseconds).
pub const AUTOPILOT_STEP_MS: u32 = 50;

/// Cell occupancy id: 0 = empty, 1..=7 = color id of the locking shape.
pub type Cell = u8;

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell color id stamped into the board when this shape locks.
    pub fn color_id(self) -> Cell {
        match self {
            PieceKind::Z => 1,
            PieceKind::S => 2,
            PieceKind::T => 3,
            PieceKind::O => 4,
            PieceKind::L => 5,
            PieceKind::I => 6,
            PieceKind::J => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

/// Commands accepted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
}

impl GameAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Base line-clear scores by clear size, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Spin-clear scores by clear size, multiplied by level.
/// Index 4 is the fallback for oversized spin clears.
pub const SPIN_SCORES: [u32; 5] = [0, 800, 1200, 1600, 400];

/// Flat bonus for a spin that clears no lines (not level-scaled).
pub const SPIN_ZERO_LINE_BONUS: u32 = 100;

/// Score threshold factor for the level-up rule: level advances while
/// `score >= level * LEVEL_UP_SCORE_STEP`.
pub const LEVEL_UP_SCORE_STEP: u32 = 1000;
