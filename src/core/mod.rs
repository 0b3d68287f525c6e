//! Game simulation: board, shapes, randomizer, scoring and session state.

pub mod bag;
pub mod board;
pub mod game_state;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use bag::{SevenBag, SimpleRng};
pub use board::Board;
pub use game_state::{ActivePiece, GameState};
pub use scoring::{lock_points, ScoreState};
pub use shapes::{catalog, ShapeMatrix, KICK_OFFSETS, MATRIX_MAX};
pub use snapshot::GameSnapshot;
