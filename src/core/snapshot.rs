//! Serializable view of a session, for reports and debugging dumps.

use serde::Serialize;

use crate::core::game_state::GameState;
use crate::core::scoring::ScoreState;
use crate::types::Cell;

/// Active-piece placement in board coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct PieceSnapshot {
    pub kind: &'static str,
    pub x: i32,
    pub y: i32,
    /// Occupied cells relative to (x, y).
    pub cells: Vec<(usize, usize)>,
}

/// Point-in-time view of a whole session. Rendering and tooling consume
/// this instead of poking at `GameState` internals.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// Row-major grid, 0 = empty.
    pub board: Vec<Cell>,
    pub active: Option<PieceSnapshot>,
    /// Landing row of the active piece.
    pub ghost_row: Option<i32>,
    pub next: &'static str,
    pub hold: Option<&'static str>,
    pub can_hold: bool,
    pub score: ScoreState,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let active = state.active().map(|p| PieceSnapshot {
            kind: p.kind.as_str(),
            x: p.x,
            y: p.y,
            cells: p.matrix.occupied().map(|(x, y, _)| (x, y)).collect(),
        });

        Self {
            cols: state.board().cols(),
            rows: state.board().rows(),
            board: state.board().cells().to_vec(),
            active,
            ghost_row: state.ghost_row(),
            next: state.next_piece().as_str(),
            hold: state.hold_piece().map(|k| k.as_str()),
            can_hold: state.can_hold(),
            score: *state.score_state(),
            paused: state.paused(),
            game_over: state.game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn snapshot_reflects_session_state() {
        let state = GameState::new(GameConfig::new(10, 20).with_seed(3)).unwrap();
        let snap = GameSnapshot::capture(&state);

        assert_eq!(snap.cols, 10);
        assert_eq!(snap.rows, 20);
        assert_eq!(snap.board.len(), 200);
        assert!(snap.active.is_some());
        assert_eq!(snap.active.as_ref().unwrap().cells.len(), 4);
        assert!(!snap.game_over);
        assert_eq!(snap.score.score, 0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let state = GameState::new(GameConfig::new(10, 20).with_seed(3)).unwrap();
        let snap = GameSnapshot::capture(&state);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"cols\":10"));
        assert!(json.contains("\"game_over\":false"));
    }
}
