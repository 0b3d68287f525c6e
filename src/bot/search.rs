//! Two-ply placement search.
//!
//! Enumerates every rotation and column for the active piece (and for the
//! hold alternative when holding is available), scores the resulting
//! boards, then refines the best candidates by also placing the preview
//! piece. The beam keeps the top 32 first-ply candidates; ties resolve in
//! enumeration order, so the search is deterministic for a given board.

use crate::bot::evaluator::{evaluate, EvalWeights};
use crate::core::board::Board;
use crate::core::game_state::GameState;
use crate::core::shapes::{catalog, ShapeMatrix};
use crate::types::{PieceKind, Spin};

/// First-ply candidates kept for second-ply refinement.
pub const SEARCH_BEAM: usize = 32;

/// Stack height that flips the search into high-risk mode.
const RISK_EXIT_HEIGHT: usize = 6;

/// Stand-in reply score when the preview piece has no legal placement on
/// a candidate board. Large enough to rank such candidates below any
/// playable one, small enough that their first-ply scores still order
/// them among themselves.
const DEAD_REPLY: f64 = -1e18;

/// A fully specified placement for the active piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Swap with the hold slot before moving.
    pub use_hold: bool,
    /// Clockwise rotations from the spawn orientation.
    pub rotations: u8,
    /// Target column for the shape matrix origin.
    pub x: i32,
    /// Combined two-ply score.
    pub score: f64,
}

/// Hysteresis for the evaluator's high-risk mode: enter when the stack
/// passes half the board, leave only once it drops back below a low
/// watermark, so the mode does not flap at the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskTracker {
    high_risk: bool,
}

impl RiskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high_risk(&self) -> bool {
        self.high_risk
    }

    pub fn update(&mut self, stack_height: usize, rows: usize) -> bool {
        if self.high_risk {
            if stack_height < RISK_EXIT_HEIGHT {
                self.high_risk = false;
            }
        } else if stack_height * 2 > rows {
            self.high_risk = true;
        }
        self.high_risk
    }
}

/// Outcome of dropping a shape straight down from the top.
struct Drop {
    landing_y: i32,
    cleared: usize,
    board: Board,
}

/// Simulate a vertical drop of `matrix` at column `x`. `None` when the
/// shape cannot even occupy the spawn row there.
fn simulate_drop(board: &Board, matrix: &ShapeMatrix, x: i32) -> Option<Drop> {
    if board.collides(matrix, x, 0) {
        return None;
    }
    let mut y = 0;
    while !board.collides(matrix, x, y + 1) {
        y += 1;
    }
    let mut after = board.clone();
    after.merge(matrix, x, y);
    let cleared = after.clear_full_rows().len();
    Some(Drop {
        landing_y: y,
        cleared,
        board: after,
    })
}

struct Candidate {
    use_hold: bool,
    rotations: u8,
    x: i32,
    first_score: f64,
    board: Board,
}

fn first_ply(
    board: &Board,
    kind: PieceKind,
    use_hold: bool,
    high_risk: bool,
    weights: &EvalWeights,
    out: &mut Vec<Candidate>,
) {
    let cols = board.cols() as i32;
    let mut matrix = catalog(kind);
    for rotations in 0..4u8 {
        for x in -2..cols + 2 {
            if let Some(drop) = simulate_drop(board, &matrix, x) {
                let score = evaluate(&drop.board, drop.cleared, drop.landing_y, high_risk, weights);
                out.push(Candidate {
                    use_hold,
                    rotations,
                    x,
                    first_score: score,
                    board: drop.board,
                });
            }
        }
        matrix = matrix.rotated(Spin::Cw);
    }
}

/// Best single-ply score for `kind` on `board`; `None` when the piece
/// cannot be placed anywhere.
fn best_reply(board: &Board, kind: PieceKind, high_risk: bool, weights: &EvalWeights) -> Option<f64> {
    let cols = board.cols() as i32;
    let mut best: Option<f64> = None;
    let mut matrix = catalog(kind);
    for _ in 0..4 {
        for x in -2..cols + 2 {
            if let Some(drop) = simulate_drop(board, &matrix, x) {
                let score =
                    evaluate(&drop.board, drop.cleared, drop.landing_y, high_risk, weights);
                best = Some(match best {
                    Some(b) if b >= score => b,
                    _ => score,
                });
            }
        }
        matrix = matrix.rotated(Spin::Cw);
    }
    best
}

/// Pick the best placement for the current session state. `None` means
/// no placement exists at all, which only happens at top-out.
pub fn plan_move(
    state: &GameState,
    risk: &mut RiskTracker,
    weights: &EvalWeights,
) -> Option<Placement> {
    let active = state.active()?;
    if state.game_over() {
        return None;
    }

    let board = state.board();
    let high_risk = risk.update(board.stack_height(), board.rows());
    let next = state.next_piece();

    let mut candidates = Vec::new();
    first_ply(board, active.kind, false, high_risk, weights, &mut candidates);
    if state.can_hold() {
        // With an empty hold slot, holding promotes the preview piece.
        let alternative = state.hold_piece().unwrap_or(next);
        if alternative != active.kind {
            first_ply(board, alternative, true, high_risk, weights, &mut candidates);
        }
    }
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|a, b| b.first_score.total_cmp(&a.first_score));
    candidates.truncate(SEARCH_BEAM);

    // Second ply always uses the preview piece. After a hold of an empty
    // slot the real follow-up piece is a fresh draw; the preview is still
    // the best available stand-in.
    let mut best: Option<Placement> = None;
    for c in &candidates {
        let reply = best_reply(&c.board, next, high_risk, weights);
        let total = c.first_score + reply.unwrap_or(DEAD_REPLY);
        let better = match &best {
            Some(p) => total > p.score,
            None => true,
        };
        if better {
            best = Some(Placement {
                use_hold: c.use_hold,
                rotations: c.rotations,
                x: c.x,
                score: total,
            });
        }
    }
    best
}
