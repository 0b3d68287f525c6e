//! Autopilot: turns search placements into queued game commands.
//!
//! The pilot plans when its queue is empty, then feeds exactly one command
//! per invocation so a session being driven still animates like keyboard
//! play. Callers invoke it on a fixed cadence (`AUTOPILOT_STEP_MS`). Any
//! manual interruption should discard the queue: the plan assumed a board
//! that no longer exists.

use std::collections::VecDeque;

use crate::bot::evaluator::EvalWeights;
use crate::bot::search::{plan_move, Placement, RiskTracker};
use crate::core::game_state::{ActivePiece, GameState};
use crate::types::GameAction;

/// Plans placements and doles out the commands that execute them.
#[derive(Debug)]
pub struct Autopilot {
    weights: EvalWeights,
    risk: RiskTracker,
    queue: VecDeque<GameAction>,
    enabled: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            weights: EvalWeights::default(),
            risk: RiskTracker::new(),
            queue: VecDeque::new(),
            enabled: true,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: EvalWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn autoplay on or off. Turning it off discards the current plan
    /// so re-enabling replans against the board as it stands.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.queue.clear();
        }
        self.enabled = enabled;
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Commands still pending for the current plan.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop the current plan. Call after any manual command.
    pub fn interrupt(&mut self) {
        self.queue.clear();
    }

    /// Next command to apply, planning first when the queue is empty.
    /// `None` while paused, after top-out, or when no placement exists.
    pub fn next_action(&mut self, state: &GameState) -> Option<GameAction> {
        if !self.enabled {
            return None;
        }
        if state.game_over() || state.paused() {
            self.queue.clear();
            return None;
        }
        if self.queue.is_empty() {
            let plan = plan_move(state, &mut self.risk, &self.weights)?;
            self.enqueue(state, &plan);
        }
        self.queue.pop_front()
    }

    fn enqueue(&mut self, state: &GameState, plan: &Placement) {
        let cols = state.board().cols();
        let kind = if plan.use_hold {
            self.queue.push_back(GameAction::Hold);
            state
                .hold_piece()
                .unwrap_or_else(|| state.next_piece())
        } else {
            match state.active() {
                Some(p) => p.kind,
                None => return,
            }
        };

        for _ in 0..plan.rotations {
            self.queue.push_back(GameAction::RotateCw);
        }

        let spawn_x = ActivePiece::spawn(kind, cols).x;
        let dx = plan.x - spawn_x;
        let step = if dx < 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        for _ in 0..dx.abs() {
            self.queue.push_back(step);
        }

        self.queue.push_back(GameAction::HardDrop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn session(seed: u32) -> GameState {
        GameState::new(GameConfig::new(10, 20).with_seed(seed)).unwrap()
    }

    #[test]
    fn one_action_per_invocation() {
        let mut pilot = Autopilot::new();
        let state = session(42);

        // First call plans and hands out one command.
        pilot.next_action(&state).unwrap();
        let pending = pilot.pending();
        if pending > 0 {
            // Further calls drain exactly one command each.
            pilot.next_action(&state).unwrap();
            assert_eq!(pilot.pending(), pending - 1);
        }
    }

    #[test]
    fn plan_ends_in_a_hard_drop_and_locks() {
        let mut pilot = Autopilot::new();
        let mut state = session(42);

        let mut last = None;
        for _ in 0..64 {
            let Some(action) = pilot.next_action(&state) else {
                break;
            };
            state.apply_action(action);
            last = Some(action);
            if pilot.pending() == 0 {
                break;
            }
        }
        assert_eq!(last, Some(GameAction::HardDrop));
        assert!(state.board().stack_height() > 0);
    }

    #[test]
    fn disabled_pilot_stays_silent() {
        let mut pilot = Autopilot::new();
        let state = session(42);

        pilot.next_action(&state);
        pilot.set_enabled(false);
        assert_eq!(pilot.pending(), 0);
        assert_eq!(pilot.next_action(&state), None);

        pilot.set_enabled(true);
        assert!(pilot.next_action(&state).is_some());
    }

    #[test]
    fn interrupt_discards_the_plan() {
        let mut pilot = Autopilot::new();
        let state = session(42);

        pilot.next_action(&state);
        if pilot.pending() > 0 {
            pilot.interrupt();
            assert_eq!(pilot.pending(), 0);
        }
    }

    #[test]
    fn silent_while_paused_or_over() {
        let mut pilot = Autopilot::new();
        let mut state = session(42);
        state.apply_action(GameAction::Pause);
        assert_eq!(pilot.next_action(&state), None);

        state.apply_action(GameAction::Pause);
        // Block the spawn rows (gap in the last column, so nothing
        // clears at lock) and force a top-out.
        for y in 0..4 {
            for x in 0..9 {
                state.board_mut().set(x, y, 1);
            }
        }
        state.hard_drop();
        assert!(state.game_over());
        assert_eq!(pilot.next_action(&state), None);
    }

    #[test]
    fn drives_a_full_session_without_stalling() {
        let mut pilot = Autopilot::new();
        let mut state = session(7);

        let mut locks = 0;
        let mut steps = 0;
        while locks < 30 && !state.game_over() {
            steps += 1;
            assert!(steps < 10_000, "pilot must keep making progress");
            match pilot.next_action(&state) {
                Some(action) => {
                    let was_drop = action == GameAction::HardDrop;
                    state.apply_action(action);
                    if was_drop {
                        locks += 1;
                    }
                }
                None => break,
            }
        }
        assert!(locks >= 30 || state.game_over());
    }
}
