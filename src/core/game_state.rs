//! Session state: movement, rotation, lock delay, hold and spawning.
//!
//! Ties the board, bag, shapes and scoring together into the tick-driven
//! simulation. All command methods are no-ops returning `false` when the
//! session is paused, over, or the command would collide; nothing here
//! panics at runtime.

use crate::config::{ConfigError, GameConfig};
use crate::core::bag::SevenBag;
use crate::core::board::Board;
use crate::core::scoring::ScoreState;
use crate::core::shapes::{catalog, ShapeMatrix, KICK_OFFSETS};
use crate::types::{
    GameAction, PieceKind, Spin, BASE_DROP_MS, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MAX_TICK_MS,
    MIN_DROP_MS,
};

/// The falling piece. Exists only between spawn and lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Spawn a piece centered at the top of a board with `cols` columns.
    pub fn spawn(kind: PieceKind, cols: usize) -> Self {
        let matrix = catalog(kind);
        Self {
            kind,
            matrix,
            x: cols as i32 / 2 - matrix.size() as i32 / 2,
            y: 0,
        }
    }
}

/// Complete game session.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    bag: SevenBag,
    active: Option<ActivePiece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: ScoreState,
    lock_timer_ms: u32,
    lock_resets: u8,
    drop_timer_ms: u32,
    paused: bool,
    game_over: bool,
    last_action_was_rotate: bool,
    last_lock_was_spin: bool,
}

impl GameState {
    /// Build a session. Configuration errors are fatal here; nothing
    /// downstream revalidates dimensions.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut bag = SevenBag::new(config.seed);
        let next = bag.draw();
        let mut state = Self {
            config,
            board: Board::new(config.cols, config.rows),
            bag,
            active: None,
            next,
            hold: None,
            can_hold: true,
            score: ScoreState::new(config.start_level),
            lock_timer_ms: 0,
            lock_resets: 0,
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            last_action_was_rotate: false,
            last_lock_was_spin: false,
        };
        state.spawn_piece();
        Ok(state)
    }

    // --- query surface ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold && self.config.hold_enabled
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the most recent lock qualified as a spin.
    pub fn last_lock_was_spin(&self) -> bool {
        self.last_lock_was_spin
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Whether the active piece rests on the stack or the floor.
    pub fn is_grounded(&self) -> bool {
        match &self.active {
            Some(p) => self.board.collides(&p.matrix, p.x, p.y + 1),
            None => false,
        }
    }

    /// Row the active piece would occupy after dropping straight down.
    pub fn ghost_row(&self) -> Option<i32> {
        let p = self.active.as_ref()?;
        let mut y = p.y;
        while !self.board.collides(&p.matrix, p.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    #[cfg(test)]
    pub fn force_rotate_flag(&mut self, value: bool) {
        self.last_action_was_rotate = value;
    }

    // --- command surface ---

    /// Tentative move by (dx, dy); reverted on collision.
    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(p) = self.active else {
            return false;
        };
        if self.board.collides(&p.matrix, p.x + dx, p.y + dy) {
            return false;
        }
        self.active = Some(ActivePiece {
            x: p.x + dx,
            y: p.y + dy,
            ..p
        });
        self.last_action_was_rotate = false;
        self.after_successful_shift();
        true
    }

    /// Rotate with kick offsets; state unchanged when every kick collides.
    pub fn rotate(&mut self, dir: Spin) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(p) = self.active else {
            return false;
        };
        let rotated = p.matrix.rotated(dir);
        for (dx, dy) in KICK_OFFSETS {
            if !self.board.collides(&rotated, p.x + dx, p.y + dy) {
                self.active = Some(ActivePiece {
                    matrix: rotated,
                    x: p.x + dx,
                    y: p.y + dy,
                    ..p
                });
                self.last_action_was_rotate = true;
                self.after_successful_shift();
                return true;
            }
        }
        false
    }

    pub fn soft_drop(&mut self) -> bool {
        self.translate(0, 1)
    }

    /// Drop to the landing row and lock immediately. Returns the drop
    /// distance.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() || self.active.is_none() {
            return 0;
        }
        let mut distance = 0;
        while self.translate(0, 1) {
            distance += 1;
        }
        self.lock_active();
        distance
    }

    /// Swap the active piece with the hold slot; once per spawn.
    pub fn hold(&mut self) -> bool {
        if !self.playable() || !self.can_hold() {
            return false;
        }
        let Some(p) = self.active else {
            return false;
        };

        match self.hold {
            Some(held) => {
                let swapped = ActivePiece::spawn(held, self.config.cols);
                self.hold = Some(p.kind);
                if self.board.collides(&swapped.matrix, swapped.x, swapped.y) {
                    self.game_over = true;
                    self.active = None;
                    return false;
                }
                self.active = Some(swapped);
            }
            None => {
                self.hold = Some(p.kind);
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.last_action_was_rotate = false;
        true
    }

    /// Start over with a fresh board, carrying the RNG state forward so
    /// consecutive sessions see different bags.
    pub fn reset(&mut self, start_level: u32) {
        let config = GameConfig {
            start_level: start_level.max(1),
            seed: self.bag.seed(),
            ..self.config
        };
        // Dimensions already validated when this session was built.
        if let Ok(fresh) = Self::new(config) {
            *self = fresh;
        }
    }

    /// Apply a single command; `false` means it was refused or collided.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.translate(-1, 0),
            GameAction::MoveRight => self.translate(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if !self.playable() || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(Spin::Cw),
            GameAction::RotateCcw => self.rotate(Spin::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.reset(self.config.start_level);
                true
            }
        }
    }

    /// Advance the simulation by `dt_ms` of wall-clock time. Returns true
    /// when the tick moved or locked the active piece.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if !self.playable() || self.active.is_none() {
            return false;
        }
        let dt = dt_ms.min(MAX_TICK_MS);

        if self.is_grounded() {
            self.lock_timer_ms += dt;
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_active();
                return true;
            }
            return false;
        }

        self.drop_timer_ms += dt;
        let interval = self.gravity_interval_ms();
        if self.drop_timer_ms >= interval {
            self.drop_timer_ms = 0;
            return self.translate(0, 1);
        }
        false
    }

    /// Gravity interval for the current level: 1000ms shrinking by 10%
    /// per level, floored at 50ms.
    pub fn gravity_interval_ms(&self) -> u32 {
        let level = self.score.level.max(1);
        let ms = f64::from(BASE_DROP_MS) * 0.9_f64.powi(level as i32 - 1);
        (ms as u32).max(MIN_DROP_MS)
    }

    // --- internals ---

    /// Lock-timer handling shared by translate and rotate: while grounded
    /// a successful shift earns a capped timer reset; airborne the timer
    /// simply clears without consuming one.
    fn after_successful_shift(&mut self) {
        if self.is_grounded() {
            if self.lock_resets < LOCK_RESET_LIMIT {
                self.lock_timer_ms = 0;
                self.lock_resets += 1;
            }
        } else {
            self.lock_timer_ms = 0;
        }
    }

    /// Promote the preview piece to active and draw a new preview.
    /// A colliding spawn is the terminal top-out.
    fn spawn_piece(&mut self) {
        let piece = ActivePiece::spawn(self.next, self.config.cols);
        self.next = self.bag.draw();

        self.can_hold = true;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.drop_timer_ms = 0;
        self.last_action_was_rotate = false;

        if self.board.collides(&piece.matrix, piece.x, piece.y) {
            self.active = Some(piece);
            self.game_over = true;
            return;
        }
        self.active = Some(piece);
    }

    /// Merge the active piece, score the clear, spawn the next piece.
    fn lock_active(&mut self) {
        let Some(p) = self.active.take() else {
            return;
        };

        let spin = self.detect_spin(&p);
        self.board.merge(&p.matrix, p.x, p.y);
        let cleared = self.board.clear_full_rows();
        self.score.record_lock(cleared.len(), spin);
        self.last_lock_was_spin = spin;

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Spin test for the designated shape: at least 3 of the 4 corners of
    /// its 3x3 box occupied (walls and floor count), and the last
    /// successful action was a rotation.
    fn detect_spin(&self, p: &ActivePiece) -> bool {
        if p.kind != PieceKind::T || !self.last_action_was_rotate {
            return false;
        }
        let corners = [(0, 0), (2, 0), (0, 2), (2, 2)];
        let occupied = corners
            .iter()
            .filter(|&&(cx, cy)| {
                let ax = p.x + cx;
                let ay = p.y + cy;
                ax < 0
                    || ax >= self.board.cols() as i32
                    || ay >= self.board.rows() as i32
                    || (ay >= 0 && self.board.is_occupied(ax, ay))
            })
            .count();
        occupied >= 3
    }
}
