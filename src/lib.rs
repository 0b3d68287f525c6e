//! Falling-block game engine with a built-in autopilot.
//!
//! The crate splits into two layers:
//!
//! - [`core`]: the deterministic simulation. Board grid, shape catalog,
//!   7-bag randomizer, gravity and lock delay, hold, spin detection and
//!   scoring, all driven by explicit millisecond ticks.
//! - [`bot`]: the autopilot. A weighted board evaluator, a two-ply
//!   placement search and a driver that replays plans as ordinary game
//!   commands.
//!
//! A session is a [`core::GameState`] built from a [`config::GameConfig`];
//! everything is seeded and tick-driven, so whole games replay exactly.

pub mod bot;
pub mod config;
pub mod core;
pub mod types;

pub use bot::{Autopilot, EvalWeights};
pub use config::{ConfigError, GameConfig};
pub use core::{GameSnapshot, GameState};
pub use types::{GameAction, PieceKind, Spin};
