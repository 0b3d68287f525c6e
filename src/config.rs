//! Session configuration and construction-time validation.
//!
//! Invalid dimensions or levels are fatal at construction; nothing in the
//! running simulation revalidates them.

use serde::{Deserialize, Serialize};

use crate::core::shapes::MATRIX_MAX;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS};

/// Construction-time configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Board narrower or shorter than the largest shape matrix.
    InvalidDimensions { cols: usize, rows: usize },
    /// Start level must be at least 1 (scores are level-multiplied).
    InvalidStartLevel(u32),
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::InvalidDimensions { .. } => "invalid_dimensions",
            ConfigError::InvalidStartLevel(_) => "invalid_start_level",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDimensions { cols, rows } => {
                write!(f, "board dimensions {cols}x{rows} are too small")
            }
            ConfigError::InvalidStartLevel(level) => {
                write!(f, "start level {level} is out of range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    pub start_level: u32,
    pub hold_enabled: bool,
    pub seed: u32,
}

impl GameConfig {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_level(mut self, start_level: u32) -> Self {
        self.start_level = start_level;
        self
    }

    /// Validate the configuration. Every shape matrix must fit the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < MATRIX_MAX || self.rows < MATRIX_MAX {
            return Err(ConfigError::InvalidDimensions {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.start_level == 0 {
            return Err(ConfigError::InvalidStartLevel(self.start_level));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            start_level: 1,
            hold_enabled: true,
            seed: 1,
        }
    }
}
