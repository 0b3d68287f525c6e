//! Line-clear scoring, spin bonuses and level progression.
//!
//! Two tables: the base per-line-count table and a larger spin table that
//! replaces it when the lock was a spin. Both scale with the current
//! level; a zero-line spin earns a small flat bonus instead.
//!
//! Level rule: score threshold. The level advances one step whenever a
//! clear brings the score to `level * 1000` or beyond; locks that clear
//! nothing never level up. See DESIGN.md for the rationale.

use serde::Serialize;

use crate::types::{LEVEL_UP_SCORE_STEP, LINE_SCORES, SPIN_SCORES, SPIN_ZERO_LINE_BONUS};

/// Score, level and clear statistics for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Clears by size; index 1..=4 used.
    pub clear_counts: [u32; 5],
}

impl ScoreState {
    pub fn new(start_level: u32) -> Self {
        Self {
            score: 0,
            level: start_level,
            lines: 0,
            clear_counts: [0; 5],
        }
    }

    /// Record one lock outcome: `lines` rows cleared, `spin` whether the
    /// lock qualified as a spin. Returns the points awarded.
    pub fn record_lock(&mut self, lines: usize, spin: bool) -> u32 {
        let points = lock_points(lines, spin, self.level);
        self.score = self.score.saturating_add(points);

        if lines > 0 {
            self.lines += lines as u32;
            if lines < self.clear_counts.len() {
                self.clear_counts[lines] += 1;
            }
            // One step per clear, even when a large bonus overshoots the
            // next threshold as well.
            if self.score >= self.level.saturating_mul(LEVEL_UP_SCORE_STEP) {
                self.level += 1;
            }
        }

        points
    }
}

/// Points for a lock, before it is applied to a `ScoreState`.
pub fn lock_points(lines: usize, spin: bool, level: u32) -> u32 {
    if spin {
        if lines == 0 {
            return SPIN_ZERO_LINE_BONUS;
        }
        let base = SPIN_SCORES.get(lines).copied().unwrap_or(SPIN_SCORES[4]);
        return base.saturating_mul(level);
    }
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_table_scales_with_level() {
        assert_eq!(lock_points(1, false, 1), 100);
        assert_eq!(lock_points(2, false, 1), 300);
        assert_eq!(lock_points(3, false, 1), 500);
        assert_eq!(lock_points(4, false, 1), 800);
        assert_eq!(lock_points(1, false, 5), 500);
        assert_eq!(lock_points(4, false, 100), 80000);
    }

    #[test]
    fn spin_table_overrides_base() {
        assert_eq!(lock_points(1, true, 1), 800);
        assert_eq!(lock_points(2, true, 1), 1200);
        assert_eq!(lock_points(3, true, 1), 1600);
        assert_eq!(lock_points(2, true, 3), 3600);
    }

    #[test]
    fn zero_line_spin_gets_flat_bonus() {
        assert_eq!(lock_points(0, true, 1), 100);
        assert_eq!(lock_points(0, true, 50), 100);
        assert_eq!(lock_points(0, false, 1), 0);
    }

    #[test]
    fn level_advances_on_score_threshold() {
        let mut s = ScoreState::new(1);
        // 800 points: still level 1.
        s.record_lock(4, false);
        assert_eq!(s.level, 1);
        // +300 -> 1100 >= 1000: level 2.
        s.record_lock(2, false);
        assert_eq!(s.level, 2);
        assert_eq!(s.lines, 6);
    }

    #[test]
    fn zero_line_lock_never_levels_up() {
        let mut s = ScoreState::new(1);
        s.score = 5000;
        s.record_lock(0, false);
        assert_eq!(s.level, 1);
    }

    #[test]
    fn clear_counts_track_sizes() {
        let mut s = ScoreState::new(1);
        s.record_lock(1, false);
        s.record_lock(1, false);
        s.record_lock(4, false);
        assert_eq!(s.clear_counts[1], 2);
        assert_eq!(s.clear_counts[4], 1);
        assert_eq!(s.clear_counts[2], 0);
    }
}
