//! Board evaluation heuristic for the autopilot.
//!
//! Scores a board as it would look after a candidate placement. The
//! strategy keeps the rightmost column free as an accumulator well, builds
//! a flat, hole-free stack on the remaining columns, and cashes the well
//! in with 4-line clears. A high-risk mode flips the incentives toward
//! clearing anything at all when the stack gets tall.
//!
//! Every coefficient lives in `EvalWeights` so tuning runs can serialize
//! and diff weight sets. All arithmetic is f64 and the evaluation is
//! bit-reproducible for a given board and weight set.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;

/// Tunable coefficients. The defaults are the shipped strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per-line-count bonus in normal mode; a single line is discouraged.
    pub line_bonus: [f64; 5],
    /// Per-line-count bonus when the stack is dangerously tall.
    pub line_bonus_high_risk: [f64; 5],

    /// Accumulator-well reward: depth squared coefficient and flat base.
    pub well_depth_reward: f64,
    pub well_reward_base: f64,
    /// Penalty for burying the well mouth while the stack is still low.
    pub well_blocked_penalty: f64,
    /// Reward (emergency escape hatch) for filling the well column when
    /// the left stack is already tall or complete.
    pub well_fill_reward: f64,
    pub well_fill_reward_base: f64,
    /// Quadratic penalty for wells anywhere else.
    pub side_well_penalty: f64,
    /// Penalty when blocks pile above the well mouth.
    pub well_mouth_penalty: f64,
    pub well_mouth_penalty_emergency: f64,
    /// Linear per-depth well penalty used in high-risk mode.
    pub well_depth_penalty_high_risk: f64,

    /// Reward for densely filled rows in the stacking region.
    pub row_fill_reward: f64,

    pub aggregate_height_penalty: f64,
    pub max_height_penalty: f64,
    /// Multiplier applied to height and hole penalties in high-risk mode.
    pub high_risk_multiplier: f64,

    pub row_transition_penalty: f64,
    pub col_transition_penalty: f64,
    pub bumpiness_penalty: f64,

    pub hole_penalty: f64,
    pub covering_block_penalty: f64,

    /// Penalties that keep the stacking region level.
    pub spread_penalty: f64,
    pub low_column_penalty: f64,

    /// Discourages cashing in fewer than 4 lines while still building.
    pub small_clear_penalty: f64,

    /// Preference for lower landing rows.
    pub landing_height_penalty: f64,

    /// Stack height (columns left of the well) that triggers emergency
    /// well handling.
    pub emergency_height: usize,
    /// Completed left-region rows required before filling the well is
    /// acceptable.
    pub well_fill_ready_rows: usize,
    /// Thresholds for the small-clear penalty.
    pub small_clear_min_rows: usize,
    pub small_clear_max_height: usize,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            line_bonus: [0.0, -5_000.0, 5_000.0, 20_000.0, 1_000_000.0],
            line_bonus_high_risk: [0.0, 20_000.0, 50_000.0, 120_000.0, 400_000.0],

            well_depth_reward: 20_000.0,
            well_reward_base: 100_000.0,
            well_blocked_penalty: 400_000.0,
            well_fill_reward: 200_000.0,
            well_fill_reward_base: 5_000_000.0,
            side_well_penalty: 100_000.0,
            well_mouth_penalty: 10_000.0,
            well_mouth_penalty_emergency: 1_000.0,
            well_depth_penalty_high_risk: 1_000.0,

            row_fill_reward: 1_000.0,

            aggregate_height_penalty: 60.0,
            max_height_penalty: 800.0,
            high_risk_multiplier: 60.0,

            row_transition_penalty: 3_000.0,
            col_transition_penalty: 3_000.0,
            bumpiness_penalty: 300.0,

            hole_penalty: 5_000_000.0,
            covering_block_penalty: 500_000.0,

            spread_penalty: 50_000.0,
            low_column_penalty: 30_000.0,

            small_clear_penalty: 800_000.0,

            landing_height_penalty: 200.0,

            emergency_height: 6,
            well_fill_ready_rows: 6,
            small_clear_min_rows: 3,
            small_clear_max_height: 6,
        }
    }
}

/// Raw surface statistics extracted in one pass over the board.
#[derive(Debug, Clone)]
struct Features {
    heights: Vec<usize>,
    aggregate_height: usize,
    max_height: usize,
    row_transitions: usize,
    col_transitions: usize,
    holes: usize,
    covering_blocks: usize,
    /// (depth, column) for every column lower than both neighbors; the
    /// outer walls count as full-height neighbors.
    wells: Vec<(usize, usize)>,
}

fn extract(board: &Board) -> Features {
    let cols = board.cols();
    let rows = board.rows();

    let heights: Vec<usize> = (0..cols).map(|x| board.column_height(x)).collect();
    let aggregate_height = heights.iter().sum();
    let max_height = heights.iter().copied().max().unwrap_or(0);

    let mut row_transitions = 0;
    for y in 0..rows as i32 {
        for x in 0..cols as i32 - 1 {
            if board.is_occupied(x, y) != board.is_occupied(x + 1, y) {
                row_transitions += 1;
            }
        }
        if !board.is_occupied(0, y) {
            row_transitions += 1;
        }
        if !board.is_occupied(cols as i32 - 1, y) {
            row_transitions += 1;
        }
    }

    let mut col_transitions = 0;
    for x in 0..cols as i32 {
        for y in 0..rows as i32 - 1 {
            if board.is_occupied(x, y) != board.is_occupied(x, y + 1) {
                col_transitions += 1;
            }
        }
        if !board.is_occupied(x, rows as i32 - 1) {
            col_transitions += 1;
        }
    }

    let mut holes = 0;
    let mut covering_blocks = 0;
    for x in 0..cols as i32 {
        let mut blocks_above = 0;
        for y in 0..rows as i32 {
            if board.is_occupied(x, y) {
                blocks_above += 1;
            } else if blocks_above > 0 {
                holes += 1;
                covering_blocks += blocks_above;
            }
        }
    }

    let mut wells = Vec::new();
    for x in 0..cols {
        let left = if x == 0 { rows } else { heights[x - 1] };
        let right = if x == cols - 1 { rows } else { heights[x + 1] };
        let h = heights[x];
        if left > h && right > h {
            wells.push((left.min(right) - h, x));
        }
    }

    Features {
        heights,
        aggregate_height,
        max_height,
        row_transitions,
        col_transitions,
        holes,
        covering_blocks,
        wells,
    }
}

/// Score a post-placement board. Larger is better.
///
/// `cleared` is the number of rows the placement completed, `landing_y`
/// the top row of the locked piece, and `high_risk` whether the search
/// layer considers the stack dangerously tall.
pub fn evaluate(
    board: &Board,
    cleared: usize,
    landing_y: i32,
    high_risk: bool,
    w: &EvalWeights,
) -> f64 {
    let f = extract(board);
    let cols = board.cols();
    let rows = board.rows();
    let well_col = cols - 1;

    let left = &f.heights[..well_col];
    let left_max = left.iter().copied().max().unwrap_or(0);
    let left_min = left.iter().copied().min().unwrap_or(0);
    let emergency = left_max > w.emergency_height;

    // Rows in the stacking region that are already complete and only wait
    // on the well column.
    let mut left_full_rows = 0;
    let mut row_fill = 0.0;
    for y in 0..rows as i32 {
        let filled = (0..well_col as i32)
            .filter(|&x| board.is_occupied(x, y))
            .count();
        if filled == well_col {
            left_full_rows += 1;
        }
        if filled > 0 {
            row_fill += (filled * filled) as f64 * w.row_fill_reward;
        }
    }

    let mut well_score = 0.0;
    if high_risk {
        for &(depth, _) in &f.wells {
            well_score -= depth as f64 * w.well_depth_penalty_high_risk;
        }
    } else {
        let inner = f.heights[well_col - 1];
        let outer = f.heights[well_col];
        if inner > outer {
            // The accumulator well is open; reward its depth, but only as
            // deep as the stack next to it can actually use.
            let effective = (inner - outer).min(left_max + 1) as f64;
            well_score += effective * effective * w.well_depth_reward + w.well_reward_base;
        } else if outer > inner {
            let overhang = (outer - inner) as f64;
            if left_full_rows < w.well_fill_ready_rows && !emergency {
                well_score -= overhang * w.well_blocked_penalty;
            } else {
                well_score += overhang * w.well_fill_reward + w.well_fill_reward_base;
            }
        }
        for &(depth, col) in &f.wells {
            if col != well_col {
                well_score -= (depth * depth) as f64 * w.side_well_penalty;
            }
        }
        if f.heights[well_col] > left_min + 2 {
            let mouth = if emergency {
                w.well_mouth_penalty_emergency
            } else {
                w.well_mouth_penalty
            };
            well_score -= (f.heights[well_col] - left_min) as f64 * mouth;
        }
    }

    // Keep the stacking region level: every column below the tallest one
    // is charged quadratically, a one-deep dip included, so dips get
    // filled before they deepen. The spread term only kicks in once the
    // surface is more than one row uneven.
    let mut low_point_penalty = 0.0;
    if left_max - left_min > 1 {
        low_point_penalty += (left_max - left_min) as f64 * w.spread_penalty;
    }
    for &h in left {
        let gap = left_max - h;
        if gap >= 1 {
            low_point_penalty += (gap * gap) as f64 * w.low_column_penalty;
        }
    }

    // Cashing in a partial clear tears rows out of a stack still under
    // construction.
    let small_clear = cleared > 0
        && cleared < 4
        && left_full_rows < w.small_clear_min_rows
        && !high_risk
        && f.max_height <= w.small_clear_max_height;
    let small_clear_penalty = if small_clear { w.small_clear_penalty } else { 0.0 };

    let mut bumpiness = 0.0;
    for x in 0..well_col - 1 {
        let diff = f.heights[x] as f64 - f.heights[x + 1] as f64;
        bumpiness += diff * diff;
    }

    let line_bonus = if high_risk {
        w.line_bonus_high_risk[cleared.min(4)]
    } else {
        w.line_bonus[cleared.min(4)]
    };

    let severity = if high_risk { w.high_risk_multiplier } else { 1.0 };
    let landing_penalty = (rows as i32 - landing_y) as f64 * w.landing_height_penalty;

    line_bonus + well_score + row_fill
        - f.aggregate_height as f64 * w.aggregate_height_penalty * severity
        - f.row_transitions as f64 * w.row_transition_penalty
        - f.col_transitions as f64 * w.col_transition_penalty
        - bumpiness * w.bumpiness_penalty
        - low_point_penalty
        - small_clear_penalty
        - f.holes as f64 * w.hole_penalty * severity
        - f.covering_blocks as f64 * w.covering_block_penalty
        - f.max_height as f64 * w.max_height_penalty * severity
        - landing_penalty
}
