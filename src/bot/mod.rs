//! Autoplay: board evaluation, placement search and the action driver.

pub mod driver;
pub mod evaluator;
pub mod search;

pub use driver::Autopilot;
pub use evaluator::{evaluate, EvalWeights};
pub use search::{plan_move, Placement, RiskTracker, SEARCH_BEAM};
