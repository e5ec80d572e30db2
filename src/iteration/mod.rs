//! Monte-Carlo iteration controller: replicate scenarios across random
//! seeds, aggregate sizes, apply stopping rules (§4.6).

mod controller;
mod limiter;
mod stats;
mod surface;

pub use controller::{IterationController, RunOutcome, ScenarioSpec};
pub use limiter::TaskLimiter;
pub use stats::{z_score_for_confidence_level, RunningStats};
pub use surface::surface_ignitions;
