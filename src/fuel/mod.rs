//! The fuel-behaviour boundary: the pure `fuel × slope × aspect × weather →
//! SpreadInfo` function is treated as an external collaborator (§1
//! Out of Scope), reached only through the [`FuelBehaviorModel`] trait.
//!
//! This module ships one concrete implementation, [`SimplifiedFbpModel`],
//! good enough to drive the engine and its tests end to end. It is a
//! deliberately simplified stand-in — not a certified FBP system — grounded
//! in the same Rothermel-family spread-rate structure the teacher crate
//! uses for its (also simplified, Australian-calibrated) fire physics.

mod model;
mod simplified;

pub use model::{FuelBehaviorModel, FuelWeatherInputs, SpreadInfo};
pub use simplified::SimplifiedFbpModel;
