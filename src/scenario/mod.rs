//! The scenario event loop: the core Monte-Carlo replicate engine (§4.1-4.3).

mod event;
mod extinction;
mod observer;
mod scenario;

pub use event::{Event, EventQueue, EventType};
pub use extinction::{passes_spread_gate, survives, ThresholdVector};
pub use observer::{ObserverRegistry, ScenarioNotification, ScenarioObserver};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioState, Snapshot};
