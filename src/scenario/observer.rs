//! Burn observers: scenario lifecycle notifications, decoupled from a
//! `Scenario` reference (§9 "Cyclic ownership" redesign note).
//!
//! Observers are handed a scenario id, not a pointer to the scenario
//! itself — the dispatch table pattern the original's `Model ↔ Scenario ↔
//! Observer` cycle is replaced with. Anything an observer needs to know
//! about scenario state travels in the notification payload.

use std::sync::Arc;

/// A notification emitted by a scenario's event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioNotification {
    /// A cell was just burned for the first time.
    CellBurned {
        scenario_id: u32,
        cell_hash: u32,
        time: f64,
        intensity_kw_m: f64,
    },
    /// The scenario reached `DONE`.
    Finished { scenario_id: u32, final_size_ha: f64 },
    /// The scenario was cancelled before reaching `DONE`.
    Cancelled { scenario_id: u32, final_size_ha: f64 },
}

/// Implemented by anything that wants scenario lifecycle notifications.
pub trait ScenarioObserver: Send + Sync {
    fn notify(&self, event: ScenarioNotification);
}

/// Holds zero or more observers and fans a notification out to all of
/// them. Scenarios own one of these (not the other way around), matching
/// the "model owns scenarios" half of the redesign note; observers never
/// hold a reference back to the scenario.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn ScenarioObserver>>,
}

impl ObserverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Arc<dyn ScenarioObserver>) {
        self.observers.push(observer);
    }

    pub fn dispatch(&self, event: ScenarioNotification) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("count", &self.observers.len())
            .finish()
    }
}
