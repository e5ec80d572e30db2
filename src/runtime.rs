//! `Runtime`: the startup-constructed bundle of immutable, shared handles
//! every scenario is given a reference to (§9 "Global singletons" note).

use crate::fuel::FuelBehaviorModel;
use crate::iteration::TaskLimiter;
use crate::settings::Settings;
use std::sync::Arc;

/// Replaces the source's process-wide singletons (`Settings`, fuel lookup,
/// task limiter) with one value constructed once at startup and threaded
/// through `Scenario::new` by reference, per the Design Notes in §9.
pub struct Runtime {
    pub settings: Arc<Settings>,
    pub fuel_model: Arc<dyn FuelBehaviorModel>,
    pub task_limiter: TaskLimiter,
}

impl Runtime {
    #[must_use]
    pub fn new(
        settings: Settings,
        fuel_model: Arc<dyn FuelBehaviorModel>,
        scenarios_per_iteration: usize,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fuel_model,
            task_limiter: TaskLimiter::hardware_default(scenarios_per_iteration),
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("settings", &self.settings)
            .field("task_limiter", &self.task_limiter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;

    #[test]
    fn builds_with_hardware_default_limiter() {
        let runtime = Runtime::new(Settings::default(), Arc::new(SimplifiedFbpModel::fbp_default()), 4);
        assert!(runtime.task_limiter.bound() >= 4);
    }
}
