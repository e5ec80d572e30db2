//! The iteration/Monte-Carlo controller: replicates scenarios across
//! random seeds, aggregates sizes, applies the stopping rules (§4.6).

use crate::grid::{BurnedDataPool, Grid, Ignition, ResolvedIgnition};
use crate::iteration::stats::{z_score_for_confidence_level, RunningStats};
use crate::iteration::surface::surface_ignitions;
use crate::probability::ProbabilityMap;
use crate::runtime::Runtime;
use crate::scenario::{Scenario, ScenarioState};
use crate::weather::WeatherStream;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::info;

/// One weather stream paired with the ignitions to run under it; the
/// cross-product of scenario inputs the controller replicates (§4.6:
/// "read scenarios from weather x ignition cross product").
pub struct ScenarioSpec {
    pub weather: Arc<WeatherStream>,
    pub ignition: Ignition,
}

/// The terminal state of [`IterationController::run_scenarios`], matching
/// the "Bounded runtime" class of §7: not an error, just a reason the loop
/// stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stopped because the confidence test passed (or deterministic mode's
    /// single-iteration rule, or surface mode's one-pass rule).
    Completed { iterations: u32 },
    TimedOut { iterations: u32 },
    CountLimitReached { iterations: u32 },
}

/// Orchestrates iterations of scenario replicates against one grid and
/// weather/ignition cross product, publishing into a shared
/// [`ProbabilityMap`] and applying the §4.6 stopping rules.
pub struct IterationController {
    grid: Arc<Grid>,
    probability_map: Arc<ProbabilityMap>,
    burned_pool: Arc<BurnedDataPool>,
    sizes: RunningStats,
    iteration_means: RunningStats,
    iteration_pct95: RunningStats,
    next_scenario_id: AtomicU32,
}

impl IterationController {
    #[must_use]
    pub fn new(grid: Arc<Grid>, probability_map: Arc<ProbabilityMap>) -> Self {
        Self {
            grid,
            probability_map,
            burned_pool: Arc::new(BurnedDataPool::new()),
            sizes: RunningStats::new(),
            iteration_means: RunningStats::new(),
            iteration_pct95: RunningStats::new(),
            next_scenario_id: AtomicU32::new(1),
        }
    }

    #[must_use]
    pub fn sizes(&self) -> &RunningStats {
        &self.sizes
    }

    /// Resolve each [`ScenarioSpec`] into a ready-to-run `Scenario`, and the
    /// deterministic per-scenario RNG seed pair for a given iteration index.
    fn build_scenarios(
        &self,
        specs: &[ScenarioSpec],
        runtime: &Runtime,
        iteration_index: u32,
    ) -> crate::error::Result<Vec<(Scenario, u64, u64)>> {
        let mut scenarios = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let resolved: ResolvedIgnition = spec.ignition.resolve(&self.grid)?;
            let id = self.next_scenario_id.fetch_add(1, Ordering::Relaxed);
            let seed_spread = seed_from(iteration_index, i as u32, 0);
            let seed_extinction = seed_from(iteration_index, i as u32, 1);
            let mut scenario = Scenario::new(
                id,
                self.grid.clone(),
                runtime.fuel_model.clone(),
                runtime.settings.clone(),
                spec.weather.clone(),
                resolved,
                crate::scenario::ObserverRegistry::new(),
            );
            scenario.set_burned_buffer(self.burned_pool.acquire(self.grid.cell_count()));
            scenarios.push((scenario, seed_spread, seed_extinction));
        }
        Ok(scenarios)
    }

    /// Run iterations of `specs` until a stopping rule trips.
    ///
    /// # Errors
    /// Propagates ignition-resolution failures (§7 "Fatal configuration").
    pub fn run_scenarios(
        &mut self,
        specs: Vec<ScenarioSpec>,
        runtime: &Runtime,
    ) -> crate::error::Result<RunOutcome> {
        let start = Instant::now();
        let cancel = Arc::new(AtomicBool::new(false));
        let mut iterations: u32 = 0;

        let surface = runtime.settings.surface;
        let specs = if surface {
            let weather = specs
                .first()
                .map(|s| s.weather.clone())
                .ok_or(crate::error::FirefrontError::SurfaceModeRequiresWeatherStream)?;
            surface_ignitions(&self.grid)
                .into_iter()
                .map(|ignition| ScenarioSpec {
                    weather: weather.clone(),
                    ignition,
                })
                .collect::<Vec<_>>()
        } else {
            specs
        };

        loop {
            let scenario_builds = self.build_scenarios(&specs, runtime, iterations)?;
            info!(iteration = iterations, scenarios = scenario_builds.len(), "iteration start");

            let iteration_sizes = Arc::new(Mutex::new(Vec::new()));
            let any_completed = Arc::new(AtomicBool::new(false));

            let tasks: Vec<Box<dyn FnOnce() + Send>> = scenario_builds
                .into_iter()
                .map(|(mut scenario, seed_spread, seed_extinction)| {
                    let probability_map = self.probability_map.clone();
                    let burned_pool = self.burned_pool.clone();
                    let settings = runtime.settings.clone();
                    let cancel = cancel.clone();
                    let iteration_sizes = iteration_sizes.clone();
                    let any_completed = any_completed.clone();
                    let task: Box<dyn FnOnce() + Send> = Box::new(move || {
                        scenario.reset(seed_spread, seed_extinction);
                        let outcome = scenario.run(&cancel);
                        if scenario.state() == ScenarioState::Done {
                            any_completed.store(true, Ordering::Relaxed);
                        }
                        iteration_sizes
                            .lock()
                            .expect("iteration sizes mutex poisoned")
                            .push(outcome.final_size_ha);
                        let accepted = iterations > 0 || any_completed.load(Ordering::Relaxed);
                        probability_map.record_scenario(outcome.cancelled, accepted);
                        for snapshot in &outcome.snapshots {
                            probability_map.publish(
                                &snapshot.intensity,
                                snapshot.time,
                                &settings,
                                outcome.cancelled,
                                accepted,
                            );
                        }
                        burned_pool.release(scenario.into_burned_buffer());
                    });
                    task
                })
                .collect();

            runtime.task_limiter.run_all(tasks);

            let this_iteration_sizes = Arc::try_unwrap(iteration_sizes)
                .map(|m| m.into_inner().expect("iteration sizes mutex poisoned"))
                .unwrap_or_default();
            let mut local = RunningStats::new();
            for &v in &this_iteration_sizes {
                self.sizes.push(v);
                local.push(v);
            }
            self.iteration_means.push(local.mean());
            self.iteration_pct95.push(local.percentile_95());
            iterations += 1;

            if surface {
                info!(iterations, "surface mode: stopping after single pass");
                return Ok(RunOutcome::Completed { iterations });
            }
            if runtime.settings.deterministic {
                info!(iterations, "deterministic mode: stopping after first iteration");
                return Ok(RunOutcome::Completed { iterations });
            }
            if start.elapsed().as_secs_f64() >= runtime.settings.maximum_time_seconds {
                info!(iterations, "stopping: wall-clock limit reached");
                return Ok(RunOutcome::TimedOut { iterations });
            }
            if self.sizes.count() as u64 >= runtime.settings.maximum_count_simulations {
                info!(iterations, "stopping: scenario count limit reached");
                return Ok(RunOutcome::CountLimitReached { iterations });
            }

            let z = z_score_for_confidence_level(runtime.settings.confidence_level);
            let tol_sizes = runtime.settings.threshold_scenario_weight * self.sizes.mean().abs().max(1.0);
            let tol_means = runtime.settings.threshold_daily_weight * self.iteration_means.mean().abs().max(1.0);
            let tol_pct = runtime.settings.threshold_hourly_weight * self.iteration_pct95.mean().abs().max(1.0);

            let confident = self.sizes.is_confident(z, tol_sizes)
                && self.iteration_means.is_confident(z, tol_means)
                && self.iteration_pct95.is_confident(z, tol_pct);

            if confident {
                info!(iterations, "stopping: confidence criterion satisfied");
                return Ok(RunOutcome::Completed { iterations });
            }

            let runs_required = [
                self.sizes.runs_required(z, tol_sizes),
                self.iteration_means.runs_required(z, tol_means),
                self.iteration_pct95.runs_required(z, tol_pct),
            ]
            .into_iter()
            .max()
            .unwrap_or(0);
            info!(iterations, runs_required, "confidence not yet satisfied, continuing");
        }
    }
}

/// Deterministic per-scenario seed, mirroring §5's "seeded from (role,
/// start_day, latitude_bits, longitude_bits)" without the geographic
/// inputs this engine's `Scenario` does not carry — `role` is `salt`
/// (0 = spread, 1 = extinction), `start_day` stands in as the iteration
/// index, and the scenario index within the iteration plays the spatial
/// role. Two calls with the same inputs always reproduce the same seed.
fn seed_from(iteration_index: u32, scenario_index: u32, salt: u32) -> u64 {
    let mut h = 0xcbf2_9ce4_8422_2325_u64;
    for value in [iteration_index, scenario_index, salt] {
        h ^= u64::from(value);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}
