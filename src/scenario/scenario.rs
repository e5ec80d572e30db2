//! The scenario event loop (§4.1-4.3): the core of the engine.

use crate::fuel::FuelBehaviorModel;
use crate::grid::{BurnedData, CellPointsMap, Grid, InnerPos, IntensityMap, ResolvedIgnition};
use crate::scenario::event::{Event, EventQueue, EventType};
use crate::scenario::extinction::{passes_spread_gate, survives, ThresholdVector};
use crate::scenario::observer::{ObserverRegistry, ScenarioNotification};
use crate::settings::Settings;
use crate::spread::SpreadCache;
use crate::weather::WeatherStream;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Lifecycle states of a [`Scenario`] (§3: `CREATED → READY → RUNNING →
/// DONE | CANCELLED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Created,
    Ready,
    Running,
    Done,
    Cancelled,
}

/// One probability-map publication point: an intensity snapshot taken at a
/// configured save time (§4.5).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,
    pub intensity: IntensityMap,
}

/// The outcome of running a scenario to completion or cancellation.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub final_size_ha: f64,
    pub cancelled: bool,
    pub snapshots: Vec<Snapshot>,
    pub oob_spread: u64,
}

/// One Monte-Carlo replicate: a single run of the fire from one ignition
/// under one weather stream and one pair of random-threshold seeds.
pub struct Scenario {
    id: u32,
    grid: Arc<Grid>,
    model: Arc<dyn FuelBehaviorModel>,
    settings: Arc<Settings>,
    weather: Arc<WeatherStream>,
    ignition: ResolvedIgnition,
    observers: ObserverRegistry,

    state: ScenarioState,
    cell_points: CellPointsMap,
    burned: BurnedData,
    intensity: IntensityMap,
    queue: EventQueue,
    spread_cache: SpreadCache,
    spread_thresholds: ThresholdVector,
    extinction_thresholds: ThresholdVector,
    save_times: Vec<f64>,
    snapshots: Vec<Snapshot>,
    current_time: f64,
    oob_spread: u64,
}

/// A sample advances a fixed small distance along its own direction before
/// the cell boundary test, so its angle stays well defined from the very
/// first step.
const IGNITION_SEED_OFFSET_M: f64 = 0.01;

impl Scenario {
    #[must_use]
    pub fn new(
        id: u32,
        grid: Arc<Grid>,
        model: Arc<dyn FuelBehaviorModel>,
        settings: Arc<Settings>,
        weather: Arc<WeatherStream>,
        ignition: ResolvedIgnition,
        observers: ObserverRegistry,
    ) -> Self {
        let cell_count = grid.cell_count();
        Self {
            id,
            grid,
            model,
            settings,
            weather,
            ignition,
            observers,
            state: ScenarioState::Created,
            cell_points: CellPointsMap::new(),
            burned: BurnedData::new(cell_count),
            intensity: IntensityMap::new(),
            queue: EventQueue::new(),
            spread_cache: SpreadCache::new(),
            spread_thresholds: ThresholdVector::deterministic(1),
            extinction_thresholds: ThresholdVector::deterministic(1),
            save_times: Vec::new(),
            snapshots: Vec::new(),
            current_time: 0.0,
            oob_spread: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScenarioState {
        self.state
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Number of cells currently marked burned (including ignition seeding
    /// before the event loop has run any SPREAD events).
    #[must_use]
    pub fn burned_count(&self) -> usize {
        self.burned.count_burned()
    }

    /// Read-only view of the burn-arrival/intensity record accumulated so
    /// far, for callers inspecting scenario state between `reset` and `run`.
    #[must_use]
    pub fn intensity_map(&self) -> &IntensityMap {
        &self.intensity
    }

    /// Swap in a buffer acquired from a [`crate::grid::BurnedDataPool`] in
    /// place of the one [`Scenario::new`] allocated. Must be called before
    /// `reset`, which assumes the buffer's bit count matches the grid's
    /// cell count.
    pub fn set_burned_buffer(&mut self, buf: BurnedData) {
        self.burned = buf;
    }

    /// Consume the scenario and hand back its burned-cell buffer, for
    /// release to a [`crate::grid::BurnedDataPool`] once the scenario is done.
    #[must_use]
    pub fn into_burned_buffer(self) -> BurnedData {
        self.burned
    }

    /// Clear all per-run state and reseed from scratch: threshold vectors,
    /// ignition points, and the save-point/end-of-scenario schedule.
    pub fn reset(&mut self, seed_spread: u64, seed_extinction: u64) {
        self.cell_points.clear();
        self.burned.reset();
        self.intensity = IntensityMap::new();
        self.queue.clear();
        self.spread_cache.clear();
        self.snapshots.clear();
        self.current_time = 0.0;
        self.oob_spread = 0;

        let hours = (self.weather.duration_minutes() / 60).max(1) as usize;
        if self.settings.deterministic {
            self.spread_thresholds = ThresholdVector::deterministic(hours);
            self.extinction_thresholds = ThresholdVector::deterministic(hours);
        } else {
            let mut spread_rng = ChaCha8Rng::seed_from_u64(seed_spread);
            let mut extinction_rng = ChaCha8Rng::seed_from_u64(seed_extinction);
            self.spread_thresholds = ThresholdVector::sampled(&mut spread_rng, hours);
            self.extinction_thresholds = ThresholdVector::sampled(&mut extinction_rng, hours);
        }

        self.save_times = self
            .settings
            .output_date_offsets
            .iter()
            .map(|&day_offset| f64::from(day_offset) * 86_400.0)
            .filter(|&t| t > 0.0 && t <= f64::from(self.weather.duration_minutes()) * 60.0)
            .collect();
        for &save_time in &self.save_times {
            self.queue.push(Event::new(save_time, EventType::Save, 0));
        }

        let end_time = f64::from(self.weather.duration_minutes()) * 60.0;
        self.queue.push(Event::new(end_time, EventType::End, 0));

        for (dir_index, &cell_hash) in self.ignition.cells.iter().enumerate() {
            let angle = InnerPos::eight_directions()[dir_index % 8];
            let seed = InnerPos::new(
                angle.cos() * IGNITION_SEED_OFFSET_M,
                angle.sin() * IGNITION_SEED_OFFSET_M,
            );
            self.cell_points.insert(cell_hash, seed);
            if self.burned.mark_burned(cell_hash) {
                self.intensity.record(cell_hash, 0.0, 0.0);
                self.observers.dispatch(ScenarioNotification::CellBurned {
                    scenario_id: self.id,
                    cell_hash,
                    time: 0.0,
                    intensity_kw_m: 0.0,
                });
                self.queue.push(Event::new(0.0, EventType::Spread, cell_hash));
            }
        }

        self.state = ScenarioState::Ready;
    }

    /// Run the event loop to completion or until `cancel` is observed set.
    ///
    /// # Panics
    /// Panics if an event's time is earlier than `current_time` — that is a
    /// programmer-error invariant violation (§7's "genuine logic-bug
    /// assertion"), never a data-dependent condition.
    pub fn run(&mut self, cancel: &AtomicBool) -> ScenarioOutcome {
        assert_eq!(self.state, ScenarioState::Ready, "scenario must be reset before run");
        self.state = ScenarioState::Running;
        debug!(scenario_id = self.id, "scenario run started");

        let mut was_cancelled = false;
        while let Some(event) = self.queue.pop() {
            assert!(
                event.time + 1e-6 >= self.current_time,
                "event time decreased: {} < {}",
                event.time,
                self.current_time
            );
            self.current_time = event.time;

            if cancel.load(Ordering::Relaxed) {
                was_cancelled = true;
                break;
            }

            match event.event_type {
                EventType::End => {
                    self.queue.clear();
                    break;
                }
                EventType::Save => self.handle_save(),
                EventType::Spread => self.handle_spread(event.cell_hash),
                EventType::NewFire => {}
            }
        }

        let final_size_ha = self.final_size_ha();
        self.state = if was_cancelled {
            ScenarioState::Cancelled
        } else {
            ScenarioState::Done
        };
        self.observers.dispatch(if was_cancelled {
            ScenarioNotification::Cancelled {
                scenario_id: self.id,
                final_size_ha,
            }
        } else {
            ScenarioNotification::Finished {
                scenario_id: self.id,
                final_size_ha,
            }
        });

        ScenarioOutcome {
            final_size_ha,
            cancelled: was_cancelled,
            snapshots: std::mem::take(&mut self.snapshots),
            oob_spread: self.oob_spread,
        }
    }

    fn handle_save(&mut self) {
        self.snapshots.push(Snapshot {
            time: self.current_time,
            intensity: self.intensity.clone(),
        });
    }

    fn handle_spread(&mut self, cell_hash: u32) {
        if self.grid.is_surrounded(cell_hash, |n| self.burned.is_burned(n)) {
            return;
        }
        let points = self.cell_points.points_in(cell_hash).to_vec();
        if points.is_empty() {
            return;
        }

        let minute = (self.current_time / 60.0) as u32;
        let Some(weather) = self.weather.at_minute(minute) else {
            return;
        };
        let cell = *self.grid.get_by_hash(cell_hash);
        let spread = self.spread_cache.get_or_compute(self.model.as_ref(), &cell, weather);

        let hour = (minute / 60) as usize;
        let extinction_threshold = self.extinction_thresholds.at_hour(hour);
        let survival_probability = self.weather.survival_at(cell.fuel_code, minute);
        if !survives(extinction_threshold, survival_probability) {
            return;
        }
        let spread_threshold = self.spread_thresholds.at_hour(hour);
        if !passes_spread_gate(spread_threshold, self.settings.minimum_ros_m_min, spread.head_ros_m_min)
        {
            return;
        }

        let cell_size_m = self.grid.cell_size_m();
        let max_dist_m = self.settings.maximum_spread_distance_cells * cell_size_m;
        let ros_m_per_sec = spread.head_ros_m_min / 60.0;
        let step_seconds = if ros_m_per_sec > f64::EPSILON {
            (max_dist_m / ros_m_per_sec).min(self.settings.nominal_step_seconds)
        } else {
            self.settings.nominal_step_seconds
        };
        let step_minutes = step_seconds / 60.0;

        let lb = spread.length_to_breadth.max(1.000_1);
        let eccentricity = (1.0 - 1.0 / (lb * lb)).sqrt().clamp(0.0, 0.999);

        let mut retained_here = Vec::new();
        for point in points {
            let angle = if point.x == 0.0 && point.y == 0.0 {
                spread.head_direction_rad
            } else {
                point.y.atan2(point.x)
            };
            let angle_from_head = angle - spread.head_direction_rad;
            let ros = spread.head_ros_m_min * (1.0 - eccentricity)
                / (1.0 - eccentricity * angle_from_head.cos());
            let distance_m = ros * step_minutes;
            let dx = distance_m * angle.cos();
            let dy = distance_m * angle.sin();
            let advanced = point.advance(dx, dy);

            let ((d_row, d_col), local) = advanced.resolve_cell_offset(cell_size_m);
            if d_row == 0 && d_col == 0 {
                retained_here.push(local);
                continue;
            }

            let (row, col) = self.grid.row_col(cell_hash);
            let Some(dest_hash) = self.grid.hash(row + d_row, col + d_col) else {
                self.oob_spread += 1;
                continue;
            };
            if self.burned.is_burned(dest_hash) {
                continue;
            }

            self.cell_points.insert(dest_hash, local);
            if self.burned.mark_burned(dest_hash) {
                self.intensity
                    .record(dest_hash, self.current_time, spread.max_intensity_kw_m);
                self.observers.dispatch(ScenarioNotification::CellBurned {
                    scenario_id: self.id,
                    cell_hash: dest_hash,
                    time: self.current_time,
                    intensity_kw_m: spread.max_intensity_kw_m,
                });
                self.queue
                    .push(Event::new(self.current_time + step_seconds, EventType::Spread, dest_hash));
            }
        }

        self.cell_points.take(cell_hash);
        if !retained_here.is_empty() {
            self.cell_points.insert_many(cell_hash, retained_here);
            if !self.grid.is_surrounded(cell_hash, |n| self.burned.is_burned(n)) {
                self.queue
                    .push(Event::new(self.current_time + step_seconds, EventType::Spread, cell_hash));
            }
        }
    }

    fn final_size_ha(&self) -> f64 {
        let cell_area_ha = (self.grid.cell_size_m() * self.grid.cell_size_m()) / 10_000.0;
        self.burned.count_burned() as f64 * cell_area_ha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;
    use crate::grid::{Cell, GridCorners};
    use crate::weather::DailyWeather;

    fn uniform_grid(rows: usize, cols: usize) -> Arc<Grid> {
        let cells = vec![Cell::new(2, 0.0, 0.0); rows * cols];
        Arc::new(
            Grid::new(
                rows,
                cols,
                30.0,
                GridCorners {
                    xllcorner: 0.0,
                    yllcorner: 0.0,
                },
                -9999.0,
                cells,
            )
            .unwrap(),
        )
    }

    fn weather_stream(model: &dyn FuelBehaviorModel) -> Arc<WeatherStream> {
        let daily = vec![DailyWeather {
            year: 2023,
            day_index: 100,
            precip_mm: 0.0,
            temp_c: 28.0,
            rh_pct: 20.0,
            wind_speed_kmh: 25.0,
            wind_dir_deg: 90.0,
            ffmc: 93.0,
            dmc: 45.0,
            dc: 320.0,
            isi: 14.0,
            bui: 50.0,
            fwi: 25.0,
        }];
        Arc::new(WeatherStream::from_daily_records(1, &daily, model, &[2], (0.0, 0.0)).unwrap())
    }

    fn settings() -> Arc<Settings> {
        Arc::new(Settings {
            deterministic: true,
            output_date_offsets: vec![],
            ..Settings::default()
        })
    }

    #[test]
    fn ignition_cell_starts_burned() {
        let model: Arc<dyn FuelBehaviorModel> = Arc::new(SimplifiedFbpModel::fbp_default());
        let grid = uniform_grid(20, 20);
        let weather = weather_stream(model.as_ref());
        let ignition = ResolvedIgnition {
            cells: vec![grid.hash(10, 10).unwrap()],
        };
        let mut scenario = Scenario::new(
            1,
            grid,
            model,
            settings(),
            weather,
            ignition,
            ObserverRegistry::new(),
        );
        scenario.reset(1, 2);
        assert_eq!(scenario.state(), ScenarioState::Ready);
        assert!(scenario.burned.count_burned() >= 1);
    }

    #[test]
    fn running_to_completion_reaches_done_and_grows_the_fire() {
        let model: Arc<dyn FuelBehaviorModel> = Arc::new(SimplifiedFbpModel::fbp_default());
        let grid = uniform_grid(40, 40);
        let weather = weather_stream(model.as_ref());
        let ignition = ResolvedIgnition {
            cells: vec![grid.hash(20, 20).unwrap()],
        };
        let mut scenario = Scenario::new(
            1,
            grid,
            model,
            settings(),
            weather,
            ignition,
            ObserverRegistry::new(),
        );
        scenario.reset(1, 2);
        let cancel = AtomicBool::new(false);
        let outcome = scenario.run(&cancel);
        assert!(!outcome.cancelled);
        assert!(outcome.final_size_ha > 0.0);
        assert_eq!(scenario.state(), ScenarioState::Done);
    }

    #[test]
    fn cancellation_flag_stops_the_loop_early() {
        let model: Arc<dyn FuelBehaviorModel> = Arc::new(SimplifiedFbpModel::fbp_default());
        let grid = uniform_grid(40, 40);
        let weather = weather_stream(model.as_ref());
        let ignition = ResolvedIgnition {
            cells: vec![grid.hash(20, 20).unwrap()],
        };
        let mut scenario = Scenario::new(
            1,
            grid,
            model,
            settings(),
            weather,
            ignition,
            ObserverRegistry::new(),
        );
        scenario.reset(1, 2);
        let cancel = AtomicBool::new(true);
        let outcome = scenario.run(&cancel);
        assert!(outcome.cancelled);
        assert_eq!(scenario.state(), ScenarioState::Cancelled);
    }

    #[test]
    fn deterministic_mode_is_reproducible_across_runs() {
        let model: Arc<dyn FuelBehaviorModel> = Arc::new(SimplifiedFbpModel::fbp_default());
        let run_once = || {
            let grid = uniform_grid(40, 40);
            let weather = weather_stream(model.as_ref());
            let ignition = ResolvedIgnition {
                cells: vec![grid.hash(20, 20).unwrap()],
            };
            let mut scenario = Scenario::new(
                1,
                grid,
                model.clone(),
                settings(),
                weather,
                ignition,
                ObserverRegistry::new(),
            );
            scenario.reset(1, 2);
            let cancel = AtomicBool::new(false);
            scenario.run(&cancel).final_size_ha
        };
        assert_eq!(run_once(), run_once());
    }
}
