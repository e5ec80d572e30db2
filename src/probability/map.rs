//! `ProbabilityMap`: the concurrent-safe burn-probability accumulator,
//! partitioned per snapshot time (§4.5).

use crate::grid::IntensityMap;
use crate::settings::Settings;
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Per-cell burn counts for one snapshot time, partitioned by intensity
/// class. Invariant: `total[cell] == low[cell] + moderate[cell] + high[cell]`
/// for every cell that has ever been published into this map.
#[derive(Debug, Default, Clone)]
struct Counts {
    total: FxHashMap<u32, u64>,
    low: FxHashMap<u32, u64>,
    moderate: FxHashMap<u32, u64>,
    high: FxHashMap<u32, u64>,
}

#[derive(Debug, Default)]
struct State {
    // Keyed by `time.to_bits()`: snapshot times are always exact repeats of
    // `day_offset * 86_400.0`, so bit-identical f64s are the right notion
    // of equality here, not an epsilon comparison.
    by_time: FxHashMap<u64, Counts>,
    num_sizes: u64,
}

/// Thread-safe accumulator: every scenario's final intensity snapshots are
/// folded into one shared instance via [`publish`], one bucket per snapshot
/// time. `num_sizes` counts scenarios, not snapshots — it is incremented
/// once per scenario via [`record_scenario`], independent of how many
/// snapshot times that scenario happened to publish into.
///
/// [`publish`]: ProbabilityMap::publish
/// [`record_scenario`]: ProbabilityMap::record_scenario
#[derive(Debug, Default)]
pub struct ProbabilityMap {
    state: Mutex<State>,
}

impl ProbabilityMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that one scenario's final size was folded into the
    /// aggregator's population, independent of how many snapshot times it
    /// published into (zero, one, or several). Call exactly once per
    /// scenario outcome, applying the same cancelled/no-completion
    /// exclusion rule as [`publish`].
    ///
    /// [`publish`]: ProbabilityMap::publish
    pub fn record_scenario(&self, scenario_cancelled: bool, any_completed_in_iteration: bool) {
        if scenario_cancelled && !any_completed_in_iteration {
            return;
        }
        self.state.lock().expect("probability map mutex poisoned").num_sizes += 1;
    }

    /// Fold one scenario's intensity snapshot, taken at `time`, into the
    /// shared accumulator's bucket for that time.
    ///
    /// `scenario_cancelled` and `any_completed_in_iteration` implement the
    /// §4.5 inclusion rule: a cancelled scenario's snapshot is folded in
    /// only if some scenario in the same iteration has already completed;
    /// the very first iteration's snapshot is rejected outright if nothing
    /// in it has completed yet.
    pub fn publish(
        &self,
        intensity: &IntensityMap,
        time: f64,
        settings: &Settings,
        scenario_cancelled: bool,
        any_completed_in_iteration: bool,
    ) {
        if scenario_cancelled && !any_completed_in_iteration {
            warn!("rejected probability snapshot: cancelled with no completed scenario in iteration");
            return;
        }

        let mut state = self.state.lock().expect("probability map mutex poisoned");
        let counts = state.by_time.entry(time.to_bits()).or_default();
        for (cell_hash, burn) in intensity.iter() {
            if burn.max_intensity_kw_m <= 0.0 {
                continue;
            }
            *counts.total.entry(cell_hash).or_insert(0) += 1;
            if burn.max_intensity_kw_m <= settings.intensity_max_low_kw_m {
                *counts.low.entry(cell_hash).or_insert(0) += 1;
            } else if burn.max_intensity_kw_m <= settings.intensity_max_moderate_kw_m {
                *counts.moderate.entry(cell_hash).or_insert(0) += 1;
            } else {
                *counts.high.entry(cell_hash).or_insert(0) += 1;
            }
        }
        debug!(cells = intensity.len(), time, "folded snapshot into probability map");
    }

    /// Probability (`count / numSizes`) that `cell_hash` burned at all by
    /// the given snapshot `time`.
    #[must_use]
    pub fn total_probability(&self, time: f64, cell_hash: u32) -> f64 {
        let state = self.state.lock().expect("probability map mutex poisoned");
        if state.num_sizes == 0 {
            return 0.0;
        }
        let Some(counts) = state.by_time.get(&time.to_bits()) else {
            return 0.0;
        };
        *counts.total.get(&cell_hash).unwrap_or(&0) as f64 / state.num_sizes as f64
    }

    #[must_use]
    pub fn num_sizes(&self) -> u64 {
        self.state.lock().expect("probability map mutex poisoned").num_sizes
    }

    /// Every snapshot time that has received at least one published cell.
    #[must_use]
    pub fn snapshot_times(&self) -> Vec<f64> {
        self.state
            .lock()
            .expect("probability map mutex poisoned")
            .by_time
            .keys()
            .map(|&bits| f64::from_bits(bits))
            .collect()
    }

    /// Snapshot the four count grids for one snapshot `time` as plain maps,
    /// for output writers. `None` if nothing has been published at `time`.
    #[must_use]
    pub fn export(&self, time: f64) -> Option<ProbabilityMapExport> {
        let state = self.state.lock().expect("probability map mutex poisoned");
        let counts = state.by_time.get(&time.to_bits())?;
        Some(ProbabilityMapExport {
            total: counts.total.clone(),
            low: counts.low.clone(),
            moderate: counts.moderate.clone(),
            high: counts.high.clone(),
            num_sizes: state.num_sizes,
        })
    }
}

/// A read-only, lock-free snapshot of one snapshot time's counts from a
/// [`ProbabilityMap`], for an embedding binary's `RasterSink` to consume
/// (§6: raster writing is out of scope here).
#[derive(Debug, Clone)]
pub struct ProbabilityMapExport {
    pub total: FxHashMap<u32, u64>,
    pub low: FxHashMap<u32, u64>,
    pub moderate: FxHashMap<u32, u64>,
    pub high: FxHashMap<u32, u64>,
    pub num_sizes: u64,
}

impl ProbabilityMapExport {
    /// Confirms the per-cell `total = low + moderate + high` invariant
    /// (§3), for tests and diagnostics.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.total.iter().all(|(cell, &total)| {
            let low = *self.low.get(cell).unwrap_or(&0);
            let moderate = *self.moderate.get(cell).unwrap_or(&0);
            let high = *self.high.get(cell).unwrap_or(&0);
            total == low + moderate + high
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            intensity_max_low_kw_m: 500.0,
            intensity_max_moderate_kw_m: 2_000.0,
            ..Settings::default()
        }
    }

    fn intensity_with(cell: u32, kw_m: f64) -> IntensityMap {
        let mut map = IntensityMap::new();
        map.record(cell, 0.0, kw_m);
        map
    }

    #[test]
    fn publish_increments_total_and_matching_class() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), false, true);
        let export = pm.export(86_400.0).unwrap();
        assert_eq!(*export.total.get(&1).unwrap(), 1);
        assert_eq!(*export.low.get(&1).unwrap(), 1);
        assert!(export.invariant_holds());
    }

    #[test]
    fn zero_intensity_cells_are_skipped() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 0.0), 86_400.0, &settings(), false, true);
        assert_eq!(pm.total_probability(86_400.0, 1), 0.0);
    }

    #[test]
    fn cancelled_snapshot_with_no_completion_is_rejected() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(true, false);
        pm.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), true, false);
        assert_eq!(pm.num_sizes(), 0);
        assert!(pm.export(86_400.0).is_none());
    }

    #[test]
    fn cancelled_snapshot_is_accepted_if_something_completed() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(true, true);
        pm.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), true, true);
        assert_eq!(pm.num_sizes(), 1);
    }

    #[test]
    fn total_probability_divides_by_num_sizes_not_snapshot_count() {
        let pm = ProbabilityMap::new();
        // One scenario, three valid save offsets: num_sizes must stay 1,
        // not 3, even though publish() is called three times.
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), false, true);
        pm.publish(&intensity_with(1, 100.0), 172_800.0, &settings(), false, true);
        pm.publish(&intensity_with(1, 100.0), 259_200.0, &settings(), false, true);
        assert_eq!(pm.num_sizes(), 1);
        assert_eq!(pm.total_probability(86_400.0, 1), 1.0);

        let pm2 = ProbabilityMap::new();
        pm2.record_scenario(false, true);
        pm2.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), false, true);
        pm2.record_scenario(false, true);
        pm2.publish(&intensity_with(2, 100.0), 86_400.0, &settings(), false, true);
        assert_eq!(pm2.total_probability(86_400.0, 1), 0.5);
    }

    #[test]
    fn snapshots_at_different_times_do_not_conflate() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 100.0), 86_400.0, &settings(), false, true);
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 100.0), 172_800.0, &settings(), false, true);
        assert_eq!(pm.total_probability(86_400.0, 1), 0.5);
        assert_eq!(pm.total_probability(172_800.0, 1), 0.5);
        let times = pm.snapshot_times();
        assert_eq!(times.len(), 2);
    }

    #[test]
    fn high_intensity_above_moderate_ceiling() {
        let pm = ProbabilityMap::new();
        pm.record_scenario(false, true);
        pm.publish(&intensity_with(1, 5_000.0), 86_400.0, &settings(), false, true);
        let export = pm.export(86_400.0).unwrap();
        assert_eq!(*export.high.get(&1).unwrap(), 1);
    }
}
