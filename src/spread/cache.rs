//! Per-scenario memoization of [`SpreadInfo`] results (§3).
//!
//! Keyed on a bucketed tuple so that near-identical weather at adjacent
//! simulated minutes collapses onto the same cache entry, the same way the
//! teacher's GPU path buckets float uniforms to keep its descriptor cache
//! small (`gpu/` descriptor-set reuse).

use crate::fuel::{FuelBehaviorModel, SpreadInfo};
use crate::grid::Cell;
use crate::spread::calculator::evaluate_spread;
use crate::weather::HourlyWeather;
use rustc_hash::FxHashMap;

/// Bucket width for wind speed, km/h. Wind direction buckets at 5-degree
/// steps; everything else that participates in the key (FFMC, BUI, slope,
/// aspect) is rounded to one decimal place rather than bucketed, since §3
/// names them directly in the memoization key.
const WIND_SPEED_BUCKET_KMH: f64 = 1.0;
const WIND_DIR_BUCKET_DEG: f64 = 5.0;

/// A hashable, bucketed stand-in for the float-valued spread inputs named
/// in §3's memoization key: `(fuel_code, slope, aspect, wind_speed_bucket,
/// wind_dir_bucket, ffmc, bui)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SpreadKey {
    fuel_code: u16,
    slope_tenths: i64,
    aspect_tenths: i64,
    wind_speed_bucket: i64,
    wind_dir_bucket: i64,
    ffmc_tenths: i64,
    bui_tenths: i64,
}

fn bucket(value: f64, width: f64) -> i64 {
    (value / width).round() as i64
}

fn tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

impl SpreadKey {
    fn new(cell: &Cell, weather: &HourlyWeather) -> Self {
        Self {
            fuel_code: cell.fuel_code,
            slope_tenths: tenths(cell.slope_pct),
            aspect_tenths: tenths(cell.aspect_deg),
            wind_speed_bucket: bucket(weather.wind_speed_kmh, WIND_SPEED_BUCKET_KMH),
            wind_dir_bucket: bucket(weather.wind_dir_deg, WIND_DIR_BUCKET_DEG),
            ffmc_tenths: tenths(weather.ffmc),
            bui_tenths: tenths(weather.bui),
        }
    }
}

/// A scenario-owned cache in front of [`evaluate_spread`]. Not shared across
/// scenarios: each scenario thread owns one, so no locking is needed.
#[derive(Debug, Default)]
pub struct SpreadCache {
    entries: FxHashMap<SpreadKey, SpreadInfo>,
}

impl SpreadCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Look up or compute-and-insert the spread result for `(cell, weather)`.
    pub fn get_or_compute(
        &mut self,
        model: &dyn FuelBehaviorModel,
        cell: &Cell,
        weather: &HourlyWeather,
    ) -> SpreadInfo {
        let key = SpreadKey::new(cell, weather);
        *self
            .entries
            .entry(key)
            .or_insert_with(|| evaluate_spread(model, cell, weather))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;

    fn weather(wind_kmh: f64) -> HourlyWeather {
        HourlyWeather {
            hour_of_day: 14,
            precip_mm: 0.0,
            temp_c: 25.0,
            rh_pct: 25.0,
            wind_speed_kmh: wind_kmh,
            wind_dir_deg: 270.0,
            ffmc: 92.0,
            dmc: 40.0,
            dc: 300.0,
            isi: 12.0,
            bui: 45.0,
            fwi: 20.0,
        }
    }

    #[test]
    fn identical_inputs_hit_same_cache_entry() {
        let model = SimplifiedFbpModel::fbp_default();
        let mut cache = SpreadCache::new();
        let cell = Cell::new(2, 10.0, 180.0);
        cache.get_or_compute(&model, &cell, &weather(20.0));
        cache.get_or_compute(&model, &cell, &weather(20.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn differing_wind_bucket_produces_new_entry() {
        let model = SimplifiedFbpModel::fbp_default();
        let mut cache = SpreadCache::new();
        let cell = Cell::new(2, 10.0, 180.0);
        cache.get_or_compute(&model, &cell, &weather(20.0));
        cache.get_or_compute(&model, &cell, &weather(35.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cached_result_matches_direct_evaluation() {
        let model = SimplifiedFbpModel::fbp_default();
        let mut cache = SpreadCache::new();
        let cell = Cell::new(2, 10.0, 180.0);
        let direct = evaluate_spread(&model, &cell, &weather(20.0));
        let cached = cache.get_or_compute(&model, &cell, &weather(20.0));
        assert_eq!(direct, cached);
    }
}
