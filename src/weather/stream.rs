//! `WeatherStream`: one scenario's full hourly weather record, indexed for
//! O(1) per-minute lookup by the scenario engine (§4.4, §6).

use crate::error::{FirefrontError, Result};
use crate::fuel::FuelBehaviorModel;
use crate::weather::diurnal::build_hourly_series;
use crate::weather::record::{DailyWeather, HourlyWeather};
use crate::weather::survival::{build_survival_tables, SurvivalTable};
use rustc_hash::FxHashMap;
use tracing::debug;

/// A fully expanded, validated hourly weather stream for one scenario.
///
/// Built once per scenario at construction time and shared read-only
/// thereafter; every SPREAD event consults it by minute offset.
#[derive(Debug, Clone)]
pub struct WeatherStream {
    hourly: Vec<HourlyWeather>,
    survival: FxHashMap<u16, SurvivalTable>,
}

impl WeatherStream {
    /// Build a stream from a caller-supplied sequence of daily noon
    /// observations. Validates only the invariants this engine owns —
    /// day-index monotonicity and single-year coverage. Reading raw hourly
    /// rows out of a CSV and checking their 3600s cadence is the job of the
    /// out-of-scope weather-file reader; by the time records reach here
    /// they are already one-per-day.
    pub fn from_daily_records(
        scenario_id: u32,
        daily: &[DailyWeather],
        model: &dyn FuelBehaviorModel,
        fuel_codes: &[u16],
        reference_slope_aspect: (f64, f64),
    ) -> Result<Self> {
        if daily.is_empty() {
            return Err(FirefrontError::WeatherGap {
                scenario_id,
                expected_day_index: 0,
            });
        }

        let first_year = daily[0].year;
        let mut prev_day_index = daily[0].day_index;
        for rec in daily.iter().skip(1) {
            if rec.year != first_year {
                return Err(FirefrontError::WeatherCrossesYearBoundary {
                    scenario_id,
                    day_index: rec.day_index,
                });
            }
            if rec.day_index <= prev_day_index {
                return Err(FirefrontError::WeatherNotMonotone {
                    scenario_id,
                    day_index: rec.day_index,
                });
            }
            if rec.day_index != prev_day_index + 1 {
                return Err(FirefrontError::WeatherGap {
                    scenario_id,
                    expected_day_index: prev_day_index + 1,
                });
            }
            prev_day_index = rec.day_index;
        }

        let hourly = build_hourly_series(daily);
        debug!(hours = hourly.len(), days = daily.len(), "weather stream built");
        let survival = build_survival_tables(model, fuel_codes, &hourly, reference_slope_aspect);

        Ok(Self { hourly, survival })
    }

    /// The hourly record in effect at `minute_since_start`.
    #[must_use]
    pub fn at_minute(&self, minute_since_start: u32) -> Option<&HourlyWeather> {
        let hour = (minute_since_start / 60) as usize;
        self.hourly.get(hour)
    }

    /// O(1) survival-probability lookup for `fuel_code` at the given minute.
    /// Unknown fuel codes (no table built for them) return `0.0`.
    #[must_use]
    pub fn survival_at(&self, fuel_code: u16, minute_since_start: u32) -> f64 {
        self.survival
            .get(&fuel_code)
            .map_or(0.0, |t| t.at_minute(minute_since_start))
    }

    /// Total stream length in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        (self.hourly.len() as u32) * 60
    }

    #[must_use]
    pub fn hourly(&self) -> &[HourlyWeather] {
        &self.hourly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;

    fn day(day_index: u32, year: u16) -> DailyWeather {
        DailyWeather {
            year,
            day_index,
            precip_mm: 0.0,
            temp_c: 20.0,
            rh_pct: 30.0,
            wind_speed_kmh: 15.0,
            wind_dir_deg: 90.0,
            ffmc: 88.0,
            dmc: 35.5,
            dc: 275.0,
            isi: 9.0,
            bui: 40.0,
            fwi: 14.0,
        }
    }

    #[test]
    fn builds_from_contiguous_daily_records() {
        let model = SimplifiedFbpModel::fbp_default();
        let daily = vec![day(100, 2023), day(101, 2023), day(102, 2023)];
        let stream = WeatherStream::from_daily_records(1, &daily, &model, &[2], (0.0, 0.0)).unwrap();
        assert_eq!(stream.duration_minutes(), 3 * 24 * 60);
        assert!(stream.at_minute(0).is_some());
    }

    #[test]
    fn rejects_empty_record_set() {
        let model = SimplifiedFbpModel::fbp_default();
        let err = WeatherStream::from_daily_records(1, &[], &model, &[2], (0.0, 0.0)).unwrap_err();
        assert!(matches!(err, FirefrontError::WeatherGap { .. }));
    }

    #[test]
    fn rejects_non_monotone_day_index() {
        let model = SimplifiedFbpModel::fbp_default();
        let daily = vec![day(100, 2023), day(100, 2023)];
        let err = WeatherStream::from_daily_records(1, &daily, &model, &[2], (0.0, 0.0)).unwrap_err();
        assert!(matches!(err, FirefrontError::WeatherNotMonotone { .. }));
    }

    #[test]
    fn rejects_day_index_gap() {
        let model = SimplifiedFbpModel::fbp_default();
        let daily = vec![day(100, 2023), day(105, 2023)];
        let err = WeatherStream::from_daily_records(1, &daily, &model, &[2], (0.0, 0.0)).unwrap_err();
        assert!(matches!(err, FirefrontError::WeatherGap { .. }));
    }

    #[test]
    fn rejects_year_boundary_crossing() {
        let model = SimplifiedFbpModel::fbp_default();
        let daily = vec![day(364, 2023), day(365, 2024)];
        let err = WeatherStream::from_daily_records(1, &daily, &model, &[2], (0.0, 0.0)).unwrap_err();
        assert!(matches!(err, FirefrontError::WeatherCrossesYearBoundary { .. }));
    }

    #[test]
    fn survival_lookup_for_unknown_fuel_is_zero() {
        let model = SimplifiedFbpModel::fbp_default();
        let daily = vec![day(100, 2023)];
        let stream = WeatherStream::from_daily_records(1, &daily, &model, &[2], (0.0, 0.0)).unwrap();
        assert_eq!(stream.survival_at(999, 0), 0.0);
    }
}
