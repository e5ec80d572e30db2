//! Per-minute, per-fuel survival-probability precomputation (§4.4).
//!
//! Computing `survival_probability` from the fuel model is cheap but not
//! free; a scenario consults it at every SPREAD event, so the stream
//! precomputes one value per simulated minute per fuel code used on the
//! grid, turning the scenario's extinction check into an array index.

use crate::fuel::{FuelBehaviorModel, FuelWeatherInputs};
use crate::weather::record::HourlyWeather;
use rustc_hash::FxHashMap;

/// Survival probability for one fuel code, indexed by minute-since-stream-start.
#[derive(Debug, Clone)]
pub struct SurvivalTable {
    /// `values[minute]` — weather changes hourly so every minute in the
    /// same hour shares a value, but the index is per-minute as §4.4 specifies.
    values: Vec<f64>,
}

impl SurvivalTable {
    /// O(1) lookup; out-of-range minutes (past the end of the stream) clamp
    /// to the last computed value rather than panicking — the "recoverable
    /// numeric" policy of §7 applied to a lookup that should never happen
    /// in a well-formed scenario, but must not crash if it does.
    #[must_use]
    pub fn at_minute(&self, minute: u32) -> f64 {
        let idx = (minute as usize).min(self.values.len().saturating_sub(1));
        self.values.get(idx).copied().unwrap_or(0.0)
    }
}

/// Build one [`SurvivalTable`] per fuel code present in `fuel_codes`, from
/// an hourly weather series and terrain inputs that are constant across the
/// stream (slope/aspect/foliar moisture vary per cell, so callers needing
/// cell-specific survival should call the model directly; this table is for
/// the common case of a single representative terrain input per fuel,
/// refined per-cell inside the scenario's own small per-hour cache).
#[must_use]
pub fn build_survival_tables(
    model: &dyn FuelBehaviorModel,
    fuel_codes: &[u16],
    hourly: &[HourlyWeather],
    reference_slope_aspect: (f64, f64),
) -> FxHashMap<u16, SurvivalTable> {
    let mut tables = FxHashMap::default();
    for &fuel_code in fuel_codes {
        if fuel_code == 0 || tables.contains_key(&fuel_code) {
            continue;
        }
        let mut values = Vec::with_capacity(hourly.len() * 60);
        for hour in hourly {
            let inputs = FuelWeatherInputs {
                slope_pct: reference_slope_aspect.0,
                aspect_deg: reference_slope_aspect.1,
                wind_speed_kmh: hour.wind_speed_kmh,
                wind_dir_deg: hour.wind_dir_deg,
                ffmc: hour.ffmc,
                bui: hour.bui,
                foliar_moisture_pct: 100.0,
            };
            let p = model.survival_probability(fuel_code, inputs);
            values.extend(std::iter::repeat(p).take(60));
        }
        tables.insert(fuel_code, SurvivalTable { values });
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;
    use crate::weather::diurnal::build_hourly_series;
    use crate::weather::record::DailyWeather;

    fn sample_day() -> DailyWeather {
        DailyWeather {
            year: 2023,
            day_index: 0,
            precip_mm: 0.0,
            temp_c: 20.0,
            rh_pct: 30.0,
            wind_speed_kmh: 20.0,
            wind_dir_deg: 180.0,
            ffmc: 90.0,
            dmc: 35.5,
            dc: 275.0,
            isi: 10.0,
            bui: 40.0,
            fwi: 15.0,
        }
    }

    #[test]
    fn table_has_one_entry_per_minute() {
        let model = SimplifiedFbpModel::fbp_default();
        let hourly = build_hourly_series(&[sample_day()]);
        let tables = build_survival_tables(&model, &[2], &hourly, (0.0, 0.0));
        let table = tables.get(&2).unwrap();
        assert_eq!(table.at_minute(0), table.at_minute(59));
        assert!((0.0..=1.0).contains(&table.at_minute(30)));
    }

    #[test]
    fn out_of_range_minute_clamps_instead_of_panicking() {
        let model = SimplifiedFbpModel::fbp_default();
        let hourly = build_hourly_series(&[sample_day()]);
        let tables = build_survival_tables(&model, &[2], &hourly, (0.0, 0.0));
        let table = tables.get(&2).unwrap();
        let last = table.at_minute((hourly.len() as u32) * 60 - 1);
        assert_eq!(table.at_minute(1_000_000), last);
    }

    #[test]
    fn nonfuel_code_is_skipped() {
        let model = SimplifiedFbpModel::fbp_default();
        let hourly = build_hourly_series(&[sample_day()]);
        let tables = build_survival_tables(&model, &[0, 2], &hourly, (0.0, 0.0));
        assert!(!tables.contains_key(&0));
        assert!(tables.contains_key(&2));
    }
}
