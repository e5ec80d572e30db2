//! The spread calculator: a pure `(cell attributes, weather) -> SpreadInfo`
//! function over [`FuelBehaviorModel`], with no state of its own.
//!
//! Grounded in the teacher's `physics/rothermel.rs` convention of a small
//! free function wrapping fuel-table lookup plus a weather/terrain
//! adjustment; here the fuel table itself is the pluggable `FuelBehaviorModel`
//! collaborator rather than a hard-coded catalog.

use crate::fuel::{FuelBehaviorModel, FuelWeatherInputs, SpreadInfo};
use crate::grid::Cell;
use crate::weather::HourlyWeather;

/// Evaluate fire behaviour for one cell at one hour.
///
/// Returns `SpreadInfo::NONE` for non-fuel cells without consulting the
/// model at all (§3: "don't call the model" for `fuel_code == 0`), and for
/// fuel codes the model does not recognise (§7's unknown-fuel-table case,
/// which callers treat identically to non-fuel).
#[must_use]
pub fn evaluate_spread(
    model: &dyn FuelBehaviorModel,
    cell: &Cell,
    weather: &HourlyWeather,
) -> SpreadInfo {
    if !cell.is_combustible() {
        return SpreadInfo::NONE;
    }

    let inputs = FuelWeatherInputs {
        slope_pct: cell.slope_pct,
        aspect_deg: cell.aspect_deg,
        wind_speed_kmh: weather.wind_speed_kmh,
        wind_dir_deg: weather.wind_dir_deg,
        ffmc: weather.ffmc,
        bui: weather.bui,
        foliar_moisture_pct: 100.0,
    };

    model
        .evaluate(cell.fuel_code, inputs)
        .unwrap_or(SpreadInfo::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::SimplifiedFbpModel;

    fn weather() -> HourlyWeather {
        HourlyWeather {
            hour_of_day: 14,
            precip_mm: 0.0,
            temp_c: 25.0,
            rh_pct: 25.0,
            wind_speed_kmh: 20.0,
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
    fn nonfuel_cell_never_spreads() {
        let model = SimplifiedFbpModel::fbp_default();
        let cell = Cell::new(0, 0.0, 0.0);
        let result = evaluate_spread(&model, &cell, &weather());
        assert_eq!(result.head_ros_m_min, 0.0);
    }

    #[test]
    fn unknown_fuel_code_treated_as_nonfuel() {
        let model = SimplifiedFbpModel::fbp_default();
        let cell = Cell::new(9999, 0.0, 0.0);
        let result = evaluate_spread(&model, &cell, &weather());
        assert_eq!(result, SpreadInfo::NONE);
    }

    #[test]
    fn combustible_cell_spreads() {
        let model = SimplifiedFbpModel::fbp_default();
        let cell = Cell::new(2, 0.0, 0.0);
        let result = evaluate_spread(&model, &cell, &weather());
        assert!(result.head_ros_m_min > 0.0);
    }
}
