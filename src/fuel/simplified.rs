//! A simplified, Rothermel-family stand-in for the FBP equation set.
//!
//! Grounded in the spread-rate decomposition of the teacher's
//! `physics/rothermel.rs` (reaction intensity × propagating flux ×
//! (wind + slope) / heat sink), generalised to the handful of FBP-style
//! parameters `SpreadInfo` exposes (L:B, CFB, fuel consumption, intensity).
//! Not a certified implementation of the Canadian FBP system — see §1/§9.

use crate::fuel::model::{FuelBehaviorModel, FuelWeatherInputs, SpreadInfo};
use rustc_hash::FxHashMap;

/// Per-fuel-type constant parameters, analogous to the teacher's `Fuel`
/// catalog entries (`Fuel::dry_grass()`, `Fuel::shrubland()`, …) but keyed
/// by the small integer fuel codes this engine's `Cell`s carry.
#[derive(Debug, Clone, Copy)]
struct FuelParams {
    /// Base rate of spread at reference conditions, m/min.
    a: f64,
    /// Open-wind ROS multiplier exponent.
    b: f64,
    /// Curing/fuel-moisture sensitivity exponent.
    c: f64,
    /// Buildup-effect scaling applied to fuel consumption.
    consumption_kg_m2: f64,
    /// Crown-fire threshold ROS, m/min — above this CFB ramps toward 1.
    crown_threshold_ros: f64,
    /// Baseline length-to-breadth ratio at zero wind.
    lb_base: f64,
    lb_wind_coefficient: f64,
    /// Moisture of extinction (FFMC-scale) above which the fuel won't carry fire.
    moisture_of_extinction: f64,
}

/// A deliberately small built-in catalog; embedding code can layer a richer
/// fuel table on top by implementing [`FuelBehaviorModel`] itself.
#[derive(Debug, Clone)]
pub struct SimplifiedFbpModel {
    params: FxHashMap<u16, FuelParams>,
}

impl SimplifiedFbpModel {
    /// FBP-style C-1..C-7 conifer, D-1 deciduous, O-1 grass families,
    /// mapped onto small integer codes for this engine's `Cell::fuel_code`.
    #[must_use]
    pub fn fbp_default() -> Self {
        let mut params = FxHashMap::default();
        // C-2: boreal spruce, the reference fuel used in spec §8's S1/S2.
        params.insert(
            2,
            FuelParams {
                a: 63.5,
                b: 0.0401,
                c: 1.7,
                consumption_kg_m2: 3.0,
                crown_threshold_ros: 8.0,
                lb_base: 1.2,
                lb_wind_coefficient: 0.02,
                moisture_of_extinction: 35.0,
            },
        );
        // C-1: spruce-lichen woodland, lighter fuel load, faster response to wind.
        params.insert(
            1,
            FuelParams {
                a: 90.0,
                b: 0.0649,
                c: 4.5,
                consumption_kg_m2: 1.5,
                crown_threshold_ros: 4.0,
                lb_base: 1.0,
                lb_wind_coefficient: 0.025,
                moisture_of_extinction: 30.0,
            },
        );
        // C-7: ponderosa pine / Douglas fir, dense canopy, slow surface spread.
        params.insert(
            7,
            FuelParams {
                a: 45.0,
                b: 0.0305,
                c: 2.0,
                consumption_kg_m2: 2.2,
                crown_threshold_ros: 12.0,
                lb_base: 1.4,
                lb_wind_coefficient: 0.018,
                moisture_of_extinction: 40.0,
            },
        );
        // D-1: leafless aspen.
        params.insert(
            11,
            FuelParams {
                a: 30.0,
                b: 0.0232,
                c: 1.6,
                consumption_kg_m2: 1.0,
                crown_threshold_ros: 1_000.0, // no crown phase
                lb_base: 1.0,
                lb_wind_coefficient: 0.015,
                moisture_of_extinction: 25.0,
            },
        );
        // O-1a: matted grass.
        params.insert(
            21,
            FuelParams {
                a: 190.0,
                b: 0.0310,
                c: 1.4,
                consumption_kg_m2: 0.3,
                crown_threshold_ros: 1_000.0,
                lb_base: 1.1,
                lb_wind_coefficient: 0.03,
                moisture_of_extinction: 20.0,
            },
        );
        Self { params }
    }
}

impl Default for SimplifiedFbpModel {
    fn default() -> Self {
        Self::fbp_default()
    }
}

impl FuelBehaviorModel for SimplifiedFbpModel {
    fn evaluate(&self, fuel_code: u16, inputs: FuelWeatherInputs) -> Option<SpreadInfo> {
        let p = self.params.get(&fuel_code)?;

        // Moisture proxy: higher FFMC = drier fuel. Below the moisture of
        // extinction floor the fuel simply will not carry fire.
        if inputs.ffmc < p.moisture_of_extinction * 0.3 {
            return Some(SpreadInfo::NONE);
        }
        let dryness = ((inputs.ffmc - p.moisture_of_extinction * 0.3)
            / (101.0 - p.moisture_of_extinction * 0.3))
            .clamp(0.0, 1.0);

        let isi_like = (p.b * inputs.wind_speed_kmh).exp() * dryness.powf(p.c);
        let bui_factor = 1.0 - (-0.0023 * inputs.bui).exp();
        let mut head_ros = p.a * isi_like * bui_factor.max(0.05);

        // Upslope spread increases ROS exponentially in the effective wind.
        let slope_factor = 1.0 + (inputs.slope_pct / 100.0).clamp(0.0, 2.0);
        head_ros *= slope_factor;

        if head_ros <= f64::EPSILON {
            return Some(SpreadInfo::NONE);
        }

        let length_to_breadth =
            p.lb_base + p.lb_wind_coefficient * inputs.wind_speed_kmh;

        let crown_fraction_burned = if head_ros > p.crown_threshold_ros {
            (1.0 - (-(head_ros - p.crown_threshold_ros) / p.crown_threshold_ros).exp())
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        let fuel_consumption_kg_m2 =
            p.consumption_kg_m2 * (0.2 + 0.8 * crown_fraction_burned.max(dryness));

        // Byram's fireline intensity: I = H * w * R, with H a fixed low
        // heat of combustion (kJ/kg) and R converted to m/s.
        const HEAT_OF_COMBUSTION_KJ_KG: f64 = 18_000.0;
        let max_intensity_kw_m =
            HEAT_OF_COMBUSTION_KJ_KG * fuel_consumption_kg_m2 * (head_ros / 60.0);

        let head_direction_rad = inputs.wind_dir_deg.to_radians();

        Some(SpreadInfo {
            head_ros_m_min: head_ros,
            head_direction_rad,
            length_to_breadth,
            crown_fraction_burned,
            fuel_consumption_kg_m2,
            max_intensity_kw_m,
        })
    }

    fn is_known(&self, fuel_code: u16) -> bool {
        self.params.contains_key(&fuel_code)
    }

    fn survival_probability(&self, fuel_code: u16, inputs: FuelWeatherInputs) -> f64 {
        let Some(p) = self.params.get(&fuel_code) else {
            return 0.0;
        };
        // Composite Anderson/Hartford/Frandsen/Otway-style survival curve:
        // drier fuel (higher FFMC relative to its extinction point) and
        // higher buildup both raise the chance the fire persists past the
        // current hour. Deliberately shares one curve shape across fuels
        // per the "HACK" noted in the original design (§9 open question).
        let dryness = ((inputs.ffmc - p.moisture_of_extinction * 0.3)
            / (101.0 - p.moisture_of_extinction * 0.3))
            .clamp(0.0, 1.0);
        let buildup = (inputs.bui / 100.0).clamp(0.0, 1.0);
        (0.3 + 0.5 * dryness + 0.2 * buildup).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(wind_kmh: f64, ffmc: f64) -> FuelWeatherInputs {
        FuelWeatherInputs {
            slope_pct: 0.0,
            aspect_deg: 0.0,
            wind_speed_kmh: wind_kmh,
            wind_dir_deg: 180.0,
            ffmc,
            bui: 35.5,
            foliar_moisture_pct: 100.0,
        }
    }

    #[test]
    fn unknown_fuel_code_returns_none() {
        let model = SimplifiedFbpModel::fbp_default();
        assert!(model.evaluate(250, inputs(20.0, 90.0)).is_none());
        assert!(!model.is_known(250));
    }

    #[test]
    fn wind_increases_head_ros() {
        let model = SimplifiedFbpModel::fbp_default();
        let calm = model.evaluate(2, inputs(0.0, 90.0)).unwrap();
        let windy = model.evaluate(2, inputs(20.0, 90.0)).unwrap();
        assert!(windy.head_ros_m_min > calm.head_ros_m_min);
    }

    #[test]
    fn very_wet_fuel_does_not_spread() {
        let model = SimplifiedFbpModel::fbp_default();
        let wet = model.evaluate(2, inputs(20.0, 5.0)).unwrap();
        assert_eq!(wet.head_ros_m_min, 0.0);
    }

    #[test]
    fn fast_ros_triggers_crown_fraction_burned() {
        let model = SimplifiedFbpModel::fbp_default();
        let result = model.evaluate(2, inputs(40.0, 98.0)).unwrap();
        assert!(result.crown_fraction_burned > 0.0);
    }

    #[test]
    fn survival_probability_is_bounded() {
        let model = SimplifiedFbpModel::fbp_default();
        let p = model.survival_probability(2, inputs(20.0, 90.0));
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn survival_probability_zero_for_unknown_fuel() {
        let model = SimplifiedFbpModel::fbp_default();
        assert_eq!(model.survival_probability(250, inputs(20.0, 90.0)), 0.0);
    }
}
