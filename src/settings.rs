//! Runtime-tunable controls (§6 Controls list), constructed once at startup
//! and shared read-only across every scenario thread.

use serde::{Deserialize, Serialize};

/// Mirrors the Controls list of §6. Every field maps onto one named
/// control; there is no hidden state beyond this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Disable random spread/extinction gates; both always pass (§4.3).
    pub deterministic: bool,
    /// Below this head ROS (m/min) a SPREAD event is dropped, not rescheduled.
    pub minimum_ros_m_min: f64,
    /// Upper bound on how many cell-widths a front sample may advance per step.
    pub maximum_spread_distance_cells: f64,
    pub minimum_ffmc: f64,
    pub minimum_ffmc_at_night: f64,
    /// Sunrise/sunset offsets in hours, shifting the day/night FFMC floor.
    pub offset_sunrise_hours: f64,
    pub offset_sunset_hours: f64,
    /// Percent conifer used to resolve M-1/M-2 mixedwood fuel codes (0-100, multiples of 5).
    pub default_percent_conifer: u8,
    /// Percent dead fir used to resolve M-3/M-4 mixedwood fuel codes (0-100, multiples of 5).
    pub default_percent_dead_fir: u8,
    /// Intensity (kW/m) boundary between the `low` and `moderate` classes.
    pub intensity_max_low_kw_m: f64,
    /// Intensity (kW/m) boundary between the `moderate` and `high` classes.
    pub intensity_max_moderate_kw_m: f64,
    /// Confidence level used by the stopping rule (e.g. `0.95`).
    pub confidence_level: f64,
    pub maximum_time_seconds: f64,
    pub maximum_count_simulations: u64,
    pub threshold_scenario_weight: f64,
    pub threshold_daily_weight: f64,
    pub threshold_hourly_weight: f64,
    /// Day offsets (from the ignition day) at which probability snapshots
    /// are published.
    pub output_date_offsets: Vec<i32>,
    pub save_individual: bool,
    pub save_as_ascii: bool,
    pub save_points: bool,
    pub save_intensity: bool,
    pub save_probability: bool,
    pub save_occurrence: bool,
    pub save_simulation_area: bool,
    /// Surface mode: run one scenario per combustible cell instead of
    /// randomly sampled ignitions (§4.6).
    pub surface: bool,
    pub run_async: bool,
    /// Nominal step duration, seconds, before being capped by the
    /// maximum-spread-distance rule (§4.1). Not itself a named control in
    /// §6, but needed to turn that rule into a concrete step size.
    pub nominal_step_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            deterministic: false,
            minimum_ros_m_min: 0.3,
            maximum_spread_distance_cells: 1.0,
            minimum_ffmc: 0.0,
            minimum_ffmc_at_night: 0.0,
            offset_sunrise_hours: 6.0,
            offset_sunset_hours: 20.0,
            default_percent_conifer: 50,
            default_percent_dead_fir: 0,
            intensity_max_low_kw_m: 500.0,
            intensity_max_moderate_kw_m: 2_000.0,
            confidence_level: 0.95,
            maximum_time_seconds: 3_600.0,
            maximum_count_simulations: 1_000,
            threshold_scenario_weight: 1.0,
            threshold_daily_weight: 1.0,
            threshold_hourly_weight: 1.0,
            output_date_offsets: vec![1, 2, 3],
            save_individual: false,
            save_as_ascii: false,
            save_points: false,
            save_intensity: true,
            save_probability: true,
            save_occurrence: false,
            save_simulation_area: false,
            surface: false,
            run_async: true,
            nominal_step_seconds: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let s = Settings::default();
        assert!(!s.deterministic);
        assert!(s.minimum_ros_m_min > 0.0);
        assert!(s.confidence_level > 0.0 && s.confidence_level < 1.0);
    }

    #[test]
    fn percent_fields_fit_expected_range() {
        let s = Settings::default();
        assert!(s.default_percent_conifer <= 100);
        assert!(s.default_percent_dead_fir <= 100);
    }
}
