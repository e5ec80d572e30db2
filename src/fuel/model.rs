//! The `FuelBehaviorModel` trait boundary and its input/output types.

/// The weather and terrain inputs the fuel-behaviour model needs to
/// evaluate one `(cell, hour)` pair (§3 `SpreadInfo` / §4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelWeatherInputs {
    pub slope_pct: f64,
    pub aspect_deg: f64,
    pub wind_speed_kmh: f64,
    pub wind_dir_deg: f64,
    pub ffmc: f64,
    pub bui: f64,
    pub foliar_moisture_pct: f64,
}

/// The result of evaluating fuel behaviour for one `(cell, weather)` pair
/// (§3). Everything downstream of the spread calculator operates on this
/// struct and never touches fuel-model internals directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadInfo {
    /// Head fire rate of spread, m/min.
    pub head_ros_m_min: f64,
    /// Head fire direction, radians clockwise from north.
    pub head_direction_rad: f64,
    /// Length-to-breadth ratio of the elliptical front.
    pub length_to_breadth: f64,
    /// Crown fraction burned, `0..=1`.
    pub crown_fraction_burned: f64,
    /// Fuel consumption, kg/m^2.
    pub fuel_consumption_kg_m2: f64,
    /// Maximum fire-line intensity, kW/m.
    pub max_intensity_kw_m: f64,
}

impl SpreadInfo {
    /// A spread result representing complete non-spread (e.g. non-fuel, or
    /// fuel too wet/below minimum ROS threshold).
    pub const NONE: SpreadInfo = SpreadInfo {
        head_ros_m_min: 0.0,
        head_direction_rad: 0.0,
        length_to_breadth: 1.0,
        crown_fraction_burned: 0.0,
        fuel_consumption_kg_m2: 0.0,
        max_intensity_kw_m: 0.0,
    };
}

/// The external collaborator boundary for fuel behaviour (§1, §9).
///
/// Implementations map `(fuel_code, FuelWeatherInputs) -> SpreadInfo`.
/// `fuel_code == 0` (non-fuel) must not reach implementations at all — the
/// spread calculator short-circuits before calling this trait, per the
/// "exception for control flow" redesign note in §9: the "invalid fuel"
/// placeholder becomes simply "don't call the model."
pub trait FuelBehaviorModel: Send + Sync {
    /// Evaluate spread behaviour for a known, combustible fuel code.
    ///
    /// Returns `None` if `fuel_code` is not recognised by this model (the
    /// §7 "unknown fuel-table entry" case); callers treat that identically
    /// to non-fuel.
    fn evaluate(&self, fuel_code: u16, inputs: FuelWeatherInputs) -> Option<SpreadInfo>;

    /// Whether this model recognises `fuel_code` at all (used for the
    /// grid's unknown-fuel-code warning pass, §7).
    fn is_known(&self, fuel_code: u16) -> bool;

    /// Fuel-and-moisture-derived survival probability used by the
    /// extinction gate (§4.3), in `0.0..=1.0`.
    fn survival_probability(&self, fuel_code: u16, inputs: FuelWeatherInputs) -> f64;
}
