//! Error types for the scenario engine.
//!
//! Every fallible constructor in this crate returns `Result<_, FirefrontError>`
//! rather than panicking on malformed or attacker/user-controlled input.
//! Panics are reserved for genuine programmer-error invariants (e.g. a
//! decreasing event time), which are documented at the call site.

use thiserror::Error;

/// Errors surfaced by the scenario engine's public API.
///
/// Variants map onto the "Fatal configuration" class of §7: each one is
/// something the caller should log and abort on, never something a
/// scenario thread should recover from internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FirefrontError {
    /// Two rasters that are supposed to share an extent do not.
    #[error("raster extent mismatch: {name_a} is {rows_a}x{cols_a}, {name_b} is {rows_b}x{cols_b}")]
    GridExtentMismatch {
        name_a: &'static str,
        rows_a: usize,
        cols_a: usize,
        name_b: &'static str,
        rows_b: usize,
        cols_b: usize,
    },

    /// Every cell in the grid has fuel code 0 (non-burnable).
    #[error("grid has no combustible cells")]
    EmptyFuelGrid,

    /// The grid has zero rows or zero columns.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidGridDimensions { rows: usize, cols: usize },

    /// Weather daily records for a scenario are missing a day, or the
    /// record set was empty.
    #[error("weather gap for scenario {scenario_id}: expected day index {expected_day_index}")]
    WeatherGap {
        scenario_id: u32,
        expected_day_index: u32,
    },

    /// Weather day indices are not strictly increasing.
    #[error("weather dates for scenario {scenario_id} are not monotone at day index {day_index}")]
    WeatherNotMonotone { scenario_id: u32, day_index: u32 },

    /// Weather stream crosses a year boundary, which this model does not support.
    #[error("weather stream for scenario {scenario_id} crosses a year boundary at day index {day_index}")]
    WeatherCrossesYearBoundary { scenario_id: u32, day_index: u32 },

    /// An ignition point lies outside the grid extent.
    #[error("ignition at (row {row}, col {col}) is outside the grid ({rows}x{cols})")]
    IgnitionOutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    /// No combustible cell could be found near the requested ignition, even
    /// after searching expanding rings out to the grid boundary.
    #[error("no combustible cell found within {rings_searched} rings of ignition (row {row}, col {col})")]
    NoCombustibleCellNearIgnition {
        row: i64,
        col: i64,
        rings_searched: u32,
    },

    /// An ignition perimeter polygon contained no cells at all.
    #[error("ignition perimeter contains no cells")]
    EmptyIgnitionPerimeter,

    /// Surface mode was requested with no scenario specs to take a weather
    /// stream from.
    #[error("surface mode requires at least one scenario spec to supply a weather stream")]
    SurfaceModeRequiresWeatherStream,
}

/// Convenience alias used throughout the crate's public constructors.
pub type Result<T> = std::result::Result<T, FirefrontError>;
