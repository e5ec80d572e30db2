//! Shared fixtures for the end-to-end scenario tests (§8 S1-S6).

use firefront_core::{
    Cell, DailyWeather, FuelBehaviorModel, Grid, GridCorners, SimplifiedFbpModel, WeatherStream,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[must_use]
pub fn c2_model() -> Arc<dyn FuelBehaviorModel> {
    Arc::new(SimplifiedFbpModel::fbp_default())
}

/// A `rows x cols` grid of uniform C-2 fuel, flat terrain, 100m cells.
#[must_use]
pub fn uniform_c2_grid(rows: usize, cols: usize) -> Arc<Grid> {
    let cells = vec![Cell::new(2, 0.0, 0.0); rows * cols];
    Arc::new(
        Grid::new(
            rows,
            cols,
            100.0,
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

/// Same as [`uniform_c2_grid`] but with every cell in `barrier_rows` set to
/// non-fuel, modelling the S2 barrier scenario.
#[must_use]
pub fn grid_with_barrier_rows(rows: usize, cols: usize, barrier_rows: &[usize]) -> Arc<Grid> {
    let mut cells = vec![Cell::new(2, 0.0, 0.0); rows * cols];
    for &r in barrier_rows {
        for c in 0..cols {
            cells[r * cols + c] = Cell::NONFUEL;
        }
    }
    Arc::new(
        Grid::new(
            rows,
            cols,
            100.0,
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

/// A single day of constant weather: FFMC=90, DMC=35.5, DC=275, 20 km/h wind
/// from 180 degrees, matching §8 S1's fixed conditions.
#[must_use]
pub fn constant_weather_day(day_index: u32) -> DailyWeather {
    DailyWeather {
        year: 2023,
        day_index,
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
        fwi: 14.0,
    }
}

#[must_use]
pub fn s1_weather_stream(model: &dyn FuelBehaviorModel, fuel_codes: &[u16]) -> Arc<WeatherStream> {
    let daily: Vec<DailyWeather> = (100..101).map(constant_weather_day).collect();
    Arc::new(WeatherStream::from_daily_records(1, &daily, model, fuel_codes, (0.0, 0.0)).unwrap())
}
