//! Weather streams: daily observations expanded into an hourly diurnal
//! series, plus precomputed per-minute fuel survival probabilities (§4.4).

mod diurnal;
mod record;
mod stream;
mod survival;

pub use diurnal::{build_hourly_series, WIND_DIURNAL_PROPORTIONS};
pub use record::{DailyWeather, HourlyWeather, RhCategory};
pub use stream::WeatherStream;
pub use survival::{build_survival_tables, SurvivalTable};
