//! Event-driven Monte-Carlo scenario engine for probabilistic wildland fire
//! growth: a landscape raster, a diurnal weather stream, an elliptical
//! spread-rate calculator, and a priority-queue scenario loop replicated
//! across random seeds until a confidence-interval stopping rule trips.

pub mod error;
pub mod fuel;
pub mod grid;
pub mod iteration;
pub mod probability;
pub mod runtime;
pub mod scenario;
pub mod settings;
pub mod spread;
#[cfg(test)]
mod test_support;
pub mod weather;

pub use error::{FirefrontError, Result};
pub use fuel::{FuelBehaviorModel, FuelWeatherInputs, SimplifiedFbpModel, SpreadInfo};
pub use grid::{
    BurnedData, BurnedDataPool, Cell, CellBurn, CellPointsMap, Grid, GridCorners, Ignition, IntensityMap,
    ResolvedIgnition,
};
pub use iteration::{IterationController, RunOutcome, RunningStats, ScenarioSpec};
pub use probability::{ProbabilityMap, ProbabilityMapExport};
pub use runtime::Runtime;
pub use scenario::{ObserverRegistry, Scenario, ScenarioNotification, ScenarioObserver, ScenarioOutcome, ScenarioState};
pub use settings::Settings;
pub use weather::{DailyWeather, WeatherStream};
