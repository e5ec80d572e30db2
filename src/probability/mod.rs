//! Concurrent-safe burn-probability accumulation (§4.5).

mod map;

pub use map::{ProbabilityMap, ProbabilityMapExport};
