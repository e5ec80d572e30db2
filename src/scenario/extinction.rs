//! Per-scenario random threshold vectors and the spread/survival gates
//! they drive (§4.3).

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// One threshold per simulated hour, drawn from `U[0, 1)` at scenario
/// reset. Two independent vectors exist per scenario: spread and
/// extinction (survival).
#[derive(Debug, Clone)]
pub struct ThresholdVector {
    values: Vec<f64>,
}

impl ThresholdVector {
    /// Draw `hours` independent `U[0, 1)` samples from `rng`.
    #[must_use]
    pub fn sampled(rng: &mut ChaCha8Rng, hours: usize) -> Self {
        let values = (0..hours).map(|_| rng.random::<f64>()).collect();
        Self { values }
    }

    /// A vector that always evaluates as "pass" (deterministic mode, §4.3:
    /// "both gates always pass").
    #[must_use]
    pub fn deterministic(hours: usize) -> Self {
        Self {
            values: vec![1.0; hours],
        }
    }

    /// The threshold in effect at `hour_since_start`, clamped to the last
    /// sampled hour if the scenario runs longer than the vector covers.
    #[must_use]
    pub fn at_hour(&self, hour_since_start: usize) -> f64 {
        let idx = hour_since_start.min(self.values.len().saturating_sub(1));
        self.values.get(idx).copied().unwrap_or(1.0)
    }
}

/// Evaluate whether a cell's spread attempt passes the stochastic spread
/// gate. A cell below the minimum ROS never passes. Above that floor, the
/// gate draws against a pass probability that rises linearly with how far
/// `ros_m_min` clears `minimum_ros_m_min`, reaching `1.0` once ROS has
/// doubled the minimum — so a front barely above the floor rarely
/// propagates, while a front well clear of it almost always does. The
/// deterministic sentinel (`ThresholdVector::deterministic`, pinned at
/// `1.0`, outside the sampled `[0, 1)` range) always passes once the ROS
/// floor is met, matching "both gates always pass" in deterministic mode.
#[must_use]
pub fn passes_spread_gate(spread_threshold: f64, minimum_ros_m_min: f64, ros_m_min: f64) -> bool {
    if ros_m_min < minimum_ros_m_min {
        return false;
    }
    if spread_threshold >= 1.0 {
        return true;
    }
    let scale = minimum_ros_m_min.max(f64::EPSILON);
    let pass_probability = ((ros_m_min - minimum_ros_m_min) / scale).clamp(0.0, 1.0);
    spread_threshold < pass_probability
}

/// Evaluate whether a cell survives into the next hour: either its
/// moisture is below the fixed piecewise limit (modelled here via the
/// fuel's own dryness being high enough that `survival_probability` alone
/// decides, matching §4.3's single practical gate for this engine), or the
/// drawn extinction threshold is below the fuel/weather-derived survival
/// probability.
#[must_use]
pub fn survives(extinction_threshold: f64, survival_probability: f64) -> bool {
    extinction_threshold < survival_probability
}
