//! Hunt configuration: plain serde structs with defaults drawn from
//! open-source estimates of imagery analysis performance.

use serde::{Deserialize, Serialize};

use crate::observation::TelState;

/// Two-stage analysis pipeline parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Wall-clock length of the automated stage.
    pub auto_duration_secs: u64,
    /// Automated stage error rates.
    pub auto_fp: f64,
    pub auto_fn: f64,
    /// Human review error rates.
    pub review_fp: f64,
    pub review_fn: f64,
    /// Images a review cell clears per minute.
    pub review_rate_per_min: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            auto_duration_secs: 5 * 60,
            auto_fp: 0.00145,
            auto_fn: 0.05,
            review_fp: 0.0005,
            review_fn: 0.05,
            review_rate_per_min: 7800,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EoConfig {
    /// Aggregate empty-tile count per pass over one base.
    pub negative_multiplicity: u64,
    /// Fraction of a base's truck population on the road at once.
    pub truck_utilization: f64,
    /// Chance of seeing through scattered cloud.
    pub cloudy_visibility: f64,
}

impl Default for EoConfig {
    fn default() -> Self {
        Self {
            negative_multiplicity: 20_000_000,
            truck_utilization: 0.25,
            cloudy_visibility: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SarConfig {
    /// Minutes between passes over any one base.
    pub cadence_mins: u64,
    /// Aggregate empty-tile count per pass over one base.
    pub negative_multiplicity: u64,
    /// Fraction of a base's truck population moving fast enough to
    /// register as movers.
    pub truck_movers: f64,
}

impl Default for SarConfig {
    fn default() -> Self {
        Self {
            cadence_mins: 90,
            negative_multiplicity: 2_000_000,
            truck_movers: 0.5,
        }
    }
}

/// Base weather draw, rolled once per TEL cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherProbs {
    pub clear: f64,
    pub cloudy: f64,
    /// Remainder is overcast.
    pub overcast: f64,
}

impl Default for WeatherProbs {
    fn default() -> Self {
        Self {
            clear: 0.5,
            cloudy: 0.3,
            overcast: 0.2,
        }
    }
}

/// Hourly TEL state transition table, one row per current state,
/// separate day and night rows. Each row is `[in_base, roaming,
/// sheltering]` probabilities summing to one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitionTable {
    pub day: [[f64; 3]; 3],
    pub night: [[f64; 3]; 3],
}

impl TransitionTable {
    pub fn row(&self, state: TelState, day: bool) -> [f64; 3] {
        let table = if day { &self.day } else { &self.night };
        table[match state {
            TelState::InBase => 0,
            TelState::Roaming => 1,
            TelState::Sheltering => 2,
        }]
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        // Roam mostly by night, sit in base or shelter by day.
        Self {
            day: [
                [0.8, 0.1, 0.1],
                [0.3, 0.5, 0.2],
                [0.3, 0.1, 0.6],
            ],
            night: [
                [0.4, 0.5, 0.1],
                [0.1, 0.8, 0.1],
                [0.2, 0.4, 0.4],
            ],
        }
    }
}
