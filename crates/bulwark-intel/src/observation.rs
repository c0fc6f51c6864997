//! Observations: the currency every sensor, analyzer, and tracker
//! trades in.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};

use bulwark_core::SimTime;

/// Unique identifier of a trackable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Position known at simulation start, not sensed.
    Initial,
    /// Electro-optical imagery.
    Eo,
    /// Synthetic-aperture radar.
    Sar,
}

/// State a TEL can be observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TelState {
    InBase,
    Roaming,
    Sheltering,
}

/// A single sensing result, positive or negative.
///
/// Immutable once created and totally ordered by time, so a
/// collection of observations sorts into chronological order. One
/// observation can stand for many real-world images: a satellite pass
/// returning ten million empty tiles is one `Observation` with
/// `target: None` and `multiplicity: 10_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Observation {
    pub t: SimTime,
    pub method: DetectionMethod,
    /// The object this observation corresponds to, if any. `None`
    /// marks a negative observation.
    pub target: Option<TargetId>,
    /// Observed TEL state, when the sensor can tell.
    pub state: Option<TelState>,
    pub multiplicity: u64,
}

impl Observation {
    pub fn positive(t: SimTime, method: DetectionMethod, target: TargetId) -> Self {
        Self {
            t,
            method,
            target: Some(target),
            state: None,
            multiplicity: 1,
        }
    }

    pub fn negative(t: SimTime, method: DetectionMethod, multiplicity: u64) -> Self {
        Self {
            t,
            method,
            target: None,
            state: None,
            multiplicity,
        }
    }

    /// Keep each of the `multiplicity` underlying observations
    /// independently with probability `p`. Returns `None` when none
    /// survive. Thinning never increases multiplicity.
    pub fn sample(&self, p: f64, rng: &mut ChaCha8Rng) -> Option<Observation> {
        let p = p.clamp(0.0, 1.0);
        let kept = match Binomial::new(self.multiplicity, p) {
            Ok(dist) => dist.sample(rng),
            // n = 0 or degenerate p; fall back to a direct roll.
            Err(_) => self.multiplicity * u64::from(rng.gen_bool(p)),
        };
        (kept > 0).then_some(Observation {
            multiplicity: kept,
            ..*self
        })
    }
}

/// Per-target intelligence file: every observation correlated to one
/// TEL, in the order it was filed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dossier {
    pub observations: Vec<Observation>,
}

impl Dossier {
    pub fn add(&mut self, obs: Observation) {
        self.observations.push(obs);
    }
}

/// Total real-world observations a batch stands for.
pub fn total_multiplicity(obs: &[Observation]) -> u64 {
    obs.iter().map(|o| o.multiplicity).sum()
}
