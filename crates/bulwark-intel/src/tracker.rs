//! Trackers: correlating analyzed observations into per-TEL dossiers.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::SimTime;

use crate::observation::{DetectionMethod, Dossier, Observation, TargetId};

/// Files analyzed observations against known targets. Dossiers are
/// seeded with every real TEL up front, each opening with an
/// `Initial` record for the TEL's known starting location;
/// correlation fidelity is the policy knob.
pub trait Tracker {
    fn seed(&mut self, targets: &[TargetId]);
    fn assign(&mut self, obs: &[Observation], rng: &mut ChaCha8Rng);
    fn dossiers(&self) -> &BTreeMap<TargetId, Dossier>;
}

/// Oracle correlation: every positive observation of a known target
/// lands in the right dossier.
#[derive(Debug, Default)]
pub struct PerfectTracker {
    files: BTreeMap<TargetId, Dossier>,
}

impl Tracker for PerfectTracker {
    fn seed(&mut self, targets: &[TargetId]) {
        for &id in targets {
            self.files
                .entry(id)
                .or_default()
                .add(Observation::positive(SimTime::ZERO, DetectionMethod::Initial, id));
        }
    }

    fn assign(&mut self, obs: &[Observation], _rng: &mut ChaCha8Rng) {
        for o in obs {
            if let Some(id) = o.target {
                if let Some(file) = self.files.get_mut(&id) {
                    file.add(*o);
                }
            }
        }
    }

    fn dossiers(&self) -> &BTreeMap<TargetId, Dossier> {
        &self.files
    }
}

/// Correlation that loses a fraction of its inputs: each positive
/// observation is filed with probability `retention`, otherwise it is
/// mis-associated and discarded.
#[derive(Debug)]
pub struct DegradedTracker {
    retention: f64,
    files: BTreeMap<TargetId, Dossier>,
}

impl DegradedTracker {
    pub fn new(retention: f64) -> Self {
        Self {
            retention: retention.clamp(0.0, 1.0),
            files: BTreeMap::new(),
        }
    }
}

impl Tracker for DegradedTracker {
    fn seed(&mut self, targets: &[TargetId]) {
        for &id in targets {
            self.files
                .entry(id)
                .or_default()
                .add(Observation::positive(SimTime::ZERO, DetectionMethod::Initial, id));
        }
    }

    fn assign(&mut self, obs: &[Observation], rng: &mut ChaCha8Rng) {
        for o in obs {
            if let Some(id) = o.target {
                if rng.gen_bool(self.retention) {
                    if let Some(file) = self.files.get_mut(&id) {
                        file.add(*o);
                    }
                }
            }
        }
    }

    fn dossiers(&self) -> &BTreeMap<TargetId, Dossier> {
        &self.files
    }
}
