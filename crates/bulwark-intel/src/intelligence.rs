//! Intelligence orchestrator: observe, analyze, track, and score.

use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use bulwark_core::{SimError, SimTime};

use crate::analyzer::ImageryAnalyzer;
use crate::observation::{DetectionMethod, Dossier};
use crate::observer::Observer;
use crate::tracker::Tracker;
use crate::world::HuntWorld;

/// Observations actually sensed, excluding the `Initial` record every
/// dossier opens with.
fn sensed_count(dossier: &Dossier) -> usize {
    dossier
        .observations
        .iter()
        .filter(|o| o.method != DetectionMethod::Initial)
        .count()
}

/// One sensor feeding its own analysis pipeline. Pipelines are
/// per-channel: EO backlog never stalls SAR.
pub struct Channel {
    pub observer: Box<dyn Observer>,
    pub analyzer: ImageryAnalyzer,
}

/// Detection scoreboard over the current dossiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionStats {
    pub tels_detected: usize,
    pub tels_total: usize,
    pub detected_fraction: f64,
}

pub struct Intelligence {
    channels: Vec<Channel>,
    tracker: Box<dyn Tracker>,
}

impl Intelligence {
    pub fn new(channels: Vec<Channel>, mut tracker: Box<dyn Tracker>, world: &HuntWorld) -> Self {
        tracker.seed(&world.tel_ids());
        Self { channels, tracker }
    }

    /// One collection tick: every channel observes and analyzes, the
    /// tracker files whatever came out the far end.
    pub fn process(&mut self, world: &HuntWorld, now: SimTime, rng: &mut ChaCha8Rng) {
        for channel in &mut self.channels {
            let raw = channel.observer.observe(world, now, rng);
            let analyzed = channel.analyzer.analyze(raw, now, rng);
            if !analyzed.is_empty() {
                self.tracker.assign(&analyzed, rng);
            }
        }
    }

    pub fn tracker(&self) -> &dyn Tracker {
        self.tracker.as_ref()
    }

    /// Fraction of seeded TELs with at least one sensed observation.
    pub fn detection_stats(&self) -> DetectionStats {
        let dossiers = self.tracker.dossiers();
        let tels_total = dossiers.len();
        let tels_detected = dossiers
            .values()
            .filter(|d| sensed_count(d) > 0)
            .count();
        let detected_fraction = if tels_total == 0 {
            0.0
        } else {
            tels_detected as f64 / tels_total as f64
        };
        DetectionStats {
            tels_detected,
            tels_total,
            detected_fraction,
        }
    }

    /// Average dossier depth over detected TELs only. Nothing
    /// detected yet is an error, not a zero: callers asking for this
    /// average before first detection have a scheduling bug.
    pub fn mean_observations_per_detected_tel(&self) -> Result<f64, SimError> {
        let detected: Vec<usize> = self
            .tracker
            .dossiers()
            .values()
            .map(sensed_count)
            .filter(|&n| n > 0)
            .collect();
        if detected.is_empty() {
            return Err(SimError::EmptyDetectionSet);
        }
        Ok(detected.iter().sum::<usize>() as f64 / detected.len() as f64)
    }

    pub fn report(&self, now: SimTime) {
        let stats = self.detection_stats();
        info!(
            "{now}: {} of {} TELs detected",
            stats.tels_detected, stats.tels_total
        );
    }
}
