//! Two-stage imagery analysis pipeline.
//!
//! Raw imagery first passes an automated screening stage, then queues
//! for human review, which clears a fixed number of images per
//! minute. Each stage holds at most one batch; a raw batch arriving
//! while screening is busy is simply dropped, to show up again on the
//! owning sensor's next pass. Total multiplicity never increases
//! across a stage.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use bulwark_core::SimTime;

use crate::config::AnalyzerConfig;
use crate::observation::{total_multiplicity, Observation};

#[derive(Debug, Clone)]
struct Batch {
    started: SimTime,
    obs: Vec<Observation>,
}

pub struct ImageryAnalyzer {
    config: AnalyzerConfig,
    /// Batch in the automated screening stage.
    auto_processing: Option<Batch>,
    /// Screened batch waiting for a free review cell.
    awaiting_review: Option<Vec<Observation>>,
    /// Batch under human review.
    review: Option<Batch>,
}

impl ImageryAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            auto_processing: None,
            awaiting_review: None,
            review: None,
        }
    }

    /// Advance the pipeline one collection tick.
    ///
    /// Finishes review and screening stages that have run their
    /// course, promotes the waiting batch, then admits `incoming`
    /// into screening if the slot is free. Returns the fully analyzed
    /// observations, which generally arrived several ticks ago.
    pub fn analyze(
        &mut self,
        incoming: Vec<Observation>,
        now: SimTime,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Observation> {
        let mut released = Vec::new();

        if let Some(batch) = self.review.take() {
            let workload = total_multiplicity(&batch.obs);
            let elapsed_mins = now.minutes_since(batch.started);
            if elapsed_mins * self.config.review_rate_per_min >= workload {
                released = screen(batch.obs, self.config.review_fp, self.config.review_fn, rng);
                debug!(
                    "{now}: review cleared {workload} images, {} survive",
                    total_multiplicity(&released)
                );
            } else {
                self.review = Some(batch);
            }
        }

        if let Some(batch) = self.auto_processing.take() {
            if (now - batch.started) >= self.config.auto_duration_secs {
                let screened = screen(batch.obs, self.config.auto_fp, self.config.auto_fn, rng);
                debug!(
                    "{now}: automated screening done, {} flagged for review",
                    total_multiplicity(&screened)
                );
                self.awaiting_review = Some(screened);
            } else {
                self.auto_processing = Some(batch);
            }
        }

        if self.review.is_none() {
            if let Some(obs) = self.awaiting_review.take() {
                self.review = Some(Batch { started: now, obs });
            }
        }

        if self.auto_processing.is_none() && !incoming.is_empty() {
            debug!(
                "{now}: {} raw images admitted to screening",
                total_multiplicity(&incoming)
            );
            self.auto_processing = Some(Batch {
                started: now,
                obs: incoming,
            });
        }

        released
    }
}

/// One screening pass: each positive survives with probability
/// `1 - fn`, each underlying negative is mistaken for a TEL with
/// probability `fp`. Observations thinned to nothing disappear.
fn screen(
    obs: Vec<Observation>,
    fp: f64,
    fn_rate: f64,
    rng: &mut ChaCha8Rng,
) -> Vec<Observation> {
    obs.into_iter()
        .filter_map(|o| {
            let p = if o.target.is_some() { 1.0 - fn_rate } else { fp };
            o.sample(p, rng)
        })
        .collect()
}
