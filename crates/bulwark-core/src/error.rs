//! Error types shared across the simulation crates.
//!
//! Only genuinely exceptional conditions surface here. Steady-state
//! anomalies (firing at a dead missile, an exhausted battery asked to
//! launch) are expected and resolve as silent no-ops in the engines.

use thiserror::Error;

use crate::types::SimTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// An event was scheduled strictly before the current clock.
    /// Non-fatal: the caller reports it and the event is discarded.
    #[error("cannot schedule event at {at} before current time {now}")]
    ScheduledInPast { at: SimTime, now: SimTime },

    /// A salvo asked for more simultaneous missiles than there are
    /// ready launchers. Fatal to that salvo.
    #[error("salvo of {required} missiles exceeds {available} ready launchers")]
    NotEnoughLaunchers { required: usize, available: usize },

    /// An entity was configured with a movement or weapon category
    /// the geometry and damage tables do not recognize.
    #[error("unrecognized category '{0}'")]
    UnknownKind(String),

    /// A battery was configured with no interceptor capacity, which
    /// would make it operational with nothing to fire.
    #[error("battery '{0}' has zero interceptor capacity")]
    ZeroCapacityBattery(String),

    /// An average was requested over an empty detected set.
    #[error("statistic undefined: no targets were ever detected")]
    EmptyDetectionSet,
}
