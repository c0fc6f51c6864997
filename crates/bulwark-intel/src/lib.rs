//! Mobile-launcher hunt engine for BULWARK.
//!
//! Models the search for transporter-erector-launchers (TELs) hiding
//! among ordinary traffic: sensor passes over their bases, a
//! two-stage imagery analysis pipeline, and trackers filing analyzed
//! detections into per-TEL dossiers. TELs have no precise position,
//! only a base and a state, so no detection here is ever a firing
//! solution; it is a statistic.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod intelligence;
pub mod observation;
pub mod observer;
pub mod tracker;
pub mod world;

pub use bulwark_core as core;
pub use engine::{HuntConfig, HuntEngine};
pub use observation::{DetectionMethod, Observation, TargetId};
