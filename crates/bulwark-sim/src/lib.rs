//! Intercept-duel engine for BULWARK.
//!
//! Owns a hecs world of defended sites, launchers, and missiles, and
//! drives them from a single time-ordered event queue. Completely
//! headless: reporting reads serializable snapshots.

pub mod components;
pub mod engine;
pub mod enums;
pub mod events;
pub mod feasibility;
pub mod interceptor;
pub mod salvo;
pub mod scenario;
pub mod snapshot;

pub use bulwark_core as core;
pub use engine::{DuelConfig, DuelEngine};

#[cfg(test)]
mod tests;
