//! Core types and definitions for the BULWARK engagement simulations.
//!
//! This crate defines the vocabulary shared by both scenario engines:
//! simulation time, geodesic locations, the time-ordered event queue,
//! errors, and tuning constants. It has no dependency on either engine.

pub mod constants;
pub mod error;
pub mod geo;
pub mod scheduler;
pub mod types;

pub use error::SimError;
pub use geo::Location;
pub use scheduler::EventQueue;
pub use types::SimTime;

#[cfg(test)]
mod tests;
