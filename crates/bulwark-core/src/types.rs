//! Simulation time.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Simulation clock reading in whole seconds since scenario start.
///
/// Events fire at one-second resolution; integer seconds keep heap
/// ordering exact and replays bit-for-bit reproducible.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_secs(secs: u64) -> Self {
        SimTime(secs)
    }

    pub fn from_mins(mins: u64) -> Self {
        SimTime(mins * crate::constants::MINUTE)
    }

    pub fn from_hours(hours: u64) -> Self {
        SimTime(hours * crate::constants::HOUR)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }

    /// Whole minutes elapsed since `earlier`. Saturates at zero.
    pub fn minutes_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0) / crate::constants::MINUTE
    }

    /// Hour of the local day, for diurnal gating.
    pub fn hour_of_day(self) -> u64 {
        (self.0 / crate::constants::HOUR) % 24
    }
}

impl Add<u64> for SimTime {
    type Output = SimTime;

    fn add(self, secs: u64) -> SimTime {
        SimTime(self.0 + secs)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = u64;

    /// Seconds elapsed since `rhs`. Saturates at zero.
    fn sub(self, rhs: SimTime) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}s", self.0)
    }
}
