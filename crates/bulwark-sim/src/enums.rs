//! Enumeration types used throughout the duel simulation.

use serde::{Deserialize, Serialize};

/// Offensive missile category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileKind {
    /// High-arcing trajectory; fast, visible to everything.
    Ballistic,
    /// Terrain-hugging trajectory; slow, engageable only by systems
    /// with line of sight.
    Cruise,
}

/// Missile lifecycle phase. `Intercepted` and `Impacted` are terminal:
/// a missile that has left `Midflight` is inert, and every handler
/// re-checks this before acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissilePhase {
    #[default]
    Midflight,
    Intercepted,
    Impacted,
}

/// Condition of a static site. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Operational,
    Destroyed,
}

/// Interceptor battery resource state.
/// Operational -> Reloading -> Operational cycles while the reload
/// budget lasts; Exhausted is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryStatus {
    #[default]
    Operational,
    Reloading,
    Exhausted,
}

/// Launcher resource state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LauncherStatus {
    #[default]
    Ready,
    Reloading,
    Exhausted,
}

/// Which missile kinds a battery can engage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngageFilter {
    BallisticOnly,
    CruiseOnly,
    Any,
}

impl EngageFilter {
    pub fn matches(self, kind: MissileKind) -> bool {
        match self {
            EngageFilter::BallisticOnly => kind == MissileKind::Ballistic,
            EngageFilter::CruiseOnly => kind == MissileKind::Cruise,
            EngageFilter::Any => true,
        }
    }
}
