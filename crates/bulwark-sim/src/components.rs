//! hecs components for duel entities.
//!
//! Components are plain data; engagement logic lives in the engine
//! and the interceptor module. Cross-entity references are
//! `hecs::Entity` handles, never owned pointers.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Display name of an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

/// Damage-point values a site takes per impact, by missile kind, and
/// the threshold at which it is destroyed. Values differ by site
/// class (a radar dies faster than an airbase).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageProfile {
    pub cruise_points: u32,
    pub ballistic_points: u32,
    pub destroy_threshold: u32,
}

impl DamageProfile {
    pub fn points_for(&self, kind: MissileKind) -> u32 {
        match kind {
            MissileKind::Cruise => self.cruise_points,
            MissileKind::Ballistic => self.ballistic_points,
        }
    }
}

/// Accumulated damage points on a site.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageState {
    pub points: u32,
}

/// A sensor that cues interceptors: any operational coverage within
/// `range_km` of a missile raises the kill probability at resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarCoverage {
    pub range_km: f64,
}

/// One interceptor resource pool owned by a carrier entity.
///
/// Invariants: `0 <= ready <= capacity`; status is `Exhausted` iff
/// `ready == 0 && reloads == 0`, and never changes afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    pub name: String,
    /// Interceptor fly-out speed, km/s.
    pub speed_kms: f64,
    /// Maximum engagement range, km.
    pub max_range_km: f64,
    /// Interceptors restored by a completed reload.
    pub capacity: u32,
    /// Interceptors currently ready to fire.
    pub ready: u32,
    /// Fixed reload duration, seconds.
    pub reload_secs: u64,
    /// Remaining reload cycles.
    pub reloads: u32,
    pub status: BatteryStatus,
    pub engages: EngageFilter,
}

/// The ordered set of batteries a carrier fights with, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptorLoadout {
    pub batteries: Vec<Battery>,
}

/// A missile in flight toward a fixed aim point.
#[derive(Debug, Clone)]
pub struct MissileBody {
    pub kind: MissileKind,
    /// Flight speed, km/s.
    pub speed_kms: f64,
    /// The entity this missile was aimed at; the missile flies
    /// straight toward its location.
    pub target: hecs::Entity,
    pub phase: MissilePhase,
    /// Interceptors currently en route to this missile.
    pub interceptors_inbound: u32,
}

/// A missile launcher and its reload budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherUnit {
    pub kind: MissileKind,
    /// Speed of the missiles this launcher fires, km/s.
    pub missile_speed_kms: f64,
    pub reload_secs: u64,
    pub reloads: u32,
    pub status: LauncherStatus,
}
