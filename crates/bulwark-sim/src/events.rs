//! Event payloads scheduled on the queue, and the engagement records
//! the engine emits as they resolve.
//!
//! Scheduled events carry entity handles plus an event kind and are
//! dispatched through a single match in the engine. No closures: the
//! payload is the whole event.

use serde::{Deserialize, Serialize};

use bulwark_core::SimTime;

use crate::enums::MissileKind;

/// A scheduled simulation event.
#[derive(Debug, Clone, Copy)]
pub enum EventKind {
    /// Advance every midflight missile one second and offer the
    /// defense a chance to engage each. Reschedules itself while any
    /// missile remains midflight.
    MissileTick,
    /// A missile reaches its aim point.
    MissileImpact { missile: hecs::Entity },
    /// An interceptor launched earlier arrives at the predicted
    /// intercept point.
    ResolveIntercept {
        carrier: hecs::Entity,
        battery: usize,
        missile: hecs::Entity,
    },
    /// A battery finishes its reload cycle.
    FinishReload { carrier: hecs::Entity, battery: usize },
    /// A launcher finishes reloading and returns to Ready.
    LauncherReady { launcher: hecs::Entity },
    /// Fire a launcher at a target entity.
    LaunchMissile {
        launcher: hecs::Entity,
        target: hecs::Entity,
    },
}

/// A resolved engagement record, kept in the engine log and mirrored
/// to tracing. Reporting reads these; they are never re-dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngagementEvent {
    MissileAway {
        t: SimTime,
        launcher: String,
        kind: MissileKind,
        target: String,
    },
    InterceptorAway {
        t: SimTime,
        battery: String,
        kind: MissileKind,
        distance_km: f64,
    },
    Splash {
        t: SimTime,
        battery: String,
        kind: MissileKind,
        hit: bool,
        distance_km: f64,
    },
    /// The interceptor arrived after its missile was already dead.
    InterceptorWasted {
        t: SimTime,
        battery: String,
        kind: MissileKind,
    },
    Impact {
        t: SimTime,
        kind: MissileKind,
        target: String,
    },
    SiteDestroyed { t: SimTime, name: String },
    BatteryReloading { t: SimTime, battery: String },
    BatteryReloadComplete { t: SimTime, battery: String },
    BatteryExhausted { t: SimTime, battery: String },
    LauncherExhausted { t: SimTime, launcher: String },
}
