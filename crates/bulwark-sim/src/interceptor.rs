//! Interceptor engagement policy and resource machine.
//!
//! Launch attempts fail silently when the battery is not operational
//! or the feasibility search says the missile cannot be reached: those
//! are steady-state outcomes, not errors.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bulwark_core::{EventQueue, Location, SimTime};

use crate::components::*;
use crate::engine::{schedule_or_warn, EngagementTuning};
use crate::enums::*;
use crate::events::{EngagementEvent, EventKind};
use crate::feasibility;

/// The fields an engagement decision needs from a missile, copied out
/// to keep hecs borrows short.
#[derive(Debug, Clone, Copy)]
struct MissilePicture {
    kind: MissileKind,
    phase: MissilePhase,
    speed_kms: f64,
    loc: Location,
    aim: Location,
    inbound: u32,
}

fn read_missile(world: &World, missile: Entity) -> Option<MissilePicture> {
    let body = world.get::<&MissileBody>(missile).ok()?;
    let loc = world.get::<&Location>(missile).ok()?;
    let aim = world.get::<&Location>(body.target).ok()?;
    Some(MissilePicture {
        kind: body.kind,
        phase: body.phase,
        speed_kms: body.speed_kms,
        loc: *loc,
        aim: *aim,
        inbound: body.interceptors_inbound,
    })
}

/// Give every operational carrier a chance to shoot at one missile.
///
/// Engagement policy by missile kind:
/// - Cruise: shoot-look-shoot. A battery only commits while no
///   interceptor is in flight toward the missile; the next shot waits
///   on the previous outcome.
/// - Ballistic: shoot-look-shoot is not assumed feasible. Batteries
///   commit back-to-back until two interceptors are in flight,
///   stopping early as soon as a launch attempt fails.
pub(crate) fn offer_engagements(
    world: &mut World,
    queue: &mut EventQueue<EventKind>,
    log: &mut Vec<EngagementEvent>,
    now: SimTime,
    missile: Entity,
) {
    let carriers: Vec<(Entity, Location, usize)> = world
        .query::<(&InterceptorLoadout, &Location, &Condition)>()
        .iter()
        .filter(|(_, (_, _, cond))| **cond == Condition::Operational)
        .map(|(e, (loadout, loc, _))| (e, *loc, loadout.batteries.len()))
        .collect();

    for (carrier, carrier_loc, battery_count) in carriers {
        // Batteries are ordered best-first within a loadout.
        for battery_idx in 0..battery_count {
            let picture = match read_missile(world, missile) {
                Some(p) if p.phase == MissilePhase::Midflight => p,
                _ => return,
            };
            match picture.kind {
                MissileKind::Cruise => {
                    if picture.inbound < 1 {
                        try_launch(
                            world, queue, log, now, carrier, carrier_loc, battery_idx, missile,
                            &picture,
                        );
                    }
                }
                MissileKind::Ballistic => {
                    let mut inbound = picture.inbound;
                    while inbound < 2 {
                        if !try_launch(
                            world, queue, log, now, carrier, carrier_loc, battery_idx, missile,
                            &picture,
                        ) {
                            break;
                        }
                        inbound += 1;
                    }
                }
            }
        }
    }
}

/// Attempt to launch one interceptor from a battery at a missile.
/// Returns true iff an interceptor left the rail.
#[allow(clippy::too_many_arguments)]
fn try_launch(
    world: &mut World,
    queue: &mut EventQueue<EventKind>,
    log: &mut Vec<EngagementEvent>,
    now: SimTime,
    carrier: Entity,
    carrier_loc: Location,
    battery_idx: usize,
    missile: Entity,
    picture: &MissilePicture,
) -> bool {
    let (battery_name, time_to_intercept) = {
        let mut loadout = match world.get::<&mut InterceptorLoadout>(carrier) {
            Ok(l) => l,
            Err(_) => return false,
        };
        let battery = &mut loadout.batteries[battery_idx];

        if battery.status != BatteryStatus::Operational || !battery.engages.matches(picture.kind) {
            return false;
        }

        let dt = match feasibility::intercept_time(
            &picture.loc,
            &picture.aim,
            picture.speed_kms,
            &carrier_loc,
            battery.speed_kms,
            battery.max_range_km,
        ) {
            Some(dt) => dt,
            None => return false,
        };

        // A drained pool cannot fire, whatever the status says.
        if battery.ready == 0 {
            return false;
        }
        battery.ready -= 1;
        let name = battery.name.clone();

        // Firing the last round drains the pool: reload if budget
        // remains, otherwise the battery is spent for good.
        if battery.ready == 0 {
            if battery.reloads > 0 {
                battery.status = BatteryStatus::Reloading;
                battery.reloads -= 1;
                schedule_or_warn(
                    queue,
                    now + battery.reload_secs,
                    EventKind::FinishReload {
                        carrier,
                        battery: battery_idx,
                    },
                );
                info!("{now}: {name} reloading");
                log.push(EngagementEvent::BatteryReloading {
                    t: now,
                    battery: name.clone(),
                });
            } else {
                battery.status = BatteryStatus::Exhausted;
                info!("{now}: {name} exhausted");
                log.push(EngagementEvent::BatteryExhausted {
                    t: now,
                    battery: name.clone(),
                });
            }
        }
        (name, dt)
    };

    if let Ok(mut body) = world.get::<&mut MissileBody>(missile) {
        body.interceptors_inbound += 1;
    }

    let distance_km = carrier_loc.distance_km(&picture.loc);
    info!(
        "{now}: {battery_name} launching interceptor toward {:?} missile, {distance_km:.0} km out",
        picture.kind
    );
    log.push(EngagementEvent::InterceptorAway {
        t: now,
        battery: battery_name,
        kind: picture.kind,
        distance_km,
    });

    schedule_or_warn(
        queue,
        now + time_to_intercept,
        EventKind::ResolveIntercept {
            carrier,
            battery: battery_idx,
            missile,
        },
    );
    true
}

/// Resolve an interceptor arriving at its predicted point.
/// Returns true iff the missile was destroyed (the engine owns the
/// midflight refcount and decrements it on a terminal transition).
pub(crate) fn resolve_intercept(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &EngagementTuning,
    log: &mut Vec<EngagementEvent>,
    now: SimTime,
    carrier: Entity,
    battery_idx: usize,
    missile: Entity,
) -> bool {
    let battery_name = world
        .get::<&InterceptorLoadout>(carrier)
        .ok()
        .and_then(|l| l.batteries.get(battery_idx).map(|b| b.name.clone()))
        .unwrap_or_else(|| "battery".to_string());

    let (kind, phase) = {
        let mut body = match world.get::<&mut MissileBody>(missile) {
            Ok(b) => b,
            Err(_) => return false,
        };
        body.interceptors_inbound = body.interceptors_inbound.saturating_sub(1);
        (body.kind, body.phase)
    };

    if phase != MissilePhase::Midflight {
        debug!("{now}: {battery_name} interceptor wasted, {kind:?} missile no longer in flight");
        log.push(EngagementEvent::InterceptorWasted {
            t: now,
            battery: battery_name,
            kind,
        });
        return false;
    }

    let missile_loc = match world.get::<&Location>(missile) {
        Ok(l) => *l,
        Err(_) => return false,
    };

    // Any operational cueing sensor within its own coverage radius of
    // the missile's present position is sufficient for the higher Pk.
    let cued = world
        .query::<(&RadarCoverage, &Location, &Condition)>()
        .iter()
        .any(|(_, (cov, loc, cond))| {
            *cond == Condition::Operational && loc.distance_km(&missile_loc) <= cov.range_km
        });
    let p_kill = if cued {
        tuning.p_kill_cued
    } else {
        tuning.p_kill_bare
    };

    let carrier_distance = world
        .get::<&Location>(carrier)
        .map(|l| l.distance_km(&missile_loc))
        .unwrap_or(f64::NAN);

    let hit = rng.gen_bool(p_kill.clamp(0.0, 1.0));
    if hit {
        if let Ok(mut body) = world.get::<&mut MissileBody>(missile) {
            body.phase = MissilePhase::Intercepted;
        }
        info!("{now}: {battery_name} destroyed {kind:?} missile, {carrier_distance:.0} km out");
    } else {
        info!("{now}: {battery_name} missed {kind:?} missile, {carrier_distance:.0} km out");
    }
    log.push(EngagementEvent::Splash {
        t: now,
        battery: battery_name,
        kind,
        hit,
        distance_km: carrier_distance,
    });
    hit
}

/// Finish a battery reload: rounds restored to capacity, status back
/// to operational.
pub(crate) fn finish_reload(
    world: &mut World,
    log: &mut Vec<EngagementEvent>,
    now: SimTime,
    carrier: Entity,
    battery_idx: usize,
) {
    if let Ok(mut loadout) = world.get::<&mut InterceptorLoadout>(carrier) {
        if let Some(battery) = loadout.batteries.get_mut(battery_idx) {
            if battery.status == BatteryStatus::Reloading {
                battery.ready = battery.capacity;
                battery.status = BatteryStatus::Operational;
                info!(
                    "{now}: {} reload complete, {} interceptors available",
                    battery.name, battery.ready
                );
                log.push(EngagementEvent::BatteryReloadComplete {
                    t: now,
                    battery: battery.name.clone(),
                });
            }
        }
    }
}
