//! Duel simulation engine.
//!
//! `DuelEngine` owns the hecs world, the event queue, and the seeded
//! RNG, and resolves every scheduled event through a single dispatch
//! match. All waiting is a future event; all "cancellation" is a
//! handler re-checking entity state before acting.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use bulwark_core::constants::{P_KILL_BARE, P_KILL_CUED};
use bulwark_core::{EventQueue, Location, SimError, SimTime};

use crate::components::*;
use crate::enums::*;
use crate::events::{EngagementEvent, EventKind};
use crate::feasibility;
use crate::interceptor;

/// Kill-probability tuning, overridable per scenario.
#[derive(Debug, Clone, Copy)]
pub struct EngagementTuning {
    /// Kill probability with no sensor cue.
    pub p_kill_bare: f64,
    /// Kill probability when an operational sensor covers the target.
    pub p_kill_cued: f64,
}

impl Default for EngagementTuning {
    fn default() -> Self {
        Self {
            p_kill_bare: P_KILL_BARE,
            p_kill_cued: P_KILL_CUED,
        }
    }
}

/// Configuration for starting a duel run.
#[derive(Debug, Clone)]
pub struct DuelConfig {
    /// RNG seed. Same seed, same schedule calls: same run.
    pub seed: u64,
    /// Events strictly after this time are never executed.
    pub horizon: Option<SimTime>,
    pub tuning: EngagementTuning,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            horizon: None,
            tuning: EngagementTuning::default(),
        }
    }
}

/// The duel engine. Owns all simulation state.
pub struct DuelEngine {
    world: World,
    queue: EventQueue<EventKind>,
    rng: ChaCha8Rng,
    tuning: EngagementTuning,
    horizon: Option<SimTime>,
    /// Midflight missile refcount. The per-second movement tick is
    /// only kept on the queue while this is positive, bounding queue
    /// growth when nothing is flying.
    midflight: u32,
    tick_pending: bool,
    missile_seq: u64,
    log: Vec<EngagementEvent>,
}

impl DuelEngine {
    pub fn new(config: DuelConfig) -> Self {
        Self {
            world: World::new(),
            queue: EventQueue::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            horizon: config.horizon,
            midflight: 0,
            tick_pending: false,
            missile_seq: 0,
            log: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Current simulation time (time of the last executed event).
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// Engagement records emitted so far, in execution order.
    pub fn log(&self) -> &[EngagementEvent] {
        &self.log
    }

    pub fn midflight_missiles(&self) -> u32 {
        self.midflight
    }

    /// Schedule an event at an absolute time.
    pub fn schedule(&mut self, at: SimTime, event: EventKind) -> Result<(), SimError> {
        self.queue.schedule(at, event)
    }

    /// Plan a salvo against this engine's queue.
    pub fn plan_salvo(
        &mut self,
        at: SimTime,
        launchers: &[Entity],
        targets: &[Entity],
    ) -> Result<(), SimError> {
        crate::salvo::plan_salvo(&mut self.queue, at, launchers, targets)
    }

    /// Run until the queue empties or the horizon is exceeded. Events
    /// past the horizon are abandoned, not drained.
    pub fn run(&mut self) {
        while let Some((t, event)) = self.queue.pop() {
            if let Some(horizon) = self.horizon {
                if t > horizon {
                    debug!("{t}: horizon {horizon} exceeded, abandoning {} events", self.queue.len() + 1);
                    break;
                }
            }
            self.dispatch(t, event);
        }
    }

    fn dispatch(&mut self, t: SimTime, event: EventKind) {
        match event {
            EventKind::MissileTick => self.on_missile_tick(t),
            EventKind::MissileImpact { missile } => self.on_missile_impact(t, missile),
            EventKind::ResolveIntercept {
                carrier,
                battery,
                missile,
            } => {
                let destroyed = interceptor::resolve_intercept(
                    &mut self.world,
                    &mut self.rng,
                    &self.tuning,
                    &mut self.log,
                    t,
                    carrier,
                    battery,
                    missile,
                );
                if destroyed {
                    self.midflight = self.midflight.saturating_sub(1);
                }
            }
            EventKind::FinishReload { carrier, battery } => {
                interceptor::finish_reload(&mut self.world, &mut self.log, t, carrier, battery);
            }
            EventKind::LauncherReady { launcher } => self.on_launcher_ready(launcher),
            EventKind::LaunchMissile { launcher, target } => {
                self.on_launch_missile(t, launcher, target)
            }
        }
    }

    /// Advance every midflight missile one second toward its aim
    /// point, then let the defense react to each. Reschedules itself
    /// while anything is still flying.
    fn on_missile_tick(&mut self, t: SimTime) {
        self.tick_pending = false;
        if self.midflight == 0 {
            return;
        }

        let flying: Vec<(Entity, Entity, f64)> = self
            .world
            .query::<&MissileBody>()
            .iter()
            .filter(|(_, body)| body.phase == MissilePhase::Midflight)
            .map(|(e, body)| (e, body.target, body.speed_kms))
            .collect();

        for &(missile, target, speed) in &flying {
            let aim = match self.world.get::<&Location>(target) {
                Ok(l) => *l,
                Err(_) => continue,
            };
            if let Ok(mut loc) = self.world.get::<&mut Location>(missile) {
                *loc = feasibility::advance_towards(&loc, &aim, speed);
            }
        }

        for &(missile, _, _) in &flying {
            interceptor::offer_engagements(
                &mut self.world,
                &mut self.queue,
                &mut self.log,
                t,
                missile,
            );
        }

        self.ensure_tick(t);
    }

    /// A missile reaches its aim point. No-op unless still midflight;
    /// otherwise the target soaks damage and may be destroyed.
    fn on_missile_impact(&mut self, t: SimTime, missile: Entity) {
        let (kind, target) = {
            let mut body = match self.world.get::<&mut MissileBody>(missile) {
                Ok(b) => b,
                Err(_) => return,
            };
            if body.phase != MissilePhase::Midflight {
                return;
            }
            body.phase = MissilePhase::Impacted;
            (body.kind, body.target)
        };
        self.midflight = self.midflight.saturating_sub(1);

        let target_name = self
            .world
            .get::<&Name>(target)
            .map(|n| n.0.clone())
            .unwrap_or_else(|_| "target".to_string());
        info!("{t}: {kind:?} missile impact on {target_name}");
        self.log.push(EngagementEvent::Impact {
            t,
            kind,
            target: target_name.clone(),
        });

        // Destroyed sites soak further hits with no effect.
        let destroyed = {
            let cond = match self.world.get::<&Condition>(target) {
                Ok(c) => *c,
                Err(_) => return,
            };
            if cond == Condition::Destroyed {
                return;
            }
            let profile = match self.world.get::<&DamageProfile>(target) {
                Ok(p) => *p,
                Err(_) => return,
            };
            let mut damage = match self.world.get::<&mut DamageState>(target) {
                Ok(d) => d,
                Err(_) => return,
            };
            damage.points += profile.points_for(kind);
            damage.points >= profile.destroy_threshold
        };

        if destroyed {
            if let Ok(mut cond) = self.world.get::<&mut Condition>(target) {
                *cond = Condition::Destroyed;
            }
            info!("{t}: {target_name} destroyed");
            self.log.push(EngagementEvent::SiteDestroyed {
                t,
                name: target_name,
            });
        }
    }

    /// Fire a launcher at a target. Silent no-op unless the launcher
    /// is ready; afterwards the launcher reloads or is exhausted.
    fn on_launch_missile(&mut self, t: SimTime, launcher: Entity, target: Entity) {
        let (kind, speed, launcher_loc, launcher_name) = {
            let unit = match self.world.get::<&LauncherUnit>(launcher) {
                Ok(u) => u,
                Err(_) => return,
            };
            if unit.status != LauncherStatus::Ready {
                return;
            }
            let loc = match self.world.get::<&Location>(launcher) {
                Ok(l) => *l,
                Err(_) => return,
            };
            let name = self
                .world
                .get::<&Name>(launcher)
                .map(|n| n.0.clone())
                .unwrap_or_else(|_| "launcher".to_string());
            (unit.kind, unit.missile_speed_kms, loc, name)
        };
        let (aim, target_name) = {
            let loc = match self.world.get::<&Location>(target) {
                Ok(l) => *l,
                Err(_) => return,
            };
            let name = self
                .world
                .get::<&Name>(target)
                .map(|n| n.0.clone())
                .unwrap_or_else(|_| "target".to_string());
            (loc, name)
        };

        let name = format!("{:?}_missile_{}", kind, self.missile_seq).to_lowercase();
        self.missile_seq += 1;
        let missile = self.world.spawn((
            Name(name),
            launcher_loc,
            MissileBody {
                kind,
                speed_kms: speed,
                target,
                phase: MissilePhase::Midflight,
                interceptors_inbound: 0,
            },
        ));

        let flight_secs = (launcher_loc.distance_km(&aim) / speed) as u64;
        schedule_or_warn(
            &mut self.queue,
            t + flight_secs,
            EventKind::MissileImpact { missile },
        );

        self.midflight += 1;
        self.ensure_tick(t);

        info!("{t}: {launcher_name} launching {kind:?} missile toward {target_name}");
        self.log.push(EngagementEvent::MissileAway {
            t,
            launcher: launcher_name.clone(),
            kind,
            target: target_name,
        });

        // Cycle the launcher: reload while the budget lasts.
        let mut unit = match self.world.get::<&mut LauncherUnit>(launcher) {
            Ok(u) => u,
            Err(_) => return,
        };
        if unit.reloads > 0 {
            unit.status = LauncherStatus::Reloading;
            unit.reloads -= 1;
            let reload_secs = unit.reload_secs;
            drop(unit);
            schedule_or_warn(
                &mut self.queue,
                t + reload_secs,
                EventKind::LauncherReady { launcher },
            );
        } else {
            unit.status = LauncherStatus::Exhausted;
            drop(unit);
            info!("{t}: {launcher_name} reloads exhausted");
            self.log.push(EngagementEvent::LauncherExhausted {
                t,
                launcher: launcher_name,
            });
        }
    }

    fn on_launcher_ready(&mut self, launcher: Entity) {
        if let Ok(mut unit) = self.world.get::<&mut LauncherUnit>(launcher) {
            if unit.status == LauncherStatus::Reloading {
                unit.status = LauncherStatus::Ready;
            }
        }
    }

    /// Keep exactly one movement tick on the queue while missiles fly.
    fn ensure_tick(&mut self, t: SimTime) {
        if self.midflight > 0 && !self.tick_pending {
            schedule_or_warn(&mut self.queue, t + 1, EventKind::MissileTick);
            self.tick_pending = true;
        }
    }
}

/// Schedule an event, reporting and discarding attempts to schedule
/// into the past instead of failing the caller.
pub(crate) fn schedule_or_warn(queue: &mut EventQueue<EventKind>, at: SimTime, event: EventKind) {
    if let Err(err) = queue.schedule(at, event) {
        warn!("discarding event: {err}");
    }
}
