//! Hunt engine: the event loop driving collection and TEL movement.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use bulwark_core::constants::{DAY, HOUR, MINUTE};
use bulwark_core::{EventQueue, SimError, SimTime};

use crate::config::{TransitionTable, WeatherProbs};
use crate::intelligence::Intelligence;
use crate::world::HuntWorld;

#[derive(Debug, Clone, Copy)]
pub enum IntelEvent {
    /// Per-minute collection tick: observe, analyze, track.
    Collect,
    /// Hourly TEL state and weather redraw.
    CycleTels,
}

#[derive(Debug, Clone)]
pub struct HuntConfig {
    pub seed: u64,
    /// The hunt is open-ended, so a horizon is mandatory; both
    /// recurring events reschedule themselves forever.
    pub horizon: SimTime,
    pub transitions: TransitionTable,
    pub weather: WeatherProbs,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            horizon: SimTime::from_secs(DAY),
            transitions: TransitionTable::default(),
            weather: WeatherProbs::default(),
        }
    }
}

pub struct HuntEngine {
    world: HuntWorld,
    queue: EventQueue<IntelEvent>,
    rng: ChaCha8Rng,
    intelligence: Intelligence,
    config: HuntConfig,
}

impl HuntEngine {
    pub fn new(
        world: HuntWorld,
        intelligence: Intelligence,
        config: HuntConfig,
    ) -> Result<Self, SimError> {
        let mut queue = EventQueue::new();
        queue.schedule(SimTime::ZERO, IntelEvent::Collect)?;
        queue.schedule(SimTime::ZERO, IntelEvent::CycleTels)?;
        Ok(Self {
            world,
            queue,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            intelligence,
            config,
        })
    }

    pub fn world(&self) -> &HuntWorld {
        &self.world
    }

    pub fn intelligence(&self) -> &Intelligence {
        &self.intelligence
    }

    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// Run to the horizon. Events past it are abandoned in place.
    pub fn run(&mut self) {
        while let Some((t, event)) = self.queue.pop() {
            if t > self.config.horizon {
                debug!("{t}: horizon {} reached", self.config.horizon);
                break;
            }
            // Rescheduling relative to the clock we just advanced
            // cannot land in the past, so these cannot fail.
            match event {
                IntelEvent::Collect => {
                    self.intelligence.process(&self.world, t, &mut self.rng);
                    let _ = self.queue.schedule_in(MINUTE, IntelEvent::Collect);
                }
                IntelEvent::CycleTels => {
                    self.world.cycle(
                        t,
                        &self.config.transitions,
                        &self.config.weather,
                        &mut self.rng,
                    );
                    let _ = self.queue.schedule_in(HOUR, IntelEvent::CycleTels);
                }
            }
        }
    }
}
