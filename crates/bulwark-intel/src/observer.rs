//! Sensor passes: raw, unanalyzed imagery over the bases.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::SimTime;

use crate::config::{EoConfig, SarConfig};
use crate::observation::{DetectionMethod, Observation, TelState};
use crate::world::{is_day, HuntWorld, TloKind, Weather};

/// A sensor producing raw observations of the world. Raw output is
/// ground truth filtered by visibility; error rates belong to the
/// analysis pipeline, not the sensor.
pub trait Observer {
    fn name(&self) -> &'static str;
    fn observe(&mut self, world: &HuntWorld, now: SimTime, rng: &mut ChaCha8Rng)
        -> Vec<Observation>;
}

/// Electro-optical satellite pass. Needs daylight and a break in the
/// clouds; TELs under roofs or in shelters never show up.
pub struct EoObserver {
    config: EoConfig,
}

impl EoObserver {
    pub fn new(config: EoConfig) -> Self {
        Self { config }
    }
}

impl Observer for EoObserver {
    fn name(&self) -> &'static str {
        "eo"
    }

    fn observe(
        &mut self,
        world: &HuntWorld,
        now: SimTime,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Observation> {
        if !is_day(now) {
            return Vec::new();
        }

        let mut out = Vec::new();
        for base in &world.bases {
            let visibility = match base.weather {
                Weather::Clear => 1.0,
                Weather::Cloudy => self.config.cloudy_visibility,
                Weather::Overcast => continue,
            };

            for tlo in &base.tlos {
                match tlo.kind {
                    TloKind::Tel => {
                        // Only TELs caught in the open are imaged.
                        if tlo.tel_state != Some(TelState::Roaming) {
                            continue;
                        }
                        if rng.gen_bool(visibility) {
                            if let Some(id) = tlo.id {
                                let mut obs =
                                    Observation::positive(now, DetectionMethod::Eo, id);
                                obs.state = tlo.tel_state;
                                out.push(obs);
                            }
                        }
                    }
                    TloKind::Decoy => {
                        if rng.gen_bool(visibility) {
                            if let Some(id) = tlo.id {
                                out.push(Observation::positive(now, DetectionMethod::Eo, id));
                            }
                        }
                    }
                    TloKind::Truck => {
                        // Trucks on the road are the haystack.
                        let on_road = Observation::negative(
                            now,
                            DetectionMethod::Eo,
                            tlo.multiplicity,
                        );
                        if let Some(seen) =
                            on_road.sample(self.config.truck_utilization * visibility, rng)
                        {
                            out.push(seen);
                        }
                    }
                }
            }

            // One aggregate record for all the empty tiles in the pass.
            out.push(Observation::negative(
                now,
                DetectionMethod::Eo,
                self.config.negative_multiplicity,
            ));
        }
        out
    }
}

/// Synthetic-aperture radar pass. Indifferent to night and weather
/// but much sparser revisit; shelters still hide TELs.
pub struct SarObserver {
    config: SarConfig,
}

impl SarObserver {
    pub fn new(config: SarConfig) -> Self {
        Self { config }
    }
}

impl Observer for SarObserver {
    fn name(&self) -> &'static str {
        "sar"
    }

    fn observe(
        &mut self,
        world: &HuntWorld,
        now: SimTime,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Observation> {
        let mut out = Vec::new();
        for (idx, base) in world.bases.iter().enumerate() {
            // Stagger base revisits across the cadence window.
            let phase = idx as u64 % self.config.cadence_mins;
            if now.as_secs() / 60 % self.config.cadence_mins != phase {
                continue;
            }

            for tlo in &base.tlos {
                match tlo.kind {
                    TloKind::Tel => {
                        if tlo.tel_state == Some(TelState::Sheltering) {
                            continue;
                        }
                        if let Some(id) = tlo.id {
                            let mut obs = Observation::positive(now, DetectionMethod::Sar, id);
                            obs.state = tlo.tel_state;
                            out.push(obs);
                        }
                    }
                    TloKind::Decoy => {
                        if let Some(id) = tlo.id {
                            out.push(Observation::positive(now, DetectionMethod::Sar, id));
                        }
                    }
                    TloKind::Truck => {
                        let moving = Observation::negative(
                            now,
                            DetectionMethod::Sar,
                            tlo.multiplicity,
                        );
                        // Radar picks up movers regardless of light.
                        if let Some(seen) = moving.sample(self.config.truck_movers, rng) {
                            out.push(seen);
                        }
                    }
                }
            }

            out.push(Observation::negative(
                now,
                DetectionMethod::Sar,
                self.config.negative_multiplicity,
            ));
        }
        out
    }
}
