//! The hunt world: TEL bases and the trackable objects around them.
//!
//! TELs are not modeled with a precise position. Each belongs to a
//! base with a location, and at any moment is in one of a small set
//! of states. An hourly draw against a transition table moves them
//! between states; sensors only ever see the state, never a track.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bulwark_core::{Location, SimTime};

use crate::config::{TransitionTable, WeatherProbs};
use crate::observation::{TargetId, TelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Cloudy,
    Overcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TloKind {
    /// Ordinary traffic that could be mistaken for a TEL.
    Truck,
    /// A decoy intentionally made to look like a TEL.
    Decoy,
    /// The real thing.
    Tel,
}

/// A TEL-like object. One `Tlo` with high multiplicity aggregates a
/// whole population of ordinary trucks; real TELs and tracked decoys
/// have multiplicity 1 and an id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tlo {
    pub kind: TloKind,
    pub id: Option<TargetId>,
    pub multiplicity: u64,
    /// Present for TELs only.
    pub tel_state: Option<TelState>,
}

impl Tlo {
    pub fn tel(id: TargetId) -> Self {
        Self {
            kind: TloKind::Tel,
            id: Some(id),
            multiplicity: 1,
            tel_state: Some(TelState::InBase),
        }
    }

    pub fn decoy(id: TargetId) -> Self {
        Self {
            kind: TloKind::Decoy,
            id: Some(id),
            multiplicity: 1,
            tel_state: None,
        }
    }

    pub fn trucks(multiplicity: u64) -> Self {
        Self {
            kind: TloKind::Truck,
            id: None,
            multiplicity,
            tel_state: None,
        }
    }
}

/// A home base out of which several TLOs operate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub location: Location,
    pub weather: Weather,
    pub tlos: Vec<Tlo>,
}

impl Base {
    pub fn new(name: impl Into<String>, location: Location, tlos: Vec<Tlo>) -> Self {
        Self {
            name: name.into(),
            location,
            weather: Weather::Clear,
            tlos,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HuntWorld {
    pub bases: Vec<Base>,
}

/// Local day window. Hour-of-day only; no sunrise tables.
pub fn is_day(now: SimTime) -> bool {
    (6..18).contains(&now.hour_of_day())
}

impl HuntWorld {
    pub fn new(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    /// Ids of every real TEL in the world.
    pub fn tel_ids(&self) -> Vec<TargetId> {
        self.bases
            .iter()
            .flat_map(|b| &b.tlos)
            .filter(|t| t.kind == TloKind::Tel)
            .filter_map(|t| t.id)
            .collect()
    }

    pub fn tel_count(&self) -> usize {
        self.bases
            .iter()
            .flat_map(|b| &b.tlos)
            .filter(|t| t.kind == TloKind::Tel)
            .count()
    }

    /// Hourly cycle: redraw each TEL's state from the transition
    /// table and each base's weather.
    pub fn cycle(
        &mut self,
        now: SimTime,
        transitions: &TransitionTable,
        weather: &WeatherProbs,
        rng: &mut ChaCha8Rng,
    ) {
        let day = is_day(now);
        for base in &mut self.bases {
            base.weather = draw_weather(weather, rng);
            for tlo in &mut base.tlos {
                if let Some(state) = tlo.tel_state {
                    tlo.tel_state = Some(draw_state(transitions.row(state, day), rng));
                }
            }
        }
    }
}

fn draw_weather(probs: &WeatherProbs, rng: &mut ChaCha8Rng) -> Weather {
    let roll: f64 = rng.gen();
    if roll < probs.clear {
        Weather::Clear
    } else if roll < probs.clear + probs.cloudy {
        Weather::Cloudy
    } else {
        Weather::Overcast
    }
}

fn draw_state(row: [f64; 3], rng: &mut ChaCha8Rng) -> TelState {
    let roll: f64 = rng.gen();
    if roll < row[0] {
        TelState::InBase
    } else if roll < row[0] + row[1] {
        TelState::Roaming
    } else {
        TelState::Sheltering
    }
}
