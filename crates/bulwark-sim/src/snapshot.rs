//! Snapshot views: read-only serializable pictures of the duel world.
//!
//! Builders only query; they never modify the world. Views are sorted
//! by name so equal worlds serialize to equal bytes.

use hecs::World;
use serde::Serialize;

use bulwark_core::{Location, SimTime};

use crate::components::*;
use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryView {
    pub name: String,
    pub ready: u32,
    pub capacity: u32,
    pub status: BatteryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteView {
    pub name: String,
    pub location: Location,
    pub condition: Condition,
    pub damage_points: u32,
    pub batteries: Vec<BatteryView>,
}

/// Missile counts broken out by kind and terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MissileTally {
    pub ballistic_midflight: u32,
    pub cruise_midflight: u32,
    pub intercepted: u32,
    pub impacted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub sites: Vec<SiteView>,
    pub missiles: MissileTally,
}

/// Build a complete snapshot of the duel world at a given time.
pub fn build_snapshot(world: &World, time: SimTime) -> SimSnapshot {
    SimSnapshot {
        time,
        sites: build_sites(world),
        missiles: tally_missiles(world),
    }
}

fn build_sites(world: &World) -> Vec<SiteView> {
    let mut sites: Vec<SiteView> = world
        .query::<(
            &Name,
            &Location,
            &Condition,
            &DamageState,
            &InterceptorLoadout,
        )>()
        .iter()
        .map(|(_, (name, loc, cond, damage, loadout))| SiteView {
            name: name.0.clone(),
            location: *loc,
            condition: *cond,
            damage_points: damage.points,
            batteries: loadout
                .batteries
                .iter()
                .map(|b| BatteryView {
                    name: b.name.clone(),
                    ready: b.ready,
                    capacity: b.capacity,
                    status: b.status,
                })
                .collect(),
        })
        .collect();

    sites.sort_by(|a, b| a.name.cmp(&b.name));
    sites
}

fn tally_missiles(world: &World) -> MissileTally {
    let mut tally = MissileTally::default();
    for (_, body) in world.query::<&MissileBody>().iter() {
        match body.phase {
            MissilePhase::Midflight => match body.kind {
                MissileKind::Ballistic => tally.ballistic_midflight += 1,
                MissileKind::Cruise => tally.cruise_midflight += 1,
            },
            MissilePhase::Intercepted => tally.intercepted += 1,
            MissilePhase::Impacted => tally.impacted += 1,
        }
    }
    tally
}
