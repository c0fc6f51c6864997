//! Scenario specs and world construction.
//!
//! Specs are plain serde structs so callers can deserialize them from
//! whatever source they like; the engine never reads files. String
//! fields name kinds so scenario data stays readable, and are checked
//! once here at construction.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use bulwark_core::{Location, SimError};

use crate::components::*;
use crate::enums::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterySpec {
    pub name: String,
    /// "ballistic", "cruise", or "any".
    pub engages: String,
    pub speed_kms: f64,
    pub max_range_km: f64,
    pub capacity: u32,
    pub reload_secs: u64,
    pub reloads: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSpec {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub cruise_points: u32,
    pub ballistic_points: u32,
    pub destroy_threshold: u32,
    /// Cueing radar coverage radius, if the site carries one.
    pub radar_range_km: Option<f64>,
    /// Best battery first; engagement offers walk this order.
    pub batteries: Vec<BatterySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherSpec {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// "ballistic" or "cruise".
    pub kind: String,
    pub missile_speed_kms: f64,
    pub reload_secs: u64,
    pub reloads: u32,
}

fn parse_engage(s: &str) -> Result<EngageFilter, SimError> {
    match s {
        "ballistic" => Ok(EngageFilter::BallisticOnly),
        "cruise" => Ok(EngageFilter::CruiseOnly),
        "any" => Ok(EngageFilter::Any),
        other => Err(SimError::UnknownKind(other.to_string())),
    }
}

fn parse_kind(s: &str) -> Result<MissileKind, SimError> {
    match s {
        "ballistic" => Ok(MissileKind::Ballistic),
        "cruise" => Ok(MissileKind::Cruise),
        other => Err(SimError::UnknownKind(other.to_string())),
    }
}

/// Spawn a defended site with its interceptor loadout.
pub fn build_site(world: &mut World, spec: &SiteSpec) -> Result<Entity, SimError> {
    let batteries = spec
        .batteries
        .iter()
        .map(|b| {
            if b.capacity == 0 {
                return Err(SimError::ZeroCapacityBattery(b.name.clone()));
            }
            Ok(Battery {
                name: b.name.clone(),
                speed_kms: b.speed_kms,
                max_range_km: b.max_range_km,
                capacity: b.capacity,
                ready: b.capacity,
                reload_secs: b.reload_secs,
                reloads: b.reloads,
                status: BatteryStatus::Operational,
                engages: parse_engage(&b.engages)?,
            })
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    let site = world.spawn((
        Name(spec.name.clone()),
        Location::new(spec.lat, spec.lon),
        Condition::Operational,
        DamageProfile {
            cruise_points: spec.cruise_points,
            ballistic_points: spec.ballistic_points,
            destroy_threshold: spec.destroy_threshold,
        },
        DamageState::default(),
        InterceptorLoadout { batteries },
    ));
    if let Some(range_km) = spec.radar_range_km {
        // Spawn just happened; the insert cannot fail.
        let _ = world.insert_one(site, RadarCoverage { range_km });
    }
    Ok(site)
}

/// Spawn a missile launcher, ready to fire.
pub fn build_launcher(world: &mut World, spec: &LauncherSpec) -> Result<Entity, SimError> {
    Ok(world.spawn((
        Name(spec.name.clone()),
        Location::new(spec.lat, spec.lon),
        LauncherUnit {
            kind: parse_kind(&spec.kind)?,
            missile_speed_kms: spec.missile_speed_kms,
            reload_secs: spec.reload_secs,
            reloads: spec.reloads,
            status: LauncherStatus::Ready,
        },
    )))
}
