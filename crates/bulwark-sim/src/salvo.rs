//! Salvo planning: assigning launchers to targets ahead of time.

use hecs::{Entity, World};
use tracing::info;

use bulwark_core::{EventQueue, SimError, SimTime};

use crate::components::LauncherUnit;
use crate::enums::{LauncherStatus, MissileKind};
use crate::events::EventKind;

/// Launchers currently able to fire, optionally filtered by missile
/// kind. Iteration order follows the world, which is spawn order.
pub fn ready_launchers(world: &World, kind: Option<MissileKind>) -> Vec<Entity> {
    world
        .query::<&LauncherUnit>()
        .iter()
        .filter(|(_, unit)| {
            unit.status == LauncherStatus::Ready && kind.map_or(true, |k| unit.kind == k)
        })
        .map(|(e, _)| e)
        .collect()
}

/// Schedule a simultaneous salvo, one launcher per target entry.
///
/// A target may appear more than once to put several missiles on it.
/// Asking for more missiles than there are launchers is a planning
/// error and fails the whole salvo; nothing is scheduled.
pub fn plan_salvo(
    queue: &mut EventQueue<EventKind>,
    at: SimTime,
    launchers: &[Entity],
    targets: &[Entity],
) -> Result<(), SimError> {
    if targets.len() > launchers.len() {
        return Err(SimError::NotEnoughLaunchers {
            required: targets.len(),
            available: launchers.len(),
        });
    }
    for (&launcher, &target) in launchers.iter().zip(targets) {
        queue.schedule(at, EventKind::LaunchMissile { launcher, target })?;
    }
    info!("salvo of {} planned for {at}", targets.len());
    Ok(())
}
