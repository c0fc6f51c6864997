//! Intercept feasibility search.
//!
//! Both the live per-second missile update and the feasibility scan
//! step trajectories through `advance_towards`, so the time this
//! search predicts is exactly the second at which the missile will
//! stand at the predicted point during live simulation.

use bulwark_core::Location;

/// One second of straight flight toward a fixed aim point.
/// The step is clamped to the remaining distance so a missile never
/// oscillates around its aim point.
pub fn advance_towards(from: &Location, aim: &Location, speed_kms: f64) -> Location {
    let remaining = from.distance_km(aim);
    from.move_towards(aim, speed_kms.min(remaining))
}

/// Earliest whole second at which an interceptor fired now from
/// `site` can reach the missile, or `None` if no second within the
/// interceptor's range envelope works.
///
/// The scan walks `t = 1..=max_range/speed`, simulating the missile's
/// future position one second at a time, and returns the first `t`
/// where cumulative interceptor travel exceeds the distance from the
/// site to that future position. O(max_range/speed) per call.
pub fn intercept_time(
    missile_loc: &Location,
    aim: &Location,
    missile_speed_kms: f64,
    site: &Location,
    interceptor_speed_kms: f64,
    max_range_km: f64,
) -> Option<u64> {
    if interceptor_speed_kms <= 0.0 {
        return None;
    }
    let max_time = (max_range_km / interceptor_speed_kms) as u64;

    // Necessary condition: even flying straight at each other for the
    // whole horizon, could the two close the present separation? If
    // not, skip the per-second scan entirely.
    let separation = site.distance_km(missile_loc);
    let horizon = (max_time + 1) as f64;
    let missile_reach = missile_speed_kms * horizon;
    let interceptor_reach = interceptor_speed_kms * horizon;
    if missile_reach + interceptor_reach <= separation {
        return None;
    }

    let mut future = *missile_loc;
    let mut travelled = 0.0;
    for t in 1..=max_time {
        future = advance_towards(&future, aim, missile_speed_kms);
        travelled += interceptor_speed_kms;
        if site.distance_km(&future) < travelled {
            return Some(t);
        }
    }
    None
}
