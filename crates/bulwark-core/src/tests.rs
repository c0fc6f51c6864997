//! Tests for geodesic math and the event queue.

use crate::error::SimError;
use crate::geo::Location;
use crate::scheduler::EventQueue;
use crate::types::SimTime;

fn tokyo() -> Location {
    Location::new(35.5895, 139.6917)
}

fn rio() -> Location {
    Location::new(-22.9068, -43.1729)
}

// ---- Location ----

#[test]
fn test_distance_reference_pair() {
    // Known great-circle distance between two widely separated cities.
    assert!((tokyo().distance_km(&rio()) - 18_580.0).abs() < 10.0);
}

#[test]
fn test_distance_symmetric_and_zero_at_identity() {
    let a = tokyo();
    let b = rio();
    assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    assert!(a.distance_km(&a) < 1e-9);
}

#[test]
fn test_distance_triangle_inequality() {
    let a = tokyo();
    let b = rio();
    let c = Location::new(51.5074, -0.1278); // London
    assert!(a.distance_km(&b) <= a.distance_km(&c) + c.distance_km(&b) + 1e-6);
}

#[test]
fn test_move_towards_strictly_closer() {
    let a = tokyo();
    let b = rio();
    let total = a.distance_km(&b);
    for step in [1.0, 100.0, 5000.0, total - 1.0] {
        let moved = a.move_towards(&b, step);
        assert!(
            moved.distance_km(&b) < total,
            "step {step} km did not move closer"
        );
    }
}

#[test]
fn test_move_towards_walked_distance_matches() {
    // Walking in 10 km steps should cover the straight-line distance
    // to within per-step discretization error.
    let a = Location::new(35.0, 139.0);
    let b = Location::new(36.0, 141.0);
    let total = a.distance_km(&b);

    let mut pos = a;
    let mut walked = 0.0;
    while pos.distance_km(&b) > 10.0 {
        pos = pos.move_towards(&b, 10.0);
        walked += 10.0;
    }
    walked += pos.distance_km(&b);
    assert!(
        (walked - total).abs() < 11.0,
        "walked {walked:.1} km vs straight-line {total:.1} km"
    );
}

#[test]
fn test_longitude_wraps_across_antimeridian() {
    let near_dateline = Location::new(0.0, 179.5);
    let beyond = Location::new(0.0, -179.5);
    let moved = near_dateline.move_towards(&beyond, 60.0);
    assert!(
        moved.lon > 179.5 || moved.lon <= -179.0,
        "unexpected longitude {}",
        moved.lon
    );
    assert!(moved.lon > -180.0 && moved.lon <= 180.0);
}

// ---- EventQueue ----

#[test]
fn test_queue_pops_in_time_order() {
    let mut q: EventQueue<u32> = EventQueue::new();
    q.schedule(SimTime(30), 3).unwrap();
    q.schedule(SimTime(10), 1).unwrap();
    q.schedule_in(20, 2).unwrap();
    assert_eq!(q.peek_time(), Some(SimTime(10)));

    let order: Vec<u32> = std::iter::from_fn(|| q.pop().map(|(_, p)| p)).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(q.peek_time(), None);
}

#[test]
fn test_queue_fifo_at_equal_time() {
    let mut q: EventQueue<&str> = EventQueue::new();
    q.schedule(SimTime(5), "first").unwrap();
    q.schedule(SimTime(5), "second").unwrap();
    q.schedule(SimTime(5), "third").unwrap();

    assert_eq!(q.pop().unwrap().1, "first");
    assert_eq!(q.pop().unwrap().1, "second");
    assert_eq!(q.pop().unwrap().1, "third");
}

#[test]
fn test_queue_clock_monotone_and_rejects_past() {
    let mut q: EventQueue<()> = EventQueue::new();
    q.schedule(SimTime(100), ()).unwrap();
    let (t, _) = q.pop().unwrap();
    assert_eq!(t, SimTime(100));
    assert_eq!(q.now(), SimTime(100));

    let err = q.schedule(SimTime(99), ()).unwrap_err();
    assert_eq!(
        err,
        SimError::ScheduledInPast {
            at: SimTime(99),
            now: SimTime(100),
        }
    );

    // Scheduling at exactly the current time is fine.
    q.schedule(SimTime(100), ()).unwrap();
    assert_eq!(q.pop().unwrap().0, SimTime(100));
}

#[test]
fn test_queue_handler_driven_repetition() {
    // A periodic event is just a handler that reschedules itself.
    let mut q: EventQueue<&str> = EventQueue::new();
    q.schedule(SimTime(0), "tick").unwrap();

    let mut fired = Vec::new();
    while let Some((t, payload)) = q.pop() {
        fired.push(t.as_secs());
        if fired.len() < 4 {
            q.schedule(t + 60, payload).unwrap();
        }
    }
    assert_eq!(fired, vec![0, 60, 120, 180]);
}

#[test]
fn test_location_and_time_serialize_round_trip() {
    let loc = Location::new(13.58, 144.93);
    let json = serde_json::to_string(&loc).unwrap();
    let back: Location = serde_json::from_str(&json).unwrap();
    assert_eq!(loc, back);

    let t = SimTime::from_mins(90);
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "5400");
    let back: SimTime = serde_json::from_str(&json).unwrap();
    assert_eq!(t, back);
}

#[test]
fn test_sim_time_helpers() {
    assert_eq!(SimTime::from_mins(5).as_secs(), 300);
    assert_eq!(SimTime::from_hours(2).as_secs(), 7200);
    assert_eq!(SimTime(7200) - SimTime(3600), 3600);
    assert_eq!(SimTime(3600) - SimTime(7200), 0);
    assert_eq!(SimTime::from_hours(30).hour_of_day(), 6);
    assert_eq!(SimTime(125).minutes_since(SimTime(0)), 2);
}
