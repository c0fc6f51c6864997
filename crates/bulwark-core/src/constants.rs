//! Simulation constants and tuning defaults.

// --- Time ---

/// Seconds per minute.
pub const MINUTE: u64 = 60;

/// Seconds per hour.
pub const HOUR: u64 = 60 * MINUTE;

/// Seconds per day.
pub const DAY: u64 = 24 * HOUR;

// --- Geodesy ---

/// Mean Earth radius in kilometers (spherical model).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Intercept resolution ---

/// Kill probability for an interceptor with no supporting sensor cue.
pub const P_KILL_BARE: f64 = 0.2;

/// Kill probability when an operational sensor covers the target.
pub const P_KILL_CUED: f64 = 0.7;

/// Default sensor cueing radius in kilometers.
pub const CUE_RADIUS_KM: f64 = 370.0;
