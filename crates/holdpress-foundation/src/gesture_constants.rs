//! Shared gesture constants for hold-to-confirm handling.

/// Interval between hold progress notifications, in milliseconds.
///
/// Every tick produces one progress fraction, so this is the granularity of
/// any progress bar driven by a hold.
pub const HOLD_TICK_INTERVAL_MS: u64 = 10;

/// Hold duration used when an element configures no delay, or a delay that
/// is not a positive finite number of milliseconds.
pub const DEFAULT_HOLD_DELAY_MS: f64 = 400.0;
