//! GPIO / peripheral pin assignments for the CreekLink node board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Ultrasonic ranging sensor (JSN-SR04T / HC-SR04 style)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 4;
/// Digital input: HIGH for the duration of the echo round trip.
pub const ULTRASONIC_ECHO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Tipping-bucket rain gauge
// ---------------------------------------------------------------------------

/// Reed-switch input, pull-up enabled, interrupt on rising edge.
pub const TIPPING_BUCKET_GPIO: i32 = 18;
