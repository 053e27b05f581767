//! Port traits — the hexagonal boundary between the duty-cycle core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (ranging sensor, tip source, radio, sleep timer, event
//! sinks) implement these traits.  The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the core never touches hardware directly
//! and every collaborator can be replaced by a fake in tests.

use crate::config::JoinCredentials;
use crate::error::{RadioError, SensorError};

// ───────────────────────────────────────────────────────────────
// Ranging port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Point-in-time distance measurement.
pub trait RangingPort {
    /// Blocking, bounded.  `None` when the sensor produced no value.
    fn measure_mm(&mut self) -> Option<i32>;
}

// ───────────────────────────────────────────────────────────────
// Tip source port (driven adapter: hardware → accumulator)
// ───────────────────────────────────────────────────────────────

/// Edge-triggered event source feeding the tip accumulator.
///
/// Once armed, the source calls `record_event()` on every rising edge.
/// Debouncing is the source's job.
pub trait TipSourcePort {
    /// Register the edge interrupt.  Called once per boot.
    fn arm(&mut self) -> Result<(), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain → LPWAN modem)
// ───────────────────────────────────────────────────────────────

/// The core is protocol-agnostic beyond "join once, give it bytes".
pub trait RadioPort {
    /// Bring the stack up and join the network.  Called once per boot.
    fn join(&mut self, creds: &JoinCredentials) -> Result<(), RadioError>;

    /// Blocking, bounded, single attempt.
    fn send(&mut self, bytes: &[u8]) -> Result<(), RadioError>;
}

// ───────────────────────────────────────────────────────────────
// Sleep port (driven adapter: domain → power management)
// ───────────────────────────────────────────────────────────────

/// Suspends the whole process until a timer fires.
///
/// On hardware this does not return: execution restarts from boot.  Test
/// fakes return so the caller can observe the request.
pub trait SleepPort {
    fn sleep_for(&mut self, secs: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / diagnostics)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`CycleEvent`](super::events::CycleEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::CycleEvent);
}
