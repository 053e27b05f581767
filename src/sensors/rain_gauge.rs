//! Tipping-bucket rain gauge tip accumulator.
//!
//! The gauge's reed switch closes once per bucket tip.  A GPIO ISR calls
//! [`rain_gauge_isr_handler`] on every rising edge, which bumps an atomic
//! counter; the measurement path drains it once per cycle.
//!
//! The ISR and the main flow may interleave at any point, so the drain is
//! a single atomic `swap(0)`.  A load followed by a store would drop any
//! tip that lands between the two.

use core::sync::atomic::{AtomicU32, Ordering};

/// Concurrency-safe event counter: incremented from interrupt context,
/// drained exactly once per measurement cycle.
#[derive(Debug)]
pub struct EventAccumulator {
    count: AtomicU32,
}

impl EventAccumulator {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Record one event.  Lock-free and allocation-free; safe from an ISR.
    ///
    /// Wraps at `u32::MAX`, which at one tip per second is 136 years.
    #[inline]
    pub fn record_event(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically read the count and reset it to zero.
    ///
    /// Returns every event linearized before the swap; later events are
    /// left for the next drain.
    pub fn drain(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Current count without resetting it (diagnostics only).
    pub fn pending(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for EventAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide tip counter.  `static` because ESP-IDF ISR callbacks
/// cannot capture state.
pub static RAIN_TIPS: EventAccumulator = EventAccumulator::new();

/// Called from the GPIO ISR on each rising edge of the tipping bucket.
#[inline]
pub fn rain_gauge_isr_handler() {
    RAIN_TIPS.record_event();
}
