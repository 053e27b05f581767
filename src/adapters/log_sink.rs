//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing cycle events to the ESP-IDF logger
//! (UART / USB-CDC in production).  The node has no operator, so this is
//! its whole user interface.

use log::{info, warn};

use crate::app::events::CycleEvent;
use crate::app::ports::EventSink;
use crate::uplink::gate::CycleOutcome;

/// Adapter that logs every [`CycleEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &CycleEvent) {
        match event {
            CycleEvent::Booted(reason) => {
                info!("BOOT  | wake={:?}", reason);
            }
            CycleEvent::InitFailed(e) => {
                warn!("BOOT  | init failed: {}", e);
            }
            CycleEvent::Measured {
                reading,
                level_measured,
            } => {
                info!(
                    "MEAS  | level={}mm{} | tips={}",
                    reading.water_level_mm,
                    if *level_measured { "" } else { " (unavailable)" },
                    reading.bucket_tips,
                );
            }
            CycleEvent::MeasurementFailed(e) => {
                warn!("MEAS  | {}", e);
            }
            CycleEvent::Encoded { len } => {
                info!("FRAME | {} bytes", len);
            }
            CycleEvent::EncodeFailed(e) => {
                warn!("FRAME | {}", e);
            }
            CycleEvent::Transmitted(CycleOutcome::Sent) => {
                info!("TX    | sent");
            }
            CycleEvent::Transmitted(CycleOutcome::SendFailed) => {
                warn!("TX    | failed");
            }
            CycleEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            CycleEvent::Sleeping { secs } => {
                info!("SLEEP | {}s", secs);
            }
        }
    }
}
