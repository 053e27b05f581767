//! Transmission gate: one send attempt per cycle, outcome classified.
//!
//! A failed uplink is a cycle-local event.  It is logged and reported as
//! [`CycleOutcome::SendFailed`]; it never retries and never propagates.

use log::{info, warn};

use crate::app::ports::RadioPort;

/// What happened to this cycle's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Sent,
    SendFailed,
}

/// Hand `frame` to the radio once and classify the result.
pub fn transmit(radio: &mut impl RadioPort, frame: &[u8]) -> CycleOutcome {
    match radio.send(frame) {
        Ok(()) => {
            info!("Uplink sent ({} bytes)", frame.len());
            CycleOutcome::Sent
        }
        Err(e) => {
            warn!("Uplink failed: {}", e);
            CycleOutcome::SendFailed
        }
    }
}
