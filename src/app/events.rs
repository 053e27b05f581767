//! Outbound cycle events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They are the node's only
//! user-visible output; nothing here feeds back into control flow.

use crate::error::Error;
use crate::fsm::StateId;
use crate::power::WakeReason;
use crate::sensors::Reading;
use crate::uplink::gate::CycleOutcome;

/// Structured events emitted by the duty-cycle core.
#[derive(Debug, Clone)]
pub enum CycleEvent {
    /// Boot started (carries the wake cause).
    Booted(WakeReason),

    /// A boot-time subsystem failed to initialise.  The cycle continues.
    InitFailed(Error),

    /// A reading was taken.  `level_measured` is `false` when the level
    /// is the no-reading sentinel.
    Measured {
        reading: Reading,
        level_measured: bool,
    },

    /// The ranger gave no value; the sentinel level was used.
    MeasurementFailed(Error),

    /// The frame was built.
    Encoded { len: usize },

    /// The frame could not be built; transmission is skipped.
    EncodeFailed(Error),

    /// Result of the single uplink attempt.
    Transmitted(CycleOutcome),

    /// The controller moved between states.
    StateChanged { from: StateId, to: StateId },

    /// Sleep is about to be requested.
    Sleeping { secs: u32 },
}
