//! Per-cycle context threaded through every state handler.
//!
//! `CycleContext` is the blackboard for one wake cycle: the service writes
//! each state's result here and the state table reads it to pick the next
//! state.  It is built fresh on every boot; nothing in it survives sleep.

use crate::config::NodeConfig;
use crate::sensors::Reading;
use crate::uplink::gate::CycleOutcome;

pub struct CycleContext {
    /// Configuration for this boot.
    pub config: NodeConfig,

    /// Boot-time init failures (tip source, radio join).  Logged only.
    pub init_failures: u8,

    /// Set by Measuring.
    pub reading: Option<Reading>,
    /// Bytes written by Encoding; `None` when encoding failed.
    pub frame_len: Option<usize>,
    /// Set by Transmitting.
    pub outcome: Option<CycleOutcome>,

    /// Latched on entry to Sleeping.
    pub sleep_secs: Option<u32>,
}

impl CycleContext {
    pub fn new(config: NodeConfig) -> Self {
        Self {
            config,
            init_failures: 0,
            reading: None,
            frame_len: None,
            outcome: None,
            sleep_secs: None,
        }
    }
}
