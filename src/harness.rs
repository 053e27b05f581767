//! Host-side outer driver for the wake/sleep cycle.
//!
//! On hardware the "loop" is the chip resetting after every deep sleep.
//! [`WakeHarness`] stands in for that: each [`wake`](WakeHarness::wake)
//! builds a fresh [`NodeService`] (nothing but the accumulator carries over,
//! just like a real reset) and runs one Booting → Sleeping pass.

use crate::app::ports::{EventSink, RadioPort, RangingPort, SleepPort, TipSourcePort};
use crate::app::service::{CycleReport, NodeService};
use crate::config::NodeConfig;
use crate::power::WakeReason;
use crate::sensors::rain_gauge::EventAccumulator;

pub struct WakeHarness<'a, H, R, S, E> {
    config: NodeConfig,
    tips: &'a EventAccumulator,
    pub hw: H,
    pub radio: R,
    pub sleeper: S,
    pub sink: E,
    wakes: u32,
}

impl<'a, H, R, S, E> WakeHarness<'a, H, R, S, E>
where
    H: RangingPort + TipSourcePort,
    R: RadioPort,
    S: SleepPort,
    E: EventSink,
{
    pub fn new(
        config: NodeConfig,
        tips: &'a EventAccumulator,
        hw: H,
        radio: R,
        sleeper: S,
        sink: E,
    ) -> Self {
        Self {
            config,
            tips,
            hw,
            radio,
            sleeper,
            sink,
            wakes: 0,
        }
    }

    /// Run one complete cycle.  The first wake reports a power-on boot,
    /// later ones a timer wake.
    pub fn wake(&mut self) -> CycleReport {
        let reason = if self.wakes == 0 {
            WakeReason::PowerOn
        } else {
            WakeReason::Timer
        };
        self.wakes += 1;

        NodeService::new(self.config.clone(), self.tips).run_cycle(
            reason,
            &mut self.hw,
            &mut self.radio,
            &mut self.sleeper,
            &mut self.sink,
        )
    }

    /// Cycles run so far.
    pub fn wakes(&self) -> u32 {
        self.wakes
    }

    /// The accumulator the tip source feeds.
    pub fn tips(&self) -> &EventAccumulator {
        self.tips
    }
}
