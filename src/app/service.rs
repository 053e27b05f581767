//! Duty-cycle controller — the hexagonal core.
//!
//! [`NodeService`] owns the state machine and the per-cycle context and
//! runs exactly one wake cycle: boot → measure → encode → transmit → sleep.
//! All I/O flows through port traits passed to [`NodeService::run_cycle`],
//! so the whole pipeline runs against fakes on the host.
//!
//! ```text
//!  RangingPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  TipSourcePort ─▶│       NodeService        │
//!                  │  FSM · Acquisition ·     │ ──▶ RadioPort
//!                  │  Encoder · Gate          │ ──▶ SleepPort
//!                  └──────────────────────────┘
//! ```
//!
//! There is no loop over cycles here.  `run_cycle` consumes the service;
//! repetition comes from the platform restarting after sleep (or from
//! [`WakeHarness`](crate::harness::WakeHarness) on the host).

use log::{info, warn};

use crate::config::NodeConfig;
use crate::error::Error;
use crate::fsm::context::CycleContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::power::WakeReason;
use crate::sensors::rain_gauge::EventAccumulator;
use crate::sensors::{Reading, ReadingAcquisition};
use crate::uplink::codec::{self, FRAME_LEN};
use crate::uplink::gate::{self, CycleOutcome};

use super::events::CycleEvent;
use super::ports::{EventSink, RadioPort, RangingPort, SleepPort, TipSourcePort};

/// Transmit scratch buffer.  Larger than one frame so the encoder's
/// capacity check never trips in normal operation.
pub const TX_BUF_LEN: usize = 16;

/// What one pass of the pipeline did.
///
/// On hardware `sleep_for` does not return, so only host callers see this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub reading: Reading,
    /// `false` when the level is the no-reading sentinel.
    pub level_measured: bool,
    /// Encoded frame, `None` when encoding failed.
    pub frame: Option<[u8; FRAME_LEN]>,
    /// `None` when transmission was skipped.
    pub outcome: Option<CycleOutcome>,
    /// Duration handed to the sleep service.
    pub sleep_secs: u32,
    /// Boot-time init failures that were logged and ignored.
    pub init_failures: u8,
}

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

pub struct NodeService<'a> {
    fsm: Fsm,
    ctx: CycleContext,
    acquisition: ReadingAcquisition<'a>,
    level_measured: bool,
    tx_buf: [u8; TX_BUF_LEN],
    tx_len: usize,
}

impl<'a> NodeService<'a> {
    /// Construct the service for one boot.
    pub fn new(config: NodeConfig, tips: &'a EventAccumulator) -> Self {
        Self::with_tx_len(config, tips, TX_BUF_LEN)
    }

    /// Construct with a shortened transmit buffer.  Anything below
    /// [`FRAME_LEN`] makes every encode fail, which exercises the
    /// skip-transmission path.
    pub fn with_tx_len(config: NodeConfig, tips: &'a EventAccumulator, tx_len: usize) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Booting),
            ctx: CycleContext::new(config),
            acquisition: ReadingAcquisition::new(tips),
            level_measured: false,
            tx_buf: [0; TX_BUF_LEN],
            tx_len: tx_len.min(TX_BUF_LEN),
        }
    }

    /// Run one full wake cycle and request sleep.
    ///
    /// Every state is visited at most once and `Sleeping` is always
    /// reached: no error from any port can skip or delay the sleep call.
    pub fn run_cycle(
        mut self,
        wake: WakeReason,
        hw: &mut (impl RangingPort + TipSourcePort),
        radio: &mut impl RadioPort,
        sleeper: &mut impl SleepPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        info!("Booting CreekLink node (wake: {:?})", wake);
        sink.emit(&CycleEvent::Booted(wake));
        self.fsm.start(&mut self.ctx);

        for _ in 0..StateId::COUNT {
            let prev = self.fsm.current_state();
            match prev {
                StateId::Booting => self.boot(&mut *hw, &mut *radio, &mut *sink),
                StateId::Measuring => self.measure(&mut *hw, &mut *sink),
                StateId::Encoding => self.encode(&mut *sink),
                StateId::Transmitting => self.transmit(&mut *radio, &mut *sink),
                StateId::Sleeping => break,
            }

            let next = self.fsm.tick(&mut self.ctx);
            if next != prev {
                sink.emit(&CycleEvent::StateChanged { from: prev, to: next });
            }
        }

        let sleep_secs = self.ctx.sleep_secs.unwrap_or(self.ctx.config.sleep_secs);
        let report = CycleReport {
            reading: self.ctx.reading.unwrap_or_default(),
            level_measured: self.level_measured,
            frame: self.ctx.frame_len.map(|_| {
                let mut frame = [0u8; FRAME_LEN];
                frame.copy_from_slice(&self.tx_buf[..FRAME_LEN]);
                frame
            }),
            outcome: self.ctx.outcome,
            sleep_secs,
            init_failures: self.ctx.init_failures,
        };

        sink.emit(&CycleEvent::Sleeping { secs: sleep_secs });
        sleeper.sleep_for(sleep_secs);
        report
    }

    // ── Per-state actions ─────────────────────────────────────

    fn boot(
        &mut self,
        hw: &mut impl TipSourcePort,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = hw.arm() {
            self.init_failed(Error::from(e), sink);
        }
        match radio.join(&self.ctx.config.join) {
            Ok(()) => info!("Radio joined"),
            Err(e) => self.init_failed(Error::from(e), sink),
        }
    }

    fn init_failed(&mut self, err: Error, sink: &mut impl EventSink) {
        warn!("Init failed: {} (continuing)", err);
        self.ctx.init_failures = self.ctx.init_failures.saturating_add(1);
        sink.emit(&CycleEvent::InitFailed(err));
    }

    fn measure(&mut self, hw: &mut impl RangingPort, sink: &mut impl EventSink) {
        let acquired = self.acquisition.take_reading(hw);
        info!(
            "Measured water_level_mm={}, bucket_tips={}",
            acquired.reading.water_level_mm, acquired.reading.bucket_tips
        );
        self.ctx.reading = Some(acquired.reading);
        self.level_measured = acquired.level_measured;
        if let Some(fault) = acquired.fault() {
            sink.emit(&CycleEvent::MeasurementFailed(Error::from(fault)));
        }
        sink.emit(&CycleEvent::Measured {
            reading: acquired.reading,
            level_measured: acquired.level_measured,
        });
    }

    fn encode(&mut self, sink: &mut impl EventSink) {
        let reading = self.ctx.reading.unwrap_or_default();
        let policy = self.ctx.config.level_policy;
        match codec::encode_into(&reading, policy, &mut self.tx_buf[..self.tx_len]) {
            Ok(len) => {
                info!("Built payload len={}", len);
                self.ctx.frame_len = Some(len);
                sink.emit(&CycleEvent::Encoded { len });
            }
            Err(e) => {
                warn!("Frame encoding failed: {}", e);
                self.ctx.frame_len = None;
                sink.emit(&CycleEvent::EncodeFailed(Error::from(e)));
            }
        }
    }

    fn transmit(&mut self, radio: &mut impl RadioPort, sink: &mut impl EventSink) {
        let len = self.ctx.frame_len.unwrap_or(0);
        let outcome = gate::transmit(radio, &self.tx_buf[..len]);
        match outcome {
            CycleOutcome::Sent => info!("LoRa send OK, going to deep sleep"),
            CycleOutcome::SendFailed => warn!("LoRa send failed, still going to deep sleep"),
        }
        self.ctx.outcome = Some(outcome);
        sink.emit(&CycleEvent::Transmitted(outcome));
    }
}
