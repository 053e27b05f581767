//! Mock adapters for integration tests.
//!
//! Every port call is recorded so tests can assert on the full history
//! without touching real GPIO, radio or RTC registers.

use std::collections::VecDeque;

use creeklink::app::events::CycleEvent;
use creeklink::app::ports::{EventSink, RadioPort, RangingPort, SleepPort, TipSourcePort};
use creeklink::config::JoinCredentials;
use creeklink::error::{RadioError, SensorError};
use creeklink::sensors::rain_gauge::EventAccumulator;

// ── MockHardware ──────────────────────────────────────────────

/// Ranger + tip source.  Measurements come from a script; once it runs
/// out, `fallback` is returned.
pub struct MockHardware<'a> {
    levels: VecDeque<Option<i32>>,
    fallback: Option<i32>,
    arm_error: Option<SensorError>,
    /// Tips injected while a measurement is in progress.
    tips_during_measure: Option<(&'a EventAccumulator, u32)>,
    pub arm_calls: u32,
    pub measure_calls: u32,
}

#[allow(dead_code)]
impl<'a> MockHardware<'a> {
    pub fn new(level_mm: i32) -> Self {
        Self {
            levels: VecDeque::new(),
            fallback: Some(level_mm),
            arm_error: None,
            tips_during_measure: None,
            arm_calls: 0,
            measure_calls: 0,
        }
    }

    /// A ranger that never sees an echo.
    pub fn without_echo() -> Self {
        Self {
            fallback: None,
            ..Self::new(0)
        }
    }

    pub fn with_levels(mut self, levels: &[Option<i32>]) -> Self {
        self.levels.extend(levels.iter().copied());
        self
    }

    pub fn failing_arm(mut self, err: SensorError) -> Self {
        self.arm_error = Some(err);
        self
    }

    pub fn tipping_while_measuring(mut self, acc: &'a EventAccumulator, tips: u32) -> Self {
        self.tips_during_measure = Some((acc, tips));
        self
    }
}

impl RangingPort for MockHardware<'_> {
    fn measure_mm(&mut self) -> Option<i32> {
        self.measure_calls += 1;
        if let Some((acc, tips)) = self.tips_during_measure {
            for _ in 0..tips {
                acc.record_event();
            }
        }
        self.levels.pop_front().unwrap_or(self.fallback)
    }
}

impl TipSourcePort for MockHardware<'_> {
    fn arm(&mut self) -> Result<(), SensorError> {
        self.arm_calls += 1;
        match self.arm_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── MockRadio ─────────────────────────────────────────────────

pub struct MockRadio {
    join_result: Result<(), RadioError>,
    send_script: VecDeque<Result<(), RadioError>>,
    pub joins: Vec<JoinCredentials>,
    pub sent: Vec<Vec<u8>>,
}

#[allow(dead_code)]
impl MockRadio {
    pub fn new() -> Self {
        Self {
            join_result: Ok(()),
            send_script: VecDeque::new(),
            joins: Vec::new(),
            sent: Vec::new(),
        }
    }

    pub fn failing_join(mut self) -> Self {
        self.join_result = Err(RadioError::JoinFailed);
        self
    }

    /// Queue results for upcoming `send` calls; unscripted sends succeed.
    pub fn with_sends(mut self, results: &[Result<(), RadioError>]) -> Self {
        self.send_script.extend(results.iter().copied());
        self
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioPort for MockRadio {
    fn join(&mut self, creds: &JoinCredentials) -> Result<(), RadioError> {
        self.joins.push(creds.clone());
        self.join_result
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), RadioError> {
        self.sent.push(bytes.to_vec());
        self.send_script.pop_front().unwrap_or(Ok(()))
    }
}

// ── MockSleeper ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockSleeper {
    pub requests: Vec<u32>,
}

impl SleepPort for MockSleeper {
    fn sleep_for(&mut self, secs: u32) {
        self.requests.push(secs);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<CycleEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&CycleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &CycleEvent) {
        self.events.push(event.clone());
    }
}
