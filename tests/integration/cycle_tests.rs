//! Integration tests for the NodeService → FSM → ports pipeline.
//!
//! One `run_cycle` is one wake of the node.  Each test builds its own
//! accumulator so tests can run in parallel without sharing tip counts.

use super::mock_hw::{MockHardware, MockRadio, MockSleeper, RecordingSink};

use creeklink::app::events::CycleEvent;
use creeklink::app::service::NodeService;
use creeklink::config::NodeConfig;
use creeklink::error::{Error, RadioError, SensorError};
use creeklink::fsm::StateId;
use creeklink::power::WakeReason;
use creeklink::sensors::LEVEL_UNAVAILABLE_MM;
use creeklink::sensors::rain_gauge::EventAccumulator;
use creeklink::uplink::codec::LevelPolicy;
use creeklink::uplink::gate::CycleOutcome;

struct Rig<'a> {
    hw: MockHardware<'a>,
    radio: MockRadio,
    sleeper: MockSleeper,
    sink: RecordingSink,
}

impl<'a> Rig<'a> {
    fn new(hw: MockHardware<'a>, radio: MockRadio) -> Self {
        Self {
            hw,
            radio,
            sleeper: MockSleeper::default(),
            sink: RecordingSink::default(),
        }
    }

    fn run(&mut self, service: NodeService<'_>) -> creeklink::app::service::CycleReport {
        service.run_cycle(
            WakeReason::Timer,
            &mut self.hw,
            &mut self.radio,
            &mut self.sleeper,
            &mut self.sink,
        )
    }
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn two_tips_are_reported_then_counter_reads_zero() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(500), MockRadio::new());

    tips.record_event();
    tips.record_event();
    let report = rig.run(NodeService::new(NodeConfig::default(), &tips));

    assert_eq!(report.reading.bucket_tips, 2);
    assert_eq!(report.reading.water_level_mm, 500);
    assert_eq!(tips.drain(), 0, "cycle must have drained the counter");

    assert_eq!(rig.radio.sent, vec![vec![0x01, 0xF4, 0x00, 0x02, 0xED, 0xA4]]);
    assert_eq!(report.outcome, Some(CycleOutcome::Sent));
    assert_eq!(rig.sleeper.requests, vec![300]);
}

#[test]
fn states_are_visited_in_pipeline_order() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(500), MockRadio::new());
    rig.run(NodeService::new(NodeConfig::default(), &tips));

    let transitions: Vec<(StateId, StateId)> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            CycleEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();

    assert_eq!(
        transitions,
        vec![
            (StateId::Booting, StateId::Measuring),
            (StateId::Measuring, StateId::Encoding),
            (StateId::Encoding, StateId::Transmitting),
            (StateId::Transmitting, StateId::Sleeping),
        ]
    );
    assert!(matches!(rig.sink.events.first(), Some(CycleEvent::Booted(WakeReason::Timer))));
    assert!(matches!(rig.sink.events.last(), Some(CycleEvent::Sleeping { secs: 300 })));
}

#[test]
fn join_receives_configured_credentials() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(500), MockRadio::new());
    let config = NodeConfig::default();
    rig.run(NodeService::new(config.clone(), &tips));

    assert_eq!(rig.radio.joins, vec![config.join]);
    assert_eq!(rig.hw.arm_calls, 1);
    assert_eq!(rig.hw.measure_calls, 1);
    assert_eq!(rig.sink.count(|e| matches!(e, CycleEvent::MeasurementFailed(_))), 0);
}

#[test]
fn tips_during_measurement_belong_to_current_reading() {
    let tips = EventAccumulator::new();
    let hw = MockHardware::new(500).tipping_while_measuring(&tips, 3);
    let mut rig = Rig::new(hw, MockRadio::new());

    tips.record_event();
    let report = rig.run(NodeService::new(NodeConfig::default(), &tips));

    assert_eq!(report.reading.bucket_tips, 4);
    assert_eq!(tips.pending(), 0);
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn send_failure_still_sleeps_for_configured_duration() {
    let tips = EventAccumulator::new();
    let radio = MockRadio::new().with_sends(&[Err(RadioError::SendFailed)]);
    let mut rig = Rig::new(MockHardware::new(500), radio);
    let config = NodeConfig {
        sleep_secs: 900,
        ..NodeConfig::default()
    };

    let report = rig.run(NodeService::new(config, &tips));

    assert_eq!(report.outcome, Some(CycleOutcome::SendFailed));
    assert_eq!(rig.radio.sent.len(), 1, "exactly one attempt, no retry");
    assert_eq!(rig.sleeper.requests, vec![900]);
    assert_eq!(
        rig.sink.count(|e| matches!(e, CycleEvent::Transmitted(CycleOutcome::SendFailed))),
        1
    );
}

#[test]
fn missing_echo_sends_sentinel_level() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::without_echo(), MockRadio::new());

    tips.record_event();
    tips.record_event();
    let report = rig.run(NodeService::new(NodeConfig::default(), &tips));

    assert!(!report.level_measured);
    assert_eq!(report.reading.water_level_mm, LEVEL_UNAVAILABLE_MM);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            CycleEvent::MeasurementFailed(Error::Sensor(SensorError::MeasurementUnavailable))
        )),
        1
    );
    assert_eq!(rig.radio.sent, vec![vec![0xFF, 0xFF, 0x00, 0x02, 0x20, 0x42]]);
    assert_eq!(rig.sleeper.requests, vec![300]);
}

#[test]
fn init_failures_do_not_stop_the_cycle() {
    let tips = EventAccumulator::new();
    let hw = MockHardware::new(500).failing_arm(SensorError::IsrInstallFailed(-1));
    let mut rig = Rig::new(hw, MockRadio::new().failing_join());

    let report = rig.run(NodeService::new(NodeConfig::default(), &tips));

    assert_eq!(report.init_failures, 2);
    assert_eq!(rig.hw.measure_calls, 1, "must still measure");
    assert_eq!(rig.radio.sent.len(), 1, "must still attempt to send");
    assert_eq!(rig.sleeper.requests, vec![300]);

    let failures: Vec<Error> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            CycleEvent::InitFailed(err) => Some(*err),
            _ => None,
        })
        .collect();
    assert_eq!(
        failures,
        vec![
            Error::Sensor(SensorError::IsrInstallFailed(-1)),
            Error::Radio(RadioError::JoinFailed),
        ]
    );
}

#[test]
fn short_tx_buffer_skips_transmit_but_sleeps() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(500), MockRadio::new());

    let report = rig.run(NodeService::with_tx_len(NodeConfig::default(), &tips, 5));

    assert_eq!(report.frame, None);
    assert_eq!(report.outcome, None);
    assert!(rig.radio.sent.is_empty());
    assert_eq!(rig.sleeper.requests, vec![300]);
    assert_eq!(rig.sink.count(|e| matches!(e, CycleEvent::EncodeFailed(_))), 1);
}

// ── Level policy ──────────────────────────────────────────────

#[test]
fn wrap_policy_keeps_low_bits_of_large_level() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(100_000), MockRadio::new());

    let report = rig.run(NodeService::new(NodeConfig::default(), &tips));

    let frame = report.frame.expect("frame should be built");
    assert_eq!(&frame[..2], &[0x86, 0xA0]);
}

#[test]
fn saturate_policy_clamps_large_level() {
    let tips = EventAccumulator::new();
    let mut rig = Rig::new(MockHardware::new(100_000), MockRadio::new());
    let config = NodeConfig {
        level_policy: LevelPolicy::Saturate,
        ..NodeConfig::default()
    };

    let report = rig.run(NodeService::new(config, &tips));

    assert_eq!(rig.radio.sent, vec![vec![0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]]);
    assert_eq!(report.reading.water_level_mm, 100_000);
}
