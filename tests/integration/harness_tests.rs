//! Multi-wake tests through [`WakeHarness`].
//!
//! The harness rebuilds the service on every wake; only the accumulator
//! survives between cycles.

use super::mock_hw::{MockHardware, MockRadio, MockSleeper, RecordingSink};

use creeklink::app::events::CycleEvent;
use creeklink::config::NodeConfig;
use creeklink::error::RadioError;
use creeklink::harness::WakeHarness;
use creeklink::power::WakeReason;
use creeklink::sensors::rain_gauge::EventAccumulator;
use creeklink::uplink::gate::CycleOutcome;

#[test]
fn tips_between_wakes_are_attributed_to_the_next_cycle() {
    let tips = EventAccumulator::new();
    let mut harness = WakeHarness::new(
        NodeConfig::default(),
        &tips,
        MockHardware::new(100).with_levels(&[Some(100), Some(100), Some(100)]),
        MockRadio::new(),
        MockSleeper::default(),
        RecordingSink::default(),
    );

    let first = harness.wake();
    for _ in 0..5 {
        harness.tips().record_event();
    }
    let second = harness.wake();
    let third = harness.wake();

    assert_eq!(first.reading.bucket_tips, 0);
    assert_eq!(second.reading.bucket_tips, 5);
    assert_eq!(third.reading.bucket_tips, 0);
    assert_eq!(harness.wakes(), 3);

    assert_eq!(
        harness.radio.sent,
        vec![
            vec![0x00, 0x64, 0x00, 0x00, 0xC3, 0x6B],
            vec![0x00, 0x64, 0x00, 0x05, 0x93, 0xCE],
            vec![0x00, 0x64, 0x00, 0x00, 0xC3, 0x6B],
        ]
    );
    assert_eq!(harness.sleeper.requests, vec![300, 300, 300]);
}

#[test]
fn first_wake_is_power_on_then_timer() {
    let tips = EventAccumulator::new();
    let mut harness = WakeHarness::new(
        NodeConfig::default(),
        &tips,
        MockHardware::new(500),
        MockRadio::new(),
        MockSleeper::default(),
        RecordingSink::default(),
    );

    harness.wake();
    harness.wake();

    let reasons: Vec<WakeReason> = harness
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            CycleEvent::Booted(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(reasons, vec![WakeReason::PowerOn, WakeReason::Timer]);
}

#[test]
fn a_failed_send_does_not_carry_into_the_next_wake() {
    let tips = EventAccumulator::new();
    let mut harness = WakeHarness::new(
        NodeConfig::default(),
        &tips,
        MockHardware::new(500),
        MockRadio::new().with_sends(&[Err(RadioError::SendFailed)]),
        MockSleeper::default(),
        RecordingSink::default(),
    );

    assert_eq!(harness.wake().outcome, Some(CycleOutcome::SendFailed));
    assert_eq!(harness.wake().outcome, Some(CycleOutcome::Sent));
    assert_eq!(harness.radio.sent.len(), 2, "no retransmission of the lost frame");
    assert_eq!(harness.sleeper.requests, vec![300, 300]);
}
