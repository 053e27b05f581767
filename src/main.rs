//! CreekLink Firmware — Main Entry Point
//!
//! One boot is one measurement cycle.  The chip wakes from deep sleep,
//! samples the creek, sends a 6-byte frame and goes back to sleep; the
//! next cycle starts with a fresh reset.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LoraRadio    DeepSleep   LogEventSink  │
//! │  (Ranging+TipSource)    (Radio)      (Sleep)     (EventSink)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              NodeService (pure logic)                  │    │
//! │  │  FSM · Acquisition · Encoder · Gate                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Rain-gauge ISR ──▶ RAIN_TIPS (atomic accumulator)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::delay::Ets;

use creeklink::adapters::hardware::HardwareAdapter;
use creeklink::adapters::log_sink::LogEventSink;
use creeklink::adapters::lora::LoraRadio;
use creeklink::adapters::sleep::DeepSleep;
use creeklink::app::service::NodeService;
use creeklink::config::NodeConfig;
use creeklink::drivers::hw_init;
use creeklink::pins;
use creeklink::power;
use creeklink::sensors::rain_gauge::RAIN_TIPS;
use creeklink::sensors::ultrasonic::UltrasonicRanger;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  CreekLink v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let wake = power::wake_reason();

    // ── 2. Peripherals ────────────────────────────────────────
    // A failed GPIO setup still lets the cycle run: the measurement comes
    // back unavailable and the frame carries the sentinel.
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {} (continuing)", e);
    }

    // ── 3. Config ─────────────────────────────────────────────
    // Optional provisioning blob baked in at build time.
    let blob = option_env!("CREEKLINK_CONFIG_JSON").map(str::as_bytes);
    let config = NodeConfig::load_or_default(blob);
    info!(
        "Config: sleep={}s, level policy={:?}",
        config.sleep_secs, config.level_policy
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(UltrasonicRanger::new(
        pins::ULTRASONIC_TRIG_GPIO,
        pins::ULTRASONIC_ECHO_GPIO,
        Ets,
    ));
    let mut radio = LoraRadio::new();
    let mut sleeper = DeepSleep;
    let mut sink = LogEventSink::new();

    // ── 5. One cycle, then deep sleep ─────────────────────────
    // `DeepSleep` does not return on hardware; the next cycle is a reset.
    let report = NodeService::new(config, &RAIN_TIPS).run_cycle(
        wake,
        &mut hw,
        &mut radio,
        &mut sleeper,
        &mut sink,
    );

    warn!("Deep sleep returned unexpectedly: {:?}", report);
    Ok(())
}
