//! Deep-sleep entry and wake-cause reporting.
//!
//! The node's only suspension point is a timer-armed deep sleep.  On
//! ESP-IDF the chip powers down and restarts from reset when the timer
//! fires; RAM is lost, which is why the tip counter is drained before
//! sleeping rather than carried across.
//!
//! On host targets sleep is simulated: it logs and returns immediately.

use log::info;

/// Why the current boot happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// Cold boot or reset (no sleep wake source).
    PowerOn,
    /// The deep-sleep timer fired.
    Timer,
    /// An external GPIO / EXT wake source.
    Gpio,
    /// Any other cause, raw ESP-IDF value.
    Other(u32),
}

#[cfg(target_os = "espidf")]
pub fn wake_reason() -> WakeReason {
    use esp_idf_svc::sys::*;

    // SAFETY: read-only query of the RTC wake cause register.
    let cause = unsafe { esp_sleep_get_wakeup_cause() };
    #[allow(non_upper_case_globals)]
    match cause {
        esp_sleep_source_t_ESP_SLEEP_WAKEUP_UNDEFINED => WakeReason::PowerOn,
        esp_sleep_source_t_ESP_SLEEP_WAKEUP_TIMER => WakeReason::Timer,
        esp_sleep_source_t_ESP_SLEEP_WAKEUP_EXT0
        | esp_sleep_source_t_ESP_SLEEP_WAKEUP_EXT1
        | esp_sleep_source_t_ESP_SLEEP_WAKEUP_GPIO => WakeReason::Gpio,
        other => WakeReason::Other(other),
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn wake_reason() -> WakeReason {
    WakeReason::PowerOn
}

/// Arm the RTC timer for `secs` and enter deep sleep.  Does not return.
#[cfg(target_os = "espidf")]
pub fn enter_deep_sleep(secs: u32) {
    use esp_idf_svc::sys::*;

    info!("Deep sleeping for {} seconds", secs);
    // SAFETY: both calls are plain ESP-IDF APIs with no Rust-side
    // invariants; deep sleep start never returns.
    unsafe {
        esp_sleep_enable_timer_wakeup(u64::from(secs) * 1_000_000);
        esp_deep_sleep_start();
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn enter_deep_sleep(secs: u32) {
    info!("power(sim): deep sleep for {} seconds skipped", secs);
}
