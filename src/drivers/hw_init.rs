//! One-shot hardware peripheral initialization.
//!
//! Configures the ultrasonic TRIG/ECHO pins and the rain-gauge edge
//! interrupt using raw ESP-IDF sys calls.  Called from the Booting state
//! of every wake cycle (GPIO configuration does not survive deep sleep).
//!
//! On host targets every function is a logging no-op.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), SensorError> {
    // SAFETY: Called once per boot from the main flow before any ISR is
    // registered; single-threaded.
    unsafe {
        let trig = gpio_config_t {
            pin_bit_mask: 1u64 << pins::ULTRASONIC_TRIG_GPIO,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = gpio_config(&trig);
        if ret != ESP_OK as i32 {
            return Err(SensorError::GpioConfigFailed(ret));
        }
        gpio_set_level(pins::ULTRASONIC_TRIG_GPIO, 0);

        let echo = gpio_config_t {
            pin_bit_mask: 1u64 << pins::ULTRASONIC_ECHO_GPIO,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = gpio_config(&echo);
        if ret != ESP_OK as i32 {
            return Err(SensorError::GpioConfigFailed(ret));
        }
    }
    info!("hw_init: ultrasonic TRIG/ECHO configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), SensorError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Rain gauge ISR ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tipping_bucket_isr(_arg: *mut core::ffi::c_void) {
    crate::sensors::rain_gauge::rain_gauge_isr_handler();
}

/// Configure the tipping-bucket pin for rising-edge interrupts and attach
/// the accumulator ISR.
#[cfg(target_os = "espidf")]
pub fn install_rain_gauge_isr() -> Result<(), SensorError> {
    // SAFETY: single-threaded boot path; the handler only touches an atomic.
    unsafe {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::TIPPING_BUCKET_GPIO,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_POSEDGE,
        };
        let ret = gpio_config(&cfg);
        if ret != ESP_OK as i32 {
            return Err(SensorError::GpioConfigFailed(ret));
        }

        let ret = gpio_install_isr_service(0);
        // ESP_ERR_INVALID_STATE: service already installed this boot.
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(SensorError::IsrInstallFailed(ret));
        }

        let ret = gpio_isr_handler_add(
            pins::TIPPING_BUCKET_GPIO,
            Some(tipping_bucket_isr),
            core::ptr::null_mut(),
        );
        if ret != ESP_OK as i32 {
            return Err(SensorError::IsrInstallFailed(ret));
        }
    }
    info!("hw_init: rain gauge ISR armed on GPIO {}", pins::TIPPING_BUCKET_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn install_rain_gauge_isr() -> Result<(), SensorError> {
    log::info!("hw_init(sim): rain gauge ISR not installed");
    Ok(())
}

// ── GPIO / timing helpers ────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output in init_peripherals().
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
pub fn micros() -> i64 {
    // SAFETY: esp_timer_get_time has no preconditions.
    unsafe { esp_timer_get_time() }
}
