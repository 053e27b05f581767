//! Ultrasonic time-of-flight ranging sensor (JSN-SR04T / HC-SR04).
//!
//! A 10 µs HIGH on TRIG fires a burst; ECHO then goes HIGH for the round
//! trip time.  Distance in mm = echo_us × 343 m/s / 2.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs TRIG and busy-waits on ECHO via hw_init helpers.
//! On host/test: returns the value set with [`sim_set_distance_mm`].

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Speed of sound at ~20 °C in mm per ms; round trip is halved below.
const SOUND_MM_PER_MS: i32 = 343;

/// Rated range of the JSN-SR04T.
pub const RATED_RANGE_MM: i32 = 4_500;

/// Longest echo accepted before giving up.  A 4.5 m target echoes after
/// ~26.2 ms; 30 ms leaves margin above that.
pub const ECHO_TIMEOUT_US: i64 = 30_000;

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_MM: AtomicI32 = AtomicI32::new(500);
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_PRESENT: AtomicBool = AtomicBool::new(true);

/// Set the simulated distance; `None` simulates a missing echo.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_mm(mm: Option<i32>) {
    match mm {
        Some(v) => {
            SIM_DISTANCE_MM.store(v, Ordering::Relaxed);
            SIM_ECHO_PRESENT.store(true, Ordering::Relaxed);
        }
        None => SIM_ECHO_PRESENT.store(false, Ordering::Relaxed),
    }
}

/// Convert an echo pulse width to a one-way distance.
pub fn echo_us_to_mm(echo_us: i64) -> i32 {
    (echo_us * i64::from(SOUND_MM_PER_MS) / 2_000) as i32
}

pub struct UltrasonicRanger<D: DelayNs> {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    trig_gpio: i32,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    echo_gpio: i32,
    delay: D,
}

impl<D: DelayNs> UltrasonicRanger<D> {
    pub fn new(trig_gpio: i32, echo_gpio: i32, delay: D) -> Self {
        Self {
            trig_gpio,
            echo_gpio,
            delay,
        }
    }
}

#[cfg(target_os = "espidf")]
impl<D: DelayNs> UltrasonicRanger<D> {
    /// Fire one ping and return the distance, or `None` on echo timeout.
    pub fn measure_mm(&mut self) -> Option<i32> {
        self.trigger();
        self.echo_width_us().map(echo_us_to_mm)
    }

    fn trigger(&mut self) {
        hw_init::gpio_write(self.trig_gpio, false);
        self.delay.delay_us(2);
        hw_init::gpio_write(self.trig_gpio, true);
        self.delay.delay_us(10);
        hw_init::gpio_write(self.trig_gpio, false);
    }

    fn echo_width_us(&mut self) -> Option<i64> {
        let start = hw_init::micros();
        while !hw_init::gpio_read(self.echo_gpio) {
            if hw_init::micros() - start > ECHO_TIMEOUT_US {
                return None;
            }
        }
        let rise = hw_init::micros();
        while hw_init::gpio_read(self.echo_gpio) {
            if hw_init::micros() - rise > ECHO_TIMEOUT_US {
                return None;
            }
        }
        Some(hw_init::micros() - rise)
    }
}

#[cfg(not(target_os = "espidf"))]
impl<D: DelayNs> UltrasonicRanger<D> {
    /// Simulated ping: honours the trigger delay, then reports the
    /// distance set with [`sim_set_distance_mm`] unchanged.
    pub fn measure_mm(&mut self) -> Option<i32> {
        self.delay.delay_us(10);
        if !SIM_ECHO_PRESENT.load(Ordering::Relaxed) {
            return None;
        }
        Some(SIM_DISTANCE_MM.load(Ordering::Relaxed))
    }
}
