//! Hardware adapter — bridges the node's sensors to domain port traits.
//!
//! Owns the ultrasonic ranger and arms the rain-gauge interrupt, exposing
//! them through [`RangingPort`] and [`TipSourcePort`].  On non-espidf
//! targets the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{RangingPort, TipSourcePort};
use crate::drivers::hw_init;
use crate::error::SensorError;
use crate::sensors::ultrasonic::UltrasonicRanger;

/// Concrete adapter that combines the sensor hardware behind port traits.
pub struct HardwareAdapter<D: DelayNs> {
    ranger: UltrasonicRanger<D>,
    armed: bool,
}

impl<D: DelayNs> HardwareAdapter<D> {
    pub fn new(ranger: UltrasonicRanger<D>) -> Self {
        Self {
            ranger,
            armed: false,
        }
    }

    /// Whether the tip interrupt has been registered this boot.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

// ── RangingPort implementation ────────────────────────────────

impl<D: DelayNs> RangingPort for HardwareAdapter<D> {
    fn measure_mm(&mut self) -> Option<i32> {
        self.ranger.measure_mm()
    }
}

// ── TipSourcePort implementation ──────────────────────────────

impl<D: DelayNs> TipSourcePort for HardwareAdapter<D> {
    fn arm(&mut self) -> Result<(), SensorError> {
        if self.armed {
            return Ok(());
        }
        hw_init::install_rain_gauge_isr()?;
        self.armed = true;
        Ok(())
    }
}
