//! Sensor subsystem — the ranging driver, the rain-gauge accumulator, and
//! the per-cycle [`ReadingAcquisition`] that combines them.
//!
//! Acquisition produces exactly one [`Reading`] per wake cycle and never
//! fails: a missing distance is replaced by [`LEVEL_UNAVAILABLE_MM`].

pub mod rain_gauge;
pub mod ultrasonic;

use log::warn;

use crate::app::ports::RangingPort;
use crate::error::SensorError;
use rain_gauge::EventAccumulator;

/// Water level reported when the ranging sensor gives no value.
///
/// 65535 is the top of the 16-bit wire field under both level policies,
/// so the backend sees `0xFFFF` for "no reading" in every configuration.
/// The same bytes also come out for a saturated level and for a wrapped
/// `-1`, so a backend cannot tell these cases apart from the frame alone.
/// The node-side `MeasurementUnavailable` fault is the only distinction.
pub const LEVEL_UNAVAILABLE_MM: i32 = 0xFFFF;

/// One cycle's measurement.  Built once, never mutated, consumed by the
/// frame encoder in the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    /// Measured level in millimetres.  May exceed the wire field's range.
    pub water_level_mm: i32,
    /// Bucket tips since the previous reading.
    pub bucket_tips: u32,
}

/// Result of [`ReadingAcquisition::take_reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired {
    pub reading: Reading,
    /// `false` when the level is the [`LEVEL_UNAVAILABLE_MM`] sentinel.
    pub level_measured: bool,
}

impl Acquired {
    /// `MeasurementUnavailable` when the sentinel was substituted.
    pub fn fault(&self) -> Option<SensorError> {
        (!self.level_measured).then_some(SensorError::MeasurementUnavailable)
    }
}

/// Combines the blocking distance measurement with the tip drain.
pub struct ReadingAcquisition<'a> {
    tips: &'a EventAccumulator,
}

impl<'a> ReadingAcquisition<'a> {
    pub fn new(tips: &'a EventAccumulator) -> Self {
        Self { tips }
    }

    /// Measure once, then drain the tip counter.
    ///
    /// Tips that arrive while the ranging call blocks are counted in this
    /// reading; tips after the drain belong to the next one.
    pub fn take_reading(&self, ranger: &mut impl RangingPort) -> Acquired {
        let measured = ranger.measure_mm();
        let bucket_tips = self.tips.drain();

        let water_level_mm = measured.unwrap_or_else(|| {
            warn!(
                "{}, substituting {} mm",
                SensorError::MeasurementUnavailable,
                LEVEL_UNAVAILABLE_MM
            );
            LEVEL_UNAVAILABLE_MM
        });

        Acquired {
            reading: Reading {
                water_level_mm,
                bucket_tips,
            },
            level_measured: measured.is_some(),
        }
    }
}
