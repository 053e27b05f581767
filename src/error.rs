//! Unified error types for the CreekLink node firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! duty-cycle controller's error handling uniform.  All variants are `Copy`
//! so they travel through cycle events and logs without allocation.
//!
//! None of these errors is fatal: the controller handles each one inside the
//! cycle that produced it and still goes to sleep.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ranging sensor or the tip source failed.
    Sensor(SensorError),
    /// The frame could not be written into the supplied buffer.
    Encode(EncodeError),
    /// The radio collaborator failed to join or send.
    Radio(RadioError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Radio(e) => write!(f, "radio: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The ranging sensor produced no echo within its timeout.
    MeasurementUnavailable,
    /// GPIO configuration for the sensor failed.
    GpioConfigFailed(i32),
    /// The GPIO ISR service or handler could not be installed.
    IsrInstallFailed(i32),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementUnavailable => write!(f, "measurement unavailable"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::IsrInstallFailed(rc) => write!(f, "ISR install failed (rc={rc})"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Encoding errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Destination buffer is smaller than one frame.  Nothing was written.
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small (need {needed}, have {available})")
            }
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// The network join (OTAA) did not complete.
    JoinFailed,
    /// The uplink was rejected or not handed to the modem.
    SendFailed,
    /// Payload exceeds what the radio accepts in one uplink.
    PayloadTooLarge(usize),
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JoinFailed => write!(f, "network join failed"),
            Self::SendFailed => write!(f, "uplink send failed"),
            Self::PayloadTooLarge(len) => write!(f, "payload too large ({len} bytes)"),
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_errors_convert_into_error() {
        let e: Error = RadioError::SendFailed.into();
        assert_eq!(e, Error::Radio(RadioError::SendFailed));

        let e: Error = EncodeError::BufferTooSmall { needed: 6, available: 5 }.into();
        assert_eq!(e.to_string(), "encode: buffer too small (need 6, have 5)");
    }

    #[test]
    fn unavailable_measurement_displays_under_sensor() {
        let e = Error::from(SensorError::MeasurementUnavailable);
        assert_eq!(e.to_string(), "sensor: measurement unavailable");
    }

    #[test]
    fn sensor_error_display_carries_return_code() {
        let e = Error::from(SensorError::IsrInstallFailed(-1));
        assert_eq!(e.to_string(), "sensor: ISR install failed (rc=-1)");
    }
}
