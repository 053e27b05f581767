//! Fixed-layout telemetry frame encoder.
//!
//! Wire format (6 bytes, every field big-endian):
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │ level (2B)   │ tips (2B)    │ CRC-16 (2B)  │
//! │ u16 BE       │ u16 BE, sat. │ over [0..4]  │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! The CRC is CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection,
//! no final XOR (catalogued as `CRC_16_IBM_3740`).  The node only sends, so
//! there is no decoder here.

use crc::{CRC_16_IBM_3740, Crc};
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::sensors::Reading;

/// Encoded frame size in bytes.
pub const FRAME_LEN: usize = 6;

/// Number of leading bytes covered by the checksum.
const PAYLOAD_LEN: usize = 4;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// How `water_level_mm` is fitted into its 16-bit field.
///
/// The deployed nodes take the low 16 bits, so values outside 0..=65535
/// alias silently.  `Saturate` clamps instead; the bucket-tip field always
/// saturates regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// Keep the low 16 bits (two's complement wrap).
    #[default]
    Wrap,
    /// Clamp to `0..=65535`.
    Saturate,
}

impl LevelPolicy {
    pub fn apply(self, level_mm: i32) -> u16 {
        match self {
            Self::Wrap => level_mm as u16,
            Self::Saturate => level_mm.clamp(0, i32::from(u16::MAX)) as u16,
        }
    }
}

/// One encoded frame, ready to hand to the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// The checksum carried in bytes 4-5.
    pub fn crc(&self) -> u16 {
        u16::from_be_bytes([self.0[4], self.0[5]])
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// CRC-16/CCITT-FALSE of `data`.
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Serialize a reading into a frame.  Pure and deterministic.
pub fn encode(reading: &Reading, policy: LevelPolicy) -> Frame {
    let level = policy.apply(reading.water_level_mm);
    let tips = u16::try_from(reading.bucket_tips).unwrap_or(u16::MAX);

    let mut out = [0u8; FRAME_LEN];
    out[0..2].copy_from_slice(&level.to_be_bytes());
    out[2..4].copy_from_slice(&tips.to_be_bytes());
    let crc = crc16(&out[..PAYLOAD_LEN]);
    out[4..6].copy_from_slice(&crc.to_be_bytes());

    Frame(out)
}

/// Encode into a caller-supplied buffer.
///
/// Returns the number of bytes written (always [`FRAME_LEN`]).  A buffer
/// shorter than one frame is left untouched.
pub fn encode_into(
    reading: &Reading,
    policy: LevelPolicy,
    out_buf: &mut [u8],
) -> Result<usize, EncodeError> {
    if out_buf.len() < FRAME_LEN {
        return Err(EncodeError::BufferTooSmall {
            needed: FRAME_LEN,
            available: out_buf.len(),
        });
    }

    let frame = encode(reading, policy);
    out_buf[..FRAME_LEN].copy_from_slice(frame.as_bytes());
    Ok(FRAME_LEN)
}
