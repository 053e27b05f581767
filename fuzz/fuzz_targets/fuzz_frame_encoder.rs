//! Fuzz target: `codec::encode_into`
//!
//! Builds a reading, a level policy and an output buffer size from raw
//! bytes and asserts that encoding never panics, never writes past the
//! frame, and leaves short buffers untouched.
//!
//! cargo fuzz run fuzz_frame_encoder

#![no_main]

use creeklink::sensors::Reading;
use creeklink::uplink::codec::{self, FRAME_LEN, LevelPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }

    let level = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let tips = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let policy = if data[8] & 1 == 0 {
        LevelPolicy::Wrap
    } else {
        LevelPolicy::Saturate
    };
    let buf_len = usize::from(data[9] % 32);

    let reading = Reading {
        water_level_mm: level,
        bucket_tips: tips,
    };
    let mut buf = [0x5Au8; 32];

    match codec::encode_into(&reading, policy, &mut buf[..buf_len]) {
        Ok(n) => {
            assert_eq!(n, FRAME_LEN);
            assert_eq!(&buf[..FRAME_LEN], codec::encode(&reading, policy).as_bytes());
            assert!(buf[FRAME_LEN..].iter().all(|&b| b == 0x5A));
        }
        Err(_) => {
            assert!(buf_len < FRAME_LEN);
            assert!(buf.iter().all(|&b| b == 0x5A), "short buffer was modified");
        }
    }

    // Trailer always matches the CRC of the payload.
    let frame = codec::encode(&reading, policy);
    let bytes = frame.as_bytes();
    assert_eq!(frame.crc(), codec::crc16(&bytes[..4]));
});
