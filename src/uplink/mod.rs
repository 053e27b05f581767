//! Uplink path: frame encoding and the transmission gate.

pub mod codec;
pub mod gate;
