//! CreekLink flood-node firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod harness;
pub mod pins;
pub mod power;
pub mod sensors;
pub mod uplink;

// Hardware-facing modules; their ESP-IDF calls are cfg-gated inside so the
// crate still builds for the host.
pub mod adapters;
pub mod drivers;
