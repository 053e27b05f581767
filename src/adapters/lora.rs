//! LoRaWAN radio adapter.
//!
//! Implements [`RadioPort`].  The LoRaWAN MAC (OTAA join, session keys,
//! encryption) is not wired up yet: `join` records the credentials and
//! `send` logs the uplink, so the rest of the cycle runs end to end.
//!
//! TODO: drive an OTAA join with `JoinCredentials::app_key` through a real
//! LoRaWAN MAC instead of accepting the join unconditionally.

use log::{info, warn};

use crate::app::ports::RadioPort;
use crate::config::JoinCredentials;
use crate::error::RadioError;

/// Smallest application payload limit across EU868/US915 data rates.
pub const MAX_UPLINK_LEN: usize = 11;

pub struct LoraRadio {
    dev_eui: Option<heapless::String<16>>,
    uplinks: u32,
}

impl LoraRadio {
    pub fn new() -> Self {
        Self {
            dev_eui: None,
            uplinks: 0,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.dev_eui.is_some()
    }

    /// Uplinks accepted since boot.
    pub fn uplinks(&self) -> u32 {
        self.uplinks
    }
}

impl Default for LoraRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioPort for LoraRadio {
    fn join(&mut self, creds: &JoinCredentials) -> Result<(), RadioError> {
        info!("LoRa radio init (stub), dev_eui={}", creds.dev_eui);
        self.dev_eui = Some(creds.dev_eui.clone());
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), RadioError> {
        if !self.is_joined() {
            warn!("LoRa send before join");
            return Err(RadioError::JoinFailed);
        }
        if bytes.len() > MAX_UPLINK_LEN {
            return Err(RadioError::PayloadTooLarge(bytes.len()));
        }
        info!("LoRa send (stub), len={}", bytes.len());
        self.uplinks += 1;
        Ok(())
    }
}
