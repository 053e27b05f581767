//! Node configuration parameters
//!
//! All tunable parameters for a CreekLink node.  Defaults match the deployed
//! field units; a provisioning blob (JSON) can override them at boot.
//! GPIO assignments live in [`crate::pins`], not here.

use heapless::String;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::uplink::codec::LevelPolicy;

/// Hex length of a LoRaWAN EUI (8 bytes).
pub const EUI_HEX_LEN: usize = 16;
/// Hex length of a LoRaWAN AppKey (16 bytes).
pub const APP_KEY_HEX_LEN: usize = 32;

/// OTAA join identifiers handed to the radio collaborator unchanged.
///
/// The core never interprets these beyond checking they are well-formed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCredentials {
    pub app_eui: String<EUI_HEX_LEN>,
    pub dev_eui: String<EUI_HEX_LEN>,
    pub app_key: String<APP_KEY_HEX_LEN>,
}

impl Default for JoinCredentials {
    fn default() -> Self {
        Self {
            app_eui: fixed("0000000000000000"),
            dev_eui: fixed("0011223344556677"),
            app_key: fixed("00112233445566778899AABBCCDDEEFF"),
        }
    }
}

/// A literal that does not fit yields an empty string, which `validate`
/// then rejects, rather than a silently truncated identifier.
fn fixed<const N: usize>(s: &str) -> String<N> {
    String::try_from(s).unwrap_or_default()
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Timing ---
    /// Measurement cadence while awake (milliseconds).  The one-shot
    /// duty cycle takes a single reading per boot and does not use it.
    pub measurement_interval_ms: u32,
    /// Deep sleep duration between cycles (seconds).
    pub sleep_secs: u32,

    // --- Framing ---
    /// How an out-of-range water level is squeezed into the 16-bit field.
    pub level_policy: LevelPolicy,

    // --- Radio ---
    pub join: JoinCredentials,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            measurement_interval_ms: 60_000, // 1/min
            sleep_secs: 300,                 // 5 min
            level_policy: LevelPolicy::Wrap,
            join: JoinCredentials::default(),
        }
    }
}

impl NodeConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sleep_secs == 0 {
            return Err(ConfigError::ValidationFailed("sleep_secs must be > 0"));
        }
        if self.measurement_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "measurement_interval_ms must be > 0",
            ));
        }
        if !is_hex_of_len(&self.join.app_eui, EUI_HEX_LEN) {
            return Err(ConfigError::ValidationFailed("app_eui must be 16 hex digits"));
        }
        if !is_hex_of_len(&self.join.dev_eui, EUI_HEX_LEN) {
            return Err(ConfigError::ValidationFailed("dev_eui must be 16 hex digits"));
        }
        if !is_hex_of_len(&self.join.app_key, APP_KEY_HEX_LEN) {
            return Err(ConfigError::ValidationFailed("app_key must be 32 hex digits"));
        }
        Ok(())
    }

    /// Parse a JSON provisioning blob and validate it.
    ///
    /// Missing fields take their defaults, so a blob may carry only the
    /// keys it wants to override.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Boot-time load: the provisioning blob if present and valid,
    /// defaults otherwise.
    pub fn load_or_default(blob: Option<&[u8]>) -> Self {
        let Some(bytes) = blob else {
            return Self::default();
        };
        match Self::from_json(bytes) {
            Ok(config) => config,
            Err(e) => {
                warn!("Provisioning config rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

fn is_hex_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Errors from loading or validating a [`NodeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The provisioning blob could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
