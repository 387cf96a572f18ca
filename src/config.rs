//! Configuration for signature validation
//!
//! Selects the network (and with it the consensus parameters), the default script
//! verification flags, and debug behaviour. Settings can be loaded from a JSON
//! config file, from environment variables, or passed programmatically.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::STANDARD_SIGNATURE_FLAGS;
use crate::error::{Result, SignatureError};
use crate::params::ConsensusParams;
use crate::types::Network;

/// Debug configuration
///
/// None of these settings change accept/reject decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log every rejected signature at debug level
    /// Default: false
    #[serde(default = "default_false")]
    pub log_rejections: bool,

    /// Log verification mismatches (well-formed but not matching) at trace level
    /// Default: false
    #[serde(default = "default_false")]
    pub log_mismatches: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_rejections: false,
            log_mismatches: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigValConfig {
    /// Network whose consensus parameters apply
    /// Default: mainnet
    #[serde(default)]
    pub network: Network,

    /// Script verification flags used when a caller does not pass its own
    /// Default: standard relay policy (STRICTENC | DERSIG | LOW_S | NULLFAIL | WITNESS_PUBKEYTYPE)
    #[serde(default = "default_script_flags")]
    pub script_flags: u32,

    #[serde(default)]
    pub debug: DebugConfig,
}

fn default_false() -> bool {
    false
}

fn default_script_flags() -> u32 {
    STANDARD_SIGNATURE_FLAGS
}

impl Default for SigValConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            script_flags: STANDARD_SIGNATURE_FLAGS,
            debug: DebugConfig::default(),
        }
    }
}

impl SigValConfig {
    /// Defaults overridden by `BLVM_SIGVAL_*` environment variables.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("BLVM_SIGVAL_NETWORK") {
            if let Some(network) = Network::from_name(&val) {
                config.network = network;
            }
        }

        // Accepts decimal or 0x-prefixed hex
        if let Ok(val) = std::env::var("BLVM_SIGVAL_SCRIPT_FLAGS") {
            if let Some(flags) = parse_flags(&val) {
                config.script_flags = flags;
            }
        }

        if let Ok(val) = std::env::var("BLVM_SIGVAL_DEBUG_LOG_REJECTIONS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_rejections = enabled;
            }
        }
        if let Ok(val) = std::env::var("BLVM_SIGVAL_DEBUG_LOG_MISMATCHES") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_mismatches = enabled;
            }
        }

        config
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SignatureError::Config(e.to_string().into()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SignatureError::Config(format!("reading {}: {e}", path.display()).into())
        })?;
        Self::from_json_str(&contents)
    }

    /// Consensus parameters for the configured network
    pub fn consensus_params(&self) -> ConsensusParams {
        ConsensusParams::for_network(self.network)
    }
}

fn parse_flags(val: &str) -> Option<u32> {
    let val = val.trim();
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex_digits) => u32::from_str_radix(hex_digits, 16).ok(),
        None => val.parse::<u32>().ok(),
    }
}

/// Global signature validation configuration
static GLOBAL_SIGVAL_CONFIG: std::sync::OnceLock<SigValConfig> = std::sync::OnceLock::new();

/// Initialize the global configuration.
///
/// Call once at startup, before any validation. Fails if already initialized.
pub fn init_sigval_config(config: SigValConfig) -> Result<()> {
    GLOBAL_SIGVAL_CONFIG
        .set(config)
        .map_err(|_| SignatureError::Config("signature validation config already initialized".into()))
}

/// Get the global configuration, falling back to [`SigValConfig::from_env`]
pub fn get_sigval_config() -> SigValConfig {
    GLOBAL_SIGVAL_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(SigValConfig::from_env)
}
