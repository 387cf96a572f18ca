//! Core types shared across the crate

use serde::{Deserialize, Serialize};

/// 32-byte hash
pub type Hash = [u8; 32];

/// Block height
pub type Natural = u64;

/// Bitcoin network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// Parse a network name as used in config files and environment variables
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Some(Network::Mainnet),
            "testnet" | "test" => Some(Network::Testnet),
            "regtest" => Some(Network::Regtest),
            _ => None,
        }
    }
}

/// Signature version: which script context a signature is checked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigVersion {
    /// Legacy (pre-SegWit) scripts
    #[default]
    Base,
    /// SegWit v0 witness scripts
    WitnessV0,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name("mainnet"), Some(Network::Mainnet));
        assert_eq!(Network::from_name(" Test "), Some(Network::Testnet));
        assert_eq!(Network::from_name("regtest"), Some(Network::Regtest));
        assert_eq!(Network::from_name("signet"), None);
    }

    #[test]
    fn test_network_serde_lowercase() {
        let json = serde_json::to_string(&Network::Regtest).unwrap();
        assert_eq!(json, "\"regtest\"");
    }
}
