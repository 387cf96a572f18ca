//! Consensus parameter record
//!
//! Read-only chain parameters consumed by signature validation (BIP66 height) and by
//! the surrounding node. Activation state machines for the BIP9 deployments listed
//! here are not part of this crate.
//!
//! All hashes and 256-bit numbers are stored in display (big-endian) byte order.

use hex::FromHex;
use serde::{Deserialize, Serialize};

use crate::constants::{BIP66_ACTIVATION_MAINNET, BIP66_ACTIVATION_REGTEST, BIP66_ACTIVATION_TESTNET};
use crate::types::{Hash, Natural, Network};

/// Position of a BIP9 deployment in [`ConsensusParams::deployments`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentPos {
    TestDummy = 0,
    /// BIP68, BIP112 and BIP113
    Csv = 1,
}

pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 2;

/// A BIP9 version-bits deployment window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bip9Deployment {
    /// Bit position in the block version
    pub bit: u8,
    /// Median time past at which miner signalling starts
    pub start_time: i64,
    /// Median time past at which the attempt expires
    pub timeout: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub network: Network,
    pub genesis_hash: Hash,

    pub bip34_height: Natural,
    pub bip34_hash: Hash,
    pub bip65_height: Natural,
    pub bip66_height: Natural,
    /// Height at which the UAHF (SIGHASH_FORKID) rules kick in
    pub uahf_height: Natural,

    /// Height at which OP_RETURN replay protection stops
    pub anti_replay_op_return_sunset_height: Natural,
    pub anti_replay_op_return_commitment: Vec<u8>,

    /// Blocks within a confirmation window required to lock in a rule change
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: [Bip9Deployment; MAX_VERSION_BITS_DEPLOYMENTS],

    pub pow_limit: Hash,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Target block spacing in seconds
    pub pow_target_spacing: u64,
    /// Retarget timespan in seconds
    pub pow_target_timespan: u64,

    /// The best chain should have at least this much work
    pub minimum_chain_work: Hash,
    /// Signatures in ancestors of this block are assumed valid
    pub default_assume_valid: Hash,

    /// Activation time of the cash hard fork
    pub cash_hard_fork_activation_time: i64,
}

/// Decode a display-order hash literal.
fn hash(hex_str: &'static str) -> Hash {
    <[u8; 32]>::from_hex(hex_str).expect("static hash literal")
}

const POW_TARGET_SPACING: u64 = 10 * 60;
const POW_TARGET_TIMESPAN: u64 = 14 * 24 * 60 * 60;
const CASH_HARD_FORK_ACTIVATION_TIME: i64 = 1_510_600_000;
const ANTI_REPLAY_COMMITMENT: &[u8] = b"Bitcoin: A Peer-to-Peer Electronic Cash System";

impl ConsensusParams {
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            genesis_hash: hash("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
            bip34_height: 227_931,
            bip34_hash: hash("000000000000024b89b42a942fe0d9fea3bb44ab7bd1b19115dd6a759c0808b8"),
            bip65_height: 388_381,
            bip66_height: BIP66_ACTIVATION_MAINNET,
            uahf_height: 478_559,
            anti_replay_op_return_sunset_height: 530_000,
            anti_replay_op_return_commitment: ANTI_REPLAY_COMMITMENT.to_vec(),
            rule_change_activation_threshold: 1916,
            miner_confirmation_window: 2016,
            deployments: [
                Bip9Deployment {
                    bit: 28,
                    start_time: 1_199_145_601,
                    timeout: 1_230_767_999,
                },
                Bip9Deployment {
                    bit: 0,
                    start_time: 1_462_060_800,
                    timeout: 1_493_596_800,
                },
            ],
            pow_limit: hash("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            pow_target_spacing: POW_TARGET_SPACING,
            pow_target_timespan: POW_TARGET_TIMESPAN,
            minimum_chain_work: [0u8; 32],
            default_assume_valid: [0u8; 32],
            cash_hard_fork_activation_time: CASH_HARD_FORK_ACTIVATION_TIME,
        }
    }

    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            genesis_hash: hash("000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943"),
            bip34_height: 21_111,
            bip34_hash: hash("0000000023b3a96d3484e5abb3755c413e7d41500f8e2a5c3f0dd01299cd8ef8"),
            bip65_height: 581_885,
            bip66_height: BIP66_ACTIVATION_TESTNET,
            uahf_height: 1_155_875,
            anti_replay_op_return_sunset_height: 1_250_000,
            anti_replay_op_return_commitment: ANTI_REPLAY_COMMITMENT.to_vec(),
            rule_change_activation_threshold: 1512,
            miner_confirmation_window: 2016,
            deployments: [
                Bip9Deployment {
                    bit: 28,
                    start_time: 1_199_145_601,
                    timeout: 1_230_767_999,
                },
                Bip9Deployment {
                    bit: 0,
                    start_time: 1_456_790_400,
                    timeout: 1_493_596_800,
                },
            ],
            pow_limit: hash("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            pow_target_spacing: POW_TARGET_SPACING,
            pow_target_timespan: POW_TARGET_TIMESPAN,
            minimum_chain_work: [0u8; 32],
            default_assume_valid: [0u8; 32],
            cash_hard_fork_activation_time: CASH_HARD_FORK_ACTIVATION_TIME,
        }
    }

    pub fn regtest() -> Self {
        Self {
            network: Network::Regtest,
            genesis_hash: hash("0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206"),
            // BIP34 never activates on regtest
            bip34_height: 100_000_000,
            bip34_hash: [0u8; 32],
            bip65_height: 1351,
            bip66_height: BIP66_ACTIVATION_REGTEST,
            uahf_height: 0,
            anti_replay_op_return_sunset_height: 530_000,
            anti_replay_op_return_commitment: ANTI_REPLAY_COMMITMENT.to_vec(),
            rule_change_activation_threshold: 108,
            miner_confirmation_window: 144,
            deployments: [
                Bip9Deployment {
                    bit: 28,
                    start_time: 0,
                    timeout: 999_999_999_999,
                },
                Bip9Deployment {
                    bit: 0,
                    start_time: 0,
                    timeout: 999_999_999_999,
                },
            ],
            pow_limit: hash("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            pow_target_spacing: POW_TARGET_SPACING,
            pow_target_timespan: POW_TARGET_TIMESPAN,
            minimum_chain_work: [0u8; 32],
            default_assume_valid: [0u8; 32],
            cash_hard_fork_activation_time: 0,
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Number of blocks between difficulty retargets
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    pub fn deployment(&self, pos: DeploymentPos) -> &Bip9Deployment {
        &self.deployments[pos as usize]
    }

    /// Whether strict DER (BIP66) applies to blocks at `height`
    pub fn is_bip66_active(&self, height: Natural) -> bool {
        height >= self.bip66_height
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_adjustment_interval() {
        assert_eq!(ConsensusParams::mainnet().difficulty_adjustment_interval(), 2016);
        assert_eq!(ConsensusParams::regtest().difficulty_adjustment_interval(), 2016);
    }

    #[test]
    fn test_bip66_activation_boundary() {
        let params = ConsensusParams::mainnet();
        assert!(!params.is_bip66_active(363_724));
        assert!(params.is_bip66_active(363_725));
    }

    #[test]
    fn test_deployment_lookup() {
        let params = ConsensusParams::mainnet();
        assert_eq!(params.deployment(DeploymentPos::Csv).bit, 0);
        assert_eq!(params.deployment(DeploymentPos::TestDummy).bit, 28);
    }

    #[test]
    fn test_genesis_hash_display_order() {
        let params = ConsensusParams::mainnet();
        assert_eq!(params.genesis_hash[0], 0x00);
        assert_eq!(params.genesis_hash[31], 0x6f);
    }

    #[test]
    fn test_for_network() {
        for network in [Network::Mainnet, Network::Testnet, Network::Regtest] {
            assert_eq!(ConsensusParams::for_network(network).network, network);
        }
    }
}
