//! Constants for signature validation

/// Smallest canonical signature plus sighash byte: 30 06 02 01 xx 02 01 xx hh
pub const MIN_SIG_ENCODING_SIZE: usize = 9;

/// Largest canonical signature plus sighash byte (two 33-byte integers)
pub const MAX_SIG_ENCODING_SIZE: usize = 73;

/// Compact signature size: 32-byte R followed by 32-byte S
pub const COMPACT_SIGNATURE_SIZE: usize = 64;

/// Message digest size
pub const DIGEST_SIZE: usize = 32;

/// SEC1 compressed public key size
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;

/// SEC1 uncompressed public key size
pub const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;

/// DER SEQUENCE tag
pub const DER_SEQUENCE_TAG: u8 = 0x30;

/// DER INTEGER tag
pub const DER_INTEGER_TAG: u8 = 0x02;

// Sighash types
pub const SIGHASH_ALL: u8 = 0x01;
pub const SIGHASH_NONE: u8 = 0x02;
pub const SIGHASH_SINGLE: u8 = 0x03;
pub const SIGHASH_FORKID: u8 = 0x40;
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

// Script verification flags (subset used by signature checks)
pub const SCRIPT_VERIFY_NONE: u32 = 0;
pub const SCRIPT_VERIFY_STRICTENC: u32 = 1 << 1;
pub const SCRIPT_VERIFY_DERSIG: u32 = 1 << 2;
pub const SCRIPT_VERIFY_LOW_S: u32 = 1 << 3;
pub const SCRIPT_VERIFY_NULLFAIL: u32 = 1 << 14;
pub const SCRIPT_VERIFY_WITNESS_PUBKEYTYPE: u32 = 1 << 15;

/// Flags every block after BIP66 activation is validated with
pub const MANDATORY_SIGNATURE_FLAGS: u32 = SCRIPT_VERIFY_DERSIG;

/// Relay policy flags for signatures
pub const STANDARD_SIGNATURE_FLAGS: u32 = SCRIPT_VERIFY_STRICTENC
    | SCRIPT_VERIFY_DERSIG
    | SCRIPT_VERIFY_LOW_S
    | SCRIPT_VERIFY_NULLFAIL
    | SCRIPT_VERIFY_WITNESS_PUBKEYTYPE;

// BIP66 activation heights
pub const BIP66_ACTIVATION_MAINNET: u64 = 363_725;
pub const BIP66_ACTIVATION_TESTNET: u64 = 330_776;
pub const BIP66_ACTIVATION_REGTEST: u64 = 1251;
