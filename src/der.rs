//! Strict DER signature encoding (BIP66)
//!
//! A canonical signature is laid out as:
//!
//! ```text
//! 0x30 [total-length] 0x02 [R-length] [R] 0x02 [S-length] [S] [sighash]
//! ```
//!
//! * total-length: 1-byte length of everything that follows, excluding the sighash byte.
//! * R-length: 1-byte length of the R value that follows.
//! * R: big-endian R value using the shortest possible encoding for a positive
//!   integer (no null bytes at the start, except a single one when the next byte
//!   has its highest bit set).
//! * S-length / S: same rules as for R.
//! * sighash: 1-byte hash type (not part of the DER signature).
//!
//! The check is consensus-critical since BIP66 and runs on raw bytes before any
//! curve arithmetic. It is deliberately stricter than the engine's DER parser.

use thiserror::Error;

use crate::constants::{
    BIP66_ACTIVATION_MAINNET, BIP66_ACTIVATION_REGTEST, BIP66_ACTIVATION_TESTNET,
    DER_INTEGER_TAG, DER_SEQUENCE_TAG, MAX_SIG_ENCODING_SIZE, MIN_SIG_ENCODING_SIZE,
};
use crate::params::ConsensusParams;
use crate::types::Network;

/// The first strict-DER rule a signature breaks, in evaluation order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerViolation {
    #[error("signature length {0} outside [9, 73]")]
    Size(usize),

    #[error("missing SEQUENCE tag")]
    NotSequence,

    #[error("SEQUENCE length does not cover the signature")]
    SequenceLength,

    #[error("R length runs past the signature")]
    RLengthOverflow,

    #[error("element lengths do not add up to the signature length")]
    LengthMismatch,

    #[error("R is not an INTEGER")]
    RNotInteger,

    #[error("R is empty")]
    RZeroLength,

    #[error("R is negative")]
    RNegative,

    #[error("R has excess leading zero padding")]
    RExcessPadding,

    #[error("S is not an INTEGER")]
    SNotInteger,

    #[error("S is empty")]
    SZeroLength,

    #[error("S is negative")]
    SNegative,

    #[error("S has excess leading zero padding")]
    SExcessPadding,
}

/// Check a `DER-signature ‖ sighash` blob against the strict DER rules.
///
/// Returns the first violated rule. Every index below is guarded by an earlier
/// length check; the comments name the guard.
pub fn check_der_encoding(sig: &[u8]) -> Result<(), DerViolation> {
    let len = sig.len();

    // Minimum and maximum size constraints.
    if !(MIN_SIG_ENCODING_SIZE..=MAX_SIG_ENCODING_SIZE).contains(&len) {
        return Err(DerViolation::Size(len));
    }

    // A signature is of type 0x30 (compound).
    if sig[0] != DER_SEQUENCE_TAG {
        return Err(DerViolation::NotSequence);
    }

    // Make sure the length covers the entire signature.
    if sig[1] as usize != len - 3 {
        return Err(DerViolation::SequenceLength);
    }

    // Extract the length of the R element.
    let len_r = sig[3] as usize;

    // Make sure the length of the S element is still inside the signature.
    if 5 + len_r >= len {
        return Err(DerViolation::RLengthOverflow);
    }

    // Extract the length of the S element. In bounds: 5 + len_r < len.
    let len_s = sig[5 + len_r] as usize;

    // Verify that the length of the signature matches the sum of the length
    // of the elements.
    if len_r + len_s + 7 != len {
        return Err(DerViolation::LengthMismatch);
    }

    // Check whether the R element is an integer.
    if sig[2] != DER_INTEGER_TAG {
        return Err(DerViolation::RNotInteger);
    }

    // Zero-length integers are not allowed for R.
    if len_r == 0 {
        return Err(DerViolation::RZeroLength);
    }

    // Negative numbers are not allowed for R.
    if sig[4] & 0x80 != 0 {
        return Err(DerViolation::RNegative);
    }

    // Null bytes at the start of R are not allowed, unless R would otherwise be
    // interpreted as a negative number. sig[5] exists: len >= 9.
    if len_r > 1 && sig[4] == 0x00 && sig[5] & 0x80 == 0 {
        return Err(DerViolation::RExcessPadding);
    }

    // Check whether the S element is an integer. In bounds: len_r + 4 < 5 + len_r.
    if sig[len_r + 4] != DER_INTEGER_TAG {
        return Err(DerViolation::SNotInteger);
    }

    // Zero-length integers are not allowed for S.
    if len_s == 0 {
        return Err(DerViolation::SZeroLength);
    }

    // Negative numbers are not allowed for S. In bounds: len_s >= 1 so
    // len_r + 6 < len_r + len_s + 7 = len.
    if sig[len_r + 6] & 0x80 != 0 {
        return Err(DerViolation::SNegative);
    }

    // Null bytes at the start of S are not allowed, unless S would otherwise be
    // interpreted as a negative number. In bounds: len_s > 1 so len_r + 7 < len.
    if len_s > 1 && sig[len_r + 6] == 0x00 && sig[len_r + 7] & 0x80 == 0 {
        return Err(DerViolation::SExcessPadding);
    }

    Ok(())
}

/// Whether `sig` (DER signature followed by one sighash byte) is strictly DER-encoded.
///
/// Total over all inputs; never panics.
#[inline]
pub fn is_valid_signature_encoding(sig: &[u8]) -> bool {
    check_der_encoding(sig).is_ok()
}

/// BIP66: strict DER is only enforced from the activation height on.
///
/// `signature` must include the trailing sighash byte.
pub fn check_bip66(signature: &[u8], height: u64, params: &ConsensusParams) -> bool {
    if height < params.bip66_height {
        return true;
    }
    is_valid_signature_encoding(signature)
}

/// BIP66 activation height for a network, without building a full parameter record
pub fn bip66_activation_height(network: Network) -> u64 {
    match network {
        Network::Mainnet => BIP66_ACTIVATION_MAINNET,
        Network::Testnet => BIP66_ACTIVATION_TESTNET,
        Network::Regtest => BIP66_ACTIVATION_REGTEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 30 45 02 21 00 <R> 02 20 <S> 01
    fn canonical_72() -> Vec<u8> {
        let mut sig = vec![0x30, 0x45, 0x02, 0x21, 0x00];
        sig.extend_from_slice(&[0x81; 32]);
        sig.extend_from_slice(&[0x02, 0x20]);
        sig.extend_from_slice(&[0x11; 32]);
        sig.push(0x01);
        sig
    }

    /// 30 06 02 01 01 02 01 01 01
    fn minimal_9() -> Vec<u8> {
        vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01, 0x01]
    }

    #[test]
    fn test_minimal_signature_accepted() {
        assert_eq!(check_der_encoding(&minimal_9()), Ok(()));
    }

    #[test]
    fn test_canonical_72_accepted() {
        let sig = canonical_72();
        assert_eq!(sig.len(), 72);
        assert!(is_valid_signature_encoding(&sig));
        assert_eq!(
            check_der_encoding(&sig[..71]),
            Err(DerViolation::SequenceLength)
        );
    }

    #[test]
    fn test_empty_and_short_rejected() {
        assert_eq!(check_der_encoding(&[]), Err(DerViolation::Size(0)));
        assert_eq!(check_der_encoding(&[0x30; 8]), Err(DerViolation::Size(8)));
    }

    #[test]
    fn test_too_long_rejected() {
        assert_eq!(check_der_encoding(&[0x30; 74]), Err(DerViolation::Size(74)));
    }

    #[test]
    fn test_wrong_sequence_tag() {
        let mut sig = minimal_9();
        sig[0] = 0x31;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::NotSequence));
    }

    #[test]
    fn test_wrong_sequence_length() {
        let mut sig = minimal_9();
        sig[1] = 0x07;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::SequenceLength));
    }

    #[test]
    fn test_r_length_past_end() {
        let mut sig = minimal_9();
        sig[3] = 0x04; // 5 + 4 == 9
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::RLengthOverflow));
    }

    #[test]
    fn test_lengths_do_not_sum() {
        let mut sig = minimal_9();
        sig[6] = 0x02;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::LengthMismatch));
    }

    #[test]
    fn test_r_not_integer() {
        let mut sig = minimal_9();
        sig[2] = 0x03;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::RNotInteger));
    }

    #[test]
    fn test_negative_r() {
        let mut sig = minimal_9();
        sig[4] = 0x80;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::RNegative));
    }

    #[test]
    fn test_single_zero_byte_integers_allowed() {
        let sig = [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x01];
        assert!(is_valid_signature_encoding(&sig));
    }

    #[test]
    fn test_s_not_integer() {
        let mut sig = minimal_9();
        sig[5] = 0x04;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::SNotInteger));
    }

    #[test]
    fn test_negative_s() {
        let mut sig = minimal_9();
        sig[7] = 0xff;
        assert_eq!(check_der_encoding(&sig), Err(DerViolation::SNegative));
    }

    #[test]
    fn test_bip66_before_activation_always_passes() {
        let params = ConsensusParams::mainnet();
        let garbage = [0xde, 0xad, 0xbe, 0xef];
        assert!(check_bip66(&garbage, params.bip66_height - 1, &params));
        assert!(!check_bip66(&garbage, params.bip66_height, &params));
        assert!(check_bip66(&canonical_72(), params.bip66_height, &params));
    }

    #[test]
    fn test_bip66_activation_heights() {
        assert_eq!(bip66_activation_height(Network::Mainnet), 363_725);
        assert_eq!(
            bip66_activation_height(Network::Regtest),
            ConsensusParams::regtest().bip66_height
        );
    }
}
