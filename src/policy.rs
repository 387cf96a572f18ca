//! Flag-driven signature and public key encoding checks
//!
//! These run before any curve arithmetic and report failures as [`ScriptError`]
//! codes, the vocabulary the script evaluator uses. Which rules apply is selected by
//! the `SCRIPT_VERIFY_*` bits in [`crate::constants`].

use crate::constants::{
    COMPRESSED_PUBKEY_SIZE, SCRIPT_VERIFY_DERSIG, SCRIPT_VERIFY_LOW_S, SCRIPT_VERIFY_STRICTENC,
    SCRIPT_VERIFY_WITNESS_PUBKEYTYPE, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_FORKID,
    SIGHASH_SINGLE, UNCOMPRESSED_PUBKEY_SIZE,
};
use crate::der::is_valid_signature_encoding;
use crate::script_error::ScriptError;
use crate::signature::Signature;
use crate::types::SigVersion;

/// Strict DER encoding plus S in the lower half of the group order.
///
/// `sig` includes the trailing sighash byte.
pub fn is_low_der_signature(sig: &[u8]) -> Result<(), ScriptError> {
    if !is_valid_signature_encoding(sig) {
        return Err(ScriptError::SigDer);
    }
    // Non-empty: the encoding check guarantees at least 9 bytes.
    let der = &sig[..sig.len() - 1];
    match Signature::from_der_lax(der) {
        Ok(parsed) if parsed.is_low_s() => Ok(()),
        _ => Err(ScriptError::SigHighS),
    }
}

/// Whether the trailing sighash byte names a defined hash type.
///
/// ANYONECANPAY and FORKID are modifiers; the base type must be ALL, NONE or SINGLE.
pub fn is_defined_hashtype_signature(sig: &[u8]) -> bool {
    let Some(&hash_type) = sig.last() else {
        return false;
    };
    let base = hash_type & !(SIGHASH_ANYONECANPAY | SIGHASH_FORKID);
    (SIGHASH_ALL..=SIGHASH_SINGLE).contains(&base)
}

/// Check a script signature's encoding under `flags`.
///
/// An empty signature always passes: it is the canonical way to make CHECKSIG fail
/// without an encoding error.
pub fn check_signature_encoding(sig: &[u8], flags: u32) -> Result<(), ScriptError> {
    if sig.is_empty() {
        return Ok(());
    }
    if flags & (SCRIPT_VERIFY_DERSIG | SCRIPT_VERIFY_LOW_S | SCRIPT_VERIFY_STRICTENC) != 0
        && !is_valid_signature_encoding(sig)
    {
        return Err(ScriptError::SigDer);
    }
    if flags & SCRIPT_VERIFY_LOW_S != 0 {
        is_low_der_signature(sig)?;
    }
    if flags & SCRIPT_VERIFY_STRICTENC != 0 && !is_defined_hashtype_signature(sig) {
        return Err(ScriptError::SigHashType);
    }
    Ok(())
}

/// SEC1 compressed (0x02/0x03, 33 bytes) or uncompressed (0x04, 65 bytes) layout
pub fn is_compressed_or_uncompressed_pubkey(pubkey: &[u8]) -> bool {
    match pubkey.first() {
        Some(0x04) => pubkey.len() == UNCOMPRESSED_PUBKEY_SIZE,
        Some(0x02) | Some(0x03) => pubkey.len() == COMPRESSED_PUBKEY_SIZE,
        _ => false,
    }
}

pub fn is_compressed_pubkey(pubkey: &[u8]) -> bool {
    pubkey.len() == COMPRESSED_PUBKEY_SIZE && matches!(pubkey[0], 0x02 | 0x03)
}

/// Check a public key's encoding under `flags`
pub fn check_pubkey_encoding(
    pubkey: &[u8],
    flags: u32,
    sigversion: SigVersion,
) -> Result<(), ScriptError> {
    if flags & SCRIPT_VERIFY_STRICTENC != 0 && !is_compressed_or_uncompressed_pubkey(pubkey) {
        return Err(ScriptError::PubKeyType);
    }
    if flags & SCRIPT_VERIFY_WITNESS_PUBKEYTYPE != 0
        && sigversion == SigVersion::WitnessV0
        && !is_compressed_pubkey(pubkey)
    {
        return Err(ScriptError::WitnessPubKeyType);
    }
    Ok(())
}
