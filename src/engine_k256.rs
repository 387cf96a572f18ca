//! Pure-Rust secondary curve engine (k256)
//!
//! Verifies the same inputs as [`crate::signature::Signature::verify`] through an
//! independent secp256k1 implementation. Used for differential testing of the
//! primary engine; consensus decisions use the primary engine only.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};

use crate::constants::DIGEST_SIZE;

/// Verify a bare DER signature against a 32-byte digest and a SEC1 public key.
///
/// Malformed keys, signatures or digests are `false`. High-S signatures are
/// normalized first, matching the primary engine.
pub fn verify_der(signature_der: &[u8], digest: &[u8], pubkey_sec1: &[u8]) -> bool {
    if digest.len() != DIGEST_SIZE {
        return false;
    }
    let verifying_key = match VerifyingKey::from_sec1_bytes(pubkey_sec1) {
        Ok(vk) => vk,
        Err(_) => return false,
    };
    let signature = match Signature::from_der(signature_der) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    let signature = signature.normalize_s().unwrap_or(signature);
    verifying_key.verify_prehash(digest, &signature).is_ok()
}
