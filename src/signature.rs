//! ECDSA signature value object over secp256k1
//!
//! Thin wrappers around the curve engine's signature and key types. The rest of the
//! crate (and its callers) only ever name [`Signature`], [`PublicKey`] and
//! [`PrivateKey`]; the engine types stay behind this module.
//!
//! Parsing here uses the engine's own DER grammar, which is more permissive than the
//! consensus check in [`crate::der`]. Run that check first when validating script
//! signatures.

use std::fmt;

use secp256k1::ecdsa;
use secp256k1::{Message, SecretKey};

use crate::constants::{COMPACT_SIGNATURE_SIZE, DIGEST_SIZE};
use crate::context::CurveContext;
use crate::der::{check_der_encoding, DerViolation};
use crate::error::{Result, SignatureError};

/// An immutable ECDSA (R, S) pair
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(ecdsa::Signature);

impl Signature {
    /// Parse a bare DER signature (no sighash byte)
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        ecdsa::Signature::from_der(bytes)
            .map(Signature)
            .map_err(|e| SignatureError::Parse(format!("DER: {e}").into()))
    }

    /// Parse a DER signature with the engine's lax rules (historical, pre-BIP66 encodings)
    pub fn from_der_lax(bytes: &[u8]) -> Result<Self> {
        ecdsa::Signature::from_der_lax(bytes)
            .map(Signature)
            .map_err(|e| SignatureError::Parse(format!("lax DER: {e}").into()))
    }

    /// Parse a 64-byte compact R‖S signature
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIGNATURE_SIZE {
            return Err(SignatureError::Parse(
                format!(
                    "compact signature must be {COMPACT_SIGNATURE_SIZE} bytes, got {}",
                    bytes.len()
                )
                .into(),
            ));
        }
        ecdsa::Signature::from_compact(bytes)
            .map(Signature)
            .map_err(|e| SignatureError::Parse(format!("compact: {e}").into()))
    }

    /// Canonical DER encoding
    pub fn serialize(&self) -> Vec<u8> {
        self.0.serialize_der().to_vec()
    }

    /// Compact R‖S encoding
    pub fn serialize_compact(&self) -> [u8; COMPACT_SIGNATURE_SIZE] {
        self.0.serialize_compact()
    }

    /// Check the signature against `digest` and `public_key`.
    ///
    /// A mismatch, or a digest that is not 32 bytes, is `false`. High-S signatures
    /// are normalized first: low-S is a policy rule checked separately, not part of
    /// the curve equation.
    pub fn verify(&self, ctx: &CurveContext, digest: &[u8], public_key: &PublicKey) -> bool {
        let message = match Message::from_digest_slice(digest) {
            Ok(msg) => msg,
            Err(_) => {
                tracing::trace!(len = digest.len(), "digest is not 32 bytes");
                return false;
            }
        };
        let mut normalized = self.0;
        normalized.normalize_s();
        ctx.secp()
            .verify_ecdsa(&message, &normalized, &public_key.0)
            .is_ok()
    }

    /// Copy with S moved to the lower half of the group order
    pub fn normalize_s(&self) -> Self {
        let mut normalized = self.0;
        normalized.normalize_s();
        Signature(normalized)
    }

    /// Whether S is at most half the group order
    pub fn is_low_s(&self) -> bool {
        self.normalize_s() == *self
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.serialize()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.serialize()))
    }
}

/// A secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Parse a SEC1 compressed (33 bytes) or uncompressed (65 bytes) key
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(PublicKey)
            .map_err(|e| SignatureError::InvalidPublicKey(e.to_string().into()))
    }

    pub fn serialize(&self) -> [u8; 33] {
        self.0.serialize()
    }

    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }
}

/// A secp256k1 private scalar
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Parse a 32-byte scalar in [1, n)
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SecretKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|e| SignatureError::InvalidPrivateKey(e.to_string().into()))
    }

    pub fn public_key(&self, ctx: &CurveContext) -> PublicKey {
        PublicKey(secp256k1::PublicKey::from_secret_key(ctx.secp(), &self.0))
    }

    pub fn secret_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Parse a bare DER signature using the engine's grammar
pub fn parse_der_signature(bytes: &[u8]) -> Result<Signature> {
    Signature::from_der(bytes)
}

/// Parse a script signature (`DER ‖ sighash`) under the strict DER rules.
///
/// Returns the signature and its sighash byte.
pub fn parse_script_signature(sig: &[u8]) -> Result<(Signature, u8)> {
    check_der_encoding(sig)?;
    let Some((&hash_type, der)) = sig.split_last() else {
        return Err(DerViolation::Size(0).into());
    };
    Ok((Signature::from_der(der)?, hash_type))
}

/// Parse a 64-byte compact signature
pub fn parse_signature(bytes: &[u8]) -> Result<Signature> {
    Signature::from_compact(bytes)
}

/// Sign `digest` and return the DER-encoded signature (RFC 6979 nonce, low S)
pub fn sign(ctx: &CurveContext, private_key: &PrivateKey, digest: &[u8]) -> Result<Vec<u8>> {
    let message = Message::from_digest_slice(digest).map_err(|_| {
        SignatureError::Signing(
            format!("digest must be {DIGEST_SIZE} bytes, got {}", digest.len()).into(),
        )
    })?;
    let signature = ctx.secp().sign_ecdsa(&message, &private_key.0);
    Ok(Signature(signature).serialize())
}

/// Sign with a raw scalar; fails if the scalar is zero or not below the group order
pub fn sign_with_secret_bytes(ctx: &CurveContext, secret: &[u8], digest: &[u8]) -> Result<Vec<u8>> {
    let private_key = SecretKey::from_slice(secret)
        .map(PrivateKey)
        .map_err(|e| SignatureError::Signing(format!("private scalar rejected: {e}").into()))?;
    sign(ctx, &private_key, digest)
}

/// Check `signature` against `digest` and `public_key`
#[inline]
pub fn verify(
    ctx: &CurveContext,
    signature: &Signature,
    digest: &[u8],
    public_key: &PublicKey,
) -> bool {
    signature.verify(ctx, digest, public_key)
}
