//! Error types for signature validation
//!
//! Three failure classes are kept apart:
//! - malformed bytes and engine rejections ([`SignatureError`])
//! - cryptographic mismatch (a plain `false` from `verify`, not an error)
//! - script-level failures ([`crate::script_error::ScriptError`] / [`crate::script_error::ErrDesc`])

use std::borrow::Cow;
use thiserror::Error;

use crate::der::DerViolation;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SignatureError {
    #[error("Signature parse failed: {0}")]
    Parse(Cow<'static, str>),

    #[error("Signing failed: {0}")]
    Signing(Cow<'static, str>),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(Cow<'static, str>),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(Cow<'static, str>),

    #[error("Non-canonical DER signature: {0}")]
    NonCanonicalEncoding(DerViolation),

    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),
}

pub type Result<T> = std::result::Result<T, SignatureError>;

/// Failures of the script interpreter's value stack
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("stack is empty")]
    Empty,

    #[error("the index exceeds the boundary: {0}")]
    IndexOutOfBounds(isize),
}

impl From<DerViolation> for SignatureError {
    fn from(violation: DerViolation) -> Self {
        SignatureError::NonCanonicalEncoding(violation)
    }
}
