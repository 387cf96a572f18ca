//! # blvm-sigval
//!
//! Consensus-critical secp256k1 signature validation for a Bitcoin-family node.
//!
//! The crate provides:
//! - [`der`]: the strict DER encoding check (BIP66), a pure function over raw bytes
//! - [`signature`]: an immutable signature value object plus key wrappers over the
//!   secp256k1 engine (parse, serialize, sign, verify)
//! - [`script_error`]: the numerically-coded script error taxonomy and its renderer
//! - [`policy`] and [`checker`]: flag-driven encoding checks and the full CHECKSIG
//!   pipeline for a script evaluator
//!
//! ## Failure classes
//!
//! Malformed input is a typed error ([`error::SignatureError`] or a
//! [`script_error::ScriptError`] code). A well-formed signature that does not match
//! its digest and key is a plain `false`. Nothing here panics on untrusted input.
//!
//! ## Curve context
//!
//! All curve operations take an explicit [`context::CurveContext`]. It is immutable
//! after construction and safe to share across threads; [`context::CurveContext::global`]
//! returns a process-wide instance.
//!
//! ## Usage
//!
//! ```rust
//! use blvm_sigval::context::CurveContext;
//! use blvm_sigval::der::is_valid_signature_encoding;
//! use blvm_sigval::signature::{parse_der_signature, sign, PrivateKey};
//!
//! let ctx = CurveContext::global();
//! let key = PrivateKey::from_slice(&[0x01; 32]).unwrap();
//! let digest = [0x42u8; 32];
//!
//! let der = sign(ctx, &key, &digest).unwrap();
//! let mut script_sig = der.clone();
//! script_sig.push(0x01); // SIGHASH_ALL
//! assert!(is_valid_signature_encoding(&script_sig));
//!
//! let signature = parse_der_signature(&der).unwrap();
//! assert!(signature.verify(ctx, &digest, &key.public_key(ctx)));
//! ```

pub mod checker;
pub mod config;
pub mod constants;
pub mod context;
pub mod der;
#[cfg(feature = "k256")]
pub mod engine_k256;
pub mod error;
pub mod params;
pub mod policy;
pub mod script_error;
pub mod signature;
pub mod stack;
pub mod types;

pub use checker::SignatureChecker;
pub use context::CurveContext;
pub use der::is_valid_signature_encoding;
pub use error::{Result, SignatureError};
pub use script_error::{script_err, script_error_string, ErrDesc, ScriptError};
pub use signature::{PrivateKey, PublicKey, Signature};
