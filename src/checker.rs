//! Signature checking as seen by the script evaluator
//!
//! Runs the full pipeline for one CHECKSIG: encoding rules selected by flags, then
//! engine parsing, then curve verification. Encoding failures come back as
//! [`ErrDesc`]; a well-formed signature that does not match is `Ok(false)`.

use crate::config::{DebugConfig, SigValConfig};
use crate::constants::{MANDATORY_SIGNATURE_FLAGS, SCRIPT_VERIFY_NONE, SCRIPT_VERIFY_NULLFAIL};
use crate::context::CurveContext;
use crate::params::ConsensusParams;
use crate::policy::{check_pubkey_encoding, check_signature_encoding};
use crate::script_error::{script_err, ErrDesc, ScriptError};
use crate::signature::{PublicKey, Signature};
use crate::types::{Natural, SigVersion};

/// Consensus flags for signatures in a block at `height`
pub fn consensus_signature_flags(params: &ConsensusParams, height: Natural) -> u32 {
    if params.is_bip66_active(height) {
        MANDATORY_SIGNATURE_FLAGS
    } else {
        SCRIPT_VERIFY_NONE
    }
}

#[derive(Debug, Clone)]
pub struct SignatureChecker<'a> {
    ctx: &'a CurveContext,
    debug: DebugConfig,
}

impl<'a> SignatureChecker<'a> {
    pub fn new(ctx: &'a CurveContext) -> Self {
        Self {
            ctx,
            debug: DebugConfig::default(),
        }
    }

    pub fn with_config(ctx: &'a CurveContext, config: &SigValConfig) -> Self {
        Self {
            ctx,
            debug: config.debug.clone(),
        }
    }

    pub fn context(&self) -> &'a CurveContext {
        self.ctx
    }

    /// Check `sig` (DER signature plus sighash byte) against `pubkey` and `digest`.
    ///
    /// Returns `Ok(true)` on a valid signature, `Ok(false)` on an empty or
    /// non-matching one, and `Err` when an encoding rule enabled by `flags` fails or
    /// NULLFAIL forbids a failing non-empty signature.
    pub fn check_sig(
        &self,
        sig: &[u8],
        pubkey: &[u8],
        digest: &[u8],
        flags: u32,
        sigversion: SigVersion,
    ) -> Result<bool, ErrDesc> {
        if let Err(code) = check_signature_encoding(sig, flags)
            .and_then(|_| check_pubkey_encoding(pubkey, flags, sigversion))
        {
            return Err(self.reject(code));
        }

        let success = self.verify_raw(sig, pubkey, digest);

        if !success && flags & SCRIPT_VERIFY_NULLFAIL != 0 && !sig.is_empty() {
            return Err(self.reject(ScriptError::SigNullFail));
        }
        Ok(success)
    }

    /// Like [`Self::check_sig`], with a failed check turned into CHECKSIGVERIFY's error
    pub fn check_sig_verify(
        &self,
        sig: &[u8],
        pubkey: &[u8],
        digest: &[u8],
        flags: u32,
        sigversion: SigVersion,
    ) -> Result<(), ErrDesc> {
        if self.check_sig(sig, pubkey, digest, flags, sigversion)? {
            Ok(())
        } else {
            Err(self.reject(ScriptError::CheckSigVerify))
        }
    }

    /// Parse and verify without any encoding policy. Anything unparsable is `false`.
    fn verify_raw(&self, sig: &[u8], pubkey: &[u8], digest: &[u8]) -> bool {
        let Some((_, der)) = sig.split_last() else {
            return false;
        };
        let Ok(public_key) = PublicKey::from_slice(pubkey) else {
            self.mismatch("public key does not parse");
            return false;
        };
        let Ok(signature) = Signature::from_der_lax(der) else {
            self.mismatch("signature does not parse");
            return false;
        };
        let matched = signature.verify(self.ctx, digest, &public_key);
        if !matched {
            self.mismatch("curve verification failed");
        }
        matched
    }

    fn reject(&self, code: ScriptError) -> ErrDesc {
        let err = script_err(code);
        if self.debug.log_rejections {
            tracing::debug!(code = code.code(), reason = err.desc, "signature rejected");
        }
        err
    }

    fn mismatch(&self, reason: &'static str) {
        if self.debug.log_mismatches {
            tracing::trace!(reason, "signature did not verify");
        }
    }
}
