//! Curve engine context
//!
//! The secp256k1 context holds precomputed tables for signing and verification.
//! Building one is expensive, so it is created once and shared. It is immutable
//! after construction and `Send + Sync`; every operation only borrows it.
//!
//! Callers pass a [`CurveContext`] explicitly. [`CurveContext::global`] gives the
//! process-wide instance for callers that do not manage their own.

use std::fmt;
use std::sync::OnceLock;

use secp256k1::{All, Secp256k1};

pub struct CurveContext {
    secp: Secp256k1<All>,
}

static GLOBAL_CURVE_CONTEXT: OnceLock<CurveContext> = OnceLock::new();

impl CurveContext {
    /// Build a fresh signing + verification context
    pub fn new() -> Self {
        tracing::debug!("initializing secp256k1 context");
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Process-wide shared context, built on first use
    pub fn global() -> &'static CurveContext {
        GLOBAL_CURVE_CONTEXT.get_or_init(CurveContext::new)
    }

    #[inline]
    pub(crate) fn secp(&self) -> &Secp256k1<All> {
        &self.secp
    }
}

impl Default for CurveContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CurveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveContext").finish_non_exhaustive()
    }
}
