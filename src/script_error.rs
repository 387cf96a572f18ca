//! Script error taxonomy
//!
//! Every script and signature failure has a stable numeric code that is independent
//! of its text, so failures can be compared and logged without string matching.
//! Codes are part of the external vocabulary: never renumber a variant.

use std::fmt;

use thiserror::Error;

/// Fallback text for the unknown sentinel, the count sentinel and unrecognized codes
pub const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum ScriptError {
    Ok = 0,
    UnknownError = 1,
    EvalFalse = 2,
    OpReturn = 3,

    // Max sizes
    ScriptSize = 4,
    PushSize = 5,
    OpCount = 6,
    StackSize = 7,
    SigCount = 8,
    PubKeyCount = 9,

    // Failed verify operations
    Verify = 10,
    EqualVerify = 11,
    CheckMultiSigVerify = 12,
    CheckSigVerify = 13,
    NumEqualVerify = 14,

    // Logical/Format/Canonical errors
    BadOpCode = 15,
    DisabledOpCode = 16,
    InvalidStackOperation = 17,
    InvalidAltStackOperation = 18,
    UnbalancedConditional = 19,

    // CHECKLOCKTIMEVERIFY and CHECKSEQUENCEVERIFY
    NegativeLockTime = 20,
    UnsatisfiedLockTime = 21,

    // Malleability
    SigHashType = 22,
    SigDer = 23,
    MinimalData = 24,
    SigPushOnly = 25,
    SigHighS = 26,
    SigNullDummy = 27,
    PubKeyType = 28,
    CleanStack = 29,
    MinimalIf = 30,
    SigNullFail = 31,

    // Soft-fork safeness
    DiscourageUpgradableNops = 32,
    DiscourageUpgradableWitnessProgram = 33,

    // Segregated witness
    WitnessProgramWrongLength = 34,
    WitnessProgramWitnessEmpty = 35,
    WitnessProgramMismatch = 36,
    WitnessMalleated = 37,
    WitnessMalleatedP2sh = 38,
    WitnessUnexpected = 39,
    WitnessPubKeyType = 40,

    /// Count sentinel, not a failure reason
    ErrorCount = 41,

    // Misc
    NonCompressedPubKey = 42,
}

impl ScriptError {
    /// Every variant, in code order
    pub const ALL: [ScriptError; 43] = [
        ScriptError::Ok,
        ScriptError::UnknownError,
        ScriptError::EvalFalse,
        ScriptError::OpReturn,
        ScriptError::ScriptSize,
        ScriptError::PushSize,
        ScriptError::OpCount,
        ScriptError::StackSize,
        ScriptError::SigCount,
        ScriptError::PubKeyCount,
        ScriptError::Verify,
        ScriptError::EqualVerify,
        ScriptError::CheckMultiSigVerify,
        ScriptError::CheckSigVerify,
        ScriptError::NumEqualVerify,
        ScriptError::BadOpCode,
        ScriptError::DisabledOpCode,
        ScriptError::InvalidStackOperation,
        ScriptError::InvalidAltStackOperation,
        ScriptError::UnbalancedConditional,
        ScriptError::NegativeLockTime,
        ScriptError::UnsatisfiedLockTime,
        ScriptError::SigHashType,
        ScriptError::SigDer,
        ScriptError::MinimalData,
        ScriptError::SigPushOnly,
        ScriptError::SigHighS,
        ScriptError::SigNullDummy,
        ScriptError::PubKeyType,
        ScriptError::CleanStack,
        ScriptError::MinimalIf,
        ScriptError::SigNullFail,
        ScriptError::DiscourageUpgradableNops,
        ScriptError::DiscourageUpgradableWitnessProgram,
        ScriptError::WitnessProgramWrongLength,
        ScriptError::WitnessProgramWitnessEmpty,
        ScriptError::WitnessProgramMismatch,
        ScriptError::WitnessMalleated,
        ScriptError::WitnessMalleatedP2sh,
        ScriptError::WitnessUnexpected,
        ScriptError::WitnessPubKeyType,
        ScriptError::ErrorCount,
        ScriptError::NonCompressedPubKey,
    ];

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a variant by its numeric code
    pub fn from_code(code: i32) -> Option<ScriptError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Whether this is a sentinel rather than a concrete failure reason
    pub fn is_sentinel(self) -> bool {
        matches!(self, ScriptError::UnknownError | ScriptError::ErrorCount)
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(script_error_string(*self))
    }
}

/// Human-readable description of a script error. Total over all variants.
pub fn script_error_string(error: ScriptError) -> &'static str {
    use ScriptError::*;
    match error {
        Ok => "No error",
        EvalFalse => {
            "Script evaluated without error but finished with a false/empty top stack element"
        }
        Verify => "Script failed an OP_VERIFY operation",
        EqualVerify => "Script failed an OP_EQUALVERIFY operation",
        CheckMultiSigVerify => "Script failed an OP_CHECKMULTISIGVERIFY operation",
        CheckSigVerify => "Script failed an OP_CHECKSIGVERIFY operation",
        NumEqualVerify => "Script failed an OP_NUMEQUALVERIFY operation",
        ScriptSize => "Script is too big",
        PushSize => "Push value size limit exceeded",
        OpCount => "Operation limit exceeded",
        StackSize => "Stack size limit exceeded",
        SigCount => "Signature count negative or greater than pubKey count",
        PubKeyCount => "PubKey count negative or limit exceeded",
        BadOpCode => "OpCode missing or not understood",
        DisabledOpCode => "Attempted to use a disabled opCode",
        InvalidStackOperation => "Operation not valid with the current stack size",
        InvalidAltStackOperation => "Operation not valid with the current altStack size",
        OpReturn => "OP_RETURN was encountered",
        UnbalancedConditional => "Invalid OP_IF construction",
        NegativeLockTime => "Negative lockTime",
        UnsatisfiedLockTime => "LockTime requirement not satisfied",
        SigHashType => "Signature hash type missing or not understood",
        SigDer => "Non-canonical DER signature",
        MinimalData => "Data push larger than necessary",
        SigPushOnly => "Only non-push operators allowed in signatures",
        SigHighS => "Non-canonical signature: S value is unnecessarily high",
        SigNullDummy => "Dummy CheckMultiSig argument must be zero",
        PubKeyType => "Public key is neither compressed or uncompressed",
        CleanStack => "Extra items left on stack after execution",
        MinimalIf => "OP_IF/NOTIF argument must be minimal",
        SigNullFail => "Signature must be zero for failed CHECK(MULTI)SIG operation",
        DiscourageUpgradableNops => "NOPx reserved for soft-fork upgrades",
        DiscourageUpgradableWitnessProgram => "Witness version reserved for soft-fork upgrades",
        WitnessProgramWrongLength => "Witness program has incorrect length",
        WitnessProgramWitnessEmpty => "Witness program was passed an empty witness",
        WitnessProgramMismatch => "Witness program hash mismatch",
        WitnessMalleated => "Witness requires empty scriptSig",
        WitnessMalleatedP2sh => "Witness requires only-redeemScript scriptSig",
        WitnessUnexpected => "Witness provided for non-witness script",
        WitnessPubKeyType => "Using non-compressed keys in segWit",
        NonCompressedPubKey => "Using non-compressed public key",
        UnknownError | ErrorCount => UNKNOWN_ERROR,
    }
}

/// Description for a raw numeric code; unrecognized codes render as "unknown error"
pub fn script_error_string_for_code(code: i32) -> &'static str {
    ScriptError::from_code(code)
        .map(script_error_string)
        .unwrap_or(UNKNOWN_ERROR)
}

/// A script error code bound to its rendered description
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("script error :{desc} code:{}", .code.code())]
pub struct ErrDesc {
    pub code: ScriptError,
    pub desc: &'static str,
}

impl ErrDesc {
    pub fn new(code: ScriptError) -> Self {
        Self {
            code,
            desc: script_error_string(code),
        }
    }
}

impl From<ScriptError> for ErrDesc {
    fn from(code: ScriptError) -> Self {
        ErrDesc::new(code)
    }
}

/// Build the error carrier for a failed script check
#[inline]
pub fn script_err(code: ScriptError) -> ErrDesc {
    ErrDesc::new(code)
}
