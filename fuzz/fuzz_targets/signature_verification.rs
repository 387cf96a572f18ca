#![no_main]
use blvm_sigval::types::SigVersion;
use blvm_sigval::{CurveContext, SignatureChecker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Layout: flags (4) | format (1) | pubkey (33 or 65) | digest (32) | signature (rest)
    if data.len() < 4 + 1 + 33 + 32 {
        return;
    }

    let flags = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let format = data[4];
    let sigversion = if format & 0x02 != 0 {
        SigVersion::WitnessV0
    } else {
        SigVersion::Base
    };
    let pubkey_len = if format & 0x01 != 0 { 65 } else { 33 };

    let rest = &data[5..];
    if rest.len() < pubkey_len + 32 {
        return;
    }
    let (pubkey, rest) = rest.split_at(pubkey_len);
    let (digest, sig) = rest.split_at(32);

    let checker = SignatureChecker::new(CurveContext::global());
    let first = checker.check_sig(sig, pubkey, digest, flags, sigversion);
    let second = checker.check_sig(sig, pubkey, digest, flags, sigversion);
    // Deterministic
    assert_eq!(first, second);
});
