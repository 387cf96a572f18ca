#![no_main]
use blvm_sigval::constants::{MAX_SIG_ENCODING_SIZE, MIN_SIG_ENCODING_SIZE};
use blvm_sigval::der::{check_der_encoding, is_valid_signature_encoding};
use blvm_sigval::policy::{check_signature_encoding, is_defined_hashtype_signature};
use blvm_sigval::signature::{parse_der_signature, parse_signature, Signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Strict DER check over arbitrary bytes: must never panic and must agree
    // with its boolean wrapper
    let verdict = check_der_encoding(data);
    assert_eq!(verdict.is_ok(), is_valid_signature_encoding(data));

    if verdict.is_ok() {
        assert!(data.len() >= MIN_SIG_ENCODING_SIZE && data.len() <= MAX_SIG_ENCODING_SIZE);
        assert_eq!(data[0], 0x30);
        assert_eq!(data[1] as usize, data.len() - 3);
    }

    // Flag-driven policy checks on the same bytes
    for flags in [0u32, 1 << 1, 1 << 2, 1 << 3, (1 << 1) | (1 << 2) | (1 << 3)] {
        let _ = check_signature_encoding(data, flags);
    }
    let _ = is_defined_hashtype_signature(data);

    // Engine parsers on the bare signature and on the raw bytes
    if let Some((_, der)) = data.split_last() {
        if let Ok(sig) = parse_der_signature(der) {
            // Strict engine parse round-trips through its own encoder
            assert_eq!(parse_der_signature(&sig.serialize()), Ok(sig));
        }
        let _ = Signature::from_der_lax(der);
    }
    let _ = parse_signature(data);
});
