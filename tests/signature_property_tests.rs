//! Property-based tests for signature encoding and verification
//!
//! Uses PropTest to generate random signatures, keys and digests and checks the
//! invariants the consensus rules depend on.

use blvm_sigval::constants::{MAX_SIG_ENCODING_SIZE, MIN_SIG_ENCODING_SIZE, SIGHASH_ALL};
use blvm_sigval::der::{check_der_encoding, is_valid_signature_encoding};
use blvm_sigval::signature::{parse_der_signature, sign, PrivateKey};
use blvm_sigval::CurveContext;
use proptest::prelude::*;

/// Minimal DER INTEGER body for an unsigned big-endian value
fn minimal_integer(value: &[u8]) -> Vec<u8> {
    let trimmed: Vec<u8> = value.iter().copied().skip_while(|&b| b == 0).collect();
    match trimmed.first() {
        None => vec![0x00],
        Some(&first) if first & 0x80 != 0 => {
            let mut padded = vec![0x00];
            padded.extend_from_slice(&trimmed);
            padded
        }
        Some(_) => trimmed,
    }
}

fn encode(r: &[u8], s: &[u8], hash_type: u8) -> Vec<u8> {
    let r = minimal_integer(r);
    let s = minimal_integer(s);
    let mut sig = vec![0x30, (4 + r.len() + s.len()) as u8, 0x02, r.len() as u8];
    sig.extend_from_slice(&r);
    sig.push(0x02);
    sig.push(s.len() as u8);
    sig.extend_from_slice(&s);
    sig.push(hash_type);
    sig
}

proptest! {
    #[test]
    fn check_never_panics(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = check_der_encoding(&data);
    }

    #[test]
    fn out_of_range_lengths_rejected(
        data in prop::collection::vec(any::<u8>(), 0..160)
            .prop_filter("length in range", |d| {
                d.len() < MIN_SIG_ENCODING_SIZE || d.len() > MAX_SIG_ENCODING_SIZE
            })
    ) {
        prop_assert!(!is_valid_signature_encoding(&data));
    }

    #[test]
    fn minimal_encoder_output_accepted(
        r in prop::collection::vec(any::<u8>(), 0..=32),
        s in prop::collection::vec(any::<u8>(), 0..=32),
        hash_type in any::<u8>(),
    ) {
        let sig = encode(&r, &s, hash_type);
        prop_assert!(is_valid_signature_encoding(&sig), "rejected {}", hex::encode(&sig));
    }

    #[test]
    fn strict_prefixes_rejected(
        r in prop::collection::vec(any::<u8>(), 1..=32),
        s in prop::collection::vec(any::<u8>(), 1..=32),
    ) {
        let sig = encode(&r, &s, SIGHASH_ALL);
        for len in 0..sig.len() {
            prop_assert!(!is_valid_signature_encoding(&sig[..len]), "prefix {} accepted", len);
        }
    }

    #[test]
    fn extra_leading_zero_rejected(
        r in prop::collection::vec(any::<u8>(), 1..=31),
        s in prop::collection::vec(any::<u8>(), 1..=32),
    ) {
        let mut padded_r = vec![0x00];
        padded_r.extend_from_slice(&minimal_integer(&r));
        let mut sig = vec![0x30, 0, 0x02, padded_r.len() as u8];
        sig.extend_from_slice(&padded_r);
        let s = minimal_integer(&s);
        sig.push(0x02);
        sig.push(s.len() as u8);
        sig.extend_from_slice(&s);
        sig[1] = (sig.len() - 2) as u8;
        sig.push(SIGHASH_ALL);
        prop_assert!(!is_valid_signature_encoding(&sig));
    }

    #[test]
    fn sign_verify_roundtrip(
        secret in prop::array::uniform32(any::<u8>()),
        digest in prop::array::uniform32(any::<u8>()),
    ) {
        let key = PrivateKey::from_slice(&secret);
        prop_assume!(key.is_ok());
        let key = key.unwrap();
        let ctx = CurveContext::global();

        let der = sign(ctx, &key, &digest).unwrap();
        let mut script_sig = der.clone();
        script_sig.push(SIGHASH_ALL);
        prop_assert!(is_valid_signature_encoding(&script_sig));

        let sig = parse_der_signature(&der).unwrap();
        prop_assert!(sig.is_low_s());
        prop_assert!(sig.verify(ctx, &digest, &key.public_key(ctx)));
    }

    #[test]
    fn digest_bit_flip_fails_verification(
        secret in prop::array::uniform32(any::<u8>()),
        digest in prop::array::uniform32(any::<u8>()),
        bit in 0usize..256,
    ) {
        let key = PrivateKey::from_slice(&secret);
        prop_assume!(key.is_ok());
        let key = key.unwrap();
        let ctx = CurveContext::global();

        let sig = parse_der_signature(&sign(ctx, &key, &digest).unwrap()).unwrap();
        let mut tampered = digest;
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!sig.verify(ctx, &tampered, &key.public_key(ctx)));
    }
}

#[cfg(feature = "k256")]
proptest! {
    #[test]
    fn engines_agree(
        secret in prop::array::uniform32(any::<u8>()),
        digest in prop::array::uniform32(any::<u8>()),
        other in prop::array::uniform32(any::<u8>()),
    ) {
        use blvm_sigval::engine_k256::verify_der;

        let key = PrivateKey::from_slice(&secret);
        prop_assume!(key.is_ok());
        let key = key.unwrap();
        let ctx = CurveContext::global();
        let pk = key.public_key(ctx);

        let der = sign(ctx, &key, &digest).unwrap();
        let sig = parse_der_signature(&der).unwrap();
        for candidate in [digest, other] {
            prop_assert_eq!(
                sig.verify(ctx, &candidate, &pk),
                verify_der(&der, &candidate, &pk.serialize())
            );
        }
    }
}
