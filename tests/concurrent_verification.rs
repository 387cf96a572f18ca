//! Shared curve context under concurrent use
//!
//! The global context is built once and then only read; many threads may sign and
//! verify through it at the same time.

use std::thread;

use blvm_sigval::constants::{SIGHASH_ALL, STANDARD_SIGNATURE_FLAGS};
use blvm_sigval::der::is_valid_signature_encoding;
use blvm_sigval::signature::{parse_der_signature, sign, PrivateKey};
use blvm_sigval::types::SigVersion;
use blvm_sigval::{CurveContext, SignatureChecker};

const THREADS: u8 = 8;
const ROUNDS: u8 = 16;

#[test]
fn test_parallel_sign_and_verify() {
    let ctx = CurveContext::global();

    thread::scope(|scope| {
        for t in 1..=THREADS {
            scope.spawn(move || {
                let key = PrivateKey::from_slice(&[t; 32]).unwrap();
                let pk = key.public_key(ctx);
                for round in 0..ROUNDS {
                    let digest = [round ^ t; 32];
                    let der = sign(ctx, &key, &digest).unwrap();
                    let sig = parse_der_signature(&der).unwrap();
                    assert!(sig.verify(ctx, &digest, &pk));
                    assert!(!sig.verify(ctx, &[!(round ^ t); 32], &pk));
                }
            });
        }
    });
}

#[test]
fn test_parallel_checkers_share_context() {
    let key = PrivateKey::from_slice(&[0x42; 32]).unwrap();
    let ctx = CurveContext::global();
    let pubkey = key.public_key(ctx).serialize();
    let digest = [0x17; 32];
    let mut script_sig = sign(ctx, &key, &digest).unwrap();
    script_sig.push(SIGHASH_ALL);

    let results: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let script_sig = &script_sig;
                scope.spawn(move || {
                    let checker = SignatureChecker::new(CurveContext::global());
                    is_valid_signature_encoding(script_sig)
                        && checker
                            .check_sig(
                                script_sig,
                                &pubkey,
                                &digest,
                                STANDARD_SIGNATURE_FLAGS,
                                SigVersion::Base,
                            )
                            .unwrap_or(false)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.len(), THREADS as usize);
    assert!(results.into_iter().all(|ok| ok));
}
