// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::bench::MESSAGE;
use crate::error::BenchError;
use crate::hash::{HashFunction, Sha256};
use crate::secp256r1::{
    Secp256r1KeyPair, Secp256r1PublicKey, Secp256r1Signature, DIGEST_SIZE, PUBLIC_KEY_SIZE,
    SIGNATURE_SIZE,
};
use crate::traits::{KeyPair, ToFromBytes, VerifyingKey};
use crate::unsecure::rng::ConstantRng;
use rand::{rngs::StdRng, SeedableRng as _};

pub fn keys() -> Vec<Secp256r1KeyPair> {
    let mut rng = StdRng::from_seed([0; 32]);
    (0..4)
        .map(|_| Secp256r1KeyPair::generate(&mut rng).unwrap())
        .collect()
}

#[test]
fn test_payload_is_sha256_digest() {
    let payload = Secp256r1KeyPair::payload(MESSAGE);
    assert_eq!(payload.len(), DIGEST_SIZE);
    assert_eq!(payload, Sha256::digest(MESSAGE).to_vec());
}

#[test]
fn test_sign_and_verify_digest() {
    let kp = keys().pop().unwrap();
    let digest = Secp256r1KeyPair::payload(MESSAGE);
    let signature = kp.try_sign(&digest).unwrap();
    assert!(kp.public().verify(&digest, &signature).is_ok());
}

#[test]
fn test_signing_is_deterministic() {
    let kp = keys().pop().unwrap();
    let digest = Secp256r1KeyPair::payload(MESSAGE);
    assert_eq!(kp.try_sign(&digest).unwrap(), kp.try_sign(&digest).unwrap());
}

#[test]
fn test_tampered_digest_fails() {
    let kp = keys().pop().unwrap();
    let mut digest = Secp256r1KeyPair::payload(MESSAGE);
    let signature = kp.try_sign(&digest).unwrap();
    digest[0] ^= 1;
    assert_eq!(
        kp.public().verify(&digest, &signature),
        Err(BenchError::InvalidSignature)
    );
}

#[test]
fn test_wrong_key_fails() {
    let mut keys = keys();
    let kp1 = keys.pop().unwrap();
    let kp2 = keys.pop().unwrap();
    let digest = Secp256r1KeyPair::payload(MESSAGE);
    let signature = kp1.try_sign(&digest).unwrap();
    assert!(kp2.public().verify(&digest, &signature).is_err());
}

#[test]
fn test_raw_message_is_rejected() {
    let kp = keys().pop().unwrap();
    assert_eq!(
        kp.try_sign(MESSAGE),
        Err(BenchError::InputLengthWrong(DIGEST_SIZE))
    );
}

#[test]
fn test_zero_entropy_keygen_fails() {
    // Zero is not a valid scalar, so every candidate is rejected.
    let result = Secp256r1KeyPair::generate(&mut ConstantRng::zero());
    assert!(matches!(result, Err(BenchError::KeyGeneration(_))));

    // 0xff..ff is above the group order.
    let result = Secp256r1KeyPair::generate(&mut ConstantRng::new(0xff));
    assert!(matches!(result, Err(BenchError::KeyGeneration(_))));
}

#[test]
fn test_constant_nonzero_entropy_keygen() {
    let kp1 = Secp256r1KeyPair::generate(&mut ConstantRng::new(1)).unwrap();
    let kp2 = Secp256r1KeyPair::generate(&mut ConstantRng::new(1)).unwrap();
    assert_eq!(kp1.public(), kp2.public());
}

#[test]
fn test_bytes_roundtrip() {
    let kp = keys().pop().unwrap();
    let digest = Secp256r1KeyPair::payload(MESSAGE);
    let signature = kp.try_sign(&digest).unwrap();
    assert_eq!(kp.public().as_bytes().len(), PUBLIC_KEY_SIZE);
    assert_eq!(signature.as_bytes().len(), SIGNATURE_SIZE);

    let pk = Secp256r1PublicKey::from_bytes(kp.public().as_bytes()).unwrap();
    let sig = Secp256r1Signature::from_bytes(signature.as_bytes()).unwrap();
    assert_eq!(&pk, kp.public());
    assert!(pk.verify(&digest, &sig).is_ok());

    assert!(Secp256r1Signature::from_bytes(&[0u8; 10]).is_err());
    assert!(Secp256r1PublicKey::from_bytes(&[0u8; 10]).is_err());
}
