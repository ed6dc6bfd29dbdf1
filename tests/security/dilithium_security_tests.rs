use dilithium_core::{open_combined, KeyPair, PublicKey, Signature, CRYPTO_BYTES, PKBYTES};
use proptest::prelude::*;
use rand::thread_rng;

#[test]
fn test_keygen_then_sign_verify() {
    let mut rng = thread_rng();
    let keypair = KeyPair::generate(&mut rng);
    let message = b"Test message for lattice signature";

    let signature = keypair.sign(message);
    let verification = keypair.public_key().verify(message, &signature);
    assert!(verification.is_ok());
}

#[test]
fn test_invalid_signature_bytes_are_rejected() {
    let mut rng = thread_rng();
    let keypair = KeyPair::generate(&mut rng);
    let message = b"Test message for lattice signature";

    let garbage = vec![0x42u8; CRYPTO_BYTES];
    let signature = Signature::from_bytes(&garbage).expect("length is well-formed");
    let verification = keypair.public_key().verify(message, &signature);
    assert!(verification.is_err());
}

#[test]
fn test_message_tampering_is_detected() {
    let original = b"Original message";
    let tampered = b"Tampered message";
    let mut rng = thread_rng();
    let keypair = KeyPair::generate(&mut rng);

    let signature = keypair.sign(original);
    let verification = keypair.public_key().verify(tampered, &signature);
    assert!(verification.is_err());
}

#[test]
fn test_wrong_key_rejects_a_valid_signature() {
    let mut rng = thread_rng();
    let keypair_a = KeyPair::generate(&mut rng);
    let keypair_b = KeyPair::generate(&mut rng);
    let message = b"signed by A, checked against B";

    let signature = keypair_a.sign(message);
    assert!(keypair_b.public_key().verify(message, &signature).is_err());
}

#[test]
fn test_every_hint_position_flip_is_detected() {
    let mut rng = thread_rng();
    let keypair = KeyPair::generate(&mut rng);
    let message = b"flip every byte of a valid signature once";
    let signature = keypair.sign(message);

    for i in 0..CRYPTO_BYTES {
        let mut bytes = signature.as_bytes().to_vec();
        bytes[i] ^= 0x01;
        if let Ok(tampered) = Signature::from_bytes(&bytes) {
            assert!(
                keypair.public_key().verify(message, &tampered).is_err(),
                "byte {i} flip should not verify"
            );
        }
    }
}

proptest! {
    #[test]
    fn test_random_public_key_and_signature_bytes_never_panic(
        message in prop::collection::vec(any::<u8>(), 0..256),
        pk_bytes in prop::collection::vec(any::<u8>(), PKBYTES),
        sig_bytes in prop::collection::vec(any::<u8>(), CRYPTO_BYTES),
    ) {
        if let Ok(pk) = PublicKey::from_bytes(&pk_bytes) {
            if let Ok(sig) = Signature::from_bytes(&sig_bytes) {
                let _ = pk.verify(&message, &sig);
            }
        }
    }

    #[test]
    fn test_open_combined_never_panics_on_short_input(
        sm in prop::collection::vec(any::<u8>(), 0..CRYPTO_BYTES),
    ) {
        let mut rng = thread_rng();
        let keypair = KeyPair::generate(&mut rng);
        let _ = open_combined(keypair.public_key(), &sm);
    }
}
