use gls254::point::Point;
use gls254::protocol::{ecdh, sign, verify_vartime, PrivateKey, PublicKey};

fn from_hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// Scenario S1: a compressed point whose encoding round-trips and which is
/// not the neutral element.
#[test]
fn test_gls254_kat_s1_decode_reencode_round_trip() {
    let bytes: [u8; 32] = from_hex("cbd10bd0365bcd76de1b2418d01a906c61bb948da5f84f1866f62ab301d9870f")
        .try_into()
        .unwrap();
    let (p, ok) = Point::decode(&bytes);
    assert!(ok.is_true(), "S1 vector must decode successfully");
    assert!(!p.isneutral().is_true(), "S1 point must not be neutral");
    assert_eq!(p.encode(), bytes, "S1 re-encoding must equal the input");
}

/// Scenario S2: the all-zero encoding decodes to the neutral element and
/// re-encodes to itself.
#[test]
fn test_gls254_kat_s2_all_zero_is_neutral() {
    let bytes = [0u8; 32];
    let (p, ok) = Point::decode(&bytes);
    assert!(ok.is_true());
    assert!(p.isneutral().is_true(), "S2 vector must decode to the neutral element");
    assert_eq!(p.encode(), bytes);
}

#[test]
fn test_gls254_sign_and_verify() {
    let sk = PrivateKey::keygen(b"integration test seed, alice");
    let message: &[u8] = b"Hello, world!";

    let mut signature = sign(&sk, None, message, b"");
    assert!(
        verify_vartime(sk.public(), None, message, &signature).is_ok(),
        "signature should be valid"
    );

    let mut bytes = signature.encode();
    bytes[44] ^= 0x10;
    signature = gls254::protocol::Signature::decode(&bytes);
    assert!(
        verify_vartime(sk.public(), None, message, &signature).is_err(),
        "signature modification must be detected"
    );
}

#[test]
fn test_gls254_sign_with_domain_name() {
    let sk = PrivateKey::keygen(b"integration test seed, bob");
    let message: &[u8] = b"transfer 10 coins";

    let sig = sign(&sk, Some("payments/v1"), message, b"");
    assert!(verify_vartime(sk.public(), Some("payments/v1"), message, &sig).is_ok());
    assert!(verify_vartime(sk.public(), Some("payments/v2"), message, &sig).is_err());
}

#[test]
fn test_gls254_public_key_round_trip() {
    let sk = PrivateKey::keygen(b"integration test seed, carol");
    let pub_bytes = sk.public().encode();
    let pk = PublicKey::decode(&pub_bytes).expect("valid encoding must decode");
    assert_eq!(pk.encode(), pub_bytes);
}

#[test]
fn test_gls254_key_exchange() {
    let alice = PrivateKey::keygen(b"integration test seed, dave");
    let bob = PrivateKey::keygen(b"integration test seed, erin");

    let shared_alice = ecdh(&alice, &bob.public().encode());
    let shared_bob = ecdh(&bob, &alice.public().encode());

    assert_eq!(
        shared_alice, shared_bob,
        "key exchange secrets must match"
    );
}

#[test]
fn test_gls254_decode_rejects_garbage_private_key() {
    assert!(PrivateKey::decode(&[0u8; 32]).is_err());
    assert!(PrivateKey::decode(&[0xff; 32]).is_err());
}

#[test]
fn test_gls254_decode_rejects_garbage_public_key() {
    assert!(PublicKey::decode(&[0xaa; 32]).is_err());
}
