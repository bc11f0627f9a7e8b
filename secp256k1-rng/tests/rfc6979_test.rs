use secp256k1_core::FieldElement as _;
use secp256k1_curve::Scalar;
use secp256k1_rng::rfc6979;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

fn private_key_one() -> Scalar {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    Scalar::from_bytes(&bytes).unwrap()
}

#[test]
fn test_rfc6979_deterministic() {
    let private_key = private_key_one();
    let digest = Sha256::digest(b"sample");

    let k1 = rfc6979::generate_k::<Sha256>(&private_key, &digest, None).unwrap();
    let k2 = rfc6979::generate_k::<Sha256>(&private_key, &digest, None).unwrap();
    assert_eq!(k1.ct_eq(&k2).unwrap_u8(), 1);

    let different_digest = Sha256::digest(b"different message");
    let k3 = rfc6979::generate_k::<Sha256>(&private_key, &different_digest, None).unwrap();
    assert_eq!(k1.ct_eq(&k3).unwrap_u8(), 0);
}

#[test]
fn test_rfc6979_with_extra_data() {
    let private_key = private_key_one();
    let digest = Sha256::digest(b"sample");
    let extra_data = b"additional data";

    let k1 = rfc6979::generate_k::<Sha256>(&private_key, &digest, None).unwrap();
    let k2 = rfc6979::generate_k::<Sha256>(&private_key, &digest, Some(extra_data)).unwrap();
    assert_eq!(k1.ct_eq(&k2).unwrap_u8(), 0);

    let k3 = rfc6979::generate_k::<Sha256>(&private_key, &digest, Some(extra_data)).unwrap();
    assert_eq!(k2.ct_eq(&k3).unwrap_u8(), 1);
}
