//! RFC 6979 deterministic nonce generation.
//!
//! Given a private key and a message digest, derives the same ECDSA nonce
//! `k` every time, removing the signer's dependence on a fresh random
//! source at signing time. Built on [`crate::hmac_drbg::HmacDrbg`], which
//! implements the underlying HMAC-DRBG state machine.
//!
//! Callers pass in an already-computed message digest, not the raw
//! message: hashing the message is the signature scheme's job (it picks
//! the hash function and, for Schnorr, a tagged-hash construction RFC 6979
//! never heard of), not the nonce generator's.

use digest::core_api::BlockSizeUser;
use digest::Digest;

use secp256k1_core::{Error, FieldElement as _, Result};
use secp256k1_curve::Scalar;

use crate::hmac_drbg::HmacDrbg;

const MAX_ATTEMPTS: usize = 1000;

/// Truncates or zero-extends `hash` to the curve's 32-byte scalar width,
/// taking the leftmost (most significant) bytes when `hash` is longer.
/// This is RFC 6979's `bits2int`, specialized to secp256k1's 256-bit
/// order: since both the order's bit length and every supported digest's
/// output length are whole numbers of bytes, the bit-level truncation the
/// RFC describes always lands on a byte boundary.
fn bits2int_256(hash: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    if hash.len() >= 32 {
        out.copy_from_slice(&hash[..32]);
    } else {
        out[32 - hash.len()..].copy_from_slice(hash);
    }
    out
}

/// RFC 6979's `bits2octets`: `bits2int`, then a single conditional
/// subtraction of the curve order (not a full reduction) so the result
/// fits the scalar field's octet width.
fn bits2octets(hash: &[u8]) -> [u8; 32] {
    Scalar::from_bytes_reduced(&bits2int_256(hash)).to_bytes()
}

/// Derives the RFC 6979 nonce `k` for signing with `private_key` over a
/// message whose digest is `message_hash`.
///
/// `extra_entropy`, when present, is mixed into the initial seed after the
/// digest: an "additional data" construction that lets callers fold in
/// host randomness without giving up determinism when none is supplied.
/// Only its first 32 bytes are used.
///
/// Fails with [`Error::DrbgExhausted`] only if 1000 consecutive
/// candidates all land outside `[1, n)`, which does not happen in
/// practice for a sound digest and is kept as an explicit, bounded
/// failure rather than an unbounded loop.
pub fn generate_k<D>(private_key: &Scalar, message_hash: &[u8], extra_entropy: Option<&[u8]>) -> Result<Scalar>
where
    D: Digest + Clone + BlockSizeUser,
{
    let priv_bytes = private_key.to_bytes();
    let h1 = bits2octets(message_hash);

    let mut seed = [0u8; 96];
    let mut len = 0;
    seed[len..len + 32].copy_from_slice(&priv_bytes);
    len += 32;
    seed[len..len + 32].copy_from_slice(&h1);
    len += 32;
    if let Some(extra) = extra_entropy {
        let take = extra.len().min(32);
        seed[len..len + take].copy_from_slice(&extra[..take]);
        len += take;
    }

    let mut drbg = HmacDrbg::<D>::new(&seed[..len]);

    for _ in 0..MAX_ATTEMPTS {
        let mut candidate = [0u8; 32];
        let mut filled = 0;
        while filled < 32 {
            let block = drbg.generate_block();
            let take = (32 - filled).min(block.len());
            candidate[filled..filled + take].copy_from_slice(&block[..take]);
            filled += take;
        }

        let k: Option<Scalar> = Scalar::from_bytes(&candidate).into();
        if let Some(k) = k {
            if !bool::from(k.is_zero()) {
                return Ok(k);
            }
        }
        drbg.reseed_without_material();
    }

    Err(Error::DrbgExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;
    use subtle::ConstantTimeEq;

    fn scalar_from_u64(value: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Scalar::from_bytes(&bytes).unwrap()
    }

    /// Private key `1`, message `"sample"`, SHA-256: a widely cited RFC
    /// 6979 secp256k1 test vector, reproduced here against a reference
    /// HMAC-DRBG run over the same inputs.
    #[test]
    fn rfc6979_sample_vector() {
        let private_key = scalar_from_u64(1);
        let digest = Sha256::digest(b"sample");

        let k = generate_k::<Sha256>(&private_key, &digest, None).unwrap();

        let expected = hex::decode("0f23d7a2ba580b716ff2a03d43e26b3148eea2eb3a1fc6e7abf7cef3877b35be").unwrap();
        assert_eq!(&k.to_bytes()[..], &expected[..]);
    }

    #[test]
    fn deterministic_across_calls() {
        let private_key = scalar_from_u64(42);
        let digest = Sha256::digest(b"some message");

        let k1 = generate_k::<Sha256>(&private_key, &digest, None).unwrap();
        let k2 = generate_k::<Sha256>(&private_key, &digest, None).unwrap();
        assert!(bool::from(k1.ct_eq(&k2)));

        let expected = hex::decode("654a3618c010438ac9e30a38ed728283bb1d55b1b88ca3bcac275b4b913e4bbe").unwrap();
        assert_eq!(&k1.to_bytes()[..], &expected[..]);
    }

    #[test]
    fn extra_entropy_changes_nonce() {
        let private_key = scalar_from_u64(42);
        let digest = Sha256::digest(b"some message");

        let k1 = generate_k::<Sha256>(&private_key, &digest, None).unwrap();
        let k2 = generate_k::<Sha256>(&private_key, &digest, Some(&[0x42; 32])).unwrap();
        assert!(!bool::from(k1.ct_eq(&k2)));

        let expected = hex::decode("79e4e0bfee45fdeb37dd6797adb4bcd9cfbf5ac9fa95c9289030726a926f3faf").unwrap();
        assert_eq!(&k2.to_bytes()[..], &expected[..]);
    }

    #[test]
    fn different_messages_give_different_nonces() {
        let private_key = scalar_from_u64(42);
        let d1 = Sha256::digest(b"some message");
        let d2 = Sha256::digest(b"a different message");

        let k1 = generate_k::<Sha256>(&private_key, &d1, None).unwrap();
        let k2 = generate_k::<Sha256>(&private_key, &d2, None).unwrap();
        assert!(!bool::from(k1.ct_eq(&k2)));
    }
}
