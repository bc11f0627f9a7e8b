//! Diffie-Hellman shared secret derivation.
//!
//! The source this workspace is derived from picks public vs. private
//! keys via a byte-length heuristic (`isPub`). Here the two are distinct
//! types instead, so the ambiguity cannot arise: a caller must already
//! know which key is which, and the compiler enforces it.

use secp256k1_core::{Error, FieldElement as _, PointAffine as _, PointProjective as _, Result};
use secp256k1_curve::{AffinePoint, Scalar};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// A secp256k1 private key: a nonzero scalar.
#[derive(Clone, Copy, Debug)]
pub struct PrivateKey(Scalar);

impl PrivateKey {
    /// Wraps `scalar` as a private key, rejecting zero.
    pub fn new(scalar: Scalar) -> Result<Self> {
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidScalar);
        }
        Ok(PrivateKey(scalar))
    }

    /// Parses a 32-byte big-endian private key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength);
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let scalar: Option<Scalar> = Scalar::from_bytes(&buf).into();
        Self::new(scalar.ok_or(Error::InvalidScalar)?)
    }

    /// The corresponding public key `d*G`.
    pub fn public_key(&self) -> PublicKey {
        let p = secp256k1_curve::scalar_mul::scalar_mul_generator(&self.0).to_affine();
        PublicKey(p)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }
}

/// A secp256k1 public key: a point other than the identity.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey(AffinePoint);

impl PublicKey {
    /// Parses a SEC1-encoded (compressed or uncompressed) public key.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        let point = AffinePoint::from_sec1(bytes)?;
        if bool::from(point.is_identity()) {
            return Err(Error::NotOnCurve);
        }
        Ok(PublicKey(point))
    }

    /// 33-byte compressed SEC1 encoding.
    pub fn to_compressed(&self) -> [u8; 33] {
        self.0.to_compressed().expect("non-identity point")
    }

    /// 65-byte uncompressed SEC1 encoding.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        self.0.to_uncompressed().expect("non-identity point")
    }

    pub(crate) fn point(&self) -> &AffinePoint {
        &self.0
    }
}

/// Computes the Diffie-Hellman shared secret `private_key * public_key`,
/// returned as a SEC1-encoded point (compressed if `compressed`, else
/// uncompressed).
///
/// Rejects the (negligible-probability) case where the result is the
/// point at infinity, which would happen only if `public_key` were the
/// negation of `private_key * public_key`'s cofactor companion — in
/// practice, only a maliciously crafted public key can trigger it.
pub fn shared_secret(private_key: &PrivateKey, public_key: &PublicKey, compressed: bool) -> Result<Vec<u8>> {
    let product = secp256k1_curve::scalar_mul::scalar_mul(public_key.point(), private_key.scalar());
    if bool::from(product.is_identity()) {
        return Err(Error::NotOnCurve);
    }
    let affine = product.to_affine();
    let bytes = if compressed {
        affine.to_compressed().expect("checked non-identity above").to_vec()
    } else {
        affine.to_uncompressed().expect("checked non-identity above").to_vec()
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_from_u64(v: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&v.to_be_bytes());
        Scalar::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn shared_secret_is_symmetric() {
        let a = PrivateKey::new(scalar_from_u64(111)).unwrap();
        let b = PrivateKey::new(scalar_from_u64(222)).unwrap();

        let secret_ab = shared_secret(&a, &b.public_key(), true).unwrap();
        let secret_ba = shared_secret(&b, &a.public_key(), true).unwrap();
        assert_eq!(secret_ab, secret_ba);
    }

    #[test]
    fn compressed_and_uncompressed_agree_on_x() {
        let a = PrivateKey::new(scalar_from_u64(7)).unwrap();
        let b = PrivateKey::new(scalar_from_u64(9)).unwrap();

        let compressed = shared_secret(&a, &b.public_key(), true).unwrap();
        let uncompressed = shared_secret(&a, &b.public_key(), false).unwrap();
        assert_eq!(&compressed[1..], &uncompressed[1..33]);
    }

    #[test]
    fn rejects_zero_private_key() {
        let zero_bytes = [0u8; 32];
        let scalar: Option<Scalar> = Scalar::from_bytes(&zero_bytes).into();
        assert!(PrivateKey::new(scalar.unwrap()).is_err());
    }
}
