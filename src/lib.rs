//! # secp256k1-engine
//!
//! A Rust implementation of secp256k1 elliptic curve cryptography: field
//! and scalar arithmetic, Jacobian point arithmetic with GLV+wNAF scalar
//! multiplication, ECDSA (RFC 6979 deterministic nonces, DER/compact
//! encodings, public key recovery), BIP-340 Schnorr signatures, and ECDH.
//!
//! ## Example: ECDSA sign and verify
//!
//! ```rust
//! use secp256k1_engine::{PrivateKey, sign, verify};
//! use sha2::Sha256;
//!
//! let private_key = PrivateKey::generate().unwrap();
//! let public_key = private_key.public_key();
//!
//! let message_hash = [0x42u8; 32];
//! let signature = sign::<Sha256>(&private_key, &message_hash, None).unwrap();
//! assert!(verify(&public_key, &message_hash, &signature, true));
//! ```
//!
//! ## Example: BIP-340 Schnorr
//!
//! ```rust
//! use secp256k1_engine::{schnorr, PrivateKey};
//!
//! let private_key = PrivateKey::generate().unwrap();
//! let pubkey_x = schnorr::get_public_key(private_key.scalar());
//!
//! let msg = b"hello schnorr";
//! let aux_rand = [0u8; 32];
//! let signature = schnorr::sign(private_key.scalar(), msg, &aux_rand).unwrap();
//! assert!(schnorr::verify(&pubkey_x, msg, &signature));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use secp256k1_core;
pub use secp256k1_curve;
pub use secp256k1_encoding;
pub use secp256k1_rng;
pub use secp256k1_signature;
pub use secp256k1_signature::schnorr;

use secp256k1_core::{Error, FieldElement as _, Result};
use secp256k1_curve::{AffinePoint, Scalar};
use secp256k1_signature::ecdsa;

pub use secp256k1_signature::ecdsa::Signature;

/// A secp256k1 private key: a nonzero scalar.
///
/// Distinct from [`PublicKey`] so that callers never need to guess which
/// kind of key a byte string holds, unlike the byte-length heuristic some
/// other ECDSA implementations use to disambiguate the two.
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

    /// Draws a private key from the OS CSPRNG.
    pub fn generate() -> Result<Self> {
        Ok(PrivateKey(secp256k1_rng::os_rng::random_scalar()?))
    }

    /// `getPublicKey`: the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        let p = secp256k1_curve::scalar_mul::scalar_mul_generator(&self.0).to_affine();
        PublicKey(p)
    }

    /// The 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// The underlying scalar, for callers reaching into lower layers
    /// (e.g. [`schnorr`], which is generic over bare scalars rather than
    /// this facade's key types).
    pub fn scalar(&self) -> &Scalar {
        &self.0
    }
}

/// A secp256k1 public key.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey(AffinePoint);

impl PublicKey {
    /// Parses a SEC1-encoded (compressed or uncompressed) public key.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        Ok(PublicKey(AffinePoint::from_sec1(bytes)?))
    }

    /// SEC1 encoding: 33 bytes compressed, 65 bytes uncompressed.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.0.to_compressed().expect("non-identity point").to_vec()
        } else {
            self.0.to_uncompressed().expect("non-identity point").to_vec()
        }
    }

    /// The underlying affine point.
    pub fn affine(&self) -> &AffinePoint {
        &self.0
    }
}

/// `getPublicKey`: derives the public key for `private_key`, SEC1
/// encoded (compressed or uncompressed).
pub fn get_public_key(private_key: &PrivateKey, compressed: bool) -> Vec<u8> {
    private_key.public_key().to_bytes(compressed)
}

/// `sign`: signs `message_hash` with `private_key`, using RFC 6979
/// deterministic nonces and low-s canonicalization. `D` is the digest
/// used both by the RFC 6979 HMAC-DRBG and to have produced
/// `message_hash` (e.g. `sha2::Sha256`).
pub fn sign<D>(private_key: &PrivateKey, message_hash: &[u8], extra_entropy: Option<&[u8]>) -> Result<Signature>
where
    D: digest::Digest + Clone + digest::core_api::BlockSizeUser,
{
    ecdsa::sign::<D>(private_key.scalar(), message_hash, extra_entropy)
}

/// `sign` with the `recovered=true` variant: also returns the recovery
/// id needed by [`recover_public_key`].
pub fn sign_recoverable<D>(
    private_key: &PrivateKey,
    message_hash: &[u8],
    extra_entropy: Option<&[u8]>,
) -> Result<(Signature, u8)>
where
    D: digest::Digest + Clone + digest::core_api::BlockSizeUser,
{
    ecdsa::sign_recoverable::<D>(private_key.scalar(), message_hash, extra_entropy)
}

/// `verify`: checks `signature` against `message_hash` and `public_key`.
/// `strict` rejects high-s signatures, the default recommended by most
/// ECDSA consumers (e.g. Bitcoin's policy rules).
pub fn verify(public_key: &PublicKey, message_hash: &[u8], signature: &Signature, strict: bool) -> bool {
    ecdsa::verify(public_key.affine(), message_hash, signature, strict)
}

/// `recoverPublicKey`: recovers the signer's public key from
/// `message_hash`, `signature`, and the recovery id returned by
/// [`sign_recoverable`]. Only recovery ids `0`/`1` are supported.
pub fn recover_public_key(message_hash: &[u8], signature: &Signature, recovery: u8) -> Result<PublicKey> {
    ecdsa::recover_public_key(message_hash, signature, recovery).map(PublicKey)
}

/// `getSharedSecret`: the ECDH shared secret `private_key * public_key`,
/// SEC1 encoded.
pub fn get_shared_secret(private_key: &PrivateKey, public_key: &PublicKey, compressed: bool) -> Result<Vec<u8>> {
    let ecdh_priv = secp256k1_signature::ecdh::PrivateKey::new(*private_key.scalar())?;
    let ecdh_pub = secp256k1_signature::ecdh::PublicKey::from_sec1(&public_key.to_bytes(true))?;
    secp256k1_signature::ecdh::shared_secret(&ecdh_priv, &ecdh_pub, compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    #[test]
    fn sign_verify_round_trip() {
        let sk = PrivateKey::generate().unwrap();
        let pk = sk.public_key();
        let hash = [0x99u8; 32];

        let sig = sign::<Sha256>(&sk, &hash, None).unwrap();
        assert!(verify(&pk, &hash, &sig, true));
    }

    #[test]
    fn recovery_round_trip() {
        let sk = PrivateKey::generate().unwrap();
        let pk = sk.public_key();
        let hash = [0x55u8; 32];

        let (sig, recovery) = sign_recoverable::<Sha256>(&sk, &hash, None).unwrap();
        let recovered = recover_public_key(&hash, &sig, recovery).unwrap();
        assert_eq!(recovered.to_bytes(true), pk.to_bytes(true));
    }

    #[test]
    fn ecdh_shared_secret_is_symmetric() {
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();

        let secret_ab = get_shared_secret(&a, &b.public_key(), true).unwrap();
        let secret_ba = get_shared_secret(&b, &a.public_key(), true).unwrap();
        assert_eq!(secret_ab, secret_ba);
    }

    #[test]
    fn schnorr_sign_verify_round_trip() {
        let sk = PrivateKey::generate().unwrap();
        let pubkey_x = schnorr::get_public_key(sk.scalar());

        let msg = b"facade smoke test";
        let aux_rand = [0x77u8; 32];
        let sig = schnorr::sign(sk.scalar(), msg, &aux_rand).unwrap();
        assert!(schnorr::verify(&pubkey_x, msg, &sig));
    }
}
