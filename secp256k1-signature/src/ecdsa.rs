//! ECDSA signatures with RFC 6979 deterministic nonce generation and
//! low-s canonicalization.
//!
//! Generic over the digest `D` used both for message hashing by the
//! caller (this module only ever sees a pre-computed `message_hash`) and
//! for the HMAC-DRBG inside [`secp256k1_rng::rfc6979`].

use digest::core_api::BlockSizeUser;
use digest::Digest;
use secp256k1_core::{Error, FieldElement as _, PointProjective as _, Result};
use secp256k1_curve::{AffinePoint, JacobianPoint, Scalar};
use secp256k1_encoding::der::{self, DerSignature};
use secp256k1_rng::rfc6979;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// An ECDSA signature `(r, s)`.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// The `r` component.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// `true` iff `s` is in the upper half of the curve order, i.e. this
    /// signature would be rejected by strict (low-s-only) verification.
    pub fn is_high_s(&self) -> bool {
        self.s.is_high()
    }

    /// Returns the low-s canonical form of this signature: unchanged if
    /// `s <= n/2`, otherwise `s := n - s`.
    pub fn normalized(&self) -> Self {
        if self.s.is_high() {
            Signature { r: self.r, s: self.s.negate() }
        } else {
            *self
        }
    }

    /// 64-byte compact wire form: `r || s`, both big-endian.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Parses a 64-byte compact signature, rejecting out-of-range or
    /// zero components.
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 64 {
            return Err(Error::InvalidSignature);
        }
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);
        let r: Option<Scalar> = Scalar::from_bytes(&r_bytes).into();
        let s: Option<Scalar> = Scalar::from_bytes(&s_bytes).into();
        let r = r.ok_or(Error::InvalidSignature)?;
        let s = s.ok_or(Error::InvalidSignature)?;
        if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
            return Err(Error::InvalidSignature);
        }
        Ok(Signature { r, s })
    }

    /// DER encoding, per the ASN.1 `ECDSA-Sig-Value` codec in
    /// `secp256k1_encoding::der`.
    pub fn to_der(&self) -> DerSignature {
        der::encode(&self.r.to_bytes(), &self.s.to_bytes())
    }

    /// Parses a DER-encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (r_bytes, s_bytes) = der::decode(bytes)?;
        let r: Option<Scalar> = Scalar::from_bytes(&r_bytes).into();
        let s: Option<Scalar> = Scalar::from_bytes(&s_bytes).into();
        let r = r.ok_or(Error::InvalidSignature)?;
        let s = s.ok_or(Error::InvalidSignature)?;
        if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
            return Err(Error::InvalidSignature);
        }
        Ok(Signature { r, s })
    }
}

impl ConstantTimeEq for Signature {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.r.ct_eq(&other.r) & self.s.ct_eq(&other.s)
    }
}

impl Zeroize for Signature {
    fn zeroize(&mut self) {
        self.r.zeroize();
        self.s.zeroize();
    }
}

/// Interprets a hash (possibly longer than 32 bytes) as the message
/// scalar `m`: truncate to 256 bits, reduce mod `n` only if the result
/// is `>= n`.
fn hash_to_scalar(message_hash: &[u8]) -> Scalar {
    Scalar::from_bytes_reduced(message_hash)
}

/// Produces `k*G` and splits it into `(r, recovery_parity)`, where
/// `recovery_parity` is `Q.y`'s parity bit. `Q.x >= n` (recovery ids 2/3)
/// occurs with probability ~2^-128 and is not modeled, matching
/// [`recover_public_key`]'s restriction to ids 0/1.
fn r_from_nonce(k: &Scalar) -> (Scalar, u8, AffinePoint) {
    let q = secp256k1_curve::scalar_mul::scalar_mul_generator(k).to_affine();
    let r = q.x_as_scalar();
    let y_parity = q.to_compressed().map(|c| c[0] & 1).unwrap_or(0);
    (r, y_parity, q)
}

/// Signs `message_hash` (a pre-computed digest, *not* a raw message) with
/// `private_key`, producing a low-s canonical signature plus its
/// recovery id.
///
/// `extra_entropy` is folded into the RFC 6979 seed (spec's `opts.extraEntropy`);
/// pass `None` for plain determinism.
pub fn sign_recoverable<D>(
    private_key: &Scalar,
    message_hash: &[u8],
    extra_entropy: Option<&[u8]>,
) -> Result<(Signature, u8)>
where
    D: Digest + Clone + BlockSizeUser,
{
    if bool::from(private_key.is_zero()) {
        return Err(Error::InvalidScalar);
    }
    let m = hash_to_scalar(message_hash);

    let k = rfc6979::generate_k::<D>(private_key, message_hash, extra_entropy)?;
    let (r, recovery, _q) = r_from_nonce(&k);
    if bool::from(r.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let k_inv: Option<Scalar> = k.invert().into();
    let k_inv = k_inv.ok_or(Error::InvalidSignature)?;
    let s = k_inv * (m + *private_key * r);
    if bool::from(s.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let (s, recovery) = if s.is_high() { (s.negate(), recovery ^ 1) } else { (s, recovery) };

    Ok((Signature { r, s }, recovery))
}

/// Signs `message_hash`, discarding the recovery id. See
/// [`sign_recoverable`].
pub fn sign<D>(private_key: &Scalar, message_hash: &[u8], extra_entropy: Option<&[u8]>) -> Result<Signature>
where
    D: Digest + Clone + BlockSizeUser,
{
    sign_recoverable::<D>(private_key, message_hash, extra_entropy).map(|(sig, _)| sig)
}

/// Verifies `sig` against `message_hash` and `public_key`.
///
/// `strict` rejects high-s signatures (the spec's default); pass `false`
/// to accept either normalization, e.g. when validating third-party
/// signatures that predate low-s canonicalization. `u1`/`u2` and
/// `public_key` are all public here, so `R = u1*G + u2*P` uses the
/// variable-time multiplication.
pub fn verify(public_key: &AffinePoint, message_hash: &[u8], sig: &Signature, strict: bool) -> bool {
    if bool::from(sig.r.is_zero()) || bool::from(sig.s.is_zero()) {
        return false;
    }
    if strict && sig.s.is_high() {
        return false;
    }
    if message_hash.iter().all(|b| *b == 0) {
        return false;
    }

    let m = hash_to_scalar(message_hash);

    let s_inv: Option<Scalar> = sig.s.invert().into();
    let s_inv = match s_inv {
        Some(v) => v,
        None => return false,
    };
    let u1 = m * s_inv;
    let u2 = sig.r * s_inv;

    let r1 = secp256k1_curve::scalar_mul::multiply_unsafe_generator(&u1);
    let r2 = secp256k1_curve::scalar_mul::multiply_unsafe(public_key, &u2);
    let r_point: JacobianPoint = r1.add_points(&r2);

    if bool::from(r_point.is_identity()) {
        return false;
    }
    let r_affine = r_point.to_affine();
    let x_scalar = r_affine.x_as_scalar();

    bool::from(x_scalar.ct_eq(&sig.r))
}

/// Recovers the public key that would produce `sig` over `message_hash`,
/// given the 0/1 recovery id captured at signing time.
///
/// Only ids `0`/`1` are accepted: `Q.x >= n` (ids `2`/`3`) is a
/// cryptographically negligible case this implementation does not model,
/// matching the spec's own documented limitation.
pub fn recover_public_key(message_hash: &[u8], sig: &Signature, recovery: u8) -> Result<AffinePoint> {
    if recovery > 1 {
        return Err(Error::InvalidRecoveryId);
    }
    if bool::from(sig.r.is_zero()) || bool::from(sig.s.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let mut x_bytes = [0u8; 32];
    x_bytes.copy_from_slice(&sig.r.to_bytes());
    let tag: u8 = if recovery & 1 == 1 { 0x03 } else { 0x02 };
    let mut sec1 = [0u8; 33];
    sec1[0] = tag;
    sec1[1..].copy_from_slice(&x_bytes);
    let r_point = AffinePoint::from_sec1(&sec1)?;

    let m = hash_to_scalar(message_hash);
    let r_inv: Option<Scalar> = sig.r.invert().into();
    let r_inv = r_inv.ok_or(Error::InvalidSignature)?;

    // Q = r^-1 * (s*R - m*G); every scalar and point here is public.
    let s_r = secp256k1_curve::scalar_mul::multiply_unsafe(&r_point, &sig.s);
    let m_g = secp256k1_curve::scalar_mul::multiply_unsafe_generator(&m);
    let diff = s_r.add_points(&m_g.negate());
    let q = secp256k1_curve::scalar_mul::multiply_unsafe(&diff.to_affine(), &r_inv).to_affine();

    if !q.is_on_curve() {
        return Err(Error::NotOnCurve);
    }
    x_bytes.zeroize();
    Ok(q)
}

/// Verifies many `(public_key, message_hash, signature)` triples at once
/// via a random linear combination, faster than verifying each
/// individually when all must hold. Every signature is still checked for
/// well-formedness (range, non-zero, strict low-s) before the batch
/// equation is evaluated.
pub fn batch_verify(public_keys: &[AffinePoint], message_hashes: &[&[u8]], sigs: &[Signature]) -> bool {
    let n = public_keys.len();
    if n == 0 || n != message_hashes.len() || n != sigs.len() {
        return false;
    }

    for sig in sigs {
        if bool::from(sig.r.is_zero()) || bool::from(sig.s.is_zero()) || sig.s.is_high() {
            return false;
        }
    }

    let coefficients: Result<Vec<Scalar>> =
        (0..n).map(|_| secp256k1_rng::os_rng::random_scalar()).collect();
    let coefficients = match coefficients {
        Ok(c) => c,
        Err(_) => return false,
    };

    let mut lhs = JacobianPoint::identity();
    let mut rhs = JacobianPoint::identity();

    for i in 0..n {
        let m = hash_to_scalar(message_hashes[i]);
        let s_inv: Option<Scalar> = sigs[i].s.invert().into();
        let s_inv = match s_inv {
            Some(v) => v,
            None => return false,
        };
        let u1 = m * s_inv * coefficients[i];
        let u2 = sigs[i].r * s_inv * coefficients[i];

        lhs = lhs.add_points(&secp256k1_curve::scalar_mul::multiply_unsafe_generator(&u1));
        rhs = rhs.add_points(&secp256k1_curve::scalar_mul::multiply_unsafe(&public_keys[i], &u2));
    }

    if bool::from(lhs.is_identity()) && bool::from(rhs.is_identity()) {
        return false;
    }

    lhs.to_affine().ct_eq(&rhs.to_affine()).unwrap_u8() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1_curve::scalar_mul::scalar_mul_generator;
    use sha2::Sha256;

    fn scalar_from_u64(v: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&v.to_be_bytes());
        Scalar::from_bytes(&bytes).unwrap()
    }

    fn public_key(sk: &Scalar) -> AffinePoint {
        scalar_mul_generator(sk).to_affine()
    }

    #[test]
    fn sign_verify_round_trip() {
        let sk = scalar_from_u64(12345);
        let pk = public_key(&sk);
        let hash = [0x42u8; 32];

        let sig = sign::<Sha256>(&sk, &hash, None).unwrap();
        assert!(!sig.is_high_s());
        assert!(verify(&pk, &hash, &sig, true));

        let mut bad_hash = hash;
        bad_hash[0] ^= 1;
        assert!(!verify(&pk, &bad_hash, &sig, true));
    }

    #[test]
    fn deterministic_nonce_gives_same_signature_twice() {
        let sk = scalar_from_u64(999);
        let hash = [0x11u8; 32];
        let sig1 = sign::<Sha256>(&sk, &hash, None).unwrap();
        let sig2 = sign::<Sha256>(&sk, &hash, None).unwrap();
        assert!(bool::from(sig1.ct_eq(&sig2)));
    }

    #[test]
    fn recovery_round_trip() {
        let sk = scalar_from_u64(777);
        let pk = public_key(&sk);
        let hash = [0x77u8; 32];

        let (sig, recovery) = sign_recoverable::<Sha256>(&sk, &hash, None).unwrap();
        let recovered = recover_public_key(&hash, &sig, recovery).unwrap();
        assert!(bool::from(recovered.ct_eq(&pk)));
    }

    #[test]
    fn rejects_bad_recovery_id() {
        let sk = scalar_from_u64(42);
        let hash = [0x01u8; 32];
        let (sig, _) = sign_recoverable::<Sha256>(&sk, &hash, None).unwrap();
        assert_eq!(recover_public_key(&hash, &sig, 2), Err(Error::InvalidRecoveryId));
    }

    #[test]
    fn compact_round_trip() {
        let sk = scalar_from_u64(55);
        let hash = [0x22u8; 32];
        let sig = sign::<Sha256>(&sk, &hash, None).unwrap();

        let bytes = sig.to_compact();
        let sig2 = Signature::from_compact(&bytes).unwrap();
        assert!(bool::from(sig.ct_eq(&sig2)));
    }

    #[test]
    fn der_round_trip() {
        let sk = scalar_from_u64(56);
        let hash = [0x23u8; 32];
        let sig = sign::<Sha256>(&sk, &hash, None).unwrap();

        let der = sig.to_der();
        let sig2 = Signature::from_der(der.as_bytes()).unwrap();
        assert!(bool::from(sig.ct_eq(&sig2)));
    }

    #[test]
    fn strict_verify_rejects_high_s() {
        let sk = scalar_from_u64(901);
        let pk = public_key(&sk);
        let hash = [0x5au8; 32];

        let sig = sign::<Sha256>(&sk, &hash, None).unwrap();
        let flipped = Signature { r: sig.r, s: sig.s.negate() };
        assert!(flipped.is_high_s());
        assert!(!verify(&pk, &hash, &flipped, true));
        assert!(verify(&pk, &hash, &flipped, false));
    }

    #[test]
    fn extra_entropy_changes_signature() {
        let sk = scalar_from_u64(2024);
        let hash = [0x9au8; 32];
        let sig1 = sign::<Sha256>(&sk, &hash, None).unwrap();
        let sig2 = sign::<Sha256>(&sk, &hash, Some(&[0x42u8; 32])).unwrap();
        assert!(!bool::from(sig1.ct_eq(&sig2)));
    }

    #[test]
    fn batch_verify_accepts_valid_set_and_rejects_tamper() {
        let sks: Vec<Scalar> = (1..=4u64).map(scalar_from_u64).collect();
        let pks: Vec<AffinePoint> = sks.iter().map(public_key).collect();
        let hashes: Vec<[u8; 32]> = (0..4u8).map(|i| [i; 32]).collect();
        let sigs: Vec<Signature> = sks
            .iter()
            .zip(hashes.iter())
            .map(|(sk, h)| sign::<Sha256>(sk, h, None).unwrap())
            .collect();
        let hash_refs: Vec<&[u8]> = hashes.iter().map(|h| h.as_slice()).collect();

        assert!(batch_verify(&pks, &hash_refs, &sigs));

        let mut tampered = sigs.clone();
        tampered[0] = Signature { r: tampered[0].r, s: tampered[0].s.negate() };
        assert!(!batch_verify(&pks, &hash_refs, &tampered));
    }
}
