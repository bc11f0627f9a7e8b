//! BIP-340 Schnorr signatures: x-only public keys, even-y convention,
//! self-verifying sign.
//!
//! Unlike ECDSA (generic over the injected digest), BIP-340 fixes
//! SHA-256 for its tagged-hash construction, so this module depends on
//! `sha2::Sha256` directly rather than taking `D` as a type parameter.

use secp256k1_core::{Error, FieldElement as _, PointAffine as _, PointProjective as _, Result};
use secp256k1_curve::{AffinePoint, FieldElement, JacobianPoint, Scalar};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// `SHA256(SHA256(tag) || SHA256(tag) || parts...)`, the domain-separated
/// hash every BIP-340 sub-protocol (aux, nonce, challenge) is built from.
fn tagged_hash(tag: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag);
    let mut hasher = Sha256::new();
    hasher.update(&tag_hash);
    hasher.update(&tag_hash);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn hash_to_scalar(tag: &[u8], parts: &[&[u8]]) -> Scalar {
    Scalar::from_bytes_reduced(&tagged_hash(tag, parts))
}

fn is_even_y(p: &AffinePoint) -> bool {
    match p.to_compressed() {
        Some(c) => c[0] == 0x02,
        None => true,
    }
}

/// Lifts an x-only coordinate into the unique point with that x and an
/// even y, per BIP-340's `lift_x`.
fn lift_x(x_bytes: &[u8; 32]) -> Result<AffinePoint> {
    let mut sec1 = [0u8; 33];
    sec1[0] = 0x02;
    sec1[1..].copy_from_slice(x_bytes);
    AffinePoint::from_sec1(&sec1)
}

/// A BIP-340 Schnorr signature: `(r, s)` with `r` a field element (the
/// nonce point's x-coordinate) and `s` a scalar.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    r: FieldElement,
    s: Scalar,
}

impl Signature {
    /// 64-byte wire form: `r || s`, both big-endian.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Parses a 64-byte signature, rejecting `r >= p` or `s >= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 64 {
            return Err(Error::InvalidSignature);
        }
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);
        let r: Option<FieldElement> = FieldElement::from_bytes(&r_bytes).into();
        let s: Option<Scalar> = Scalar::from_bytes(&s_bytes).into();
        let r = r.ok_or(Error::InvalidSignature)?;
        let s = s.ok_or(Error::InvalidSignature)?;
        Ok(Signature { r, s })
    }
}

impl ConstantTimeEq for Signature {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.r.ct_eq(&other.r) & self.s.ct_eq(&other.s)
    }
}

/// Returns the 32-byte x-only public key for `private_key`.
pub fn public_key(private_key: &Scalar) -> [u8; 32] {
    let p = secp256k1_curve::scalar_mul::scalar_mul_generator(private_key).to_affine();
    match p.to_compressed() {
        Some(c) => {
            let mut x = [0u8; 32];
            x.copy_from_slice(&c[1..]);
            x
        }
        None => [0u8; 32],
    }
}

/// Signs `msg` with `private_key`, per BIP-340:
///
/// - `d = d0` if `P = d0*G` has even y, else `n - d0`.
/// - `t = d XOR tagged_hash("BIP0340/aux", aux_rand)`.
/// - `k0 = tagged_hash("BIP0340/nonce", t, P.x, msg) mod n`; reject if 0.
/// - `R = k0*G`; `k = k0` if `R` has even y else `n - k0`.
/// - `e = tagged_hash("BIP0340/challenge", R.x, P.x, msg) mod n`.
/// - `sig = (R.x, k + e*d mod n)`.
///
/// The signature is self-verified before being returned: a signing bug
/// that would produce an invalid signature fails closed instead of
/// returning bad output.
pub fn sign(private_key: &Scalar, msg: &[u8], aux_rand: &[u8; 32]) -> Result<[u8; 64]> {
    if bool::from(private_key.is_zero()) {
        return Err(Error::InvalidScalar);
    }

    let p_point = secp256k1_curve::scalar_mul::scalar_mul_generator(private_key).to_affine();
    let d = if is_even_y(&p_point) { *private_key } else { private_key.negate() };
    let p_x = p_point.x();

    let aux_hash = tagged_hash(b"BIP0340/aux", &[aux_rand]);
    let d_bytes = d.to_bytes();
    let mut t = [0u8; 32];
    for i in 0..32 {
        t[i] = d_bytes[i] ^ aux_hash[i];
    }

    let k0 = hash_to_scalar(b"BIP0340/nonce", &[&t, &p_x.to_bytes(), msg]);
    if bool::from(k0.is_zero()) {
        return Err(Error::InvalidScalar);
    }

    let r_point = secp256k1_curve::scalar_mul::scalar_mul_generator(&k0).to_affine();
    let k = if is_even_y(&r_point) { k0 } else { k0.negate() };
    let r_x = r_point.x();

    let e = hash_to_scalar(b"BIP0340/challenge", &[&r_x.to_bytes(), &p_x.to_bytes(), msg]);
    let s = k + e * d;

    let sig = Signature { r: r_x, s };
    let bytes = sig.to_bytes();

    if !verify(&p_x.to_bytes(), msg, &bytes) {
        return Err(Error::InvalidSignature);
    }
    Ok(bytes)
}

/// Verifies a 64-byte signature against `msg` and the 32-byte x-only
/// public key `pubkey_x`.
pub fn verify(pubkey_x: &[u8; 32], msg: &[u8], signature: &[u8; 64]) -> bool {
    let sig = match Signature::from_bytes(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let p_point = match lift_x(pubkey_x) {
        Ok(p) => p,
        Err(_) => return false,
    };

    let e = hash_to_scalar(b"BIP0340/challenge", &[&sig.r.to_bytes(), pubkey_x, msg]);

    // sig.s, e and p_point are all public here; use the variable-time path.
    let s_g = secp256k1_curve::scalar_mul::multiply_unsafe_generator(&sig.s);
    let e_p = secp256k1_curve::scalar_mul::multiply_unsafe(&p_point, &e);
    let r_point: JacobianPoint = s_g.add_points(&e_p.negate());

    if bool::from(r_point.is_identity()) {
        return false;
    }
    let r_affine = r_point.to_affine();
    if !is_even_y(&r_affine) {
        return false;
    }

    bool::from(r_affine.x().ct_eq(&sig.r))
}

/// Verifies many `(pubkey_x, msg, signature)` triples at once via a
/// random linear combination: `sum(a_i*s_i)*G == sum(a_i*R_i) +
/// sum(a_i*e_i*P_i)`.
pub fn batch_verify(public_keys: &[&[u8; 32]], messages: &[&[u8]], signatures: &[&[u8; 64]]) -> bool {
    let n = public_keys.len();
    if n == 0 || n != messages.len() || n != signatures.len() {
        return false;
    }

    let mut sigs = Vec::with_capacity(n);
    let mut pks = Vec::with_capacity(n);
    let mut r_points = Vec::with_capacity(n);
    for i in 0..n {
        let sig = match Signature::from_bytes(signatures[i]) {
            Ok(s) => s,
            Err(_) => return false,
        };
        let pk = match lift_x(public_keys[i]) {
            Ok(p) => p,
            Err(_) => return false,
        };
        let r_point = match lift_x(&sig.r.to_bytes()) {
            Ok(p) => p,
            Err(_) => return false,
        };
        sigs.push(sig);
        pks.push(pk);
        r_points.push(r_point);
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
        let e = hash_to_scalar(b"BIP0340/challenge", &[&sigs[i].r.to_bytes(), public_keys[i], messages[i]]);

        let a_s = sigs[i].s * coefficients[i];
        lhs = lhs.add_points(&secp256k1_curve::scalar_mul::multiply_unsafe_generator(&a_s));

        let a_e = e * coefficients[i];
        let a_e_p = secp256k1_curve::scalar_mul::multiply_unsafe(&pks[i], &a_e);
        let a_r = secp256k1_curve::scalar_mul::multiply_unsafe(&r_points[i], &coefficients[i]);
        rhs = rhs.add_points(&a_r).add_points(&a_e_p);
    }

    lhs.to_affine().ct_eq(&rhs.to_affine()).unwrap_u8() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_from_u64(v: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&v.to_be_bytes());
        Scalar::from_bytes(&bytes).unwrap()
    }

    fn hex32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).unwrap();
        out
    }

    fn hex64(s: &str) -> [u8; 64] {
        let mut out = [0u8; 64];
        hex::decode_to_slice(s, &mut out).unwrap();
        out
    }

    #[test]
    fn bip340_test_vector_0() {
        let sk = scalar_from_u64(3);
        let msg = [0u8; 32];
        let aux = [0u8; 32];

        let sig = sign(&sk, &msg, &aux).unwrap();
        let expected_sig = hex64(
            "E907831F80848D1069A5371B402410364BDF1C5F8307B0084C55F1CE2DCA821\
             525F66A4A85EA8B71E482A74F382D2CE5EBEEE8FDB2172F477DF4900D310536C0",
        );
        assert_eq!(sig, expected_sig);

        let pk = public_key(&sk);
        let expected_pk = hex32("F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9");
        assert_eq!(pk, expected_pk);

        assert!(verify(&pk, &msg, &sig));

        let mut tampered = sig;
        tampered[63] ^= 1;
        assert!(!verify(&pk, &msg, &tampered));
    }

    #[test]
    fn sign_verify_round_trip() {
        let sk = scalar_from_u64(424242);
        let msg = [0x11u8; 32];
        let aux = [0x22u8; 32];

        let sig = sign(&sk, &msg, &aux).unwrap();
        let pk = public_key(&sk);
        assert!(verify(&pk, &msg, &sig));

        let mut other_msg = msg;
        other_msg[0] ^= 1;
        assert!(!verify(&pk, &other_msg, &sig));
    }

    #[test]
    fn batch_verify_accepts_valid_and_rejects_tamper() {
        let sks: Vec<Scalar> = (10..13u64).map(scalar_from_u64).collect();
        let msgs: Vec<[u8; 32]> = (0..3u8).map(|i| [i; 32]).collect();
        let aux = [0u8; 32];
        let sigs: Vec<[u8; 64]> =
            sks.iter().zip(msgs.iter()).map(|(sk, m)| sign(sk, m, &aux).unwrap()).collect();
        let pks: Vec<[u8; 32]> = sks.iter().map(public_key).collect();

        let pk_refs: Vec<&[u8; 32]> = pks.iter().collect();
        let msg_refs: Vec<&[u8]> = msgs.iter().map(|m| m.as_slice()).collect();
        let sig_refs: Vec<&[u8; 64]> = sigs.iter().collect();

        assert!(batch_verify(&pk_refs, &msg_refs, &sig_refs));

        let mut tampered = sigs.clone();
        tampered[0][63] ^= 1;
        let tampered_refs: Vec<&[u8; 64]> = tampered.iter().collect();
        assert!(!batch_verify(&pk_refs, &msg_refs, &tampered_refs));
    }
}
