//! Affine point representation `(x, y)`, or the point at infinity.

use core::fmt;

use secp256k1_core::{FieldElement as FieldElementTrait, PointAffine};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::constants;
use crate::field::FieldElement;

/// A point on the curve in affine coordinates, or the identity.
///
/// The identity is tracked with an explicit flag rather than a sentinel
/// coordinate pair, since `(0, 0)` is not on the curve and would otherwise
/// need special-casing at every call site.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    infinity: u8,
}

impl AffinePoint {
    /// The point at infinity.
    pub fn identity() -> Self {
        AffinePoint { x: FieldElement::zero(), y: FieldElement::zero(), infinity: 1 }
    }

    /// Builds a point from coordinates already known to satisfy the curve
    /// equation, without checking.
    pub(crate) fn from_coords_unchecked(x: FieldElement, y: FieldElement) -> Self {
        AffinePoint { x, y, infinity: 0 }
    }

    /// Checks `y^2 == x^3 + 7` and builds the point if it holds.
    pub fn from_coords(x: FieldElement, y: FieldElement) -> Option<Self> {
        let lhs = y.square();
        let rhs = x.square() * x + FieldElement::curve_b();
        if bool::from(lhs.ct_eq(&rhs)) {
            Some(AffinePoint::from_coords_unchecked(x, y))
        } else {
            None
        }
    }

    /// The curve generator `G`.
    pub fn generator() -> Self {
        let x = FieldElement::from_limbs_unchecked(constants::GX);
        let y = FieldElement::from_limbs_unchecked(constants::GY);
        AffinePoint::from_coords_unchecked(x, y)
    }

    /// Applies the GLV endomorphism `(x, y) -> (beta * x, y)`, which is
    /// equivalent to multiplying the point by `LAMBDA`.
    pub fn endomorphism(&self) -> Self {
        let beta = FieldElement::from_limbs_unchecked(constants::BETA);
        AffinePoint { x: self.x * beta, y: self.y, infinity: self.infinity }
    }

    /// `true` iff the curve equation holds for non-identity points;
    /// vacuously true for the identity.
    pub fn is_on_curve(&self) -> bool {
        bool::from(self.infinity) || {
            let lhs = self.y.square();
            let rhs = self.x.square() * self.x + FieldElement::curve_b();
            bool::from(lhs.ct_eq(&rhs))
        }
    }

    /// Reflects the point across the x-axis.
    pub fn negate(&self) -> Self {
        AffinePoint { x: self.x, y: -self.y, infinity: self.infinity }
    }

    /// 33-byte SEC1 compressed encoding: `0x02`/`0x03` || 32-byte x.
    pub fn to_compressed(&self) -> Option<[u8; 33]> {
        if bool::from(self.infinity) {
            return None;
        }
        let mut out = [0u8; 33];
        let y_is_odd = self.y.to_bytes()[31] & 1 == 1;
        out[0] = if y_is_odd { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        Some(out)
    }

    /// 65-byte SEC1 uncompressed encoding: `0x04` || 32-byte x || 32-byte y.
    pub fn to_uncompressed(&self) -> Option<[u8; 65]> {
        if bool::from(self.infinity) {
            return None;
        }
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        Some(out)
    }

    /// Decodes a SEC1 compressed (33-byte) or uncompressed (65-byte) point.
    pub fn from_sec1(bytes: &[u8]) -> secp256k1_core::Result<Self> {
        match bytes.first() {
            Some(0x04) if bytes.len() == 65 => {
                let mut xb = [0u8; 32];
                let mut yb = [0u8; 32];
                xb.copy_from_slice(&bytes[1..33]);
                yb.copy_from_slice(&bytes[33..65]);
                let x: Option<FieldElement> = FieldElement::from_bytes(&xb).into();
                let y: Option<FieldElement> = FieldElement::from_bytes(&yb).into();
                let x = x.ok_or(secp256k1_core::Error::InvalidEncoding)?;
                let y = y.ok_or(secp256k1_core::Error::InvalidEncoding)?;
                AffinePoint::from_coords(x, y).ok_or(secp256k1_core::Error::NotOnCurve)
            }
            Some(tag @ (0x02 | 0x03)) if bytes.len() == 33 => {
                let mut xb = [0u8; 32];
                xb.copy_from_slice(&bytes[1..33]);
                let x: Option<FieldElement> = FieldElement::from_bytes(&xb).into();
                let x = x.ok_or(secp256k1_core::Error::InvalidEncoding)?;
                let rhs = x.square() * x + FieldElement::curve_b();
                let y: Option<FieldElement> = rhs.sqrt().into();
                let y = y.ok_or(secp256k1_core::Error::NotOnCurve)?;
                let y_is_odd = y.to_bytes()[31] & 1 == 1;
                let want_odd = *tag == 0x03;
                let y = if y_is_odd == want_odd { y } else { -y };
                Ok(AffinePoint::from_coords_unchecked(x, y))
            }
            _ => Err(secp256k1_core::Error::InvalidLength),
        }
    }

    /// The point's x-coordinate reduced into the scalar field, as required
    /// by ECDSA's `r = x mod n`.
    pub fn x_as_scalar(&self) -> crate::scalar::Scalar {
        crate::scalar::Scalar::from_bytes_reduced(&self.x.to_bytes())
    }

    /// Decodes a hex-encoded point, dispatching on the decoded byte
    /// length: 32 bytes is an x-only coordinate (the Schnorr convention,
    /// implicit even y); 33/65 bytes is SEC1 compressed/uncompressed, as
    /// in [`Self::from_sec1`].
    pub fn from_hex(hex: &str) -> secp256k1_core::Result<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.len() % 2 != 0 {
            return Err(secp256k1_core::Error::InvalidHex);
        }
        let len = hex.len() / 2;
        let mut buf = [0u8; 65];
        if len > buf.len() {
            return Err(secp256k1_core::Error::InvalidLength);
        }
        hex::decode_to_slice(hex, &mut buf[..len]).map_err(|_| secp256k1_core::Error::InvalidHex)?;

        match len {
            32 => {
                let mut sec1 = [0u8; 33];
                sec1[0] = 0x02;
                sec1[1..].copy_from_slice(&buf[..32]);
                AffinePoint::from_sec1(&sec1)
            }
            33 | 65 => AffinePoint::from_sec1(&buf[..len]),
            _ => Err(secp256k1_core::Error::InvalidLength),
        }
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        AffinePoint::identity()
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_infinity = self.infinity.ct_eq(&other.infinity);
        let coords_eq = self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
        both_infinity & (Choice::from(self.infinity) | coords_eq)
    }
}

impl Zeroize for AffinePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.infinity = 0;
    }
}

impl PointAffine for AffinePoint {
    type Field = FieldElement;

    fn x(&self) -> FieldElement {
        self.x
    }

    fn y(&self) -> FieldElement {
        self.y
    }

    fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }
}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if bool::from(self.infinity) {
            write!(f, "AffinePoint(identity)")
        } else {
            write!(f, "AffinePoint({:?}, {:?})", self.x.to_bytes(), self.y.to_bytes())
        }
    }
}
