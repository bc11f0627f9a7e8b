//! Jacobian projective point arithmetic: `(X, Y, Z)` represents the affine
//! point `(X/Z^2, Y/Z^3)`. Using projective coordinates avoids a field
//! inversion on every point addition; only the final conversion back to
//! affine coordinates needs one.

use core::ops::{Add, Sub};

use secp256k1_core::{FieldElement as FieldElementTrait, PointAffine, PointProjective};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use crate::affine::AffinePoint;
use crate::field::FieldElement;

/// A point on the curve in Jacobian coordinates, or the identity
/// (`Z == 0`).
#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl JacobianPoint {
    /// Doubles the point. Uses the standard `a = 0` doubling formula
    /// (2 multiplications, 5 squarings).
    pub fn double(&self) -> Self {
        if bool::from(self.is_identity()) {
            return *self;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let x1_plus_b = self.x + b;
        let d = (x1_plus_b.square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();
        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();
        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    /// Adds `other`, dispatching to [`Self::double`] when the two points
    /// coincide and to the identity rules when one operand is the point at
    /// infinity or the operands are inverse to one another.
    pub fn add_points(&self, other: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *other;
        }
        if bool::from(other.is_identity()) {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - u1;
        let r = s2.double() - s1.double();

        if bool::from(h.is_zero()) {
            if bool::from(r.is_zero()) {
                return self.double();
            }
            return JacobianPoint::identity();
        }

        let i = h.double().square();
        let j = h * i;
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - s1.double() * j;
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;

        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    /// Negates the point (reflects across the x-axis).
    pub fn negate(&self) -> Self {
        JacobianPoint { x: self.x, y: -self.y, z: self.z }
    }

    /// Converts a slice of Jacobian points to affine coordinates using a
    /// single batched field inversion (Montgomery's trick) instead of one
    /// inversion per point.
    ///
    /// `zs` and `scratch` are caller-supplied buffers the same length as
    /// `points` and `out`; their contents on entry are irrelevant.
    pub fn batch_to_affine(
        points: &[JacobianPoint],
        zs: &mut [FieldElement],
        scratch: &mut [FieldElement],
        out: &mut [AffinePoint],
    ) {
        debug_assert_eq!(points.len(), zs.len());
        debug_assert_eq!(points.len(), scratch.len());
        debug_assert_eq!(points.len(), out.len());

        for (z, p) in zs.iter_mut().zip(points.iter()) {
            *z = if bool::from(p.is_identity()) { FieldElement::one() } else { p.z };
        }
        FieldElement::invert_batch(zs, scratch);

        for ((p, z_inv), o) in points.iter().zip(zs.iter()).zip(out.iter_mut()) {
            if bool::from(p.is_identity()) {
                *o = AffinePoint::identity();
                continue;
            }
            let z_inv2 = z_inv.square();
            let z_inv3 = z_inv2 * *z_inv;
            let x = p.x * z_inv2;
            let y = p.y * z_inv3;
            *o = AffinePoint::from_coords_unchecked(x, y);
        }
    }
}

impl Default for JacobianPoint {
    fn default() -> Self {
        JacobianPoint::identity()
    }
}

impl ConstantTimeEq for JacobianPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Compare via cross-multiplication so differing Z-representations
        // of the same affine point still compare equal:
        // X1 * Z2^2 == X2 * Z1^2 and Y1 * Z2^3 == Y2 * Z1^3.
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * other.z * z2z2).ct_eq(&(other.y * self.z * z1z1));
        let both_identity = self.is_identity() & other.is_identity();
        both_identity | (x_eq & y_eq)
    }
}

impl ConditionallySelectable for JacobianPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        JacobianPoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Zeroize for JacobianPoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
    }
}

impl Add for JacobianPoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.add_points(&rhs)
    }
}

impl Sub for JacobianPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.add_points(&rhs.negate())
    }
}

impl PointProjective for JacobianPoint {
    type Field = FieldElement;
    type Affine = AffinePoint;

    fn identity() -> Self {
        JacobianPoint { x: FieldElement::one(), y: FieldElement::one(), z: FieldElement::zero() }
    }

    fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    fn to_affine(&self) -> AffinePoint {
        if bool::from(self.is_identity()) {
            return AffinePoint::identity();
        }
        let z_inv = self.z.invert().unwrap_or_else(FieldElement::zero);
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2 * z_inv;
        AffinePoint::from_coords_unchecked(self.x * z_inv2, self.y * z_inv3)
    }

    fn from_affine(p: &AffinePoint) -> Self {
        if bool::from(p.is_identity()) {
            return JacobianPoint::identity();
        }
        JacobianPoint { x: p.x(), y: p.y(), z: FieldElement::one() }
    }
}
