//! The base field `Fp`, `p = 2^256 - 2^32 - 977`.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use secp256k1_core::FieldElement as FieldElementTrait;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

use crate::limbs::{self, Limbs};

const MODULUS: Limbs = crate::constants::P;

/// An element of `Fp`, stored as four little-endian 64-bit limbs, always
/// reduced to `[0, p)`.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) Limbs);

impl FieldElement {
    /// Builds a field element from raw limbs without checking the range.
    /// Callers must ensure `limbs < p`.
    pub(crate) const fn from_limbs_unchecked(limbs: Limbs) -> Self {
        FieldElement(limbs)
    }

    /// The field modulus `p`.
    pub fn modulus() -> Limbs {
        MODULUS
    }

    /// The curve equation constant `b = 7` in `y^2 = x^3 + b`.
    pub fn curve_b() -> Self {
        FieldElement([crate::constants::B, 0, 0, 0])
    }

    /// Raises `self` to the power `(p + 1) / 4`, which is a square root of
    /// `self` whenever `self` is a quadratic residue (valid because
    /// `p ≡ 3 (mod 4)`). Returns `None` if the result does not square back
    /// to `self`.
    pub fn sqrt(&self) -> CtOption<Self> {
        // (p + 1) / 4 for secp256k1's p, precomputed as big-endian u64 words.
        const EXP: [u64; 4] = [
            0x3FFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_BFFF_FF0C,
        ];
        let candidate = self.pow(&EXP);
        let matches = candidate.square().ct_eq(self);
        CtOption::new(candidate, matches)
    }

    /// Montgomery's trick: inverts every element of `xs` in place with a
    /// single field inversion plus `3n` multiplications, instead of `n`
    /// independent inversions. Elements that are zero are left as zero.
    ///
    /// `scratch` must have the same length as `xs`; its contents on entry
    /// are irrelevant. Kept as a caller-supplied buffer rather than an
    /// internal allocation so this works without `alloc`.
    pub fn invert_batch(xs: &mut [FieldElement], scratch: &mut [FieldElement]) {
        debug_assert_eq!(xs.len(), scratch.len());
        if xs.is_empty() {
            return;
        }
        let mut acc = FieldElement::one();
        for (prefix, x) in scratch.iter_mut().zip(xs.iter()) {
            *prefix = acc;
            if !bool::from(x.is_zero()) {
                acc *= *x;
            }
        }
        let mut inv = acc.invert().unwrap_or_else(FieldElement::zero);
        for i in (0..xs.len()).rev() {
            if bool::from(xs[i].is_zero()) {
                continue;
            }
            let new_x = scratch[i] * inv;
            inv *= xs[i];
            xs[i] = new_x;
        }
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        FieldElement::zero()
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:?})", self.to_bytes())
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = limbs::to_be_bytes(&self.0);
        let b = limbs::to_be_bytes(&other.0);
        a.ct_eq(&b)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(out)
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        FieldElement(limbs::add_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        FieldElement(limbs::sub_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let wide = limbs::mul_wide(&self.0, &rhs.0);
        FieldElement(limbs::reduce_wide(&wide, &MODULUS))
    }
}

impl Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self {
        FieldElement(limbs::neg_mod(&self.0, &MODULUS))
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl FieldElementTrait for FieldElement {
    fn zero() -> Self {
        FieldElement([0, 0, 0, 0])
    }

    fn one() -> Self {
        FieldElement([1, 0, 0, 0])
    }

    fn is_zero(&self) -> Choice {
        self.0.iter().fold(Choice::from(1u8), |acc, limb| acc & limb.ct_eq(&0))
    }

    fn double(&self) -> Self {
        *self + *self
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn invert(&self) -> CtOption<Self> {
        // Fermat's little theorem: a^(p-2) == a^-1 (mod p).
        const EXP: [u64; 4] = [
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFE_FFFF_FC2D,
        ];
        let result = self.pow(&EXP);
        CtOption::new(result, !self.is_zero())
    }

    fn pow(&self, exp_be: &[u64]) -> Self {
        let mut result = FieldElement::one();
        for &word in exp_be {
            for bit in (0..64).rev() {
                result = result.square();
                if (word >> bit) & 1 == 1 {
                    result *= *self;
                }
            }
        }
        result
    }

    fn to_bytes(&self) -> [u8; 32] {
        limbs::to_be_bytes(&self.0)
    }

    fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let candidate = limbs::from_be_bytes(bytes);
        let in_range = Choice::from(limbs::lt(&candidate, &MODULUS) as u8);
        CtOption::new(FieldElement(candidate), in_range)
    }
}
