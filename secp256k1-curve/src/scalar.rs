//! The scalar field `Fn`: private keys, nonces, and signature components.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use secp256k1_core::FieldElement as FieldElementTrait;
use secp256k1_core::Scalar as ScalarTrait;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

use crate::limbs::{self, Limbs};

const MODULUS: Limbs = crate::constants::N;

/// An element of `Fn`, stored as four little-endian 64-bit limbs, always
/// reduced to `[0, n)`.
#[derive(Clone, Copy)]
pub struct Scalar(pub(crate) Limbs);

impl Scalar {
    pub(crate) const fn from_limbs_unchecked(limbs: Limbs) -> Self {
        Scalar(limbs)
    }

    pub(crate) fn limbs(&self) -> &Limbs {
        &self.0
    }

    /// The order `n`.
    pub fn modulus() -> Limbs {
        MODULUS
    }

    /// Interprets a big-endian byte string longer than 32 bytes as an
    /// integer reduced modulo `n`, per RFC 6979's `bits2int`/`bits2octets`
    /// and BIP-340's hash-to-scalar conversions. Only the leading 32 bytes
    /// worth of bits matter for this curve's bit length.
    pub fn from_bytes_reduced(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 32];
        let take = bytes.len().min(32);
        buf[..take].copy_from_slice(&bytes[..take]);
        let wide = limbs::from_be_bytes(&buf);
        // `wide < 2^256 < 2n`, so a single conditional subtraction suffices.
        if limbs::lt(&wide, &MODULUS) {
            Scalar(wide)
        } else {
            Scalar(limbs::sub(&wide, &MODULUS).0)
        }
    }

    /// Returns `true` iff this scalar is greater than `n/2`, i.e. it is the
    /// "high-s" half rejected by canonical (low-s) ECDSA signatures.
    pub fn is_high(&self) -> bool {
        const HALF_N: Limbs = [
            0xDFE9_2F46_681B_20A0,
            0x5D57_6E73_57A4_501D,
            0xFFFF_FFFF_FFFF_FFFF,
            0x7FFF_FFFF_FFFF_FFFF,
        ];
        limbs::lt(&HALF_N, &self.0)
    }

    /// `n - self`.
    pub fn negate(&self) -> Self {
        Scalar(limbs::neg_mod(&self.0, &MODULUS))
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::zero()
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({:?})", self.to_bytes())
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = limbs::to_be_bytes(&self.0);
        let b = limbs::to_be_bytes(&other.0);
        a.ct_eq(&b)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar(out)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Add for Scalar {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Scalar(limbs::add_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl Sub for Scalar {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Scalar(limbs::sub_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl Mul for Scalar {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let wide = limbs::mul_wide(&self.0, &rhs.0);
        Scalar(limbs::reduce_wide(&wide, &MODULUS))
    }
}

impl Neg for Scalar {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar([value, 0, 0, 0])
    }
}

impl FieldElementTrait for Scalar {
    fn zero() -> Self {
        Scalar([0, 0, 0, 0])
    }

    fn one() -> Self {
        Scalar([1, 0, 0, 0])
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
        // Fermat's little theorem: a^(n-2) == a^-1 (mod n).
        const EXP: [u64; 4] = [
            0xFFFF_FFFF_FFFF_FFFF,
            0xFFFF_FFFF_FFFF_FFFE,
            0xBAAE_DCE6_AF48_A03B,
            0xBFD2_5E8C_D036_413F,
        ];
        let result = self.pow(&EXP);
        CtOption::new(result, !self.is_zero())
    }

    fn pow(&self, exp_be: &[u64]) -> Self {
        let mut result = Scalar::one();
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
        CtOption::new(Scalar(candidate), in_range)
    }
}

impl ScalarTrait for Scalar {
    const BITS: usize = 256;
}
