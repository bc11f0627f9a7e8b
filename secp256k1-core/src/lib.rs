#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Core traits and error types shared across the `secp256k1-*` crates.
//!
//! This crate has no secp256k1-specific logic of its own: it defines the
//! trait layer (`FieldElement`, `Scalar`, `PointAffine`, `PointProjective`)
//! that `secp256k1-curve` implements, plus the `Error`/`Result` types every
//! other crate in the workspace returns.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::{ConditionallySelectable, ConstantTimeEq, Choice, CtOption};
use zeroize::Zeroize;

/// A field element: the shared arithmetic surface for both the base field
/// `Fp` and the scalar field `Fn`.
pub trait FieldElement:
    Sized
    + Copy
    + Clone
    + fmt::Debug
    + Default
    + ConditionallySelectable
    + ConstantTimeEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Zeroize
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns 1 iff this element is zero.
    fn is_zero(&self) -> Choice;

    /// `self + self`.
    fn double(&self) -> Self;

    /// `self * self`.
    fn square(&self) -> Self;

    /// The multiplicative inverse, or `None` when `self` is zero.
    fn invert(&self) -> CtOption<Self>;

    /// Raises `self` to the power described by the big-endian limbs of
    /// `exp` (not constant-time in the exponent; used only with public
    /// fixed exponents such as `(p+1)/4`).
    fn pow(&self, exp: &[u64]) -> Self;

    /// Big-endian, 32-byte encoding.
    fn to_bytes(&self) -> [u8; 32];

    /// Decodes a big-endian 32-byte value, rejecting anything outside
    /// `[0, modulus)`.
    fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self>;
}

/// The scalar field `Fn` of the curve: private keys, nonces, signature
/// components.
pub trait Scalar: FieldElement + From<u64> {
    /// Bit length of the scalar field order.
    const BITS: usize;
}

/// A point in affine (x, y) coordinates, or the identity.
pub trait PointAffine: Sized + Copy + Clone + fmt::Debug + Default + ConstantTimeEq + Zeroize {
    /// The base-field element type used for coordinates.
    type Field: FieldElement;

    /// The x-coordinate. Meaningless when `is_identity()`.
    fn x(&self) -> Self::Field;

    /// The y-coordinate. Meaningless when `is_identity()`.
    fn y(&self) -> Self::Field;

    /// Returns 1 iff this is the point at infinity.
    fn is_identity(&self) -> Choice;
}

/// A point in Jacobian projective coordinates: `(X, Y, Z)` represents
/// affine `(X/Z^2, Y/Z^3)`.
pub trait PointProjective:
    Sized + Copy + Clone + fmt::Debug + Default + Add<Output = Self> + Sub<Output = Self> + Zeroize
{
    /// The base-field element type used for coordinates.
    type Field: FieldElement;

    /// The corresponding affine point type.
    type Affine: PointAffine<Field = Self::Field>;

    /// The point at infinity.
    fn identity() -> Self;

    /// Returns 1 iff this is the point at infinity (`Z == 0`).
    fn is_identity(&self) -> Choice;

    /// Converts to affine coordinates. Callers normalizing many points at
    /// once should prefer a batch conversion to amortize the field
    /// inversion (see `secp256k1_curve::jacobian::batch_to_affine`).
    fn to_affine(&self) -> Self::Affine;

    /// Lifts an affine point into Jacobian coordinates (`Z = 1`).
    fn from_affine(p: &Self::Affine) -> Self;
}

/// Errors produced by the `secp256k1-*` crates.
///
/// Entry points that can legitimately fail on attacker-controlled input
/// (parsing, signature verification) return this via `Result`; entry
/// points that can only fail on a programming error (invert of zero, a
/// GLV split that didn't fit in 128 bits) panic instead, per spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A byte string had the wrong length for the format it claimed.
    InvalidLength,
    /// A hex string was malformed or had the wrong length.
    InvalidHex,
    /// A field or scalar value was out of its valid range.
    InvalidEncoding,
    /// Point coordinates did not satisfy the curve equation.
    NotOnCurve,
    /// A scalar was zero or out of `[1, n)` where a nonzero value in
    /// range was required (private keys, signature components).
    InvalidScalar,
    /// A `(r, s)` pair failed a structural check (zero component,
    /// component out of range, non-canonical DER).
    InvalidSignature,
    /// `s > n/2` was rejected because strict (low-s-only) verification
    /// was requested.
    NonCanonicalSignature,
    /// A requested recovery id was not `0` or `1`. Recovery ids `2`/`3`
    /// (x >= n) are a documented limitation, not a bug: see DESIGN.md.
    InvalidRecoveryId,
    /// The HMAC-DRBG produced 1000 candidate values with none landing in
    /// `[1, n)`; this is cryptographically implausible and indicates a
    /// bug in the caller's injected primitives.
    DrbgExhausted,
    /// A synchronous entry point needed randomness but no source was
    /// available (no `getrandom` backend, or too many rejected samples).
    NoRandomSource,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidLength => "invalid byte length",
            Error::InvalidHex => "invalid hex string",
            Error::InvalidEncoding => "value out of range for its field",
            Error::NotOnCurve => "point is not on the curve",
            Error::InvalidScalar => "scalar is zero or out of range",
            Error::InvalidSignature => "malformed signature",
            Error::NonCanonicalSignature => "signature is not low-s canonical",
            Error::InvalidRecoveryId => "recovery id must be 0 or 1",
            Error::DrbgExhausted => "HMAC-DRBG exhausted 1000 candidates",
            Error::NoRandomSource => "no randomness source available",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The result type returned throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;
