#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! secp256k1 field, scalar, and point arithmetic.
//!
//! This crate implements the Koblitz curve `y^2 = x^3 + 7` over the
//! 256-bit prime field used by Bitcoin and related systems: field and
//! scalar arithmetic (`field`, `scalar`), affine and Jacobian point types
//! (`affine`, `jacobian`), and constant-pattern scalar multiplication with
//! GLV endomorphism splitting (`scalar_mul`). It does not know about
//! signature schemes or encodings; those live in `secp256k1-signature`
//! and `secp256k1-encoding`.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
#[allow(unused_extern_crates)]
extern crate alloc;

mod limbs;

pub mod constants;
pub mod field;
pub mod scalar;
pub mod affine;
pub mod jacobian;
pub mod scalar_mul;

pub use affine::AffinePoint;
pub use field::FieldElement;
pub use jacobian::JacobianPoint;
pub use scalar::Scalar;
