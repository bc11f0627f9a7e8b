#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Wire encodings for secp256k1 signatures: the DER codec for ECDSA
//! signatures and a hex convenience layer shared by the rest of the
//! workspace.
//!
//! SEC1 point encoding (compressed/uncompressed) lives on
//! `secp256k1_curve::AffinePoint` directly, since it's core arithmetic
//! surface rather than a wire-format concern layered on top of it.

#[cfg(feature = "std")]
extern crate std;

pub mod der;
pub mod hex;

pub use der::DerSignature;
