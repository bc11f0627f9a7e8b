#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Signature schemes over secp256k1:
//!
//! - [`ecdsa`]: ECDSA with RFC 6979 deterministic nonces, low-s
//!   canonicalization, DER and compact encodings, and public key recovery.
//! - [`schnorr`]: BIP-340 Schnorr signatures over x-only public keys.
//! - [`ecdh`]: Diffie-Hellman shared secret derivation.
//!
//! All three operate on the concrete `secp256k1_curve` types rather than a
//! generic curve trait, since this workspace targets a single curve.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod ecdh;
pub mod ecdsa;
pub mod schnorr;
