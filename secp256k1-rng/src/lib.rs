#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Randomness for the `secp256k1-*` workspace: the OS CSPRNG used for key
//! generation, and RFC 6979 deterministic nonce derivation used for
//! signing.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod hmac_drbg;
pub mod os_rng;
pub mod rfc6979;

pub use os_rng::OsRng;
