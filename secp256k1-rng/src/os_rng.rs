//! A thin wrapper around the operating system's CSPRNG, used for key
//! generation and as the default entropy source for ECDSA's RFC 6979
//! `extra_entropy` input.

use core::fmt;
use rand_core::OsRng as RandOsRng;
use rand_core::{CryptoRng, Error, RngCore};

/// The operating system's cryptographically secure random number
/// generator, via `rand_core`/`getrandom`.
pub struct OsRng;

impl OsRng {
    /// Creates a new handle to the OS RNG. Stateless: cheap to create on
    /// every call.
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for OsRng {
    fn next_u32(&mut self) -> u32 {
        RandOsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        RandOsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        RandOsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        RandOsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for OsRng {}

impl fmt::Debug for OsRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsRng").finish()
    }
}

/// Draws a uniformly random scalar in `[1, n)` by rejection sampling
/// 32-byte OS-random candidates against the curve order (a close-to-full
/// 256-bit modulus, so rejections are rare).
///
/// Returns [`secp256k1_core::Error::NoRandomSource`] if 1000 samples in a
/// row land outside range, which would indicate a broken RNG rather than
/// bad luck.
pub fn random_scalar() -> secp256k1_core::Result<secp256k1_curve::Scalar> {
    use secp256k1_core::FieldElement as _;

    let mut rng = OsRng::new();
    for _ in 0..1000 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let candidate: Option<secp256k1_curve::Scalar> = secp256k1_curve::Scalar::from_bytes(&bytes).into();
        if let Some(k) = candidate {
            if !bool::from(k.is_zero()) {
                return Ok(k);
            }
        }
    }
    Err(secp256k1_core::Error::NoRandomSource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_nonzero_bytes() {
        let mut rng = OsRng::new();
        let mut buf = [0u8; 32];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn random_scalar_in_range() {
        use secp256k1_core::FieldElement;
        let k = random_scalar().unwrap();
        assert!(!bool::from(k.is_zero()));
    }
}
