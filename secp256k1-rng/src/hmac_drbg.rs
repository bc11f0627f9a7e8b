//! A minimal HMAC-DRBG engine (NIST SP 800-90A, section 10.1.2, restricted
//! to the subset RFC 6979 actually uses: instantiate once from a fixed
//! seed, then draw arbitrarily many output blocks with no reseed).
//!
//! Generic over the digest `D` so the same state machine serves SHA-256
//! (the curve's own nonce generation) and any other digest a caller might
//! want for a non-default hash function. Built on [`hmac::SimpleHmac`],
//! which (unlike `hmac::Hmac`) only requires `D: Digest + BlockSizeUser`
//! rather than the full block-buffer core API.

use digest::core_api::BlockSizeUser;
use digest::{Digest, Output};
use hmac::{Mac, SimpleHmac};

type HmacOutput<D> = Output<D>;

/// HMAC-DRBG internal state: the 32-byte (or digest-width) `V` and `K`
/// registers from RFC 6979 section 3.2 steps (a)-(f).
pub struct HmacDrbg<D: Digest + Clone + BlockSizeUser> {
    k: HmacOutput<D>,
    v: HmacOutput<D>,
}

impl<D: Digest + Clone + BlockSizeUser> HmacDrbg<D> {
    /// Instantiates the generator from `seed_material`, following RFC 6979
    /// section 3.2 steps (b)-(f):
    /// `K = 0x00.. ; V = 0x01.. ; K = HMAC_K(V || 0x00 || seed) ; V =
    /// HMAC_K(V) ; K = HMAC_K(V || 0x01 || seed) ; V = HMAC_K(V)`.
    pub fn new(seed_material: &[u8]) -> Self {
        let mut k = HmacOutput::<D>::default();
        let mut v = HmacOutput::<D>::default();
        for b in v.iter_mut() {
            *b = 0x01;
        }

        k = Self::hmac(&k, &[&v, &[0x00], seed_material]);
        v = Self::hmac(&k, &[&v]);
        k = Self::hmac(&k, &[&v, &[0x01], seed_material]);
        v = Self::hmac(&k, &[&v]);

        HmacDrbg { k, v }
    }

    fn hmac(key: &[u8], parts: &[&[u8]]) -> HmacOutput<D> {
        let mut mac = SimpleHmac::<D>::new_from_slice(key).expect("HMAC accepts any key length");
        for part in parts {
            mac.update(part);
        }
        mac.finalize().into_bytes()
    }

    /// Produces the next output block (RFC 6979 section 3.2 step (h),
    /// first iteration of the inner loop: `T = T || HMAC_K(V)`; since
    /// every digest this crate uses has output length >= 32 bytes, one
    /// block is always enough to fill a candidate).
    pub fn generate_block(&mut self) -> HmacOutput<D> {
        self.v = Self::hmac(&self.k, &[&self.v]);
        self.v.clone()
    }

    /// Updates `K` and `V` with no additional seed material (RFC 6979
    /// section 3.2 step (h), "K = HMAC_K(V || 0x00)", taken after a
    /// rejected candidate, before drawing the next one).
    pub fn reseed_without_material(&mut self) {
        self.k = Self::hmac(&self.k, &[&self.v, &[0x00]]);
        self.v = Self::hmac(&self.k, &[&self.v]);
    }
}

impl<D: Digest + Clone + BlockSizeUser> Drop for HmacDrbg<D> {
    fn drop(&mut self) {
        for b in self.k.iter_mut() {
            *b = 0;
        }
        for b in self.v.iter_mut() {
            *b = 0;
        }
    }
}
