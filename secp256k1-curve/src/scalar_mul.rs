//! Scalar multiplication: GLV endomorphism splitting plus windowed
//! non-adjacent form (wNAF), with a small precomputed odd-multiples table
//! reused across calls for the generator.
//!
//! Two entry points, for two different trust levels:
//!
//! - [`scalar_mul`]/[`scalar_mul_generator`] follow the same fixed shape
//!   regardless of the scalar's value — one table scan and one doubling
//!   per digit, with zero digits still running a full (discarded) addition
//!   — so that the number and kind of field operations performed don't
//!   depend on the secret scalar's bits. Table *selection* scans every
//!   entry and uses [`subtle::ConditionallySelectable`] rather than
//!   indexing, for the same reason. Use these for secret scalars: private
//!   keys and nonces.
//! - [`multiply_unsafe`]/[`multiply_unsafe_generator`] are a plain
//!   left-to-right double-and-add, branching directly on each bit. Faster,
//!   but the number of additions performed depends on the scalar's
//!   Hamming weight — safe only where the scalar (and the point, for
//!   `multiply_unsafe`) are already public, e.g. signature verification
//!   and public key recovery.

#[cfg(feature = "std")]
use std::sync::OnceLock;

use secp256k1_core::{FieldElement as _, PointProjective};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::affine::AffinePoint;
use crate::constants;
use crate::jacobian::JacobianPoint;
use crate::limbs::{self, Limbs};
use crate::scalar::Scalar;

const GENERIC_WINDOW: usize = 4;
const GENERIC_TABLE_LEN: usize = 4; // odd multiples 1, 3, 5, 7
const GENERATOR_WINDOW: usize = 8;
const GENERATOR_TABLE_LEN: usize = 64; // odd multiples 1, 3, .., 127

const MAX_WNAF_DIGITS: usize = 130;

/// A GLV decomposition of a scalar `k` into `k = s1 * k1 + s2 * k2 * lambda
/// (mod n)`, where `k1`, `k2` are each at most ~128 bits and `s1`, `s2`
/// record their signs.
struct GlvSplit {
    k1_neg: bool,
    k1: Limbs,
    k2_neg: bool,
    k2: Limbs,
}

/// Splits `k` using the fixed lattice basis `(a1, b1), (a2, b2)`.
///
/// `c1 = round(b2 * k / n)`, `c2 = round(-b1 * k / n)`; `k1 = k - c1*a1 -
/// c2*a2`, `k2 = -c1*b1 - c2*b2`. Both results are computed modulo `n`
/// (via [`Scalar`] arithmetic) and then mapped to a balanced
/// representative in `(-n/2, n/2]`; since the true `k1`, `k2` are known to
/// be far smaller than `n/2`, that balanced form recovers their exact
/// sign and magnitude.
fn glv_split(k: &Scalar) -> GlvSplit {
    let k_limbs = *k.limbs();

    let b2_k = limbs::mul_wide(&constants::B2, &k_limbs);
    let c1 = limbs::round_div_wide(&b2_k, &constants::N);

    let b1abs_k = limbs::mul_wide(&constants::B1_ABS, &k_limbs);
    let c2 = limbs::round_div_wide(&b1abs_k, &constants::N);

    let c1_s = Scalar::from_limbs_unchecked(c1);
    let c2_s = Scalar::from_limbs_unchecked(c2);
    let a1_s = Scalar::from_limbs_unchecked(constants::A1);
    let a2_s = Scalar::from_limbs_unchecked(constants::A2);
    let b1abs_s = Scalar::from_limbs_unchecked(constants::B1_ABS);
    let b2_s = Scalar::from_limbs_unchecked(constants::B2);

    let k1_mod_n = *k - c1_s * a1_s - c2_s * a2_s;
    // b1 = -B1_ABS, so -c1*b1 = c1*B1_ABS.
    let k2_mod_n = c1_s * b1abs_s - c2_s * b2_s;

    let (k1_neg, k1) = balanced(k1_mod_n);
    let (k2_neg, k2) = balanced(k2_mod_n);

    GlvSplit { k1_neg, k1, k2_neg, k2 }
}

/// Maps a value modulo `n` to a `(sign, magnitude)` pair, assuming the true
/// signed value has magnitude well under `n/2`.
fn balanced(value: Scalar) -> (bool, Limbs) {
    if value.is_high() {
        (true, *value.negate().limbs())
    } else {
        (false, *value.limbs())
    }
}

/// Computes the width-`w` NAF digits of a nonnegative big integer,
/// most-significant digit last. Returns the digit count.
fn wnaf(value: &Limbs, w: usize) -> ([i32; MAX_WNAF_DIGITS], usize) {
    let mut digits = [0i32; MAX_WNAF_DIGITS];
    let mut k = *value;
    let window_mask = (1u64 << w) - 1;
    let half = 1i32 << (w - 1);
    let mut i = 0;
    while k != [0, 0, 0, 0] {
        if k[0] & 1 == 1 {
            let mut d = (k[0] & window_mask) as i32;
            if d >= half {
                d -= 1i32 << w;
            }
            digits[i] = d;
            if d >= 0 {
                k = limbs::sub(&k, &[d as u64, 0, 0, 0]).0;
            } else {
                k = limbs::add(&k, &[(-d) as u64, 0, 0, 0]).0;
            }
        }
        k = limbs::shr1(&k);
        i += 1;
    }
    (digits, i)
}

/// Builds the table of odd multiples `[1*base, 3*base, .., (2N-1)*base]`.
fn build_table<const N: usize>(base: JacobianPoint) -> [JacobianPoint; N] {
    let double = base.double();
    let mut table = [base; N];
    for i in 1..N {
        table[i] = table[i - 1].add_points(&double);
    }
    table
}

/// Constant-shape selection: scans every table entry and conditionally
/// selects the one matching `|digit|`, then negates it if `digit < 0`.
/// When `digit == 0`, still returns a real (non-identity) table entry —
/// `table[0]`, the dummy pseudo-precompute — plus a flag so the caller
/// knows to discard whatever it does with the result. Returning the
/// identity here would let `add_points` take its cheap early-return path
/// on a zero digit, leaking the digit's zero-ness through timing.
fn select(table: &[JacobianPoint], digit: i32) -> (JacobianPoint, Choice) {
    let is_zero = Choice::from((digit == 0) as u8);
    let abs = digit.unsigned_abs();
    let want_index = if abs == 0 { 0 } else { (abs - 1) / 2 };
    let mut chosen = table[0];
    for (i, entry) in table.iter().enumerate() {
        let matches = Choice::from((i as u32 == want_index) as u8);
        chosen = JacobianPoint::conditional_select(&chosen, entry, matches);
    }
    let negated = chosen.negate();
    let is_negative = Choice::from((digit < 0) as u8);
    let term = JacobianPoint::conditional_select(&chosen, &negated, is_negative);
    (term, is_zero)
}

/// The core double-and-add loop: one doubling and one table-selected
/// addition per digit, every window. A zero digit still selects a real
/// table entry and runs the full addition formula (the "fake"
/// accumulation spec.md calls for); only the post-addition `conditional_select`
/// decides whether that addition's result is kept or discarded, so the
/// fixed add-per-window shape never depends on the scalar's digits.
fn wnaf_mul(table: &[JacobianPoint], digits: &[i32], len: usize) -> JacobianPoint {
    let mut acc = JacobianPoint::identity();
    for i in (0..len).rev() {
        acc = acc.double();
        let (term, is_zero) = select(table, digits[i]);
        let with_add = acc.add_points(&term);
        acc = JacobianPoint::conditional_select(&with_add, &acc, is_zero);
    }
    acc
}

/// Multiplies an arbitrary point by a scalar, combining the GLV split with
/// a small (window 4) wNAF table rebuilt on every call.
pub fn scalar_mul(point: &AffinePoint, k: &Scalar) -> JacobianPoint {
    let split = glv_split(k);
    let base = JacobianPoint::from_affine(point);
    let base_endo = JacobianPoint::from_affine(&point.endomorphism());

    let table1: [JacobianPoint; GENERIC_TABLE_LEN] = build_table(base);
    let table2: [JacobianPoint; GENERIC_TABLE_LEN] = build_table(base_endo);

    let (digits1, len1) = wnaf(&split.k1, GENERIC_WINDOW);
    let (digits2, len2) = wnaf(&split.k2, GENERIC_WINDOW);

    let mut r1 = wnaf_mul(&table1, &digits1, len1);
    let mut r2 = wnaf_mul(&table2, &digits2, len2);
    if split.k1_neg {
        r1 = r1.negate();
    }
    if split.k2_neg {
        r2 = r2.negate();
    }
    r1.add_points(&r2)
}

struct GeneratorTables {
    table: [JacobianPoint; GENERATOR_TABLE_LEN],
    table_endo: [JacobianPoint; GENERATOR_TABLE_LEN],
}

impl GeneratorTables {
    fn build() -> Self {
        let g = JacobianPoint::from_affine(&AffinePoint::generator());
        let g_endo = JacobianPoint::from_affine(&AffinePoint::generator().endomorphism());
        GeneratorTables { table: build_table(g), table_endo: build_table(g_endo) }
    }
}

#[cfg(feature = "std")]
static GENERATOR_TABLES: OnceLock<GeneratorTables> = OnceLock::new();

#[cfg(feature = "std")]
fn with_generator_tables<R>(f: impl FnOnce(&GeneratorTables) -> R) -> R {
    f(GENERATOR_TABLES.get_or_init(GeneratorTables::build))
}

/// Without `std` there is no cache: every call rebuilds the window-8
/// table from scratch. `secp256k1-curve` is expected to be built with
/// `std` (or at least `alloc`, with a caller-supplied cache) in any
/// performance-sensitive setting.
#[cfg(not(feature = "std"))]
fn with_generator_tables<R>(f: impl FnOnce(&GeneratorTables) -> R) -> R {
    f(&GeneratorTables::build())
}

/// Multiplies the generator by a scalar, using a cached window-8
/// precomputed table (initialized on first use, reused after that).
pub fn scalar_mul_generator(k: &Scalar) -> JacobianPoint {
    let split = glv_split(k);

    let (digits1, len1) = wnaf(&split.k1, GENERATOR_WINDOW);
    let (digits2, len2) = wnaf(&split.k2, GENERATOR_WINDOW);

    with_generator_tables(|tables| {
        let mut r1 = wnaf_mul(&tables.table, &digits1, len1);
        let mut r2 = wnaf_mul(&tables.table_endo, &digits2, len2);
        if split.k1_neg {
            r1 = r1.negate();
        }
        if split.k2_neg {
            r2 = r2.negate();
        }
        r1.add_points(&r2)
    })
}

/// Plain left-to-right double-and-add: one doubling per bit, with an
/// addition only on set bits. Variable-time in `k`'s bits and no GLV
/// split — for public-input multiplication only (signature verification,
/// key recovery), never on a secret scalar.
pub fn multiply_unsafe(point: &AffinePoint, k: &Scalar) -> JacobianPoint {
    let base = JacobianPoint::from_affine(point);
    let bytes = k.to_bytes();
    let mut acc = JacobianPoint::identity();
    for byte in bytes {
        for bit in (0..8).rev() {
            acc = acc.double();
            if (byte >> bit) & 1 == 1 {
                acc = acc.add_points(&base);
            }
        }
    }
    acc
}

/// [`multiply_unsafe`] specialized to the generator, for the `u1*G` half
/// of ECDSA verification and similar public-input combinations.
pub fn multiply_unsafe_generator(k: &Scalar) -> JacobianPoint {
    multiply_unsafe(&AffinePoint::generator(), k)
}
