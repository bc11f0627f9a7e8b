//! Little-endian 4x64-limb integer helpers shared by [`crate::field`] and
//! [`crate::scalar`].
//!
//! Both moduli (the base field prime `p` and the curve order `n`) are
//! plain 256-bit values, so both arithmetic types share the same
//! add/subtract/compare machinery and the same wide-multiply-then-reduce
//! shape. Reduction is ordinary binary long division rather than
//! Montgomery or a special-form folding trick: it is a few times slower
//! but its correctness doesn't depend on a hand-derived magic constant
//! (see DESIGN.md).

pub type Limbs = [u64; 4];
pub type WideLimbs = [u64; 8];

/// `a < b`, comparing from the most significant limb down.
pub fn lt(a: &Limbs, b: &Limbs) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

/// `a >= b`.
pub fn ge(a: &Limbs, b: &Limbs) -> bool {
    !lt(a, b)
}

/// `a + b`, returning the result and the carry-out bit.
pub fn add(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let mut out = [0u64; 4];
    let mut carry = 0u64;
    for i in 0..4 {
        let (s1, c1) = a[i].overflowing_add(b[i]);
        let (s2, c2) = s1.overflowing_add(carry);
        out[i] = s2;
        carry = (c1 as u64) | (c2 as u64);
    }
    (out, carry)
}

/// `a - b`, returning the result and the borrow-out bit (1 if `a < b`).
pub fn sub(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let mut out = [0u64; 4];
    let mut borrow = 0u64;
    for i in 0..4 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        out[i] = d2;
        borrow = (b1 as u64) | (b2 as u64);
    }
    (out, borrow)
}

/// Adds `b` to `a` modulo `m`, assuming both inputs are already `< m`.
pub fn add_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (sum, carry) = add(a, b);
    let (reduced, borrow) = sub(&sum, m);
    if carry == 1 || borrow == 0 {
        reduced
    } else {
        sum
    }
}

/// Subtracts `b` from `a` modulo `m`, assuming both inputs are already `< m`.
pub fn sub_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (diff, borrow) = sub(a, b);
    if borrow == 1 {
        add(&diff, m).0
    } else {
        diff
    }
}

/// `m - a`, or zero if `a` is zero (negation modulo `m`).
pub fn neg_mod(a: &Limbs, m: &Limbs) -> Limbs {
    if a == &[0u64; 4] {
        [0u64; 4]
    } else {
        sub(m, a).0
    }
}

/// Full 256x256 -> 512-bit schoolbook multiplication.
pub fn mul_wide(a: &Limbs, b: &Limbs) -> WideLimbs {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let prod = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = prod as u64;
            carry = prod >> 64;
        }
        t[i + 4] = carry as u64;
    }
    t
}

/// Reduces a 512-bit value modulo `m` (a 256-bit modulus) via binary long
/// division: shift the running remainder left one bit at a time, pulling
/// in the next bit of `value`, and subtract `m` whenever the remainder
/// reaches or exceeds it. `O(512)` limb-compare/subtracts; not
/// performance-sensitive code, used only to define `mul`/`square`.
pub fn reduce_wide(value: &WideLimbs, m: &Limbs) -> Limbs {
    let mut rem = [0u64; 4];
    for bit in (0..512).rev() {
        // rem <<= 1
        let mut carry = 0u64;
        for limb in rem.iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = new_carry;
        }
        // bring in bit `bit` of `value`
        let limb_idx = bit / 64;
        let bit_idx = bit % 64;
        let in_bit = (value[limb_idx] >> bit_idx) & 1;
        rem[0] |= in_bit;

        if ge(&rem, m) {
            rem = sub(&rem, m).0;
        }
    }
    rem
}

/// Divides a 512-bit value by a 256-bit divisor via binary long division,
/// returning `(quotient, remainder)`. The quotient is truncated to 256
/// bits: callers (the GLV lattice split) only ever divide a product of two
/// sub-256-bit values by the curve order, where the true quotient is known
/// to fit comfortably within 256 bits, so nothing is lost.
pub fn divmod_wide(value: &WideLimbs, divisor: &Limbs) -> (Limbs, Limbs) {
    let mut rem = [0u64; 4];
    let mut quot = [0u64; 4];
    for bit in (0..512).rev() {
        let mut carry = 0u64;
        for limb in rem.iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = new_carry;
        }
        let limb_idx = bit / 64;
        let bit_idx = bit % 64;
        let in_bit = (value[limb_idx] >> bit_idx) & 1;
        rem[0] |= in_bit;

        let mut qcarry = 0u64;
        for limb in quot.iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | qcarry;
            qcarry = new_carry;
        }
        if ge(&rem, divisor) {
            rem = sub(&rem, divisor).0;
            quot[0] |= 1;
        }
    }
    (quot, rem)
}

/// Rounds `value / divisor` to the nearest integer (ties away from zero),
/// for the GLV lattice split's `round(b_i * k / n)` terms.
pub fn round_div_wide(value: &WideLimbs, divisor: &Limbs) -> Limbs {
    let (quot, rem) = divmod_wide(value, divisor);
    let (twice_rem, carry) = add(&rem, &rem);
    if carry == 1 || ge(&twice_rem, divisor) {
        add(&quot, &[1, 0, 0, 0]).0
    } else {
        quot
    }
}

/// Right-shifts a plain (non-modular) big integer by one bit.
pub fn shr1(a: &Limbs) -> Limbs {
    let mut out = [0u64; 4];
    let mut carry = 0u64;
    for i in (0..4).rev() {
        out[i] = (a[i] >> 1) | (carry << 63);
        carry = a[i] & 1;
    }
    out
}

/// Converts a big-endian 32-byte buffer to little-endian limbs, without
/// checking range.
pub fn from_be_bytes(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = [0u64; 4];
    for i in 0..4 {
        let mut limb = 0u64;
        for j in 0..8 {
            limb = (limb << 8) | bytes[i * 8 + j] as u64;
        }
        limbs[3 - i] = limb;
    }
    limbs
}

/// Converts little-endian limbs to a big-endian 32-byte buffer.
pub fn to_be_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for i in 0..4 {
        let limb = limbs[3 - i];
        bytes[i * 8..i * 8 + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}
