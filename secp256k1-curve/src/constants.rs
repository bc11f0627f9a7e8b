//! Fixed curve parameters: the field modulus, the curve order, the
//! generator, and the GLV endomorphism constants.
//!
//! All of these are standard, publicly known secp256k1 parameters; none of
//! them are derived at runtime.

use crate::limbs::Limbs;

/// The base field modulus `p = 2^256 - 2^32 - 977`.
pub const P: Limbs = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// The curve order `n`.
pub const N: Limbs = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// Generator x-coordinate.
pub const GX: Limbs = [
    0x59F2_815B_16F8_1798,
    0x029B_FCDB_2DCE_28D9,
    0x55A0_6295_CE87_0B07,
    0x79BE_667E_F9DC_BBAC,
];

/// Generator y-coordinate.
pub const GY: Limbs = [
    0x9C47_D08F_FB10_D4B8,
    0xFD17_B448_A685_5419,
    0x5DA4_FBFC_0E11_08A8,
    0x483A_DA77_26A3_C465,
];

/// Curve equation coefficient `b` in `y^2 = x^3 + b` (secp256k1 has `a = 0`).
pub const B: u64 = 7;

/// GLV endomorphism constant `beta`, a primitive cube root of unity in `Fp`
/// such that `(x, y) -> (beta * x, y)` equals scalar multiplication by
/// [`LAMBDA`].
pub const BETA: Limbs = [
    0xC139_6C28_7195_01EE,
    0x9CF0_4975_12F5_8995,
    0x6E64_479E_AC34_34E9,
    0x7AE9_6A2B_657C_0710,
];

/// GLV endomorphism constant `lambda`, a primitive cube root of unity in
/// `Fn`. Not used directly by the scalar split (which only needs the
/// lattice basis below); kept for documentation and tests.
pub const LAMBDA: Limbs = [
    0xDF02_967C_1B23_BD72,
    0x122E_22EA_2081_6678,
    0xA526_1C02_8812_645A,
    0x5363_AD4C_C05C_30E0,
];

/// GLV short lattice basis vectors `(a1, b1), (a2, b2)` satisfying
/// `a_i + b_i * lambda == 0 (mod n)`, used to split a scalar `k` into two
/// ~128-bit halves `k1, k2` with `k == k1 + k2 * lambda (mod n)`.
///
/// `b1` is negative; `B1_IS_NEGATIVE` records its sign since [`Limbs`]
/// cannot represent it directly.
pub const A1: Limbs = [0xE86C_90E4_9284_EB15, 0x3086_D221_A7D4_6BCD, 0, 0];
/// Absolute value of `b1`.
pub const B1_ABS: Limbs = [0x6F54_7FA9_0ABF_E4C3, 0xE443_7ED6_010E_8828, 0, 0];
/// `b1` is negative.
pub const B1_IS_NEGATIVE: bool = true;
pub const A2: Limbs = [0x57C1_108D_9D44_CFD8, 0x14CA_50F7_A8E2_F3F6, 1, 0];
pub const B2: Limbs = [0xE86C_90E4_9284_EB15, 0x3086_D221_A7D4_6BCD, 0, 0];
