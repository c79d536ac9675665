//! secp256k1: `y² = x³ + 7` over `p = 2²⁵⁶ - 2³² - 977`.
//!
//! The prime is `2²⁵⁶ - c` with a 33-bit `c`, so a 512-bit product
//! reduces by folding its high half back in twice (`2²⁵⁶ ≡ c mod p`)
//! instead of a general long division. With `a = 0` the doubling formula
//! also loses a multiplication.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::curve::{Curve, CurveConstants, CurveOps};
use crate::primitives::vli::{self, MAX_WORDS, Product, Vli, WORD_BITS, Word};

const NUM_WORDS: usize = 4;

/// `2²⁵⁶ mod p`.
const OMEGA: u128 = 0x1_0000_03D1;

pub(crate) const CONSTANTS: CurveConstants = CurveConstants {
    name: "secp256k1",
    num_words: NUM_WORDS,
    p: [
        0xFFFF_FFFE_FFFF_FC2F,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
    ],
    n: [
        0xBFD2_5E8C_D036_4141,
        0xBAAE_DCE6_AF48_A03B,
        0xFFFF_FFFF_FFFF_FFFE,
        0xFFFF_FFFF_FFFF_FFFF,
    ],
    b: [7, 0, 0, 0],
    gx: [
        0x59F2_815B_16F8_1798,
        0x029B_FCDB_2DCE_28D9,
        0x55A0_6295_CE87_0B07,
        0x79BE_667E_F9DC_BBAC,
    ],
    gy: [
        0x9C47_D08F_FB10_D4B8,
        0xFD17_B448_A685_5419,
        0x5DA4_FBFC_0E11_08A8,
        0x483A_DA77_26A3_C465,
    ],
};

/// Specialized arithmetic for secp256k1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Ops;

/// `result = right * OMEGA`, one limb wider than `right`.
fn omega_mult(result: &mut [Word; NUM_WORDS + 1], right: &[Word]) {
    let mut carry: u128 = 0;

    for (out, &word) in result.iter_mut().zip(&right[..NUM_WORDS]) {
        let product = (word as u128) * OMEGA + carry;
        *out = product as Word;
        carry = product >> WORD_BITS;
    }

    result[NUM_WORDS] = carry as Word;
}

impl CurveOps for Secp256k1Ops {
    fn fast_reduce(&self, curve: &Curve, product: &Product) -> Vli {
        let mut high = [0; NUM_WORDS + 1];
        omega_mult(&mut high, &product[NUM_WORDS..]);

        let mut result: Vli = [0; MAX_WORDS];
        let mut carry = vli::add(&mut result, product, &high, NUM_WORDS);

        // The first fold leaves at most 34 bits above 2²⁵⁶.
        let mut folded = [0; NUM_WORDS + 1];
        omega_mult(&mut folded, &[high[NUM_WORDS], 0, 0, 0]);

        let current = result;
        carry += vli::add(&mut result, &current, &folded, NUM_WORDS);

        // At most three subtractions bring the value below p.
        for _ in 0..3 {
            let mut reduced: Vli = [0; MAX_WORDS];
            let borrow = vli::sub(&mut reduced, &result, curve.p_vli(), NUM_WORDS);

            let take = !carry.ct_eq(&0) | Choice::from((borrow ^ 1) as u8);
            vli::assign_if(&mut result, &reduced, NUM_WORDS, take);
            carry -= Word::conditional_select(&0, &borrow, take);
        }

        result
    }

    fn x_cubed_plus_b(&self, curve: &Curve, x: &Vli) -> Vli {
        let x_squared = curve.mod_square(x);
        let cubed = curve.mod_mult(&x_squared, x);

        curve.mod_add(&cubed, curve.b_vli())
    }

    fn double_jacobian(&self, curve: &Curve, x: &mut Vli, y: &mut Vli, z: &mut Vli) {
        if bool::from(vli::is_zero(z, NUM_WORDS)) {
            return;
        }

        let y_squared = curve.mod_square(y);
        let mut s = curve.mod_mult(x, &y_squared);
        let x_squared = curve.mod_square(x);
        let y_fourth = curve.mod_square(&y_squared);
        let z3 = curve.mod_mult(y, z);

        // m = 3x² / 2
        let doubled = curve.mod_add(&x_squared, &x_squared);
        let m = curve.mod_half(&curve.mod_add(&doubled, &x_squared));

        let mut x3 = curve.mod_square(&m);
        x3 = curve.mod_sub(&x3, &s);
        x3 = curve.mod_sub(&x3, &s);

        s = curve.mod_sub(&s, &x3);
        let y3 = curve.mod_sub(&curve.mod_mult(&m, &s), &y_fourth);

        *x = x3;
        *y = y3;
        *z = z3;
    }
}
