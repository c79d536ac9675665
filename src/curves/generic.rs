//! Curve-agnostic fallbacks for curves with `a = -3`.
//!
//! Built only from limb arithmetic and the curve's multiply hook, so any
//! curve without a specialized path can use them through [`GenericOps`].

use super::curve::{Curve, CurveOps, ONE};
use crate::primitives::vli::{self, MAX_WORDS, Product, Vli};

/// Strategy that uses every generic fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericOps;

impl CurveOps for GenericOps {}

/// Reduces a double-width product modulo `p` by shift-and-subtract.
pub fn fast_reduce_generic(curve: &Curve, product: &Product) -> Vli {
    let mut result: Vli = [0; MAX_WORDS];
    vli::mmod(&mut result, product, curve.p_vli(), curve.num_words());

    result
}

/// Doubles `(x, y, z)` in place using the `a = -3` formula.
///
/// The point at infinity (`z = 0`) is left as is.
pub fn double_jacobian_generic(curve: &Curve, x: &mut Vli, y: &mut Vli, z: &mut Vli) {
    if bool::from(vli::is_zero(z, curve.num_words())) {
        return;
    }

    let y_squared = curve.mod_square(y);
    let mut t5 = curve.mod_mult(x, &y_squared);
    let y_fourth = curve.mod_square(&y_squared);

    let y_z = curve.mod_mult(y, z);
    let z_squared = curve.mod_square(z);

    // 3 (x - z²)(x + z²) / 2
    let x_plus = curve.mod_add(x, &z_squared);
    let z_doubled = curve.mod_add(&z_squared, &z_squared);
    let x_minus = curve.mod_sub(&x_plus, &z_doubled);
    let m = curve.mod_mult(&x_plus, &x_minus);
    let m2 = curve.mod_add(&m, &m);
    let m = curve.mod_half(&curve.mod_add(&m, &m2));

    let mut x3 = curve.mod_square(&m);
    x3 = curve.mod_sub(&x3, &t5);
    x3 = curve.mod_sub(&x3, &t5);

    t5 = curve.mod_sub(&t5, &x3);
    let m = curve.mod_mult(&m, &t5);
    let y3 = curve.mod_sub(&m, &y_fourth);

    *x = x3;
    *y = y3;
    *z = y_z;
}

/// Returns `a^((p + 1) / 4) mod p`, a square root of `a` when one exists.
///
/// Requires `p ≡ 3 (mod 4)`. The exponent is public, so branching on its
/// bits is fine.
pub fn mod_sqrt_generic(curve: &Curve, a: &Vli) -> Vli {
    let num_words = curve.num_words();

    let mut exponent: Vli = [0; MAX_WORDS];
    vli::add(&mut exponent, curve.p_vli(), &ONE, num_words);

    let mut result = ONE;

    for bit in (2..vli::num_bits(&exponent, num_words)).rev() {
        result = curve.mod_square(&result);

        if vli::test_bit(&exponent, bit) == 1 {
            result = curve.mod_mult(&result, a);
        }
    }

    result
}

/// Returns `x³ - 3x + b mod p`.
pub fn x_cubed_plus_b_generic(curve: &Curve, x: &Vli) -> Vli {
    let three = {
        let mut three: Vli = [0; MAX_WORDS];
        three[0] = 3;
        three
    };

    let x_squared = curve.mod_square(x);
    let shifted = curve.mod_sub(&x_squared, &three);
    let cubed = curve.mod_mult(&shifted, x);

    curve.mod_add(&cubed, curve.b_vli())
}
