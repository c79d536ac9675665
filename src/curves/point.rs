//! Point arithmetic: co-Z Jacobian formulas and the scalar ladder.
//!
//! Jacobian points `(X, Y, Z)` only exist inside this module. Co-Z
//! formulas operate on two points that share the same `Z`. Each formula
//! returns the factor it scaled `Z` by, and the ladder keeps the running
//! product so one inversion at the end brings the result back to affine.
//!
//! [`point_mul`] runs a fixed number of ladder steps for every scalar,
//! and picks its working registers with constant-time swaps.

use subtle::Choice;
use zeroize::Zeroize;

use super::curve::{Curve, ONE};
use crate::error::{Error, Result, check_len};
use crate::primitives::vli::{self, MAX_WORDS, Vli, WORD_BITS, Word};

const ZERO: Vli = [0; MAX_WORDS];

/// An affine point. Both coordinates zero encode the point at infinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: Vli,
    pub y: Vli,
}

impl AffinePoint {
    /// The point at infinity.
    pub const INFINITY: Self = Self { x: ZERO, y: ZERO };

    /// Returns `true` for the point at infinity.
    pub fn is_infinity(&self) -> bool {
        bool::from(self.infinity_choice())
    }

    fn infinity_choice(&self) -> Choice {
        vli::is_zero(&self.x, MAX_WORDS) & vli::is_zero(&self.y, MAX_WORDS)
    }

    fn assign_if(&mut self, other: &Self, choice: Choice) {
        vli::assign_if(&mut self.x, &other.x, MAX_WORDS, choice);
        vli::assign_if(&mut self.y, &other.y, MAX_WORDS, choice);
    }
}

/// Scales `(x, y)` by `(z², z³)`.
fn apply_z(curve: &Curve, x: &mut Vli, y: &mut Vli, z: &Vli) {
    let z_squared = curve.mod_square(z);
    *x = curve.mod_mult(x, &z_squared);

    let z_cubed = curve.mod_mult(&z_squared, z);
    *y = curve.mod_mult(y, &z_cubed);
}

/// Co-Z addition.
///
/// Input: `P = (x1, y1)` and `Q = (x2, y2)` sharing a `Z`.
/// Output: `(x1, y1)` is `P` rescaled and `(x2, y2)` is `P + Q`, both under
/// the new common `Z' = Z (x2 - x1)`.
///
/// Returns the factor `x2 - x1`.
pub(crate) fn xycz_add(
    curve: &Curve,
    x1: &mut Vli,
    y1: &mut Vli,
    x2: &mut Vli,
    y2: &mut Vli,
) -> Vli {
    let dx = curve.mod_sub(x2, x1);
    let a = curve.mod_square(&dx);

    *x1 = curve.mod_mult(x1, &a);
    let c = curve.mod_mult(x2, &a);

    let dy = curve.mod_sub(y2, y1);
    let d = curve.mod_square(&dy);

    let x3 = curve.mod_sub(&curve.mod_sub(&d, x1), &c);

    *y1 = curve.mod_mult(y1, &curve.mod_sub(&c, x1));
    let y3 = curve.mod_sub(&curve.mod_mult(&dy, &curve.mod_sub(x1, &x3)), y1);

    *x2 = x3;
    *y2 = y3;

    dx
}

/// Conjugate co-Z addition.
///
/// Input: `P = (x1, y1)` and `Q = (x2, y2)` sharing a `Z`.
/// Output: `(x2, y2) = P + Q` and `(x1, y1) = P - Q`, under the new common
/// `Z' = Z (x2 - x1)`.
///
/// Returns the factor `x2 - x1`.
pub(crate) fn xycz_add_conjugate(
    curve: &Curve,
    x1: &mut Vli,
    y1: &mut Vli,
    x2: &mut Vli,
    y2: &mut Vli,
) -> Vli {
    let dx = curve.mod_sub(x2, x1);
    let a = curve.mod_square(&dx);

    let b = curve.mod_mult(x1, &a);
    let c = curve.mod_mult(x2, &a);

    let sum_y = curve.mod_add(y2, y1);
    let diff_y = curve.mod_sub(y2, y1);

    let e = curve.mod_mult(y1, &curve.mod_sub(&c, &b));
    let b_plus_c = curve.mod_add(&b, &c);

    let x3 = curve.mod_sub(&curve.mod_square(&diff_y), &b_plus_c);
    let y3 = curve.mod_sub(&curve.mod_mult(&diff_y, &curve.mod_sub(&b, &x3)), &e);

    let x3c = curve.mod_sub(&curve.mod_square(&sum_y), &b_plus_c);
    let y3c = curve.mod_sub(&curve.mod_mult(&curve.mod_sub(&x3c, &b), &sum_y), &e);

    *x1 = x3c;
    *y1 = y3c;
    *x2 = x3;
    *y2 = y3;

    dx
}

/// The two ladder registers and their common `Z`.
///
/// `R0` and `R1` live in fixed slots. Before each step they are exchanged
/// so that the slot named `first` holds `R[bit]`; the exchange is a
/// masked swap driven by `swapped ^ bit`, never a branch or an index.
/// Every co-Z addition scales `z` by the factor it returns.
struct LadderRegisters {
    first_x: Vli,
    first_y: Vli,
    second_x: Vli,
    second_y: Vli,
    z: Vli,
    swapped: Choice,
    num_words: usize,
}

impl LadderRegisters {
    fn arrange(&mut self, bit: Word) {
        let bit = Choice::from(bit as u8);
        let flip = self.swapped ^ bit;

        vli::swap_if(&mut self.first_x, &mut self.second_x, self.num_words, flip);
        vli::swap_if(&mut self.first_y, &mut self.second_y, self.num_words, flip);

        self.swapped = bit;
    }

    fn add_conjugate(&mut self, curve: &Curve) {
        let factor = xycz_add_conjugate(
            curve,
            &mut self.first_x,
            &mut self.first_y,
            &mut self.second_x,
            &mut self.second_y,
        );
        self.z = curve.mod_mult(&self.z, &factor);
    }

    fn add(&mut self, curve: &Curve) {
        let factor = xycz_add(
            curve,
            &mut self.second_x,
            &mut self.second_y,
            &mut self.first_x,
            &mut self.first_y,
        );
        self.z = curve.mod_mult(&self.z, &factor);
    }
}

impl Drop for LadderRegisters {
    fn drop(&mut self) {
        self.first_x.zeroize();
        self.first_y.zeroize();
        self.second_x.zeroize();
        self.second_y.zeroize();
        self.z.zeroize();
    }
}

/// Forces the scalar's bit length to `num_n_bits + 1`.
///
/// Returns `k + n` when that already has bit `num_n_bits` set (or carries
/// out of the top limb), `k + 2n` otherwise. Both are congruent to `k`.
fn regularize_scalar(curve: &Curve, k: &Vli) -> Vli {
    let num_words = curve.num_words();
    let num_n_bits = curve.num_n_bits();

    let mut k0: Vli = [0; MAX_WORDS];
    let mut carry = vli::add(&mut k0, k, curve.n_vli(), num_words);

    if num_n_bits < num_words * WORD_BITS {
        carry |= vli::test_bit(&k0, num_n_bits);
    }

    let mut regularized: Vli = [0; MAX_WORDS];
    vli::add(&mut regularized, &k0, curve.n_vli(), num_words);
    vli::assign_if(&mut regularized, &k0, num_words, Choice::from(carry as u8));

    k0.zeroize();
    regularized
}

/// Montgomery-style co-Z ladder over a regularized scalar.
///
/// The top bit (always set) is consumed by the initial doubling and every
/// lower bit by one conjugate-add / add pair. The common `Z` is carried
/// along and inverted once at the end. Returns the affine result and the
/// number of steps taken.
fn ladder(curve: &Curve, point: &AffinePoint, scalar: &Vli, initial_z: &Vli) -> (AffinePoint, usize) {
    // R1 = 2P, R0 = P, sharing the Z of the doubling.
    let mut z = *initial_z;
    let (mut dx, mut dy) = (point.x, point.y);
    apply_z(curve, &mut dx, &mut dy, &z);
    curve.double_jacobian(&mut dx, &mut dy, &mut z);

    let (mut px, mut py) = (point.x, point.y);
    apply_z(curve, &mut px, &mut py, &z);

    let mut registers = LadderRegisters {
        first_x: px,
        first_y: py,
        second_x: dx,
        second_y: dy,
        z,
        swapped: Choice::from(0),
        num_words: curve.num_words(),
    };
    let mut steps = 1;

    for bit in (0..curve.num_n_bits()).rev() {
        registers.arrange(vli::test_bit(scalar, bit));
        registers.add_conjugate(curve);
        registers.add(curve);
        steps += 1;
    }

    // R0 back into the first slot.
    registers.arrange(0);

    let mut z_inv = curve.mod_inv(&registers.z);
    let mut result = AffinePoint {
        x: registers.first_x,
        y: registers.first_y,
    };
    apply_z(curve, &mut result.x, &mut result.y, &z_inv);

    z.zeroize();
    z_inv.zeroize();

    (result, steps)
}

/// [`point_mul_blinded`], also returning the number of ladder steps.
pub(crate) fn point_mul_counted(
    curve: &Curve,
    point: &AffinePoint,
    scalar: &Vli,
    initial_z: &Vli,
) -> (AffinePoint, usize) {
    let num_words = curve.num_words();

    // k mod n, then fold into [0, n/2] remembering the sign.
    let mut k = curve.scalar_reduce(scalar);

    let negate = vli::less_than(curve.half_n_vli(), &k, num_words);
    let mut flipped: Vli = [0; MAX_WORDS];
    vli::sub(&mut flipped, curve.n_vli(), &k, num_words);
    vli::assign_if(&mut k, &flipped, num_words, negate);

    let is_one = vli::equal(&k, &ONE, num_words);
    let is_zero = vli::is_zero(&k, num_words) | point.infinity_choice();

    let mut regularized = regularize_scalar(curve, &k);
    let (mut result, steps) = ladder(curve, point, &regularized, initial_z);

    // The ladder cannot produce P itself; 1 and n - 1 fold to it.
    result.assign_if(point, is_one);

    let negated_y = curve.mod_sub(&ZERO, &result.y);
    vli::assign_if(&mut result.y, &negated_y, num_words, negate);

    result.assign_if(&AffinePoint::INFINITY, is_zero);

    k.zeroize();
    flipped.zeroize();
    regularized.zeroize();

    (result, steps)
}

/// Scalar multiplication `scalar · point`.
///
/// ## Inputs
///
/// - `point`: An affine point on `curve`, or the point at infinity.
/// - `scalar`: Any value of `num_words` limbs. It is reduced modulo `n`
///   first, so it does not need to be a valid private key.
///
/// ## Algorithm
///
/// 1. Reduce the scalar modulo `n` and fold it into `[0, n/2]`,
///    remembering whether it was negated.
/// 2. Add `n` or `2n` so the scalar always has `num_n_bits + 1` bits.
/// 3. Double the point for the top bit, then run one conjugate co-Z
///    addition and one co-Z addition per remaining bit, selecting the
///    working registers with constant-time swaps.
/// 4. Invert the common `Z` carried through the ladder and return to
///    affine form.
/// 5. Fix up by mask: a folded scalar of `1` gives `point`, a negated
///    scalar negates `y`, a zero scalar gives infinity.
///
/// ## Return value
///
/// The affine product. Multiplying by a multiple of `n`, or multiplying
/// the point at infinity, gives infinity.
///
/// ## Security
///
/// - The ladder runs `num_n_bits + 1` steps for every scalar.
/// - No secret-dependent branches or memory indices in the ladder.
/// - The final inversion is variable-time on the accumulated `Z`. Use
///   [`point_mul_blinded`] with a random `initial_z` when the scalar is
///   secret and the point is attacker-chosen.
pub fn point_mul(curve: &Curve, point: &AffinePoint, scalar: &Vli) -> AffinePoint {
    point_mul_counted(curve, point, scalar, &ONE).0
}

/// [`point_mul`] with a caller-chosen initial `Z` for the working point.
///
/// A random `initial_z` randomizes every intermediate coordinate of the
/// ladder. It must be in `[1, p)`.
pub fn point_mul_blinded(
    curve: &Curve,
    point: &AffinePoint,
    scalar: &Vli,
    initial_z: &Vli,
) -> AffinePoint {
    point_mul_counted(curve, point, scalar, initial_z).0
}

/// Returns `2 · point` in affine form.
fn double_affine(curve: &Curve, point: &AffinePoint) -> AffinePoint {
    let mut result = *point;
    let mut z = ONE;

    curve.double_jacobian(&mut result.x, &mut result.y, &mut z);

    let z_inv = curve.mod_inv(&z);
    apply_z(curve, &mut result.x, &mut result.y, &z_inv);

    result
}

/// Returns `left + right`.
///
/// Handles infinity on either side, `left == right` and `left == -right`
/// without branching on the coordinates. The final inversion is
/// variable-time, so this is meant for public points.
pub fn point_add(curve: &Curve, left: &AffinePoint, right: &AffinePoint) -> AffinePoint {
    let num_words = curve.num_words();

    let same_x = vli::equal(&left.x, &right.x, num_words);
    let same_y = vli::equal(&left.y, &right.y, num_words);

    let (mut x1, mut y1) = (left.x, left.y);
    let (mut x2, mut y2) = (right.x, right.y);
    let factor = xycz_add(curve, &mut x1, &mut y1, &mut x2, &mut y2);

    let z = curve.mod_inv(&factor);
    apply_z(curve, &mut x2, &mut y2, &z);

    let mut result = AffinePoint { x: x2, y: y2 };
    result.assign_if(&double_affine(curve, left), same_x & same_y);
    result.assign_if(&AffinePoint::INFINITY, same_x & !same_y);
    result.assign_if(right, left.infinity_choice());
    result.assign_if(left, right.infinity_choice());

    result
}

/// Returns `true` if `point` is a finite point on `curve`.
///
/// Rejects infinity, coordinates `>= p` and anything that fails the curve
/// equation. Variable-time: points are public.
pub fn is_valid_point(curve: &Curve, point: &AffinePoint) -> bool {
    let num_words = curve.num_words();

    if point.is_infinity() {
        return false;
    }

    let unused = point.x[num_words..]
        .iter()
        .chain(&point.y[num_words..])
        .any(|&word| word != 0);

    if unused
        || vli::variable_time_cmp(&point.x, curve.p_vli(), num_words).is_ge()
        || vli::variable_time_cmp(&point.y, curve.p_vli(), num_words).is_ge()
    {
        return false;
    }

    let lhs = curve.mod_square(&point.y);
    let rhs = curve.x_cubed_plus_b(&point.x);

    bool::from(vli::equal(&lhs, &rhs, num_words))
}

/// Writes the SEC 1 compressed form `0x02 | parity(y) ‖ x`.
///
/// # Errors
/// [`Error::BufferSizeMismatch`] if `out` is not `num_bytes + 1` long.
pub fn compress(curve: &Curve, point: &AffinePoint, out: &mut [u8]) -> Result<()> {
    check_len(curve.num_bytes() + 1, out.len())?;
    write_compressed(point, out);

    Ok(())
}

/// [`compress`] into a buffer already known to be `num_bytes + 1` long.
pub(crate) fn write_compressed(point: &AffinePoint, out: &mut [u8]) {
    out[0] = 0x02 | (point.y[0] & 1) as u8;
    vli::native_to_bytes(&mut out[1..], &point.x);
}

/// Recovers a point from its SEC 1 compressed form.
///
/// # Errors
/// [`Error::BufferSizeMismatch`] on a wrong length and
/// [`Error::InvalidEncoding`] on a bad tag or an `x` with no point.
pub fn decompress(curve: &Curve, bytes: &[u8]) -> Result<AffinePoint> {
    check_len(curve.num_bytes() + 1, bytes.len())?;

    let odd = match bytes[0] {
        0x02 => 0,
        0x03 => 1,
        _ => return Err(Error::InvalidEncoding),
    };

    let x = curve.bytes_to_native(&bytes[1..])?;

    if vli::variable_time_cmp(&x, curve.p_vli(), curve.num_words()).is_ge() {
        return Err(Error::InvalidEncoding);
    }

    let rhs = curve.x_cubed_plus_b(&x);
    let mut y = curve.mod_sqrt(&rhs);

    if !bool::from(vli::equal(&curve.mod_square(&y), &rhs, curve.num_words())) {
        return Err(Error::InvalidEncoding);
    }

    if y[0] & 1 != odd {
        y = curve.mod_sub(&ZERO, &y);
    }

    let point = AffinePoint { x, y };

    if !is_valid_point(curve, &point) {
        return Err(Error::InvalidEncoding);
    }

    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves;

    fn scalars(curve: &Curve) -> Vec<Vli> {
        let n_minus = |d: Word| {
            let mut out: Vli = [0; MAX_WORDS];
            vli::sub(&mut out, curve.n_vli(), &[d, 0, 0, 0], curve.num_words());
            out
        };

        let mut half_plus_one: Vli = [0; MAX_WORDS];
        vli::add(&mut half_plus_one, curve.half_n_vli(), &ONE, curve.num_words());

        vec![
            ZERO,
            ONE,
            [2, 0, 0, 0],
            [3, 0, 0, 0],
            n_minus(1),
            n_minus(2),
            n_minus(3),
            *curve.half_n_vli(),
            half_plus_one,
            *curve.n_vli(),
            [0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210, 0x0F0F_0F0F_0F0F_0F0F, 0],
        ]
    }

    #[test]
    fn ladder_length_is_independent_of_the_scalar() {
        for curve in [curves::secp256k1(), curves::secp256r1(), curves::secp192r1()] {
            for scalar in scalars(curve) {
                let (_, steps) = point_mul_counted(curve, curve.g(), &scalar, &ONE);
                assert_eq!(steps, curve.num_n_bits() + 1, "{}", curve.name());
            }
        }
    }

    #[test]
    fn ladder_handles_a_base_point_with_zero_x() {
        let curve = curves::secp256r1();
        let mut encoded = [0u8; 33];
        encoded[0] = 0x03;
        let q = decompress(curve, &encoded).unwrap();

        let two_q = double_affine(curve, &q);
        let three_q = point_add(curve, &two_q, &q);

        for (scalar, expected) in [([2, 0, 0, 0], two_q), ([3, 0, 0, 0], three_q)] {
            let (product, steps) = point_mul_counted(curve, &q, &scalar, &ONE);

            assert_eq!(product, expected);
            assert_eq!(steps, curve.num_n_bits() + 1);
        }
    }

    #[test]
    fn small_and_folded_scalars_match_the_group_law() {
        for curve in [curves::secp256k1(), curves::secp256r1(), curves::secp192r1()] {
            let g = *curve.g();
            let two_g = double_affine(curve, &g);
            let three_g = point_add(curve, &two_g, &g);

            assert_eq!(point_mul(curve, &g, &ONE), g);
            assert_eq!(point_mul(curve, &g, &[2, 0, 0, 0]), two_g);
            assert_eq!(point_mul(curve, &g, &[3, 0, 0, 0]), three_g);

            let mut n_minus_one: Vli = [0; MAX_WORDS];
            vli::sub(&mut n_minus_one, curve.n_vli(), &ONE, curve.num_words());

            let neg_g = point_mul(curve, &g, &n_minus_one);
            assert_eq!(neg_g.x, g.x);
            assert_eq!(neg_g.y, curve.mod_sub(&ZERO, &g.y));
        }
    }

    #[test]
    fn blinded_multiplication_matches_plain() {
        let curve = curves::secp256r1();
        let scalar = [0x1111, 0x2222, 0x3333, 0x4444];
        let z = [0xDEAD_BEEF, 0xC0FF_EE00, 0x1234, 0x5678];

        assert_eq!(
            point_mul_blinded(curve, curve.g(), &scalar, &z),
            point_mul(curve, curve.g(), &scalar)
        );
    }
}
