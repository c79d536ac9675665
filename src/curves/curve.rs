//! Curve descriptor and per-curve strategy hooks.
//!
//! A [`Curve`] bundles the domain parameters of a short-Weierstrass curve
//! `y² = x³ + ax + b` over `GF(p)` with a [`CurveOps`] implementation that
//! supplies the four operations worth specializing: reduction of a
//! double-width product, the right-hand side `x³ + ax + b`, square roots
//! and Jacobian doubling. Everything else (field multiplication, the
//! co-Z point formulas, the ladder) is written once against these hooks.

use core::cmp::Ordering;
use core::fmt;

use subtle::{Choice, ConditionallySelectable};

use super::generic;
use super::point::{self, AffinePoint};
use crate::error::{Error, Result, check_len};
use crate::primitives::vli::{self, MAX_WORDS, Product, Vli, WORD_BITS, WORD_BYTES, Word};
use crate::rng::random_tag;

/// The value one.
pub(crate) const ONE: Vli = {
    let mut one = [0; MAX_WORDS];
    one[0] = 1;
    one
};

/// Curve-specific arithmetic.
///
/// Every method has a default built from generic limb arithmetic, valid
/// for any curve with `a = -3` and `p ≡ 3 (mod 4)`. A curve with a cheaper
/// reduction or a different `a` overrides the relevant methods; the
/// overrides must agree with the curve's `p` and `b`.
pub trait CurveOps: Send + Sync {
    /// Reduces a `2 * num_words` product modulo `p`.
    fn fast_reduce(&self, curve: &Curve, product: &Product) -> Vli {
        generic::fast_reduce_generic(curve, product)
    }

    /// Returns `x³ + ax + b mod p`.
    fn x_cubed_plus_b(&self, curve: &Curve, x: &Vli) -> Vli {
        generic::x_cubed_plus_b_generic(curve, x)
    }

    /// Returns a square root of `a` modulo `p`, if one exists. The caller
    /// checks the result.
    fn mod_sqrt(&self, curve: &Curve, a: &Vli) -> Vli {
        generic::mod_sqrt_generic(curve, a)
    }

    /// Doubles the Jacobian point `(x, y, z)` in place. A point with
    /// `z = 0` is left untouched.
    fn double_jacobian(&self, curve: &Curve, x: &mut Vli, y: &mut Vli, z: &mut Vli) {
        generic::double_jacobian_generic(curve, x, y, z)
    }
}

/// Domain parameters as little-endian limbs.
///
/// Used for the built-in curves, whose constants are trusted.
pub(crate) struct CurveConstants {
    pub(crate) name: &'static str,
    pub(crate) num_words: usize,
    pub(crate) p: Vli,
    pub(crate) n: Vli,
    pub(crate) b: Vli,
    pub(crate) gx: Vli,
    pub(crate) gy: Vli,
}

/// Domain parameters as big-endian byte strings.
///
/// This is the run-time configuration surface: any curve with
/// `p ≡ 3 (mod 4)` and a prime group order can be described here and
/// validated by [`Curve::new`].
#[derive(Clone, Copy, Debug)]
pub struct CurveParams<'a> {
    /// Human-readable name, used in `Debug` output only.
    pub name: &'static str,
    /// Field prime.
    pub p: &'a [u8],
    /// Group order.
    pub n: &'a [u8],
    /// Curve coefficient `b`.
    pub b: &'a [u8],
    /// Generator x-coordinate.
    pub gx: &'a [u8],
    /// Generator y-coordinate.
    pub gy: &'a [u8],
}

/// An elliptic curve instance.
///
/// Constructed once and then shared read-only. Two handles compare equal
/// only if they come from the same construction: parameters alone do not
/// make two curves interchangeable.
pub struct Curve {
    name: &'static str,
    num_words: usize,
    num_bytes: usize,
    num_bits: usize,
    num_n_bits: usize,
    p: Vli,
    n: Vli,
    half_n: Vli,
    b: Vli,
    g: AffinePoint,
    instance_id: u64,
    scramble_key: u64,
    ops: &'static dyn CurveOps,
}

impl Curve {
    /// Builds a curve from trusted constants.
    pub(crate) fn from_constants(constants: &CurveConstants, ops: &'static dyn CurveOps) -> Self {
        let num_words = constants.num_words;

        let mut half_n = constants.n;
        vli::rshift1(&mut half_n, num_words);

        Self {
            name: constants.name,
            num_words,
            num_bytes: num_words * WORD_BYTES,
            num_bits: vli::num_bits(&constants.p, num_words),
            num_n_bits: vli::num_bits(&constants.n, num_words),
            p: constants.p,
            n: constants.n,
            half_n,
            b: constants.b,
            g: AffinePoint {
                x: constants.gx,
                y: constants.gy,
            },
            instance_id: random_tag(),
            scramble_key: random_tag(),
            ops,
        }
    }

    /// Builds and validates a curve from big-endian parameters.
    ///
    /// The byte length of `p` fixes the coordinate width and must be a
    /// whole number of limbs; `n`, `b` and the generator must use the same
    /// width.
    ///
    /// # Errors
    /// [`Error::InvalidParameters`] if a width is unsupported, `p` is not
    /// `3 mod 4`, `n` is even or has fewer bits than `p`, or the generator
    /// is not on the curve.
    ///
    /// # Panics
    /// Panics if the operating system cannot provide entropy for the
    /// instance tag.
    pub fn new(params: &CurveParams<'_>, ops: &'static dyn CurveOps) -> Result<Self> {
        let num_bytes = params.p.len();

        if num_bytes == 0 || num_bytes % WORD_BYTES != 0 || num_bytes > MAX_WORDS * WORD_BYTES {
            return Err(Error::InvalidParameters("unsupported field size"));
        }

        for field in [params.n, params.b, params.gx, params.gy] {
            if field.len() != num_bytes {
                return Err(Error::InvalidParameters("parameter width differs from p"));
            }
        }

        let num_words = num_bytes / WORD_BYTES;
        let load = |bytes: &[u8]| {
            let mut native: Vli = [0; MAX_WORDS];
            vli::bytes_to_native(&mut native, bytes);
            native
        };

        let constants = CurveConstants {
            name: params.name,
            num_words,
            p: load(params.p),
            n: load(params.n),
            b: load(params.b),
            gx: load(params.gx),
            gy: load(params.gy),
        };

        if constants.p[0] & 3 != 3 {
            return Err(Error::InvalidParameters("p must be 3 mod 4"));
        }

        if constants.n[0] & 1 != 1 {
            return Err(Error::InvalidParameters("group order must be odd"));
        }

        // n > 2^(num_bits - 1)
        if vli::num_bits(&constants.n, num_words) < vli::num_bits(&constants.p, num_words) {
            return Err(Error::InvalidParameters("group order shorter than the field"));
        }

        if vli::variable_time_cmp(&constants.b, &constants.p, num_words) != Ordering::Less {
            return Err(Error::InvalidParameters("b must be reduced modulo p"));
        }

        let curve = Self::from_constants(&constants, ops);

        if !point::is_valid_point(&curve, &curve.g) {
            return Err(Error::InvalidParameters("generator is not on the curve"));
        }

        Ok(curve)
    }

    /// Curve name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Limbs per coordinate or scalar.
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Bytes per encoded coordinate or scalar.
    pub fn num_bytes(&self) -> usize {
        self.num_bytes
    }

    /// Bit length of `p`.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Bit length of `n`.
    pub fn num_n_bits(&self) -> usize {
        self.num_n_bits
    }

    /// Field prime.
    pub fn p(&self) -> &[Word] {
        &self.p[..self.num_words]
    }

    /// Group order.
    pub fn n(&self) -> &[Word] {
        &self.n[..self.num_words]
    }

    /// `floor(n / 2)`.
    pub fn half_n(&self) -> &[Word] {
        &self.half_n[..self.num_words]
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &[Word] {
        &self.b[..self.num_words]
    }

    /// Generator.
    pub fn g(&self) -> &AffinePoint {
        &self.g
    }

    /// Per-construction identity tag.
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub(crate) fn p_vli(&self) -> &Vli {
        &self.p
    }

    pub(crate) fn n_vli(&self) -> &Vli {
        &self.n
    }

    pub(crate) fn half_n_vli(&self) -> &Vli {
        &self.half_n
    }

    pub(crate) fn b_vli(&self) -> &Vli {
        &self.b
    }

    /// Loads a `num_bytes` big-endian string.
    ///
    /// # Errors
    /// [`Error::BufferSizeMismatch`] if `bytes` is not exactly `num_bytes`
    /// long.
    pub fn bytes_to_native(&self, bytes: &[u8]) -> Result<Vli> {
        check_len(self.num_bytes, bytes.len())?;

        let mut native: Vli = [0; MAX_WORDS];
        vli::bytes_to_native(&mut native, bytes);

        Ok(native)
    }

    /// Stores `native` as a `num_bytes` big-endian string.
    ///
    /// # Errors
    /// [`Error::BufferSizeMismatch`] if `bytes` is not exactly `num_bytes`
    /// long.
    pub fn native_to_bytes(&self, native: &Vli, bytes: &mut [u8]) -> Result<()> {
        check_len(self.num_bytes, bytes.len())?;
        vli::native_to_bytes(bytes, native);

        Ok(())
    }

    /// `left * right mod p` through the curve's reduction hook.
    pub fn mod_mult(&self, left: &Vli, right: &Vli) -> Vli {
        let mut product: Product = [0; 2 * MAX_WORDS];
        vli::mult(&mut product, left, right, self.num_words);

        self.ops.fast_reduce(self, &product)
    }

    /// `left² mod p` through the curve's reduction hook.
    pub fn mod_square(&self, left: &Vli) -> Vli {
        let mut product: Product = [0; 2 * MAX_WORDS];
        vli::square(&mut product, left, self.num_words);

        self.ops.fast_reduce(self, &product)
    }

    /// `left + right mod p`.
    pub fn mod_add(&self, left: &Vli, right: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_add(&mut result, left, right, &self.p, self.num_words);

        result
    }

    /// `left - right mod p`.
    pub fn mod_sub(&self, left: &Vli, right: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_sub(&mut result, left, right, &self.p, self.num_words);

        result
    }

    /// `a / 2 mod p`, without branching on the parity of `a`.
    pub(crate) fn mod_half(&self, a: &Vli) -> Vli {
        let num_words = self.num_words;
        let odd = Choice::from((a[0] & 1) as u8);

        let mut sum: Vli = [0; MAX_WORDS];
        let carry = vli::add(&mut sum, a, &self.p, num_words);

        let mut result = *a;
        vli::assign_if(&mut result, &sum, num_words, odd);
        let carry = Word::conditional_select(&0, &carry, odd);

        vli::rshift1(&mut result, num_words);
        result[num_words - 1] |= carry << (WORD_BITS - 1);

        result
    }

    /// `a⁻¹ mod p` (variable-time; zero maps to zero).
    pub fn mod_inv(&self, a: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_inv(&mut result, a, &self.p, self.num_words);

        result
    }

    /// Square root modulo `p` through the curve hook.
    pub fn mod_sqrt(&self, a: &Vli) -> Vli {
        self.ops.mod_sqrt(self, a)
    }

    /// `x³ + ax + b mod p` through the curve hook.
    pub fn x_cubed_plus_b(&self, x: &Vli) -> Vli {
        self.ops.x_cubed_plus_b(self, x)
    }

    /// Doubles a Jacobian point in place through the curve hook.
    pub fn double_jacobian(&self, x: &mut Vli, y: &mut Vli, z: &mut Vli) {
        self.ops.double_jacobian(self, x, y, z)
    }

    /// `value mod n` for any single-width value.
    pub(crate) fn scalar_reduce(&self, value: &Vli) -> Vli {
        let mut wide: Product = [0; 2 * MAX_WORDS];
        vli::set(&mut wide, value, self.num_words);

        let mut result: Vli = [0; MAX_WORDS];
        vli::mmod(&mut result, &wide, &self.n, self.num_words);

        result
    }

    /// `left + right mod n`, for reduced operands.
    pub(crate) fn scalar_add(&self, left: &Vli, right: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_add(&mut result, left, right, &self.n, self.num_words);

        result
    }

    /// `left * right mod n`.
    pub(crate) fn scalar_mult(&self, left: &Vli, right: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_mult(&mut result, left, right, &self.n, self.num_words);

        result
    }

    /// `a⁻¹ mod n` (variable-time).
    pub(crate) fn scalar_inv(&self, a: &Vli) -> Vli {
        let mut result: Vli = [0; MAX_WORDS];
        vli::mod_inv(&mut result, a, &self.n, self.num_words);

        result
    }

    /// Returns `true` if `0 < scalar < n`. Constant-time in `scalar`.
    pub fn is_valid_scalar(&self, scalar: &Vli) -> bool {
        let nonzero = !vli::is_zero(scalar, self.num_words);
        let below_n = vli::less_than(scalar, &self.n, self.num_words);

        bool::from(nonzero & below_n)
    }

    /// Masks (or unmasks) a secret scalar held in memory.
    ///
    /// The mask is derived from the per-instance scramble key, so a value
    /// scrambled under one curve handle is meaningless under another.
    pub(crate) fn scramble(&self, words: &Vli) -> Vli {
        let mut out = *words;

        for (i, word) in out.iter_mut().enumerate() {
            let mask = self
                .scramble_key
                .rotate_left((i as u32) * 17)
                .wrapping_mul(0x9E37_79B9_7F4A_7C15);
            *word ^= mask;
        }

        out
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.instance_id == other.instance_id
    }
}

impl Eq for Curve {}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("name", &self.name)
            .field("num_words", &self.num_words)
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}
