//! Limb-level integer arithmetic.
//!
//! Every function takes the operand width explicitly and only reads or
//! writes the first `num_words` limbs of its buffers (`2 * num_words` for
//! products). Slices that are too short panic through the usual bounds
//! checks; nothing here silently truncates.
//!
//! Unless stated otherwise the running time depends only on `num_words`.

use core::cmp::Ordering;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::{MAX_WORDS, WORD_BITS, Word};

/// Sets the first `num_words` limbs to zero.
#[inline]
pub fn clear(vli: &mut [Word], num_words: usize) {
    vli[..num_words].fill(0);
}

/// Copies `num_words` limbs from `src` into `dest`.
#[inline]
pub fn set(dest: &mut [Word], src: &[Word], num_words: usize) {
    dest[..num_words].copy_from_slice(&src[..num_words]);
}

/// Returns a set [`Choice`] if the value is zero.
pub fn is_zero(vli: &[Word], num_words: usize) -> Choice {
    vli[..num_words]
        .iter()
        .fold(0, |acc, &word| acc | word)
        .ct_eq(&0)
}

/// Returns bit `bit` of the value as `0` or `1`.
#[inline]
pub fn test_bit(vli: &[Word], bit: usize) -> Word {
    (vli[bit / WORD_BITS] >> (bit % WORD_BITS)) & 1
}

/// Number of significant bits.
///
/// Variable-time. Only used on curve constants and other public values.
pub fn num_bits(vli: &[Word], num_words: usize) -> usize {
    match vli[..num_words].iter().rposition(|&word| word != 0) {
        Some(top) => top * WORD_BITS + (WORD_BITS - vli[top].leading_zeros() as usize),
        None => 0,
    }
}

/// Constant-time equality.
pub fn equal(left: &[Word], right: &[Word], num_words: usize) -> Choice {
    left[..num_words].ct_eq(&right[..num_words])
}

/// Overwrites `dest` with `src` when `choice` is set, without branching.
pub fn assign_if(dest: &mut [Word], src: &[Word], num_words: usize, choice: Choice) {
    for (d, s) in dest[..num_words].iter_mut().zip(&src[..num_words]) {
        d.conditional_assign(s, choice);
    }
}

/// Exchanges `a` and `b` when `choice` is set, without branching.
pub fn swap_if(a: &mut [Word], b: &mut [Word], num_words: usize, choice: Choice) {
    for (x, y) in a[..num_words].iter_mut().zip(b[..num_words].iter_mut()) {
        Word::conditional_swap(x, y, choice);
    }
}

/// Shifts the value right by one bit.
pub fn rshift1(vli: &mut [Word], num_words: usize) {
    let mut carry = 0;

    for word in vli[..num_words].iter_mut().rev() {
        let temp = *word;
        *word = (temp >> 1) | carry;
        carry = temp << (WORD_BITS - 1);
    }
}

/// `result = left + right`, returning the carry out of the top limb.
pub fn add(result: &mut [Word], left: &[Word], right: &[Word], num_words: usize) -> Word {
    let mut carry = 0;

    for i in 0..num_words {
        let (sum, c1) = left[i].overflowing_add(right[i]);
        let (sum, c2) = sum.overflowing_add(carry);

        result[i] = sum;
        carry = (c1 | c2) as Word;
    }

    carry
}

/// `result = left - right`, returning the borrow out of the top limb.
pub fn sub(result: &mut [Word], left: &[Word], right: &[Word], num_words: usize) -> Word {
    let mut borrow = 0;

    for i in 0..num_words {
        let (diff, b1) = left[i].overflowing_sub(right[i]);
        let (diff, b2) = diff.overflowing_sub(borrow);

        result[i] = diff;
        borrow = (b1 | b2) as Word;
    }

    borrow
}

/// Adds `a * b` into the three-limb accumulator `(r0, r1, r2)`.
#[inline(always)]
fn muladd(a: Word, b: Word, r0: &mut Word, r1: &mut Word, r2: &mut Word) {
    let product = (a as u128) * (b as u128);
    let acc = ((*r1 as u128) << WORD_BITS) | *r0 as u128;
    let (acc, overflow) = acc.overflowing_add(product);

    *r2 += overflow as Word;
    *r1 = (acc >> WORD_BITS) as Word;
    *r0 = acc as Word;
}

/// Adds `2 * a * b` into the three-limb accumulator `(r0, r1, r2)`.
#[inline(always)]
fn mul2add(a: Word, b: Word, r0: &mut Word, r1: &mut Word, r2: &mut Word) {
    let product = (a as u128) * (b as u128);
    *r2 += (product >> 127) as Word;

    let product = product << 1;
    let acc = ((*r1 as u128) << WORD_BITS) | *r0 as u128;
    let (acc, overflow) = acc.overflowing_add(product);

    *r2 += overflow as Word;
    *r1 = (acc >> WORD_BITS) as Word;
    *r0 = acc as Word;
}

/// `result = left * right`. `result` receives `2 * num_words` limbs.
///
/// Product scanning: column `k` accumulates every `left[i] * right[k - i]`
/// before its low limb is emitted.
pub fn mult(result: &mut [Word], left: &[Word], right: &[Word], num_words: usize) {
    let (mut r0, mut r1, mut r2) = (0, 0, 0);

    for k in 0..(2 * num_words - 1) {
        let min = if k < num_words { 0 } else { k + 1 - num_words };

        for i in min..=k.min(num_words - 1) {
            muladd(left[i], right[k - i], &mut r0, &mut r1, &mut r2);
        }

        result[k] = r0;
        r0 = r1;
        r1 = r2;
        r2 = 0;
    }

    result[2 * num_words - 1] = r0;
}

/// `result = left²`. `result` receives `2 * num_words` limbs.
///
/// Cross products are computed once and doubled.
pub fn square(result: &mut [Word], left: &[Word], num_words: usize) {
    let (mut r0, mut r1, mut r2) = (0, 0, 0);

    for k in 0..(2 * num_words - 1) {
        let min = if k < num_words { 0 } else { k + 1 - num_words };

        for i in min..=(k / 2) {
            if 2 * i < k {
                mul2add(left[i], left[k - i], &mut r0, &mut r1, &mut r2);
            } else {
                muladd(left[i], left[i], &mut r0, &mut r1, &mut r2);
            }
        }

        result[k] = r0;
        r0 = r1;
        r1 = r2;
        r2 = 0;
    }

    result[2 * num_words - 1] = r0;
}

/// Compares two values, touching every limb regardless of where they
/// first differ.
///
/// Use this whenever either operand is secret.
pub fn constant_time_cmp(left: &[Word], right: &[Word], num_words: usize) -> Ordering {
    let mut borrow = 0;
    let mut diff_bits = 0;

    for i in 0..num_words {
        let (diff, b1) = left[i].overflowing_sub(right[i]);
        let (diff, b2) = diff.overflowing_sub(borrow);

        borrow = (b1 | b2) as Word;
        diff_bits |= diff;
    }

    let nonzero = ((diff_bits | diff_bits.wrapping_neg()) >> (WORD_BITS - 1)) as i8;
    let negative = borrow as i8;

    (nonzero - 2 * negative).cmp(&0)
}

/// Compares two values, returning at the first differing limb.
///
/// Variable-time: only for public operands (curve constants, encoded
/// input range checks, inversion of public values).
pub fn variable_time_cmp(left: &[Word], right: &[Word], num_words: usize) -> Ordering {
    for i in (0..num_words).rev() {
        match left[i].cmp(&right[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Returns a set [`Choice`] if `left < right`, in constant time.
pub fn less_than(left: &[Word], right: &[Word], num_words: usize) -> Choice {
    let mut scratch = [0; 2 * MAX_WORDS];
    let borrow = sub(&mut scratch, left, right, num_words);

    Choice::from(borrow as u8)
}
