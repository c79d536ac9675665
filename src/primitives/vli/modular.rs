//! Modular arithmetic over limb vectors.
//!
//! Operands of `mod_add` / `mod_sub` must already be reduced. The
//! correction step is applied through a mask so the instruction stream
//! does not depend on whether it was needed.

use core::cmp::Ordering;

use subtle::Choice;

use super::core::{
    add, assign_if, clear, is_zero, mult, num_bits, rshift1, set, sub, variable_time_cmp,
};
use super::{MAX_WORDS, Product, Vli, WORD_BITS, Word};

/// `result = (left + right) mod modulus`, for `left, right < modulus`.
pub fn mod_add(
    result: &mut [Word],
    left: &[Word],
    right: &[Word],
    modulus: &[Word],
    num_words: usize,
) {
    let carry = add(result, left, right, num_words);

    let mut reduced: Vli = [0; MAX_WORDS];
    let borrow = sub(&mut reduced, result, modulus, num_words);

    // Reduce when the sum overflowed or did not go below the modulus.
    let needs_reduction = Choice::from((carry | (borrow ^ 1)) as u8);
    assign_if(result, &reduced, num_words, needs_reduction);
}

/// `result = (left - right) mod modulus`, for `left, right < modulus`.
pub fn mod_sub(
    result: &mut [Word],
    left: &[Word],
    right: &[Word],
    modulus: &[Word],
    num_words: usize,
) {
    let borrow = sub(result, left, right, num_words);

    let mut corrected: Vli = [0; MAX_WORDS];
    add(&mut corrected, result, modulus, num_words);

    assign_if(result, &corrected, num_words, Choice::from(borrow as u8));
}

/// Reduces a double-width `product` modulo `modulus`.
///
/// The modulus is shifted left until its top bit is the top bit of the
/// double-width buffer, then, once per shift position, subtracted when
/// that does not borrow and halved. The kept candidate is chosen with a
/// mask, so the cost is fixed by the bit length of the modulus.
pub fn mmod(result: &mut [Word], product: &[Word], modulus: &[Word], num_words: usize) {
    let product_words = 2 * num_words;

    let mut mod_multiple: Product = [0; 2 * MAX_WORDS];
    let mut remainder: Product = [0; 2 * MAX_WORDS];
    let mut candidate: Product = [0; 2 * MAX_WORDS];

    set(&mut remainder, product, product_words);

    let shift = product_words * WORD_BITS - num_bits(modulus, num_words);
    let word_shift = shift / WORD_BITS;
    let bit_shift = shift % WORD_BITS;
    let fitting_words = num_words.min(product_words - word_shift);

    if bit_shift > 0 {
        let mut carry = 0;

        for i in 0..fitting_words {
            mod_multiple[word_shift + i] = (modulus[i] << bit_shift) | carry;
            carry = modulus[i] >> (WORD_BITS - bit_shift);
        }
    } else {
        set(&mut mod_multiple[word_shift..], modulus, fitting_words);
    }

    for _ in 0..=shift {
        let borrow = sub(&mut candidate, &remainder, &mod_multiple, product_words);
        assign_if(
            &mut remainder,
            &candidate,
            product_words,
            Choice::from((borrow ^ 1) as u8),
        );

        rshift1(&mut mod_multiple, product_words);
    }

    set(result, &remainder, num_words);
}

/// `result = (left * right) mod modulus` through the generic reduction.
pub fn mod_mult(
    result: &mut [Word],
    left: &[Word],
    right: &[Word],
    modulus: &[Word],
    num_words: usize,
) {
    let mut product: Product = [0; 2 * MAX_WORDS];

    mult(&mut product, left, right, num_words);
    mmod(result, &product, modulus, num_words);
}

/// Halves a running inverse candidate modulo `modulus`, adding the
/// (odd) modulus first when the candidate is odd.
fn inv_update(uv: &mut Vli, modulus: &[Word], num_words: usize) {
    let mut carry = 0;

    if uv[0] & 1 == 1 {
        let current = *uv;
        carry = add(uv, &current, modulus, num_words);
    }

    rshift1(uv, num_words);
    uv[num_words - 1] |= carry << (WORD_BITS - 1);
}

/// `result = input⁻¹ mod modulus` for an odd modulus.
///
/// Binary extended Euclid. The number of iterations and the branches
/// taken depend on the operands: this routine is **not** constant-time.
/// A zero input yields zero.
pub fn mod_inv(result: &mut [Word], input: &[Word], modulus: &[Word], num_words: usize) {
    if bool::from(is_zero(input, num_words)) {
        clear(result, num_words);
        return;
    }

    let mut a: Vli = [0; MAX_WORDS];
    let mut b: Vli = [0; MAX_WORDS];
    let mut u: Vli = [0; MAX_WORDS];
    let mut v: Vli = [0; MAX_WORDS];

    set(&mut a, input, num_words);
    set(&mut b, modulus, num_words);
    u[0] = 1;

    loop {
        let order = variable_time_cmp(&a, &b, num_words);

        if order == Ordering::Equal {
            break;
        }

        if a[0] & 1 == 0 {
            rshift1(&mut a, num_words);
            inv_update(&mut u, modulus, num_words);
        } else if b[0] & 1 == 0 {
            rshift1(&mut b, num_words);
            inv_update(&mut v, modulus, num_words);
        } else if order == Ordering::Greater {
            let current = a;
            sub(&mut a, &current, &b, num_words);
            rshift1(&mut a, num_words);

            if variable_time_cmp(&u, &v, num_words) == Ordering::Less {
                let current = u;
                add(&mut u, &current, modulus, num_words);
            }

            let current = u;
            sub(&mut u, &current, &v, num_words);
            inv_update(&mut u, modulus, num_words);
        } else {
            let current = b;
            sub(&mut b, &current, &a, num_words);
            rshift1(&mut b, num_words);

            if variable_time_cmp(&v, &u, num_words) == Ordering::Less {
                let current = v;
                add(&mut v, &current, modulus, num_words);
            }

            let current = v;
            sub(&mut v, &current, &u, num_words);
            inv_update(&mut v, modulus, num_words);
        }
    }

    set(result, &u, num_words);
}
