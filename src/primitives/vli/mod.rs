//! Very-long-integer (VLI) arithmetic.
//!
//! A VLI is a fixed array of 64-bit limbs stored least-significant limb
//! first. Buffers are always sized for the widest supported curve
//! ([`MAX_WORDS`] limbs, twice that for products); each call says how many
//! limbs are live.
//!
//! - [`core`](self::core): add / sub / mult / square, shifts, comparisons
//!   and constant-time selection
//! - `modular`: modular add / sub, generic reduction, inversion
//! - `conv`: big-endian byte boundary

mod conv;
pub mod core;
mod modular;

pub use self::conv::{bytes_to_native, native_to_bytes};
pub use self::core::{
    add, assign_if, clear, constant_time_cmp, equal, is_zero, less_than, mult, num_bits, rshift1,
    set, square, sub, swap_if, test_bit, variable_time_cmp,
};
pub use self::modular::{mmod, mod_add, mod_inv, mod_mult, mod_sub};

/// Native limb.
pub type Word = u64;

/// Bits per limb.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Bytes per limb.
pub const WORD_BYTES: usize = WORD_BITS / 8;

/// Widest supported operand, in limbs.
pub const MAX_WORDS: usize = 4;

/// Single-width operand buffer.
pub type Vli = [Word; MAX_WORDS];

/// Double-width product buffer.
pub type Product = [Word; 2 * MAX_WORDS];
