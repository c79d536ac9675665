//! Conversion between big-endian byte strings and native limbs.
//!
//! This byte order is the external contract for every scalar and
//! coordinate the crate exchanges with serialization code.

use super::core::clear;
use super::{WORD_BYTES, Word};

/// Loads big-endian `bytes` into `native` (least-significant limb first).
///
/// Clears `ceil(bytes.len() / 8)` limbs before loading.
pub fn bytes_to_native(native: &mut [Word], bytes: &[u8]) {
    clear(native, bytes.len().div_ceil(WORD_BYTES));

    for (i, &byte) in bytes.iter().rev().enumerate() {
        native[i / WORD_BYTES] |= (byte as Word) << (8 * (i % WORD_BYTES));
    }
}

/// Stores the low `bytes.len()` bytes of `native` into `bytes`, big-endian.
pub fn native_to_bytes(bytes: &mut [u8], native: &[Word]) {
    for (i, byte) in bytes.iter_mut().rev().enumerate() {
        *byte = (native[i / WORD_BYTES] >> (8 * (i % WORD_BYTES))) as u8;
    }
}
