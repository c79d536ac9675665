//! Message authentication codes.
//!
//! The deterministic scalar generator is written against [`Mac`] rather
//! than a fixed hash so callers can choose the digest. [`Hmac`] provides
//! the standard construction over any `sha2` digest.

mod hmac;

pub use self::hmac::{Hmac, HmacSha256, HmacSha512};

/// Widest MAC output supported by the scalar generator, in bytes.
pub const MAX_OUTPUT_SIZE: usize = 64;

/// A keyed MAC with a fixed output size.
pub trait Mac: Sized {
    /// Output size in bytes. At most [`MAX_OUTPUT_SIZE`].
    const OUTPUT_SIZE: usize;

    /// Starts a computation under `key`.
    fn init(key: &[u8]) -> Self;

    /// Absorbs `data`.
    fn update(&mut self, data: &[u8]);

    /// Finishes the computation and writes the tag to `out`.
    ///
    /// # Panics
    /// Panics if `out` is not [`Self::OUTPUT_SIZE`] bytes long.
    fn digest(self, out: &mut [u8]);
}
