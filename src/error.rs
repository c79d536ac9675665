//! Error type shared by the whole crate.
//!
//! Arithmetic on internal fixed-size buffers never fails; errors only
//! surface at the crate boundary where callers hand in byte strings,
//! word slices, curve parameters or keys bound to a curve instance.

/// Errors returned by the public API.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied buffer does not have the width the curve requires.
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Key or point bytes are malformed or do not describe a valid value.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Curve parameters were rejected at construction.
    #[error("invalid curve parameters: {0}")]
    InvalidParameters(&'static str),

    /// Two values bound to different curve instances were combined.
    #[error("curve mismatch")]
    CurveMismatch,

    /// A scalar is outside `[1, n)`.
    #[error("scalar out of range")]
    InvalidScalar,

    /// The operating system entropy source failed.
    #[error("operating system entropy source unavailable")]
    EntropyUnavailable,

    /// The nonce produced a degenerate signature component.
    #[error("signing failed: degenerate nonce")]
    SigningFailed,
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Checks that `actual` equals `expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::BufferSizeMismatch { expected, actual });
    }

    Ok(())
}
