use std::sync::{Mutex, PoisonError};

use rand_core::{CryptoRng, RngCore, impls};

use crate::error::Result;
use crate::os::sys_random;

/// Number of completed fills. Guarded state is trivial, so a poisoned lock
/// is taken over rather than propagated.
static ENTROPY_LOCK: Mutex<u64> = Mutex::new(0);

/// Fills `buf` with bytes from the operating system CSPRNG.
///
/// Concurrent callers are serialized. On failure the content of `buf` is
/// unspecified and must not be used.
pub fn fill(buf: &mut [u8]) -> Result<()> {
    let mut fills = ENTROPY_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    sys_random(buf)?;
    *fills = fills.wrapping_add(1);

    Ok(())
}

/// Returns a random 64-bit tag.
///
/// # Panics
/// Panics if the operating system cannot provide entropy. Nothing in the
/// crate can operate safely in that state.
pub(crate) fn random_tag() -> u64 {
    let mut bytes = [0u8; 8];

    if let Err(err) = fill(&mut bytes) {
        panic!("{err}");
    }

    u64::from_le_bytes(bytes)
}

/// Handle to the process-wide entropy source implementing the `rand_core`
/// traits.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRng;

impl RngCore for OsRng {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    /// # Panics
    /// Panics if the operating system cannot provide entropy; use
    /// [`RngCore::try_fill_bytes`] to handle the failure instead.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = fill(dest) {
            panic!("{err}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        fill(dest).map_err(rand_core::Error::new)
    }
}

impl CryptoRng for OsRng {}
