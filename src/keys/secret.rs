//! Secret scalar generation.
//!
//! Every secret scalar in the crate comes out of
//! [`generate_deterministic_secret`], an HMAC-DRBG style generator in the
//! spirit of RFC 6979. Random secrets are produced by feeding operating
//! system entropy through the same generator, so both paths share one
//! rejection-sampling loop and one validity check.
//!
//! Generator states:
//!
//! - **init**: `K = 00…00`, `V = 01…01` (MAC output size each)
//! - **seed**: for `sep` in `00`, `01`:
//!   `K = MAC_K(V ‖ sep ‖ seed ‖ sep ‖ personalization ‖ sequence)`,
//!   `V = MAC_K(V)`
//! - **candidate**: `V = MAC_K(V)` appended until `num_bytes` are
//!   available, read big-endian and truncated to the bit length of `n`
//! - **accept** if `0 < k < n`, otherwise `K = MAC_K(V ‖ 00)`,
//!   `V = MAC_K(V)` and back to **candidate**
//!
//! The retry loop runs a data-dependent number of times (once, except
//! with probability about `2⁻¹²⁸` on a 256-bit curve). Rejected
//! candidates are wiped and never leave the function.

use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::curves::Curve;
use crate::error::{Error, Result};
use crate::mac::{HmacSha256, MAX_OUTPUT_SIZE, Mac};
use crate::primitives::vli::{self, MAX_WORDS, Vli, WORD_BITS, WORD_BYTES};
use crate::rng;

/// Widest encoded scalar, in bytes.
const MAX_BYTES: usize = MAX_WORDS * WORD_BYTES;

/// `value = MAC_key(value)`.
fn ratchet<M: Mac>(key: &[u8], value: &mut [u8]) {
    let mut mac = M::init(key);
    mac.update(value);
    mac.digest(value);
}

/// Clears every bit at or above `num_bits`.
fn truncate_to_bits(scalar: &mut Vli, num_bits: usize) {
    for (i, word) in scalar.iter_mut().enumerate() {
        let low = i * WORD_BITS;

        if low >= num_bits {
            *word = 0;
        } else if num_bits - low < WORD_BITS {
            *word &= (1 << (num_bits - low)) - 1;
        }
    }
}

/// Derives a scalar in `[1, n)` from `seed`, `personalization` and
/// `sequence`.
///
/// Identical inputs always give the same scalar; changing any of them,
/// including `sequence`, gives an unrelated one.
pub fn generate_deterministic_secret<M: Mac>(
    curve: &Curve,
    seed: &[u8],
    personalization: &[u8],
    sequence: u64,
) -> Zeroizing<Vli> {
    const { assert!(M::OUTPUT_SIZE > 0 && M::OUTPUT_SIZE <= MAX_OUTPUT_SIZE) };

    let size = M::OUTPUT_SIZE;
    let num_bytes = curve.num_bytes();

    let mut key = Zeroizing::new([0u8; MAX_OUTPUT_SIZE]);
    let mut value = Zeroizing::new([0u8; MAX_OUTPUT_SIZE]);
    value[..size].fill(0x01);

    let sequence = sequence.to_be_bytes();

    for separator in [0x00u8, 0x01] {
        let mut mac = M::init(&key[..size]);
        mac.update(&value[..size]);
        mac.update(&[separator]);
        mac.update(seed);
        mac.update(&[separator]);
        mac.update(personalization);
        mac.update(&sequence);
        mac.digest(&mut key[..size]);

        ratchet::<M>(&key[..size], &mut value[..size]);
    }

    let mut candidate = Zeroizing::new([0u8; MAX_BYTES]);
    let mut scalar = Zeroizing::new([0; MAX_WORDS]);

    loop {
        let mut filled = 0;

        while filled < num_bytes {
            ratchet::<M>(&key[..size], &mut value[..size]);

            let take = (num_bytes - filled).min(size);
            candidate[filled..filled + take].copy_from_slice(&value[..take]);
            filled += take;
        }

        vli::bytes_to_native(&mut scalar[..], &candidate[..num_bytes]);
        truncate_to_bits(&mut scalar, curve.num_n_bits());

        if curve.is_valid_scalar(&scalar) {
            return scalar;
        }

        scalar.zeroize();

        let mut mac = M::init(&key[..size]);
        mac.update(&value[..size]);
        mac.update(&[0x00]);
        mac.digest(&mut key[..size]);

        ratchet::<M>(&key[..size], &mut value[..size]);
    }
}

/// Generates a uniformly random scalar in `[1, n)` from the operating
/// system entropy source.
///
/// Draws `2 · num_bytes` bytes of entropy and whitens them through
/// [`generate_deterministic_secret`] with HMAC-SHA-256, an empty
/// personalization and sequence `0`.
///
/// # Errors
/// [`Error::EntropyUnavailable`] if the entropy source fails.
pub fn generate_random_secret(curve: &Curve) -> Result<Zeroizing<Vli>> {
    let mut buffer = Zeroizing::new([0u8; 2 * MAX_BYTES]);
    let seed = &mut buffer[..2 * curve.num_bytes()];

    rng::fill(seed)?;

    Ok(generate_deterministic_secret::<HmacSha256>(curve, seed, &[], 0))
}

/// [`generate_random_secret`] drawing its entropy from `rng`.
///
/// # Errors
/// [`Error::EntropyUnavailable`] if `rng` fails.
pub fn generate_random_secret_with<R: CryptoRngCore + ?Sized>(
    curve: &Curve,
    rng: &mut R,
) -> Result<Zeroizing<Vli>> {
    let mut buffer = Zeroizing::new([0u8; 2 * MAX_BYTES]);
    let seed = &mut buffer[..2 * curve.num_bytes()];

    rng.try_fill_bytes(seed)
        .map_err(|_| Error::EntropyUnavailable)?;

    Ok(generate_deterministic_secret::<HmacSha256>(curve, seed, &[], 0))
}

/// Returns `true` if `0 < scalar < n`.
pub fn is_valid_private_key(curve: &Curve, scalar: &Vli) -> bool {
    curve.is_valid_scalar(scalar)
}

/// Draws a field element in `[1, p)`, used to randomize projective
/// coordinates.
pub(crate) fn random_field_element(curve: &Curve) -> Result<Vli> {
    let num_bytes = curve.num_bytes();
    let mut bytes = Zeroizing::new([0u8; MAX_BYTES]);

    loop {
        rng::fill(&mut bytes[..num_bytes])?;

        let mut element: Vli = [0; MAX_WORDS];
        vli::bytes_to_native(&mut element, &bytes[..num_bytes]);
        truncate_to_bits(&mut element, curve.num_bits());

        let nonzero = !vli::is_zero(&element, curve.num_words());
        let below_p = vli::less_than(&element, curve.p(), curve.num_words());

        if bool::from(nonzero & below_p) {
            return Ok(element);
        }
    }
}
