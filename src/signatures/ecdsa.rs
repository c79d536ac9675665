//! ECDSA over prehashed messages.
//!
//! Signing:
//!
//! - `R = k · G`, computed from a random projective `Z`
//! - `r = x(R) mod n`
//! - `s = k⁻¹ (e + r · d) mod n`, where `e` is the hash truncated to the
//!   bit length of `n`
//! - `s` is normalized to the lower half of `[1, n)`
//!
//! The modular inverse is variable-time, so it is never applied to `k`
//! directly: `k` is first multiplied by a random blinding scalar `b`, and
//! `k⁻¹ = b · (k · b)⁻¹`.
//!
//! Hash and encoding are left to the caller; [`Signature`] holds native
//! scalars.

use subtle::Choice;
use zeroize::{Zeroize, Zeroizing};

use crate::curves::{self, Curve};
use crate::error::{Error, Result};
use crate::keys::{
    PrivateKey, PublicKey, generate_deterministic_secret, generate_random_secret,
    random_field_element,
};
use crate::mac::Mac;
use crate::primitives::vli::{self, MAX_WORDS, Vli, WORD_BITS, WORD_BYTES};

/// Nonces tried before giving up. Each failure has probability about
/// `2⁻²⁵⁶` on a 256-bit curve.
const MAX_TRIES: u64 = 64;

/// An ECDSA signature `(r, s)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: Vli,
    pub s: Vli,
}

/// Converts a hash to an integer modulo `n`.
///
/// Keeps the leftmost `num_n_bits` bits of `hash`, then subtracts `n` once
/// if needed.
pub fn bits2int(curve: &Curve, hash: &[u8]) -> Vli {
    let num_words = curve.num_words();
    let hash = &hash[..hash.len().min(curve.num_bytes())];

    let mut native: Vli = [0; MAX_WORDS];
    vli::bytes_to_native(&mut native, hash);

    let hash_bits = hash.len() * 8;
    if hash_bits > curve.num_n_bits() {
        let shift = hash_bits - curve.num_n_bits();
        let words = hash.len().div_ceil(WORD_BYTES);

        for i in 0..words {
            let high = if i + 1 < words {
                native[i + 1] << (WORD_BITS - shift)
            } else {
                0
            };
            native[i] = (native[i] >> shift) | high;
        }
    }

    let mut reduced: Vli = [0; MAX_WORDS];
    let borrow = vli::sub(&mut reduced, &native, curve.n(), num_words);
    vli::assign_if(&mut native, &reduced, num_words, Choice::from((borrow ^ 1) as u8));

    native
}

/// Signs `hash` with the nonce `k`.
///
/// Exposed for known-answer testing and for callers with their own nonce
/// source. Reusing `k` across two messages reveals the private key.
///
/// # Errors
/// - [`Error::InvalidScalar`] if `k` is not in `[1, n)`
/// - [`Error::SigningFailed`] if `r` or `s` is zero; retry with another `k`
/// - [`Error::EntropyUnavailable`] if no blinding value can be drawn
pub fn sign_prehashed(private: &PrivateKey<'_>, hash: &[u8], k: &Vli) -> Result<Signature> {
    let curve = private.curve();
    let num_words = curve.num_words();

    if !curve.is_valid_scalar(k) {
        return Err(Error::InvalidScalar);
    }

    let mut initial_z = random_field_element(curve)?;
    let mut point = curves::point_mul_blinded(curve, curve.g(), k, &initial_z);
    initial_z.zeroize();

    let r = curve.scalar_reduce(&point.x);
    point.y.zeroize();

    if bool::from(vli::is_zero(&r, num_words)) {
        return Err(Error::SigningFailed);
    }

    let blind = generate_random_secret(curve)?;
    let mut k_inv = Zeroizing::new(curve.scalar_mult(k, &blind));
    *k_inv = curve.scalar_inv(&k_inv);
    *k_inv = curve.scalar_mult(&k_inv, &blind);

    let e = bits2int(curve, hash);
    let mut s = Zeroizing::new(curve.scalar_mult(&r, &private.scalar()));
    *s = curve.scalar_add(&s, &e);
    *s = curve.scalar_mult(&s, &k_inv);

    if bool::from(vli::is_zero(&s[..], num_words)) {
        return Err(Error::SigningFailed);
    }

    let mut low_s: Vli = [0; MAX_WORDS];
    vli::sub(&mut low_s, curve.n(), &s[..], num_words);
    let high = vli::less_than(curve.half_n(), &s[..], num_words);
    vli::assign_if(&mut s[..], &low_s, num_words, high);

    Ok(Signature { r, s: *s })
}

/// Signs `hash` with a fresh random nonce.
///
/// # Errors
/// [`Error::EntropyUnavailable`] if the entropy source fails, and
/// [`Error::SigningFailed`] if every nonce tried was degenerate.
pub fn sign(private: &PrivateKey<'_>, hash: &[u8]) -> Result<Signature> {
    for _ in 0..MAX_TRIES {
        let k = generate_random_secret(private.curve())?;

        match sign_prehashed(private, hash, &k) {
            Err(Error::SigningFailed) => continue,
            other => return other,
        }
    }

    Err(Error::SigningFailed)
}

/// Signs `hash` with a nonce derived from the key and the hash.
///
/// The nonce is [`generate_deterministic_secret`] over
/// `seed = int2octets(d) ‖ int2octets(bits2int(hash))`, with the retry
/// count as the sequence number. Signing the same hash twice gives the
/// same signature.
///
/// # Errors
/// [`Error::SigningFailed`] if every nonce tried was degenerate, and
/// [`Error::EntropyUnavailable`] if no blinding value can be drawn.
pub fn sign_deterministic<M: Mac>(private: &PrivateKey<'_>, hash: &[u8]) -> Result<Signature> {
    let curve = private.curve();
    let num_bytes = curve.num_bytes();

    let mut seed = Zeroizing::new([0u8; 2 * MAX_WORDS * WORD_BYTES]);
    vli::native_to_bytes(&mut seed[..num_bytes], &private.scalar()[..]);
    vli::native_to_bytes(&mut seed[num_bytes..2 * num_bytes], &bits2int(curve, hash));

    for sequence in 0..MAX_TRIES {
        let k = generate_deterministic_secret::<M>(curve, &seed[..2 * num_bytes], &[], sequence);

        match sign_prehashed(private, hash, &k) {
            Err(Error::SigningFailed) => continue,
            other => return other,
        }
    }

    Err(Error::SigningFailed)
}

/// Verifies `signature` over `hash`.
///
/// Returns `false` for any invalid input: out-of-range `r` or `s`,
/// signatures that do not match, or a result at infinity. Everything
/// here is public, so the arithmetic is not constant-time.
pub fn verify_prehashed(public: &PublicKey<'_>, hash: &[u8], signature: &Signature) -> bool {
    let curve = public.curve();
    let num_words = curve.num_words();

    if !curve.is_valid_scalar(&signature.r) || !curve.is_valid_scalar(&signature.s) {
        return false;
    }

    let e = bits2int(curve, hash);
    let w = curve.scalar_inv(&signature.s);
    let u1 = curve.scalar_mult(&e, &w);
    let u2 = curve.scalar_mult(&signature.r, &w);

    let sum = curves::point_add(
        curve,
        &curves::point_mul(curve, curve.g(), &u1),
        &curves::point_mul(curve, public.point(), &u2),
    );

    if sum.is_infinity() {
        return false;
    }

    let v = curve.scalar_reduce(&sum.x);

    vli::variable_time_cmp(&v, &signature.r, num_words).is_eq()
}
