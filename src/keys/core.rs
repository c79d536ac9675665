//! Curve-bound key types.
//!
//! A key borrows the [`Curve`] it was created on. Operations that combine
//! two keys check that both borrow the same curve instance and fail with
//! [`Error::CurveMismatch`] otherwise.

use core::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::secret::{generate_deterministic_secret, generate_random_secret};
use crate::curves::{self, AffinePoint, Curve};
use crate::error::{Error, Result};
use crate::mac::Mac;
use crate::primitives::vli::{self, MAX_WORDS, Vli};

/// A private key: a secret scalar `d` in `[1, n)`.
///
/// The scalar is held masked under the curve's scramble key and wiped
/// when the key is dropped. It is only unmasked into short-lived
/// [`Zeroizing`] buffers.
pub struct PrivateKey<'c> {
    curve: &'c Curve,
    scrambled: Vli,
}

impl<'c> PrivateKey<'c> {
    fn from_valid_scalar(curve: &'c Curve, scalar: &Vli) -> Self {
        Self {
            curve,
            scrambled: curve.scramble(scalar),
        }
    }

    /// Generates a fresh private key from the operating system entropy
    /// source.
    ///
    /// # Errors
    /// [`Error::EntropyUnavailable`] if the entropy source fails.
    pub fn generate(curve: &'c Curve) -> Result<Self> {
        let scalar = generate_random_secret(curve)?;

        Ok(Self::from_valid_scalar(curve, &scalar))
    }

    /// Derives a private key deterministically from `seed`.
    ///
    /// The same `(seed, personalization, sequence)` always yields the same
    /// key.
    pub fn from_seed<M: Mac>(
        curve: &'c Curve,
        seed: &[u8],
        personalization: &[u8],
        sequence: u64,
    ) -> Self {
        let scalar = generate_deterministic_secret::<M>(curve, seed, personalization, sequence);

        Self::from_valid_scalar(curve, &scalar)
    }

    /// Loads a private key from its `num_bytes` big-endian encoding.
    ///
    /// # Errors
    /// [`Error::InvalidEncoding`] if the length is wrong or the value is
    /// not in `[1, n)`.
    pub fn from_bytes(curve: &'c Curve, bytes: &[u8]) -> Result<Self> {
        let scalar = Zeroizing::new(
            curve
                .bytes_to_native(bytes)
                .map_err(|_| Error::InvalidEncoding)?,
        );

        if !curve.is_valid_scalar(&scalar) {
            return Err(Error::InvalidEncoding);
        }

        Ok(Self::from_valid_scalar(curve, &scalar))
    }

    /// Wraps a native scalar.
    ///
    /// # Errors
    /// [`Error::InvalidScalar`] if `scalar` is not in `[1, n)`.
    pub fn from_scalar(curve: &'c Curve, scalar: &Vli) -> Result<Self> {
        if !curve.is_valid_scalar(scalar) {
            return Err(Error::InvalidScalar);
        }

        Ok(Self::from_valid_scalar(curve, scalar))
    }

    /// The curve this key belongs to.
    pub fn curve(&self) -> &'c Curve {
        self.curve
    }

    /// Returns the unmasked scalar.
    pub(crate) fn scalar(&self) -> Zeroizing<Vli> {
        Zeroizing::new(self.curve.scramble(&self.scrambled))
    }

    /// Returns the `num_bytes` big-endian encoding of the scalar.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(vec![0u8; self.curve.num_bytes()]);
        vli::native_to_bytes(&mut out, &self.scalar()[..]);

        out
    }

    /// Computes the matching public key `d · G`.
    pub fn public_key(&self) -> PublicKey<'c> {
        let point = curves::point_mul(self.curve, self.curve.g(), &self.scalar());

        PublicKey {
            curve: self.curve,
            point,
        }
    }
}

impl Drop for PrivateKey<'_> {
    fn drop(&mut self) {
        self.scrambled.zeroize();
    }
}

impl fmt::Debug for PrivateKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve.name())
            .finish_non_exhaustive()
    }
}

/// A public key: a finite point on the curve.
///
/// Construction always validates the point, so every `PublicKey` in
/// existence is on its curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey<'c> {
    curve: &'c Curve,
    point: AffinePoint,
}

impl<'c> PublicKey<'c> {
    /// Wraps an affine point.
    ///
    /// # Errors
    /// [`Error::InvalidEncoding`] if the point is not a finite point on
    /// `curve`.
    pub fn from_point(curve: &'c Curve, point: AffinePoint) -> Result<Self> {
        if !curves::is_valid_point(curve, &point) {
            return Err(Error::InvalidEncoding);
        }

        Ok(Self { curve, point })
    }

    /// Loads the uncompressed encoding `x ‖ y`, each coordinate
    /// `num_bytes` big-endian.
    ///
    /// # Errors
    /// [`Error::InvalidEncoding`] on a wrong length or an invalid point.
    pub fn from_bytes(curve: &'c Curve, bytes: &[u8]) -> Result<Self> {
        let num_bytes = curve.num_bytes();

        if bytes.len() != 2 * num_bytes {
            return Err(Error::InvalidEncoding);
        }

        let point = AffinePoint {
            x: curve.bytes_to_native(&bytes[..num_bytes])?,
            y: curve.bytes_to_native(&bytes[num_bytes..])?,
        };

        Self::from_point(curve, point)
    }

    /// Loads the SEC 1 compressed encoding `02|03 ‖ x`.
    ///
    /// # Errors
    /// [`Error::InvalidEncoding`] on a wrong length, a bad tag or an `x`
    /// with no point.
    pub fn from_compressed(curve: &'c Curve, bytes: &[u8]) -> Result<Self> {
        let point = curves::decompress(curve, bytes).map_err(|_| Error::InvalidEncoding)?;

        Ok(Self { curve, point })
    }

    /// The curve this key belongs to.
    pub fn curve(&self) -> &'c Curve {
        self.curve
    }

    /// The underlying point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }

    /// Returns the uncompressed encoding `x ‖ y`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let num_bytes = self.curve.num_bytes();
        let mut out = vec![0u8; 2 * num_bytes];

        vli::native_to_bytes(&mut out[..num_bytes], &self.point.x);
        vli::native_to_bytes(&mut out[num_bytes..], &self.point.y);

        out
    }

    /// Returns the SEC 1 compressed encoding `02|03 ‖ x`.
    pub fn to_compressed(&self) -> Vec<u8> {
        let num_bytes = self.curve.num_bytes();
        let mut out = vec![0u8; num_bytes + 1];
        curves::write_compressed(&self.point, &mut out);

        out
    }
}

/// Adds `tweak` to a private key and/or `tweak · G` to a public key.
///
/// Depending on which keys are provided:
///
/// - **Private key only**: `d ← d + tweak mod n`.
/// - **Public key only**: `Q ← Q + tweak · G`, without the private key.
/// - **Both keys**: both are updated and stay a matching pair if they
///   were one.
/// - **Neither key**: no-op.
///
/// `tweak` is the `num_bytes` big-endian encoding of a value in `[0, n)`.
/// Keys are only modified when every update succeeds.
///
/// # Errors
/// - [`Error::CurveMismatch`] if the two keys use different curves
/// - [`Error::InvalidEncoding`] if `tweak` has the wrong length
/// - [`Error::InvalidScalar`] if `tweak >= n` or a result would be the
///   zero scalar / point at infinity
pub fn tweak_add(
    public_key: Option<&mut PublicKey<'_>>,
    private_key: Option<&mut PrivateKey<'_>>,
    tweak: &[u8],
) -> Result<()> {
    let curve = match (&public_key, &private_key) {
        (Some(public), Some(private)) if public.curve != private.curve => {
            return Err(Error::CurveMismatch);
        }
        (Some(public), _) => public.curve,
        (None, Some(private)) => private.curve,
        (None, None) => return Ok(()),
    };

    let tweak = Zeroizing::new(
        curve
            .bytes_to_native(tweak)
            .map_err(|_| Error::InvalidEncoding)?,
    );

    if !bool::from(vli::less_than(&tweak[..], curve.n(), curve.num_words())) {
        return Err(Error::InvalidScalar);
    }

    let mut scalar = Zeroizing::new([0; MAX_WORDS]);
    if let Some(private) = &private_key {
        *scalar = curve.scalar_add(&private.scalar(), &tweak);

        if bool::from(vli::is_zero(&scalar[..], curve.num_words())) {
            return Err(Error::InvalidScalar);
        }
    }

    let mut point = AffinePoint::INFINITY;
    if let Some(public) = &public_key {
        let offset = curves::point_mul(curve, curve.g(), &tweak);
        point = curves::point_add(curve, &public.point, &offset);

        if point.is_infinity() {
            return Err(Error::InvalidScalar);
        }
    }

    if let Some(private) = private_key {
        private.scrambled = curve.scramble(&scalar);
    }

    if let Some(public) = public_key {
        public.point = point;
    }

    Ok(())
}
