//! Elliptic-curve Diffie–Hellman.

use zeroize::{Zeroize, Zeroizing};

use super::core::{PrivateKey, PublicKey};
use super::secret::random_field_element;
use crate::curves;
use crate::error::{Error, Result};

/// Elliptic-curve Diffie–Hellman.
///
/// Computes the shared secret between a local private key and a peer
/// public key on the same curve.
///
/// ## Inputs
///
/// - `private`: Local private key `d`.
/// - `public`: Peer public key `Q`. Its point was validated when the key
///   was constructed.
///
/// ## Algorithm
///
/// 1. Check that both keys belong to the same curve instance.
/// 2. Draw a random field element as the initial projective `Z`.
/// 3. Compute `d · Q` with the regularized co-Z ladder.
/// 4. Encode the x-coordinate of the product.
///
/// ## Return value
///
/// The x-coordinate of `d · Q` as `num_bytes` big-endian bytes, wiped on
/// drop.
///
/// ## Security
///
/// - Constant-time with respect to `d`: fixed ladder length and masked
///   register swaps.
/// - The random initial `Z` gives every run fresh intermediate
///   coordinates, including the value inverted at the end.
/// - The product is never returned at infinity.
///
/// # Errors
/// - [`Error::CurveMismatch`] if the keys use different curves
/// - [`Error::EntropyUnavailable`] if no blinding value can be drawn
/// - [`Error::InvalidEncoding`] if the product is the point at infinity
pub fn shared_secret(private: &PrivateKey<'_>, public: &PublicKey<'_>) -> Result<Zeroizing<Vec<u8>>> {
    let curve = private.curve();

    if curve != public.curve() {
        return Err(Error::CurveMismatch);
    }

    let mut initial_z = random_field_element(curve)?;
    let mut product = curves::point_mul_blinded(curve, public.point(), &private.scalar(), &initial_z);
    initial_z.zeroize();

    if product.is_infinity() {
        return Err(Error::InvalidEncoding);
    }

    let mut secret = Zeroizing::new(vec![0u8; curve.num_bytes()]);
    curve.native_to_bytes(&product.x, &mut secret)?;

    product.x.zeroize();
    product.y.zeroize();

    Ok(secret)
}
