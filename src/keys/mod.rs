//! Key material for short-Weierstrass curves.
//!
//! - `secret`: random and deterministic generation of secret scalars,
//!   shared by key generation and signature nonces
//! - `core`: curve-bound [`PrivateKey`] / [`PublicKey`] types and key
//!   tweaking
//! - [`exchange`]: Diffie–Hellman shared secrets
//!
//! Keys borrow the [`Curve`](crate::curves::Curve) they were created on;
//! mixing keys from different curve instances is rejected.

mod core;
pub mod exchange;
mod secret;

pub use self::core::{PrivateKey, PublicKey, tweak_add};
pub use self::secret::{
    generate_deterministic_secret, generate_random_secret, generate_random_secret_with,
    is_valid_private_key,
};

pub(crate) use self::secret::random_field_element;
