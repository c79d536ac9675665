//! Digital signature schemes.
//!
//! Each submodule implements one scheme on top of the crate's curve and
//! key types. Signing and verification take a message hash; hashing the
//! message and encoding the signature are left to the caller.

pub mod ecdsa;

pub use self::ecdsa::{Signature, sign, sign_deterministic, sign_prehashed, verify_prehashed};
