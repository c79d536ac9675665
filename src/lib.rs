//! Elliptic-curve arithmetic and ECDSA for short-Weierstrass curves
//!
//! This crate provides a constant-time arithmetic engine for curves of the
//! secp256k1 class, `y² = x³ + ax + b` over a prime field, together with
//! the key and signature operations built on it.
//!
//! The focus is on **clarity and auditability**. Every
//! value lives in a fixed-size limb array, every secret-dependent choice
//! is a masked select, and the scalar ladder runs the same number of steps
//! for every scalar.
//!
//! # Module overview
//!
//! - `primitives`  
//!   Very-long-integer (VLI) arithmetic over 64-bit limbs: addition,
//!   multiplication, modular reduction and inversion, comparisons, and the
//!   big-endian byte boundary.
//!
//! - `curves`  
//!   The curve descriptor, the `CurveOps` strategy trait with its generic
//!   `a = -3` fallback and the secp256k1 fast path, co-Z point arithmetic
//!   and the regularized scalar ladder. Built-in curves: secp256k1,
//!   secp256r1, secp192r1.
//!
//! - `keys`  
//!   Random and deterministic generation of secret scalars, private and
//!   public key types, key tweaking and Diffie–Hellman.
//!
//! - `signatures`  
//!   ECDSA over prehashed messages, with random or deterministic nonces.
//!
//! - `mac`  
//!   The MAC capability used by deterministic generation, and HMAC over
//!   the SHA-2 family.
//!
//! - `rng`  
//!   The process-wide operating system entropy source.
//!
//! # Design goals
//!
//! - No heap allocations on the arithmetic and signing paths
//! - Constant-time scalar multiplication, with documented exceptions
//!   (modular inversion and rejection sampling)
//! - One generic implementation of the group law, specialized per curve
//!   only where a curve has something cheaper to offer
//!
//! This crate is not intended to replace full-featured, externally audited
//! cryptographic libraries.

mod os;

pub mod curves;
pub mod error;
pub mod keys;
pub mod mac;
pub mod primitives;
pub mod rng;
pub mod signatures;

pub use error::{Error, Result};
