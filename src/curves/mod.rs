//! Short-Weierstrass curves and their point arithmetic.
//!
//! A [`Curve`] is built once and shared read-only. The built-in curves
//! are constructed lazily on first use:
//!
//! - [`secp256k1()`]: `a = 0`, specialized reduction and doubling
//! - [`secp256r1()`]: `a = -3`, generic arithmetic
//! - [`secp192r1()`]: `a = -3`, generic arithmetic over three limbs
//!
//! Other `a = -3` curves with `p ≡ 3 (mod 4)` can be described with
//! [`CurveParams`] and used with [`GenericOps`].

use std::sync::OnceLock;

mod curve;
pub mod generic;
mod point;
mod secp192r1;
mod secp256k1;
mod secp256r1;

pub use self::curve::{Curve, CurveOps, CurveParams};
pub use self::generic::GenericOps;
pub use self::point::{
    AffinePoint, compress, decompress, is_valid_point, point_add, point_mul, point_mul_blinded,
};
pub use self::secp256k1::Secp256k1Ops;

pub(crate) use self::point::write_compressed;

static SECP256K1: OnceLock<Curve> = OnceLock::new();
static SECP256R1: OnceLock<Curve> = OnceLock::new();
static SECP192R1: OnceLock<Curve> = OnceLock::new();

/// The secp256k1 curve.
pub fn secp256k1() -> &'static Curve {
    SECP256K1.get_or_init(|| Curve::from_constants(&secp256k1::CONSTANTS, &Secp256k1Ops))
}

/// The secp256r1 (P-256) curve.
pub fn secp256r1() -> &'static Curve {
    SECP256R1.get_or_init(|| Curve::from_constants(&secp256r1::CONSTANTS, &GenericOps))
}

/// The secp192r1 (P-192) curve.
pub fn secp192r1() -> &'static Curve {
    SECP192R1.get_or_init(|| Curve::from_constants(&secp192r1::CONSTANTS, &GenericOps))
}
