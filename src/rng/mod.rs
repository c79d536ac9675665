//! Process-wide entropy source.
//!
//! All randomness used by the crate (key generation, signing nonces,
//! projective blinding, curve instance tags) is drawn from the operating
//! system. Fills are serialized through a single lock; this is the only
//! shared mutable state in the crate.
//!
//! [`OsRng`] adapts the same source to the `rand_core` traits so it can be
//! passed wherever a `CryptoRngCore` is expected.

mod os_rng;

pub use os_rng::{OsRng, fill};

pub(crate) use os_rng::random_tag;
