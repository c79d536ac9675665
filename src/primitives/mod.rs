//! Low-level arithmetic primitives.
//!
//! - [`vli`]: fixed-width multi-limb integers and modular arithmetic

pub mod vli;
