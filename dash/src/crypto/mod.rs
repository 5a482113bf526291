//! Cryptographic primitives.

#[cfg(feature = "bls")]
pub mod bls;
