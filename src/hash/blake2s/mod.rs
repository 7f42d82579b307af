//! BLAKE2s, hand-rolled and dependency-free.
//!
//! This crate's sole hash primitive: used for seed expansion during key
//! generation, challenge hashing during signing/verification, hashing to a
//! curve point, and key derivation during Diffie-Hellman key exchange.

mod computations;
mod constants;
pub mod core;

pub use constants::{IV, SIGMA};
pub use core::{Blake2sContext, blake2s};
