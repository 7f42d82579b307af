//! Hash algorithms exposed by the crate.
//!
//! BLAKE2s is the only hash primitive GLS254 needs; it is implemented from
//! scratch rather than pulled in as a dependency.

pub mod blake2s;

pub use blake2s::blake2s;
