//! GLS254: binary-field elliptic curve cryptography.
//!
//! This crate provides low-level, constant-time building blocks over the
//! GLS254 curve (a binary-field curve equipped with a fast GLS endomorphism)
//! together with a small signing/key-exchange protocol layer built on top.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level cryptographic API. All components
//! are designed to be dependency-free, explicit in their semantics, and
//! suitable for security-critical code.
//!
//! # Module overview
//!
//! - `consttime`
//!   Constant-time mask type and selection helpers used throughout the
//!   field, point, and scalar layers to avoid secret-dependent branching.
//!
//! - `error`
//!   The small set of error conditions the protocol layer can report
//!   (malformed scalars, malformed points, verification failure).
//!
//! - `hash`
//!   BLAKE2s, hand-rolled and dependency-free, used as the crate's sole
//!   hash primitive (seed expansion, challenge hashing, key derivation).
//!
//! - `field`
//!   GF(2^127) (`f127`) and GF(2^254) = GF(2^127)\[u\]/(u^2+u+1) (`f254`)
//!   arithmetic: addition, multiplication, squaring, inversion, square
//!   roots, trace and half-trace.
//!
//! - `scalar`
//!   Arithmetic modulo the group order `r`, including the GLS scalar
//!   decomposition (`split`) that `point`'s endomorphism-accelerated ladder
//!   consumes.
//!
//! - `point`
//!   The GLS254 group: encoding/decoding, the chord-and-tangent group law,
//!   the zeta endomorphism, windowed and fixed-base scalar multiplication,
//!   and hashing-to-curve.
//!
//! - `protocol`
//!   Key generation, Schnorr-style signing/verification, and Diffie-Hellman
//!   key exchange built from the primitives above.
//!
//! # Design goals
//!
//! - No heap allocations in core primitives
//! - Minimal and explicit APIs
//! - Constant-time by default; the single variable-time exception
//!   (`protocol::verify_vartime`) is documented as such
//! - Clear separation between field/point/scalar arithmetic and the
//!   protocol logic built on top of it

pub mod consttime;
pub mod error;
pub mod field;
pub mod hash;
pub mod point;
pub mod protocol;
pub mod scalar;
