//! High-level GLS254 API: key management, signatures, and Diffie-Hellman.
//!
//! Everything below this module works with raw `Mask`/`bool` success flags;
//! this is where those get translated into `Result<T, GlsError>` for
//! ordinary callers, and where the BLAKE2s domain-separation conventions
//! shared across keygen/hash-to-point/sign/ECDH are collected.

mod ecdh;
mod keys;
mod sign;

pub use ecdh::{ecdh, raw_ecdh};
pub use keys::{PrivateKey, PublicKey};
pub use sign::{sign, verify_vartime, Signature};

use crate::field::f254::F254;
use crate::hash::blake2s::Blake2sContext;
use crate::point::Point;

/// Hashes arbitrary data to a curve point, optionally under a
/// domain-separation `name`.
///
/// Evaluates [`Point::map_to_point`] twice, on two independent BLAKE2s
/// outputs distinguished by a leading blob index (`0x01`/`0x02`), and adds
/// the results. `map_to_point` alone is biased (it misses the rare `t` for
/// which the decompression equation has no solution); summing two
/// independent evaluations is the standard way to erase that bias, since an
/// attacker would need to simultaneously land both hashes on the excluded
/// set to bias the sum.
pub fn hash_to_point(name: Option<&str>, data: &[u8]) -> Point {
    let t1 = hash_blob(1, name, data);
    let t2 = hash_blob(2, name, data);
    Point::map_to_point(&t1).add(&Point::map_to_point(&t2))
}

fn hash_blob(index: u8, name: Option<&str>, data: &[u8]) -> F254 {
    let mut ctx = Blake2sContext::new(32);
    ctx.update(&[index]);
    match name {
        None => ctx.update(&[0x52]),
        Some(n) => {
            ctx.update(&[0x48]);
            ctx.update(n.as_bytes());
            ctx.update(&[0x00]);
        }
    }
    ctx.update(data);
    let mut digest = [0u8; 32];
    ctx.finalize(&mut digest);
    // An arbitrary hash output's top bits may not satisfy F254::decode's
    // canonical-encoding constraint; per spec §4.3.7 this uses the
    // reduce-on-decode variant rather than truncating or rejecting, since
    // this map must be total over all possible digests.
    F254::decode_reduce(&digest)
}
