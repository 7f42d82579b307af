//! Diffie-Hellman key agreement.

use crate::consttime;
use crate::hash::blake2s::Blake2sContext;
use crate::point::{scalar_mul, Point};

use super::keys::PrivateKey;

/// Orders two 32-byte buffers lexicographically via a constant-time
/// byte-by-byte borrow comparison (both buffers are public key encodings,
/// i.e. public data, but the reference keeps this branch-free and so do we).
/// Subtracting `a - b` most-significant-byte-first leaves a final borrow of
/// `1` exactly when `a < b`; when `a >= b` (including `a == b`, where
/// swapping is a harmless no-op) the borrow is `0` and the two buffers swap.
fn lexicographic_order(a: &[u8; 32], b: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
    let mut borrow = 0u32;
    for i in (0..32).rev() {
        let x = a[i] as u32;
        let y = b[i] as u32;
        borrow = (x.wrapping_sub(y).wrapping_sub(borrow) >> 31) & 1;
    }
    let swap = consttime::Mask::from_bit(1 - borrow);
    let mut lo = *a;
    let mut hi = *b;
    for i in 0..32 {
        let t = swap.as_u32() as u8 & (lo[i] ^ hi[i]);
        lo[i] ^= t;
        hi[i] ^= t;
    }
    (lo, hi)
}

/// Computes a shared secret with a peer identified by their raw compressed
/// public-key bytes.
///
/// Unlike every other `protocol` entry point this takes raw bytes rather
/// than a validated [`super::keys::PublicKey`], and it never reports
/// failure through control flow: an invalid (or neutral) peer encoding
/// decodes to the neutral element (see [`Point::decode`]), and the
/// resulting shared value is masked to the caller's own secret scalar
/// instead, so the derived key still depends on both parties involved
/// rather than collapsing to one constant value shared by every failure.
/// This keeps the function's running time and control flow independent of
/// whether decoding succeeded; callers that need to know which happened
/// should validate the peer's key themselves via
/// [`super::keys::PublicKey::decode`] first.
pub fn ecdh(sk: &PrivateKey, peer_pub: &[u8; 32]) -> [u8; 32] {
    let (peer_point, ok) = Point::decode(peer_pub);
    let bad = ok.not().or(peer_point.isneutral());
    let shared = scalar_mul(&peer_point, &sk.sec);
    let shared_enc = shared.encode();

    // If the peer key was invalid, fold in our own secret scalar instead of
    // the (otherwise-constant, information-free) neutral-point encoding, so
    // the derived key still depends on both parties and isn't a fixed value
    // every invalid peer collapses to.
    let mut masked_shared = shared_enc;
    for i in 0..32 {
        masked_shared[i] ^= bad.as_u32() as u8 & (shared_enc[i] ^ sk.sec[i]);
    }

    let (pk_lo, pk_hi) = lexicographic_order(&sk.pk.enc, peer_pub);
    let flag = consttime::select_u32(bad.not(), 0x53, 0x46) as u8;

    let mut ctx = Blake2sContext::new(32);
    ctx.update(&pk_lo);
    ctx.update(&pk_hi);
    ctx.update(&[flag]);
    ctx.update(&masked_shared);
    let mut out = [0u8; 32];
    ctx.finalize(&mut out);
    out
}

/// Uncompressed, non-constant-time Diffie-Hellman, kept for benchmarking
/// and testing the cost of skipping compression/decompression; not part of
/// the wire protocol. Returns `None` if `peer_pub` does not decode to a
/// valid point in the prime-order subgroup.
pub fn raw_ecdh(sk: &PrivateKey, peer_pub: &[u8; 64]) -> Option<[u8; 32]> {
    let (peer_point, ok) = Point::decode_uncompressed(peer_pub);
    if !ok.is_true() {
        return None;
    }
    let shared = scalar_mul(&peer_point, &sk.sec);
    Some(shared.encode())
}
