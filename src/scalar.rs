//! Scalar arithmetic modulo the GLS254 group order `r = 2^253 + r0`, with
//! `r0 = 83877821160623817322862211711964450037`.
//!
//! Scalars are stored as eight 32-bit limbs, little-endian, matching the
//! layout used everywhere else in this crate for 256-bit integers. All
//! arithmetic here is the textbook schoolbook/Itoh-Tsujii-style partial
//! reduction scheme for primes of the shape `2^k + small`: widen, reduce the
//! high part using `2^k ≡ -r0 (mod r)` (and `2^256 ≡ -8 r0 (mod r)` for the
//! wider intermediates that appear during multiplication and GLS splitting),
//! and finish with a single conditional subtraction.

use crate::consttime::Mask;

/// r0 = 83877821160623817322862211711964450037, little-endian 32-bit limbs.
const R0: [u32; 4] = [0xF43A_8CF5, 0x3CBD_E37C, 0xDC1A_1DAD, 0x3F1A_47DE];
/// The high limb of `r = 2^253 + r0`: bit 253 sits in limb 7 as `0x2000_0000`.
const R_TOP: u32 = 0x2000_0000;

/// `(r+1)/2`, used by `half` when the input is odd.
const RHF: [u32; 8] = [
    0x7A1D_467B, 0x9E5E_F1BE, 0x6E0D_0ED6, 0x1F8D_23EF, 0, 0, 0, 0x1000_0000,
];

/// `(r-1)/2`, padded to 384 bits, used as the centered-rounding offset in
/// [`mul_divr_rounded`].
const HR_PAD: [u32; 12] = [
    0x7A1D_467A, 0x9E5E_F1BE, 0x6E0D_0ED6, 0x1F8D_23EF, 0, 0, 0, 0x1000_0000, 0, 0, 0, 0,
];

/// `8*r0 mod 2^128`, used by the 384-bit partial reduction identity
/// `2^256 ≡ -8*r0 (mod r)`.
const R0_X8M: [u32; 4] = [0xA1D4_67A8, 0xE5EF_1BE7, 0xE0D0_ED69, 0xF8D2_3EF6];
const R_X8_TOP: u32 = 0x0000_0001;

/// `16*r mod 2^256`, added when the 384-bit reduction's subtraction borrows.
const R_X16M: [u32; 8] = [
    0x43A8_CF50, 0xCBDE_37CF, 0xC1A1_DAD3, 0xF1A4_7DED, 0x0000_0003, 0, 0, 0,
];
const R_X16_TOP: u32 = 0x0000_0002;

/// GLS basis constant `vES` (the `S` component of the decomposition basis).
const V_ES: [u32; 4] = [0x3FA5_6696, 0x6399_73CF, 0xFFFF_FFFF, 0x3FFF_FFFF];
/// GLS basis constant `vET` (the `T` component of the decomposition basis).
const V_ET: [u32; 4] = [0xC05A_9969, 0x9C66_8C30, 0x0000_0000, 0x4000_0000];

/// The 32-byte little-endian encoding of `mu`, a square root of `-1` modulo
/// `r`, used both by [`split`] (as the GLS eigenvalue) and by the signature
/// scheme's challenge combination.
pub const MU: [u8; 32] = [
    0x14, 0xF6, 0xA1, 0x89, 0xFC, 0x87, 0x84, 0x1B, 0xFC, 0x63, 0xE1, 0xFA, 0xF1, 0xAD, 0xEF,
    0x1E, 0x99, 0xE4, 0x3F, 0x36, 0xDA, 0xBD, 0x58, 0x9F, 0x93, 0xBC, 0x54, 0x0F, 0xD0, 0xD0,
    0xE6, 0x17,
];

#[inline(always)]
fn addcarry(cc: u32, x: u32, y: u32) -> (u32, u32) {
    let w = x as u64 + y as u64 + cc as u64;
    (w as u32, (w >> 32) as u32)
}

#[inline(always)]
fn subborrow(cc: u32, x: u32, y: u32) -> (u32, u32) {
    let w = (x as u64)
        .wrapping_sub(y as u64)
        .wrapping_sub(cc as u64);
    (w as u32, ((w >> 63) & 1) as u32)
}

fn decode32le(bytes: &[u8; 32]) -> [u32; 8] {
    let mut v = [0u32; 8];
    for (slot, chunk) in v.iter_mut().zip(bytes.chunks_exact(4)) {
        *slot = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    v
}

fn encode32le(v: &[u32; 8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (chunk, limb) in out.chunks_exact_mut(4).zip(v.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    out
}

/// Multiplies two 128-bit integers (4 limbs each), truncating the result to
/// 128 bits.
fn mul128x128_trunc(a: &[u32; 4], b: &[u32; 4]) -> [u32; 4] {
    let mut t = [0u32; 4];
    let mut g: u32;
    g = 0;
    for i in 0..4 {
        let z = b[0] as u64 * a[i] as u64 + g as u64;
        t[i] = z as u32;
        g = (z >> 32) as u32;
    }
    for j in 1..4 {
        g = 0;
        for i in 0..(4 - j) {
            let z = b[j] as u64 * a[i] as u64 + g as u64 + t[i + j] as u64;
            t[i + j] = z as u32;
            g = (z >> 32) as u32;
        }
    }
    t
}

/// Multiplies two 128-bit integers (4 limbs each), producing a full 256-bit
/// (8-limb) result.
fn mul128x128(a: &[u32; 4], b: &[u32; 4]) -> [u32; 8] {
    let mut d = [0u32; 8];
    let mut g: u32 = 0;
    for i in 0..4 {
        let z = b[0] as u64 * a[i] as u64 + g as u64;
        d[i] = z as u32;
        g = (z >> 32) as u32;
    }
    d[4] = g;
    for j in 1..4 {
        g = 0;
        for i in 0..4 {
            let z = b[j] as u64 * a[i] as u64 + g as u64 + d[i + j] as u64;
            d[i + j] = z as u32;
            g = (z >> 32) as u32;
        }
        d[j + 4] = g;
    }
    d
}

/// Multiplies a 256-bit integer (8 limbs) by a 128-bit integer (4 limbs),
/// producing a 384-bit (12-limb) result.
fn mul256x128(a: &[u32; 8], b: &[u32; 4]) -> [u32; 12] {
    let al: [u32; 4] = a[0..4].try_into().unwrap();
    let ah: [u32; 4] = a[4..8].try_into().unwrap();
    let dl = mul128x128(&al, b);
    let dh = mul128x128(&ah, b);

    let mut d = [0u32; 12];
    d[0..4].copy_from_slice(&dl[0..4]);
    let mut cc;
    (d[4], cc) = addcarry(0, dl[4], dh[0]);
    for i in 1..4 {
        (d[4 + i], cc) = addcarry(cc, dl[4 + i], dh[i]);
    }
    for i in 4..8 {
        (d[4 + i], cc) = addcarry(cc, 0, dh[i]);
    }
    let _ = cc;
    d
}

/// Multiplies two 256-bit integers (8 limbs each), producing a 512-bit
/// (16-limb) result.
fn mul256x256(a: &[u32; 8], b: &[u32; 8]) -> [u32; 16] {
    let al: [u32; 4] = a[0..4].try_into().unwrap();
    let ah: [u32; 4] = a[4..8].try_into().unwrap();
    let dl = mul256x128(b, &al);
    let dh = mul256x128(b, &ah);

    let mut d = [0u32; 16];
    d[0..4].copy_from_slice(&dl[0..4]);
    let mut cc;
    (d[4], cc) = addcarry(0, dl[4], dh[0]);
    for i in 1..8 {
        (d[4 + i], cc) = addcarry(cc, dl[4 + i], dh[i]);
    }
    for i in 8..12 {
        (d[4 + i], cc) = addcarry(cc, 0, dh[i]);
    }
    let _ = cc;
    d
}

/// Partial reduction modulo `r` of a value up to `2^285 - 1`, supplied as a
/// 256-bit integer `a` plus its bits `253..285` in `ah`. The result fits in
/// 254 bits (below `2r`).
fn reduce256_partial(a: &[u32; 8], ah: u32) -> [u32; 8] {
    let ah = (ah << 3) | (a[7] >> 29);
    let mut t = *a;
    t[7] &= 0x1FFF_FFFF;

    let mut u = [0u32; 5];
    let mut x = 0u32;
    for i in 0..4 {
        let z = ah as u64 * R0[i] as u64 + x as u64;
        u[i] = z as u32;
        x = (z >> 32) as u32;
    }
    u[4] = x;

    let mut cc;
    (t[0], cc) = subborrow(0, t[0], u[0]);
    for i in 1..5 {
        (t[i], cc) = subborrow(cc, t[i], u[i]);
    }
    for i in 5..8 {
        (t[i], cc) = subborrow(cc, t[i], 0);
    }

    let x = 0u32.wrapping_sub(cc);
    let mut d = [0u32; 8];
    (d[0], cc) = addcarry(0, t[0], x & R0[0]);
    for i in 1..4 {
        (d[i], cc) = addcarry(cc, t[i], x & R0[i]);
    }
    for i in 4..7 {
        (d[i], cc) = addcarry(cc, t[i], 0);
    }
    (d[7], _) = addcarry(cc, t[7], x & R_TOP);
    d
}

/// Finishes a partial reduction (conditional subtraction of `r`).
fn reduce256_finish(a: &[u32; 8]) -> [u32; 8] {
    let mut t = [0u32; 8];
    let mut cc;
    (t[0], cc) = subborrow(0, a[0], R0[0]);
    for i in 1..4 {
        (t[i], cc) = subborrow(cc, a[i], R0[i]);
    }
    for i in 4..7 {
        (t[i], cc) = subborrow(cc, a[i], 0);
    }
    (t[7], cc) = subborrow(cc, a[7], R_TOP);

    let m = 0u32.wrapping_sub(cc);
    let mut d = [0u32; 8];
    for i in 0..8 {
        d[i] = t[i] ^ (m & (t[i] ^ a[i]));
    }
    d
}

/// Partial reduction modulo `r` of a 384-bit value, via `2^256 ≡ -8 r0`.
fn reduce384_partial(a: &[u32; 12]) -> [u32; 8] {
    let a1: [u32; 4] = a[8..12].try_into().unwrap();
    let t0 = mul128x128(&a1, &R0_X8M);

    let mut t = [0u32; 8];
    let mut cc;
    (t[0], cc) = subborrow(0, a[0], t0[0]);
    for i in 1..8 {
        (t[i], cc) = subborrow(cc, a[i], t0[i]);
    }
    let mut t8 = 0u32.wrapping_sub(cc);

    (t[4], cc) = subborrow(0, t[4], a1[0]);
    for i in 1..4 {
        (t[4 + i], cc) = subborrow(cc, t[4 + i], a1[i]);
    }
    t8 = t8.wrapping_sub(cc);

    let m = ((t8 as i32) >> 31) as u32;
    (t[0], cc) = addcarry(0, t[0], m & R_X16M[0]);
    for i in 1..8 {
        (t[i], cc) = addcarry(cc, t[i], m & R_X16M[i]);
    }
    (t8, _) = addcarry(cc, t8, m & R_X16_TOP);

    reduce256_partial(&t, t8)
}

/// Multiplication modulo `r` of two (not necessarily reduced) 256-bit
/// operands.
fn modr_mul(a: &[u32; 8], b: &[u32; 8]) -> [u32; 8] {
    let x = mul256x256(a, b);
    let mut e = [0u32; 12];
    e.copy_from_slice(&x[4..16]);
    let t = reduce384_partial(&e);
    e[0..4].copy_from_slice(&x[0..4]);
    e[4..12].copy_from_slice(&t);
    let t = reduce384_partial(&e);
    reduce256_finish(&t)
}

/// Encodes a signed 128-bit integer (given as 4 limbs, two's complement) as
/// an absolute value (16 bytes little-endian) plus a sign mask.
fn abs_encode128(a: &[u32; 4]) -> ([u8; 16], Mask) {
    let s = ((a[3] as i32) >> 31) as u32;
    let mut out = [0u32; 4];
    let mut cc;
    (out[0], cc) = subborrow(0, a[0] ^ s, s);
    for i in 1..4 {
        (out[i], cc) = subborrow(cc, a[i] ^ s, s);
    }
    let _ = cc;
    let mut bytes = [0u8; 16];
    for (chunk, limb) in bytes.chunks_exact_mut(4).zip(out.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    (bytes, Mask::from_raw(s))
}

/// Reduces an arbitrary-length little-endian byte string modulo `r`.
///
/// Matches the reference's chunked folding: the top 16-32 bytes are decoded
/// and partially reduced first, then each lower 16-byte chunk is folded in
/// via the 384-bit partial reduction (equivalent to shifting the running
/// total up by 128 bits and adding the new chunk).
pub fn reduce(a: &[u8]) -> [u8; 32] {
    if a.len() < 32 {
        let mut out = [0u8; 32];
        out[..a.len()].copy_from_slice(a);
        return out;
    }

    let mut pos = a.len();
    let k = a.len() & 31;
    let mut t: [u32; 8];
    if k == 0 {
        let chunk: [u8; 32] = a[pos - 32..pos].try_into().unwrap();
        t = decode32le(&chunk);
        pos -= 32;
        t = reduce256_partial(&t, 0);
    } else if k == 16 {
        let chunk: [u8; 32] = a[pos - 32..pos].try_into().unwrap();
        t = decode32le(&chunk);
        pos -= 32;
    } else {
        let take = if k < 16 { k + 16 } else { k };
        let mut tmp = [0u8; 32];
        tmp[..take].copy_from_slice(&a[pos - take..pos]);
        t = decode32le(&tmp);
        pos -= take;
    }

    while pos != 0 {
        pos -= 16;
        let mut t2 = [0u32; 12];
        let chunk: [u8; 16] = a[pos..pos + 16].try_into().unwrap();
        for (slot, b) in t2.iter_mut().zip(chunk.chunks_exact(4)) {
            *slot = u32::from_le_bytes(b.try_into().unwrap());
        }
        t2[4..12].copy_from_slice(&t);
        t = reduce384_partial(&t2);
    }

    let t = reduce256_finish(&t);
    encode32le(&t)
}

/// Adds two (possibly unreduced, but below `2^256`) scalars modulo `r`.
pub fn add(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let ta = decode32le(a);
    let tb = decode32le(b);
    let mut td = [0u32; 8];
    let mut cc;
    (td[0], cc) = addcarry(0, ta[0], tb[0]);
    for i in 1..8 {
        (td[i], cc) = addcarry(cc, ta[i], tb[i]);
    }
    let td = reduce256_partial(&td, cc);
    let td = reduce256_finish(&td);
    encode32le(&td)
}

/// Subtracts `b` from `a` modulo `r`.
pub fn sub(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let ta = decode32le(a);
    let tb = decode32le(b);
    let mut td = [0u32; 8];
    let mut cc;
    (td[0], cc) = subborrow(0, ta[0], tb[0]);
    for i in 1..8 {
        (td[i], cc) = subborrow(cc, ta[i], tb[i]);
    }
    let m = 0u32.wrapping_sub(cc);
    (td[0], cc) = addcarry(0, td[0], m & R0_X8M[0]);
    for i in 1..4 {
        (td[i], cc) = addcarry(cc, td[i], m & R0_X8M[i]);
    }
    (td[4], cc) = addcarry(cc, td[4], m & 1);
    for i in 5..8 {
        (td[i], cc) = addcarry(cc, td[i], 0);
    }
    let t8 = cc;
    let td = reduce256_partial(&td, t8);
    let td = reduce256_finish(&td);
    encode32le(&td)
}

/// Negates a scalar modulo `r`.
pub fn neg(a: &[u8; 32]) -> [u8; 32] {
    sub(&[0u8; 32], a)
}

/// Multiplies two scalars modulo `r`.
pub fn mul(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let ta = decode32le(a);
    let tb = decode32le(b);
    encode32le(&modr_mul(&ta, &tb))
}

/// Halves a scalar modulo `r` (`r` is odd, so this is always exact).
pub fn half(a: &[u8; 32]) -> [u8; 32] {
    let mut x = decode32le(a);
    let m = 0u32.wrapping_sub(x[0] & 1);
    for i in 0..7 {
        x[i] = (x[i] >> 1) | (x[i + 1] << 31);
    }
    x[7] >>= 1;

    let mut cc;
    (x[0], cc) = addcarry(0, x[0], m & RHF[0]);
    for i in 1..8 {
        (x[i], cc) = addcarry(cc, x[i], m & RHF[i]);
    }
    let _ = cc;
    let x = reduce256_partial(&x, 0);
    let x = reduce256_finish(&x);
    encode32le(&x)
}

/// Returns true iff `a` (as a 256-bit integer) already lies in `[0, r)`.
pub fn is_reduced(a: &[u8; 32]) -> bool {
    let t = decode32le(a);
    let mut cc;
    (_, cc) = subborrow(0, t[0], R0[0]);
    for i in 1..4 {
        (_, cc) = subborrow(cc, t[i], R0[i]);
    }
    for i in 4..7 {
        (_, cc) = subborrow(cc, t[i], 0);
    }
    (_, cc) = subborrow(cc, t[7], R_TOP);
    cc != 0
}

/// Returns true iff all 32 bytes are zero.
pub fn is_zero(a: &[u8; 32]) -> bool {
    a.iter().fold(0u8, |acc, b| acc | b) == 0
}

/// For `k < r` and `e < 2^127 - 2`, computes `round(k*e/r)` as a signed
/// 128-bit integer (4 limbs, two's complement).
fn mul_divr_rounded(k: &[u32; 8], e: &[u32; 4]) -> [u32; 4] {
    let mut z = mul256x128(k, e);
    let mut cc = 0u32;
    for i in 0..12 {
        (z[i], cc) = addcarry(cc, z[i], HR_PAD[i]);
    }
    let _ = cc;

    let mut z0 = [0u32; 8];
    z0[0..7].copy_from_slice(&z[0..7]);
    z0[7] = z[7] & 0x1FFF_FFFF;
    let mut g = z[7] >> 29;
    let mut z1 = [0u32; 4];
    for i in 0..4 {
        z1[i] = (z[i + 8] << 3) | g;
        g = z[i + 8] >> 29;
    }

    let t = mul128x128(&z1, &R0);

    let mut cc = 0u32;
    for i in 0..8 {
        let (_, c) = subborrow(cc, z0[i], t[i]);
        cc = c;
    }
    let mut d = [0u32; 4];
    for i in 0..4 {
        (d[i], cc) = subborrow(cc, z1[i], 0);
    }
    d
}

/// The GLS scalar decomposition `k = k0 + k1*mu (mod r)`, with `|k0|, |k1| <
/// 2^127`. `k` must already be fully reduced.
fn split_mu(k: &[u32; 8]) -> ([u32; 4], [u32; 4]) {
    let c = mul_divr_rounded(k, &V_ET);
    let d = mul_divr_rounded(k, &V_ES);

    let mut k0: [u32; 4] = k[0..4].try_into().unwrap();
    let w = mul128x128_trunc(&d, &V_ES);
    k0 = sub128_trunc(&k0, &w);
    let w = mul128x128_trunc(&c, &V_ET);
    k0 = sub128_trunc(&k0, &w);

    let mut k1 = mul128x128_trunc(&d, &V_ET);
    let w = mul128x128_trunc(&c, &V_ES);
    k1 = sub128_trunc(&k1, &w);

    (k0, k1)
}

fn sub128_trunc(a: &[u32; 4], b: &[u32; 4]) -> [u32; 4] {
    let mut d = [0u32; 4];
    let mut cc = 0u32;
    for i in 0..4 {
        (d[i], cc) = subborrow(cc, a[i], b[i]);
    }
    let _ = cc;
    d
}

/// GLS decomposition: splits `k` into `(n0, s0, n1, s1)` with `|n0|, |n1| <
/// 2^127` and `k ≡ s0'*n0 + s1'*n1*mu (mod r)`, where `s0'`/`s1'` are `+1`
/// when the sign mask is [`Mask::FALSE`] and `-1` when it is [`Mask::TRUE`].
pub fn split(k: &[u8; 32]) -> ([u8; 16], Mask, [u8; 16], Mask) {
    let t = decode32le(k);
    let t = reduce256_partial(&t, 0);
    let t = reduce256_finish(&t);
    let (k0, k1) = split_mu(&t);
    let (ak0, s0) = abs_encode128(&k0);
    let (ak1, s1) = abs_encode128(&k1);
    (ak0, s0, ak1, s1)
}

/// Booth recoding of a 64-bit unsigned little-endian integer into 16 signed
/// digits in `[-8, 8]`, low-to-high. Returns the carry (0 or 1); if set, the
/// digits encode `n - 2^64` instead of `n`.
pub fn recode4_u64(n: &[u8; 8]) -> ([i8; 16], u32) {
    let mut sd = [0i8; 16];
    let mut cc: u32 = 0;
    for i in 0..8 {
        let x = n[i] as u32;
        let mut d = (x & 0x0F) + cc;
        let mut m = (8u32.wrapping_sub(d)) >> 8;
        sd[(i << 1)] = (d.wrapping_sub(m & 16)) as i8;
        cc = m & 1;

        d = (x >> 4) + cc;
        m = (8u32.wrapping_sub(d)) >> 8;
        sd[(i << 1) + 1] = (d.wrapping_sub(m & 16)) as i8;
        cc = m & 1;
    }
    (sd, cc)
}

/// Booth recoding of a little-endian integer below `2^127` (16 bytes) into
/// 32 signed digits in `[-8, 8]`, low-to-high. The top carry is always 0.
pub fn recode4_u128(n: &[u8; 16]) -> [i8; 32] {
    let mut sd = [0i8; 32];
    let mut cc: u32 = 0;
    for i in 0..16 {
        let x = n[i] as u32;
        let mut d = (x & 0x0F) + cc;
        let mut m = (8u32.wrapping_sub(d)) >> 8;
        sd[(i << 1)] = (d.wrapping_sub(m & 16)) as i8;
        cc = m & 1;

        d = (x >> 4) + cc;
        m = (8u32.wrapping_sub(d)) >> 8;
        sd[(i << 1) + 1] = (d.wrapping_sub(m & 16)) as i8;
        cc = m & 1;
    }
    sd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(hi: u64, lo: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..8].copy_from_slice(&lo.to_le_bytes());
        out[8..16].copy_from_slice(&hi.to_le_bytes());
        out
    }

    #[test]
    fn add_sub_round_trip() {
        let a = s(0x1122_3344, 0x5566_7788);
        let b = s(0x0000_0001, 0x0000_0002);
        let sum = add(&a, &b);
        let back = sub(&sum, &b);
        assert_eq!(back, reduce(&a));
    }

    #[test]
    fn neg_add_is_zero() {
        let a = s(0xdead_beef, 0x1234_5678);
        let n = neg(&a);
        let z = add(&a, &n);
        assert_eq!(z, [0u8; 32]);
    }

    #[test]
    fn half_doubled_is_identity() {
        let a = s(0x1, 0x3);
        let h = half(&a);
        let doubled = add(&h, &h);
        assert_eq!(doubled, reduce(&a));
    }

    #[test]
    fn reduce_short_input_is_zero_padded() {
        let a = [1u8, 2, 3];
        let r = reduce(&a);
        assert_eq!(&r[..3], &a[..]);
        assert!(r[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn is_zero_detects_zero() {
        assert!(is_zero(&[0u8; 32]));
        let mut a = [0u8; 32];
        a[5] = 1;
        assert!(!is_zero(&a));
    }

    #[test]
    fn is_reduced_rejects_r_itself() {
        // r = 2^253 + r0: limb 7 has bit 29 set (0x2000_0000), low limbs = r0.
        let mut bytes = [0u8; 32];
        bytes[0..16].copy_from_slice(&{
            let mut b = [0u8; 16];
            for i in 0..4 {
                b[i * 4..i * 4 + 4].copy_from_slice(&R0[i].to_le_bytes());
            }
            b
        });
        bytes[28..32].copy_from_slice(&R_TOP.to_le_bytes());
        assert!(!is_reduced(&bytes));
    }

    #[test]
    fn split_recombines_to_original() {
        let k = s(0x1234_5678_9abc_def0, 0x0fed_cba9_8765_4321);
        let k = reduce(&k);
        let (ak0, s0, ak1, s1) = split(&k);

        let mut k0 = [0u8; 32];
        k0[..16].copy_from_slice(&ak0);
        let mut k1 = [0u8; 32];
        k1[..16].copy_from_slice(&ak1);
        let k0 = if s0 == Mask::TRUE { neg(&k0) } else { k0 };
        let k1 = if s1 == Mask::TRUE { neg(&k1) } else { k1 };

        let k1mu = mul(&k1, &MU);
        let recombined = add(&k0, &k1mu);
        assert_eq!(recombined, k);
    }

    #[test]
    fn split_halves_are_bounded() {
        let k = s(0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff);
        let k = reduce(&k);
        let (ak0, _, ak1, _) = split(&k);
        // < 2^127 means byte 15's top bit is clear.
        assert_eq!(ak0[15] & 0x80, 0);
        assert_eq!(ak1[15] & 0x80, 0);
    }

    #[test]
    fn recode4_u128_matches_value_low_to_high() {
        let mut n = [0u8; 16];
        n[0] = 5;
        let sd = recode4_u128(&n);
        let mut v: i64 = 0;
        for (i, &d) in sd.iter().enumerate() {
            v += (d as i64) << (4 * i);
        }
        assert_eq!(v, 5);
    }

    #[test]
    fn recode4_u64_matches_value() {
        let n = 0x1234_5678_9abc_def0u64.to_le_bytes();
        let (sd, cc) = recode4_u64(&n);
        assert_eq!(cc, 0);
        let mut v: i128 = 0;
        for (i, &d) in sd.iter().enumerate() {
            v += (d as i128) << (4 * i);
        }
        assert_eq!(v as u64, 0x1234_5678_9abc_def0u64);
    }
}
