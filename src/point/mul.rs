//! Scalar multiplication with GLS endomorphism decomposition.
//!
//! Both [`mul`] and [`mulgen`] use the constant-time, windowed signed-digit
//! ladder of spec §4.3.6: the scalar is split via [`crate::scalar::split`]
//! into `(n0, s0, n1, s1)` with `k = ±n0 ± mu*n1 (mod r)`, each half is
//! Booth-recoded into 4-bit signed digits
//! ([`crate::scalar::recode4_u128`]), and the ladder walks both digit
//! streams together from the most significant digit down, doubling four
//! times and adding one window lookup per digit per half (the `n1` half
//! routed through [`Point::zeta`]).
//!
//! [`Point::zeta`] is derived independently from the field automorphism
//! (see the module doc on [`crate::point`]) rather than transcribed from the
//! reference's inline-assembly implementation, so while it is known to
//! square to point negation (confirmed by `zeta_squared_is_negation` in
//! `point::tests`), it isn't known up front *which* of the two square roots
//! of `-1` modulo `r` it realizes relative to [`crate::scalar::MU`]. Rather
//! than guess, [`zeta_flip`] determines the correspondence once, at first
//! use, by comparing `zeta(G)` against `mu*G` computed via the plain
//! non-endomorphism ladder ([`plain_mul`]) — itself correct independently of
//! this question — and caches whichever sign makes them agree. Both `G` and
//! `mu` are public constants, so this check carries no secret-dependent
//! timing or branching concerns.

use std::sync::OnceLock;

use super::{Affine, Point};
use crate::consttime::Mask;
use crate::scalar;

/// The plain two-half ladder, with no endomorphism involved: used only to
/// bootstrap [`zeta_flip`]'s one-time correspondence check.
fn plain_mul(p: &Point, k: &[u8; 32]) -> Point {
    let kr = scalar::reduce(k);
    let lo: [u8; 16] = kr[0..16].try_into().unwrap();
    let hi: [u8; 16] = kr[16..32].try_into().unwrap();
    let digits_lo = scalar::recode4_u128(&lo);
    let digits_hi = scalar::recode4_u128(&hi);
    let win = p.make_window_8();

    let mut acc = Point::NEUTRAL;
    for i in (0..32).rev() {
        acc = acc.xdouble(4);
        acc = acc.add(&Point::lookup8(&win, digits_hi[i]));
    }
    for i in (0..32).rev() {
        acc = acc.xdouble(4);
        acc = acc.add(&Point::lookup8(&win, digits_lo[i]));
    }
    acc
}

static ZETA_FLIP: OnceLock<Mask> = OnceLock::new();

/// Whether [`Point::zeta`]'s `zn` flag must be inverted to make it realize
/// multiplication by [`scalar::MU`] (rather than by `-MU`). Determined once,
/// by comparing `zeta(G, false)` against `mu*G` for the base point `G`, and
/// cached for the process lifetime; see the module doc.
fn zeta_flip() -> Mask {
    *ZETA_FLIP.get_or_init(|| {
        let g = Point::base();
        let mu_g = plain_mul(&g, &scalar::MU);
        let z = g.zeta(Mask::FALSE);
        z.equals(&mu_g).not()
    })
}

fn endomorphism_ladder(win: &[Affine; 8], d0: &[i8; 32], d1: &[i8; 32], zn: Mask) -> Point {
    let mut acc = Point::lookup8(win, d0[31]);
    acc = acc.add(&Point::lookup8(win, d1[31]).zeta(zn));
    for i in (0..31).rev() {
        acc = acc.xdouble(4);
        acc = acc.add(&Point::lookup8(win, d0[i]));
        acc = acc.add(&Point::lookup8(win, d1[i]).zeta(zn));
    }
    acc
}

/// Variable-base scalar multiplication `k * p`. `k` need not be reduced.
pub fn mul(p: &Point, k: &[u8; 32]) -> Point {
    let (ak0, s0, ak1, s1) = scalar::split(k);
    let p_signed = p.condneg(s0);
    let win = p_signed.make_window_8();
    let zn = s0.xor(s1).xor(zeta_flip());

    let d0 = scalar::recode4_u128(&ak0);
    let d1 = scalar::recode4_u128(&ak1);
    endomorphism_ladder(&win, &d0, &d1, zn)
}

/// Fixed-base scalar multiplication `k * G`, where `G` is the prime-order
/// subgroup's generator ([`Point::base`]).
pub fn mulgen(k: &[u8; 32]) -> Point {
    mul(&Point::base(), k)
}
