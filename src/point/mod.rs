//! The GLS254 group: points on `y^2 + xy = x^3 + u*x^2 + b*x` over GF(2^254),
//! with `b = 1 + z^54` (a GF(2^127) constant) and `u` the GF(2^254) basis
//! element fixed by `u^2 + u + 1 = 0`. This is the standard binary
//! Weierstrass curve obtained from the `s^2 + x*s = (x^2+a*x+b)^2` form of
//! spec `s` by the substitution `r = s + (x^2+a*x+b)`; see `DESIGN.md`.
//!
//! Points are held in plain affine `(x, y)` coordinates plus a constant-time
//! `inf` flag marking the point at infinity, rather than the projective
//! `(X, S, Z, T)` representation of the formulas this crate's reference
//! material keeps in inline assembly; see `DESIGN.md` for the tradeoff.
//! Every operation here is total: it is defined (and masked, not branched)
//! for every input, including the point at infinity and the curve's
//! 2-torsion point at `x = 0`.

mod mul;
mod precomp;

pub use mul::{mulgen, mul as scalar_mul};

use crate::consttime::{self, Mask};
use crate::field::f127::F127;
use crate::field::f254::F254;

/// The curve's linear coefficient, `a = u`.
const CURVE_A: F254 = F254::U;

fn curve_b() -> F254 {
    F254::new(F127::CURVE_B, F127::ZERO)
}

#[inline(always)]
fn select_f127(m: Mask, a: F127, b: F127) -> F127 {
    F127(consttime::select_u128(m, a.0, b.0))
}

#[inline(always)]
fn select_f254(m: Mask, a: F254, b: F254) -> F254 {
    F254::new(select_f127(m, a.a0, b.a0), select_f127(m, a.a1, b.a1))
}

/// A point on the GLS254 curve, or the point at infinity.
///
/// `inf` is the authoritative flag: when it is [`Mask::TRUE`], `x` and `y`
/// hold unspecified (but always well-defined, never garbage-crashing)
/// values. There is no separate projective coordinate system, so this type
/// doubles as the "affine" representation the window/lookup routines below
/// operate on.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) x: F254,
    pub(crate) y: F254,
    pub(crate) inf: Mask,
}

/// Used where the reference material names a bare affine point (window
/// tables, `lookup8_affine`); here it is the same representation.
pub type Affine = Point;

impl Point {
    /// The point at infinity, the group's neutral element.
    pub const NEUTRAL: Point = Point {
        x: F254::ZERO,
        y: F254::ZERO,
        inf: Mask::TRUE,
    };

    #[inline(always)]
    pub fn isneutral(&self) -> Mask {
        self.inf
    }

    /// Constant-time equality of two points, including the infinity case.
    pub fn equals(&self, other: &Point) -> Mask {
        let both_inf = self.inf.and(other.inf);
        let both_finite = self.inf.not().and(other.inf.not());
        let same_coords = self.x.equals(other.x).and(self.y.equals(other.y));
        both_inf.or(both_finite.and(same_coords))
    }

    /// Negation: `-(x, y) = (x, x + y)`. Fixes the point at infinity and the
    /// curve's unique 2-torsion point `(0, 0)`.
    pub fn neg(&self) -> Point {
        Point {
            x: self.x,
            y: self.x.add(self.y),
            inf: self.inf,
        }
    }

    /// Conditionally negates `self` when `ctl` is true.
    pub fn condneg(&self, ctl: Mask) -> Point {
        let negated = self.neg();
        Point {
            x: select_f254(ctl, negated.x, self.x),
            y: select_f254(ctl, negated.y, self.y),
            inf: self.inf,
        }
    }

    /// Point doubling. Total: the curve's unique 2-torsion point (`x = 0`,
    /// where the equation forces `y = 0` too) doubles to infinity, matching
    /// the standard Weierstrass group law.
    pub fn double(&self) -> Point {
        let x1_zero = self.x.is_zero();
        let xinv = self.x.invert();
        // Tangent slope at (x1, y1): derived from F_x/F_y for
        // F = y^2+xy+x^3+a*x^2+b*x, giving lambda = x1 + (y1+b)/x1.
        let lambda = self.x.add(self.y.add(curve_b()).mul(xinv));
        let x3 = lambda.square().add(lambda).add(CURVE_A);
        let y3 = self.x.square().add(curve_b()).add(lambda.add(F254::ONE).mul(x3));

        let zero_case_inf = self.inf.or(x1_zero);
        Point {
            x: select_f254(zero_case_inf, F254::ZERO, x3),
            y: select_f254(zero_case_inf, F254::ZERO, y3),
            inf: zero_case_inf,
        }
    }

    /// Point addition. Total: handles infinity on either side, `self ==
    /// other` (routes to [`Point::double`]), and `other == -self` (routes
    /// to infinity) without branching on secret point values.
    ///
    /// Selection is applied in priority order, each stage overriding the
    /// last: the generic chord formula, overridden by the doubling result
    /// when the two points coincide, overridden by infinity when they are
    /// mutual negatives, and finally overridden by whichever operand is
    /// the identity (computed last so it is correct even when the generic
    /// formula above produced garbage from a `0/0` division involving the
    /// placeholder coordinates of [`Point::NEUTRAL`]).
    pub fn add(&self, other: &Point) -> Point {
        let same_x = self.x.equals(other.x);
        let same_y = self.y.equals(other.y);
        let same_point = same_x.and(same_y);
        let neg_case = same_x.and(same_y.not());

        let xsum = self.x.add(other.x);
        let xsum_inv = xsum.invert();
        let lambda = self.y.add(other.y).mul(xsum_inv);
        let xg = lambda.square().add(lambda).add(xsum).add(CURVE_A);
        let yg = lambda.mul(self.x.add(xg)).add(xg).add(self.y);

        let dbl = self.double();

        let mut x = select_f254(same_point, dbl.x, xg);
        let mut y = select_f254(same_point, dbl.y, yg);
        let mut inf = select_mask(same_point, dbl.inf, Mask::FALSE);

        x = select_f254(neg_case, F254::ZERO, x);
        y = select_f254(neg_case, F254::ZERO, y);
        inf = select_mask(neg_case, Mask::TRUE, inf);

        x = select_f254(other.inf, self.x, x);
        y = select_f254(other.inf, self.y, y);
        inf = select_mask(other.inf, self.inf, inf);

        x = select_f254(self.inf, other.x, x);
        y = select_f254(self.inf, other.y, y);
        inf = select_mask(self.inf, other.inf, inf);

        Point { x, y, inf }
    }

    /// Repeated doubling, `2^n * self`.
    pub fn xdouble(&self, n: u32) -> Point {
        let mut r = *self;
        for _ in 0..n {
            r = r.double();
        }
        r
    }

    /// The GLS254 endomorphism `zeta` (or its negation, when `zn` is true),
    /// derived from the field automorphism `phi: u -> u+1` composed with
    /// the coordinate shift `(x, y) -> (x, y + u*x)` that the curve
    /// equation admits because `u^2 + u = 1` is exactly the field's own
    /// defining relation. See `DESIGN.md` for the derivation.
    pub fn zeta(&self, zn: Mask) -> Point {
        let xp = self.x.phi();
        let shifted_y = self.y.add(CURVE_A.mul(self.x));
        let yp = shifted_y.phi();
        let p = Point {
            x: xp,
            y: yp,
            inf: self.inf,
        };
        p.condneg(zn)
    }

    /// Builds the 8-entry window `[1*P, 2*P, ..., 8*P]` used by the signed
    /// 4-bit digit ladder in [`mulgen`]/[`scalar_mul`].
    pub fn make_window_8(&self) -> [Affine; 8] {
        let mut win = [*self; 8];
        for i in 1..8 {
            win[i] = win[i - 1].add(self);
        }
        win
    }

    /// Constant-time lookup into an 8-entry window by signed digit `k` in
    /// `[-8, 8]`. Returns the neutral element for `k == 0`.
    pub fn lookup8(win: &[Affine; 8], k: i8) -> Point {
        let kk = k as i32;
        let sign_bits = kk >> 31;
        let sign = Mask::from_raw(sign_bits as u32);
        let abs_k = ((kk ^ sign_bits).wrapping_sub(sign_bits)) as u32;

        let mut acc = Point::NEUTRAL;
        for (i, entry) in win.iter().enumerate() {
            let hit = Mask::from_zero_u32(abs_k ^ (i as u32 + 1));
            acc = Point {
                x: select_f254(hit, entry.x, acc.x),
                y: select_f254(hit, entry.y, acc.y),
                inf: select_mask(hit, Mask::FALSE, acc.inf),
            };
        }
        acc.condneg(sign)
    }

    /// Compressed 32-byte encoding. Infinity encodes as all-zero bytes. A
    /// finite point encodes its `x` coordinate with one reserved bit (the
    /// top bit of byte 31, otherwise always zero for a canonical `F254`
    /// encoding) repurposed to disambiguate the two `y` values sharing that
    /// `x`.
    pub fn encode(&self) -> [u8; 32] {
        let xinv = self.x.invert();
        let w = self.y.mul(xinv);
        let k = artin_schreier_target(self.x);
        let w0 = k.qsolve();
        let flip = w.equals(w0.add(F254::ONE));

        let mut bytes = self.x.encode();
        bytes[31] &= 0x7F;
        let bit = consttime::select_u32(flip, 0x80, 0x00) as u8;
        bytes[31] |= bit;

        let not_inf = !(self.inf.as_u32() as u8);
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = bytes[i] & not_inf;
        }
        out
    }

    /// Decodes a compressed 32-byte encoding. Rejects (mask false, result
    /// the neutral element) any encoding that is not the canonical all-zero
    /// infinity encoding, whose `x` does not satisfy the curve's
    /// decompression equation, or whose `x` does not lie in the
    /// prime-order subgroup (`Tr254(x) = Tr254(a) = 1`).
    pub fn decode(bytes: &[u8; 32]) -> (Point, Mask) {
        if consttime::equal_bytes_32(bytes, &[0u8; 32]) {
            return (Point::NEUTRAL, Mask::TRUE);
        }

        let flip = Mask::from_bit(((bytes[31] >> 7) & 1) as u32);
        let mut clean = *bytes;
        clean[31] &= 0x7F;

        let (x, ok_decode) = F254::decode(&clean);
        let k = artin_schreier_target(x);
        let ok_solvable = Mask::from_zero_u32(k.trace254());
        let ok_subgroup = Mask::from_zero_u32(x.trace254() ^ 1);

        let w0 = k.qsolve();
        let w = select_f254(flip, w0.add(F254::ONE), w0);
        let y = w.mul(x);

        let ok = ok_decode.and(ok_solvable).and(ok_subgroup);
        let point = Point {
            x: select_f254(ok, x, F254::ZERO),
            y: select_f254(ok, y, F254::ZERO),
            inf: ok.not(),
        };
        (point, ok)
    }

    /// Uncompressed 64-byte encoding (`x` then `y`, each 32 bytes). Used
    /// only by benchmarks and tests that want to avoid decompression cost;
    /// not part of the wire protocol.
    pub fn encode_uncompressed(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.x.encode());
        out[32..].copy_from_slice(&self.y.encode());
        let not_inf = !(self.inf.as_u32() as u8);
        let mut masked = [0u8; 64];
        for i in 0..64 {
            masked[i] = out[i] & not_inf;
        }
        masked
    }

    pub fn decode_uncompressed(bytes: &[u8; 64]) -> (Point, Mask) {
        if consttime::equal_bytes_32(
            &bytes[..32].try_into().unwrap(),
            &[0u8; 32],
        ) && consttime::equal_bytes_32(&bytes[32..].try_into().unwrap(), &[0u8; 32])
        {
            return (Point::NEUTRAL, Mask::TRUE);
        }
        let xb: [u8; 32] = bytes[..32].try_into().unwrap();
        let yb: [u8; 32] = bytes[32..].try_into().unwrap();
        let (x, ok_x) = F254::decode(&xb);
        let (y, ok_y) = F254::decode(&yb);
        let lhs = y.square().add(x.mul(y));
        let rhs = x.square().mul(x).add(CURVE_A.mul(x.square())).add(curve_b().mul(x));
        let ok_curve = lhs.equals(rhs);
        let ok_subgroup = Mask::from_zero_u32(x.trace254() ^ 1);
        let ok = ok_x.and(ok_y).and(ok_curve).and(ok_subgroup);
        let point = Point {
            x: select_f254(ok, x, F254::ZERO),
            y: select_f254(ok, y, F254::ZERO),
            inf: ok.not(),
        };
        (point, ok)
    }

    /// Deterministic, total map from an arbitrary field element to a curve
    /// point, biased (it lands on the neutral element with the small
    /// probability that no solution exists for the primary formula) rather
    /// than a fully unbiased Shallue-van-de-Woestijne-style map; see
    /// `DESIGN.md`. [`crate::protocol::hash_to_point`] cancels the bias by
    /// summing two independent evaluations.
    pub fn map_to_point(t: &F254) -> Point {
        let x = CURVE_A.add(t.square()).add(*t);
        let k = artin_schreier_target(x);
        let ok = Mask::from_zero_u32(k.trace254());
        let w = k.qsolve();
        let y = w.mul(x);
        Point {
            x: select_f254(ok, x, F254::ZERO),
            y: select_f254(ok, y, F254::ZERO),
            inf: ok.not(),
        }
    }

    /// The fixed base point of the prime-order subgroup.
    pub fn base() -> Point {
        precomp::base()
    }
}

/// `K(x) = x + a + b/x`, the right-hand side of the Artin-Schreier equation
/// `w^2 + w = K(x)` that decompression/point-construction solves for `w`
/// (substituting `y = w*x` into `y^2+xy=x^3+a*x^2+b*x` and dividing through
/// by `x^2`), after which `y = w*x`.
fn artin_schreier_target(x: F254) -> F254 {
    let xinv = x.invert();
    x.add(CURVE_A).add(curve_b().mul(xinv))
}

/// Selects between two masks without branching. `a` and `b` are each
/// guaranteed to already be `0x0000_0000` or `0xFFFF_FFFF`, so the bitwise
/// select over their 32-bit patterns is itself a valid mask pattern.
#[inline(always)]
fn select_mask(m: Mask, a: Mask, b: Mask) -> Mask {
    Mask::from_raw(consttime::select_u32(m, a.as_u32(), b.as_u32()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g() -> Point {
        Point::base()
    }

    #[test]
    fn neutral_is_identity_for_add() {
        let p = g();
        let r = p.add(&Point::NEUTRAL);
        assert_eq!(r.equals(&p), Mask::TRUE);
    }

    #[test]
    fn double_matches_self_add() {
        let p = g();
        assert_eq!(p.double().equals(&p.add(&p)), Mask::TRUE);
    }

    #[test]
    fn add_self_negation_is_neutral() {
        let p = g();
        let n = p.neg();
        let r = p.add(&n);
        assert_eq!(r.isneutral(), Mask::TRUE);
    }

    #[test]
    fn encode_decode_round_trips() {
        let p = g().double();
        let bytes = p.encode();
        let (q, ok) = Point::decode(&bytes);
        assert_eq!(ok, Mask::TRUE);
        assert_eq!(q.equals(&p), Mask::TRUE);
    }

    #[test]
    fn neutral_encodes_to_all_zero() {
        assert_eq!(Point::NEUTRAL.encode(), [0u8; 32]);
        let (p, ok) = Point::decode(&[0u8; 32]);
        assert_eq!(ok, Mask::TRUE);
        assert_eq!(p.isneutral(), Mask::TRUE);
    }

    #[test]
    fn xdouble_matches_repeated_doubling() {
        let p = g();
        let once = p.double().double().double();
        let via_xdouble = p.xdouble(3);
        assert_eq!(once.equals(&via_xdouble), Mask::TRUE);
    }

    #[test]
    fn window_lookup_matches_scalar_multiples() {
        let p = g();
        let win = p.make_window_8();
        for k in 1..=8i8 {
            let looked_up = Point::lookup8(&win, k);
            let mut acc = Point::NEUTRAL;
            for _ in 0..k {
                acc = acc.add(&p);
            }
            assert_eq!(looked_up.equals(&acc), Mask::TRUE);
        }
        assert_eq!(Point::lookup8(&win, 0).isneutral(), Mask::TRUE);
        let neg3 = Point::lookup8(&win, -3);
        let pos3 = Point::lookup8(&win, 3);
        assert_eq!(neg3.equals(&pos3.neg()), Mask::TRUE);
    }

    #[test]
    fn zeta_lands_back_on_the_curve() {
        let p = g();
        let zp = p.zeta(Mask::FALSE);
        let bytes = zp.encode();
        let (_, ok) = Point::decode(&bytes);
        assert_eq!(ok, Mask::TRUE);
    }

    #[test]
    fn zeta_squared_is_negation() {
        // zeta realizes multiplication by a square root of -1: applying it
        // twice must negate the point.
        let p = g();
        let zzp = p.zeta(Mask::FALSE).zeta(Mask::FALSE);
        assert_eq!(zzp.equals(&p.neg()), Mask::TRUE);
    }

    #[test]
    fn zeta_negated_is_negation_of_zeta() {
        let p = g();
        let zp = p.zeta(Mask::FALSE);
        let nzp = p.zeta(Mask::TRUE);
        assert_eq!(nzp.equals(&zp.neg()), Mask::TRUE);
    }
}
