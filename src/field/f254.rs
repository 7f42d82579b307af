//! GF(2^254) = GF(2^127)\[u\]/(u^2 + u + 1), the field GLS254 point
//! coordinates live in.
//!
//! An element is a pair `(a0, a1)` representing `a0 + a1*u`. Since
//! `u^2 = u + 1`, multiplication reduces to three GF(2^127) multiplications
//! (Karatsuba) instead of four.

use crate::consttime::Mask;
use crate::field::f127::F127;

/// An element of GF(2^254).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct F254 {
    pub a0: F127,
    pub a1: F127,
}

impl F254 {
    pub const ZERO: F254 = F254 {
        a0: F127::ZERO,
        a1: F127::ZERO,
    };
    pub const ONE: F254 = F254 {
        a0: F127::ONE,
        a1: F127::ZERO,
    };
    /// The element `u` itself.
    pub const U: F254 = F254 {
        a0: F127::ZERO,
        a1: F127::ONE,
    };

    pub fn new(a0: F127, a1: F127) -> F254 {
        F254 { a0, a1 }
    }

    #[inline(always)]
    pub fn add(self, other: F254) -> F254 {
        F254 {
            a0: self.a0.add(other.a0),
            a1: self.a1.add(other.a1),
        }
    }

    #[inline(always)]
    pub fn equals(self, other: F254) -> Mask {
        self.a0.equals(other.a0).and(self.a1.equals(other.a1))
    }

    #[inline(always)]
    pub fn is_zero(self) -> Mask {
        self.a0.is_zero().and(self.a1.is_zero())
    }

    /// Three-multiplication Karatsuba over the `(1, u)` basis.
    pub fn mul(self, other: F254) -> F254 {
        let t0 = self.a0.mul(other.a0);
        let t1 = self.a1.mul(other.a1);
        let t2 = self.a0.add(self.a1).mul(other.a0.add(other.a1));
        F254 {
            a0: t0.add(t1),
            a1: t2.add(t0),
        }
    }

    pub fn square(self) -> F254 {
        let s0 = self.a0.square();
        let s1 = self.a1.square();
        F254 {
            a0: s0.add(s1),
            a1: s1,
        }
    }

    /// Multiplies by `u`.
    pub fn mul_u(self) -> F254 {
        F254 {
            a0: self.a1,
            a1: self.a0.add(self.a1),
        }
    }

    /// Multiplies by `u + 1` (the other root of `t^2+t+1`).
    pub fn mul_u1(self) -> F254 {
        F254 {
            a0: self.a0.add(self.a1),
            a1: self.a0,
        }
    }

    /// Adds the constant `u`. Only the `a1` component changes.
    pub fn add_u(self) -> F254 {
        F254 {
            a0: self.a0,
            a1: self.a1.add(F127::ONE),
        }
    }

    /// Multiplies every component by an GF(2^127) scalar.
    pub fn mul_f127(self, s: F127) -> F254 {
        F254 {
            a0: self.a0.mul(s),
            a1: self.a1.mul(s),
        }
    }

    /// The Galois conjugate over GF(2^127), i.e. the automorphism sending
    /// `u` to `u + 1`.
    pub fn phi(self) -> F254 {
        F254 {
            a0: self.a0.add(self.a1),
            a1: self.a1,
        }
    }

    /// `self * phi(self)`, which always lands in the GF(2^127) subfield
    /// (its `a1` component cancels): `a0^2 + a0*a1 + a1^2`.
    pub fn mul_selfphi(self) -> F127 {
        self.a0.square().add(self.a0.mul(self.a1)).add(self.a1.square())
    }

    /// Multiplicative inverse: `self^-1 = phi(self) / (self * phi(self))`,
    /// with the division carried out in the GF(2^127) subfield. Returns
    /// zero when `self` is zero.
    pub fn invert(self) -> F254 {
        let norm = self.mul_selfphi();
        self.phi().mul_f127(norm.invert())
    }

    /// Square root. Derived from `square(a0,a1) = (a0^2+a1^2, a1^2)`: the
    /// map is inverted component-wise, giving `a1 = sqrt(c1)` and
    /// `a0 = sqrt(c0 + c1)`, with no undetermined linear term.
    pub fn sqrt(self) -> F254 {
        let a1 = self.a1.sqrt();
        let a0 = self.a0.add(self.a1).sqrt();
        F254 { a0, a1 }
    }

    /// Solves the Artin-Schreier equation `y^2 + y = z` for `y`, where `z`
    /// is `self` or `self + u` — whichever has trace zero (`Tr254(x) =
    /// Tr127(a1)`, by the tower trace formula, so exactly one of `a1` and
    /// `a1 + 1` has GF(2^127) trace zero, since `Tr127(1) = 1`). Reduces to
    /// two half-trace computations over GF(2^127): solve `y1^2 + y1 = a1'`
    /// via the half-trace, then `y0^2 + y0 = a0 + y1^2` the same way.
    /// Callers that need to know which of `self`/`self + u` was solved
    /// can recover it from `Tr127(self.a1)`.
    pub fn qsolve(self) -> F254 {
        let tr = self.a1.trace();
        let a1p = if tr == 0 {
            self.a1
        } else {
            self.a1.add(F127::ONE)
        };
        let y1 = a1p.halftrace();
        let y0 = self.a0.add(y1.square()).halftrace();
        F254 { a0: y0, a1: y1 }
    }

    /// The tower trace `Tr254(x) = Tr127(a1)`.
    #[inline(always)]
    pub fn trace254(self) -> u32 {
        self.a1.trace()
    }

    pub fn decode(bytes: &[u8; 32]) -> (F254, Mask) {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&bytes[..16]);
        hi.copy_from_slice(&bytes[16..]);
        let (a0, ok0) = F127::decode(&lo);
        let (a1, ok1) = F127::decode(&hi);
        (F254 { a0, a1 }, ok0.and(ok1))
    }

    /// Decodes a 32-byte encoding, ignoring the two reserved top bits (of
    /// bytes 15 and 31) entirely rather than checking or folding them.
    pub fn decode_trunc(bytes: &[u8; 32]) -> F254 {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&bytes[..16]);
        hi.copy_from_slice(&bytes[16..]);
        F254 {
            a0: F127::decode_trunc(&lo),
            a1: F127::decode_trunc(&hi),
        }
    }

    /// Decodes a 32-byte encoding, folding each component's reserved top bit
    /// back in via [`F127::decode_reduce`] instead of rejecting or ignoring
    /// it. Used by [`crate::point::Point::map_to_point`]'s callers, which
    /// must turn an arbitrary hash digest into a field element without ever
    /// failing.
    pub fn decode_reduce(bytes: &[u8; 32]) -> F254 {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&bytes[..16]);
        hi.copy_from_slice(&bytes[16..]);
        F254 {
            a0: F127::decode_reduce(&lo),
            a1: F127::decode_reduce(&hi),
        }
    }

    pub fn encode(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.a0.encode());
        out[16..].copy_from_slice(&self.a1.encode());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> F254 {
        F254::new(F127(0x1234_5678_9abc_def0_1122_3344_5566_01), F127(0x0a1b_2c3d_4e5f_6070_8090_a0b0_c0d0_11))
    }

    #[test]
    fn mul_one_is_identity() {
        let a = sample();
        assert_eq!(a.mul(F254::ONE), a);
    }

    #[test]
    fn square_matches_mul_self() {
        let a = sample();
        assert_eq!(a.square(), a.mul(a));
    }

    #[test]
    fn u_squared_is_u_plus_one() {
        assert_eq!(F254::U.square(), F254::U.add(F254::ONE));
    }

    #[test]
    fn invert_round_trips() {
        let a = sample();
        let inv = a.invert();
        assert_eq!(a.mul(inv), F254::ONE);
    }

    #[test]
    fn sqrt_is_square_inverse() {
        let a = sample();
        assert_eq!(a.square().sqrt(), a);
    }

    #[test]
    fn qsolve_solves_artin_schreier_for_self_or_self_plus_u() {
        let a = sample();
        let y = a.qsolve();
        let lhs = y.square().add(y);
        assert!(lhs == a || lhs == a.add_u());
    }

    #[test]
    fn mul_u_matches_direct_multiplication() {
        let a = sample();
        assert_eq!(a.mul_u(), a.mul(F254::U));
    }

    #[test]
    fn phi_is_involution() {
        let a = sample();
        assert_eq!(a.phi().phi(), a);
    }

    #[test]
    fn encode_decode_round_trip() {
        let a = sample();
        let (b, ok) = F254::decode(&a.encode());
        assert_eq!(ok, Mask::TRUE);
        assert_eq!(a, b);
    }

    #[test]
    fn decode_reduce_matches_strict_decode_when_bits_clear() {
        let a = sample();
        assert_eq!(F254::decode_reduce(&a.encode()), a);
    }

    #[test]
    fn decode_trunc_ignores_reserved_bits() {
        let a = sample();
        let mut bytes = a.encode();
        bytes[15] |= 0x80;
        bytes[31] |= 0x80;
        assert_eq!(F254::decode_trunc(&bytes), a);
    }

    #[test]
    fn decode_reduce_is_total_over_arbitrary_bytes() {
        let bytes = [0xffu8; 32];
        // Must not panic and must produce some well-defined element.
        let _ = F254::decode_reduce(&bytes);
    }
}
