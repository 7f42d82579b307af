//! Precomputed curve constants.
//!
//! The base point is transcribed from the reference implementation's affine
//! table of small multiples of the generator
//! (`examples/original_source/curve.c`, `PRECOMP_B`), whose own comment
//! states the table is already in affine `(scaled_x, scaled_s)` format —
//! i.e. expressed in the `s^2+x*s=(x^2+a*x+b)^2` curve form spec §4.3
//! starts from, not the `(x, y)` Weierstrass form this crate's [`Point`]
//! uses internally (see the module doc on [`crate::point`]). [`base`]
//! transcribes entry 0 (`1*B`) and applies the same substitution documented
//! there: `y = s + x^2 + a*x + b`.

use std::sync::OnceLock;

use super::Point;
use crate::consttime::Mask;
use crate::field::f127::F127;
use crate::field::f254::F254;

static BASE: OnceLock<Point> = OnceLock::new();

/// Builds an `F127` value from four 32-bit limbs in the reference's
/// little-endian-limb order (`v[0]` least significant).
const fn limbs(v: [u32; 4]) -> F127 {
    F127(
        (v[0] as u128) | ((v[1] as u128) << 32) | ((v[2] as u128) << 64) | ((v[3] as u128) << 96),
    )
}

/// `PRECOMP_B[0]` (`1*B`), transcribed byte-for-byte from
/// `examples/original_source/curve.c`.
fn base_scaled() -> (F254, F254) {
    let scaled_x = F254::new(
        limbs([0x326B8675, 0xB6412F20, 0x9AE29894, 0x657CB9F7]),
        limbs([0xF66DD010, 0x3932450F, 0xB2E3915E, 0x14C6F62C]),
    );
    let scaled_s = F254::new(
        limbs([0x023DC896, 0x5FADCA04, 0xA04300F1, 0x763522AD]),
        limbs([0x9E07345A, 0x206E4C1E, 0x2381CA6D, 0x4F69A66A]),
    );
    (scaled_x, scaled_s)
}

/// Returns the fixed generator of the prime-order subgroup.
pub fn base() -> Point {
    *BASE.get_or_init(|| {
        let (x, s) = base_scaled();
        let y = s.add(x.square()).add(super::CURVE_A.mul(x)).add(super::curve_b());
        Point { x, y, inf: Mask::FALSE }
    })
}
