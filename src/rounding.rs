//! `Power2Round`, `Decompose`, `MakeHint`, `UseHint` — the per-coefficient
//! rounding primitives that let the verifier reconstruct `HighBits(w)`
//! without learning `w` itself.

use crate::params::{ALPHA, D, GAMMA2, Q};

/// Split `r` (taken mod `Q`, in `[0, Q)`) into `(r1, r0)` with
/// `r = r1 * 2^D + r0` and `r0 in (-2^(D-1), 2^(D-1)]`.
pub fn power2round(r: i32) -> (i32, i32) {
    let r0_raw = r & ((1 << D) - 1);
    let half = 1 << (D - 1);
    let r0 = if r0_raw > half { r0_raw - (1 << D) } else { r0_raw };
    let r1 = (r - r0) >> D;
    (r1, r0)
}

/// Split `r` (taken mod `Q`, in `[0, Q)`) into `(r1, r0)` with
/// `r = r1 * ALPHA + r0 (mod Q)`, `r0 in (-ALPHA/2, ALPHA/2]`, and
/// `r1 in [0, (Q-1)/ALPHA)`.
pub fn decompose(r: i32) -> (i32, i32) {
    let mut r0 = r % ALPHA;
    if r0 > ALPHA / 2 {
        r0 -= ALPHA;
    }
    let r1;
    if r - r0 == Q - 1 {
        r1 = 0;
        r0 -= 1;
    } else {
        r1 = (r - r0) / ALPHA;
    }
    (r1, r0)
}

/// High bits only: `decompose(r).0`.
pub fn high_bits(r: i32) -> i32 {
    decompose(r).0
}

/// Low bits only: `decompose(r).1`.
pub fn low_bits(r: i32) -> i32 {
    decompose(r).1
}

/// `1` iff adding `z` to `r` changes the high bits, `0` otherwise.
pub fn make_hint(z: i32, r: i32) -> u8 {
    let r1 = high_bits(r);
    let v1 = high_bits((r + z).rem_euclid(Q));
    (r1 != v1) as u8
}

/// Recover `HighBits(r + z)` from the single-bit hint and `r` alone.
pub fn use_hint(hint: u8, r: i32) -> i32 {
    let m = (Q - 1) / ALPHA; // number of distinct high-bit values
    let (r1, r0) = decompose(r);
    if hint == 0 {
        return r1;
    }
    if r0 > 0 {
        (r1 + 1).rem_euclid(m)
    } else {
        (r1 - 1).rem_euclid(m)
    }
}
