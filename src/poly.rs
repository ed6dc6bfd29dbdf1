//! The ring element `Poly` and its arithmetic: reductions, the negacyclic
//! NTT, and the norm check used by every rejection condition in `sign`.
//!
//! A `Poly` does not track whether it holds standard-domain coefficients or
//! NTT-domain (pointwise) evaluations; callers are responsible for keeping
//! that straight, exactly as in the reference this crate is built from.

use crate::params::{N, Q, QI64, QINV};
use lazy_static::lazy_static;
use zeroize::Zeroize;

/// A polynomial in `Zq[X]/(X^N+1)`, represented as its `N` coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Poly { coeffs: [0; N] }
    }
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = self.coeffs[i] + other.coeffs[i];
        }
        out
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = self.coeffs[i] - other.coeffs[i];
        }
        out
    }

    pub fn add_assign(&mut self, other: &Poly) {
        for i in 0..N {
            self.coeffs[i] += other.coeffs[i];
        }
    }

    /// Multiply every coefficient by `2^d` without reducing. Used to recover
    /// `t * 2^D` from `t1` on the verifier side.
    pub fn shiftl(&mut self, d: u32) {
        for c in self.coeffs.iter_mut() {
            *c <<= d;
        }
    }

    /// Reduce every coefficient into `(-Q, Q)`.
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce32(*c);
        }
    }

    /// Conditionally add `Q` to negative coefficients, then reduce into
    /// `(-Q, Q)` — combined with [`Poly::csubq`] this lands in `[0, Q)`.
    pub fn csubq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = csubq(*c);
        }
    }

    pub fn freeze(&mut self) {
        self.reduce();
        self.csubq();
    }

    /// `true` iff every coefficient, taken as its representative in
    /// `(-Q/2, Q/2]`, has absolute value strictly less than `bound`. A full,
    /// unconditional scan over all coefficients: no early exit, so the
    /// number of coefficients inspected never depends on the answer.
    ///
    /// Requires coefficients already reduced into `(-Q, Q)` (i.e. after
    /// [`Poly::reduce`]) and `bound <= (Q-1)/8`, which holds for every bound
    /// this crate checks against (`GAMMA1 - BETA`, `GAMMA2 - BETA`, `GAMMA2`).
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut ok = true;
        for &c in self.coeffs.iter() {
            let sign = c >> 31; // all-1s if c < 0, else 0
            let abs = c - (sign & (2 * c));
            ok &= abs < bound;
        }
        ok
    }

    /// Transform `self` in place from standard to NTT (pointwise) domain.
    pub fn ntt(&mut self) {
        let mut k = 0usize;
        let mut len = 128usize;
        while len >= 1 {
            let mut start = 0usize;
            while start < N {
                k += 1;
                let zeta = ZETAS[k] as i64;
                for j in start..start + len {
                    let t = montgomery_reduce(zeta * self.coeffs[j + len] as i64);
                    self.coeffs[j + len] = self.coeffs[j] - t;
                    self.coeffs[j] += t;
                }
                start += 2 * len;
            }
            len >>= 1;
        }
    }

    /// Transform `self` in place from NTT domain back to standard domain,
    /// leaving the result scaled by the Montgomery radix `R` (hence
    /// `_tomont`): a standalone call returns `R * p`, not `p`. Chained after
    /// a pointwise multiply (which already removes one factor of `R` via its
    /// own `montgomery_reduce`), the scaling works out so that
    /// `invntt_tomont(pointwise(ntt(a), ntt(b)))` equals `a * b` in the ring,
    /// with no stray factor of `R` surviving.
    pub fn invntt_tomont(&mut self) {
        let mut k = 256usize;
        let mut len = 1usize;
        while len < N {
            let mut start = 0usize;
            while start < N {
                k -= 1;
                let zeta = -(ZETAS[k] as i64);
                for j in start..start + len {
                    let t = self.coeffs[j];
                    self.coeffs[j] = t + self.coeffs[j + len];
                    self.coeffs[j + len] = t - self.coeffs[j + len];
                    self.coeffs[j + len] = montgomery_reduce(zeta * self.coeffs[j + len] as i64);
                }
                start += 2 * len;
            }
            len <<= 1;
        }
        const F: i64 = 41_978; // mont^2 / N mod q, centered
        for c in self.coeffs.iter_mut() {
            *c = montgomery_reduce(F * *c as i64);
        }
    }

    /// Pointwise product of two NTT-domain polynomials, each coefficient
    /// reduced by one Montgomery reduction (removing one factor of `R`).
    pub fn pointwise_montgomery(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] =
                montgomery_reduce(self.coeffs[i] as i64 * other.coeffs[i] as i64);
        }
        out
    }

    /// Lift standard-domain coefficients into Montgomery form in place
    /// (multiply by `R mod Q` with an accompanying reduction).
    pub fn to_montgomery(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = montgomery_reduce(crate::params::MONT_SQ as i64 * *c as i64);
        }
    }
}

/// Barrett-style reduction into `(-Q, Q)`. `a` may be any `i32`.
#[inline]
pub fn reduce32(a: i32) -> i32 {
    let t = (a.wrapping_add(1 << 22)) >> 23;
    a - t * Q
}

/// If `a < 0`, add `Q`; otherwise leave unchanged. Requires `a > -Q`.
#[inline]
pub fn csubq(a: i32) -> i32 {
    let mut a = a;
    a += (a >> 31) & Q;
    a
}

/// Montgomery reduction: given `a` with `|a| < Q * 2^31`, returns
/// `a * R^{-1} mod Q` as a signed value in `(-Q, Q)`.
#[inline]
pub fn montgomery_reduce(a: i64) -> i32 {
    let low = a as i32; // low 32 bits, as a signed i32
    let t = (low.wrapping_mul(QINV as i32)) as i64;
    ((a - t * QI64) >> 32) as i32
}

lazy_static! {
    /// Montgomery-domain powers of the primitive 512th root of unity 1753,
    /// in bit-reversed order: `ZETAS[k] = mont(1753^brv8(k) mod Q)`.
    /// Index 0 is never read by `ntt`/`invntt_tomont` (both start from 1 and
    /// 255 respectively) but is kept so the table's indices line up exactly
    /// with the loop counters above.
    static ref ZETAS: [i32; N] = compute_zetas();
}

fn compute_zetas() -> [i32; N] {
    const ROOT: i64 = 1753;
    let mut table = [0i32; N];
    for k in 0..N {
        let e = brv8(k as u8) as u32;
        let mut val: i64 = 1;
        let mut base = ROOT % QI64;
        let mut exp = e;
        while exp > 0 {
            if exp & 1 == 1 {
                val = (val * base).rem_euclid(QI64);
            }
            base = (base * base).rem_euclid(QI64);
            exp >>= 1;
        }
        let mont = montgomery_reduce(val * crate::params::MONT_SQ as i64);
        table[k] = mont;
    }
    table
}

fn brv8(x: u8) -> u8 {
    x.reverse_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_poly(seed: u64) -> Poly {
        let mut state = seed;
        let mut p = Poly::zero();
        for c in p.coeffs.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *c = ((state >> 33) as i32).rem_euclid(Q);
        }
        p
    }

    #[test]
    fn montgomery_reduce_is_correct_inverse() {
        // a * R^{-1} mod Q, checked against a direct (slow) computation
        let r_inv = {
            // R^{-1} mod Q computed via Fermat since Q is prime
            let mut result: i64 = 1;
            let mut base: i64 = pow2_32_mod_q_inverse_base();
            let mut exp = QI64 - 2;
            while exp > 0 {
                if exp & 1 == 1 {
                    result = (result * base).rem_euclid(QI64);
                }
                base = (base * base).rem_euclid(QI64);
                exp >>= 1;
            }
            result
        };

        fn pow2_32_mod_q_inverse_base() -> i64 {
            let r: i64 = 1i64 << 32;
            r.rem_euclid(8_380_417)
        }

        let a: i64 = 123_456_789;
        let got = montgomery_reduce(a).rem_euclid(Q);
        let want = ((a.rem_euclid(QI64)) * r_inv).rem_euclid(QI64);
        assert_eq!(got as i64, want);
    }

    #[test]
    fn ntt_roundtrip_recovers_scaled_input() {
        let p = sample_poly(42);
        let mut hat = p.clone();
        hat.ntt();
        hat.invntt_tomont();
        // invntt_tomont(ntt(p)) == p * R (mod Q), per its documented scaling
        let r_mod_q = (1i64 << 32).rem_euclid(QI64) as i32;
        for i in 0..N {
            let expect = ((p.coeffs[i] as i64 * r_mod_q as i64).rem_euclid(QI64)) as i32;
            let got = hat.coeffs[i].rem_euclid(Q);
            assert_eq!(got, expect, "coefficient {} mismatched", i);
        }
    }

    #[test]
    fn pointwise_then_invntt_has_no_stray_radix_factor() {
        let a = sample_poly(1);
        let b = sample_poly(2);
        let mut a_hat = a.clone();
        a_hat.ntt();
        let mut b_hat = b.clone();
        b_hat.ntt();
        let mut prod_hat = a_hat.pointwise_montgomery(&b_hat);
        prod_hat.invntt_tomont();

        // naive negacyclic convolution mod (X^N+1)
        let mut expect = [0i64; N];
        for i in 0..N {
            for j in 0..N {
                let idx = i + j;
                let val = a.coeffs[i] as i64 * b.coeffs[j] as i64;
                if idx < N {
                    expect[idx] += val;
                } else {
                    expect[idx - N] -= val;
                }
            }
        }
        for i in 0..N {
            let want = expect[i].rem_euclid(QI64) as i32;
            let got = prod_hat.coeffs[i].rem_euclid(Q);
            assert_eq!(got, want, "coefficient {} mismatched", i);
        }
    }

    #[test]
    fn reduce32_stays_in_range() {
        for a in [i32::MIN, i32::MAX, 0, Q, -Q, 12345678] {
            let r = reduce32(a);
            assert!(r > -Q && r < Q);
            assert_eq!(r.rem_euclid(Q), a.rem_euclid(Q));
        }
    }

    #[test]
    fn check_norm_rejects_large_coefficients() {
        let mut p = Poly::zero();
        p.coeffs[10] = 5;
        assert!(p.check_norm(6));
        p.coeffs[10] = 6;
        assert!(!p.check_norm(6));
        p.coeffs[10] = -6;
        assert!(!p.check_norm(6));
    }
}
