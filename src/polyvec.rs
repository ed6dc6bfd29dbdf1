//! `VecL`, `VecK`, and the `K x L` matrix built from them — thin wrappers
//! around arrays of [`Poly`] with the vector operations `sign`/`verify` need.

use crate::params::{K, L};
use crate::poly::Poly;
use zeroize::Zeroize;

/// An `L`-length vector of ring elements (secret key width, mask width).
#[derive(Clone, Debug)]
pub struct VecL {
    pub polys: [Poly; L],
}

/// A `K`-length vector of ring elements (public key width, commitment width).
#[derive(Clone, Debug)]
pub struct VecK {
    pub polys: [Poly; K],
}

/// The expanded public matrix `A`, `K` rows of `VecL` (`K*L` polynomials).
pub struct Matrix {
    pub rows: [VecL; K],
}

impl Zeroize for VecL {
    fn zeroize(&mut self) {
        self.polys.zeroize();
    }
}

impl Zeroize for VecK {
    fn zeroize(&mut self) {
        self.polys.zeroize();
    }
}

impl VecL {
    pub fn zero() -> Self {
        Self {
            polys: std::array::from_fn(|_| Poly::zero()),
        }
    }

    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    pub fn invntt_tomont(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt_tomont();
        }
    }

    pub fn add(&self, other: &VecL) -> VecL {
        let mut out = VecL::zero();
        for i in 0..L {
            out.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        out
    }

    /// `true` iff every polynomial in the vector is within `bound`.
    pub fn check_norm(&self, bound: i32) -> bool {
        self.polys.iter().all(|p| p.check_norm(bound))
    }

    /// Pointwise-multiply every entry by the scalar NTT-domain poly `c`.
    pub fn pointwise_scalar(&self, c_hat: &Poly) -> VecL {
        let mut out = VecL::zero();
        for i in 0..L {
            out.polys[i] = self.polys[i].pointwise_montgomery(c_hat);
        }
        out
    }
}

impl VecK {
    pub fn zero() -> Self {
        Self {
            polys: std::array::from_fn(|_| Poly::zero()),
        }
    }

    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    pub fn invntt_tomont(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt_tomont();
        }
    }

    pub fn add(&self, other: &VecK) -> VecK {
        let mut out = VecK::zero();
        for i in 0..K {
            out.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        out
    }

    pub fn sub(&self, other: &VecK) -> VecK {
        let mut out = VecK::zero();
        for i in 0..K {
            out.polys[i] = self.polys[i].sub(&other.polys[i]);
        }
        out
    }

    pub fn freeze(&mut self) {
        for p in self.polys.iter_mut() {
            p.freeze();
        }
    }

    pub fn check_norm(&self, bound: i32) -> bool {
        self.polys.iter().all(|p| p.check_norm(bound))
    }

    pub fn pointwise_scalar(&self, c_hat: &Poly) -> VecK {
        let mut out = VecK::zero();
        for i in 0..K {
            out.polys[i] = self.polys[i].pointwise_montgomery(c_hat);
        }
        out
    }

    pub fn shiftl(&mut self, d: u32) {
        for p in self.polys.iter_mut() {
            p.shiftl(d);
        }
    }
}

impl Matrix {
    /// Multiply the NTT-domain matrix `A` by an NTT-domain vector `v_hat`
    /// (length `L`), returning an NTT-domain `VecK`. `invntt_tomont` must be
    /// applied by the caller to return to the standard domain.
    pub fn mul_ntt(&self, v_hat: &VecL) -> VecK {
        let mut out = VecK::zero();
        for i in 0..K {
            let mut acc = Poly::zero();
            for j in 0..L {
                let term = self.rows[i].polys[j].pointwise_montgomery(&v_hat.polys[j]);
                acc.add_assign(&term);
            }
            out.polys[i] = acc;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Q;

    #[test]
    fn check_norm_is_all_rows() {
        let mut v = VecL::zero();
        assert!(v.check_norm(1));
        v.polys[1].coeffs[0] = 5;
        assert!(!v.check_norm(1));
    }

    #[test]
    fn matrix_vector_multiply_matches_naive_convolution() {
        // build a small deterministic matrix/vector and compare NTT-domain
        // multiply-then-invntt against schoolbook negacyclic convolution.
        let mut rows: [VecL; K] = std::array::from_fn(|_| VecL::zero());
        let mut seed = 7u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((seed >> 33) as i32).rem_euclid(Q)
        };
        for r in rows.iter_mut() {
            for p in r.polys.iter_mut() {
                for c in p.coeffs.iter_mut() {
                    *c = next();
                }
            }
        }
        let mut v = VecL::zero();
        for p in v.polys.iter_mut() {
            for c in p.coeffs.iter_mut() {
                *c = next();
            }
        }

        let a = Matrix { rows };
        // mul_ntt expects an NTT-domain matrix, same as its NTT-domain
        // vector argument: transform every row before calling it, exactly
        // as poly.rs's sibling test transforms both pointwise-multiply
        // operands before comparing against the unscaled naive convolution.
        let a_hat = Matrix {
            rows: std::array::from_fn(|i| {
                let mut row = a.rows[i].clone();
                row.ntt();
                row
            }),
        };
        let mut v_hat = v.clone();
        v_hat.ntt();
        let mut prod_hat = a_hat.mul_ntt(&v_hat);
        prod_hat.invntt_tomont();

        // naive: out[i] = sum_j rows[i][j] * v[j] as negacyclic poly mult,
        // with no stray radix factor, same as pointwise_then_invntt in
        // poly.rs.
        let n = crate::params::N;
        for i in 0..K {
            let mut expect = vec![0i64; n];
            for j in 0..L {
                for x in 0..n {
                    for y in 0..n {
                        let idx = x + y;
                        let val = a.rows[i].polys[j].coeffs[x] as i64 * v.polys[j].coeffs[y] as i64;
                        if idx < n {
                            expect[idx] += val;
                        } else {
                            expect[idx - n] -= val;
                        }
                    }
                }
            }
            for x in 0..n {
                let want = expect[x].rem_euclid(Q as i64) as i32;
                let got = prod_hat.polys[i].coeffs[x].rem_euclid(Q);
                assert_eq!(got, want, "row {i} coeff {x}");
            }
        }
    }
}
