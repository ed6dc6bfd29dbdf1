//! Fixed parameter set for this build: the round-2 (K,L) = (4,3) point.
//!
//! Changing parameter sets means editing the constants below and recompiling;
//! there is no runtime parameter selection.

/// Ring degree.
pub const N: usize = 256;

/// Field modulus. Prime, with `2N | Q - 1`, which is what makes the
/// negacyclic NTT of length `N` exist.
pub const Q: i32 = 8_380_417;

/// `Q` as an `i64`, for products that would overflow `i32`.
pub const QI64: i64 = Q as i64;

/// Montgomery radix exponent: `R = 2^32`.
pub const MONT_BITS: u32 = 32;

/// `R mod Q`, i.e. `2^32 mod Q`, used to lift values into Montgomery form.
pub const MONT: i32 = -4_186_625; // 2^32 mod Q, centered representative

/// `R^2 mod Q`, used by `poly::to_montgomery`.
pub const MONT_SQ: i32 = 2_365_951; // 2^64 mod Q, centered representative

/// `Q^{-1} mod 2^32`, the constant driving Montgomery reduction.
pub const QINV: u32 = 58_728_449;

/// Number of dropped bits when splitting `t` into `(t1, t0)`.
pub const D: u32 = 14;

/// Module rank of the public vector `t` / row count of `A`.
pub const K: usize = 4;

/// Module rank of the secret vector `s1` / column count of `A`.
pub const L: usize = 3;

/// Secret coefficient bound: `s1, s2` coefficients lie in `[-ETA, ETA]`.
pub const ETA: i32 = 6;

/// Challenge weight: exactly this many coefficients of `c` are nonzero.
pub const TAU: usize = 60;

/// `‖c·s‖_∞` bound used throughout the rejection conditions.
pub const BETA: i32 = (TAU as i32) * ETA;

/// Mask coefficients are sampled uniformly from `(-(GAMMA1-1), GAMMA1-1)`.
pub const GAMMA1: i32 = 1 << 19;

/// Low-order rounding radius for `Decompose`.
pub const GAMMA2: i32 = (Q - 1) / 88;

/// `alpha = 2 * gamma2`; divides `Q - 1` exactly by construction of `GAMMA2`.
pub const ALPHA: i32 = 2 * GAMMA2;

/// Maximum total number of hint bits across all `K` rows of a signature.
pub const OMEGA: usize = 80;

/// Bytes in a seed (`rho`, `rho'` input, `key`).
pub const SEEDBYTES: usize = 32;

/// Bytes in `tr` and `mu`, both SHAKE-256 collision-resistant hashes.
pub const CRHBYTES: usize = 48;

/// Bit width of a packed `t1` coefficient: `bitlen(Q-1) - D`.
pub const T1_BITS: u32 = 23 - D;

/// Bit width of a packed `s1`/`s2` coefficient: `bitlen(2*ETA)`.
pub const ETA_BITS: u32 = 4;

/// Bit width of a packed `t0` coefficient: `D`.
pub const T0_BITS: u32 = D;

/// Bit width of a packed `z` coefficient: `bitlen(GAMMA1 - 1) + 1`.
pub const Z_BITS: u32 = 20;

/// Bit width of a packed `w1` coefficient: `bitlen((Q-1)/ALPHA - 1)`.
pub const W1_BITS: u32 = 6;

/// Packed size of one `t1`-encoded polynomial.
pub const POLYT1_PACKEDBYTES: usize = (N as u32 * T1_BITS / 8) as usize;

/// Packed size of one `eta`-encoded polynomial.
pub const POLYETA_PACKEDBYTES: usize = (N as u32 * ETA_BITS / 8) as usize;

/// Packed size of one `t0`-encoded polynomial.
pub const POLYT0_PACKEDBYTES: usize = (N as u32 * T0_BITS / 8) as usize;

/// Packed size of one `z`-encoded polynomial.
pub const POLYZ_PACKEDBYTES: usize = (N as u32 * Z_BITS / 8) as usize;

/// Packed size of one `w1`-encoded polynomial (challenge-hash input only;
/// `w1` itself is never part of a key or signature).
pub const POLYW1_PACKEDBYTES: usize = (N as u32 * W1_BITS / 8) as usize;

/// Packed public key size: `rho || t1` for `K` rows.
pub const PKBYTES: usize = SEEDBYTES + K * POLYT1_PACKEDBYTES;

/// Packed secret key size: `rho || key || tr || s1 || s2 || t0`.
pub const SKBYTES: usize =
    2 * SEEDBYTES + CRHBYTES + (L + K) * POLYETA_PACKEDBYTES + K * POLYT0_PACKEDBYTES;

/// Packed detached signature size: `z || h || c`.
pub const SIG_Z_BYTES: usize = L * POLYZ_PACKEDBYTES;

/// Hint encoding size: `OMEGA` position bytes plus `K` row-offset bytes.
pub const SIG_H_BYTES: usize = OMEGA + K;

/// Challenge encoding size: an 8-byte sign bitmap plus `TAU` position bytes.
pub const SIG_C_BYTES: usize = 8 + TAU;

/// Total detached signature size.
pub const CRYPTO_BYTES: usize = SIG_Z_BYTES + SIG_H_BYTES + SIG_C_BYTES;
