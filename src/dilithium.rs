//! Key generation, signing, and verification: the Fiat–Shamir-with-aborts
//! state machine tying every other module together.

use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::DilithiumError;
use crate::packing::{
    challenge_poly_from_parts, pack_pk, pack_signature, pack_sk, unpack_pk, unpack_signature,
    unpack_sk,
};
use crate::params::{
    ALPHA, BETA, CRHBYTES, CRYPTO_BYTES, D, GAMMA1, GAMMA2, K, N, OMEGA, PKBYTES, Q, SEEDBYTES,
    SKBYTES,
};
use crate::poly::Poly;
use crate::polyvec::{Matrix, VecK, VecL};
use crate::rounding::{decompose, make_hint, use_hint};
use crate::sample::{expand_a, expand_mask, expand_s, sample_in_ball};
use crate::util::ct_eq;
use crate::xof::shake256;

/// A packed, immutable public key plus the data needed for verification
/// without re-parsing it on every call.
pub struct PublicKey {
    bytes: Vec<u8>,
    rho: [u8; SEEDBYTES],
    t1: VecK,
    tr: [u8; CRHBYTES],
}

/// An unpacked secret key. Every field but `bytes`' length is sensitive;
/// the whole struct is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
    rho: [u8; SEEDBYTES],
    key: [u8; SEEDBYTES],
    tr: [u8; CRHBYTES],
    s1: VecL,
    s2: VecK,
    t0: VecK,
}

/// A key-generation output: the public key and its matching secret key.
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

/// A detached signature: `z || h || c`, `CRYPTO_BYTES` long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
        let unpacked = unpack_pk(bytes).ok_or(DilithiumError::InvalidPublicKey)?;
        let tr = shake256::<CRHBYTES>(&[bytes]);
        Ok(PublicKey {
            bytes: bytes.to_vec(),
            rho: unpacked.rho,
            t1: unpacked.t1,
            tr,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Verify `signature` over `message`. Every failure mode — decode
    /// failure, norm violation, or a mismatched recomputed challenge —
    /// collapses to [`DilithiumError::VerificationFailed`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), DilithiumError> {
        if signature.bytes.len() != CRYPTO_BYTES {
            return Err(DilithiumError::InvalidSignatureLength);
        }
        let parsed = unpack_signature(&signature.bytes)
            .ok_or(DilithiumError::InvalidHintEncoding)?;

        if !parsed.z.check_norm(GAMMA1 - BETA) {
            debug!("verify: z norm bound violated");
            return Err(DilithiumError::VerificationFailed);
        }

        let mu = shake256::<CRHBYTES>(&[&self.tr, message]);

        let a = expand_a(&self.rho);
        let mut z_hat = parsed.z.clone();
        z_hat.ntt();
        let az_hat = a.mul_ntt(&z_hat);

        let mut t1_shifted = self.t1.clone();
        t1_shifted.shiftl(D);
        t1_shifted.ntt();

        let c = challenge_poly_from_parts(&parsed.challenge_positions, &parsed.challenge_signs);
        let mut c_hat = c.clone();
        c_hat.ntt();

        let ct1_hat = t1_shifted.pointwise_scalar(&c_hat);
        let mut tmp_hat = VecK::zero();
        for i in 0..K {
            tmp_hat.polys[i] = az_hat.polys[i].sub(&ct1_hat.polys[i]);
        }
        let mut tmp = tmp_hat;
        tmp.invntt_tomont();
        tmp.freeze();

        let mut w1_prime = VecK::zero();
        for i in 0..K {
            for j in 0..N {
                let hint = if parsed.hints[i].contains(&(j as u8)) { 1 } else { 0 };
                w1_prime.polys[i].coeffs[j] = use_hint(hint, tmp.polys[i].coeffs[j]);
            }
        }

        let c_prime = sample_in_ball(&mu, &w1_prime);
        let (c_prime_positions, c_prime_signs) = dense_challenge_to_parts(&c_prime);

        let lhs = canonical_challenge_bytes(&parsed.challenge_positions, &parsed.challenge_signs);
        let rhs = canonical_challenge_bytes(&c_prime_positions, &c_prime_signs);

        if ct_eq(&lhs, &rhs) {
            Ok(())
        } else {
            debug!("verify: recomputed challenge mismatched signed challenge");
            Err(DilithiumError::VerificationFailed)
        }
    }
}

fn dense_challenge_to_parts(c: &Poly) -> (Vec<u8>, Vec<i8>) {
    let mut positions = Vec::with_capacity(crate::params::TAU);
    let mut signs = Vec::with_capacity(crate::params::TAU);
    for (i, &coeff) in c.coeffs.iter().enumerate() {
        if coeff != 0 {
            positions.push(i as u8);
            signs.push(if coeff < 0 { -1i8 } else { 1i8 });
        }
    }
    (positions, signs)
}

fn canonical_challenge_bytes(positions: &[u8], signs: &[i8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(positions.len() * 2);
    out.extend_from_slice(positions);
    out.extend(signs.iter().map(|&s| s as u8));
    out
}

impl SecretKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
        let unpacked = unpack_sk(bytes).ok_or(DilithiumError::InvalidSecretKey)?;
        Ok(SecretKey {
            bytes: bytes.to_vec(),
            rho: unpacked.rho,
            key: unpacked.key,
            tr: unpacked.tr,
            s1: unpacked.s1,
            s2: unpacked.s2,
            t0: unpacked.t0,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Produce a deterministic signature over `message`: two calls with the
    /// same key and message produce byte-identical output.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let a = expand_a(&self.rho);

        let mut s1_hat = self.s1.clone();
        s1_hat.ntt();
        let mut s2_hat = self.s2.clone();
        s2_hat.ntt();
        let mut t0_hat = self.t0.clone();
        t0_hat.ntt();

        let mu = shake256::<CRHBYTES>(&[&self.tr, message]);

        let mut nonce_base: u16 = 0;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let y = expand_mask(&self.key, nonce_base);
            nonce_base = nonce_base.wrapping_add(crate::params::L as u16);

            let mut y_hat = y.clone();
            y_hat.ntt();
            let mut w = a.mul_ntt(&y_hat);
            w.invntt_tomont();
            w.freeze();

            let (w1, w0) = decompose_veck(&w);

            let c = sample_in_ball(&mu, &w1);
            let mut c_hat = c.clone();
            c_hat.ntt();

            let mut cs2 = s2_hat.pointwise_scalar(&c_hat);
            cs2.invntt_tomont();
            let mut w0_adj = w0.sub(&cs2);
            reduce_veck(&mut w0_adj);
            if !w0_adj.check_norm(GAMMA2 - BETA) {
                debug!(attempt, "sign: w0 - c*s2 exceeded bound, restarting");
                continue;
            }

            let mut z_part = s1_hat.pointwise_scalar(&c_hat);
            z_part.invntt_tomont();
            let mut z = z_part.add(&y);
            reduce_vecl(&mut z);
            if !z.check_norm(GAMMA1 - BETA) {
                debug!(attempt, "sign: z exceeded bound, restarting");
                continue;
            }

            let mut ct0 = t0_hat.pointwise_scalar(&c_hat);
            ct0.invntt_tomont();
            reduce_veck(&mut ct0);
            if !ct0.check_norm(GAMMA2) {
                debug!(attempt, "sign: c*t0 exceeded bound, restarting");
                continue;
            }

            let mut low_combined = w0_adj.add(&ct0);
            reduce_veck(&mut low_combined);

            match compute_hints(&w1, &low_combined) {
                Some(hints) => {
                    trace!(attempt, "sign: accepted");
                    let bytes = pack_signature(&z, &hints, &c);
                    return Signature { bytes };
                }
                None => {
                    debug!(attempt, "sign: hint weight exceeded OMEGA, restarting");
                    continue;
                }
            }
        }
    }
}

fn reduce_veck(v: &mut VecK) {
    for p in v.polys.iter_mut() {
        p.reduce();
    }
}

fn reduce_vecl(v: &mut VecL) {
    for p in v.polys.iter_mut() {
        p.reduce();
    }
}

/// Split `w` (already reduced into `[0, Q)`) into `(w1, w0)`: `w1` holds the
/// high-bits integer (`[0, (Q-1)/ALPHA)`) and `w0` the centered low bits.
fn decompose_veck(w: &VecK) -> (VecK, VecK) {
    let mut w1 = VecK::zero();
    let mut w0 = VecK::zero();
    for i in 0..K {
        for j in 0..N {
            let (r1, r0) = decompose(w.polys[i].coeffs[j]);
            w1.polys[i].coeffs[j] = r1;
            w0.polys[i].coeffs[j] = r0;
        }
    }
    (w1, w0)
}

/// Per-coordinate `MakeHint`, building the position lists `packing::pack_signature`
/// expects. Returns `None` if the total hint weight exceeds `OMEGA`.
fn compute_hints(w1: &VecK, low_combined: &VecK) -> Option<[Vec<u8>; K]> {
    let mut hints: [Vec<u8>; K] = Default::default();
    let mut total = 0usize;
    for i in 0..K {
        for j in 0..N {
            let r1 = w1.polys[i].coeffs[j];
            let z = low_combined.polys[i].coeffs[j];
            let r = (r1 as i64 * ALPHA as i64).rem_euclid(Q as i64) as i32;
            if make_hint(z, r) == 1 {
                hints[i].push(j as u8);
                total += 1;
            }
        }
    }
    if total > OMEGA {
        None
    } else {
        Some(hints)
    }
}

impl KeyPair {
    /// Generate a fresh key pair from 32 bytes of randomness drawn from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> KeyPair {
        let mut seed = [0u8; SEEDBYTES];
        rng.fill_bytes(&mut seed);

        let expanded: [u8; SEEDBYTES + CRHBYTES + SEEDBYTES] = shake256(&[&seed]);
        let mut rho = [0u8; SEEDBYTES];
        rho.copy_from_slice(&expanded[..SEEDBYTES]);
        let mut rho_prime = [0u8; CRHBYTES];
        rho_prime.copy_from_slice(&expanded[SEEDBYTES..SEEDBYTES + CRHBYTES]);
        let mut key = [0u8; SEEDBYTES];
        key.copy_from_slice(&expanded[SEEDBYTES + CRHBYTES..]);
        seed.zeroize();

        let a = expand_a(&rho);
        let (s1, s2) = expand_s(&rho_prime);

        let mut s1_hat = s1.clone();
        s1_hat.ntt();
        let mut t = a.mul_ntt(&s1_hat);
        t.invntt_tomont();
        t = t.add(&s2);
        t.freeze();

        let mut t1 = VecK::zero();
        let mut t0 = VecK::zero();
        for i in 0..K {
            for j in 0..N {
                let (hi, lo) = crate::rounding::power2round(t.polys[i].coeffs[j]);
                t1.polys[i].coeffs[j] = hi;
                t0.polys[i].coeffs[j] = lo;
            }
        }

        let pk_bytes = pack_pk(&rho, &t1);
        let tr = shake256::<CRHBYTES>(&[&pk_bytes]);
        let sk_bytes = pack_sk(&rho, &key, &tr, &s1, &s2, &t0);

        let public = PublicKey {
            bytes: pk_bytes,
            rho,
            t1,
            tr,
        };
        let secret = SecretKey {
            bytes: sk_bytes,
            rho,
            key,
            tr,
            s1,
            s2,
            t0,
        };
        KeyPair { public, secret }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret.sign(message)
    }
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
        if bytes.len() != CRYPTO_BYTES {
            return Err(DilithiumError::InvalidSignatureLength);
        }
        Ok(Signature {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Legacy combined `open` entry point: `sm = signature || message`. On
/// success returns the message; on any failure the caller-visible result is
/// `None`, preserving the documented "fail closed" contract of the
/// byte-oriented reference API without resurrecting its raw pointer shape.
pub fn open_combined(pk: &PublicKey, sm: &[u8]) -> Option<Vec<u8>> {
    if sm.len() < CRYPTO_BYTES {
        return None;
    }
    let (sig_bytes, message) = sm.split_at(CRYPTO_BYTES);
    let signature = Signature::from_bytes(sig_bytes).ok()?;
    pk.verify(message, &signature).ok()?;
    Some(message.to_vec())
}
