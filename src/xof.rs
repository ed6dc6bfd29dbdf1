//! Thin adapter over the SHAKE-128 / SHAKE-256 extendable-output functions.
//!
//! Everything above this module treats a XOF purely as "seed in, arbitrarily
//! long pseudorandom stream out"; the streaming state here exists only so
//! callers can pull output in rate-sized blocks without re-absorbing.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

/// SHAKE-128 has a 168-byte (1344-bit) permutation rate.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE-256 has a 136-byte (1088-bit) permutation rate.
pub const SHAKE256_RATE: usize = 136;

/// A resumable SHAKE-128 squeeze stream.
pub struct Shake128Stream {
    reader: <Shake128 as ExtendableOutput>::Reader,
}

impl Shake128Stream {
    /// Absorb all of `parts` in order and finalize into a squeezable reader.
    pub fn absorb(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake128::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Fill `out` with the next `out.len()` bytes of the stream. `out.len()`
    /// need not be a multiple of the rate; callers that want whole-block
    /// semantics should size `out` to `n * SHAKE128_RATE` themselves.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// A resumable SHAKE-256 squeeze stream.
pub struct Shake256Stream {
    reader: <Shake256 as ExtendableOutput>::Reader,
}

impl Shake256Stream {
    /// Absorb all of `parts` in order and finalize into a squeezable reader.
    pub fn absorb(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Fill `out` with the next `out.len()` bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// One-shot SHAKE-256 with fixed-size output, used for `tr`, `mu`, and `key`
/// derivation where the caller always wants exactly `OUT` bytes.
pub fn shake256<const OUT: usize>(parts: &[&[u8]]) -> [u8; OUT] {
    let mut stream = Shake256Stream::absorb(parts);
    let mut out = [0u8; OUT];
    stream.squeeze(&mut out);
    out
}

/// Four independent SHAKE-128 streams, squeezed together.
///
/// Real multi-lane Keccak implementations run these as SIMD lanes; this
/// build has no vectorized Keccak dependency available, so the four lanes
/// are four independent single-lane streams squeezed in sequence. The
/// output of each lane is bit-identical to a standalone [`Shake128Stream`]
/// seeded the same way — there is no behavioral difference visible to
/// callers, only a performance one.
pub struct Shake128x4Stream {
    lanes: [Shake128Stream; 4],
}

impl Shake128x4Stream {
    /// Absorb four independent seeds, one per lane.
    pub fn absorb(seeds: [&[&[u8]]; 4]) -> Self {
        Self {
            lanes: seeds.map(Shake128Stream::absorb),
        }
    }

    /// Squeeze one block (`out[lane].len()` bytes) from every lane.
    pub fn squeeze_blocks(&mut self, out: &mut [[u8; SHAKE128_RATE]; 4]) {
        for lane in 0..4 {
            self.lanes[lane].squeeze(&mut out[lane]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake256_is_deterministic() {
        let a: [u8; 48] = shake256(&[b"hello"]);
        let b: [u8; 48] = shake256(&[b"hello"]);
        assert_eq!(a, b);
    }

    #[test]
    fn shake256_parts_concatenate() {
        let a: [u8; 32] = shake256(&[b"hello", b"world"]);
        let b: [u8; 32] = shake256(&[b"helloworld"]);
        assert_eq!(a, b);
    }

    #[test]
    fn streaming_squeeze_matches_one_shot() {
        let one_shot: [u8; 64] = shake256(&[b"seed"]);
        let mut stream = Shake256Stream::absorb(&[b"seed"]);
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        stream.squeeze(&mut a);
        stream.squeeze(&mut b);
        assert_eq!(&one_shot[..32], &a[..]);
        assert_eq!(&one_shot[32..], &b[..]);
    }
}
