#![deny(unsafe_code)]
#![allow(missing_docs)]

//! A lattice-based digital signature scheme in the Dilithium family
//! (Module-LWE / Module-SIS, Fiat–Shamir with aborts).
//!
//! Fixed at the `(K, L) = (4, 3)` parameter point. The public surface is
//! [`KeyPair`], [`PublicKey`], [`SecretKey`], and [`Signature`]; everything
//! else is internal plumbing (ring arithmetic, the NTT, samplers, packing)
//! exposed `pub` for testing and reuse but not meant to be driven directly.

pub mod dilithium;
pub mod error;
pub mod packing;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod rounding;
pub mod sample;
pub mod util;
pub mod xof;

pub use dilithium::{open_combined, KeyPair, PublicKey, SecretKey, Signature};
pub use error::DilithiumError;
pub use params::{CRYPTO_BYTES, PKBYTES, SKBYTES};
