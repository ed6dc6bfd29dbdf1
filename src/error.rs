use thiserror::Error;

/// Errors surfaced by key generation, signing, and verification.
///
/// Decode-time variants (`InvalidPublicKey`, `InvalidSecretKey`,
/// `InvalidSignatureLength`, `InvalidHintEncoding`) let a caller distinguish
/// malformed input from a cryptographically rejected signature; the legacy
/// combined `open_combined` entry point collapses all of them to a single
/// failure.
#[derive(Debug, Error)]
pub enum DilithiumError {
    #[error("public key has the wrong length or an out-of-range t1 coefficient")]
    InvalidPublicKey,

    #[error("secret key has the wrong length or an out-of-range coefficient")]
    InvalidSecretKey,

    #[error("signature has the wrong length")]
    InvalidSignatureLength,

    #[error("signature hint encoding is malformed (non-monotone row or budget exceeded)")]
    InvalidHintEncoding,

    #[error("signature failed verification")]
    VerificationFailed,
}
