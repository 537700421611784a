/*
    Crate wide error taxonomy.

    Every failure in the derivation engine is terminal from the caller's
    perspective. The bounded retry loops inside the Cardano root key
    generation are internal and never surface here unless their iteration
    cap is exhausted.
*/

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The seed does not meet the scheme specific length requirement.
    #[error("invalid seed length: expected {expected}, got {got}")]
    InvalidSeedLength { expected: &'static str, got: usize },

    /// Key bytes do not form a valid scalar or point for the curve.
    #[error("invalid key bytes for curve {0}")]
    InvalidKeyBytes(&'static str),

    /// A point operation produced a value that is not on the curve,
    /// or an x coordinate could not be lifted.
    #[error("invalid curve point: {0}")]
    InvalidPoint(&'static str),

    /// Child key derivation failed.
    #[error("derivation error: {0}")]
    Derivation(DerivationError),

    /// Base58Check checksum did not match the payload.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// Serialized extended key was not exactly 78 bytes.
    #[error("invalid extended key length: {0}")]
    InvalidExtendedKeyLength(usize),

    /// Extended key payload carried an unknown version prefix.
    #[error("unknown extended key version prefix")]
    UnknownVersionPrefix,

    /// A derivation path string could not be parsed.
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DerivationError {
    #[error("hardened path requires private key")]
    HardenedRequiresPrivateKey,

    /// The derived scalar was a multiple of the curve order or the derived
    /// point was the identity. Non-retryable; the caller must pick a
    /// different index.
    #[error("unlucky index: derived key is not valid")]
    UnluckyIndex,

    #[error("index {0} is reserved for hardened derivation")]
    IndexReserved(u32),

    #[error("index {0} does not fit in 31 bits")]
    IndexTooLarge(u32),

    #[error("maximum derivation depth of 255 exceeded")]
    DepthOverflow,

    /// Non-hardened derivation requested on a curve that only defines
    /// hardened derivation (SLIP10 Ed25519).
    #[error("curve only supports hardened derivation")]
    HardenedOnly,

    /// Public key only derivation requested on a curve without a public
    /// derivation rule.
    #[error("curve does not support public derivation")]
    PublicDerivationUnsupported,

    #[error("root key generation did not converge within the iteration cap")]
    RetriesExhausted,

    #[error("curve and scheme combination is not supported")]
    SchemeMismatch,
}

impl From<DerivationError> for Error {
    fn from(e: DerivationError) -> Self {
        Error::Derivation(e)
    }
}
