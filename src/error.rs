//! Error types for the signature-based witness encryption library

use ark_serialize::SerializationError;

/// Errors produced by the SWE scheme.
///
/// Note that `verify`/`agg_verify` report a cryptographically invalid
/// signature as `Ok(false)`, never as an error; the variants below only
/// signal structural problems or an exhausted discrete-log search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SweError {
    /// Structurally invalid input: threshold/key-count mismatch, mismatched
    /// list lengths, or duplicate x-coordinates (zero Lagrange denominator).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// The baby-step giant-step search exhausted its bound without a match.
    /// Signals a corrupted ciphertext, a wrong signer subset, or a plaintext
    /// outside the declared bound.
    #[error("discrete logarithm not found within the configured bound")]
    DiscreteLogNotFound,
    /// The hash-to-curve suite failed to produce a group element.
    #[error("hash-to-curve failed: {0}")]
    Hashing(String),
    /// Canonical (de)serialization of an algebraic value failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<SerializationError> for SweError {
    fn from(err: SerializationError) -> Self {
        SweError::Serialization(format!("{err}"))
    }
}
