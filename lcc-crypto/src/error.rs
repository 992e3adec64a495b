//! Error types for key handling and signing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while generating, importing, exporting or using a key.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The operation needs a loaded key pair and none is present.
    #[error("no key pair loaded: call generate_key_pair or load_private_key first")]
    NotInitialized,

    /// Input does not match the expected PEM/DER structure.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// Structurally valid key that the crypto library rejected.
    #[error("key import failed: {0}")]
    ImportFailure(String),

    /// Private key file does not exist.
    #[error("private key file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Key pair generation failed.
    #[error("key generation failed: {0}")]
    GenerationFailure(String),

    /// The signing primitive failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Base64 or DER encoding error.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// I/O error while reading key material.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
