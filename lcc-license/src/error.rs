//! Error types for license issuing.

use lcc_crypto::CryptoError;
use std::path::PathBuf;
use thiserror::Error;

/// License-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key handling or signing failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Date did not match a known format.
    #[error("invalid date [{0}]: use YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD")]
    InvalidDate(String),

    /// Feature name contains a forbidden character.
    #[error("feature name should not contain any of '[ ] / \\' characters: {0}")]
    InvalidFeatureName(String),

    /// Parameter value that cannot be stored in a license file.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Attempt to store a meta-parameter or reserved key as a signed attribute.
    #[error("{0} is reserved and cannot be used as a license attribute")]
    ReservedAttribute(String),

    /// The primary key given on the command line does not exist.
    #[error("primary key [{}] not found", .0.display())]
    PrimaryKeyNotFound(PathBuf),

    /// Project folder is missing or not a directory.
    #[error("path {} doesn't exist or is not a directory", .0.display())]
    InvalidProjectFolder(PathBuf),

    /// Project name is empty or contains path separators.
    #[error("invalid project name: {0}")]
    InvalidProjectName(String),

    /// An existing license file could not be parsed, or its path is unusable.
    #[error("invalid license file: {0}")]
    InvalidLicenseFile(String),

    /// Public key template is missing or unreadable.
    #[error("template error: {0}")]
    Template(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
