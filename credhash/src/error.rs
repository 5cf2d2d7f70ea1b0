//! Error taxonomy shared by every hashing algorithm.
//! Callers should treat any `Err` from a compare as "authentication failed";
//! the variants only exist so the reason can be logged.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
    #[error("encoded hash is malformed: {0}")]
    Format(String),
    #[error("unsupported algorithm version {found}; expected {supported}")]
    Version { found: u32, supported: u32 },
    #[error("hashed password is not the hash of the given password")]
    Verification,
    #[error("invalid hashing parameters: {0}")]
    Parameters(String),
    #[error("key derivation failed: {0}")]
    Kdf(String),
}

impl HashError {
    /// Short label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            HashError::RandomSource(_) => "random_source",
            HashError::Format(_) => "format",
            HashError::Version { .. } => "version",
            HashError::Verification => "verification",
            HashError::Parameters(_) => "parameters",
            HashError::Kdf(_) => "kdf",
        }
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        HashError::Format(msg.into())
    }
}
