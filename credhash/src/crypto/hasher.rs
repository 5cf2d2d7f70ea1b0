//! Algorithm selection. A [`Hasher`] wraps exactly one concrete algorithm,
//! chosen at construction and fixed for its lifetime.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::crypto::argon2id::Argon2idHasher;
use crate::crypto::bcrypt::BcryptHasher;
use crate::crypto::codec::ARGON2ID_TAG;
use crate::error::HashError;

/// Hash and verify capability shared by every algorithm.
pub trait CredentialHasher: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Hashes `password` with a fresh salt and returns the encoded string.
    fn hash(&self, password: &[u8]) -> Result<String, HashError>;

    /// `Ok(())` only when `encoded` is well formed, produced by this
    /// algorithm, and derived from `password`.
    fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Argon2id,
    Bcrypt,
}

impl Algorithm {
    /// Identifies the algorithm from the leading tag of an encoded string.
    pub fn identify(encoded: &str) -> Option<Self> {
        if encoded.starts_with(&format!("${ARGON2ID_TAG}$")) {
            Some(Algorithm::Argon2id)
        } else if BcryptHasher::is_bcrypt(encoded) {
            Some(Algorithm::Bcrypt)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Argon2id => "argon2id",
            Algorithm::Bcrypt => "bcrypt",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum Hasher {
    Argon2id(Argon2idHasher),
    Bcrypt(BcryptHasher),
}

impl Default for Hasher {
    fn default() -> Self {
        Hasher::Argon2id(Argon2idHasher::default())
    }
}

impl From<Argon2idHasher> for Hasher {
    fn from(value: Argon2idHasher) -> Self {
        Hasher::Argon2id(value)
    }
}

impl From<BcryptHasher> for Hasher {
    fn from(value: BcryptHasher) -> Self {
        Hasher::Bcrypt(value)
    }
}

impl CredentialHasher for Hasher {
    fn algorithm(&self) -> Algorithm {
        match self {
            Hasher::Argon2id(_) => Algorithm::Argon2id,
            Hasher::Bcrypt(_) => Algorithm::Bcrypt,
        }
    }

    fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        match self {
            Hasher::Argon2id(inner) => inner.hash(password),
            Hasher::Bcrypt(inner) => inner.hash(password),
        }
    }

    fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError> {
        let algorithm = self.algorithm();
        if let Some(found) = Algorithm::identify(encoded) {
            if found != algorithm {
                warn!(expected = %algorithm, %found, "stored hash belongs to another algorithm");
                return Err(HashError::format(format!(
                    "hash was produced by {found}, hasher is {algorithm}"
                )));
            }
        }

        let result = match self {
            Hasher::Argon2id(inner) => inner.compare(encoded, password),
            Hasher::Bcrypt(inner) => inner.compare(encoded, password),
        };
        match &result {
            Ok(()) => debug!(%algorithm, "password verified"),
            Err(HashError::Verification) => debug!(%algorithm, "password mismatch"),
            Err(err) => warn!(%algorithm, kind = err.kind(), error = %err, "stored hash rejected"),
        }
        result
    }
}

impl CredentialHasher for Argon2idHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Argon2id
    }

    fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        Argon2idHasher::hash(self, password)
    }

    fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError> {
        Argon2idHasher::compare(self, encoded, password)
    }
}

impl CredentialHasher for BcryptHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bcrypt
    }

    fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        BcryptHasher::hash(self, password)
    }

    fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError> {
        BcryptHasher::compare(self, encoded, password)
    }
}
