//! bcrypt wrapper for credentials stored before the move to Argon2id.
//! The bcrypt crate manages its own salt and string format; this module only
//! maps its outcomes onto [`HashError`]. Passwords past bcrypt's 72-byte input
//! limit are refused instead of silently truncated.

use ::bcrypt::BcryptError;
use tracing::debug;

use crate::error::HashError;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

const PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: ::bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashError::Parameters(format!(
                "bcrypt cost {cost} outside {MIN_COST}..={MAX_COST}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Returns true when `encoded` carries one of the bcrypt version prefixes.
    pub fn is_bcrypt(encoded: &str) -> bool {
        PREFIXES.iter().any(|prefix| encoded.starts_with(prefix))
    }

    pub fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        let hashed = ::bcrypt::non_truncating_hash(password, self.cost).map_err(hash_error)?;
        debug!(cost = self.cost, "bcrypt hash created");
        Ok(hashed)
    }

    pub fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError> {
        if !Self::is_bcrypt(encoded) {
            return Err(HashError::format("not a bcrypt hash"));
        }
        match ::bcrypt::non_truncating_verify(password, encoded) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HashError::Verification),
            // too long to have been hashed here, so it cannot match
            Err(BcryptError::Truncation(_)) => Err(HashError::Verification),
            Err(e) => Err(HashError::Format(format!("{e}"))),
        }
    }
}

fn hash_error(e: BcryptError) -> HashError {
    match e {
        BcryptError::CostNotAllowed(_) | BcryptError::Truncation(_) => {
            HashError::Parameters(format!("{e}"))
        }
        BcryptError::Rand(_) => HashError::RandomSource(format!("{e}")),
        other => HashError::Kdf(format!("{other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_error, BcryptHasher};
    use crate::error::HashError;
    use ::bcrypt::BcryptError;

    fn fast() -> BcryptHasher {
        BcryptHasher::new(4).expect("minimum cost is valid")
    }

    #[test]
    fn hashes_are_unique_and_verify() {
        let hasher = fast();
        let first = hasher.hash(b"pa$$word").unwrap();
        let second = hasher.hash(b"pa$$word").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$2b$04$"));
        assert_eq!(hasher.compare(&first, b"pa$$word"), Ok(()));
        assert_eq!(hasher.compare(&second, b"pa$$word"), Ok(()));
    }

    #[test]
    fn wrong_password_is_verification_failure() {
        let hasher = fast();
        let hash = hasher.hash(b"pa$$word").unwrap();
        assert_eq!(hasher.compare(&hash, b"otherPa$$word"), Err(HashError::Verification));
    }

    #[test]
    fn verifies_regardless_of_own_cost() {
        let hash = fast().hash(b"pw").unwrap();
        BcryptHasher::new(6).unwrap().compare(&hash, b"pw").expect("cost is in the string");
    }

    #[test]
    fn rejects_foreign_and_broken_strings() {
        let hasher = fast();
        let argon = "$argon2id$v=19$m=65536,t=1,p=2$AAECAwQFBgcICQoLDA0ODw$AAECAwQFBgcICQoLDA0ODw";
        assert!(matches!(hasher.compare(argon, b"pw"), Err(HashError::Format(_))));
        assert!(matches!(hasher.compare("$2b$04$tooshort", b"pw"), Err(HashError::Format(_))));
        assert!(matches!(hasher.compare("", b"pw"), Err(HashError::Format(_))));
    }

    #[test]
    fn cost_is_bounded() {
        assert!(matches!(BcryptHasher::new(3), Err(HashError::Parameters(_))));
        assert!(matches!(BcryptHasher::new(32), Err(HashError::Parameters(_))));
        assert_eq!(BcryptHasher::default().cost(), ::bcrypt::DEFAULT_COST);
    }

    #[test]
    fn long_passwords_are_not_truncated() {
        let hasher = fast();
        let long = [b'a'; 80];
        let mut other = long;
        other[79] = b'b';

        assert!(matches!(hasher.hash(&long), Err(HashError::Parameters(_))));

        // a hash written by a truncating implementation must not accept either input
        let legacy = ::bcrypt::hash(long, 4).unwrap();
        assert_eq!(hasher.compare(&legacy, &other), Err(HashError::Verification));
        assert_eq!(hasher.compare(&legacy, &long), Err(HashError::Verification));
    }

    #[test]
    fn maps_library_errors_by_cause() {
        assert!(matches!(hash_error(BcryptError::Truncation(81)), HashError::Parameters(_)));
        assert!(matches!(hash_error(BcryptError::CostNotAllowed(2)), HashError::Parameters(_)));
        assert!(matches!(hash_error(BcryptError::InvalidSaltLen(3)), HashError::Kdf(_)));
    }
}
