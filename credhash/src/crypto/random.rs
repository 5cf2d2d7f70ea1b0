//! Salt generation backed by the operating system CSPRNG.
//! A failing entropy source aborts the caller; there is no weaker fallback.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::HashError;

/// Returns exactly `len` bytes drawn from `OsRng`.
pub fn generate_salt(len: u32) -> Result<Vec<u8>, HashError> {
    generate_salt_with(&mut OsRng, len)
}

/// Same as [`generate_salt`] but draws from the supplied generator.
pub fn generate_salt_with<R>(rng: &mut R, len: u32) -> Result<Vec<u8>, HashError>
where
    R: RngCore + CryptoRng,
{
    let mut salt = vec![0u8; len as usize];
    rng.try_fill_bytes(&mut salt)
        .map_err(|e| HashError::RandomSource(format!("{e}")))?;
    Ok(salt)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{generate_salt, generate_salt_with};
    use crate::error::HashError;
    use rand::{CryptoRng, RngCore};

    /// Generator that always reports an unavailable entropy source.
    pub(crate) struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy pool closed",
            )))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn returns_requested_length() {
        assert_eq!(generate_salt(16).expect("os rng").len(), 16);
        assert_eq!(generate_salt(64).expect("os rng").len(), 64);
    }

    #[test]
    fn consecutive_salts_differ() {
        let a = generate_salt(16).expect("os rng");
        let b = generate_salt(16).expect("os rng");
        assert_ne!(a, b);
    }

    #[test]
    fn broken_source_is_fatal() {
        let err = generate_salt_with(&mut BrokenRng, 16).unwrap_err();
        assert!(matches!(err, HashError::RandomSource(_)));
    }
}
