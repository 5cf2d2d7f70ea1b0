//! Argon2id password hashing.
//! Each hash call draws a fresh salt, derives a key with the configured
//! parameters and renders the self-describing string from `codec`. Compare
//! rebuilds the parameters from the string itself, so hashes made under an
//! older parameter set keep verifying after the defaults change.

use argon2::{Algorithm, Argon2, Version};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::codec::{EncodedHash, ARGON2_VERSION};
use crate::crypto::ct::constant_time_eq;
use crate::crypto::params::{Argon2Params, ParamLimits};
use crate::crypto::random::generate_salt_with;
use crate::error::HashError;

#[derive(Debug, Clone, Default)]
pub struct Argon2idHasher {
    params: Argon2Params,
    limits: ParamLimits,
}

impl Argon2idHasher {
    /// Builds a hasher bound to `params` for its whole lifetime. The default
    /// limits are widened where `params` exceed them.
    pub fn new(params: Argon2Params) -> Result<Self, HashError> {
        params.validate()?;
        Ok(Self {
            params,
            limits: ParamLimits::default().covering(&params),
        })
    }

    /// Replaces the limits applied to parameters read back from stored hashes.
    /// The hasher's own parameters must fit within them.
    pub fn with_limits(mut self, limits: ParamLimits) -> Result<Self, HashError> {
        limits.check(&self.params)?;
        self.limits = limits;
        Ok(self)
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    pub fn limits(&self) -> &ParamLimits {
        &self.limits
    }

    pub fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        self.hash_with_rng(&mut OsRng, password)
    }

    /// Hashes with salt drawn from `rng` instead of the OS generator.
    pub fn hash_with_rng<R>(&self, rng: &mut R, password: &[u8]) -> Result<String, HashError>
    where
        R: RngCore + CryptoRng,
    {
        let salt = generate_salt_with(rng, self.params.salt_length)?;
        let key = derive_key(password, &salt, &self.params, self.params.key_length as usize)?;

        let encoded = EncodedHash {
            version: ARGON2_VERSION,
            params: self.params,
            salt,
            key: key.to_vec(),
        };
        debug!(
            m = self.params.memory_cost_kib,
            t = self.params.iterations,
            p = self.params.parallelism,
            "argon2id hash created"
        );
        Ok(encoded.encode())
    }

    pub fn compare(&self, encoded: &str, password: &[u8]) -> Result<(), HashError> {
        let stored = EncodedHash::decode(encoded)?;
        let stored_key = Zeroizing::new(stored.key);
        self.limits.check(&stored.params)?;

        let candidate = derive_key(password, &stored.salt, &stored.params, stored_key.len())
            .map_err(|e| match e {
                // A stored hash the KDF cannot accept is a malformed hash.
                HashError::Parameters(msg) | HashError::Kdf(msg) => HashError::Format(msg),
                other => other,
            })?;

        if constant_time_eq(&candidate, &stored_key) {
            Ok(())
        } else {
            Err(HashError::Verification)
        }
    }
}

/// Runs Argon2id v1.3 and returns a key of exactly `key_len` bytes.
fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
    key_len: usize,
) -> Result<Zeroizing<Vec<u8>>, HashError> {
    let kdf_params = params.to_kdf_params(key_len)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, kdf_params);

    let mut key = Zeroizing::new(vec![0u8; key_len]);
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| HashError::Kdf(format!("{e}")))?;
    Ok(key)
}
