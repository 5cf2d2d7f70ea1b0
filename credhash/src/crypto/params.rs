//! Argon2id cost parameters and the resource limits applied to them.
//!
//! A parameter set is fixed when a hasher is built and never changes
//! afterwards. The limits bound what a stored hash (or a configuration file)
//! may ask of this process, since memory and iterations translate directly
//! into per-call latency and allocation.

use serde::{Deserialize, Serialize};

use crate::error::HashError;

/// Smallest salt the argon2 crate accepts.
pub const MIN_SALT_LEN: u32 = 8;
/// Smallest derived key the argon2 crate accepts.
pub const MIN_KEY_LEN: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Argon2Params {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u8,
    pub salt_length: u32,
    pub key_length: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_cost_kib: 64 * 1024,
            iterations: 1,
            parallelism: 2,
            salt_length: 16,
            key_length: 32,
        }
    }
}

impl Argon2Params {
    /// Builds a validated parameter set.
    pub fn new(
        memory_cost_kib: u32,
        iterations: u32,
        parallelism: u8,
        salt_length: u32,
        key_length: u32,
    ) -> Result<Self, HashError> {
        let params = Self {
            memory_cost_kib,
            iterations,
            parallelism,
            salt_length,
            key_length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the field invariants and the KDF's own minimums.
    pub fn validate(&self) -> Result<(), HashError> {
        if self.memory_cost_kib == 0
            || self.iterations == 0
            || self.parallelism == 0
            || self.salt_length == 0
            || self.key_length == 0
        {
            return Err(HashError::Parameters(
                "all argon2 parameters must be greater than zero".to_string(),
            ));
        }
        if self.salt_length < MIN_SALT_LEN {
            return Err(HashError::Parameters(format!(
                "salt length {} is below the minimum of {MIN_SALT_LEN} bytes",
                self.salt_length
            )));
        }
        if self.key_length < MIN_KEY_LEN {
            return Err(HashError::Parameters(format!(
                "key length {} is below the minimum of {MIN_KEY_LEN} bytes",
                self.key_length
            )));
        }
        if self.memory_cost_kib < 8 * u32::from(self.parallelism) {
            return Err(HashError::Parameters(format!(
                "memory cost {} KiB must be at least 8 KiB per lane",
                self.memory_cost_kib
            )));
        }
        Ok(())
    }

    /// Converts into the argon2 crate's parameter type with the given output length.
    pub(crate) fn to_kdf_params(&self, output_len: usize) -> Result<argon2::Params, HashError> {
        argon2::Params::new(
            self.memory_cost_kib,
            self.iterations,
            u32::from(self.parallelism),
            Some(output_len),
        )
        .map_err(|e| HashError::Parameters(format!("{e}")))
    }
}

/// Upper bounds on the cost a single hash or compare may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamLimits {
    pub max_memory_cost_kib: u32,
    pub max_iterations: u32,
    pub max_parallelism: u8,
}

impl Default for ParamLimits {
    fn default() -> Self {
        Self {
            max_memory_cost_kib: 1024 * 1024,
            max_iterations: 16,
            max_parallelism: 16,
        }
    }
}

impl ParamLimits {
    /// Widens these limits just enough to admit `params`, so a hasher can
    /// always verify the hashes it produced itself.
    pub fn covering(self, params: &Argon2Params) -> Self {
        Self {
            max_memory_cost_kib: self.max_memory_cost_kib.max(params.memory_cost_kib),
            max_iterations: self.max_iterations.max(params.iterations),
            max_parallelism: self.max_parallelism.max(params.parallelism),
        }
    }

    pub fn check(&self, params: &Argon2Params) -> Result<(), HashError> {
        if params.memory_cost_kib > self.max_memory_cost_kib {
            return Err(HashError::Parameters(format!(
                "memory cost {} KiB exceeds limit of {} KiB",
                params.memory_cost_kib, self.max_memory_cost_kib
            )));
        }
        if params.iterations > self.max_iterations {
            return Err(HashError::Parameters(format!(
                "iterations {} exceed limit of {}",
                params.iterations, self.max_iterations
            )));
        }
        if params.parallelism > self.max_parallelism {
            return Err(HashError::Parameters(format!(
                "parallelism {} exceeds limit of {}",
                params.parallelism, self.max_parallelism
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Argon2Params, ParamLimits};
    use crate::error::HashError;

    #[test]
    fn defaults_match_documented_profile() {
        let params = Argon2Params::default();
        assert_eq!(params.memory_cost_kib, 65536);
        assert_eq!(params.iterations, 1);
        assert_eq!(params.parallelism, 2);
        assert_eq!(params.salt_length, 16);
        assert_eq!(params.key_length, 32);
        params.validate().expect("defaults are valid");
    }

    #[test]
    fn rejects_zero_fields() {
        assert!(matches!(Argon2Params::new(0, 1, 1, 16, 32), Err(HashError::Parameters(_))));
        assert!(matches!(Argon2Params::new(1024, 0, 1, 16, 32), Err(HashError::Parameters(_))));
        assert!(matches!(Argon2Params::new(1024, 1, 0, 16, 32), Err(HashError::Parameters(_))));
        assert!(matches!(Argon2Params::new(1024, 1, 1, 0, 32), Err(HashError::Parameters(_))));
        assert!(matches!(Argon2Params::new(1024, 1, 1, 16, 0), Err(HashError::Parameters(_))));
    }

    #[test]
    fn rejects_values_below_kdf_minimums() {
        assert!(Argon2Params::new(1024, 1, 1, 4, 32).is_err());
        assert!(Argon2Params::new(1024, 1, 1, 16, 2).is_err());
        assert!(Argon2Params::new(8, 1, 4, 16, 32).is_err());
        assert!(Argon2Params::new(32, 1, 4, 16, 32).is_ok());
    }

    #[test]
    fn limits_cap_cost() {
        let limits = ParamLimits::default();
        limits.check(&Argon2Params::default()).expect("defaults within limits");

        let greedy = Argon2Params {
            memory_cost_kib: 4 * 1024 * 1024,
            ..Argon2Params::default()
        };
        assert!(matches!(limits.check(&greedy), Err(HashError::Parameters(_))));

        let slow = Argon2Params {
            iterations: 1000,
            ..Argon2Params::default()
        };
        assert!(limits.check(&slow).is_err());
    }

    #[test]
    fn covering_widens_only_what_is_needed() {
        let params = Argon2Params::new(1024, 20, 32, 16, 32).unwrap();
        let limits = ParamLimits::default().covering(&params);
        assert_eq!(limits.max_iterations, 20);
        assert_eq!(limits.max_parallelism, 32);
        assert_eq!(limits.max_memory_cost_kib, ParamLimits::default().max_memory_cost_kib);
        limits.check(&params).expect("own params fit");
    }

    #[test]
    fn deserializes_partial_camel_case() {
        let params: Argon2Params =
            serde_json::from_str(r#"{"memoryCostKib": 19456, "iterations": 2}"#).unwrap();
        assert_eq!(params.memory_cost_kib, 19456);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.key_length, 32);
    }
}
