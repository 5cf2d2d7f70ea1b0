//! Self-describing Argon2id hash strings:
//! `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt>$<key>`
//! with salt and key in unpadded standard base64.

use crate::crypto::encoding;
use crate::crypto::params::Argon2Params;
use crate::error::HashError;

pub const ARGON2ID_TAG: &str = "argon2id";
/// Argon2 version 1.3, the only one this crate produces or accepts.
pub const ARGON2_VERSION: u32 = 0x13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub version: u32,
    pub params: Argon2Params,
    pub salt: Vec<u8>,
    pub key: Vec<u8>,
}

impl EncodedHash {
    pub fn encode(&self) -> String {
        format!(
            "${ARGON2ID_TAG}$v={}$m={},t={},p={}${}${}",
            self.version,
            self.params.memory_cost_kib,
            self.params.iterations,
            self.params.parallelism,
            encoding::encode(&self.salt),
            encoding::encode(&self.key),
        )
    }

    /// Parses an encoded string. The version is checked before the remaining
    /// tokens are looked at, so an unsupported version always surfaces as
    /// [`HashError::Version`].
    pub fn decode(encoded: &str) -> Result<Self, HashError> {
        let tokens: Vec<&str> = encoded.split('$').collect();
        if tokens.len() != 6 {
            return Err(HashError::format(format!(
                "expected 6 '$'-separated tokens, found {}",
                tokens.len()
            )));
        }
        if !tokens[0].is_empty() {
            return Err(HashError::format("hash must start with '$'"));
        }
        if tokens[1] != ARGON2ID_TAG {
            return Err(HashError::format(format!(
                "unexpected algorithm tag '{}'",
                tokens[1]
            )));
        }

        let version = parse_field(tokens[2], "v")?;
        if version != ARGON2_VERSION {
            return Err(HashError::Version {
                found: version,
                supported: ARGON2_VERSION,
            });
        }

        let mut fields = tokens[3].split(',');
        let (m, t, p) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(m), Some(t), Some(p), None) => (m, t, p),
            _ => return Err(HashError::format("parameters must be 'm=..,t=..,p=..'")),
        };
        let memory_cost_kib = parse_field(m, "m")?;
        let iterations = parse_field(t, "t")?;
        let parallelism = u8::try_from(parse_field(p, "p")?)
            .map_err(|_| HashError::format("parallelism does not fit in a byte"))?;

        let salt = encoding::decode(tokens[4])?;
        let key = encoding::decode(tokens[5])?;

        let params = Argon2Params {
            memory_cost_kib,
            iterations,
            parallelism,
            salt_length: salt.len() as u32,
            key_length: key.len() as u32,
        };
        if memory_cost_kib == 0
            || iterations == 0
            || parallelism == 0
            || salt.is_empty()
            || key.is_empty()
        {
            return Err(HashError::format("parameters and payloads must be non-empty"));
        }

        Ok(Self {
            version,
            params,
            salt,
            key,
        })
    }
}

/// Parses `<name>=<decimal>`.
fn parse_field(token: &str, name: &str) -> Result<u32, HashError> {
    let value = token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| HashError::format(format!("expected '{name}=' in '{token}'")))?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HashError::format(format!("'{name}' is not a decimal number")));
    }
    value
        .parse::<u32>()
        .map_err(|e| HashError::format(format!("'{name}' out of range: {e}")))
}
