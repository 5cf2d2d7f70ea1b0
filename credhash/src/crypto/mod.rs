//! Credential hashing primitives. Argon2id is the primary algorithm; bcrypt
//! remains available for stores that still hold legacy hashes. Each submodule
//! covers one piece (salts, comparison, the string format, one algorithm) so
//! the security-relevant code stays small and auditable.

pub mod argon2id;
pub mod bcrypt;
pub mod codec;
pub mod ct;
pub mod encoding;
pub mod hasher;
pub mod params;
pub mod random;
