//! Pluggable password hashing and verification for stored credentials.
//!
//! A [`Hasher`] is built once from an explicit parameter set (or the
//! documented defaults) and exposes `hash` / `compare`. The encoded strings
//! it returns are opaque to callers and are meant to be persisted verbatim.

pub mod config;
pub mod crypto;
pub mod error;

pub use crypto::argon2id::Argon2idHasher;
pub use crypto::bcrypt::BcryptHasher;
pub use crypto::hasher::{Algorithm, CredentialHasher, Hasher};
pub use crypto::params::{Argon2Params, ParamLimits};
pub use error::HashError;
