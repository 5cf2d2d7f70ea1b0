//! Unpadded standard base64, the alphabet used inside encoded hash strings.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};

use crate::error::HashError;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, HashError> {
    STANDARD_NO_PAD
        .decode(text.as_bytes())
        .map_err(|e| HashError::format(format!("invalid base64: {e}")))
}
