//! Destinations and their textual encodings
//!
//! A destination has two textual forms: the full destination base64 text
//! and the 60-character hashed short form (`.b32.i2p`). Only the full form
//! can be converted back to bytes.

mod destination;
pub mod encoding;
mod hash;

pub use destination::Destination;
pub use hash::DestinationHash;

use i2pkeys_common::ErrorKind;

/// Address validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("cannot convert short-form address {0} to a full destination without a lookup")]
    UnsupportedShortForm(String),

    #[error("invalid destination length: {actual} characters (expected {min}..={max})")]
    InvalidTextLength { actual: usize, min: usize, max: usize },

    #[error("invalid destination size: {actual} bytes (expected {min}..={max})")]
    InvalidByteLength { actual: usize, min: usize, max: usize },

    #[error("destination is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("invalid short-form address: {0}")]
    InvalidShortForm(String),

    #[error("invalid destination hash length: {0} (expected 32)")]
    InvalidHashLength(usize),
}

impl AddressError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
