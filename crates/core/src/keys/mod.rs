mod bundle;
mod signer;
mod storage;

pub use bundle::KeyBundle;
pub use signer::{DestinationSigner, PRIVATE_KEY_LEN, SIGNATURE_LEN};
pub use storage::KeyFile;

use crate::address::AddressError;
use i2pkeys_common::ErrorKind;
use std::path::PathBuf;

/// Errors related to key bundles and key files
#[derive(Debug, thiserror::Error)]
pub enum KeyBundleError {
    #[error("key text has no second line holding the combined secret")]
    MissingSecretLine,

    #[error("combined secret does not contain its own destination")]
    DestinationNotInSecret,

    #[error("private key material is not valid base64: {0}")]
    InvalidPrivateMaterial(String),

    #[error("invalid private key length: {actual} bytes (expected {expected})")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("private key does not match its embedded public key")]
    InvalidSigningKey,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("key file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("key file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read key file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KeyBundleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::Read { .. } | Self::Write { .. } => {
                ErrorKind::Storage
            }
            Self::Address(err) => err.kind(),
            _ => ErrorKind::Validation,
        }
    }
}
