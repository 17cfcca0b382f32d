use crate::types::AddressFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Control-channel protocol constants
pub mod protocol {
    /// Default control endpoint of a local router
    pub const DEFAULT_CONTROL_ADDR: &str = "127.0.0.1:7656";

    /// Protocol version offered in the handshake (both MIN and MAX)
    pub const VERSION: &str = "3.1";

    /// Ed25519 signature type requested by `DEST GENERATE`
    pub const SIGNATURE_TYPE: u8 = 7;

    /// Size of a single transport read
    pub const READ_CHUNK_LEN: usize = 4096;

    /// Upper bound on an accumulated reply (16 KB)
    pub const MAX_REPLY_LEN: usize = 16 * 1024;
}

/// Destination encoding constants
pub mod address {
    /// Shortest accepted destination text
    pub const MIN_TEXT_LEN: usize = 516;

    /// Longest accepted destination text
    pub const MAX_TEXT_LEN: usize = 4096;

    /// Smallest raw destination
    pub const MIN_BYTE_LEN: usize = 384;

    /// Largest raw destination
    pub const MAX_BYTE_LEN: usize = 4096;

    /// SHA-256 digest length
    pub const HASH_LEN: usize = 32;

    /// Suffix accepted (and stripped) on full destinations
    pub const SUFFIX: &str = ".i2p";

    /// Suffix of the hashed short form
    pub const SHORT_SUFFIX: &str = ".b32.i2p";

    /// Base32 characters kept from the encoded hash
    pub const SHORT_HASH_CHARS: usize = 52;

    /// Total short-form length: 52 + ".b32.i2p"
    pub const SHORT_FORM_LEN: usize = 60;
}

/// Key file constants
pub mod keys {
    /// Key file used when none is given
    pub const DEFAULT_KEYFILE: &str = "default.i2pkeys";

    /// Configuration file looked up in the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "i2pkeys.toml";
}

/// Where and how to reach the router's control endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// `host:port` of the control endpoint
    pub address: String,

    /// Lowest protocol version offered in the handshake
    pub min_version: String,

    /// Highest protocol version offered in the handshake
    pub max_version: String,

    /// Signature type requested when generating destinations
    pub signature_type: u8,

    /// Replies larger than this are rejected
    pub max_reply_len: usize,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            address: protocol::DEFAULT_CONTROL_ADDR.to_string(),
            min_version: protocol::VERSION.to_string(),
            max_version: protocol::VERSION.to_string(),
            signature_type: protocol::SIGNATURE_TYPE,
            max_reply_len: protocol::MAX_REPLY_LEN,
        }
    }
}

impl ControlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_max_reply_len(mut self, max_reply_len: usize) -> Self {
        self.max_reply_len = max_reply_len;
        self
    }
}

/// Location and layout of the persisted key file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyFileConfig {
    pub path: String,

    /// Form of the destination written on line 1
    pub format: AddressFormat,
}

impl Default for KeyFileConfig {
    fn default() -> Self {
        Self {
            path: keys::DEFAULT_KEYFILE.to_string(),
            // Only the full form can be loaded back into a usable destination.
            format: AddressFormat::Base64,
        }
    }
}

/// Tool configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub control: ControlConfig,
    pub keys: KeyFileConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control_address(mut self, address: impl Into<String>) -> Self {
        self.control.address = address.into();
        self
    }

    pub fn with_keyfile(mut self, path: impl Into<String>) -> Self {
        self.keys.path = path.into();
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),
}
