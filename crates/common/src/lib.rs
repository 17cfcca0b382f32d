pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ConfigError, ControlConfig, KeyFileConfig};
pub use error::ErrorKind;
pub use types::{AddressFormat, ParseFormatError};
