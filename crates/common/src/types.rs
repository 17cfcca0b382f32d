use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Textual form used when a destination is rendered for humans or files
///
/// `Base32` is the 60-character hashed short form (`<52 chars>.b32.i2p`),
/// `Base64` is the full destination text. Callers pass this explicitly at
/// every conversion site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    #[default]
    Base32,
    Base64,
}

impl AddressFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base32 => "base32",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown address format: {0} (expected base32 or base64)")]
pub struct ParseFormatError(pub String);

impl FromStr for AddressFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base32" | "b32" => Ok(Self::Base32),
            "base64" | "b64" => Ok(Self::Base64),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_short_form() {
        assert_eq!(AddressFormat::default(), AddressFormat::Base32);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("base64".parse::<AddressFormat>(), Ok(AddressFormat::Base64));
        assert_eq!("B32".parse::<AddressFormat>(), Ok(AddressFormat::Base32));
        assert!("hex".parse::<AddressFormat>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for format in [AddressFormat::Base32, AddressFormat::Base64] {
            assert_eq!(format.to_string().parse::<AddressFormat>(), Ok(format));
        }
    }
}
