use super::{encoding, AddressError, DestinationHash};
use i2pkeys_common::config::address::{
    MAX_BYTE_LEN, MAX_TEXT_LEN, MIN_BYTE_LEN, MIN_TEXT_LEN, SHORT_SUFFIX, SUFFIX,
};
use i2pkeys_common::AddressFormat;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A full overlay-network destination
///
/// The canonical value is the destination text (516..=4096 characters of
/// destination base64). Raw bytes, the hash and the short form are derived
/// on demand through explicit conversions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    /// Parse and validate destination text
    ///
    /// Surrounding whitespace is trimmed and a trailing `.i2p` is stripped.
    /// A `.b32.i2p` short form is rejected: it can only be resolved through
    /// a lookup.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let mut text = text.trim();

        if text.ends_with(SHORT_SUFFIX) {
            debug!(address = text, "short-form address given where a destination is required");
            return Err(AddressError::UnsupportedShortForm(text.to_string()));
        }
        if let Some(stripped) = text.strip_suffix(SUFFIX) {
            text = stripped;
        }

        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&text.len()) {
            return Err(AddressError::InvalidTextLength {
                actual: text.len(),
                min: MIN_TEXT_LEN,
                max: MAX_TEXT_LEN,
            });
        }

        encoding::base64()
            .decode(text.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

        Ok(Self(text.to_string()))
    }

    /// Encode raw destination bytes
    ///
    /// Byte inputs are accepted up to 4096 bytes, but text is capped at
    /// 4096 characters, so anything over 3072 bytes encodes to text that
    /// `parse` rejects. Such a destination still converts to bytes and hash.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if !(MIN_BYTE_LEN..=MAX_BYTE_LEN).contains(&bytes.len()) {
            return Err(AddressError::InvalidByteLength {
                actual: bytes.len(),
                min: MIN_BYTE_LEN,
                max: MAX_BYTE_LEN,
            });
        }

        Ok(Self(encoding::base64().encode(bytes)))
    }

    /// Wrap destination text without validating it
    ///
    /// Used where the text comes from a source that is already trusted (a
    /// stored key file, a router reply). Conversions on the result may fail.
    pub fn from_trusted(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The destination text, exactly as parsed
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the destination text into raw bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, AddressError> {
        encoding::base64()
            .decode(self.0.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))
    }

    /// SHA-256 of the raw bytes
    pub fn to_hash(&self) -> Result<DestinationHash, AddressError> {
        Ok(DestinationHash::digest(&self.to_bytes()?))
    }

    /// The 60-character `.b32.i2p` form
    pub fn to_short_form(&self) -> Result<String, AddressError> {
        Ok(self.to_hash()?.to_short_form())
    }

    /// Render in the requested textual form
    pub fn to_string_as(&self, format: AddressFormat) -> Result<String, AddressError> {
        match format {
            AddressFormat::Base32 => self.to_short_form(),
            AddressFormat::Base64 => Ok(self.0.clone()),
        }
    }

    /// Check if a name is a hashed short-form address
    pub fn is_short_form(name: &str) -> bool {
        name.trim().ends_with(SHORT_SUFFIX)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full destinations are hundreds of characters; show the ends only.
        if self.0.len() > 24 && self.0.is_ascii() {
            write!(
                f,
                "Destination({}..{})",
                &self.0[..12],
                &self.0[self.0.len() - 12..]
            )
        } else {
            write!(f, "Destination({})", self.0)
        }
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Destination {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
