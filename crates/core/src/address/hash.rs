use super::{encoding, AddressError};
use i2pkeys_common::config::address::{HASH_LEN, SHORT_FORM_LEN, SHORT_HASH_CHARS, SHORT_SUFFIX};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// SHA-256 of a destination's raw bytes
///
/// Rendered as the short form `<52 base32 chars>.b32.i2p`. The short form
/// cannot be turned back into a destination without a network lookup.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationHash([u8; HASH_LEN]);

impl DestinationHash {
    /// Hash raw destination bytes
    pub fn digest(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidHashLength(bytes.len()))?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Render as `<52 chars>.b32.i2p`
    pub fn to_short_form(&self) -> String {
        let encoded = encoding::base32().encode(&self.0);
        format!("{}{}", &encoded[..SHORT_HASH_CHARS], SHORT_SUFFIX)
    }

    /// Parse a 60-character `.b32.i2p` address back into the hash
    pub fn from_short_form(text: &str) -> Result<Self, AddressError> {
        if !text.is_ascii() {
            return Err(AddressError::InvalidShortForm(
                "contains non-ASCII characters".to_string(),
            ));
        }
        if text.len() != SHORT_FORM_LEN {
            return Err(AddressError::InvalidShortForm(format!(
                "length {} (expected {})",
                text.len(),
                SHORT_FORM_LEN
            )));
        }
        if !text.ends_with(SHORT_SUFFIX) {
            return Err(AddressError::InvalidShortForm(format!(
                "missing {} suffix",
                SHORT_SUFFIX
            )));
        }

        // 52 symbols carry 260 bits; four pad characters complete the block.
        let padded = format!("{}====", &text[..SHORT_HASH_CHARS]);
        let bytes = encoding::base32()
            .decode(padded.as_bytes())
            .map_err(|e| AddressError::InvalidShortForm(e.to_string()))?;

        Self::from_slice(&bytes)
    }
}

impl fmt::Display for DestinationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_short_form())
    }
}

impl fmt::Debug for DestinationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DestinationHash({})", hex::encode(self.0))
    }
}

impl From<[u8; HASH_LEN]> for DestinationHash {
    fn from(value: [u8; HASH_LEN]) -> Self {
        Self::from_bytes(value)
    }
}

impl TryFrom<&[u8]> for DestinationHash {
    type Error = AddressError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

impl FromStr for DestinationHash {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_short_form(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_SHORT_FORM: &str = "udhdrtrcetjm5sxzskjyr5ztpeszydbh4dpl3pl4utgqqw2v4jna.b32.i2p";

    #[test]
    fn test_short_form_shape() {
        let hash = DestinationHash::digest(b"some destination bytes");
        let short = hash.to_short_form();

        assert_eq!(short.len(), SHORT_FORM_LEN);
        assert!(short.ends_with(SHORT_SUFFIX));
        assert!(!short.contains('='));
    }

    #[test]
    fn test_short_form_roundtrip() {
        let hash = DestinationHash::digest(b"another destination");
        let parsed = DestinationHash::from_short_form(&hash.to_short_form()).unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn test_known_short_form_reencodes_identically() {
        let hash: DestinationHash = KNOWN_SHORT_FORM.parse().unwrap();
        assert_eq!(hash.to_string(), KNOWN_SHORT_FORM);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = DestinationHash::from_short_form("not-a-valid-hash").unwrap_err();
        assert!(matches!(err, AddressError::InvalidShortForm(_)));

        let err = DestinationHash::from_short_form("").unwrap_err();
        assert!(matches!(err, AddressError::InvalidShortForm(_)));
    }

    #[test]
    fn test_rejects_wrong_suffix() {
        let text = KNOWN_SHORT_FORM.replace(".b32.i2p", ".b32.xyz");
        let err = DestinationHash::from_short_form(&text).unwrap_err();
        assert!(matches!(err, AddressError::InvalidShortForm(_)));
    }

    #[test]
    fn test_rejects_uppercase_symbols() {
        let text = format!(
            "{}{}",
            KNOWN_SHORT_FORM[..SHORT_HASH_CHARS].to_uppercase(),
            SHORT_SUFFIX
        );
        assert!(DestinationHash::from_short_form(&text).is_err());
    }

    #[test]
    fn test_rejects_non_ascii_without_panicking() {
        let text = format!("{}é{}", "a".repeat(50), SHORT_SUFFIX);
        assert_eq!(text.len(), SHORT_FORM_LEN);
        assert!(DestinationHash::from_short_form(&text).is_err());
    }

    #[test]
    fn test_from_slice_length() {
        assert!(DestinationHash::from_slice(&[1u8; 32]).is_ok());
        let err = DestinationHash::from_slice(&[1u8; 31]).unwrap_err();
        assert!(matches!(err, AddressError::InvalidHashLength(31)));
    }

    #[test]
    fn test_debug_is_hex() {
        let hash = DestinationHash::from_bytes([0xab; 32]);
        assert_eq!(format!("{:?}", hash), format!("DestinationHash({})", "ab".repeat(32)));
    }
}
