use super::{DestinationSigner, KeyBundleError};
use crate::address::{encoding, AddressError, Destination};
use i2pkeys_common::AddressFormat;
use std::fmt;
use tracing::debug;

/// A public destination together with its combined secret
///
/// The combined secret is the destination text immediately followed by the
/// private key material, with no separator. The two-line text form is
/// `<destination>\n<combined secret>`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyBundle {
    destination: Destination,
    combined_secret: String,
}

impl KeyBundle {
    pub fn new(destination: Destination, combined_secret: impl Into<String>) -> Self {
        Self {
            destination,
            combined_secret: combined_secret.into(),
        }
    }

    /// Load from the two-line text form
    ///
    /// The text is split on the first line break only. The destination line
    /// is taken as-is; it is not validated.
    pub fn load(text: &str) -> Result<Self, KeyBundleError> {
        let (destination, combined_secret) = text
            .split_once('\n')
            .ok_or(KeyBundleError::MissingSecretLine)?;

        debug!(
            destination_len = destination.len(),
            secret_len = combined_secret.len(),
            "loaded key bundle"
        );

        Ok(Self::new(Destination::from_trusted(destination), combined_secret))
    }

    /// Serialize to the two-line text form using the full destination text
    pub fn store(&self) -> String {
        format!("{}\n{}", self.destination.as_str(), self.combined_secret)
    }

    /// Serialize with line 1 rendered in `format`
    ///
    /// A bundle stored as [`AddressFormat::Base32`] cannot be loaded back into
    /// a usable destination.
    pub fn store_as(&self, format: AddressFormat) -> Result<String, AddressError> {
        Ok(format!(
            "{}\n{}",
            self.destination.to_string_as(format)?,
            self.combined_secret
        ))
    }

    /// The public destination
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Public and private material, as handed to session commands
    pub fn combined_secret(&self) -> &str {
        &self.combined_secret
    }

    /// Decode the private material stored ahead of the destination text
    ///
    /// Takes everything in the combined secret before the first occurrence
    /// of the destination's own text.
    pub fn private_material(&self) -> Result<Vec<u8>, KeyBundleError> {
        let end = self
            .combined_secret
            .find(self.destination.as_str())
            .ok_or(KeyBundleError::DestinationNotInSecret)?;

        encoding::base64()
            .decode(self.combined_secret[..end].as_bytes())
            .map_err(|e| KeyBundleError::InvalidPrivateMaterial(e.to_string()))
    }

    /// Signing capability over the recovered private material
    pub fn signer(&self) -> Result<DestinationSigner, KeyBundleError> {
        DestinationSigner::from_private_material(&self.private_material()?)
    }
}

impl fmt::Debug for KeyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBundle")
            .field("destination", &self.destination)
            .field("combined_secret", &"<redacted>")
            .finish()
    }
}
