use super::KeyBundleError;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, KEYPAIR_LENGTH, SIGNATURE_LENGTH};
use std::fmt;

/// Ed25519 private key material: 32-byte seed followed by the 32-byte public key
pub const PRIVATE_KEY_LEN: usize = KEYPAIR_LENGTH;

pub const SIGNATURE_LEN: usize = SIGNATURE_LENGTH;

/// Signing capability recovered from a key bundle
#[derive(Clone)]
pub struct DestinationSigner {
    signing_key: SigningKey,
}

impl DestinationSigner {
    /// Build a signer from recovered private key material
    ///
    /// The material must be exactly [`PRIVATE_KEY_LEN`] bytes. Anything else
    /// is rejected rather than truncated or padded.
    pub fn from_private_material(bytes: &[u8]) -> Result<Self, KeyBundleError> {
        let keypair: &[u8; PRIVATE_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| KeyBundleError::InvalidKeyLength {
                    expected: PRIVATE_KEY_LEN,
                    actual: bytes.len(),
                })?;

        let signing_key = SigningKey::from_keypair_bytes(keypair)
            .map_err(|_| KeyBundleError::InvalidSigningKey)?;

        Ok(Self { signing_key })
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Signature over a hostname, as used when registering a name
    pub fn sign_hostname(&self, hostname: &str) -> [u8; SIGNATURE_LEN] {
        self.sign(hostname.as_bytes())
    }

    /// Verify a signature on a message
    pub fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool {
        self.signing_key
            .verifying_key()
            .verify(message, &Signature::from_bytes(signature))
            .is_ok()
    }

    /// Get the public key bytes
    pub fn public_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

impl fmt::Debug for DestinationSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationSigner")
            .field("public_key", &hex::encode(self.public_bytes()))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
