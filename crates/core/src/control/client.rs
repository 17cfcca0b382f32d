use super::session::{expect_ok, ControlSession};
use super::{Command, ControlError, Reply};
use crate::address::{encoding, Destination};
use crate::keys::KeyBundle;
use i2pkeys_common::config::address::MIN_BYTE_LEN;
use i2pkeys_common::ControlConfig;
use tracing::{debug, warn};

/// Blocking client for the router's control endpoint
///
/// Every call opens a fresh connection; nothing is shared between calls, so
/// a client can be used from several threads at once. No timeout or retry
/// is applied here.
#[derive(Debug, Clone, Default)]
pub struct ControlClient {
    config: ControlConfig,
}

impl ControlClient {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    /// Client for the endpoint at `address` with otherwise default settings
    pub fn with_address(address: impl Into<String>) -> Self {
        Self::new(ControlConfig::default().with_address(address))
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Ask the router for a new destination and its private keys
    ///
    /// The destination is taken from `PUB=` as-is; the combined secret is
    /// that text followed by the `PRIV=` value. A `PRIV=` value cut short by
    /// a stray line break is continued from the following lines until it
    /// decodes to a full key; if the router closes first, the call fails.
    pub fn generate_destination(&self) -> Result<KeyBundle, ControlError> {
        let mut session = self.open()?;
        let mut text = session.request(&Command::DestGenerate {
            signature_type: self.config.signature_type,
        })?;

        let mut private = required(&Reply::parse(&text), "PRIV")?.to_string();
        while !is_complete_key(&private) {
            let start = text.len();
            if !session.read_more(&mut text)? {
                warn!(private_len = private.len(), "reply ended inside the PRIV= value");
                return Err(ControlError::IncompleteField("PRIV"));
            }
            if let Some(rest) = text[start..].split_whitespace().next() {
                private.push_str(rest);
            }
        }

        let reply = Reply::parse(&text);
        let public = required(&reply, "PUB")?;

        debug!(
            public_len = public.len(),
            private_len = private.len(),
            "generated destination"
        );

        let destination = Destination::from_trusted(public);
        let combined_secret = format!("{}{}", destination.as_str(), private);
        Ok(KeyBundle::new(destination, combined_secret))
    }

    /// Resolve a name (`example.i2p`, `<hash>.b32.i2p`) to a full destination
    pub fn lookup(&self, name: &str) -> Result<Destination, ControlError> {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ControlError::InvalidName(name.to_string()));
        }

        let mut session = self.open()?;
        let text = session.request(&Command::NamingLookup {
            name: name.to_string(),
        })?;
        let reply = Reply::parse(&text);

        let value = required(&reply, "VALUE")?;
        let destination = Destination::parse(value)?;

        debug!(name, "resolved name");
        Ok(destination)
    }

    /// Connect and complete the version handshake
    fn open(&self) -> Result<ControlSession, ControlError> {
        let mut session = ControlSession::connect(&self.config.address, self.config.max_reply_len)?;
        let text = session.request(&Command::Hello {
            min: self.config.min_version.clone(),
            max: self.config.max_version.clone(),
        })?;

        if let Err(e) = expect_ok(&text) {
            warn!(address = %self.config.address, error = %e, "handshake rejected");
            return Err(e);
        }

        Ok(session)
    }
}

/// Check if `text` decodes to at least a destination's worth of key bytes
fn is_complete_key(text: &str) -> bool {
    encoding::base64()
        .decode(text.as_bytes())
        .map_or(false, |bytes| bytes.len() >= MIN_BYTE_LEN)
}

fn required<'a>(reply: &'a Reply, key: &'static str) -> Result<&'a str, ControlError> {
    reply.get(key).ok_or_else(|| {
        warn!(
            field = key,
            topic = %reply.topic(),
            result = reply.result().unwrap_or("<none>"),
            "reply is missing a field"
        );
        ControlError::MissingField(key)
    })
}
