//! Control-channel client
//!
//! Each call opens its own connection to the router's control endpoint,
//! performs the version handshake, sends one command and reads its reply.
//! Replies are framed by line; anything the router sends past the end of one
//! reply is kept for the next.
//! The connection is closed on every exit path.

mod client;
mod command;
mod reply;
mod session;

pub use client::ControlClient;
pub use command::Command;
pub use reply::Reply;

use crate::address::AddressError;
use i2pkeys_common::ErrorKind;

/// Control-channel errors
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("failed to connect to control endpoint {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to control endpoint: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to read from control endpoint: {0}")]
    Read(#[source] std::io::Error),

    #[error("no data received from control endpoint")]
    EmptyReply,

    #[error("reply exceeds {limit} bytes")]
    ReplyTooLarge { limit: usize },

    #[error("reply is not valid UTF-8")]
    InvalidUtf8,

    #[error("no result received (RESULT={}, MESSAGE={})",
        .result.as_deref().unwrap_or("<none>"),
        .message.as_deref().unwrap_or("<none>"))]
    NoResult {
        result: Option<String>,
        message: Option<String>,
    },

    #[error("reply is missing the {0}= field")]
    MissingField(&'static str),

    #[error("reply ended before the {0}= value was complete")]
    IncompleteField(&'static str),

    #[error("invalid lookup name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Address(#[from] AddressError),
}

impl ControlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connect { .. } | Self::Write(_) | Self::Read(_) | Self::EmptyReply => {
                ErrorKind::Transport
            }
            Self::ReplyTooLarge { .. }
            | Self::InvalidUtf8
            | Self::NoResult { .. }
            | Self::MissingField(_)
            | Self::IncompleteField(_) => ErrorKind::Protocol,
            Self::InvalidName(_) => ErrorKind::Validation,
            Self::Address(err) => err.kind(),
        }
    }
}
