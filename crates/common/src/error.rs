use std::fmt;

/// Broad category of a failure, shared by every error type in the workspace
///
/// None of these are retried internally; callers decide what to do with
/// a `Transport` failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed text, out-of-range length, bad alphabet
    Validation,

    /// Connection refused/reset, empty or failed read/write
    Transport,

    /// An expected marker was absent from a control-channel reply
    Protocol,

    /// Key file could not be read or written
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
