use std::fmt;

/// Requests sent over the control channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Version handshake
    Hello { min: String, max: String },

    /// Generate a fresh destination and its private keys
    DestGenerate { signature_type: u8 },

    /// Resolve a name to a full destination
    NamingLookup { name: String },
}

impl Command {
    /// The exact line written to the wire, newline included
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "HELLO VERSION",
            Self::DestGenerate { .. } => "DEST GENERATE",
            Self::NamingLookup { .. } => "NAMING LOOKUP",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hello { min, max } => write!(f, "HELLO VERSION MIN={} MAX={}", min, max),
            Self::DestGenerate { signature_type } => {
                write!(f, "DEST GENERATE SIGNATURE_TYPE={}", signature_type)
            }
            Self::NamingLookup { name } => write!(f, "NAMING LOOKUP NAME={}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_lines() {
        let hello = Command::Hello {
            min: "3.1".to_string(),
            max: "3.1".to_string(),
        };
        assert_eq!(hello.to_line(), "HELLO VERSION MIN=3.1 MAX=3.1\n");

        let generate = Command::DestGenerate { signature_type: 7 };
        assert_eq!(generate.to_line(), "DEST GENERATE SIGNATURE_TYPE=7\n");

        let lookup = Command::NamingLookup {
            name: "idk.i2p".to_string(),
        };
        assert_eq!(lookup.to_line(), "NAMING LOOKUP NAME=idk.i2p\n");
    }
}
