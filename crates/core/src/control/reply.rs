use std::collections::HashMap;

/// A control-channel reply split into words and `KEY=VALUE` fields
///
/// Tokens are separated by spaces, tabs or line breaks. Bare words
/// (`HELLO`, `REPLY`) form the topic; anything containing `=` is a field,
/// and a value may be double-quoted to carry spaces. Line breaks inside a
/// quoted value are dropped. Field order does not matter; when a key
/// repeats, the first value wins.
///
/// A value split by a stray line break is not rejoined here; the caller
/// knows which field may continue on the next line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    words: Vec<String>,
    fields: HashMap<String, String>,
}

impl Reply {
    pub fn parse(text: &str) -> Self {
        let mut reply = Self::default();

        for token in tokenize(text) {
            match token.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    let value = unquote(value);
                    reply
                        .fields
                        .entry(key.to_string())
                        .or_insert_with(|| value.to_string());
                }
                _ => reply.words.push(token),
            }
        }

        reply
    }

    /// Leading bare words, e.g. `HELLO REPLY`
    pub fn topic(&self) -> String {
        self.words.join(" ")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn result(&self) -> Option<&str> {
        self.get("RESULT")
    }

    pub fn message(&self) -> Option<&str> {
        self.get("MESSAGE")
    }

    /// Check if the reply carries `RESULT=OK`
    pub fn is_ok(&self) -> bool {
        self.result() == Some("OK")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in text.chars() {
        match c {
            '\r' | '\n' if quoted => {}
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            ' ' | '\t' | '\r' | '\n' if !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_reply() {
        let reply = Reply::parse("HELLO REPLY RESULT=OK VERSION=3.1\n");

        assert_eq!(reply.topic(), "HELLO REPLY");
        assert!(reply.is_ok());
        assert_eq!(reply.get("VERSION"), Some("3.1"));
        assert_eq!(reply.len(), 2);
    }

    #[test]
    fn test_order_independent() {
        let a = Reply::parse("DEST REPLY PUB=abc PRIV=def\n");
        let b = Reply::parse("DEST REPLY PRIV=def PUB=abc\n");

        assert_eq!(a.get("PUB"), b.get("PUB"));
        assert_eq!(a.get("PRIV"), b.get("PRIV"));
    }

    #[test]
    fn test_line_breaks_separate_tokens() {
        let reply = Reply::parse("HELLO REPLY RESULT=OK\nNAMING REPLY VALUE=abc\r\n");

        assert_eq!(reply.result(), Some("OK"));
        assert_eq!(reply.get("VALUE"), Some("abc"));
        assert_eq!(reply.topic(), "HELLO REPLY NAMING REPLY");
    }

    #[test]
    fn test_line_break_inside_quotes_is_dropped() {
        let reply = Reply::parse("X REPLY RESULT=I2P_ERROR MESSAGE=\"bad\r\n thing\"\n");
        assert_eq!(reply.message(), Some("bad thing"));
    }

    #[test]
    fn test_quoted_message() {
        let reply = Reply::parse("HELLO REPLY RESULT=I2P_ERROR MESSAGE=\"Must start with HELLO VERSION\"\n");

        assert!(!reply.is_ok());
        assert_eq!(reply.result(), Some("I2P_ERROR"));
        assert_eq!(reply.message(), Some("Must start with HELLO VERSION"));
    }

    #[test]
    fn test_value_keeps_inner_equals() {
        let reply = Reply::parse("NAMING REPLY RESULT=OK NAME=x.i2p VALUE=AAAA==\n");
        assert_eq!(reply.get("VALUE"), Some("AAAA=="));
        assert_eq!(reply.get("NAME"), Some("x.i2p"));
    }

    #[test]
    fn test_first_value_wins() {
        let reply = Reply::parse("X RESULT=OK RESULT=FAILED");
        assert_eq!(reply.result(), Some("OK"));
    }

    #[test]
    fn test_result_must_match_exactly() {
        assert!(!Reply::parse("HELLO REPLY RESULT=OKAY").is_ok());
        assert!(!Reply::parse("HELLO REPLY NORESULT").is_ok());
        assert!(!Reply::parse("").is_ok());
    }

    #[test]
    fn test_bare_equals_is_a_word() {
        let reply = Reply::parse("TOPIC =value");
        assert!(reply.is_empty());
        assert_eq!(reply.topic(), "TOPIC =value");
    }
}
