//! Alphabets used by destinations and their hashed short form
//!
//! Both are fixed by existing deployments and must match bit-for-bit:
//! base64 is the standard alphabet with `+`/`/` replaced by `-`/`~`,
//! base32 is the RFC 4648 alphabet in lowercase. Both are padded with `=`.

use data_encoding::{Encoding, Specification};
use std::sync::OnceLock;

pub const BASE64_SYMBOLS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-~";

pub const BASE32_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz234567";

/// Destination base64 encoding
pub fn base64() -> &'static Encoding {
    static ENCODING: OnceLock<Encoding> = OnceLock::new();
    ENCODING.get_or_init(|| padded(BASE64_SYMBOLS))
}

/// Short-form base32 encoding
pub fn base32() -> &'static Encoding {
    static ENCODING: OnceLock<Encoding> = OnceLock::new();
    ENCODING.get_or_init(|| padded(BASE32_SYMBOLS))
}

/// Decoding is strict: padding must be present and unused trailing bits
/// must be zero, so every accepted text has exactly one byte sequence.
fn padded(symbols: &str) -> Encoding {
    let mut spec = Specification::new();
    spec.symbols.push_str(symbols);
    spec.padding = Some('=');
    spec.encoding()
        .expect("alphabet constants form a valid specification")
}
