//! Binary-to-ASCII codec.
//!
//! Standard base64 (RFC 4648 alphabet, `=` padding). Signatures are encoded on a
//! single line; key bodies embedded in PEM armour are wrapped at a fixed width.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Encodes bytes as a single line of base64.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Encodes bytes as base64 split into lines of at most `width` characters.
///
/// Lines are separated by `\n` with no trailing newline. A `width` of zero
/// disables wrapping.
#[must_use]
pub fn encode_wrapped(bytes: &[u8], width: usize) -> String {
    let encoded = BASE64.encode(bytes);
    if width == 0 || encoded.len() <= width {
        return encoded;
    }

    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / width);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % width == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped
}

/// Decodes base64 text, ignoring ASCII whitespace (line breaks included).
///
/// # Errors
///
/// Returns [`CryptoError::Encoding`] if the stripped input length is not a
/// multiple of 4, or if it contains characters outside the alphabet or
/// misplaced padding.
pub fn decode(text: &str) -> CryptoResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.len() % 4 != 0 {
        return Err(CryptoError::Encoding(format!(
            "base64 input length {} is not a multiple of 4",
            compact.len()
        )));
    }
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))
}

/// Length of the padded base64 encoding of `len` bytes.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}
