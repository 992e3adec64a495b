//! PEM armour for DER documents.

use crate::codec;
use crate::error::{CryptoError, CryptoResult};

/// Label of a PKCS#1 private key document.
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Label of a PKCS#1 public key document.
pub const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

/// Width of base64 body lines, as written by OpenSSL.
pub const PEM_LINE_WIDTH: usize = 64;

/// Wraps `der` in `-----BEGIN <label>-----` / `-----END <label>-----` lines.
/// The result ends with a newline.
#[must_use]
pub fn encode(label: &str, der: &[u8]) -> String {
    format!(
        "-----BEGIN {label}-----\n{}\n-----END {label}-----\n",
        codec::encode_wrapped(der, PEM_LINE_WIDTH)
    )
}

/// Extracts the DER payload of a PEM document with the given label.
///
/// Surrounding whitespace and CRLF line endings are tolerated. Encrypted PEM
/// (with `Proc-Type`/`DEK-Info` headers) is not supported.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedKey`] if the header or footer is missing or
/// the body is not valid base64.
pub fn decode(label: &str, text: &str) -> CryptoResult<Vec<u8>> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");

    let body = text
        .trim()
        .strip_prefix(begin.as_str())
        .ok_or_else(|| CryptoError::MalformedKey(format!("missing `{begin}` header")))?
        .strip_suffix(end.as_str())
        .ok_or_else(|| CryptoError::MalformedKey(format!("missing `{end}` footer")))?;

    if body.contains(':') {
        return Err(CryptoError::MalformedKey(
            "encrypted or annotated PEM is not supported".to_string(),
        ));
    }

    codec::decode(body).map_err(|e| CryptoError::MalformedKey(format!("bad PEM body: {e}")))
}
