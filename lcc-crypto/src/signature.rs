//! Base64 signature text.

use crate::codec;
use crate::error::CryptoResult;
use std::fmt;

/// Raw signature length for a 1024-bit modulus.
pub const SIGNATURE_LEN: usize = 128;

/// Base64 length of a [`SIGNATURE_LEN`]-byte signature (one `=` pad).
pub const SIGNATURE_B64_LEN: usize = codec::encoded_len(SIGNATURE_LEN);

/// An RSASSA-PKCS1-v1_5 signature carried as single-line base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Encodes raw signature bytes.
    #[must_use]
    pub fn from_raw(raw: &[u8]) -> Self {
        Self(codec::encode(raw))
    }

    /// Returns the base64 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the signature and returns the base64 text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the raw signature bytes.
    pub fn to_raw(&self) -> CryptoResult<Vec<u8>> {
        codec::decode(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
