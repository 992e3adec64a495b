//! Minimal DER encoding of PKCS#1 RSA key structures.
//!
//! Only the subset needed for `RSAPrivateKey` and `RSAPublicKey` is handled:
//! non-negative INTEGERs and a single SEQUENCE wrapping them.
//!
//! ```text
//! RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }
//!
//! RSAPrivateKey ::= SEQUENCE {
//!     version Version, modulus INTEGER, publicExponent INTEGER,
//!     privateExponent INTEGER, prime1 INTEGER, prime2 INTEGER,
//!     exponent1 INTEGER, exponent2 INTEGER, coefficient INTEGER }
//! ```
//!
//! Integer components are carried as unsigned big-endian magnitudes. Leading
//! zero bytes are not significant.

use crate::error::{CryptoError, CryptoResult};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Universal tag of an INTEGER.
pub const TAG_INTEGER: u8 = 0x02;

/// Universal tag of a constructed SEQUENCE.
pub const TAG_SEQUENCE: u8 = 0x30;

/// Encodes a length field: short form up to 127, long form above.
#[must_use]
pub fn encode_length(len: usize) -> Vec<u8> {
    if len <= 0x7f {
        return vec![len as u8];
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let significant = &bytes[skip..];

    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

/// Encodes an unsigned big-endian magnitude as a DER INTEGER.
///
/// Leading zero bytes are stripped, then a single zero byte is prepended when
/// the most significant bit is set so the value stays non-negative.
#[must_use]
pub fn encode_integer(magnitude: &[u8]) -> Vec<u8> {
    let skip = magnitude.iter().take_while(|b| **b == 0).count();
    let trimmed = &magnitude[skip..];

    if trimmed.is_empty() {
        return vec![TAG_INTEGER, 0x01, 0x00];
    }

    let needs_pad = trimmed[0] & 0x80 != 0;
    let content_len = trimmed.len() + usize::from(needs_pad);

    let mut out = Vec::with_capacity(content_len + 6);
    out.push(TAG_INTEGER);
    out.extend(encode_length(content_len));
    if needs_pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

/// Wraps already-encoded elements in a DER SEQUENCE.
#[must_use]
pub fn encode_sequence(elements: &[Vec<u8>]) -> Vec<u8> {
    let content_len: usize = elements.iter().map(Vec::len).sum();

    let mut out = Vec::with_capacity(content_len + 6);
    out.push(TAG_SEQUENCE);
    out.extend(encode_length(content_len));
    for element in elements {
        out.extend_from_slice(element);
    }
    out
}

/// Public components of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicComponents {
    pub modulus: Vec<u8>,
    pub public_exponent: Vec<u8>,
}

/// All components of a two-prime RSA private key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateComponents {
    pub modulus: Vec<u8>,
    pub public_exponent: Vec<u8>,
    pub private_exponent: Vec<u8>,
    pub prime1: Vec<u8>,
    pub prime2: Vec<u8>,
    /// `d mod (p - 1)`
    pub exponent1: Vec<u8>,
    /// `d mod (q - 1)`
    pub exponent2: Vec<u8>,
    /// `q^-1 mod p`
    pub coefficient: Vec<u8>,
}

impl std::fmt::Debug for RsaPrivateComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateComponents")
            .field("modulus_len", &self.modulus.len())
            .field("secrets", &"[REDACTED]")
            .finish()
    }
}

/// Encodes a PKCS#1 `RSAPublicKey`.
#[must_use]
pub fn encode_rsa_public_key(key: &RsaPublicComponents) -> Vec<u8> {
    encode_sequence(&[
        encode_integer(&key.modulus),
        encode_integer(&key.public_exponent),
    ])
}

/// Encodes a PKCS#1 `RSAPrivateKey` (version 0, two primes).
#[must_use]
pub fn encode_rsa_private_key(key: &RsaPrivateComponents) -> Zeroizing<Vec<u8>> {
    let elements = Zeroizing::new(vec![
        encode_integer(&[0]),
        encode_integer(&key.modulus),
        encode_integer(&key.public_exponent),
        encode_integer(&key.private_exponent),
        encode_integer(&key.prime1),
        encode_integer(&key.prime2),
        encode_integer(&key.exponent1),
        encode_integer(&key.exponent2),
        encode_integer(&key.coefficient),
    ]);
    Zeroizing::new(encode_sequence(&elements))
}

/// Decodes a PKCS#1 `RSAPublicKey`.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedKey`] on any structural mismatch, including
/// trailing bytes.
pub fn decode_rsa_public_key(der: &[u8]) -> CryptoResult<RsaPublicComponents> {
    let mut outer = DerReader::new(der);
    let mut seq = outer.read_sequence()?;
    outer.finish()?;

    let key = RsaPublicComponents {
        modulus: seq.read_integer()?,
        public_exponent: seq.read_integer()?,
    };
    seq.finish()?;
    Ok(key)
}

/// Decodes a PKCS#1 `RSAPrivateKey`. Only version 0 (two primes) is accepted.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedKey`] on any structural mismatch.
pub fn decode_rsa_private_key(der: &[u8]) -> CryptoResult<RsaPrivateComponents> {
    let mut outer = DerReader::new(der);
    let mut seq = outer.read_sequence()?;
    outer.finish()?;

    let version = seq.read_integer()?;
    if !version.is_empty() {
        return Err(CryptoError::MalformedKey(
            "unsupported RSAPrivateKey version (multi-prime keys are not supported)".to_string(),
        ));
    }

    let key = RsaPrivateComponents {
        modulus: seq.read_integer()?,
        public_exponent: seq.read_integer()?,
        private_exponent: seq.read_integer()?,
        prime1: seq.read_integer()?,
        prime2: seq.read_integer()?,
        exponent1: seq.read_integer()?,
        exponent2: seq.read_integer()?,
        coefficient: seq.read_integer()?,
    };
    seq.finish()?;
    Ok(key)
}

/// Cursor over a DER byte string.
#[derive(Debug, Clone)]
pub struct DerReader<'a> {
    input: &'a [u8],
}

impl<'a> DerReader<'a> {
    /// Creates a reader positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    /// Returns true when every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Fails if any bytes remain.
    pub fn finish(&self) -> CryptoResult<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(malformed(format!("{} trailing bytes", self.input.len())))
        }
    }

    /// Reads a length field in short or definite long form.
    pub fn read_length(&mut self) -> CryptoResult<usize> {
        let first = self.read_byte()?;
        if first & 0x80 == 0 {
            return Ok(usize::from(first));
        }

        let count = usize::from(first & 0x7f);
        if count == 0 {
            return Err(malformed("indefinite length is not allowed in DER"));
        }
        if count > std::mem::size_of::<usize>() {
            return Err(malformed(format!("length field of {count} bytes is too large")));
        }

        let mut len = 0usize;
        for _ in 0..count {
            len = (len << 8) | usize::from(self.read_byte()?);
        }
        Ok(len)
    }

    /// Reads a non-negative INTEGER and returns its magnitude without leading zeros.
    /// Zero is returned as an empty vector.
    pub fn read_integer(&mut self) -> CryptoResult<Vec<u8>> {
        let content = self.read_element(TAG_INTEGER)?;
        match content.first() {
            None => Err(malformed("empty INTEGER")),
            Some(b) if b & 0x80 != 0 => Err(malformed("negative INTEGER")),
            Some(_) => {
                let skip = content.iter().take_while(|b| **b == 0).count();
                Ok(content[skip..].to_vec())
            }
        }
    }

    /// Reads a SEQUENCE and returns a reader over its contents.
    pub fn read_sequence(&mut self) -> CryptoResult<DerReader<'a>> {
        self.read_element(TAG_SEQUENCE).map(DerReader::new)
    }

    fn read_element(&mut self, tag: u8) -> CryptoResult<&'a [u8]> {
        let actual = self.read_byte()?;
        if actual != tag {
            return Err(malformed(format!(
                "expected tag 0x{tag:02x}, found 0x{actual:02x}"
            )));
        }
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    fn read_byte(&mut self) -> CryptoResult<u8> {
        let (first, rest) = self
            .input
            .split_first()
            .ok_or_else(|| malformed("unexpected end of input"))?;
        self.input = rest;
        Ok(*first)
    }

    fn read_bytes(&mut self, len: usize) -> CryptoResult<&'a [u8]> {
        if len > self.input.len() {
            return Err(malformed(format!(
                "element of {len} bytes overruns the {} remaining",
                self.input.len()
            )));
        }
        let (head, rest) = self.input.split_at(len);
        self.input = rest;
        Ok(head)
    }
}

fn malformed(msg: impl Into<String>) -> CryptoError {
    CryptoError::MalformedKey(format!("invalid DER: {}", msg.into()))
}
