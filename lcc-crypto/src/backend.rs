//! Pure-Rust backend built on the RustCrypto `rsa` crate.
//!
//! Key material is moved in and out of the library as numeric components and
//! serialized with this crate's own PKCS#1 encoder, so the bytes on disk do
//! not depend on the library's encoding.

use crate::der::{self, RsaPrivateComponents, RsaPublicComponents};
use crate::error::{CryptoError, CryptoResult};
use crate::pem::{self, RSA_PRIVATE_KEY_LABEL};
use crate::provider::{init, KeyProvider, KEY_BITS, PUBLIC_EXPONENT};
use crate::signature::Signature;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

pub(crate) const BACKEND_NAME: &str = "rustcrypto-rsa";

/// Holds at most one RSA key pair. The key is zeroized when dropped or replaced.
pub struct RsaKeyProvider {
    key: Option<RsaPrivateKey>,
}

impl RsaKeyProvider {
    /// Creates a provider with no key loaded.
    #[must_use]
    pub fn new() -> Self {
        init();
        Self { key: None }
    }

    fn key(&self) -> CryptoResult<&RsaPrivateKey> {
        self.key.as_ref().ok_or(CryptoError::NotInitialized)
    }

    /// Builds a key from decoded components and checks that it is a consistent
    /// RSA-1024 key.
    fn import(components: &RsaPrivateComponents) -> CryptoResult<RsaPrivateKey> {
        let key = RsaPrivateKey::from_components(
            BigUint::from_bytes_be(&components.modulus),
            BigUint::from_bytes_be(&components.public_exponent),
            BigUint::from_bytes_be(&components.private_exponent),
            vec![
                BigUint::from_bytes_be(&components.prime1),
                BigUint::from_bytes_be(&components.prime2),
            ],
        )
        .map_err(|e| CryptoError::ImportFailure(e.to_string()))?;

        let bits = key.n().bits();
        if bits != KEY_BITS {
            return Err(CryptoError::ImportFailure(format!(
                "expected a {KEY_BITS}-bit modulus, found {bits} bits"
            )));
        }

        key.validate()
            .map_err(|e| CryptoError::ImportFailure(e.to_string()))?;

        let (exponent1, exponent2, coefficient) =
            crt_values(&key).map_err(|e| CryptoError::ImportFailure(e.to_string()))?;
        if *exponent1 != BigUint::from_bytes_be(&components.exponent1)
            || *exponent2 != BigUint::from_bytes_be(&components.exponent2)
            || *coefficient != BigUint::from_bytes_be(&components.coefficient)
        {
            return Err(CryptoError::ImportFailure(
                "CRT parameters do not match the key primes".to_string(),
            ));
        }

        Ok(key)
    }
}

impl Default for RsaKeyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RsaKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyProvider")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl KeyProvider for RsaKeyProvider {
    fn generate_key_pair(&mut self) -> CryptoResult<()> {
        self.key = None;

        let exponent = BigUint::from(PUBLIC_EXPONENT);
        let key = RsaPrivateKey::new_with_exp(&mut rand::thread_rng(), KEY_BITS, &exponent)
            .map_err(|e| CryptoError::GenerationFailure(e.to_string()))?;

        debug!(bits = KEY_BITS, "Generated RSA key pair");
        self.key = Some(key);
        Ok(())
    }

    fn export_private_key(&self) -> CryptoResult<String> {
        let key = self.key()?;
        let components = private_components(key)?;
        let der = der::encode_rsa_private_key(&components);
        Ok(pem::encode(RSA_PRIVATE_KEY_LABEL, &der))
    }

    fn export_public_key(&self) -> CryptoResult<Vec<u8>> {
        let key = self.key()?;
        Ok(der::encode_rsa_public_key(&RsaPublicComponents {
            modulus: key.n().to_bytes_be(),
            public_exponent: key.e().to_bytes_be(),
        }))
    }

    fn load_private_key(&mut self, pem_text: &str) -> CryptoResult<()> {
        self.key = None;

        let der = Zeroizing::new(pem::decode(RSA_PRIVATE_KEY_LABEL, pem_text)?);
        let components = der::decode_rsa_private_key(&der)?;
        let key = Self::import(&components)?;

        debug!(bits = key.size() * 8, "Imported RSA private key");
        self.key = Some(key);
        Ok(())
    }

    fn sign_string(&self, message: &str) -> CryptoResult<Signature> {
        let key = self.key()?;
        let digest = Sha256::digest(message.as_bytes());
        let raw = key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;

        debug!(message_len = message.len(), signature_len = raw.len(), "Signed message");
        Ok(Signature::from_raw(&raw))
    }

    fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

/// `(d mod (p-1), d mod (q-1), q^-1 mod p)` for a two-prime key.
fn crt_values(
    key: &RsaPrivateKey,
) -> CryptoResult<(Zeroizing<BigUint>, Zeroizing<BigUint>, Zeroizing<BigUint>)> {
    let primes = key.primes();
    if primes.len() != 2 {
        return Err(CryptoError::Encoding(format!(
            "only two-prime keys are supported, found {} primes",
            primes.len()
        )));
    }

    let one = BigUint::from(1u8);
    let exponent1 = Zeroizing::new(key.d() % &(&primes[0] - &one));
    let exponent2 = Zeroizing::new(key.d() % &(&primes[1] - &one));
    let coefficient = key
        .crt_coefficient()
        .map(Zeroizing::new)
        .ok_or_else(|| CryptoError::Encoding("CRT coefficient is undefined".to_string()))?;
    Ok((exponent1, exponent2, coefficient))
}

fn private_components(key: &RsaPrivateKey) -> CryptoResult<RsaPrivateComponents> {
    let primes = key.primes();
    let (exponent1, exponent2, coefficient) = crt_values(key)?;
    Ok(RsaPrivateComponents {
        modulus: key.n().to_bytes_be(),
        public_exponent: key.e().to_bytes_be(),
        private_exponent: key.d().to_bytes_be(),
        prime1: primes[0].to_bytes_be(),
        prime2: primes[1].to_bytes_be(),
        exponent1: exponent1.to_bytes_be(),
        exponent2: exponent2.to_bytes_be(),
        coefficient: coefficient.to_bytes_be(),
    })
}
