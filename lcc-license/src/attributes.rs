//! The signed content of one license section.

use crate::canonical;
use crate::error::{LicenseError, LicenseResult};
use crate::params::{is_meta_param, LICENSE_SIGNATURE};
use lcc_crypto::{KeyProvider, Signature};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Attribute name compared ASCII case-insensitively, the way license readers
/// order and match keys. The original spelling is kept for output.
#[derive(Debug, Clone)]
struct AttributeKey(String);

impl AttributeKey {
    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for AttributeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for AttributeKey {}

impl PartialOrd for AttributeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttributeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

/// A feature name plus its attributes, kept in sorted key order.
///
/// Meta-parameters (see [`crate::params::META_PARAMS`]) and the `sig` key are
/// rejected, so everything stored here is part of the signed content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseAttributeSet {
    feature: String,
    attributes: BTreeMap<AttributeKey, String>,
}

impl LicenseAttributeSet {
    /// Creates an empty set for `feature`. The name is stored uppercased.
    #[must_use]
    pub fn new(feature: &str) -> Self {
        Self {
            feature: feature.trim().to_ascii_uppercase(),
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the uppercased feature name.
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Adds or replaces an attribute, returning the previous value.
    ///
    /// Keys are ordered and matched ignoring ASCII case (`X` sorts after
    /// `lic_ver`, and `Valid-To` replaces `valid-to`). A replaced entry keeps
    /// the spelling it was first inserted with.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::ReservedAttribute`] for meta-parameters and `sig`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> LicenseResult<Option<String>> {
        let key = key.into();
        if key.eq_ignore_ascii_case(LICENSE_SIGNATURE) || is_meta_param(&key) {
            return Err(LicenseError::ReservedAttribute(key));
        }
        Ok(self.attributes.insert(AttributeKey(key), value.into()))
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(&AttributeKey(key.to_string()))
            .map(String::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates attributes in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.0.as_str(), v.as_str()))
    }

    /// The exact string that gets signed for this section.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        canonical::canonical_string(&self.feature, self.iter())
    }

    /// Signs the canonical string with the provider's loaded key.
    pub fn sign<P: KeyProvider>(&self, provider: &P) -> LicenseResult<Signature> {
        let canonical = self.canonical_string();
        debug!(
            feature = %self.feature,
            attributes = self.attributes.len(),
            canonical_len = canonical.len(),
            "Signing license section"
        );
        Ok(provider.sign_string(&canonical)?)
    }
}
