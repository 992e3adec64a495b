//! Canonical form of a license section, i.e. the exact string that is signed.
//!
//! The form is the ASCII-uppercased feature name followed, for every attribute
//! in iteration order, by the trimmed key immediately followed by the trimmed
//! value. There are no separators and no escaping, so `("ab", "c")` and
//! `("a", "bc")` produce the same text. Verifiers rebuild the string the same
//! way, so the format cannot change without invalidating issued licenses.
//!
//! Callers must iterate attributes in sorted key order (a `BTreeMap`) to get
//! a stable result.

use crate::params::LICENSE_SIGNATURE;

/// Builds the canonical string of one section. A `sig` entry (any case) is
/// skipped.
#[must_use]
pub fn canonical_string<'a, I>(feature: &str, attributes: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut buf = feature.to_ascii_uppercase();
    for (key, value) in attributes {
        if key.eq_ignore_ascii_case(LICENSE_SIGNATURE) {
            continue;
        }
        buf.push_str(key.trim());
        buf.push_str(value.trim());
    }
    buf
}
