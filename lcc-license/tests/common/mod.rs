//! Shared fixtures for license tests.

#![allow(dead_code)]

use lcc_crypto::{new_provider, KeyProvider, PRIVATE_KEY_FNAME};
use std::fs;
use std::path::{Path, PathBuf};

/// PKCS#1 PEM of the fixture key (same key as the crypto tests).
pub const FIXTURE_PEM: &str = include_str!("../data/private_key.rsa");

/// Signature of `TEST_PROJECTlic_ver200valid-to1929-01-11` under the fixture key.
pub const TEST_PROJECT_SIGNATURE: &str = "lJFSYK2thEeVKc8PI6nT4/aVUY55fVDnOTRs5suMkdwlaXM2w8eGHi0fcdTmHNESnGb97QbkCxbzmgdBC6+2fsRpw/RjGbPHp0FPlOuOdfPtEohrfsQNcY8Y2/j1YXgjinS0W2Sbfs0yf7B9fW/XdlV/I9Ff+fPRXTkR2bkkdVQ=";

/// Creates `<root>/<name>` holding the fixture private key.
pub fn project_with_key(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(PRIVATE_KEY_FNAME), FIXTURE_PEM).unwrap();
    dir
}

/// Signs `message` with the fixture key.
pub fn fixture_sign(message: &str) -> String {
    let mut provider = new_provider();
    provider.load_private_key(FIXTURE_PEM).unwrap();
    provider.sign_string(message).unwrap().into_string()
}

/// Parses license text with values taken verbatim.
fn parse(text: &str) -> ini::Ini {
    let opt = ini::ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    };
    ini::Ini::load_from_str_opt(text, opt).unwrap()
}

/// Parses license text into `(section, key, value)` triples in file order.
pub fn entries(text: &str) -> Vec<(String, String, String)> {
    let ini = parse(text);
    let mut out = Vec::new();
    for (section, props) in ini.iter() {
        let Some(section) = section else { continue };
        for (key, value) in props.iter() {
            out.push((section.to_string(), key.to_string(), value.to_string()));
        }
    }
    out
}

/// Value of `key` in `section`.
pub fn value(text: &str, section: &str, key: &str) -> Option<String> {
    let ini = parse(text);
    ini.get_from(Some(section), key).map(str::to_string)
}
