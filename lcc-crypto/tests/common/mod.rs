//! Shared fixtures for crypto tests.
//!
//! The fixture key was generated once with OpenSSL; the expected public key
//! bytes and signatures were produced by OpenSSL from the same file.

#![allow(dead_code)]

use std::path::PathBuf;

/// PKCS#1 PEM of the fixture key, exactly as OpenSSL wrote it.
pub const FIXTURE_PEM: &str = include_str!("../data/private_key.rsa");

/// DER `RSAPublicKey` of the fixture key.
pub const FIXTURE_PUBLIC_KEY: [u8; 140] = [
    48, 129, 137, 2, 129, 129, 0, 201, 96, 70, 230, 96, 64, 116, 6, 79, 123, 171, 143, 81, 249,
    81, 201, 14, 202, 167, 163, 239, 198, 154, 98, 198, 152, 141, 128, 0, 66, 172, 146, 122, 190,
    159, 182, 133, 165, 79, 26, 63, 180, 62, 55, 77, 44, 194, 219, 227, 180, 240, 193, 235, 231,
    233, 9, 0, 210, 21, 11, 78, 220, 93, 221, 214, 77, 65, 196, 96, 252, 85, 100, 35, 21, 163,
    253, 27, 213, 85, 52, 23, 173, 55, 178, 62, 254, 48, 208, 77, 140, 104, 25, 227, 133, 37,
    145, 48, 244, 98, 167, 157, 8, 156, 64, 242, 135, 36, 153, 195, 227, 160, 217, 153, 11, 101,
    8, 166, 73, 128, 143, 165, 17, 27, 6, 52, 51, 94, 207, 2, 3, 1, 0, 1,
];

/// Signature of `"testString"` under the fixture key.
pub const TEST_STRING_SIGNATURE: &str = "jNRRXRycz5+2lyRI/fR091jU/mSqrFUyMXv9+XIBhJWx6TnqZz5adDNXPi/zwR/e3UT6k+F8ygPaQasl9QAyfZ+Tn+jCYIaOyqJ7TMdKQ4r4M3QGKmdeKqNa6RnAN1TAinoUucyCqWh1KpTr3uEkrBP8Vny/zBWNmghrg7vsTSw=";

/// Signature of the empty string under the fixture key.
pub const EMPTY_STRING_SIGNATURE: &str = "O/J/4KBrjjwM0TDJn5uysQyJMG6tM80suV70xx4f8g+AI361fBXoxQ5JldOifVAyFGoZ2WBcMrvpvRDY36N/ISYjtYMXTNhpZeQ2o/66CNI5yYruqMpArCtgkDxiVjzww/XPugtRtRmqzWQAmePbYKF+0aDXhwvLz61uB6AYUPg=";

/// A valid 512-bit PKCS#1 key, generated with OpenSSL.
pub const SMALL_KEY_PEM: &str = include_str!("../data/private_key_512.rsa");

/// Path of the fixture key file.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("private_key.rsa")
}
