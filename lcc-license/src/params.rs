//! Names of license parameters and reserved license file keys.

/// Encode the whole license file as base64.
pub const PARAM_BASE64: &str = "base64";
/// Where to write the license.
pub const PARAM_LICENSE_OUTPUT: &str = "output-file-name";
/// Comma separated feature names (one license section each).
pub const PARAM_FEATURE_NAMES: &str = "feature-names";
/// Folder of the project whose key signs the license.
pub const PARAM_PROJECT_FOLDER: &str = "project-folder";
/// Private key location, when not in the project folder.
pub const PARAM_PRIMARY_KEY: &str = "primary-key";
/// Reserved for the client library build; accepted and ignored.
pub const PARAM_MAGIC_NUMBER: &str = "magic-num";

pub const PARAM_BEGIN_DATE: &str = "valid-from";
pub const PARAM_EXPIRY_DATE: &str = "valid-to";
pub const PARAM_CLIENT_SIGNATURE: &str = "client-signature";
pub const PARAM_VERSION_FROM: &str = "start-version";
pub const PARAM_VERSION_TO: &str = "end-version";
pub const PARAM_EXTRA_DATA: &str = "extra-data";

/// Key holding the signature inside a license section.
pub const LICENSE_SIGNATURE: &str = "sig";
/// Key holding the license file format version.
pub const LICENSE_VERSION: &str = "lic_ver";
/// Current license file format version.
pub const LICENSE_FILE_VERSION: u32 = 200;

/// Parameters that control how a license is produced but are never signed.
pub const META_PARAMS: [&str; 6] = [
    PARAM_BASE64,
    PARAM_LICENSE_OUTPUT,
    PARAM_FEATURE_NAMES,
    PARAM_PROJECT_FOLDER,
    PARAM_PRIMARY_KEY,
    PARAM_MAGIC_NUMBER,
];

/// Returns true for parameters that must never enter the signed content.
#[must_use]
pub fn is_meta_param(name: &str) -> bool {
    META_PARAMS.contains(&name)
}
