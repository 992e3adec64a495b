//! License issuing for the license generator.
//!
//! This crate handles:
//! - Collecting license parameters and normalizing dates
//! - Building the canonical string of each feature section and signing it
//! - Writing (or extending) the INI license file, optionally base64 encoded
//! - Initializing a project folder with a fresh key pair and public key header
//!
//! # License File
//!
//! ```text
//! [MY_FEATURE]
//! lic_ver=200
//! valid-to=2030-12-31
//! sig=<172 base64 characters>
//! ```
//!
//! The signed content of a section is the uppercased feature name followed by
//! every `key` + `value` pair except `sig`, in sorted key order.

pub mod attributes;
pub mod canonical;
pub mod date;
mod error;
pub mod license;
pub mod params;
pub mod project;
pub mod public_key;

pub use attributes::LicenseAttributeSet;
pub use canonical::canonical_string;
pub use date::normalize_date;
pub use error::{LicenseError, LicenseResult};
pub use license::{IssuedFeature, License};
pub use project::{list_projects, InitOutcome, Project};
pub use public_key::{PublicKeyTemplate, PUBLIC_KEY_INC_FNAME, PUBLIC_KEY_TEMPLATE_FNAME};
