//! License issuance: collects parameters, signs one section per feature and
//! writes the INI license file.

use crate::attributes::LicenseAttributeSet;
use crate::date::normalize_date;
use crate::error::{LicenseError, LicenseResult};
use crate::params::{
    is_meta_param, LICENSE_FILE_VERSION, LICENSE_SIGNATURE, LICENSE_VERSION, PARAM_BASE64,
    PARAM_BEGIN_DATE, PARAM_EXPIRY_DATE, PARAM_FEATURE_NAMES, PARAM_PRIMARY_KEY,
};
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use lcc_crypto::{codec, new_provider, KeyProvider, Signature, PRIVATE_KEY_FNAME};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Characters that cannot appear in a feature name (they break INI sections
/// or paths).
const FORBIDDEN_FEATURE_CHARS: [char; 4] = ['[', ']', '/', '\\'];

/// A feature section that was signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedFeature {
    /// Uppercased section name.
    pub name: String,
    /// Signature stored in the section's `sig` key.
    pub signature: Signature,
}

/// A license being prepared for one project.
///
/// Parameters are added one at a time with [`License::add_parameter`]; nothing
/// is signed until [`License::write_license`] or [`License::issue_to`].
#[derive(Debug, Clone)]
pub struct License {
    output: Option<PathBuf>,
    project_folder: PathBuf,
    primary_key: PathBuf,
    feature_names: String,
    base64: bool,
    values: BTreeMap<String, String>,
}

impl License {
    /// Prepares a license for the project in `project_folder`.
    ///
    /// `output` of `None` writes the license to stdout. The feature name
    /// defaults to the project folder name and the primary key to
    /// `<project>/private_key.rsa`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidProjectFolder`] if the folder does not
    /// exist or is not a directory.
    pub fn new(output: Option<PathBuf>, project_folder: impl AsRef<Path>) -> LicenseResult<Self> {
        let project_folder = normalize_project_path(project_folder.as_ref())?;
        let feature_names = project_folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let primary_key = project_folder.join(PRIVATE_KEY_FNAME);
        Ok(Self {
            output,
            project_folder,
            primary_key,
            feature_names,
            base64: false,
            values: BTreeMap::new(),
        })
    }

    /// Adds one parameter.
    ///
    /// Meta-parameters change how the license is produced and are never
    /// signed. Everything else becomes an attribute of every feature section:
    /// date parameters are normalized to `YYYY-MM-DD` and version parameters
    /// equal to `"0"` (any version) are dropped.
    pub fn add_parameter(&mut self, name: &str, value: &str) -> LicenseResult<()> {
        if value.contains(['\n', '\r']) {
            return Err(LicenseError::InvalidParameter(format!(
                "{name} must fit on one line"
            )));
        }
        if !is_meta_param(name) {
            if name.contains("date") || name.contains(PARAM_EXPIRY_DATE) || name.contains(PARAM_BEGIN_DATE) {
                self.values.insert(name.to_string(), normalize_date(value)?);
            } else if name.contains("version") {
                if value != "0" {
                    self.values.insert(name.to_string(), value.to_string());
                }
            } else {
                self.values.insert(name.to_string(), value.to_string());
            }
            return Ok(());
        }
        match name {
            PARAM_FEATURE_NAMES => {
                if value.contains(FORBIDDEN_FEATURE_CHARS) {
                    return Err(LicenseError::InvalidFeatureName(value.to_string()));
                }
                self.feature_names = value.to_string();
            }
            PARAM_PRIMARY_KEY => {
                let path = PathBuf::from(value);
                if !path.exists() {
                    return Err(LicenseError::PrimaryKeyNotFound(path));
                }
                self.primary_key = path;
            }
            PARAM_BASE64 => self.base64 = matches!(value.trim(), "true" | "1"),
            // output-file-name, project-folder, magic-num
            _ => debug!(param = name, "Ignoring meta-parameter"),
        }
        Ok(())
    }

    /// Canonicalized project folder.
    #[must_use]
    pub fn project_folder(&self) -> &Path {
        &self.project_folder
    }

    /// Private key used for signing.
    #[must_use]
    pub fn primary_key(&self) -> &Path {
        &self.primary_key
    }

    /// Uppercased, trimmed feature names in the order given.
    #[must_use]
    pub fn features(&self) -> Vec<String> {
        self.feature_names
            .to_ascii_uppercase()
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether the license text is base64 encoded on output.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        self.base64
    }

    /// Signed attributes collected so far (without `lic_ver`).
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Signs every feature and writes the license file, or stdout when no
    /// output path was given.
    ///
    /// An existing license file is extended: its sections are kept and the
    /// sections being issued are merged over and re-signed. The file is only
    /// replaced once all sections are signed.
    pub fn write_license(&self) -> LicenseResult<Vec<IssuedFeature>> {
        let Some(path) = &self.output else {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let issued = self.issue_to(None, &mut out)?;
            out.flush()?;
            return Ok(issued);
        };

        let existing = if path.is_file() {
            debug!(path = %path.display(), "Extending existing license");
            Some(fs::read_to_string(path)?)
        } else {
            create_license_path(path)?;
            None
        };

        let mut buf = Vec::new();
        let issued = self.issue_to(existing.as_deref(), &mut buf)?;
        fs::write(path, buf)?;
        info!(
            path = %path.display(),
            features = issued.len(),
            base64 = self.base64,
            "License written"
        );
        Ok(issued)
    }

    /// Signs every feature section and writes the resulting license text.
    ///
    /// `existing` is the content of a previous license file to extend.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidLicenseFile`] if `existing` cannot be
    /// parsed, [`LicenseError::InvalidFeatureName`] if no feature name is set,
    /// or the key loading and signing errors of the crypto backend.
    pub fn issue_to<W: Write>(&self, existing: Option<&str>, writer: &mut W) -> LicenseResult<Vec<IssuedFeature>> {
        let features = self.features();
        if features.is_empty() {
            return Err(LicenseError::InvalidFeatureName(self.feature_names.clone()));
        }
        let previous = match existing {
            Some(text) => self.parse_existing(text)?,
            None => Ini::new(),
        };

        let mut provider = new_provider();
        provider.load_private_key_file(&self.primary_key)?;

        let mut signed = BTreeMap::new();
        let mut issued = Vec::with_capacity(features.len());
        for feature in &features {
            let mut set = LicenseAttributeSet::new(feature);
            if let Some(section) = previous.section(Some(feature.as_str())) {
                for (key, value) in section.iter() {
                    if !key.eq_ignore_ascii_case(LICENSE_SIGNATURE) && !is_meta_param(key) {
                        set.insert(key, value)?;
                    }
                }
            }
            set.insert(LICENSE_VERSION, LICENSE_FILE_VERSION.to_string())?;
            for (key, value) in &self.values {
                set.insert(key.as_str(), value.as_str())?;
            }
            let signature = set.sign(&provider)?;
            issued.push(IssuedFeature {
                name: feature.clone(),
                signature: signature.clone(),
            });
            signed.insert(feature.clone(), (set, signature));
        }

        let ini = merge_sections(&previous, &signed);
        let mut text = Vec::new();
        ini.write_to_opt(
            &mut text,
            WriteOption {
                escape_policy: EscapePolicy::Nothing,
                ..Default::default()
            },
        )?;
        if self.base64 {
            writer.write_all(codec::encode(&text).as_bytes())?;
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(&text)?;
        }
        Ok(issued)
    }

    fn parse_existing(&self, text: &str) -> LicenseResult<Ini> {
        let decoded;
        let text = if self.base64 {
            let bytes = codec::decode(text)
                .map_err(|e| LicenseError::InvalidLicenseFile(format!("not base64: {e}")))?;
            decoded = String::from_utf8(bytes)
                .map_err(|e| LicenseError::InvalidLicenseFile(e.to_string()))?;
            decoded.as_str()
        } else {
            text
        };
        Ini::load_from_str_opt(text, raw_values())
            .map_err(|e| LicenseError::InvalidLicenseFile(e.to_string()))
    }
}

/// Values are stored verbatim: readers compare the signed text byte for byte,
/// so neither escapes nor quotes are interpreted.
fn raw_values() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// Rebuilds the license document. Sections keep their first-seen order; the
/// issued ones are rewritten with sorted keys and their new signature.
fn merge_sections(previous: &Ini, signed: &BTreeMap<String, (LicenseAttributeSet, Signature)>) -> Ini {
    let mut ini = Ini::new();
    for (section, props) in previous.iter() {
        match section {
            Some(name) if signed.contains_key(name) => write_signed(&mut ini, name, &signed[name]),
            _ => {
                for (key, value) in props.iter() {
                    ini.with_section(section).set(key, value);
                }
            }
        }
    }
    for (name, entry) in signed {
        if previous.section(Some(name.as_str())).is_none() {
            write_signed(&mut ini, name, entry);
        }
    }
    ini
}

fn write_signed(ini: &mut Ini, name: &str, (set, signature): &(LicenseAttributeSet, Signature)) {
    for (key, value) in set.iter() {
        ini.with_section(Some(name)).set(key, value);
    }
    ini.with_section(Some(name)).set(LICENSE_SIGNATURE, signature.as_str());
}

fn normalize_project_path(path: &Path) -> LicenseResult<PathBuf> {
    if !path.is_dir() {
        return Err(LicenseError::InvalidProjectFolder(path.to_path_buf()));
    }
    Ok(path.canonicalize()?)
}

fn create_license_path(path: &Path) -> LicenseResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.is_file() {
        return Err(LicenseError::InvalidLicenseFile(format!(
            "cannot create folder [{}]: a file with the same name exists",
            parent.display()
        )));
    }
    if !parent.exists() {
        fs::create_dir_all(parent)?;
        debug!(path = %parent.display(), "Created license folder");
    }
    Ok(())
}
