//! Project initialization: a folder holding the issuer's private key and the
//! public key header to compile into the licensed product.
//!
//! Layout created under the projects folder:
//!
//! ```text
//! <projects>/<name>/private_key.rsa
//! <projects>/<name>/include/licensecc/<name>/public_key.h
//! ```

use crate::error::{LicenseError, LicenseResult};
use crate::public_key::{PublicKeyTemplate, PUBLIC_KEY_INC_FNAME};
use lcc_crypto::{new_provider, KeyProvider, PRIVATE_KEY_FNAME};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Result of [`Project::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Key files were written.
    Created {
        private_key: PathBuf,
        public_key: PathBuf,
    },
    /// Both key files already existed and overwriting was not requested.
    AlreadyInitialized,
}

/// A project to initialize.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    projects_folder: PathBuf,
    templates_folder: Option<PathBuf>,
    primary_key: Option<PathBuf>,
    force_overwrite: bool,
}

impl Project {
    /// Describes project `name` inside `projects_folder`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidProjectName`] if the name is empty, is
    /// `.`/`..`, or contains a path separator.
    pub fn new(
        name: &str,
        projects_folder: impl Into<PathBuf>,
        templates_folder: Option<PathBuf>,
        force_overwrite: bool,
    ) -> LicenseResult<Self> {
        let name = name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(LicenseError::InvalidProjectName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            projects_folder: projects_folder.into(),
            templates_folder,
            primary_key: None,
            force_overwrite,
        })
    }

    /// Uses an existing private key instead of generating one.
    #[must_use]
    pub fn with_primary_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.primary_key = Some(path.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<projects>/<name>`
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.projects_folder.join(&self.name)
    }

    #[must_use]
    pub fn private_key_path(&self) -> PathBuf {
        self.project_dir().join(PRIVATE_KEY_FNAME)
    }

    /// `<projects>/<name>/include/licensecc/<name>`
    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.project_dir()
            .join("include")
            .join("licensecc")
            .join(&self.name)
    }

    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        self.include_dir().join(PUBLIC_KEY_INC_FNAME)
    }

    /// Creates the project folders and key files.
    ///
    /// When both key files exist they are left untouched unless the project
    /// was created with `force_overwrite`.
    pub fn initialize(&self) -> LicenseResult<InitOutcome> {
        // Resolve the template first so a bad templates folder changes nothing.
        let template = match &self.templates_folder {
            Some(dir) => PublicKeyTemplate::from_templates_dir(dir)?,
            None => PublicKeyTemplate::builtin(),
        };

        let private_key = self.private_key_path();
        let public_key = self.public_key_path();
        if private_key.exists() && public_key.exists() {
            if !self.force_overwrite {
                info!(project = %self.name, "Project already initialized, keys left untouched");
                return Ok(InitOutcome::AlreadyInitialized);
            }
            warn!(project = %self.name, "Overwriting existing project keys");
        }
        fs::create_dir_all(self.include_dir())?;

        let mut provider = new_provider();
        match &self.primary_key {
            Some(path) => {
                if !path.is_file() {
                    return Err(LicenseError::PrimaryKeyNotFound(path.clone()));
                }
                provider.load_private_key_file(path)?;
            }
            None => provider.generate_key_pair()?,
        }

        let pem = Zeroizing::new(provider.export_private_key()?);
        write_private_key(&private_key, pem.as_bytes())?;
        debug!(path = %private_key.display(), "Private key written");

        let der = provider.export_public_key()?;
        fs::write(&public_key, template.render(&self.name, &der))?;
        info!(
            project = %self.name,
            private_key = %private_key.display(),
            public_key = %public_key.display(),
            "Project initialized"
        );
        Ok(InitOutcome::Created {
            private_key,
            public_key,
        })
    }
}

/// Names of the initialized projects (folders holding a private key) in
/// `projects_folder`, sorted. A missing folder has no projects.
pub fn list_projects(projects_folder: impl AsRef<Path>) -> LicenseResult<Vec<String>> {
    let folder = projects_folder.as_ref();
    if !folder.exists() {
        return Ok(Vec::new());
    }
    if !folder.is_dir() {
        return Err(LicenseError::InvalidProjectFolder(folder.to_path_buf()));
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if entry.path().join(PRIVATE_KEY_FNAME).is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(unix)]
fn create_private_file(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

fn write_private_key(path: &Path, pem: &[u8]) -> LicenseResult<()> {
    let mut file = create_private_file(path)?;
    file.write_all(pem)?;
    file.sync_all()?;
    Ok(())
}
