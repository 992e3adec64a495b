//! Rendering of the public key into a source header for the licensed product.

use crate::error::{LicenseError, LicenseResult};
use std::fs;
use std::path::Path;

/// File name of the rendered header.
pub const PUBLIC_KEY_INC_FNAME: &str = "public_key.h";

/// File name of a custom template inside a templates folder.
pub const PUBLIC_KEY_TEMPLATE_FNAME: &str = "public_key.inja";

const BUILTIN_TEMPLATE: &str = r#"#ifndef PUBLIC_KEY_{{product_name}}_H_
#define PUBLIC_KEY_{{product_name}}_H_

#define PRODUCT_NAME "{{product_name}}"
#define PUBLIC_KEY_LEN {{public_key_len}}
#define PUBLIC_KEY { {{public_key}} }

#endif
"#;

/// A header template with `{{product_name}}`, `{{public_key}}` and
/// `{{public_key_len}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyTemplate {
    source: String,
}

impl PublicKeyTemplate {
    /// The template compiled into the generator.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            source: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Wraps template text.
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Loads `public_key.inja` from a templates folder.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Template`] if the folder or the file is missing.
    pub fn from_templates_dir(dir: impl AsRef<Path>) -> LicenseResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LicenseError::Template(format!(
                "templates directory [{}] does not exist or is not a directory",
                dir.display()
            )));
        }
        let file = dir.join(PUBLIC_KEY_TEMPLATE_FNAME);
        if !file.is_file() {
            return Err(LicenseError::Template(format!(
                "template file [{}] does not exist",
                file.display()
            )));
        }
        Ok(Self::from_source(fs::read_to_string(file)?))
    }

    /// Substitutes the product name and the DER public key bytes.
    ///
    /// The key is rendered as comma separated decimal byte values.
    #[must_use]
    pub fn render(&self, product_name: &str, public_key: &[u8]) -> String {
        let bytes = public_key
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let len = public_key.len().to_string();
        [
            ("product_name", product_name),
            ("public_key_len", len.as_str()),
            ("public_key", bytes.as_str()),
        ]
        .iter()
        .fold(self.source.clone(), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
                .replace(&format!("{{{{ {name} }}}}"), value)
        })
    }
}

impl Default for PublicKeyTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_renders_all_placeholders() {
        let text = PublicKeyTemplate::builtin().render("DEMO", &[48, 3, 2, 1, 0]);
        assert!(text.contains("#define PRODUCT_NAME \"DEMO\""));
        assert!(text.contains("#define PUBLIC_KEY_LEN 5"));
        assert!(text.contains("#define PUBLIC_KEY { 48, 3, 2, 1, 0 }"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn spaced_placeholders_are_replaced() {
        let template = PublicKeyTemplate::from_source("{{ product_name }}:{{public_key}}");
        assert_eq!(template.render("p", &[1, 255]), "p:1, 255");
    }
}
