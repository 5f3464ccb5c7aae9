// SPDX-License-Identifier: PMPL-1.0-or-later

//! Generation options.
//!
//! Options can be built in code, loaded from a YAML or JSON file, or
//! assembled by the CLI. They are validated before any input is touched.

use crate::error::{GenError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Directory holding the translation files.
    pub import_path: PathBuf,
    /// Generated source file.
    pub export_path: PathBuf,
    /// Encoding label of the input files.
    pub encoding: String,
    /// Encoding label of the generated file.
    pub export_encoding: String,
    /// Prefix of every generated trait and struct name.
    pub base_name: String,
    /// Convert keys to `snake_case` accessors and `PascalCase` type segments.
    pub convert: bool,
    /// Name of the generic back-reference trait.
    pub base_class_name: String,
    /// Name of the locale enumeration.
    pub enum_class_name: String,
    /// Paths emitted as `use` declarations in the header.
    pub imports: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            import_path: PathBuf::new(),
            export_path: PathBuf::new(),
            encoding: "utf-8".to_string(),
            export_encoding: "utf-8".to_string(),
            base_name: "I18N".to_string(),
            convert: true,
            base_class_name: "L10N".to_string(),
            enum_class_name: "I18NLocale".to_string(),
            imports: vec!["std::env".to_string()],
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl Options {
    pub fn new(import_path: impl Into<PathBuf>, export_path: impl Into<PathBuf>) -> Self {
        Self {
            import_path: import_path.into(),
            export_path: export_path.into(),
            ..Self::default()
        }
    }

    /// Loads options from a YAML (or JSON) file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| GenError::io(path, err))?;
        serde_yaml::from_str(&raw).map_err(|err| {
            GenError::Config(format!("invalid options file {}: {}", path.display(), err))
        })
    }

    /// Checks every option a generation run needs.
    pub fn validate(&self) -> Result<()> {
        self.validate_input()?;
        if self.export_path.as_os_str().is_empty() {
            return Err(GenError::Config("export_path is required".to_string()));
        }
        Ok(())
    }

    /// Like [`Options::validate`], without requiring an export path.
    pub fn validate_input(&self) -> Result<()> {
        if self.import_path.as_os_str().is_empty() {
            return Err(GenError::Config("import_path is required".to_string()));
        }
        for (option, value) in [
            ("base_name", &self.base_name),
            ("base_class_name", &self.base_class_name),
            ("enum_class_name", &self.enum_class_name),
        ] {
            if !is_identifier(value) {
                return Err(GenError::Config(format!(
                    "{option} must be an identifier, got \"{value}\""
                )));
            }
        }
        self.input_encoding()?;
        self.output_encoding()?;
        Ok(())
    }

    pub fn input_encoding(&self) -> Result<&'static Encoding> {
        lookup_encoding(&self.encoding)
    }

    pub fn output_encoding(&self) -> Result<&'static Encoding> {
        lookup_encoding(&self.export_encoding)
    }
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| GenError::Encoding(label.to_string()))
}
