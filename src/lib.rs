// SPDX-License-Identifier: PMPL-1.0-or-later

//! l10n-gen: typed Rust accessors generated from nested translation files.
//!
//! A run walks an import directory of JSON/YAML translation files and
//! produces one Rust source file:
//!
//! 1. **Classify**: each file is assigned a locale from its name, or the
//!    abstract (schema) locale.
//! 2. **Merge**: per locale, files are nested by directory and feature name
//!    into one tree.
//! 3. **Validate**: every locale must carry the keys of the schema (or of
//!    every other locale when no schema is supplied).
//! 4. **Resolve**: leaf types are inferred across locales and keys are
//!    turned into identifiers.
//! 5. **Emit**: a trait per nesting level, a struct per locale and level,
//!    and a locale enum dispatching to them.
//!
//! The run is all-or-nothing: any error aborts it before the output file is
//! touched.

pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod key;
pub mod merge;
pub mod resolve;
pub mod source;
pub mod types;
pub mod validate;

pub use config::Options;
pub use error::{GenError, Result};
pub use types::Catalog;

use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub export_path: PathBuf,
    pub locales: Vec<String>,
    pub files: usize,
    pub bytes: usize,
}

/// Loads, merges and validates the translation files named by `options`.
///
/// Only the input side of `options` is checked; nothing is written.
pub fn load_catalog(options: &Options) -> Result<(Catalog, usize)> {
    options.validate_input()?;
    let sources = source::load_sources(
        &options.import_path,
        options.input_encoding()?,
        &source::default_decoders(),
    )?;
    let files = sources.len();
    let catalog = merge::build_catalog(&sources)?;
    validate::validate(&catalog)?;
    Ok((catalog, files))
}

/// Generates the source text without writing anything.
pub fn generate(options: &Options) -> Result<String> {
    options.validate()?;
    let (catalog, _) = load_catalog(options)?;
    emit::emit(&catalog, options)
}

/// Generates the source text and writes it to `options.export_path`.
pub fn run(options: &Options) -> Result<GenerationSummary> {
    options.validate()?;
    let (catalog, files) = load_catalog(options)?;
    let text = emit::emit(&catalog, options)?;

    let encoding = options.output_encoding()?;
    let (bytes, _, had_errors) = encoding.encode(&text);
    if had_errors {
        return Err(GenError::Encoding(format!(
            "{} cannot represent the generated text",
            encoding.name()
        )));
    }

    let path = &options.export_path;
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| GenError::io(parent, err))?;
    }
    fs::write(path, &bytes).map_err(|err| GenError::io(path, err))?;

    tracing::info!(
        path = %path.display(),
        locales = catalog.len(),
        files,
        "translations generated"
    );
    Ok(GenerationSummary {
        export_path: path.clone(),
        locales: catalog.locale_keys(),
        files,
        bytes: bytes.len(),
    })
}
