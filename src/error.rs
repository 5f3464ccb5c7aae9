// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error type shared by every generation stage.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a generation run.
///
/// No stage recovers from these: the first error aborts the run and no
/// output file is written.
#[derive(Debug, Error)]
pub enum GenError {
    /// A required option is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Neither the abstract locale nor any concrete locale produced content.
    #[error("no translations found: {0}")]
    EmptyCatalog(String),

    /// A key present in one locale is absent from another.
    #[error("key \"{path}\" of locale \"{present_in}\" is missing from locale \"{missing_from}\"")]
    MissingKey {
        path: String,
        present_in: String,
        missing_from: String,
    },

    /// A leaf has neither a value in one locale nor a default in the schema,
    /// and its type does not admit `None`.
    #[error("key \"{path}\" has no value in locale \"{locale}\" and no default to fall back on")]
    MissingValue { path: String, locale: String },

    /// One locale holds a group where the schema holds a leaf, or the reverse.
    #[error("key \"{path}\" of locale \"{locale}\" is a {found} but the schema declares a {expected}")]
    ShapeMismatch {
        path: String,
        locale: String,
        found: &'static str,
        expected: &'static str,
    },

    /// An internal traversal expected a group that does not exist.
    #[error("internal error: no group at \"{path}\"")]
    PathLookup { path: String },

    /// Two keys of one group map to the same generated identifier.
    #[error("keys at \"{path}\" collide on the generated identifier `{ident}`")]
    DuplicateIdentifier { path: String, ident: String },

    /// A raw key carries a signature that cannot be parsed.
    #[error("invalid key \"{key}\" in {}: {reason}", file.display())]
    InvalidKey {
        file: PathBuf,
        key: String,
        reason: &'static str,
    },

    /// An input file could not be decoded into a nested mapping.
    #[error("cannot decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// An encoding label is not known to the encoder.
    #[error("unknown encoding label \"{0}\"")]
    Encoding(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
