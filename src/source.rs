// SPDX-License-Identifier: PMPL-1.0-or-later

//! Discovery and decoding of translation files.
//!
//! Format decoding is delegated to serde through the [`Decoder`] trait; this
//! module only turns the decoded value into a [`Group`] with parsed keys.

use crate::error::{GenError, Result};
use crate::key::Key;
use crate::types::{Entry, Group, SourceFile, Value};
use encoding_rs::Encoding;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decodes one file format into a JSON-shaped value.
pub trait Decoder {
    fn extensions(&self) -> &'static [&'static str];
    fn decode(&self, text: &str) -> std::result::Result<Json, String>;
}

pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn decode(&self, text: &str) -> std::result::Result<Json, String> {
        serde_json::from_str(text).map_err(|err| err.to_string())
    }
}

pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn decode(&self, text: &str) -> std::result::Result<Json, String> {
        serde_yaml::from_str(text).map_err(|err| err.to_string())
    }
}

pub fn default_decoders() -> Vec<Box<dyn Decoder>> {
    vec![Box::new(JsonDecoder), Box::new(YamlDecoder)]
}

fn decoder_for<'d>(decoders: &'d [Box<dyn Decoder>], path: &Path) -> Option<&'d dyn Decoder> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .or_else(|| {
            // Dotfiles such as `.json` carry their format in the name itself.
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix('.'))
                .map(str::to_ascii_lowercase)
        })?;
    decoders
        .iter()
        .find(|decoder| decoder.extensions().contains(&ext.as_str()))
        .map(|decoder| decoder.as_ref())
}

/// Lists decodable files under `root`, relative to it and sorted.
pub fn discover(root: &Path, decoders: &[Box<dyn Decoder>]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(GenError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "import directory not found"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            GenError::io(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if decoder_for(decoders, path).is_none() {
            tracing::warn!(path = %path.display(), "ignoring file with unknown format");
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        tracing::debug!(path = %relative.display(), "discovered");
        files.push(relative);
    }
    files.sort();
    Ok(files)
}

/// Reads a file and decodes its bytes with `encoding`, dropping any BOM.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|err| GenError::io(path, err))?;
    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(GenError::Decode {
            path: path.to_path_buf(),
            message: format!("malformed {} input", encoding.name()),
        });
    }
    Ok(text.into_owned())
}

/// Converts a decoded document into a translation tree.
pub fn tree_from_json(value: Json, file: &Path) -> Result<Group> {
    match value {
        Json::Object(map) => {
            let mut group = Group::new();
            for (raw, child) in map {
                let key = Key::parse(&raw).map_err(|reason| GenError::InvalidKey {
                    file: file.to_path_buf(),
                    key: raw.clone(),
                    reason,
                })?;
                let entry = match child {
                    Json::Object(_) => Entry::group(key, tree_from_json(child, file)?),
                    other => Entry::leaf(key, leaf_from_json(other, file, &raw)?),
                };
                group.insert(entry);
            }
            Ok(group)
        }
        // An empty YAML document decodes as null.
        Json::Null => Ok(Group::new()),
        _ => Err(GenError::Decode {
            path: file.to_path_buf(),
            message: "top level must be a mapping".to_string(),
        }),
    }
}

fn leaf_from_json(value: Json, file: &Path, key: &str) -> Result<Value> {
    match value {
        Json::String(text) => Ok(Value::from_text(text)),
        Json::Null => Ok(Value::Absent),
        Json::Bool(flag) => Ok(Value::Text(flag.to_string())),
        Json::Number(number) => Ok(Value::Text(number.to_string())),
        Json::Array(_) | Json::Object(_) => Err(GenError::Decode {
            path: file.to_path_buf(),
            message: format!("value of \"{key}\" must be a string, number, boolean or null"),
        }),
    }
}

/// Reads and decodes every translation file under `root`.
pub fn load_sources(
    root: &Path,
    encoding: &'static Encoding,
    decoders: &[Box<dyn Decoder>],
) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for relative in discover(root, decoders)? {
        let full = root.join(&relative);
        let Some(decoder) = decoder_for(decoders, &full) else {
            continue;
        };
        let text = read_text(&full, encoding)?;
        let value = decoder.decode(&text).map_err(|message| GenError::Decode {
            path: full.clone(),
            message,
        })?;
        let tree = tree_from_json(value, &relative)?;
        sources.push(SourceFile {
            path: relative,
            tree,
        });
    }
    Ok(sources)
}
