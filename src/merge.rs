// SPDX-License-Identifier: PMPL-1.0-or-later

//! Hierarchical merge of classified files into one catalog.
//!
//! A file's directory segments (relative to the import root) become nesting
//! keys. When one directory holds several files of the same locale, each
//! file is additionally nested under its feature name (`menu.en.json` →
//! `menu`). Contributions to one locale are merged in path order; on a key
//! collision the later file wins at the top level of its nest point.

use crate::classify::{self, Classification};
use crate::error::{GenError, Result};
use crate::types::{AbstractOrigin, Catalog, Group, LocaleKey, SourceFile, ABSTRACT_LOCALE};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory components of a relative path, as nesting keys.
fn directory_segments(path: &Path) -> Vec<String> {
    path.parent()
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .filter(|segment| !segment.is_empty() && segment != ".")
                .collect()
        })
        .unwrap_or_default()
}

/// Places `content` under `path` in `root`, shallow-merging at the nest point.
pub fn nest_into(root: &mut Group, path: &[String], content: Group) {
    let target = path
        .iter()
        .fold(root, |group, segment| group.child_group_mut(segment));
    target.merge(content);
}

/// Builds one locale's tree from its files.
pub fn merge_locale(files: &[&SourceFile]) -> Group {
    let mut by_dir: BTreeMap<PathBuf, Vec<&SourceFile>> = BTreeMap::new();
    for file in files {
        let dir = file.path.parent().map(Path::to_path_buf).unwrap_or_default();
        by_dir.entry(dir).or_default().push(file);
    }

    let mut root = Group::new();
    for (_, mut dir_files) in by_dir {
        dir_files.sort_by(|a, b| a.path.cmp(&b.path));
        let split = dir_files.len() > 1;
        for file in dir_files {
            let mut path = directory_segments(&file.path);
            if split {
                path.push(classify::feature_key(&file.path));
            }
            nest_into(&mut root, &path, file.tree.clone());
        }
    }
    root
}

/// Classifies, merges and assembles the catalog for one run.
pub fn build_catalog(files: &[SourceFile]) -> Result<Catalog> {
    let paths: Vec<PathBuf> = files.iter().map(|file| file.path.clone()).collect();
    let Classification { locales, .. } = classify::classify(&paths);

    let mut trees: BTreeMap<LocaleKey, Group> = BTreeMap::new();
    for (locale, locale_paths) in &locales {
        let members: Vec<&SourceFile> = files
            .iter()
            .filter(|file| locale_paths.contains(&file.path))
            .collect();
        trees.insert(locale.clone(), merge_locale(&members));
    }

    let supplied = trees.remove(ABSTRACT_LOCALE).filter(|tree| !tree.is_empty());
    let concrete_content = trees.values().any(|tree| !tree.is_empty());
    if supplied.is_none() && !concrete_content {
        return Err(GenError::EmptyCatalog(
            "no locale resolved to a non-empty tree".to_string(),
        ));
    }

    let (abstract_tree, origin) = match supplied {
        Some(tree) => (tree, AbstractOrigin::Supplied),
        None => {
            // BTreeMap order: the first concrete locale is the smallest key.
            let (first, tree) = trees
                .iter()
                .next()
                .ok_or_else(|| GenError::EmptyCatalog("no concrete locale".to_string()))?;
            (tree.shape(), AbstractOrigin::Synthesized(first.clone()))
        }
    };
    if trees.is_empty() {
        return Err(GenError::EmptyCatalog(
            "the schema has no concrete locale to generate".to_string(),
        ));
    }

    tracing::debug!(
        locales = trees.len(),
        origin = ?origin,
        "catalog assembled"
    );
    Ok(Catalog::new(abstract_tree, origin, trees))
}
