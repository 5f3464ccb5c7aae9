// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale classification of discovered translation files.
//!
//! File names follow `<feature>.<locale>.<ext>` or `<locale>.<ext>`:
//!
//! | File               | Locale     | Why                                    |
//! |--------------------|------------|----------------------------------------|
//! | `.json`            | abstract   | dotfile                                |
//! | `menu.en-us.json`  | `en_US`    | suffix after the last `.` of the stem  |
//! | `en.json`          | `EN`       | bare stem, sibling bare files exist    |
//! | `i18n.json`        | abstract   | the only bare stem in its directory    |
//!
//! The result only depends on the set of paths, never on the order they were
//! discovered in.

use crate::types::LocaleKey;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Separator between a file's feature name and its locale suffix.
pub const LOCALE_SEPARATOR: char = '.';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Number of base files (stems without a locale suffix) per directory.
    pub base_counts: BTreeMap<PathBuf, usize>,
    /// Paths per locale key, each list sorted.
    pub locales: BTreeMap<LocaleKey, Vec<PathBuf>>,
}

/// Splits a file name into stem and extension. Dotfiles have an empty stem.
pub(crate) fn split_name(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(0) => (String::new(), name[1..].to_string()),
        Some(idx) => (name[..idx].to_string(), name[idx + 1..].to_string()),
        None => (name, String::new()),
    }
}

fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().rfind('.') == Some(0))
        .unwrap_or(false)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

pub fn count_base_files(paths: &[PathBuf]) -> BTreeMap<PathBuf, usize> {
    let mut counts = BTreeMap::new();
    for path in paths {
        let (stem, _) = split_name(path);
        if !stem.contains(LOCALE_SEPARATOR) {
            *counts.entry(parent_dir(path)).or_insert(0) += 1;
        }
    }
    counts
}

/// Normalizes a raw locale tag: `en-us` → `en_US`, `fr` → `FR`.
pub fn normalize_locale(raw: &str) -> LocaleKey {
    let mut segments: Vec<String> = raw
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(last) = segments.last_mut() {
        *last = last.to_uppercase();
    }
    segments.join("_")
}

/// Derives the normalized locale key of one file.
pub fn locale_of(path: &Path, base_counts: &BTreeMap<PathBuf, usize>) -> LocaleKey {
    if is_dotfile(path) {
        return LocaleKey::new();
    }
    let (stem, _) = split_name(path);
    if let Some((_, suffix)) = stem.rsplit_once(LOCALE_SEPARATOR) {
        return normalize_locale(suffix);
    }
    let siblings = base_counts.get(&parent_dir(path)).copied().unwrap_or(0);
    if siblings <= 1 {
        LocaleKey::new()
    } else {
        normalize_locale(&stem)
    }
}

pub fn classify(paths: &[PathBuf]) -> Classification {
    let base_counts = count_base_files(paths);
    let mut locales: BTreeMap<LocaleKey, Vec<PathBuf>> = BTreeMap::new();
    for path in paths {
        let locale = locale_of(path, &base_counts);
        tracing::debug!(path = %path.display(), locale = %locale, "classified");
        locales.entry(locale).or_default().push(path.clone());
    }
    for files in locales.values_mut() {
        files.sort();
    }
    Classification {
        base_counts,
        locales,
    }
}

/// Nesting key of a file inside a directory holding several files of one locale.
pub fn feature_key(path: &Path) -> String {
    let (stem, _) = split_name(path);
    match stem.rsplit_once(LOCALE_SEPARATOR) {
        Some((feature, _)) => feature.to_string(),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn normalizes_locale_tags() {
        assert_eq!(normalize_locale("en"), "EN");
        assert_eq!(normalize_locale("en-us"), "en_US");
        assert_eq!(normalize_locale("zh_hant-tw"), "zh_hant_TW");
        assert_eq!(normalize_locale("-pt--br-"), "pt_BR");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn sibling_bare_files_are_locales() {
        let result = classify(&paths(&["en.json", "fr.json"]));
        assert_eq!(result.locales.keys().collect::<Vec<_>>(), ["EN", "FR"]);
        assert_eq!(result.base_counts.get(Path::new("")), Some(&2));
    }

    #[test]
    fn lone_bare_file_is_the_schema() {
        let result = classify(&paths(&["i18n.json", "i18n.en.json", "i18n.de.json"]));
        assert_eq!(result.locales.get(""), Some(&paths(&["i18n.json"])));
        assert_eq!(result.locales.get("EN"), Some(&paths(&["i18n.en.json"])));
        assert_eq!(result.locales.get("DE"), Some(&paths(&["i18n.de.json"])));
    }

    #[test]
    fn dotfile_is_abstract() {
        let result = classify(&paths(&[".json", "en.json"]));
        assert_eq!(result.locales.get(""), Some(&paths(&[".json"])));
        assert_eq!(result.locales.get("EN"), Some(&paths(&["en.json"])));
    }

    #[test]
    fn counts_are_per_directory() {
        let result = classify(&paths(&["a/en.json", "a/fr.json", "b/schema.json", "b/x.en.json"]));
        assert_eq!(result.base_counts.get(Path::new("a")), Some(&2));
        assert_eq!(result.base_counts.get(Path::new("b")), Some(&1));
        assert_eq!(result.locales.get(""), Some(&paths(&["b/schema.json"])));
        assert_eq!(
            result.locales.get("EN"),
            Some(&paths(&["a/en.json", "b/x.en.json"]))
        );
    }

    #[test]
    fn classification_ignores_input_order() {
        let forward = classify(&paths(&["menu.en.json", "menu.fr.json", "dialog.en.json"]));
        let backward = classify(&paths(&["dialog.en.json", "menu.fr.json", "menu.en.json"]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn feature_key_strips_locale_suffix() {
        assert_eq!(feature_key(Path::new("menu.en.json")), "menu");
        assert_eq!(feature_key(Path::new("a.b.en.yaml")), "a.b");
        assert_eq!(feature_key(Path::new("menu.json")), "menu");
    }
}
