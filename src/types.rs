// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core data model: translation trees and the per-run catalog.

use crate::error::{GenError, Result};
use crate::key::Key;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Normalized locale identifier (`EN`, `en_US`). Empty for the abstract schema.
pub type LocaleKey = String;

/// The pseudo-locale that only carries the key shape.
pub const ABSTRACT_LOCALE: &str = "";

/// Human-readable locale name for messages.
pub fn display_locale(locale: &str) -> &str {
    if locale.is_empty() {
        "<abstract>"
    } else {
        locale
    }
}

/// Terminal translation value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Value {
    /// Single-line translation text.
    Text(String),
    /// Multi-line text, emitted verbatim as a method body.
    Code(String),
    /// Declared but undefined here (`null` in the source file).
    Absent,
}

impl Value {
    /// Classifies decoded text: anything spanning several lines is code.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains('\n') {
            Value::Code(text)
        } else {
            Value::Text(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Group(Group),
    Leaf(Value),
}

impl Node {
    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Group(_) => "group",
            Node::Leaf(_) => "leaf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: Key,
    pub node: Node,
}

impl Entry {
    pub fn leaf(key: Key, value: Value) -> Self {
        Self {
            key,
            node: Node::Leaf(value),
        }
    }

    pub fn group(key: Key, group: Group) -> Self {
        Self {
            key,
            node: Node::Group(group),
        }
    }
}

/// Named children in first-seen order, addressed by signature-stripped name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Group {
    entries: IndexMap<String, Entry>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.key.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn child_group(&self, name: &str) -> Option<&Group> {
        match self.get(name).map(|entry| &entry.node) {
            Some(Node::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Returns the child group `name`, creating it (or replacing a leaf) if needed.
    pub fn child_group_mut(&mut self, name: &str) -> &mut Group {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Entry::group(Key::plain(name), Group::new()));
        if !entry.node.is_group() {
            entry.node = Node::Group(Group::new());
        }
        match &mut entry.node {
            Node::Group(group) => group,
            Node::Leaf(_) => unreachable!("leaf was replaced by a group above"),
        }
    }

    /// Shallow merge: top-level entries of `other` replace ours.
    pub fn merge(&mut self, other: Group) {
        for (_, entry) in other.entries {
            self.insert(entry);
        }
    }

    /// Follows nested groups along `path`.
    pub fn lookup(&self, path: &[String]) -> Option<&Group> {
        path.iter()
            .try_fold(self, |group, segment| group.child_group(segment))
    }

    /// Like [`Group::lookup`], for traversals that rely on the path existing.
    pub fn require(&self, path: &[String]) -> Result<&Group> {
        self.lookup(path).ok_or_else(|| GenError::PathLookup {
            path: path.join("."),
        })
    }

    /// The same keys and nesting with every leaf value stripped.
    pub fn shape(&self) -> Group {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| {
                let node = match &entry.node {
                    Node::Group(group) => Node::Group(group.shape()),
                    Node::Leaf(_) => Node::Leaf(Value::Absent),
                };
                (
                    name.clone(),
                    Entry {
                        key: entry.key.clone(),
                        node,
                    },
                )
            })
            .collect();
        Group { entries }
    }
}

/// A decoded input file, its path relative to the import root.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub tree: Group,
}

/// Where the abstract tree of a catalog came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AbstractOrigin {
    /// Supplied by abstract (schema) files.
    Supplied,
    /// Copied from the key shape of the named concrete locale.
    Synthesized(LocaleKey),
}

/// Locale key to translation tree, rebuilt from scratch on every run.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    abstract_tree: Group,
    origin: AbstractOrigin,
    locales: BTreeMap<LocaleKey, Group>,
}

impl Catalog {
    pub fn new(
        abstract_tree: Group,
        origin: AbstractOrigin,
        locales: BTreeMap<LocaleKey, Group>,
    ) -> Self {
        Self {
            abstract_tree,
            origin,
            locales,
        }
    }

    pub fn abstract_tree(&self) -> &Group {
        &self.abstract_tree
    }

    pub fn origin(&self) -> &AbstractOrigin {
        &self.origin
    }

    pub fn has_supplied_abstract(&self) -> bool {
        self.origin == AbstractOrigin::Supplied
    }

    /// Concrete locales, sorted by key.
    pub fn locales(&self) -> impl Iterator<Item = (&LocaleKey, &Group)> {
        self.locales.iter()
    }

    pub fn locale_keys(&self) -> Vec<LocaleKey> {
        self.locales.keys().cloned().collect()
    }

    pub fn locale(&self, key: &str) -> Option<&Group> {
        self.locales.get(key)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, text: &str) -> Entry {
        Entry::leaf(Key::plain(name), Value::from_text(text))
    }

    #[test]
    fn insert_keeps_first_seen_position() {
        let mut group = Group::new();
        group.insert(leaf("b", "1"));
        group.insert(leaf("a", "2"));
        group.insert(leaf("b", "3"));
        let names: Vec<_> = group.iter().map(|e| e.key.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(
            group.get("b").map(|e| &e.node),
            Some(&Node::Leaf(Value::Text("3".into())))
        );
    }

    #[test]
    fn multi_line_text_is_code() {
        assert_eq!(Value::from_text("a\nb"), Value::Code("a\nb".into()));
        assert_eq!(Value::from_text("ab"), Value::Text("ab".into()));
    }

    #[test]
    fn shape_strips_values_and_keeps_nesting() {
        let mut root = Group::new();
        root.insert(leaf("title", "Hello"));
        root.child_group_mut("menu").insert(leaf("open", "Open"));

        let shape = root.shape();
        assert_eq!(
            shape.get("title").map(|e| &e.node),
            Some(&Node::Leaf(Value::Absent))
        );
        let menu = shape.lookup(&["menu".to_string()]).unwrap();
        assert_eq!(
            menu.get("open").map(|e| &e.node),
            Some(&Node::Leaf(Value::Absent))
        );
    }

    #[test]
    fn require_reports_missing_path() {
        let root = Group::new();
        let err = root.require(&["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(err, GenError::PathLookup { path } if path == "a.b"));
    }
}
