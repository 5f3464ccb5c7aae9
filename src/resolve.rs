// SPDX-License-Identifier: PMPL-1.0-or-later

//! Type inference for leaves and identifier naming for emitted items.

use crate::config::Options;
use crate::key::TypeRef;
use crate::types::{Catalog, Entry, Node, Value};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// The resolved type of a leaf accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Named { name: String, nullable: bool },
    /// Locales disagree (or say nothing); rendered as a boxed `Any`.
    Any { nullable: bool },
}

impl ValueType {
    pub fn nullable(&self) -> bool {
        match self {
            ValueType::Named { nullable, .. } | ValueType::Any { nullable } => *nullable,
        }
    }

    /// Whether untyped text for this leaf should render as a `String`.
    pub fn holds_text(&self) -> bool {
        match self {
            ValueType::Named { name, .. } => name == "String",
            ValueType::Any { .. } => true,
        }
    }

    pub fn render(&self) -> String {
        let base = match self {
            ValueType::Named { name, .. } => name.clone(),
            ValueType::Any { .. } => "Box<dyn ::std::any::Any + Send + Sync>".to_string(),
        };
        if self.nullable() {
            format!("Option<{base}>")
        } else {
            base
        }
    }
}

impl From<&TypeRef> for ValueType {
    fn from(ty: &TypeRef) -> Self {
        ValueType::Named {
            name: ty.name.clone(),
            nullable: ty.nullable,
        }
    }
}

/// What one locale says about a leaf's type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Evidence {
    Typed(TypeRef),
    /// `null` or missing in this locale.
    Null,
    /// A code block without a declared type.
    Silent,
}

fn evidence(entry: Option<&Entry>) -> Evidence {
    let Some(entry) = entry else {
        return Evidence::Null;
    };
    if let Some(ty) = &entry.key.return_type {
        return Evidence::Typed(ty.clone());
    }
    match &entry.node {
        Node::Leaf(Value::Text(_)) => Evidence::Typed(TypeRef::string()),
        Node::Leaf(Value::Absent) => Evidence::Null,
        Node::Leaf(Value::Code(_)) | Node::Group(_) => Evidence::Silent,
    }
}

fn combine(evidence: impl IntoIterator<Item = Evidence>) -> ValueType {
    let mut nullable = false;
    let mut names = BTreeSet::new();
    for item in evidence {
        match item {
            Evidence::Typed(ty) => {
                nullable |= ty.nullable;
                names.insert(ty.name);
            }
            Evidence::Null => nullable = true,
            Evidence::Silent => {}
        }
    }
    match names.len() {
        1 => ValueType::Named {
            name: names.into_iter().next().unwrap_or_default(),
            nullable,
        },
        _ => ValueType::Any { nullable },
    }
}

/// Resolves the type of the schema leaf `entry` found in the group at `path`.
///
/// A declared return type on the schema key wins. Otherwise every concrete
/// locale contributes the type of its own leaf for that key.
pub fn leaf_type(catalog: &Catalog, path: &[String], entry: &Entry) -> ValueType {
    if let Some(ty) = &entry.key.return_type {
        return ValueType::from(ty);
    }
    combine(catalog.locales().map(|(_, tree)| {
        evidence(
            tree.lookup(path)
                .and_then(|group| group.get(&entry.key.name)),
        )
    }))
}

// ─── Identifiers ────────────────────────────────────────────────────

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const UNRAWABLE: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Accessor names that would shadow the generated back-reference.
const RESERVED: &[&str] = &["parent"];

static NON_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("valid identifier regex"));

/// Splits `fooBar-baz_HTTPServer2` into `foo Bar baz HTTP Server2`.
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
            let hump = prev.is_lowercase() && ch.is_uppercase();
            let acronym_end = prev.is_uppercase() && ch.is_uppercase() && next_lower;
            let after_digit = prev.is_numeric() && ch.is_uppercase();
            if hump || acronym_end || after_digit {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn snake_case(text: &str) -> String {
    split_words(text)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn pascal_case(text: &str) -> String {
    split_words(text)
        .iter()
        .map(|word| capitalize(&word.to_lowercase()))
        .collect()
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces characters that cannot appear in an identifier.
pub fn sanitize(text: &str) -> String {
    NON_IDENT.replace_all(text.trim(), "_").into_owned()
}

/// Makes `name` usable as a Rust identifier in value position.
pub fn escape_ident(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    if name.starts_with(|c: char| c.is_numeric()) {
        return format!("_{name}");
    }
    if UNRAWABLE.contains(&name) || RESERVED.contains(&name) {
        return format!("{name}_");
    }
    if KEYWORDS.contains(&name) {
        return format!("r#{name}");
    }
    name.to_string()
}

/// Derives every generated name from configured options.
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    options: &'a Options,
}

impl<'a> Naming<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Method name for a key.
    pub fn accessor(&self, key_name: &str) -> String {
        let name = if self.options.convert {
            snake_case(key_name)
        } else {
            sanitize(key_name)
        };
        escape_ident(&name)
    }

    fn type_segment(&self, key_name: &str) -> String {
        if self.options.convert {
            pascal_case(key_name)
        } else {
            sanitize(key_name)
        }
    }

    fn path_suffix(&self, path: &[String]) -> String {
        path.iter().map(|segment| self.type_segment(segment)).collect()
    }

    /// Trait name of the schema level at `path` (`I18N`, `I18NMenu`).
    pub fn abstract_type(&self, path: &[String]) -> String {
        format!("{}{}", self.options.base_name, self.path_suffix(path))
    }

    /// Enum variant of a locale (`EN`, `en_US`).
    pub fn variant(&self, locale: &str) -> String {
        escape_ident(&sanitize(locale))
    }

    /// `en_US` → `EnUS`: segments joined, first character capitalized.
    pub fn locale_fragment(&self, locale: &str) -> String {
        let joined: String = locale
            .split('_')
            .filter(|segment| !segment.is_empty())
            .collect();
        capitalize(&sanitize(&joined))
    }

    /// Struct name of one locale at `path` (`ENI18NMenu`).
    pub fn concrete_type(&self, locale: &str, path: &[String]) -> String {
        format!("{}{}", self.locale_fragment(locale), self.abstract_type(path))
    }

    /// Singleton name of one locale at `path` (`eNI18NMenu`).
    pub fn instance(&self, locale: &str, path: &[String]) -> String {
        let name = decapitalize(&format!(
            "{}{}",
            sanitize(locale),
            self.abstract_type(path)
        ));
        if name == self.concrete_type(locale, path) {
            format!("_{name}")
        } else {
            name
        }
    }
}
