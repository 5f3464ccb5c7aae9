// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rust source emission for a validated catalog.
//!
//! The generated file contains, in order:
//!
//! 1. a header with the configured `use` declarations and the generic
//!    back-reference trait (`L10N<P>`),
//! 2. the locale enumeration with name lookup and dispatch,
//! 3. one trait per nesting level of the schema (`I18N`, `I18NMenu`, ..),
//! 4. per locale, sorted by key, one struct per nesting level implementing
//!    the matching trait, with a `static` singleton. Child structs point at
//!    their parent; parents point at their children.
//!
//! Equality and hashing of the generated structs only look at nested groups.
//! Leaf accessors are methods and never take part in comparisons.

mod literal;

pub use literal::{parse_template, quote, string_expr, Segment};

use crate::config::Options;
use crate::error::{GenError, Result};
use crate::key::{Param, TypeRef};
use crate::resolve::{self, escape_ident, Naming, ValueType};
use crate::types::{display_locale, Catalog, Entry, Group, Node, Value};
use std::collections::{BTreeMap, BTreeSet};

const INDENT: &str = "    ";

/// Renders the whole catalog as one Rust source text.
pub fn emit(catalog: &Catalog, options: &Options) -> Result<String> {
    let mut emitter = Emitter::new(catalog, options);
    emitter.header();
    emitter.locale_enum()?;
    emitter.abstract_level(&[])?;
    for locale in catalog.locale_keys() {
        emitter.concrete_level(&locale, &[])?;
    }
    Ok(emitter.finish())
}

fn dotted(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

fn child_path(path: &[String], name: &str) -> Vec<String> {
    let mut child = path.to_vec();
    child.push(name.to_string());
    child
}

fn render_params(params: Option<&[Param]>) -> String {
    params
        .unwrap_or_default()
        .iter()
        .map(|param| format!(", {}: {}", escape_ident(&param.name), param.ty.render()))
        .collect()
}

/// Names of the parameters declared as `Type?`.
fn optional_params(params: Option<&[Param]>) -> Vec<&str> {
    params
        .unwrap_or_default()
        .iter()
        .filter(|param| param.ty.nullable)
        .map(|param| param.name.as_str())
        .collect()
}

/// Rust expression for a single-line leaf of resolved type `ty`.
///
/// `own` is the type the locale declared on its own key, if any.
fn value_expr(text: &str, own: Option<&TypeRef>, ty: &ValueType, optional: &[&str]) -> String {
    let as_text = own.map_or_else(|| ty.holds_text(), TypeRef::is_string);
    let inner = if as_text {
        string_expr(text, optional)
    } else {
        text.trim().to_string()
    };
    let inner = match ty {
        ValueType::Any { .. } => format!("Box::new({inner})"),
        ValueType::Named { .. } => inner,
    };
    if ty.nullable() {
        format!("Some({inner})")
    } else {
        inner
    }
}

struct Emitter<'a> {
    catalog: &'a Catalog,
    options: &'a Options,
    naming: Naming<'a>,
    /// Every item name emitted so far, with the path that declared it.
    declared: BTreeMap<String, String>,
    lines: Vec<String>,
}

impl<'a> Emitter<'a> {
    fn new(catalog: &'a Catalog, options: &'a Options) -> Self {
        Self {
            catalog,
            options,
            naming: Naming::new(options),
            declared: BTreeMap::new(),
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Records a top-level item name, rejecting a second item with the same name.
    fn declare(&mut self, ident: &str, owner: String) -> Result<()> {
        if self.declared.contains_key(ident) {
            return Err(GenError::DuplicateIdentifier {
                path: owner,
                ident: ident.to_string(),
            });
        }
        self.declared.insert(ident.to_string(), owner);
        Ok(())
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    fn header(&mut self) {
        self.push("// GENERATED CODE - DO NOT MODIFY BY HAND.");
        self.push("// Produced by l10n-gen; edit the translation files and regenerate.");
        self.push("");
        self.push(
            "#![allow(dead_code, non_camel_case_types, non_snake_case, non_upper_case_globals, \
             unused_imports, unused_variables)]",
        );
        self.push("");
        for import in &self.options.imports {
            let import = import.trim().trim_start_matches("use ").trim_end_matches(';').trim();
            if !import.is_empty() {
                self.lines.push(format!("use {import};"));
            }
        }
        self.push("");
        let base = &self.options.base_class_name;
        self.lines.extend([
            "/// Back-reference from a translation level to the level that owns it.".to_string(),
            format!("pub trait {base}<P: ?Sized + 'static> {{"),
            format!("{INDENT}fn parent(&self) -> &'static P;"),
            "}".to_string(),
            String::new(),
        ]);
    }

    fn locale_enum(&mut self) -> Result<()> {
        let locales = self.catalog.locale_keys();
        let Some(first) = locales.first() else {
            return Err(GenError::EmptyCatalog("no concrete locale".to_string()));
        };
        let name = self.options.enum_class_name.clone();
        let base = self.options.base_class_name.clone();
        self.declare(&base, dotted(&[]))?;
        self.declare(&name, dotted(&[]))?;
        let root = self.naming.abstract_type(&[]);
        let first = format!("{name}::{}", self.naming.variant(first));
        let variants: Vec<(String, String)> = locales
            .iter()
            .map(|locale| (locale.clone(), self.naming.variant(locale)))
            .collect();

        self.push("/// Locales with generated translations.");
        self.push("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        self.push(format!("pub enum {name} {{"));
        for (_, variant) in &variants {
            self.push(format!("{INDENT}{variant},"));
        }
        self.push("}");
        self.push("");

        let all = variants
            .iter()
            .map(|(_, variant)| format!("{name}::{variant}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(format!("impl {name} {{"));
        self.push(format!("{INDENT}/// Every locale, in declaration order."));
        self.push(format!("{INDENT}pub const ALL: &'static [{name}] = &[{all}];"));
        self.push("");

        self.push(format!("{INDENT}pub fn name(self) -> &'static str {{"));
        self.push(format!("{INDENT}{INDENT}match self {{"));
        for (locale, variant) in &variants {
            self.push(format!(
                "{INDENT}{INDENT}{INDENT}{name}::{variant} => {},",
                quote(locale)
            ));
        }
        self.push(format!("{INDENT}{INDENT}}}"));
        self.push(format!("{INDENT}}}"));
        self.push("");

        self.lines.extend([
            format!("{INDENT}/// Case-insensitive lookup by name, falling back to the first locale."),
            format!("{INDENT}pub fn from_name(name: &str) -> Self {{"),
            format!("{INDENT}{INDENT}Self::ALL"),
            format!("{INDENT}{INDENT}{INDENT}.iter()"),
            format!("{INDENT}{INDENT}{INDENT}.copied()"),
            format!("{INDENT}{INDENT}{INDENT}.find(|locale| locale.name().eq_ignore_ascii_case(name))"),
            format!("{INDENT}{INDENT}{INDENT}.unwrap_or({first})"),
            format!("{INDENT}}}"),
            String::new(),
            format!("{INDENT}/// Locale of the running process, from `LC_ALL`, `LC_MESSAGES` or `LANG`."),
            format!("{INDENT}pub fn current() -> Self {{"),
            format!("{INDENT}{INDENT}let tag = [\"LC_ALL\", \"LC_MESSAGES\", \"LANG\"]"),
            format!("{INDENT}{INDENT}{INDENT}.iter()"),
            format!("{INDENT}{INDENT}{INDENT}.filter_map(|var| ::std::env::var(var).ok())"),
            format!("{INDENT}{INDENT}{INDENT}.find(|value| !value.is_empty())"),
            format!("{INDENT}{INDENT}{INDENT}.unwrap_or_default();"),
            format!("{INDENT}{INDENT}let tag = tag.split(['.', '@']).next().unwrap_or_default().replace('-', \"_\");"),
            format!("{INDENT}{INDENT}Self::from_name(&tag)"),
            format!("{INDENT}}}"),
            String::new(),
            format!("{INDENT}/// Translations of this locale."),
            format!("{INDENT}pub fn l10n(self) -> &'static dyn {root} {{"),
            format!("{INDENT}{INDENT}match self {{"),
        ]);
        for (locale, variant) in &variants {
            let instance = self.naming.instance(locale, &[]);
            self.push(format!(
                "{INDENT}{INDENT}{INDENT}{name}::{variant} => &{instance},"
            ));
        }
        self.push(format!("{INDENT}{INDENT}}}"));
        self.push(format!("{INDENT}}}"));
        self.push("}");
        self.push("");
        Ok(())
    }

    /// Rejects groups whose keys collapse onto one generated identifier.
    fn check_identifiers(&self, group: &Group, path: &[String]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for entry in group.iter() {
            let ident = self.naming.accessor(&entry.key.name);
            if !seen.insert(ident.clone()) {
                return Err(GenError::DuplicateIdentifier {
                    path: dotted(path),
                    ident,
                });
            }
        }
        Ok(())
    }

    fn parent_trait(&self, path: &[String]) -> String {
        match path.split_last() {
            None => self.options.enum_class_name.clone(),
            Some((_, parent)) => format!("dyn {}", self.naming.abstract_type(parent)),
        }
    }

    fn signature(&self, entry: &Entry, ty: &ValueType) -> String {
        format!(
            "fn {}(&self{}) -> {}",
            self.naming.accessor(&entry.key.name),
            render_params(entry.key.params.as_deref()),
            ty.render()
        )
    }

    /// Pushes the accessor of schema leaf `schema` with a body rendering `value`.
    fn leaf_method(&mut self, schema: &Entry, ty: &ValueType, value: &Value, own: Option<&TypeRef>) {
        let signature = self.signature(schema, ty);
        self.push(format!("{INDENT}{signature} {{"));
        match value {
            // Code blocks are copied as written.
            Value::Code(code) => self.push(code.trim_end_matches(['\n', '\r'])),
            Value::Text(text) => {
                let optional = optional_params(schema.key.params.as_deref());
                let expr = value_expr(text, own, ty, &optional);
                self.push(format!("{INDENT}{INDENT}{expr}"));
            }
            Value::Absent => self.push(format!("{INDENT}{INDENT}None")),
        }
        self.push(format!("{INDENT}}}"));
    }

    fn abstract_level(&mut self, path: &[String]) -> Result<()> {
        let catalog = self.catalog;
        let group = catalog.abstract_tree().require(path)?;
        self.check_identifiers(group, path)?;

        let name = self.naming.abstract_type(path);
        self.declare(&name, dotted(path))?;
        let parent = self.parent_trait(path);
        let base = self.options.base_class_name.clone();
        if path.is_empty() {
            self.push("/// Translations every locale provides.");
        } else {
            self.push(format!("/// Translations under `{}`.", path.join(".")));
        }
        self.push(format!("pub trait {name}: {base}<{parent}> + Sync {{"));

        let mut children = Vec::new();
        for entry in group.iter() {
            match &entry.node {
                Node::Group(_) => {
                    let child = child_path(path, &entry.key.name);
                    self.push(format!(
                        "{INDENT}fn {}(&self) -> &'static dyn {};",
                        self.naming.accessor(&entry.key.name),
                        self.naming.abstract_type(&child)
                    ));
                    children.push(child);
                }
                Node::Leaf(value) => {
                    let ty = resolve::leaf_type(catalog, path, entry);
                    if *value == Value::Absent && !ty.nullable() {
                        let signature = self.signature(entry, &ty);
                        self.push(format!("{INDENT}{signature};"));
                    } else {
                        // A nullable leaf without a schema value defaults to `None`.
                        self.leaf_method(entry, &ty, value, entry.key.return_type.as_ref());
                    }
                }
            }
        }
        self.push("}");
        self.push("");

        for child in children {
            self.abstract_level(&child)?;
        }
        Ok(())
    }

    fn concrete_level(&mut self, locale: &str, path: &[String]) -> Result<()> {
        let catalog = self.catalog;
        let schema = catalog.abstract_tree().require(path)?;
        let local = catalog.locale(locale).and_then(|tree| tree.lookup(path));

        let ty_name = self.naming.concrete_type(locale, path);
        self.declare(&ty_name, dotted(path))?;
        let trait_name = self.naming.abstract_type(path);
        let instance = self.naming.instance(locale, path);
        let base = self.options.base_class_name.clone();
        let parent_trait = self.parent_trait(path);

        // (accessor, child path) for every nested group of the schema.
        let children: Vec<(String, Vec<String>)> = schema
            .iter()
            .filter(|entry| entry.node.is_group())
            .map(|entry| {
                (
                    self.naming.accessor(&entry.key.name),
                    child_path(path, &entry.key.name),
                )
            })
            .collect();

        let mut fields = Vec::new();
        if let Some((_, parent_path)) = path.split_last() {
            fields.push((
                "parent".to_string(),
                self.naming.concrete_type(locale, parent_path),
                self.naming.instance(locale, parent_path),
            ));
        }
        for (accessor, child) in &children {
            fields.push((
                accessor.clone(),
                self.naming.concrete_type(locale, child),
                self.naming.instance(locale, child),
            ));
        }

        if path.is_empty() {
            self.push(format!("/// `{}` translations.", display_locale(locale)));
        } else {
            self.push(format!(
                "/// `{}` translations under `{}`.",
                display_locale(locale),
                path.join(".")
            ));
        }
        self.push(format!("pub struct {ty_name} {{"));
        for (field, ty, _) in &fields {
            self.push(format!("{INDENT}{field}: &'static {ty},"));
        }
        self.push("}");
        self.push("");
        self.push(format!("pub static {instance}: {ty_name} = {ty_name} {{"));
        for (field, _, target) in &fields {
            self.push(format!("{INDENT}{field}: &{target},"));
        }
        self.push("};");
        self.push("");

        let parent_expr = if path.is_empty() {
            format!(
                "&{}::{}",
                self.options.enum_class_name,
                self.naming.variant(locale)
            )
        } else {
            "self.parent".to_string()
        };
        self.lines.extend([
            format!("impl {base}<{parent_trait}> for {ty_name} {{"),
            format!("{INDENT}fn parent(&self) -> &'static {parent_trait} {{"),
            format!("{INDENT}{INDENT}{parent_expr}"),
            format!("{INDENT}}}"),
            "}".to_string(),
            String::new(),
        ]);

        self.push(format!("impl {trait_name} for {ty_name} {{"));
        for entry in schema.iter() {
            let own = local.and_then(|group| group.get(&entry.key.name));
            let mut key_path = path.to_vec();
            key_path.push(entry.key.name.clone());
            if let Some(own) = own {
                if own.node.is_group() != entry.node.is_group() {
                    return Err(GenError::ShapeMismatch {
                        path: key_path.join("."),
                        locale: display_locale(locale).to_string(),
                        found: own.node.kind(),
                        expected: entry.node.kind(),
                    });
                }
            }
            match &entry.node {
                Node::Group(_) => {
                    let accessor = self.naming.accessor(&entry.key.name);
                    self.push(format!(
                        "{INDENT}fn {accessor}(&self) -> &'static dyn {} {{",
                        self.naming.abstract_type(&key_path)
                    ));
                    self.push(format!("{INDENT}{INDENT}self.{accessor}"));
                    self.push(format!("{INDENT}}}"));
                }
                Node::Leaf(default) => {
                    let ty = resolve::leaf_type(catalog, path, entry);
                    let has_default = *default != Value::Absent || ty.nullable();
                    match own {
                        Some(Entry {
                            key,
                            node: Node::Leaf(value),
                        }) if *value != Value::Absent || ty.nullable() => {
                            self.leaf_method(entry, &ty, value, key.return_type.as_ref());
                        }
                        // Not translated here; the trait default applies.
                        _ if has_default => {}
                        _ => {
                            return Err(GenError::MissingValue {
                                path: key_path.join("."),
                                locale: display_locale(locale).to_string(),
                            })
                        }
                    }
                }
            }
        }
        self.push("}");
        self.push("");

        self.equality(&ty_name, &children);

        for (_, child) in &children {
            self.concrete_level(locale, child)?;
        }
        Ok(())
    }

    /// `PartialEq`, `Eq` and `Hash` over nested-group fields only.
    fn equality(&mut self, ty_name: &str, children: &[(String, Vec<String>)]) {
        let (other, state) = if children.is_empty() {
            ("_other", "_state")
        } else {
            ("other", "state")
        };
        let compare = if children.is_empty() {
            "true".to_string()
        } else {
            children
                .iter()
                .map(|(field, _)| format!("self.{field} == other.{field}"))
                .collect::<Vec<_>>()
                .join(" && ")
        };
        self.lines.extend([
            format!("impl PartialEq for {ty_name} {{"),
            format!("{INDENT}fn eq(&self, {other}: &Self) -> bool {{"),
            format!("{INDENT}{INDENT}{compare}"),
            format!("{INDENT}}}"),
            "}".to_string(),
            String::new(),
            format!("impl Eq for {ty_name} {{}}"),
            String::new(),
            format!("impl ::std::hash::Hash for {ty_name} {{"),
            format!("{INDENT}fn hash<H: ::std::hash::Hasher>(&self, {state}: &mut H) {{"),
        ]);
        for (field, _) in children {
            self.push(format!(
                "{INDENT}{INDENT}::std::hash::Hash::hash(&self.{field}, state);"
            ));
        }
        self.push(format!("{INDENT}}}"));
        self.push("}");
        self.push("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::merge::build_catalog;
    use crate::types::SourceFile;
    use std::path::PathBuf;

    fn file(path: &str, tree: Group) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            tree,
        }
    }

    fn leaves(pairs: &[(&str, Option<&str>)]) -> Group {
        let mut group = Group::new();
        for (key, value) in pairs {
            let value = value.map(Value::from_text).unwrap_or(Value::Absent);
            group.insert(Entry::leaf(Key::parse(key).unwrap(), value));
        }
        group
    }

    fn generate(files: &[SourceFile]) -> String {
        let catalog = build_catalog(files).unwrap();
        emit(&catalog, &Options::new("in", "out.rs")).unwrap()
    }

    #[test]
    fn value_expressions_follow_resolved_type() {
        let string = ValueType::Named {
            name: "String".into(),
            nullable: false,
        };
        let maybe_int = ValueType::Named {
            name: "i32".into(),
            nullable: true,
        };
        assert_eq!(value_expr("Hi", None, &string, &[]), "String::from(\"Hi\")");
        assert_eq!(value_expr("10", None, &maybe_int, &[]), "Some(10)");
        assert_eq!(
            value_expr("10", Some(&TypeRef::string()), &ValueType::Any { nullable: false }, &[]),
            "Box::new(String::from(\"10\"))"
        );
    }

    #[test]
    fn round_trip_two_locales() {
        let out = generate(&[
            file("en.json", leaves(&[("greeting", Some("Hello"))])),
            file("fr.json", leaves(&[("greeting", Some("Bonjour"))])),
        ]);
        assert!(out.contains("pub enum I18NLocale {\n    EN,\n    FR,\n}"));
        assert!(out.contains("pub trait I18N: L10N<I18NLocale> + Sync {\n    fn greeting(&self) -> String;\n}"));
        assert!(out.contains("impl I18N for ENI18N {\n    fn greeting(&self) -> String {\n        String::from(\"Hello\")\n    }\n}"));
        assert!(out.contains("String::from(\"Bonjour\")"));
        assert!(out.contains("I18NLocale::FR => &fRI18N,"));
        assert!(out.contains("pub static eNI18N: ENI18N = ENI18N {\n};"));
    }

    #[test]
    fn parameterized_leaf_becomes_method() {
        let out = generate(&[
            file("en.json", leaves(&[("greet(String name)", Some("Hello, $name"))])),
            file("fr.json", leaves(&[("greet(String name)", Some("Salut, $name"))])),
        ]);
        assert!(out.contains("fn greet(&self, name: String) -> String;"));
        assert!(out.contains("fn greet(&self, name: String) -> String {\n        format!(\"Hello, {}\", name)\n    }"));
    }

    #[test]
    fn nested_group_links_parent_and_child() {
        let mut en = leaves(&[("title", Some("App"))]);
        en.child_group_mut("menu").merge(leaves(&[("open", Some("Open"))]));
        let mut fr = leaves(&[("title", Some("Appli"))]);
        fr.child_group_mut("menu").merge(leaves(&[("open", Some("Ouvrir"))]));

        let out = generate(&[file("en.json", en), file("fr.json", fr)]);
        assert!(out.contains("fn menu(&self) -> &'static dyn I18NMenu;"));
        assert!(out.contains("pub trait I18NMenu: L10N<dyn I18N> + Sync {"));
        assert!(out.contains("pub struct ENI18NMenu {\n    parent: &'static ENI18N,\n}"));
        assert!(out.contains("pub static eNI18NMenu: ENI18NMenu = ENI18NMenu {\n    parent: &eNI18N,\n};"));
        assert!(out.contains("impl L10N<dyn I18N> for ENI18NMenu {\n    fn parent(&self) -> &'static dyn I18N {\n        self.parent\n    }\n}"));
        // Equality covers the nested group, not the `title` leaf.
        assert!(out.contains("fn eq(&self, other: &Self) -> bool {\n        self.menu == other.menu\n    }"));
        assert!(out.contains("::std::hash::Hash::hash(&self.menu, state);"));
        assert!(!out.contains("self.title == other.title"));
    }

    #[test]
    fn schema_defaults_and_required_methods() {
        let out = generate(&[
            file("i18n.json", leaves(&[("title", Some("App")), ("hint", None)])),
            file("i18n.en.json", leaves(&[("hint", Some("Tip"))])),
            file("i18n.fr.json", leaves(&[("title", Some("Appli")), ("hint", Some("Astuce"))])),
        ]);
        // The schema value becomes the trait default; `hint` has no default.
        assert!(out.contains("    fn title(&self) -> Option<String> {\n        Some(String::from(\"App\"))\n    }"));
        assert!(out.contains("    fn hint(&self) -> String;"));
        // EN inherits `title`, FR overrides it.
        let en_impl = out.split("impl I18N for ENI18N {").nth(1).unwrap();
        let en_impl = &en_impl[..en_impl.find("\n}\n").unwrap()];
        assert!(!en_impl.contains("fn title"));
        assert!(out.contains("Some(String::from(\"Appli\"))"));
    }

    #[test]
    fn code_blocks_are_copied_verbatim() {
        let body = "let n = 2;\n        format!(\"{n} items\")";
        let out = generate(&[
            file("en.json", leaves(&[("String items()", Some(body))])),
            file("fr.json", leaves(&[("String items()", Some("String::from(\"x\")"))])),
        ]);
        assert!(out.contains(&format!("fn items(&self) -> String {{\n{body}\n    }}")));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let schema = {
            let mut group = Group::new();
            group.child_group_mut("menu").merge(leaves(&[("open", None)]));
            group
        };
        let catalog = build_catalog(&[
            file("i18n.json", schema),
            file("i18n.en.json", leaves(&[("menu", Some("flat"))])),
        ])
        .unwrap();
        let err = emit(&catalog, &Options::new("in", "out.rs")).unwrap_err();
        assert!(matches!(err, GenError::ShapeMismatch { ref path, .. } if path == "menu"));
    }

    #[test]
    fn colliding_identifiers_are_reported() {
        let catalog = build_catalog(&[
            file("en.json", leaves(&[("fooBar", Some("a")), ("foo_bar", Some("b"))])),
            file("fr.json", leaves(&[("fooBar", Some("a")), ("foo_bar", Some("b"))])),
        ])
        .unwrap();
        let err = emit(&catalog, &Options::new("in", "out.rs")).unwrap_err();
        assert!(matches!(err, GenError::DuplicateIdentifier { ref ident, .. } if ident == "foo_bar"));
    }

    #[test]
    fn nullable_schema_leaf_defaults_to_none() {
        let out = generate(&[
            file("i18n.json", leaves(&[("title", None), ("hint", None)])),
            file("i18n.en.json", leaves(&[("title", Some("App")), ("hint", Some("Tip"))])),
            file("i18n.fr.json", leaves(&[("title", Some("Appli"))])),
        ]);
        // FR omits `hint`, so the schema gives it a `None` default.
        assert!(out.contains("    fn hint(&self) -> Option<String> {\n        None\n    }"));
        let fr_impl = out.split("impl I18N for FRI18N {").nth(1).unwrap();
        let fr_impl = &fr_impl[..fr_impl.find("\n}\n").unwrap()];
        assert!(!fr_impl.contains("fn hint"));
        assert!(out.contains("Some(String::from(\"Tip\"))"));
        assert!(out.contains("    fn title(&self) -> String;"));
    }

    #[test]
    fn non_nullable_leaf_without_value_is_rejected() {
        let catalog = build_catalog(&[
            file("i18n.json", leaves(&[("String title", None)])),
            file("i18n.en.json", leaves(&[("title", Some("App"))])),
            file("i18n.fr.json", leaves(&[("title", None)])),
        ])
        .unwrap();
        let err = emit(&catalog, &Options::new("in", "out.rs")).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingValue { ref path, ref locale } if path == "title" && locale == "FR"
        ));

        let catalog = build_catalog(&[
            file("i18n.json", leaves(&[("String title", None)])),
            file("i18n.en.json", leaves(&[("title", Some("App"))])),
            file("i18n.fr.json", leaves(&[])),
        ])
        .unwrap();
        let err = emit(&catalog, &Options::new("in", "out.rs")).unwrap_err();
        assert!(matches!(err, GenError::MissingValue { ref locale, .. } if locale == "FR"));
    }

    #[test]
    fn optional_parameters_interpolate_inner_value() {
        let out = generate(&[
            file("en.json", leaves(&[("greet(String? name)", Some("Hi $name"))])),
            file("fr.json", leaves(&[("greet(String? name)", Some("Salut $name"))])),
        ]);
        assert!(out.contains("fn greet(&self, name: Option<String>) -> String;"));
        assert!(out.contains(
            "format!(\"Hi {}\", name.as_ref().map(ToString::to_string).unwrap_or_default())"
        ));
    }

    #[test]
    fn colliding_type_names_are_reported() {
        let mut en = Group::new();
        en.child_group_mut("main")
            .child_group_mut("menu")
            .merge(leaves(&[("open", Some("Open"))]));
        en.child_group_mut("main_menu").merge(leaves(&[("close", Some("Close"))]));
        let fr = en.clone();
        let catalog = build_catalog(&[file("en.json", en), file("fr.json", fr)]).unwrap();
        let err = emit(&catalog, &Options::new("in", "out.rs")).unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateIdentifier { ref path, ref ident }
                if path == "main_menu" && ident == "I18NMainMenu"
        ));
    }

    #[test]
    fn locale_lookup_falls_back_to_first() {
        let out = generate(&[
            file("de.json", leaves(&[("a", Some("x"))])),
            file("en-us.json", leaves(&[("a", Some("y"))])),
        ]);
        assert!(out.contains("pub const ALL: &'static [I18NLocale] = &[I18NLocale::DE, I18NLocale::en_US];"));
        assert!(out.contains(".unwrap_or(I18NLocale::DE)"));
        assert!(out.contains("I18NLocale::en_US => \"en_US\","));
        assert!(out.contains("pub struct EnUSI18N {"));
    }
}
