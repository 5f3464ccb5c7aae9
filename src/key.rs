// SPDX-License-Identifier: PMPL-1.0-or-later

//! Raw translation keys and the signatures they may carry.
//!
//! A key is either a bare name (`greeting`) or a name decorated with a
//! declared return type and/or a parameter list:
//!
//! ```text
//! String greet(String name, i32 count)
//! i32 limit
//! farewell(String name)
//! ```
//!
//! Keys are parsed once when a decoded file is turned into a tree. Every
//! later stage addresses entries by [`Key::name`], the signature-stripped
//! form.

use serde::Serialize;

/// A written type. A trailing `?` or an outer `Option<..>` marks it nullable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub name: String,
    pub nullable: bool,
}

impl TypeRef {
    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            nullable,
        }
    }

    /// The intrinsic type of a plain translation string.
    pub fn string() -> Self {
        Self::named("String", false)
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(inner) = text.strip_suffix('?') {
            let inner = inner.trim();
            return (!inner.is_empty()).then(|| Self::named(inner, true));
        }
        if let Some(inner) = text
            .strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let inner = inner.trim();
            return (!inner.is_empty()).then(|| Self::named(inner, true));
        }
        Some(Self::named(text, false))
    }

    pub fn is_string(&self) -> bool {
        self.name == "String"
    }

    /// Rust spelling of this type.
    pub fn render(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

/// A parsed raw key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    /// The key exactly as written in the source file.
    pub raw: String,
    pub name: String,
    pub return_type: Option<TypeRef>,
    /// `None` for a property, `Some` (possibly empty) for an accessor method.
    pub params: Option<Vec<Param>>,
}

const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

impl Key {
    /// A key with no signature, used for directory and file nesting segments.
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            raw: name.clone(),
            name,
            return_type: None,
            params: None,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("empty key");
        }

        let (head, params) = if trimmed.ends_with(')') {
            let open = matching_open(trimmed).ok_or("unbalanced parentheses")?;
            let params = parse_params(&trimmed[open + 1..trimmed.len() - 1])?;
            (trimmed[..open].trim_end(), Some(params))
        } else if trimmed.contains('(') || trimmed.contains(')') {
            return Err("parameter list must close the key");
        } else {
            (trimmed, None)
        };

        let (return_type, name) = match split_last_word(head) {
            Some((ty, name)) if looks_like_type(ty) => (TypeRef::parse(ty), name),
            _ => (None, head),
        };
        if name.is_empty() {
            return Err("missing name");
        }
        if params.is_some() && name.chars().any(char::is_whitespace) {
            return Err("method name cannot contain whitespace");
        }

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            return_type,
            params,
        })
    }

    pub fn has_signature(&self) -> bool {
        self.return_type.is_some() || self.params.is_some()
    }
}

/// Index of the `(` that opens the trailing parameter list.
fn matching_open(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_params(text: &str) -> Result<Vec<Param>, &'static str> {
    let mut params = Vec::new();
    for part in split_top_level(text, ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (ty, name) = split_last_word(part).ok_or("parameter must be written as `Type name`")?;
        let ty = TypeRef::parse(ty).ok_or("parameter type is empty")?;
        params.push(Param {
            ty,
            name: name.to_string(),
        });
    }
    Ok(params)
}

/// Splits on `sep` where it is not nested in `<>`, `()` or `[]`.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Splits `Type name` at the last whitespace outside brackets.
fn split_last_word(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    let mut split = None;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => split = Some(idx),
            _ => {}
        }
    }
    let idx = split?;
    let ty = text[..idx].trim();
    let name = text[idx..].trim();
    (!ty.is_empty() && !name.is_empty()).then_some((ty, name))
}

/// Distinguishes `String greet` (typed) from `hello world` (a name with a space).
fn looks_like_type(text: &str) -> bool {
    let base = text.trim_end_matches('?');
    if base.chars().any(char::is_whitespace) && !base.contains('<') && !base.contains('(') {
        return false;
    }
    base.starts_with(|c: char| c.is_uppercase() || matches!(c, '&' | '(' | '['))
        || base.contains("::")
        || base.contains('<')
        || PRIMITIVES.contains(&base)
}
