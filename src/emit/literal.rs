// SPDX-License-Identifier: PMPL-1.0-or-later

//! String literal quoting and `$name` / `${expr}` interpolation.

/// A translation string split into literal text and interpolated expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Expr(String),
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn push_text(segments: &mut Vec<Segment>, ch: char) {
    if let Some(Segment::Text(text)) = segments.last_mut() {
        text.push(ch);
    } else {
        segments.push(Segment::Text(ch.to_string()));
    }
}

/// Splits `text` on `$ident` and `${expr}`. `\$` is a literal dollar sign.
pub fn parse_template(text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '\\' && chars.get(idx + 1) == Some(&'$') {
            push_text(&mut segments, '$');
            idx += 2;
            continue;
        }
        if ch != '$' {
            push_text(&mut segments, ch);
            idx += 1;
            continue;
        }
        match chars.get(idx + 1) {
            Some('{') => {
                let mut depth = 0usize;
                let mut end = None;
                for (offset, &c) in chars[idx + 1..].iter().enumerate() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = Some(idx + 1 + offset);
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                match end {
                    Some(end) => {
                        let expr: String = chars[idx + 2..end].iter().collect();
                        segments.push(Segment::Expr(expr.trim().to_string()));
                        idx = end + 1;
                    }
                    None => {
                        push_text(&mut segments, '$');
                        idx += 1;
                    }
                }
            }
            Some(&next) if is_ident_start(next) => {
                let start = idx + 1;
                let mut end = start;
                while end < chars.len() && is_ident_char(chars[end]) {
                    end += 1;
                }
                segments.push(Segment::Expr(chars[start..end].iter().collect()));
                idx = end;
            }
            _ => {
                push_text(&mut segments, '$');
                idx += 1;
            }
        }
    }
    segments
}

/// Quotes `text` as a Rust string literal.
///
/// Text containing `"` or `\` becomes a raw literal with just enough `#`s so
/// nothing inside needs escaping; control characters force the escaped form.
pub fn quote(text: &str) -> String {
    let needs_raw = text.contains(['"', '\\']);
    if needs_raw && !text.chars().any(char::is_control) {
        let mut hashes = 1;
        while text.contains(&format!("\"{}", "#".repeat(hashes))) {
            hashes += 1;
        }
        let fence = "#".repeat(hashes);
        format!("r{fence}\"{text}\"{fence}")
    } else {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('"');
        for ch in text.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

/// Rust expression producing `text` as an owned `String`.
///
/// Interpolated names listed in `optional` hold an `Option<T>`; they render
/// their inner value, or nothing when `None`.
pub fn string_expr(text: &str, optional: &[&str]) -> String {
    let segments = parse_template(text);
    let args: Vec<String> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Expr(expr) if optional.contains(&expr.as_str()) => Some(format!(
                "{expr}.as_ref().map(ToString::to_string).unwrap_or_default()"
            )),
            Segment::Expr(expr) => Some(expr.clone()),
            Segment::Text(_) => None,
        })
        .collect();

    if args.is_empty() {
        let literal: String = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Expr(_) => None,
            })
            .collect();
        return format!("String::from({})", quote(&literal));
    }

    let mut pattern = String::new();
    for segment in &segments {
        match segment {
            Segment::Text(text) => pattern.push_str(&text.replace('{', "{{").replace('}', "}}")),
            Segment::Expr(_) => pattern.push_str("{}"),
        }
    }
    format!("format!({}, {})", quote(&pattern), args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_one_segment() {
        assert_eq!(
            parse_template("Hello"),
            vec![Segment::Text("Hello".into())]
        );
    }

    #[test]
    fn identifiers_and_blocks_are_interpolated() {
        assert_eq!(
            parse_template("Hi $name, ${self.count()} left"),
            vec![
                Segment::Text("Hi ".into()),
                Segment::Expr("name".into()),
                Segment::Text(", ".into()),
                Segment::Expr("self.count()".into()),
                Segment::Text(" left".into()),
            ]
        );
    }

    #[test]
    fn stray_dollars_stay_literal() {
        assert_eq!(parse_template("cost: $5"), vec![Segment::Text("cost: $5".into())]);
        assert_eq!(parse_template(r"\$name"), vec![Segment::Text("$name".into())]);
        assert_eq!(parse_template("${open"), vec![Segment::Text("${open".into())]);
    }

    #[test]
    fn quoting_avoids_mid_string_escapes() {
        assert_eq!(quote("Hello"), "\"Hello\"");
        assert_eq!(quote(r#"Say "hi""#), r###"r#"Say "hi""#"###);
        assert_eq!(quote(r##"a"#b"##), r###"r##"a"#b"##"###);
        assert_eq!(quote(r"C:\temp"), r##"r#"C:\temp"#"##);
        assert_eq!(quote("tab\there \"q\""), r#""tab\there \"q\"""#);
    }

    #[test]
    fn string_expressions() {
        assert_eq!(string_expr("Hello", &[]), "String::from(\"Hello\")");
        assert_eq!(
            string_expr("Hello, $name", &[]),
            "format!(\"Hello, {}\", name)"
        );
        assert_eq!(
            string_expr("{$n} items", &[]),
            "format!(\"{{{}}} items\", n)"
        );
        assert_eq!(string_expr(r"\$5", &[]), "String::from(\"$5\")");
    }

    #[test]
    fn optional_arguments_render_their_inner_value() {
        assert_eq!(
            string_expr("Hi $name, ${name.is_some()}", &["name"]),
            "format!(\"Hi {}, {}\", name.as_ref().map(ToString::to_string).unwrap_or_default(), name.is_some())"
        );
    }
}
