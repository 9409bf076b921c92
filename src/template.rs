//! `{name}` placeholder resolution for message templates.
//!
//! A token is an opening brace, one or more characters that are neither `{`
//! nor `}`, and a closing brace. Anything else (`{}`, an unmatched `{`, a
//! lone `}`) is plain text. There is no escaping.
//!
//! Resolution is a single left-to-right pass: substituted values are never
//! scanned again, so a label value containing `{x}` stays literal.
//!
//! ```rust
//! use palisade_faults::{template, Labels};
//! use serde_json::json;
//!
//! let mut labels = Labels::new();
//! labels.insert("user".into(), json!("alice"));
//! labels.insert("tries".into(), json!(3));
//!
//! let out = template::resolve("{user} failed {tries} times ({reason})", &labels);
//! assert_eq!(out, "alice failed 3 times ({reason})");
//! ```

use crate::context::{Labels, write_label_text};
use std::collections::BTreeSet;

/// Substitute every `{name}` whose `name` is a label key.
///
/// Unknown placeholders are left verbatim, braces included.
pub fn resolve(template: &str, labels: &Labels) -> String {
    if labels.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, name, after)) = next_token(rest) {
        out.push_str(before);
        match labels.get(name) {
            Some(value) => write_label_text(&mut out, value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Names of every placeholder token present in `template`.
pub fn extract_variable_names(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some((_, name, after)) = next_token(rest) {
        names.insert(name.to_owned());
        rest = after;
    }
    names
}

/// Split `s` around its first token: `(text before, name, text after)`.
fn next_token(s: &str) -> Option<(&str, &str, &str)> {
    let mut from = 0;
    loop {
        let open = from + s[from..].find('{')?;
        let body = &s[open + 1..];
        let end = body.find(['{', '}'])?;
        if end > 0 && body.as_bytes()[end] == b'}' {
            return Some((&s[..open], &body[..end], &body[end + 1..]));
        }
        // `{}` or a nested `{`: restart the scan at the brace we stopped on
        from = open + 1 + end;
    }
}
