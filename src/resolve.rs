//! Reference resolution.
//!
//! A string value may contain `{dot.path}` references to other tokens.
//! Each reference is replaced by the referenced token's (recursively
//! resolved) value. A reference that is the whole string keeps the
//! target's JSON type, so `"{font.stack}"` can resolve to an array.
//!
//! Resolution tracks the chain of paths being expanded; revisiting a path
//! on the same chain is a cycle and fails instead of looping.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{value_text, Lookup, TokenTree};
use crate::validation::{Diagnostic, Report};

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedReference {
    #[error("reference {{{path}}} does not match any token")]
    NotFound { path: String },

    #[error("reference {{{path}}} points at a group, not a token")]
    NotAToken { path: String },

    #[error("circular reference {}", .chain.join(" -> "))]
    Cycle { path: String, chain: Vec<String> },
}

impl UnresolvedReference {
    /// The reference path that failed.
    pub fn path(&self) -> &str {
        match self {
            UnresolvedReference::NotFound { path }
            | UnresolvedReference::NotAToken { path }
            | UnresolvedReference::Cycle { path, .. } => path,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            UnresolvedReference::NotFound { .. } => "tokens::resolve::not-found",
            UnresolvedReference::NotAToken { .. } => "tokens::resolve::not-a-token",
            UnresolvedReference::Cycle { .. } => "tokens::resolve::cycle",
        }
    }

    /// Turn into a warning attributed to the token holding the reference.
    pub fn to_diagnostic(&self, token_path: &str) -> Diagnostic {
        Diagnostic::warning(self.code(), format!("{}: {}", token_path, self))
            .with_help("The unresolved value is kept as written")
    }
}

/// Resolve references in a single value.
///
/// Non-strings and strings without `{` are returned unchanged. `visited`
/// holds the paths already being expanded on this chain.
pub fn resolve(
    value: &Value,
    tree: &TokenTree,
    visited: &[String],
) -> Result<Value, UnresolvedReference> {
    let Value::String(s) = value else {
        return Ok(value.clone());
    };
    if !s.contains('{') {
        return Ok(value.clone());
    }

    if let Some(path) = whole_reference(s) {
        return resolve_path(path, tree, visited);
    }

    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in REFERENCE.captures_iter(s) {
        let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&s[last..whole.start()]);
        let target = resolve_path(path.as_str().trim(), tree, visited)?;
        out.push_str(&value_text(&target));
        last = whole.end();
    }
    out.push_str(&s[last..]);

    Ok(Value::String(out))
}

/// Resolve every string inside a value, failing on the first bad reference.
pub fn resolve_deep(
    value: &Value,
    tree: &TokenTree,
    visited: &[String],
) -> Result<Value, UnresolvedReference> {
    match value {
        Value::String(_) => resolve(value, tree, visited),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_deep(item, tree, visited))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(fields) => {
            let mut out = Map::new();
            for (key, field) in fields {
                out.insert(key.clone(), resolve_deep(field, tree, visited)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

/// Resolve every string inside a value independently.
///
/// A field whose reference fails keeps its original text and the failure
/// is appended to `errors`.
pub fn resolve_lenient(
    value: &Value,
    tree: &TokenTree,
    visited: &[String],
    errors: &mut Vec<UnresolvedReference>,
) -> Value {
    match value {
        Value::String(_) => resolve(value, tree, visited).unwrap_or_else(|e| {
            errors.push(e);
            value.clone()
        }),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_lenient(item, tree, visited, errors))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| (key.clone(), resolve_lenient(field, tree, visited, errors)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Resolve all leaves of a tree.
///
/// Unresolvable references are kept verbatim and reported as warnings.
/// Resolving an already resolved tree returns an equal tree.
pub fn resolve_tree(tree: &TokenTree) -> (TokenTree, Report) {
    let mut resolved = tree.clone();
    let mut report = Report::new();

    resolved.for_each_leaf_mut(|path, leaf| {
        let token_path = path.join(".");
        let mut errors = Vec::new();
        leaf.value = resolve_lenient(&leaf.value, tree, &[token_path.clone()], &mut errors);
        report.extend(errors.iter().map(|e| e.to_diagnostic(&token_path)));
    });

    (resolved, report)
}

fn resolve_path(
    path: &str,
    tree: &TokenTree,
    visited: &[String],
) -> Result<Value, UnresolvedReference> {
    if visited.iter().any(|v| v == path) {
        let mut chain = visited.to_vec();
        chain.push(path.to_string());
        return Err(UnresolvedReference::Cycle {
            path: path.to_string(),
            chain,
        });
    }

    let leaf = match tree.lookup(path) {
        Lookup::Token(leaf) => leaf,
        Lookup::Group(_) => {
            return Err(UnresolvedReference::NotAToken {
                path: path.to_string(),
            })
        }
        Lookup::Missing => {
            return Err(UnresolvedReference::NotFound {
                path: path.to_string(),
            })
        }
    };

    let mut chain = visited.to_vec();
    chain.push(path.to_string());
    resolve_deep(&leaf.value, tree, &chain)
}

/// The path if `s` is exactly one reference and nothing else.
fn whole_reference(s: &str) -> Option<&str> {
    let caps = REFERENCE.captures(s)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == s.len() {
        caps.get(1).map(|m| m.as_str().trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree(value: Value) -> TokenTree {
        TokenTree::from_value(&value).unwrap()
    }

    fn leaf_value(tree: &TokenTree, path: &str) -> Value {
        match tree.lookup(path) {
            Lookup::Token(leaf) => leaf.value.clone(),
            other => panic!("{} is not a token: {:?}", path, other),
        }
    }

    #[test]
    fn test_plain_values_unchanged() {
        let t = tree(json!({}));
        assert_eq!(resolve(&json!(4), &t, &[]).unwrap(), json!(4));
        assert_eq!(resolve(&json!("#fff"), &t, &[]).unwrap(), json!("#fff"));
        assert_eq!(resolve(&json!("{ unclosed"), &t, &[]).unwrap(), json!("{ unclosed"));
    }

    #[test]
    fn test_multi_level_indirection() {
        let t = tree(json!({
            "base": { "white": { "$value": "#fff" } },
            "color": {
                "bg": { "$value": "{base.white}" },
                "surface": { "$value": "{color.bg}" }
            }
        }));
        assert_eq!(resolve(&json!("{color.surface}"), &t, &[]).unwrap(), json!("#fff"));
    }

    #[test]
    fn test_embedded_and_repeated_references() {
        let t = tree(json!({
            "space": { "sm": { "$value": "4px" }, "md": { "$value": "8px" } }
        }));
        assert_eq!(
            resolve(&json!("{space.sm} {space.md} {space.sm}"), &t, &[]).unwrap(),
            json!("4px 8px 4px")
        );
        assert_eq!(
            resolve(&json!("calc({space.md} * 2)"), &t, &[]).unwrap(),
            json!("calc(8px * 2)")
        );
    }

    #[test]
    fn test_type_preserving_whole_reference() {
        let t = tree(json!({
            "colors": { "palette": { "$value": ["#f00", "#0f0"] } },
            "size": { "$value": 4 }
        }));
        assert_eq!(
            resolve(&json!("{colors.palette}"), &t, &[]).unwrap(),
            json!(["#f00", "#0f0"])
        );
        assert_eq!(resolve(&json!("{size}"), &t, &[]).unwrap(), json!(4));
        assert_eq!(
            resolve(&json!("palette: {colors.palette}"), &t, &[]).unwrap(),
            json!("palette: #f00, #0f0")
        );
    }

    #[test]
    fn test_missing_reference() {
        let t = tree(json!({ "a": { "$value": "{nope.here}" } }));
        assert_eq!(
            resolve(&json!("{nope.here}"), &t, &[]).unwrap_err(),
            UnresolvedReference::NotFound {
                path: "nope.here".to_string()
            }
        );
    }

    #[test]
    fn test_group_reference() {
        let t = tree(json!({ "color": { "bg": { "$value": "#fff" } } }));
        let err = resolve(&json!("{color}"), &t, &[]).unwrap_err();
        assert_eq!(err.code(), "tokens::resolve::not-a-token");
    }

    #[test]
    fn test_cycle_terminates_and_keeps_original() {
        let t = tree(json!({
            "a": { "$value": "{b}" },
            "b": { "$value": "{a}" }
        }));

        let err = resolve(&json!("{b}"), &t, &["a".to_string()]).unwrap_err();
        assert!(matches!(err, UnresolvedReference::Cycle { .. }));

        let (resolved, report) = resolve_tree(&t);
        assert_eq!(leaf_value(&resolved, "a"), json!("{b}"));
        assert_eq!(leaf_value(&resolved, "b"), json!("{a}"));
        assert_eq!(report.warning_count(), 2);
        assert!(report.iter().all(|d| d.code == "tokens::resolve::cycle"));
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let t = tree(json!({ "a": { "$value": "x {a}" } }));
        let (resolved, report) = resolve_tree(&t);
        assert_eq!(leaf_value(&resolved, "a"), json!("x {a}"));
        let message = &report.iter().next().unwrap().message;
        assert_eq!(message, "a: circular reference a -> a");
    }

    #[test]
    fn test_composite_fields_resolve_independently() {
        let t = tree(json!({
            "color": { "line": { "$value": "#000" } },
            "border": {
                "$type": "border",
                "thin": { "$value": { "color": "{color.line}", "width": "{size.missing}", "style": "solid" } }
            }
        }));

        let (resolved, report) = resolve_tree(&t);
        assert_eq!(
            leaf_value(&resolved, "border.thin"),
            json!({ "color": "#000", "width": "{size.missing}", "style": "solid" })
        );
        assert_eq!(report.len(), 1);
        assert!(report.iter().next().unwrap().message.starts_with("border.thin:"));
    }

    #[test]
    fn test_resolve_tree_is_idempotent() {
        let t = tree(json!({
            "base": { "$value": "#fff" },
            "bg": { "$value": "{base}" },
            "shadow": { "$value": [{ "x": "0", "color": "{base}" }] },
            "broken": { "$value": "{nowhere}" }
        }));

        let (once, _) = resolve_tree(&t);
        let (twice, _) = resolve_tree(&once);
        assert_eq!(once, twice);
        assert_eq!(leaf_value(&once, "bg"), json!("#fff"));
    }
}
