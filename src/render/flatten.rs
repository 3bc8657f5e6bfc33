//! Flattening resolved tokens into CSS custom-property declarations.

use std::fmt;

use serde_json::{Map, Value};

use crate::types::{value_text, Leaf, TokenTree, TokenType};

use super::rgba::fix_rgba;

/// One `--name: value;` custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name without the leading `--`.
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}: {};", self.name, self.value)
    }
}

/// Flatten a resolved tree into declarations, depth first in document order.
pub fn flatten(tree: &TokenTree) -> Vec<Declaration> {
    let mut out = Vec::new();
    for (path, leaf) in tree.leaves() {
        flatten_leaf(&property_name(&path), leaf, &mut out);
    }
    for decl in &mut out {
        decl.value = fix_rgba(&decl.value).into_owned();
    }
    out
}

/// Expand one token into its declarations.
pub fn flatten_leaf(name: &str, leaf: &Leaf, out: &mut Vec<Declaration>) {
    match (&leaf.token_type, &leaf.value) {
        (Some(TokenType::Border), Value::Object(fields)) => {
            out.push(Declaration::new(name, border_value(fields)));
        }
        (Some(TokenType::BoxShadow), Value::Array(layers)) => {
            out.push(Declaration::new(name, shadow_value(layers)));
        }
        (Some(TokenType::BoxShadow), layer @ Value::Object(_)) => {
            out.push(Declaration::new(
                name,
                shadow_value(std::slice::from_ref(layer)),
            ));
        }
        // Typography and any other structured value: one property per field.
        (_, Value::Object(fields)) => {
            for (field, value) in fields {
                out.push(Declaration::new(
                    property_name(&[name, field.as_str()]),
                    value_text(value),
                ));
            }
        }
        (_, value) => out.push(Declaration::new(name, value_text(value))),
    }
}

/// `<width> <style|solid> <color>`
fn border_value(fields: &Map<String, Value>) -> String {
    let width = field(fields, "width");
    let style = field(fields, "style").unwrap_or_else(|| "solid".to_string());
    let color = field(fields, "color");

    [width, Some(style), color]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Layers joined by `, `, each `[inset ]<x> <y> <blur> <spread> <color>`.
fn shadow_value(layers: &[Value]) -> String {
    layers
        .iter()
        .map(|layer| match layer {
            Value::Object(fields) => shadow_layer(fields),
            other => value_text(other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn shadow_layer(fields: &Map<String, Value>) -> String {
    let mut parts = Vec::with_capacity(6);
    if fields.get("type").and_then(Value::as_str) == Some("innerShadow") {
        parts.push("inset".to_string());
    }
    for key in ["x", "y", "blur", "spread"] {
        parts.push(field(fields, key).unwrap_or_else(|| "0".to_string()));
    }
    if let Some(color) = field(fields, "color") {
        parts.push(color);
    }
    parts.join(" ")
}

fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .filter(|v| !v.is_null())
        .map(value_text)
}

/// Join path segments with `-`; whitespace inside a key becomes `-` too.
pub fn property_name(path: &[&str]) -> String {
    path.iter()
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join("-"))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn css(tree: serde_json::Value) -> Vec<String> {
        let tree = TokenTree::from_value(&tree).unwrap();
        flatten(&tree).iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_simple_tokens_and_nesting() {
        assert_eq!(
            css(json!({
                "color": { "gray": { "9": { "$value": "#111" } } },
                "space": { "$value": 4 }
            })),
            vec!["--color-gray-9: #111;", "--space: 4;"]
        );
    }

    #[test]
    fn test_border_composite() {
        assert_eq!(
            css(json!({
                "x": { "border": { "$type": "border", "$value": { "color": "#000", "width": "1px", "style": "dashed" } } }
            })),
            vec!["--x-border: 1px dashed #000;"]
        );
    }

    #[test]
    fn test_border_defaults_to_solid() {
        assert_eq!(
            css(json!({
                "line": { "$type": "border", "$value": { "color": "#ccc", "width": "2px" } }
            })),
            vec!["--line: 2px solid #ccc;"]
        );
    }

    #[test]
    fn test_box_shadow_layers() {
        assert_eq!(
            css(json!({
                "shadow": {
                    "card": {
                        "$type": "boxShadow",
                        "$value": [
                            { "x": "0", "y": "1px", "blur": "2px", "spread": "0", "color": "#0003" },
                            { "x": "0", "y": "0", "blur": "4px", "spread": "1px", "color": "#000", "type": "innerShadow" }
                        ]
                    }
                }
            })),
            vec!["--shadow-card: 0 1px 2px 0 #0003, inset 0 0 4px 1px #000;"]
        );
    }

    #[test]
    fn test_box_shadow_single_layer_object() {
        assert_eq!(
            css(json!({
                "focus": { "$type": "boxShadow", "$value": { "blur": "3px", "color": "blue" } }
            })),
            vec!["--focus: 0 0 3px 0 blue;"]
        );
    }

    #[test]
    fn test_typography_expands_per_field() {
        assert_eq!(
            css(json!({
                "font": {
                    "body": {
                        "$type": "typography",
                        "$value": {
                            "fontFamily": ["Inter", "sans-serif"],
                            "fontSize": "14px",
                            "lineHeight": 1.5
                        }
                    }
                }
            })),
            vec![
                "--font-body-fontFamily: Inter, sans-serif;",
                "--font-body-fontSize: 14px;",
                "--font-body-lineHeight: 1.5;",
            ]
        );
    }

    #[test]
    fn test_rgba_fixup_applied() {
        assert_eq!(
            css(json!({ "overlay": { "$value": "rgba(#000, 0.4)" } })),
            vec!["--overlay: rgba(0, 0, 0, 0.4);"]
        );
    }

    #[test]
    fn test_property_name() {
        assert_eq!(property_name(&["color", "brand primary", "9"]), "color-brand-primary-9");
        assert_eq!(property_name(&["font-body", "letterSpacing"]), "font-body-letterSpacing");
    }
}
