//! Deep merge of token documents.
//!
//! One rule set serves both the CSS build and the raw export:
//! token leaves (objects with `$value`) replace whatever was there,
//! groups merge key by key, and everything else is last-in-wins.
//! An object holding only `$` keys laid over a leaf patches its metadata;
//! one with child tokens replaces the leaf.

use serde_json::{Map, Value};

use crate::types::VALUE_KEY;

/// Merge `source` into `target`, with `source` winning on collisions.
pub fn deep_merge(target: &mut Value, source: Value) {
    match source {
        Value::Object(source) if !is_leaf(&source) => {
            let patches_leaf = matches!(*target, Value::Object(ref t) if is_leaf(t))
                && source.keys().all(|k| k.starts_with('$'));
            if !patches_leaf && !matches!(*target, Value::Object(ref t) if !is_leaf(t)) {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target) = target {
                for (key, value) in source {
                    match target.get_mut(&key) {
                        Some(existing) => deep_merge(existing, value),
                        None => {
                            target.insert(key, value);
                        }
                    }
                }
            }
        }
        other => *target = other,
    }
}

/// Merge documents in order into a fresh accumulator.
pub fn merge_all(documents: impl IntoIterator<Item = Value>) -> Value {
    let mut acc = Value::Object(Map::new());
    for doc in documents {
        deep_merge(&mut acc, doc);
    }
    acc
}

fn is_leaf(object: &Map<String, Value>) -> bool {
    object.contains_key(VALUE_KEY)
}
