//! Token tree types.
//!
//! A merged theme document is validated once into a tree of [`Token`]s.
//! Objects carrying `$value` become leaves; every other object is a group
//! whose non-`$` keys are further tokens or groups.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, TokenError};

/// Key marking an object as a token leaf.
pub const VALUE_KEY: &str = "$value";
/// Key carrying the token type, on leaves or inherited from groups.
pub const TYPE_KEY: &str = "$type";
/// Key carrying a free-form description.
pub const DESCRIPTION_KEY: &str = "$description";

/// The declared kind of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Color,
    Dimension,
    Typography,
    Border,
    BoxShadow,
    Other(String),
}

impl TokenType {
    pub fn parse(s: &str) -> Self {
        match s {
            "color" => TokenType::Color,
            "dimension" => TokenType::Dimension,
            "typography" => TokenType::Typography,
            "border" => TokenType::Border,
            "boxShadow" => TokenType::BoxShadow,
            other => TokenType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::Typography => "typography",
            TokenType::Border => "border",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Other(s) => s,
        }
    }

    /// Whether values of this type are structured and expand specially.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TokenType::Typography | TokenType::Border | TokenType::BoxShadow
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A design value with its (possibly inherited) type.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub token_type: Option<TokenType>,
    pub value: Value,
    pub description: Option<String>,
}

impl Leaf {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            token_type: None,
            value: value.into(),
            description: None,
        }
    }

    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }
}

/// A named collection of tokens and nested groups, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub token_type: Option<TokenType>,
    pub children: IndexMap<String, Token>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, token: Token) {
        self.children.insert(key.into(), token);
    }
}

/// A node of the token tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Token {
    Leaf(Leaf),
    Group(Group),
}

impl TryFrom<Value> for Token {
    type Error = TokenError;

    fn try_from(value: Value) -> Result<Self> {
        parse_node(&value, &mut Vec::new(), None)
    }
}

/// Result of looking up a dotted path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Token(&'a Leaf),
    Group(&'a Group),
    Missing,
}

/// The validated, merged tokens of one theme.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenTree {
    root: Group,
}

impl TokenTree {
    pub fn new(root: Group) -> Self {
        Self { root }
    }

    /// Validate a merged JSON document into a tree.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TokenError::Parse {
                message: "token document root must be a JSON object".to_string(),
                help: None,
            });
        }
        match parse_node(value, &mut Vec::new(), None)? {
            Token::Group(root) => Ok(Self { root }),
            Token::Leaf(_) => Err(TokenError::Parse {
                message: "token document root cannot itself be a token".to_string(),
                help: Some("Nest the token under a named group".to_string()),
            }),
        }
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Look up a dotted path such as `color.gray.9`.
    pub fn lookup(&self, path: &str) -> Lookup<'_> {
        let mut group = &self.root;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            match group.children.get(segment) {
                Some(Token::Group(next)) => {
                    if segments.peek().is_none() {
                        return Lookup::Group(next);
                    }
                    group = next;
                }
                Some(Token::Leaf(leaf)) => {
                    return if segments.peek().is_none() {
                        Lookup::Token(leaf)
                    } else {
                        Lookup::Missing
                    };
                }
                None => return Lookup::Missing,
            }
        }

        Lookup::Group(group)
    }

    /// Collect every leaf with its path, depth first in document order.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &Leaf)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out
    }

    /// Visit every leaf mutably with its path.
    pub fn for_each_leaf_mut(&mut self, mut f: impl FnMut(&[String], &mut Leaf)) {
        visit_leaves_mut(&mut self.root, &mut Vec::new(), &mut f);
    }

    /// Number of leaf tokens.
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert back into the `$value`/`$type` JSON shape.
    pub fn to_value(&self) -> Value {
        group_to_value(&self.root)
    }
}

fn collect_leaves<'a>(
    group: &'a Group,
    path: &mut Vec<&'a str>,
    out: &mut Vec<(Vec<&'a str>, &'a Leaf)>,
) {
    for (key, child) in &group.children {
        path.push(key.as_str());
        match child {
            Token::Leaf(leaf) => out.push((path.clone(), leaf)),
            Token::Group(nested) => collect_leaves(nested, path, out),
        }
        path.pop();
    }
}

fn visit_leaves_mut(
    group: &mut Group,
    path: &mut Vec<String>,
    f: &mut impl FnMut(&[String], &mut Leaf),
) {
    for (key, child) in group.children.iter_mut() {
        path.push(key.clone());
        match child {
            Token::Leaf(leaf) => f(path, leaf),
            Token::Group(nested) => visit_leaves_mut(nested, path, f),
        }
        path.pop();
    }
}

fn parse_node(
    value: &Value,
    path: &mut Vec<String>,
    inherited: Option<&TokenType>,
) -> Result<Token> {
    let Some(object) = value.as_object() else {
        return Err(TokenError::Parse {
            message: format!(
                "'{}' must be a token object or a group, found {}",
                path.join("."),
                kind_name(value)
            ),
            help: Some(format!("Wrap the value as {{ \"{}\": ... }}", VALUE_KEY)),
        });
    };

    let own_type = parse_type(object, path)?;

    if let Some(raw) = object.get(VALUE_KEY) {
        if let Some(child) = object.keys().find(|k| !k.starts_with('$')) {
            return Err(TokenError::Parse {
                message: format!(
                    "token '{}' mixes {} with child key '{}'",
                    path.join("."),
                    VALUE_KEY,
                    child
                ),
                help: Some("Move nested tokens into a sibling group".to_string()),
            });
        }

        let description = object
            .get(DESCRIPTION_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);

        return Ok(Token::Leaf(Leaf {
            token_type: own_type.or_else(|| inherited.cloned()),
            value: raw.clone(),
            description,
        }));
    }

    let mut group = Group {
        token_type: own_type,
        children: IndexMap::new(),
    };
    let child_inherited = group.token_type.as_ref().or(inherited);

    for (key, child) in object {
        // Remaining `$` keys on groups are metadata.
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        let token = parse_node(child, path, child_inherited)?;
        path.pop();
        group.children.insert(key.clone(), token);
    }

    Ok(Token::Group(group))
}

fn parse_type(object: &Map<String, Value>, path: &[String]) -> Result<Option<TokenType>> {
    match object.get(TYPE_KEY) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(TokenType::parse(s))),
        Some(other) => Err(TokenError::Parse {
            message: format!(
                "'{}' has a non-string {} ({})",
                path.join("."),
                TYPE_KEY,
                kind_name(other)
            ),
            help: None,
        }),
    }
}

fn group_to_value(group: &Group) -> Value {
    let mut object = Map::new();
    if let Some(t) = &group.token_type {
        object.insert(TYPE_KEY.to_string(), Value::String(t.to_string()));
    }
    for (key, child) in &group.children {
        let value = match child {
            Token::Leaf(leaf) => leaf_to_value(leaf),
            Token::Group(nested) => group_to_value(nested),
        };
        object.insert(key.clone(), value);
    }
    Value::Object(object)
}

fn leaf_to_value(leaf: &Leaf) -> Value {
    let mut object = Map::new();
    object.insert(VALUE_KEY.to_string(), leaf.value.clone());
    if let Some(t) = &leaf.token_type {
        object.insert(TYPE_KEY.to_string(), Value::String(t.to_string()));
    }
    if let Some(d) = &leaf.description {
        object.insert(DESCRIPTION_KEY.to_string(), Value::String(d.clone()));
    }
    Value::Object(object)
}

/// Render a value as CSS-ready text.
///
/// Strings are verbatim, arrays are joined with `, ` (font stacks),
/// objects fall back to compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
