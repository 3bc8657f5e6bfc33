//! Core domain types for muka-tokens.
//!
//! - `Token` / `TokenTree` - the validated token tree of one theme
//! - `Colour` - hex colour decoding used by the CSS fixups

mod colour;
mod token;

pub use colour::Colour;
pub use token::{
    value_text, Group, Leaf, Lookup, Token, TokenTree, TokenType, DESCRIPTION_KEY, TYPE_KEY,
    VALUE_KEY,
};
