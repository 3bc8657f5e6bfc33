//! CSS rendering for resolved token trees.
//!
//! Tokens are flattened into custom-property declarations (composite
//! types expand into one or more properties), hex colours inside `rgba()`
//! are decoded, and the declarations are wrapped in selector blocks.

mod css;
mod flatten;
mod rgba;

pub use css::{render_block, render_css};
pub use flatten::{flatten, flatten_leaf, property_name, Declaration};
pub use rgba::fix_rgba;
