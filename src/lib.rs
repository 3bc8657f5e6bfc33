//! muka-tokens - design token compiler
//!
//! Merges layered JSON design-token files per theme, resolves `{a.b.c}`
//! references between tokens and emits one CSS custom-property stylesheet
//! per theme.

pub mod build;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod render;
pub mod resolve;
pub mod types;
pub mod validation;

pub use build::{build_all, build_theme, export_theme, BuildSummary, ThemeBuild};
pub use discovery::{deep_merge, load_sources, merge_all, Manifest, Theme, ThemeTarget};
pub use error::{Result, TokenError};
pub use render::{flatten, render_css, Declaration};
pub use resolve::{resolve, resolve_tree, UnresolvedReference};
pub use types::{Token, TokenTree, TokenType};
pub use validation::{Diagnostic, Report, Severity};
