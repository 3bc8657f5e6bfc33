//! Manifest loading and token source discovery.
//!
//! A theme's sources are found by expanding the manifest's glob patterns,
//! parsing each file as JSON and deep-merging the documents in order.
//!
//! # Example
//!
//! ```ignore
//! use muka_tokens::discovery::{load_sources, Manifest};
//!
//! let manifest = Manifest::load(Path::new("tokens/manifest.json"))?;
//! let theme = manifest.theme("muka-light")?;
//! let loaded = load_sources(Path::new("."), theme.sources)?;
//! println!("Merged {} files", loaded.files.len());
//! ```

mod loader;
mod manifest;
mod merge;
mod scanner;

pub use loader::{expand_pattern, load_sources, LoadedSources};
pub use manifest::{Manifest, Theme, ThemeEntry, ThemeTarget, DEFAULT_THEME};
pub use merge::{deep_merge, merge_all};
pub use scanner::{scan_token_files, unused_token_files};

/// Default manifest location, relative to the project root.
pub const MANIFEST_PATH: &str = "tokens/manifest.json";
