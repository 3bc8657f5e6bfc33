//! Theme manifest parsing.
//!
//! The manifest maps each theme name to the ordered list of glob patterns
//! whose token files make up that theme. JSON is the primary format; YAML
//! manifests (`.yaml` / `.yml`) are accepted too.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// Theme that also receives the bare `:root` fallback block when the
/// manifest does not name one.
pub const DEFAULT_THEME: &str = "muka-light";

/// Theme manifest, e.g. `tokens/manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Theme name -> source patterns, in build order.
    pub themes: IndexMap<String, ThemeEntry>,

    /// Output directory for generated files, relative to the project root.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Theme whose declarations are duplicated into a bare `:root` block.
    #[serde(default = "default_theme", rename = "default")]
    pub default_theme: String,
}

fn default_output() -> PathBuf {
    PathBuf::from("styles")
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

/// One manifest entry: either a bare pattern list or a detailed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeEntry {
    Sources(Vec<String>),
    Detailed {
        sources: Vec<String>,
        #[serde(default)]
        brand: Option<String>,
        #[serde(default)]
        mode: Option<String>,
    },
}

impl ThemeEntry {
    pub fn sources(&self) -> &[String] {
        match self {
            ThemeEntry::Sources(sources) => sources,
            ThemeEntry::Detailed { sources, .. } => sources,
        }
    }
}

/// Where a theme's declarations are scoped in the emitted CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeTarget {
    /// Single-theme build: a bare `:root` block.
    Root,
    /// `[data-brand="..."][data-theme="..."]`.
    Scoped { brand: String, mode: String },
}

impl ThemeTarget {
    /// Derive the target from a theme name and optional explicit parts.
    ///
    /// `muka-light` becomes brand `muka`, mode `light`; everything after
    /// the first `-` is the mode.
    pub fn derive(name: &str, brand: Option<&str>, mode: Option<&str>) -> Self {
        let (name_brand, name_mode) = match name.split_once('-') {
            Some((b, m)) if !b.is_empty() && !m.is_empty() => (Some(b), Some(m)),
            _ => (None, None),
        };

        match (brand.or(name_brand), mode.or(name_mode)) {
            (Some(brand), Some(mode)) => ThemeTarget::Scoped {
                brand: brand.to_string(),
                mode: mode.to_string(),
            },
            _ => ThemeTarget::Root,
        }
    }

    /// The CSS selector for this target.
    pub fn selector(&self) -> String {
        match self {
            ThemeTarget::Root => ":root".to_string(),
            ThemeTarget::Scoped { brand, mode } => {
                format!("[data-brand=\"{}\"][data-theme=\"{}\"]", brand, mode)
            }
        }
    }
}

/// A theme resolved from the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme<'a> {
    pub name: &'a str,
    pub sources: &'a [String],
    pub target: ThemeTarget,
    /// Whether this theme also gets the bare `:root` fallback.
    pub is_default: bool,
}

impl Manifest {
    /// Load a manifest file. A missing or invalid manifest is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TokenError::Config {
                message: format!("Manifest not found: {}", path.display()),
                help: Some("Pass --manifest or create tokens/manifest.json".to_string()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TokenError::Config {
            message: format!("Failed to read manifest {}: {}", path.display(), e),
            help: None,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::parse_yaml(&content),
            _ => Self::parse(&content),
        }
    }

    /// Parse a manifest from JSON.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content).map_err(|e| TokenError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Expected {\"themes\": {\"<name>\": [\"<glob>\", ...]}}".to_string()),
        })?;
        manifest.validate()
    }

    /// Parse a manifest from YAML.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| TokenError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check the manifest YAML syntax".to_string()),
        })?;
        manifest.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.themes.is_empty() {
            return Err(TokenError::Config {
                message: "Manifest declares no themes".to_string(),
                help: Some("Add at least one entry under \"themes\"".to_string()),
            });
        }

        for theme in self.themes() {
            if !is_file_safe(theme.name) {
                return Err(TokenError::Config {
                    message: format!("Theme name '{}' cannot be used as a file name", theme.name),
                    help: Some(
                        "Theme names may not contain path separators or start with '.'".to_string(),
                    ),
                });
            }
            if let ThemeTarget::Scoped { brand, mode } = &theme.target {
                if let Some(bad) = [brand, mode].into_iter().find(|v| !is_attribute_safe(v)) {
                    return Err(TokenError::Config {
                        message: format!(
                            "Theme '{}' has brand or mode '{}' that cannot appear in a CSS selector",
                            theme.name, bad
                        ),
                        help: Some(
                            "Remove quotes, backslashes and brackets from the value".to_string(),
                        ),
                    });
                }
            }
        }

        Ok(self)
    }

    /// Look up a theme by name. An unknown theme is a configuration error.
    pub fn theme(&self, name: &str) -> Result<Theme<'_>> {
        let (name, entry) = self
            .themes
            .get_key_value(name)
            .ok_or_else(|| TokenError::Config {
                message: format!("Theme '{}' not found in manifest", name),
                help: Some(format!("Available themes: {}", self.theme_names().join(", "))),
            })?;
        Ok(self.make_theme(name, entry))
    }

    /// All themes in manifest order.
    pub fn themes(&self) -> impl Iterator<Item = Theme<'_>> {
        self.themes
            .iter()
            .map(|(name, entry)| self.make_theme(name, entry))
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    fn make_theme<'a>(&'a self, name: &'a str, entry: &'a ThemeEntry) -> Theme<'a> {
        let target = match entry {
            ThemeEntry::Sources(_) => ThemeTarget::derive(name, None, None),
            ThemeEntry::Detailed { brand, mode, .. } => {
                ThemeTarget::derive(name, brand.as_deref(), mode.as_deref())
            }
        };
        Theme {
            name,
            sources: entry.sources(),
            target,
            is_default: name == self.default_theme,
        }
    }
}

fn is_file_safe(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.chars().any(|c| matches!(c, '/' | '\\') || c.is_control())
}

fn is_attribute_safe(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '"' | '\\' | '[' | ']') || c.is_control())
}
