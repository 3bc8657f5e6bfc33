//! Token source loader - expands a theme's patterns and merges the files.
//!
//! Unreadable or malformed files are skipped with a warning; only an
//! invalid glob pattern fails the theme.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, TokenError};
use crate::validation::{Diagnostic, Report};

use super::merge::deep_merge;

/// The merged document of one theme plus what went into it.
#[derive(Debug)]
pub struct LoadedSources {
    /// Merged raw JSON, before validation into a token tree.
    pub value: Value,
    /// Files that were merged, in merge order.
    pub files: Vec<PathBuf>,
    /// Skipped files and empty patterns.
    pub report: Report,
}

/// Expand each pattern relative to `root` and deep-merge the files in order.
pub fn load_sources(root: &Path, patterns: &[String]) -> Result<LoadedSources> {
    let mut value = Value::Object(Map::new());
    let mut files = Vec::new();
    let mut report = Report::new();

    for pattern in patterns {
        let mut matched = 0;

        for path in expand_pattern(root, pattern, &mut report)? {
            matched += 1;
            match read_document(&path) {
                Ok(doc) => {
                    deep_merge(&mut value, doc);
                    files.push(path);
                }
                Err(diagnostic) => report.push(diagnostic),
            }
        }

        if matched == 0 {
            report.push(
                Diagnostic::warning(
                    "tokens::load::no-match",
                    format!("Pattern '{}' matched no files", pattern),
                )
                .with_help("Patterns are resolved relative to the project root"),
            );
        }
    }

    Ok(LoadedSources {
        value,
        files,
        report,
    })
}

/// Expand one pattern into files, in the glob crate's sorted order.
pub fn expand_pattern(root: &Path, pattern: &str, report: &mut Report) -> Result<Vec<PathBuf>> {
    // The root is literal text; only the manifest pattern is a glob.
    let full = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let root = glob::Pattern::escape(&root.to_string_lossy());
        format!("{}/{}", root.trim_end_matches('/'), pattern)
    };

    let entries = glob::glob(&full).map_err(|e| TokenError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => report.warning(
                "tokens::load::unreadable",
                format!("{}: {}", e.path().display(), e.error()),
            ),
        }
    }
    Ok(paths)
}

/// Read and parse one token file. Failures become warnings for the caller.
fn read_document(path: &Path) -> std::result::Result<Value, Diagnostic> {
    let content = fs::read_to_string(path).map_err(|e| {
        Diagnostic::warning(
            "tokens::load::unreadable",
            format!("Skipping {}: {}", path.display(), e),
        )
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        Diagnostic::warning(
            "tokens::load::malformed",
            format!("Skipping {}: {}", path.display(), e),
        )
        .with_help("Fix the JSON syntax; the file contributed no tokens")
    })?;

    if !value.is_object() {
        return Err(Diagnostic::warning(
            "tokens::load::not-an-object",
            format!("Skipping {}: top level must be a JSON object", path.display()),
        ));
    }

    Ok(value)
}
