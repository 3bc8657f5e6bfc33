//! Theme build pipeline.
//!
//! `build_theme` is pure: load, merge, validate, resolve, flatten and render
//! one theme into CSS text without touching the output directory.
//! `build_all` runs it for each theme in manifest order, writes the files
//! and keeps going when a single theme fails.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::discovery::{load_sources, Manifest};
use crate::error::{Result, TokenError};
use crate::output::{display_path, plural, Printer};
use crate::render::{flatten, render_css, Declaration};
use crate::resolve::resolve_tree;
use crate::types::TokenTree;
use crate::validation::{check_duplicate_properties, print_report, summarize, Report};

/// The in-memory result of building one theme.
#[derive(Debug)]
pub struct ThemeBuild {
    pub name: String,
    pub css: String,
    pub declarations: Vec<Declaration>,
    /// Source files merged, in merge order.
    pub files: Vec<PathBuf>,
    pub report: Report,
}

/// Outcome of `build_all`.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Files written, in build order.
    pub written: Vec<PathBuf>,
    /// Themes that failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// Diagnostics from every theme.
    pub report: Report,
}

impl BuildSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// File name for a theme's stylesheet.
pub fn css_file_name(theme: &str) -> String {
    format!("tokens-{}.css", theme)
}

/// File name for a theme's raw JSON export.
pub fn json_file_name(theme: &str) -> String {
    format!("tokens-{}.json", theme)
}

/// Load and validate the merged token tree of one theme.
pub fn load_theme_tree(
    root: &Path,
    manifest: &Manifest,
    theme_name: &str,
) -> Result<(TokenTree, Vec<PathBuf>, Report)> {
    let theme = manifest.theme(theme_name)?;
    let loaded = load_sources(root, theme.sources)?;
    let tree = TokenTree::from_value(&loaded.value).map_err(|e| TokenError::Build {
        message: format!("theme '{}' has invalid tokens: {}", theme_name, e),
        help: Some("Every object must be either a token with $value or a group".to_string()),
    })?;
    Ok((tree, loaded.files, loaded.report))
}

/// Build one theme into CSS text.
pub fn build_theme(root: &Path, manifest: &Manifest, theme_name: &str) -> Result<ThemeBuild> {
    let theme = manifest.theme(theme_name)?;
    let (tree, files, mut report) = load_theme_tree(root, manifest, theme_name)?;

    let (resolved, resolve_report) = resolve_tree(&tree);
    report.merge(resolve_report);

    let declarations = flatten(&resolved);
    report.merge(check_duplicate_properties(&declarations));

    let css = render_css(theme.name, &theme.target, theme.is_default, &declarations);

    Ok(ThemeBuild {
        name: theme.name.to_string(),
        css,
        declarations,
        files,
        report,
    })
}

/// The merged raw JSON of one theme, optionally with references resolved.
pub fn export_theme(
    root: &Path,
    manifest: &Manifest,
    theme_name: &str,
    resolved: bool,
) -> Result<(Value, Report)> {
    let theme = manifest.theme(theme_name)?;

    if !resolved {
        let loaded = load_sources(root, theme.sources)?;
        return Ok((loaded.value, loaded.report));
    }

    let (tree, _, mut report) = load_theme_tree(root, manifest, theme_name)?;
    let (resolved, resolve_report) = resolve_tree(&tree);
    report.merge(resolve_report);
    Ok((resolved.to_value(), report))
}

/// Create the output directory. Failure here is fatal for the whole run.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| TokenError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    Ok(())
}

/// Write text to a file, mapping errors to include the path.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| TokenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

/// Build the given themes (all when `only` is empty) and write their CSS.
///
/// Unknown theme names and output directory problems are fatal; anything
/// that goes wrong inside one theme is reported and the next theme runs.
pub fn build_all(
    root: &Path,
    manifest: &Manifest,
    only: &[String],
    out_dir: &Path,
    printer: &Printer,
) -> Result<BuildSummary> {
    let names: Vec<String> = if only.is_empty() {
        manifest.theme_names().into_iter().map(str::to_string).collect()
    } else {
        for name in only {
            manifest.theme(name)?;
        }
        only.to_vec()
    };

    ensure_output_dir(out_dir)?;

    let mut summary = BuildSummary::default();

    for name in &names {
        printer.status("Building", name);

        let result = build_theme(root, manifest, name).and_then(|build| {
            let path = out_dir.join(css_file_name(name));
            write_file(&path, &build.css)?;
            Ok((build, path))
        });

        match result {
            Ok((build, path)) => {
                print_report(&build.report, printer);
                let detail = format!(
                    "{} from {}",
                    plural(build.declarations.len(), "property", "properties"),
                    plural(build.files.len(), "file", "files")
                );
                printer.success(
                    "Wrote",
                    &format!("{} {}", display_path(&path), printer.dim(&format!("({})", detail))),
                );
                summary.report.merge(build.report);
                summary.written.push(path);
            }
            Err(e) => {
                printer.error("Failed", &format!("theme '{}': {}", name, e));
                summary.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    let done = format!(
        "{} to {} ({})",
        plural(summary.written.len(), "theme", "themes"),
        display_path(out_dir),
        summarize(&summary.report)
    );
    if summary.is_success() {
        printer.success("Finished", &done);
    } else {
        printer.warning(
            "Finished",
            &format!("{}; {} failed", done, plural(summary.failed.len(), "theme", "themes")),
        );
    }

    Ok(summary)
}
