//! File system scanner for token sources.
//!
//! Finds every `.json` token file under a directory so `check` can report
//! files that no theme pattern picks up.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::validation::Report;

use super::loader::expand_pattern;
use super::manifest::Manifest;

/// Recursively collect `.json` files under `dir`, sorted.
pub fn scan_token_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();

    files.sort();
    files
}

/// Token files under `dir` that no theme in the manifest includes.
///
/// `exclude` is skipped as well (typically the manifest itself). Patterns
/// that fail to expand contribute nothing.
pub fn unused_token_files(
    root: &Path,
    dir: &Path,
    manifest: &Manifest,
    exclude: &Path,
) -> Vec<PathBuf> {
    let mut used = HashSet::new();
    // Pattern problems are reported by the theme build itself.
    let mut ignored = Report::new();

    for theme in manifest.themes() {
        for pattern in theme.sources {
            let Ok(paths) = expand_pattern(root, pattern, &mut ignored) else {
                continue;
            };
            for path in paths {
                used.insert(canonical(&path));
            }
        }
    }

    let exclude = canonical(exclude);
    scan_token_files(dir)
        .into_iter()
        .filter(|p| {
            let key = canonical(p);
            key != exclude && !used.contains(&key)
        })
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_finds_nested_json_only() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("core/color")).unwrap();
        fs::write(dir.path().join("core/color/base.json"), "{}").unwrap();
        fs::write(dir.path().join("core/size.json"), "{}").unwrap();
        fs::write(dir.path().join("core/notes.md"), "# notes").unwrap();

        let files = scan_token_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "json"));
    }

    #[test]
    fn test_scan_missing_directory() {
        assert!(scan_token_files(Path::new("/nonexistent/tokens")).is_empty());
    }

    #[test]
    fn test_unused_token_files() {
        let dir = tempdir().unwrap();
        let tokens = dir.path().join("tokens");
        fs::create_dir_all(&tokens).unwrap();
        fs::write(tokens.join("a.json"), "{}").unwrap();
        fs::write(tokens.join("orphan.json"), "{}").unwrap();
        let manifest_path = tokens.join("manifest.json");
        fs::write(&manifest_path, r#"{"themes": {"demo": ["tokens/a.json"]}}"#).unwrap();

        let manifest = Manifest::load(&manifest_path).unwrap();
        let unused = unused_token_files(dir.path(), &tokens, &manifest, &manifest_path);

        assert_eq!(unused.len(), 1);
        assert!(unused[0].ends_with("orphan.json"));
    }

    #[test]
    fn test_unused_token_files_skips_invalid_pattern() {
        let dir = tempdir().unwrap();
        let tokens = dir.path().join("tokens");
        fs::create_dir_all(&tokens).unwrap();
        fs::write(tokens.join("a.json"), "{}").unwrap();
        let manifest = Manifest::parse(
            r#"{"themes": {"broken": ["tokens/[.json"], "demo": ["tokens/a.json"]}}"#,
        )
        .unwrap();

        let unused = unused_token_files(dir.path(), &tokens, &manifest, &tokens.join("manifest.json"));
        assert!(unused.is_empty());
    }
}
