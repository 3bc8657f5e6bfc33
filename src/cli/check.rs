//! Check command implementation.
//!
//! Builds every theme in memory without writing anything and reports the
//! collected diagnostics. Also flags token files that no theme includes.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::build::build_theme;
use crate::discovery::unused_token_files;
use crate::error::{Result, TokenError};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_report, summarize, Diagnostic, Report};

use super::ProjectArgs;

/// Build every theme in memory and report problems
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Directory scanned for unused token files (default: the manifest's directory)
    #[arg(long)]
    pub tokens_dir: Option<PathBuf>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.project.manifest_path();
    let manifest = args.project.load_manifest()?;

    let mut report = Report::new();
    let mut failed = 0;

    for theme in manifest.themes() {
        printer.status("Checking", theme.name);
        match build_theme(&args.project.root, &manifest, theme.name) {
            Ok(build) => {
                print_report(&build.report, printer);
                report.merge(build.report);
            }
            Err(e) => {
                printer.error("Failed", &format!("theme '{}': {}", theme.name, e));
                failed += 1;
            }
        }
    }

    let tokens_dir = match &args.tokens_dir {
        Some(dir) => dir.clone(),
        None => manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| args.project.root.clone()),
    };
    let mut unused = Report::new();
    for path in unused_token_files(&args.project.root, &tokens_dir, &manifest, &manifest_path) {
        unused.push(
            Diagnostic::warning(
                "tokens::check::unused-file",
                format!("{} is not included by any theme", display_path(&path)),
            )
            .with_help("Add it to a theme in the manifest or delete it"),
        );
    }
    print_report(&unused, printer);
    report.merge(unused);

    let summary = summarize(&report);
    let failing = failed > 0 || report.has_errors() || (args.strict && report.has_warnings());

    if failing {
        let mut message = format!("check found problems ({})", summary);
        if failed > 0 {
            message.push_str(&format!("; {} failed", plural(failed, "theme", "themes")));
        }
        return Err(TokenError::Build {
            message,
            help: args
                .strict
                .then(|| "Warnings are errors with --strict".to_string()),
        });
    }

    printer.success(
        "Checked",
        &format!(
            "{} ({})",
            plural(manifest.themes.len(), "theme", "themes"),
            summary
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn args(root: &Path, strict: bool) -> CheckArgs {
        CheckArgs {
            project: ProjectArgs {
                manifest: PathBuf::from("tokens/manifest.json"),
                root: root.to_path_buf(),
            },
            strict,
            tokens_dir: None,
        }
    }

    #[test]
    fn test_clean_project_passes() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tokens/manifest.json", r#"{"themes": {"muka-light": ["tokens/base.json"]}}"#);
        write(dir.path(), "tokens/base.json", r##"{"color": {"bg": {"$value": "#fff"}}}"##);

        run(args(dir.path(), true), &Printer::quiet()).unwrap();
        assert!(!dir.path().join("styles").exists());
    }

    #[test]
    fn test_unused_file_fails_only_when_strict() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tokens/manifest.json", r#"{"themes": {"muka-light": ["tokens/base.json"]}}"#);
        write(dir.path(), "tokens/base.json", r##"{"color": {"bg": {"$value": "#fff"}}}"##);
        write(dir.path(), "tokens/orphan.json", r#"{}"#);

        run(args(dir.path(), false), &Printer::quiet()).unwrap();
        let err = run(args(dir.path(), true), &Printer::quiet()).unwrap_err();
        assert!(err.to_string().contains("1 warning"));
    }

    #[test]
    fn test_broken_reference_is_a_warning() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tokens/manifest.json", r#"{"themes": {"muka-light": ["tokens/base.json"]}}"#);
        write(dir.path(), "tokens/base.json", r#"{"color": {"fg": {"$value": "{color.missing}"}}}"#);

        run(args(dir.path(), false), &Printer::quiet()).unwrap();
        assert!(run(args(dir.path(), true), &Printer::quiet()).is_err());
    }

    #[test]
    fn test_failed_theme_fails_check() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tokens/manifest.json", r#"{"themes": {"muka-light": ["tokens/base.json"]}}"#);
        write(dir.path(), "tokens/base.json", r#"{"space": {"sm": 4}}"#);

        let err = run(args(dir.path(), false), &Printer::quiet()).unwrap_err();
        assert!(err.to_string().contains("1 theme failed"));
    }

    #[test]
    fn test_invalid_pattern_reports_failed_theme() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "tokens/manifest.json",
            r#"{"themes": {"muka-light": ["tokens/base.json"], "muka-broken": ["tokens/[.json"]}}"#,
        );
        write(dir.path(), "tokens/base.json", r##"{"color": {"bg": {"$value": "#fff"}}}"##);

        let err = run(args(dir.path(), false), &Printer::quiet()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("check found problems"));
        assert!(message.contains("1 theme failed"));
    }
}
