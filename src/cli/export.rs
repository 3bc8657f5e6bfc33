//! Export command implementation.
//!
//! Writes the merged token JSON of one theme, for debugging manifests or
//! feeding other tools.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::build::{ensure_output_dir, export_theme, json_file_name, write_file};
use crate::discovery::DEFAULT_THEME;
use crate::error::{Result, TokenError};
use crate::output::{display_path, Printer};
use crate::validation::print_report;

use super::ProjectArgs;

/// Write a theme's merged token JSON
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Theme to export
    #[arg(long, short, env = "THEME", default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Substitute references before exporting
    #[arg(long)]
    pub resolved: bool,

    /// Output directory (default: the manifest's `output`)
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let manifest = args.project.load_manifest()?;
    // Unknown theme is fatal before anything is read.
    manifest.theme(&args.theme)?;

    printer.status("Exporting", &args.theme);
    let (value, report) = export_theme(&args.project.root, &manifest, &args.theme, args.resolved)?;
    print_report(&report, printer);

    let json = serde_json::to_string_pretty(&value).map_err(|e| TokenError::Build {
        message: format!("Failed to serialize theme '{}': {}", args.theme, e),
        help: None,
    })?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    let out_dir = args.project.output_dir(&manifest, args.output.as_deref());
    ensure_output_dir(&out_dir)?;
    let path = out_dir.join(json_file_name(&args.theme));
    write_file(&path, &format!("{}\n", json))?;
    printer.success("Wrote", &display_path(&path));

    Ok(())
}
