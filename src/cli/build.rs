//! Build command implementation.
//!
//! Builds every theme (or the selected ones) and writes one
//! `tokens-<theme>.css` per theme.

use std::path::PathBuf;

use clap::Args;

use crate::build::build_all;
use crate::error::Result;
use crate::output::{display_path, Printer};

use super::ProjectArgs;

/// Build a CSS file for every theme in the manifest
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only build these themes (repeatable)
    #[arg(long, short)]
    pub theme: Vec<String>,

    /// Output directory (default: the manifest's `output`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let manifest = args.project.load_manifest()?;
    let out_dir = args.project.output_dir(&manifest, args.output.as_deref());

    printer.info("Manifest", &display_path(&args.project.manifest_path()));

    // Individual theme failures are reported inside and do not change the exit code.
    build_all(&args.project.root, &manifest, &args.theme, &out_dir, printer)?;

    Ok(())
}
