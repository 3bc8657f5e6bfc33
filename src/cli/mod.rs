pub mod build;
pub mod check;
pub mod completions;
pub mod export;
pub mod list;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::discovery::{Manifest, MANIFEST_PATH};
use crate::error::Result;

/// muka-tokens - design token compiler
#[derive(Parser, Debug)]
#[command(name = "muka-tokens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Defaults to `build` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a CSS file for every theme in the manifest
    Build(build::BuildArgs),

    /// Write a theme's merged token JSON
    Export(export::ExportArgs),

    /// List themes, their selectors and sources
    List(list::ListArgs),

    /// Build every theme in memory and report problems
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Build(build::BuildArgs::default())
    }
}

/// Manifest location shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Theme manifest (JSON, or YAML by extension)
    #[arg(long, short, default_value = MANIFEST_PATH)]
    pub manifest: PathBuf,

    /// Project root that manifest patterns are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl Default for ProjectArgs {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(MANIFEST_PATH),
            root: PathBuf::from("."),
        }
    }
}

impl ProjectArgs {
    /// The manifest path, relative paths taken from the project root.
    pub fn manifest_path(&self) -> PathBuf {
        if self.manifest.is_absolute() {
            self.manifest.clone()
        } else {
            self.root.join(&self.manifest)
        }
    }

    pub fn load_manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.manifest_path())
    }

    /// Output directory: the override if given, else the manifest's.
    pub fn output_dir(&self, manifest: &Manifest, output: Option<&Path>) -> PathBuf {
        match output {
            Some(dir) => dir.to_path_buf(),
            None => self.root.join(&manifest.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_build() {
        let cli = Cli::try_parse_from(["muka-tokens"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Commands::Build(_)));
    }

    #[test]
    fn test_manifest_path_is_rooted() {
        let args = ProjectArgs {
            manifest: PathBuf::from("tokens/manifest.json"),
            root: PathBuf::from("/project"),
        };
        assert_eq!(args.manifest_path(), PathBuf::from("/project/tokens/manifest.json"));
    }

    #[test]
    fn test_output_dir_override() {
        let manifest = Manifest::parse(r#"{"themes": {"demo": []}, "output": "src/styles"}"#).unwrap();
        let args = ProjectArgs {
            manifest: PathBuf::from("m.json"),
            root: PathBuf::from("/project"),
        };
        assert_eq!(args.output_dir(&manifest, None), PathBuf::from("/project/src/styles"));
        assert_eq!(
            args.output_dir(&manifest, Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
    }
}
