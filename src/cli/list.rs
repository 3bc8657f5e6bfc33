//! List command implementation.

use std::io::Write;

use clap::Args;
use serde_json::json;

use crate::error::Result;
use crate::output::Printer;

use super::ProjectArgs;

/// List themes, their selectors and sources
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the theme list as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let manifest = args.project.load_manifest()?;

    if args.json {
        let themes: Vec<_> = manifest
            .themes()
            .map(|theme| {
                json!({
                    "name": theme.name,
                    "selector": theme.target.selector(),
                    "default": theme.is_default,
                    "sources": theme.sources,
                })
            })
            .collect();
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", serde_json::Value::Array(themes))?;
        return Ok(());
    }

    for theme in manifest.themes() {
        let mut selector = theme.target.selector();
        if theme.is_default {
            selector.push_str(" (default)");
        }
        printer.info(theme.name, &printer.dim(&selector));
        for source in theme.sources {
            println!("    {}", source);
        }
    }

    Ok(())
}
