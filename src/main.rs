use clap::Parser;
use miette::Result;
use muka_tokens::cli::{Cli, Commands};
use muka_tokens::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = if cli.quiet { Printer::quiet() } else { Printer::new() };

    match cli.command.unwrap_or_default() {
        Commands::Build(args) => muka_tokens::cli::build::run(args, &printer)?,
        Commands::Export(args) => muka_tokens::cli::export::run(args, &printer)?,
        Commands::List(args) => muka_tokens::cli::list::run(args, &printer)?,
        Commands::Check(args) => muka_tokens::cli::check::run(args, &printer)?,
        Commands::Completions(args) => muka_tokens::cli::completions::run(args)?,
    }

    Ok(())
}
