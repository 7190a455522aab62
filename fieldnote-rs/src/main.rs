//! Fieldnote CLI entry point.

use clap::Parser;
use fieldnote::cli::args::{Cli, Commands};
use fieldnote::cli::output::Output;
use fieldnote::cli::{find, list, properties, schema};
use fieldnote::config::Config;
use fieldnote::error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::List(args) => {
            let roots = config.resolve_roots(&args.roots)?;
            let mut excludes = config.excludes.clone();
            excludes.extend(args.excludes.iter().cloned());
            list::run(roots, excludes, !args.no_recursive, args.long, &output)
        }
        Commands::GetProperties(args) => properties::get(args, &output),
        Commands::AddProperty(args) => properties::add(args, &output),
        Commands::RemoveProperty(args) => properties::remove(args, &output),
        Commands::ReorderProperties(args) => properties::reorder(args, &output),
        Commands::FindInBody(args) => find::run(args, &output),
        Commands::Schema(args) => schema::run(args, &output),
    }
}
