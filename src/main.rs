mod cli;
mod commands;
mod page_range;
mod pdf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { path, json } => {
            commands::info::run(&path, json)?;
        }
        Commands::Split {
            path,
            ranges,
            ranges_file,
            output_dir,
            yes,
            dry_run,
            json,
        } => {
            let ranges_text = match &ranges_file {
                Some(file) => std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read ranges from {}", file.display()))?,
                None => ranges.join("\n"),
            };
            let options = commands::split::SplitOptions {
                ranges_text,
                output_dir,
                assume_yes: yes,
                dry_run,
                json,
            };
            commands::split::run(&path, &options)?;
        }
        Commands::Chunk {
            path,
            pages_per_part,
            output_dir,
        } => {
            commands::chunk::run(&path, pages_per_part, &output_dir)?;
        }
        Commands::Merge { inputs, output } => {
            commands::merge::run(&inputs, &output)?;
        }
    }

    Ok(())
}
