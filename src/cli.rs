use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfpart")]
#[command(about = "Split and merge PDF documents by page range")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display document metadata and size
    Info {
        /// PDF file to inspect
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a PDF into one output per page range
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Page ranges, one per argument (e.g. "1-3" "4-10")
        #[arg(required_unless_present = "ranges_file")]
        ranges: Vec<String>,

        /// Read ranges from a file instead, one <start>-<end> per line
        #[arg(short = 'f', long, conflicts_with = "ranges")]
        ranges_file: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Keep going past duplicate/missing-page warnings without asking
        #[arg(short = 'y', long)]
        yes: bool,

        /// Show the plan without writing anything
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, print the plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,
    },

    /// Split a PDF into parts of a fixed number of pages
    #[command(alias = "burst")]
    Chunk {
        /// PDF file to split
        path: PathBuf,

        /// Pages per part
        #[arg(short = 'n', long, default_value_t = 1)]
        pages_per_part: u32,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
