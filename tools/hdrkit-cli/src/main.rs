//! hdrkit Command Line Interface
//!
//! Inspect, query and convert tagged binary headers.

mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hdrkit_core::Preamble;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::{convert, dump, get, info, InputOptions};
use crate::config::TagNames;
use crate::error::Result;

/// hdrkit Command Line Interface
///
/// Reads headers in wire format (big-endian, optionally with the magic
/// preamble) or as host-order blobs.
#[derive(Parser, Debug)]
#[command(name = "hdrkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", env = "HDRKIT_FORMAT", global = true)]
    pub format: OutputFormat,

    /// TOML file mapping tag numbers to names
    #[arg(short, long, env = "HDRKIT_TAGS", global = true)]
    pub tags: Option<PathBuf>,

    /// Log codec activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Input files are host-order blobs rather than wire headers
    #[arg(long, global = true)]
    pub blob: bool,

    /// Input wire headers have no magic preamble
    #[arg(long, global = true, conflicts_with = "blob")]
    pub no_magic: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    Table,
    /// JSON format
    Json,
    /// Compact tab-separated format
    Compact,
}

/// Encodings a header can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetFormat {
    /// Portable big-endian wire format
    Wire,
    /// Host-order blob
    Blob,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show entry count, payload size and encoded sizes
    Info {
        /// Header file
        file: PathBuf,
    },

    /// Print the index of a header
    Dump {
        /// Header file
        file: PathBuf,

        /// Also print every entry's values
        #[arg(short, long)]
        inline: bool,
    },

    /// Print the value stored under one tag
    Get {
        /// Header file
        file: PathBuf,

        /// Tag number
        #[arg(allow_negative_numbers = true)]
        tag: i32,
    },

    /// Re-encode a header in canonical form
    Convert {
        /// Header file to read
        input: PathBuf,

        /// File to write
        output: PathBuf,

        /// Encoding to write
        #[arg(long, value_enum, default_value = "wire")]
        to: TargetFormat,

        /// Prefix wire output with the magic preamble
        #[arg(long)]
        magic: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = InputOptions {
        blob: cli.blob,
        preamble: if cli.no_magic { Preamble::Bare } else { Preamble::WithMagic },
    };
    let names = match &cli.tags {
        Some(path) => TagNames::load(path)?,
        None => TagNames::default(),
    };

    match cli.command {
        Commands::Info { file } => info::run(&file, &input, cli.format),
        Commands::Dump { file, inline } => dump::run(&file, &input, &names, inline, cli.format),
        Commands::Get { file, tag } => get::run(&file, &input, &names, tag, cli.format),
        Commands::Convert { input: source, output, to, magic } => {
            convert::run(&source, &input, &output, to, magic)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder().with_default_directive(level.into()).from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
