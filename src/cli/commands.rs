//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Content-type driven body decoder
#[derive(Parser, Debug)]
#[command(name = "body-dispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Decoder limits file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a body and print the result as JSON
    Decode {
        /// Content-Type header value, parameters included
        #[arg(short = 't', long)]
        content_type: String,

        /// Body file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List content types with a registered decoder
    Types,
}
