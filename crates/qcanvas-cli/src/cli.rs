//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::OutputFormat;

/// qcanvas - quantum circuit state-vector simulator
#[derive(Debug, Parser)]
#[command(name = "qcanvas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Simulate a circuit document and report per-column results
    Run {
        /// Input circuit document (XML)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of columns to report (defaults to the configured display width)
        #[arg(short, long)]
        columns: Option<usize>,

        /// Report format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Include the full state vector for each column
        #[arg(long)]
        states: bool,
    },

    /// Describe a circuit document
    Info {
        /// Input circuit document (XML)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a demo circuit document
    New {
        /// Circuit to generate
        #[arg(value_enum)]
        demo: Demo,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of wires (GHZ only)
        #[arg(short, long)]
        wires: Option<usize>,
    },

    /// Show version information
    Version,
}

/// Demo circuits for `qcanvas new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// H then CNOT on two wires
    Bell,
    /// H then a CNOT ladder
    Ghz,
    /// Both controls set, then CCNOT
    Toffoli,
}
