//! qcanvas Command-Line Interface
//!
//! The main entry point for the qcanvas CLI tool.
//!
//! ```text
//!   q0 ─[H]──●──────
//!            │
//!   q1 ──────⊕──[Rz]
//! ```

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qcanvas_cli::commands::{info, new, run, version};
use qcanvas_cli::{Cli, Commands, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            columns,
            format,
            states,
        } => run::execute(&input, columns, format, states, &config),

        Commands::Info { input } => info::execute(&input, &config),

        Commands::New {
            demo,
            output,
            wires,
        } => new::execute(demo, &output, wires, &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
