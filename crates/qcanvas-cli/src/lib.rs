//! qcanvas command-line interface
//!
//! The `qcanvas` binary is a thin wrapper over this library: argument
//! parsing in [`cli`], settings in [`config`] and one module per subcommand
//! in [`commands`].

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands, Demo};
pub use config::{Config, ConfigError, OutputFormat};
