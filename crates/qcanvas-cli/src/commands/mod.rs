//! CLI command implementations.

pub mod common;
pub mod info;
pub mod new;
pub mod run;
pub mod version;
