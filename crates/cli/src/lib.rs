//! Command-line front end for the stockroom: argument parsing and command
//! execution over a file-backed [`stockroom_infra::Warehouse`].

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{run, run_and_flush};
