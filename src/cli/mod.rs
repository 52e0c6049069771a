pub mod effects;
pub mod output;
mod screens;
mod shell;

pub use shell::{run_cli, CliMode, ShellIo, SCRIPT_ENV};
