//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::{Parser, Subcommand};
use encryd_core::operations::Operation;

/// Command-line arguments for the encryd CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use encryd_cli::cli_args::Args;
///
/// let args = Args::parse_from(["encryd", "encrypt", "notes.txt", "notes.bin"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the settings YAML.
    ///
    /// If not provided, defaults to `~/.encryd/settings.yml`, which may be absent.
    #[arg(long, short = 'c', global = true)]
    pub settings_path: Option<String>,

    /// Stop the external program after this many seconds.
    ///
    /// Overrides `timeout_secs` from the settings.
    #[arg(long, short = 't', global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Encrypt INPUT into OUTPUT (`.bin` is appended when missing).
    Encrypt(Files),

    /// Decrypt INPUT into OUTPUT.
    Decrypt(Files),

    /// Build the encryptor and decryptor binaries.
    Build,

    /// Print the effective settings and where the binaries are expected.
    Settings,
}

impl Action {
    /// The panel operation this action drives, if it runs anything.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Action::Encrypt(_) => Some(Operation::Encrypt),
            Action::Decrypt(_) => Some(Operation::Decrypt),
            Action::Build => Some(Operation::Build),
            Action::Settings => None,
        }
    }
}

#[derive(clap::Args, Debug, PartialEq, Eq)]
pub struct Files {
    /// File to read.
    pub input: String,

    /// File to write.
    pub output: String,

    /// Read the password as one line of standard input instead of prompting for it.
    #[arg(long, action)]
    pub password_stdin: bool,
}
