//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "calcdeck", version, about = "Keypad calculator with a formula explainer")]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one expression, e.g. `sin(90)`, `2^10` or `6 ÷ 4`
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Copy a successful result to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Read key presses from stdin, one line at a time
    Keypad,
    /// Ask the AI model what a formula does
    Explain {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        formula: Vec<String>,
    },
    /// Print the effective configuration
    Config,
}
