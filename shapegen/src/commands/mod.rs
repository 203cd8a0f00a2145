mod build;
mod check;

use std::path::PathBuf;

use build::BuildCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for shapegen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "shapegen")]
#[command(version)]
#[command(about = "Compile GraphQL IR documents into a structural type model")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Build(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the IR and report generated types and failures
    Check(CheckCommand),

    /// Compile the IR and print the type model as JSON
    Build(BuildCommand),
}

/// Inputs shared by every compiling command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the IR document
    #[arg(long)]
    pub ir: PathBuf,

    /// Path to shapegen.toml (defaults to ./shapegen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base package for fragments and types when none is configured
    #[arg(short, long)]
    pub package: Option<String>,

    /// Build units one after another instead of in parallel
    #[arg(long)]
    pub serial: bool,
}
