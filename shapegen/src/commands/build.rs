use clap::Args;
use eyre::{Context, Result};

use super::{InputArgs, UnwrapOrExit};
use crate::ops;

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl BuildCommand {
    /// Run the build command
    pub fn run(&self) -> Result<()> {
        let inputs = ops::load(&self.input).unwrap_or_exit();
        let output = ops::compile(&inputs, self.input.serial);

        let json = if self.compact {
            serde_json::to_string(&output)
        } else {
            serde_json::to_string_pretty(&output)
        }
        .wrap_err("Failed to serialize the type model")?;
        println!("{}", json);

        for diag in output.diagnostics() {
            eprintln!("{}", diag);
        }
        if output.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
