//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` implementation producing a serializable result
//! - An `Outputable` implementation for that result

mod inspect;
mod make;

pub use inspect::InspectCmd;
pub use make::MakeCmd;

use clap::Subcommand;
use std::error::Error;

use crate::config::Project;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, project: &Project) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate model, migration, controller, views and routes for a model
    Make(MakeCmd),

    /// Show how field declarations resolve to columns, rules and form controls
    Inspect(InspectCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, project: &Project, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Make(cmd) => {
                let result = cmd.execute(project)?;
                Ok(result.format(format))
            }
            Command::Inspect(cmd) => {
                let result = cmd.execute(project)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().unwrap_or(&String::new())).into())
            }
        }
    }
}
