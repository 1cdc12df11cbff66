pub mod commands;
pub mod output;

pub use commands::{CliArgs, Commands, PlanArgs, ValidateArgs};
pub use output::{OutputFormat, OutputFormatter};
