//! Command implementations for the Tucson processor CLI
//!
//! Each command is implemented in its own module. Commands return a
//! [`CommandStatus`] that `main` turns into the process exit code.

pub mod convert;
pub mod inspect;
pub mod shared;
pub mod validate;

pub use shared::CommandStatus;

use crate::cli::args::{Args, Commands};

/// Main command runner for the Tucson processor
///
/// This function dispatches to the appropriate subcommand handler:
/// - `inspect`: Dialect, series table and diagnostics for one file
/// - `convert`: Parse one file and export it as Parquet or CSV
/// - `validate`: Check many files and report per-file verdicts
pub fn run(args: Args) -> anyhow::Result<CommandStatus> {
    shared::setup_logging(&args)?;

    let show_progress = args.show_progress();
    match args.command {
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(&inspect_args),
        Some(Commands::Convert(convert_args)) => {
            convert::run_convert(&convert_args, show_progress)
        }
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(&validate_args, show_progress)
        }
        None => anyhow::bail!("No command given (try `tucson --help`)"),
    }
}
