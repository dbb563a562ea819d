//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::Commands;
use super::handlers::{handle_check, handle_components, CheckArgs};
use crate::exit::SeamExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<SeamExit> {
    match command {
        Commands::Check {
            root,
            config,
            since,
            json,
            output,
        } => handle_check(&CheckArgs {
            root,
            config,
            since,
            json,
            output,
        }),
        Commands::Components { root, config, json } => {
            handle_components(&root, config.as_deref(), json)
        }
    }
}
