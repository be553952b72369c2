// spoofer-cli/src/lib.rs
//
// Library portion of the Spoofer CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ExportArgs, GlobalArgs};
pub use commands::check::run_check;
pub use commands::export::run_export;
pub use error::{CliErrorContext, CliResult};
