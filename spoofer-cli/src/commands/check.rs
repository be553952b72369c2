// spoofer-cli/src/commands/check.rs
//
// Verifies the ffmpeg precondition without exporting anything.

use crate::cli::GlobalArgs;
use crate::error::CliResult;
use crate::terminal;
use spoofer_core::SUPPORTED_EXTENSIONS;
use spoofer_core::external::{SidecarSpawner, check_dependency};

/// Runs the `check` command.
pub fn run_check(global: &GlobalArgs) -> CliResult<()> {
    let mut spawner = SidecarSpawner::new();
    if let Some(path) = &global.ffmpeg {
        spawner = spawner.with_ffmpeg_path(path.clone());
    }

    terminal::print_section("Dependency check");
    terminal::print_processing(&format!("{} -version", spawner.ffmpeg_path().display()));
    check_dependency(spawner.ffmpeg_path())?;
    terminal::print_success(&format!("ffmpeg found: {}", spawner.ffmpeg_path().display()));
    terminal::print_status("Inputs", SUPPORTED_EXTENSIONS.join(", "));
    Ok(())
}
