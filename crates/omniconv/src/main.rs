//! Main entry point for omniconv
//!
//! This binary supports both CLI and GUI modes:
//! - CLI mode: when any argument is given
//! - GUI mode: when started without arguments

use anyhow::Result;
use omniconv_core::{Capabilities, LoggingDestination, init_logging, load_config};

fn main() -> Result<()> {
    if omniconv_cli::should_run_cli_mode() {
        if let Err(e) = init_logging(LoggingDestination::FileOnly) {
            eprintln!("Warning: logging disabled: {e}");
        }
        if let Err(e) = omniconv_cli::run() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Err(e) = init_logging(LoggingDestination::FileAndStderr) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let loaded = load_config();
    for warning in &loaded.warnings {
        eprintln!("Warning: {warning}");
    }

    let capabilities = Capabilities::probe(&loaded.config.tools);
    if let Some(banner) = capabilities.banner() {
        eprintln!("{banner}");
    }

    omniconv_gui::run(loaded.config, capabilities).map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
