//! Headless front end: one subcommand per category over the shared batch workflow.

pub mod cli_args;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cli_args::{BatchArgs, Cli};
use omniconv_core::{
    BatchProgressCallback, BatchProgressEvent, BatchProgressEventKind, BatchReport, Capabilities,
    ConversionSettings, Converter, FileConfig, Session, load_config, run_batch_with_progress,
};
use tracing::{info, warn};

/// True when the process was started with any arguments.
pub fn should_run_cli_mode() -> bool {
    std::env::args_os().len() > 1
}

/// Parse the process arguments and run the requested command.
pub fn run() -> Result<(), String> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<(), String> {
    let load = load_config();
    for warning in &load.warnings {
        eprintln!("Warning: {warning}");
        warn!(%warning, "Configuration warning");
    }
    let capabilities = Capabilities::probe(&load.config.tools);
    execute(&cli, &load.config, &capabilities)
}

/// Run a parsed command against an already loaded configuration.
pub fn execute(cli: &Cli, config: &FileConfig, capabilities: &Capabilities) -> Result<(), String> {
    match (cli.command.settings(&config.defaults), cli.command.batch()) {
        (Some(settings), Some(batch)) => {
            let report = convert(&settings, batch, capabilities, cli.json)?;
            if cli.strict && report.failures > 0 {
                return Err(format!(
                    "{} of {} file(s) failed to convert.",
                    report.failures, report.total
                ));
            }
            Ok(())
        }
        _ => print_capabilities(capabilities, config, cli.json),
    }
}

fn convert(
    settings: &ConversionSettings,
    batch: &BatchArgs,
    capabilities: &Capabilities,
    json: bool,
) -> Result<BatchReport, String> {
    let category = settings.category();
    if !capabilities.category_available(category) {
        return Err(format!(
            "{} conversion is not available.\n{}",
            category.label(),
            capabilities.guidance_for(category)
        ));
    }

    let mut session = Session::new();
    session.open_category(category);
    session.select_files(batch.files.clone());
    let plan = session.prepare_batch(settings).map_err(|err| err.to_string())?;
    let destination = resolve_output_dir(&batch.output)?;

    info!(
        category = %category,
        files = plan.files.len(),
        target = plan.job.target_label(),
        "Starting CLI batch"
    );
    let converter = Converter::new(&plan.job, capabilities);
    let callback = (!json).then(progress_printer);
    let report = run_batch_with_progress(&converter, &plan.files, &destination, callback);

    println!("{}", render_report(&report, json)?);
    Ok(report)
}

/// Report text printed once a batch finishes.
pub fn render_report(report: &BatchReport, json: bool) -> Result<String, String> {
    if json {
        serde_json::to_string_pretty(report).map_err(|err| err.to_string())
    } else {
        Ok(report.summary())
    }
}

fn progress_printer() -> BatchProgressCallback {
    Arc::new(|event: BatchProgressEvent| match event.kind {
        BatchProgressEventKind::FileConverted | BatchProgressEventKind::FileFailed => {
            eprintln!("{}", event.message);
        }
        BatchProgressEventKind::Started
        | BatchProgressEventKind::FileStarted
        | BatchProgressEventKind::Finished => {}
    })
}

/// Expand `~` and require an existing directory.
pub fn resolve_output_dir(raw: &str) -> Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("No output directory given.".to_string());
    }
    let path = PathBuf::from(shellexpand::tilde(trimmed).to_string());
    if !path.is_dir() {
        return Err(format!(
            "Output directory {} does not exist.",
            path.display()
        ));
    }
    Ok(path)
}

fn print_capabilities(
    capabilities: &Capabilities,
    config: &FileConfig,
    json: bool,
) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(capabilities).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let ffmpeg = match &capabilities.ffmpeg {
        Some(path) => path.display().to_string(),
        None => format!("not found (tried {})", config.tools.ffmpeg_program().display()),
    };
    println!("PDF:    {}", yes_no(capabilities.pdf));
    println!("DOCX:   {}", yes_no(capabilities.docx));
    println!("FFmpeg: {ffmpeg}");
    if let Some(banner) = capabilities.banner() {
        print!("{banner}");
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "available" } else { "not built in" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_output_dir_is_rejected() {
        let err = resolve_output_dir("/no/such/omniconv/output").unwrap_err();
        assert!(err.contains("does not exist"));
        assert!(resolve_output_dir("   ").is_err());
    }

    #[test]
    fn existing_output_dir_is_accepted() {
        let temp = tempfile::tempdir().unwrap();
        let raw = temp.path().to_string_lossy().into_owned();
        assert_eq!(resolve_output_dir(&raw).unwrap(), temp.path());
    }
}
