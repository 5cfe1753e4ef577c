//! Process command implementation
//!
//! Validates a project, runs it through the pipeline and writes the WAV and
//! PNG artifacts into the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use wavesmith_pipeline::{FsArtifactStore, Pipeline, PipelineConfig, ProcessingOutcome};
use wavesmith_spec::{validate_project, Envelope, ProjectRequest};

use super::json_output::{
    input_error_to_json, print_json, validation_error_to_json, LoadFailureOutput,
};
use crate::input::{load_config, load_optional_envelope, load_project, resolve_out_root, OUT_ROOT_ENV};

/// Arguments of `wavesmith process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessArgs<'a> {
    /// Path to the project JSON file.
    pub project: &'a str,
    /// Path to an optional envelope JSON file.
    pub envelope: Option<&'a str>,
    /// Output directory; falls back to `$WAVESMITH_OUT_ROOT`, then `wavesmith-out`.
    pub out_root: Option<&'a str>,
    /// Path to an optional pipeline config JSON file.
    pub config: Option<&'a str>,
}

/// Run the process command
///
/// # Returns
/// Exit code: 0 if both artifacts were committed, 1 otherwise
pub fn run(args: &ProcessArgs<'_>, json_output: bool) -> Result<ExitCode> {
    let out_root = resolve_out_root(args.out_root, std::env::var(OUT_ROOT_ENV).ok());
    debug!(out_root = %out_root.display(), "resolved output directory");
    if json_output {
        run_json(args, &out_root)
    } else {
        run_human(args, &out_root)
    }
}

fn execute(
    config: PipelineConfig,
    out_root: &Path,
    request: &ProjectRequest,
    envelope: Option<&Envelope>,
) -> ProcessingOutcome {
    let pipeline = Pipeline::new(config, FsArtifactStore::new(out_root));
    pipeline.run_project(request, envelope)
}

fn run_human(args: &ProcessArgs<'_>, out_root: &Path) -> Result<ExitCode> {
    println!("{} {}", "Processing:".cyan().bold(), args.project);

    let request = load_project(Path::new(args.project))
        .with_context(|| format!("Failed to load project file: {}", args.project))?;
    let envelope = load_optional_envelope(args.envelope).context("Failed to load envelope file")?;
    let config = load_config(args.config).context("Failed to load pipeline config")?;

    let validation = validate_project(&request, envelope.as_ref());
    for warning in &validation.warnings {
        println!("  {} [{}]: {}", "!".yellow(), warning.code.to_string().yellow(), warning.message);
    }
    if !validation.is_ok() {
        for error in &validation.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
        println!(
            "\n{} Project has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    println!("{} {}", "Output:".dimmed(), out_root.display());
    let outcome = execute(config, out_root, &request, envelope.as_ref());

    for timing in &outcome.timings {
        println!("  {:<18} {:>8.2}ms", timing.stage.as_str().dimmed(), timing.duration_ms);
    }

    match (&outcome.artifacts, &outcome.error) {
        (Some(artifacts), _) => {
            println!("\n{}", artifacts.description);
            println!("{} {}", "Audio:".dimmed(), artifacts.audio.location);
            println!("{} {}", "Drawing:".dimmed(), artifacts.drawing.location);
            if let Some(comparison) = &artifacts.comparison {
                println!("{} {}", "Envelope:".dimmed(), comparison.summary());
            }
            println!(
                "\n{} {} ({:.2}ms)",
                "SUCCESS".green().bold(),
                outcome.message,
                outcome.total_ms()
            );
            Ok(ExitCode::SUCCESS)
        }
        (None, Some(error)) => {
            println!(
                "\n{} {} [{}]: {}",
                "FAILED".red().bold(),
                error.stage,
                error.code.red(),
                error.detail
            );
            Ok(ExitCode::from(1))
        }
        (None, None) => {
            println!("\n{} {}", "FAILED".red().bold(), outcome.message);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(args: &ProcessArgs<'_>, out_root: &Path) -> Result<ExitCode> {
    let loaded = load_project(Path::new(args.project)).and_then(|request| {
        let envelope = load_optional_envelope(args.envelope)?;
        let config = load_config(args.config)?;
        Ok((request, envelope, config))
    });
    let (request, envelope, config) = match loaded {
        Ok(inputs) => inputs,
        Err(e) => {
            print_json(&LoadFailureOutput::new(vec![input_error_to_json(&e)]))?;
            return Ok(ExitCode::from(1));
        }
    };

    let validation = validate_project(&request, envelope.as_ref());
    if !validation.is_ok() {
        let errors = validation.errors.iter().map(validation_error_to_json).collect();
        print_json(&LoadFailureOutput::new(errors))?;
        return Ok(ExitCode::from(1));
    }

    let outcome = execute(config, out_root, &request, envelope.as_ref());
    print_json(&outcome)?;

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
