//! Validate command implementation
//!
//! Checks a project record (and optional envelope) without generating anything.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use wavesmith_spec::{canonical_input_hash, validate_project, ProjectRequest, ValidationResult};

use super::json_output::{
    input_error_to_json, print_json, validation_error_to_json, validation_warning_to_json,
    ValidateOutput,
};
use crate::input::{load_optional_envelope, load_project};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(project_path: &str, envelope_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(project_path, envelope_path)
    } else {
        run_human(project_path, envelope_path)
    }
}

fn run_human(project_path: &str, envelope_path: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), project_path);

    let request = load_project(Path::new(project_path))
        .with_context(|| format!("Failed to load project file: {}", project_path))?;
    let envelope = load_optional_envelope(envelope_path).context("Failed to load envelope file")?;

    println!(
        "{} {} ({})",
        "Wave:".dimmed(),
        request.wave_type_display(),
        request.name
    );
    if let Some(env) = &envelope {
        println!(
            "{} {} positive / {} negative points",
            "Envelope:".dimmed(),
            env.positive.len(),
            env.negative.len()
        );
    }

    let result = validate_project(&request, envelope.as_ref());
    print_validation_results(&result);

    if result.is_ok() {
        if let Some(samples) = planned_samples(&request) {
            println!("{} {} samples", "Signal:".dimmed(), samples);
        }
        println!("\n{} Project is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Project has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(project_path: &str, envelope_path: Option<&str>) -> Result<ExitCode> {
    let loaded = load_project(Path::new(project_path))
        .and_then(|request| Ok((request, load_optional_envelope(envelope_path)?)));
    let (request, envelope) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            print_json(&ValidateOutput::failure(vec![input_error_to_json(&e)], vec![]))?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_project(&request, envelope.as_ref());
    let ok = result.is_ok();
    let input_hash = if ok {
        request
            .wave_spec()
            .ok()
            .and_then(|spec| canonical_input_hash(&spec, envelope.as_ref()).ok())
    } else {
        None
    };

    let output = ValidateOutput {
        success: ok,
        errors: result.errors.iter().map(validation_error_to_json).collect(),
        warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
        num_samples: if ok { planned_samples(&request) } else { None },
        input_hash,
    };
    print_json(&output)?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn planned_samples(request: &ProjectRequest) -> Option<u64> {
    request.wave_spec().ok().map(|spec| spec.total_samples())
}

fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
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
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
