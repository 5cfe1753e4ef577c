//! Compare command implementation
//!
//! Decodes two WAV files and measures how far the second diverges from the first.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;
use wavesmith_backend_audio::analysis::{compare, ComparisonResult};
use wavesmith_backend_audio::wav::{decode, DecodedWav};
use wavesmith_spec::blake3_hash;

use super::json_output::{
    error_codes, print_json, CompareOutput, JsonError, JsonWarning, WavFileInfo,
};

/// Run the compare command
///
/// # Arguments
/// * `path_a` - Base WAV file
/// * `path_b` - Modified WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if both files decode and compare, 1 otherwise
pub fn run(path_a: &str, path_b: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(path_a, path_b)
    } else {
        run_human(path_a, path_b)
    }
}

/// A WAV file read and decoded from disk.
struct LoadedWav {
    info: WavFileInfo,
    decoded: DecodedWav,
}

enum LoadFailure {
    Read(std::io::Error),
    Decode(String),
}

fn load_wav(path: &str) -> Result<LoadedWav, LoadFailure> {
    let bytes = fs::read(path).map_err(LoadFailure::Read)?;
    let decoded = decode(&bytes).map_err(|e| LoadFailure::Decode(e.to_string()))?;
    let info = WavFileInfo {
        path: path.to_string(),
        hash: blake3_hash(&bytes),
        sample_rate: decoded.sample_rate,
        channels: decoded.channels,
        bits_per_sample: decoded.bits_per_sample,
        num_samples: decoded.signal.len(),
    };
    Ok(LoadedWav { info, decoded })
}

fn sample_rate_warning(a: &WavFileInfo, b: &WavFileInfo) -> Option<String> {
    (a.sample_rate != b.sample_rate).then(|| {
        format!(
            "sample rates differ ({} Hz vs {} Hz); samples are compared by index",
            a.sample_rate, b.sample_rate
        )
    })
}

fn run_human(path_a: &str, path_b: &str) -> Result<ExitCode> {
    println!("{} {} vs {}", "Comparing:".cyan().bold(), path_a, path_b);

    let a = load_human(path_a)?;
    let b = load_human(path_b)?;

    for wav in [&a, &b] {
        println!(
            "{} {} Hz, {} ch, {}-bit, {} samples ({:.3}s) {}",
            "Input:".dimmed(),
            wav.info.sample_rate,
            wav.info.channels,
            wav.info.bits_per_sample,
            wav.info.num_samples,
            wav.decoded.duration_seconds(),
            wav.info.hash[..16].dimmed()
        );
    }
    if let Some(warning) = sample_rate_warning(&a.info, &b.info) {
        println!("  {} {}", "!".yellow(), warning);
    }

    match compare(&a.decoded.signal, &b.decoded.signal) {
        Ok(result) => {
            print_metrics(&result);
            println!("\n{} {}", "SUCCESS".green().bold(), result.summary());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            Ok(ExitCode::from(1))
        }
    }
}

fn load_human(path: &str) -> Result<LoadedWav> {
    match load_wav(path) {
        Ok(wav) => Ok(wav),
        Err(LoadFailure::Read(e)) => {
            Err(e).with_context(|| format!("Failed to read WAV file: {}", path))
        }
        Err(LoadFailure::Decode(msg)) => {
            Err(anyhow::anyhow!(msg)).with_context(|| format!("Failed to decode WAV file: {}", path))
        }
    }
}

fn print_metrics(result: &ComparisonResult) {
    let opt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v));
    println!("\n{}", "Metrics:".bold());
    println!("  {:<20} {:.4}", "relative divergence", result.relative_divergence);
    println!("  {:<20} {:.4}", "mean abs diff", result.mean_abs_diff);
    println!("  {:<20} {:.4}", "max abs diff", result.max_abs_diff);
    println!("  {:<20} {:.4}", "rms diff", result.rms_diff);
    println!("  {:<20} {}", "correlation", opt(result.correlation));
    println!("  {:<20} {}", "energy ratio", opt(result.energy_ratio));
}

fn run_json(path_a: &str, path_b: &str) -> Result<ExitCode> {
    let mut errors = Vec::new();
    let mut loaded = Vec::with_capacity(2);
    for path in [path_a, path_b] {
        match load_wav(path) {
            Ok(wav) => loaded.push(wav),
            Err(LoadFailure::Read(e)) => errors.push(
                JsonError::new(error_codes::FILE_READ, format!("failed to read: {}", e)).with_file(path),
            ),
            Err(LoadFailure::Decode(msg)) => {
                errors.push(JsonError::new(error_codes::WAV_DECODE, msg).with_file(path))
            }
        }
    }

    let (a, b) = match (loaded.pop(), loaded.pop(), errors.is_empty()) {
        (Some(b), Some(a), true) => (a, b),
        _ => {
            print_json(&CompareOutput::failure(errors))?;
            return Ok(ExitCode::from(1));
        }
    };

    let warnings: Vec<JsonWarning> = sample_rate_warning(&a.info, &b.info)
        .map(|message| JsonWarning {
            code: "CLI_W001".to_string(),
            message,
            path: None,
        })
        .into_iter()
        .collect();

    let (result, errors) = match compare(&a.decoded.signal, &b.decoded.signal) {
        Ok(result) => (Some(result), Vec::new()),
        Err(e) => (None, vec![JsonError::new(error_codes::COMPARE, e.to_string())]),
    };
    let success = result.is_some();
    print_json(&CompareOutput {
        success,
        errors,
        warnings,
        a: Some(a.info),
        b: Some(b.info),
        result,
    })?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
