//! Wavesmith CLI - generate, draw and compare waveforms from project files.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use wavesmith_cli::commands;
use wavesmith_cli::commands::process::ProcessArgs;
use wavesmith_cli::logging;

/// Wavesmith - waveform synthesis and visualization
#[derive(Parser)]
#[command(name = "wavesmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a WAV file and a waveform drawing from a project file
    Process {
        /// Path to the project JSON file
        #[arg(short, long)]
        project: String,

        /// Path to an envelope JSON file ({"positive": [...], "negative": [...]})
        #[arg(short, long)]
        envelope: Option<String>,

        /// Output directory (default: $WAVESMITH_OUT_ROOT or ./wavesmith-out)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Path to a pipeline config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a project file without generating anything
    Validate {
        /// Path to the project JSON file
        #[arg(short, long)]
        project: String,

        /// Path to an envelope JSON file
        #[arg(short, long)]
        envelope: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compare two WAV files sample by sample
    Compare {
        /// Base WAV file
        #[arg(short, long)]
        a: String,

        /// Modified WAV file
        #[arg(short, long)]
        b: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            project,
            envelope,
            out_root,
            config,
            json,
        } => {
            let args = ProcessArgs {
                project: &project,
                envelope: envelope.as_deref(),
                out_root: out_root.as_deref(),
                config: config.as_deref(),
            };
            commands::process::run(&args, json)
        }
        Commands::Validate {
            project,
            envelope,
            json,
        } => commands::validate::run(&project, envelope.as_deref(), json),
        Commands::Compare { a, b, json } => commands::compare::run(&a, &b, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_process() {
        let cli = Cli::try_parse_from([
            "wavesmith",
            "process",
            "--project",
            "p.json",
            "--envelope",
            "e.json",
            "--out-root",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Process {
                project,
                envelope,
                out_root,
                config,
                json,
            } => {
                assert_eq!(project, "p.json");
                assert_eq!(envelope.as_deref(), Some("e.json"));
                assert_eq!(out_root.as_deref(), Some("out"));
                assert!(config.is_none());
                assert!(!json);
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_cli_parses_validate_json_with_verbosity() {
        let cli =
            Cli::try_parse_from(["wavesmith", "-vv", "validate", "-p", "p.json", "--json"]).unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate {
                project,
                envelope,
                json,
            } => {
                assert_eq!(project, "p.json");
                assert!(envelope.is_none());
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_parses_compare() {
        let cli = Cli::try_parse_from(["wavesmith", "compare", "-a", "x.wav", "-b", "y.wav", "-v"])
            .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Compare { a, b, json } => {
                assert_eq!(a, "x.wav");
                assert_eq!(b, "y.wav");
                assert!(!json);
            }
            _ => panic!("expected compare command"),
        }
    }

    #[test]
    fn test_cli_requires_project() {
        assert!(Cli::try_parse_from(["wavesmith", "process"]).is_err());
        assert!(Cli::try_parse_from(["wavesmith", "compare", "-a", "x.wav"]).is_err());
    }
}
