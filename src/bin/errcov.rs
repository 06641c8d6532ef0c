//! errcov: audit that every declared error operation has a covering test.
//!
//! ```bash
//! errcov check audit.toml
//! errcov check audit.toml --json
//! errcov -vv list audit.toml
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use errcov::{AuditManifest, AuditResult, CoverageStatus, ManifestError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "errcov",
    version,
    about = "Audit that every declared error operation has a covering test",
    long_about = "errcov reads an audit manifest listing error groups, ignore entries\n\
        and test-group coverage declarations, then reports every declared\n\
        operation that is neither covered nor exempted."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    /// Show the diagnostic stream (-v for debug, -vv for every audited operation)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the coverage audit
    Check(ManifestArgs),

    /// Validate a manifest without computing coverage
    Validate(ManifestArgs),

    /// List every declared operation with its coverage status
    List(ManifestArgs),
}

#[derive(Args, Debug)]
struct ManifestArgs {
    /// Path to the audit manifest (.toml or .json)
    manifest: PathBuf,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "errcov=debug",
        _ => "errcov=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn load(args: &ManifestArgs) -> Result<AuditManifest, String> {
    AuditManifest::load(&args.manifest).map_err(|e| manifest_error_message(&e))
}

fn manifest_error_message(err: &ManifestError) -> String {
    match err {
        ManifestError::Config(config) => format!("Invalid audit configuration: {config}"),
        other => other.to_string(),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn run(manifest: &AuditManifest) -> Result<AuditResult, String> {
    manifest
        .run()
        .map_err(|e| format!("Invalid audit configuration: {e}"))
}

#[allow(clippy::needless_pass_by_value)]
fn cmd_check(args: ManifestArgs, json: bool) -> Result<(), String> {
    let result = run(&load(&args)?)?;

    if json {
        println!("{}", pretty(&result.to_json()));
    } else {
        print!("{}", result.to_text());
    }

    result.ensure_passed().map_err(|gap| gap.to_string())
}

#[allow(clippy::needless_pass_by_value)]
fn cmd_validate(args: ManifestArgs, json: bool) -> Result<(), String> {
    let manifest = load(&args)?;
    let outcome = manifest.validate();

    if json {
        let report = serde_json::json!({
            "manifest": args.manifest.display().to_string(),
            "valid": outcome.is_ok(),
            "groups": manifest.groups.len(),
            "ignore": manifest.ignore.len(),
            "test_groups": manifest.test_groups.len(),
            "error": outcome.as_ref().err().map(ToString::to_string),
        });
        println!("{}", pretty(&report));
    } else if outcome.is_ok() {
        println!(
            "Manifest '{}' is valid ({} groups, {} ignore entries, {} test groups)",
            args.manifest.display(),
            manifest.groups.len(),
            manifest.ignore.len(),
            manifest.test_groups.len()
        );
    }

    outcome.map_err(|e| format!("Invalid audit configuration: {e}"))
}

fn format_listing(result: &AuditResult) -> String {
    result
        .entries()
        .iter()
        .map(|entry| {
            let marker = match entry.status {
                CoverageStatus::Covered => "+",
                CoverageStatus::Ignored => "~",
                CoverageStatus::Uncovered => "-",
            };
            format!("{marker} {} [{}]", entry.id, entry.status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[allow(clippy::needless_pass_by_value)]
fn cmd_list(args: ManifestArgs, json: bool) -> Result<(), String> {
    let result = run(&load(&args)?)?;

    if json {
        println!("{}", pretty(&result.to_json()["operations"]));
    } else if !result.entries().is_empty() {
        println!("{}", format_listing(&result));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => cmd_check(args, cli.json),
        Command::Validate(args) => cmd_validate(args, cli.json),
        Command::List(args) => cmd_list(args, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {msg}");
            ExitCode::FAILURE
        }
    }
}
