//! CLI entrypoint for odbc-detour tooling.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use odbc_detour_core::catalog::{CATALOG, ReturnClass};
use odbc_detour_core::info;

/// Driver probing and trace validation for odbc-detour.
#[derive(Debug, Parser)]
#[command(name = "odbc-detour-harness")]
#[command(about = "Inspect target drivers and trace files for the odbc-detour shim")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a driver and report which catalog entry points it exports.
    Probe {
        /// Path of the driver shared library.
        #[arg(long)]
        driver: PathBuf,
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Fail unless every catalog entry point resolves.
        #[arg(long)]
        require_complete: bool,
    },
    /// Validate a JSONL trace file.
    ValidateTrace {
        /// Trace file written with `ODBC_DETOUR_TRACE_FORMAT=jsonl`.
        #[arg(long)]
        log: PathBuf,
        /// Output JSON report path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the intercepted entry points and their fallback values.
    Catalog,
    /// Describe a `SQLGetInfo` information type.
    InfoType {
        /// Numeric information type.
        code: u16,
    },
}

fn emit<T: serde::Serialize>(
    report: &T,
    output: Option<&Path>,
) -> Result<(), odbc_detour_harness::HarnessError> {
    match output {
        Some(path) => odbc_detour_harness::write_json(report, path),
        None => {
            println!("{}", odbc_detour_harness::to_json(report)?);
            Ok(())
        }
    }
}

#[cfg(unix)]
fn probe(path: &Path) -> odbc_detour_harness::ProbeReport {
    odbc_detour_harness::probe_driver(path)
}

#[cfg(not(unix))]
fn probe(path: &Path) -> odbc_detour_harness::ProbeReport {
    odbc_detour_harness::ProbeReport {
        driver: path.display().to_string(),
        loaded: false,
        error: Some("driver probing is only supported on unix targets".to_string()),
        catalog_size: CATALOG.len(),
        resolved: Vec::new(),
        missing: Vec::new(),
        unload_error: None,
        trace: Vec::new(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Probe {
            driver,
            output,
            require_complete,
        } => {
            eprintln!("Probing {}", driver.display());
            let report = probe(&driver);
            emit(&report, output.as_deref())?;
            if let Some(err) = &report.error {
                return Err(err.clone().into());
            }
            eprintln!(
                "{} of {} entry points resolved",
                report.resolved.len(),
                report.catalog_size
            );
            if require_complete && !report.complete() {
                return Err(format!("{} entry points missing", report.missing.len()).into());
            }
        }
        Command::ValidateTrace { log, output } => {
            let report = odbc_detour_harness::check_trace_file(&log)?;
            emit(&report, output.as_deref())?;
            if !report.ok {
                return Err(format!(
                    "{}: {} trace violations",
                    log.display(),
                    report.violations.len()
                )
                .into());
            }
        }
        Command::Catalog => {
            for spec in &CATALOG {
                let fallback = match spec.class {
                    ReturnClass::Status => "SQL_ERROR",
                    ReturnClass::Bool => "FALSE",
                };
                println!("{:<24} {fallback}", spec.name);
            }
        }
        Command::InfoType { code } => match info::lookup(code) {
            Some(def) => println!("{} = {}, default {}", def.name, def.code, def.value.render()),
            None => return Err(info::describe_query_code(code).into_owned().into()),
        },
    }

    Ok(())
}
