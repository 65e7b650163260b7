//! # odbc-detour-harness
//!
//! Offline tooling for the odbc-detour shim. Nothing here runs inside a host
//! process; it loads drivers and reads trace files from the outside.
//!
//! - [`probe`]: load a candidate driver and report which catalog entry
//!   points it exports
//! - [`trace_check`]: validate a JSONL trace file written by the shim
//! - [`output`]: JSON report writing

#![forbid(unsafe_code)]

pub mod error;
pub mod output;
pub mod probe;
pub mod trace_check;

pub use error::HarnessError;
pub use output::{to_json, write_json};
pub use probe::{ProbeReport, probe_with};
#[cfg(unix)]
pub use probe::probe_driver;
pub use trace_check::{TraceCheckReport, TraceViolation, check_trace_file, check_trace_text};
