//! JSONL trace validation.
//!
//! A trace file is a sequence of runs: every process that appends to it
//! starts numbering at 1 again. Within a run `seq` must go up by one per
//! line.

use std::collections::BTreeSet;
use std::path::Path;

use odbc_detour_loader::trace::TraceRecord;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

const UNRESOLVED_PREFIX: &str = "Failed to load function: ";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceViolation {
    pub code: String,
    pub message: String,
    pub line_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceCheckReport {
    pub ok: bool,
    pub lines: usize,
    pub runs: usize,
    /// Entry points the target failed to export, across all runs.
    pub unresolved: Vec<String>,
    pub violations: Vec<TraceViolation>,
}

impl TraceCheckReport {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            ok: true,
            lines: 0,
            runs: 0,
            unresolved: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, code: &str, line_number: usize, message: impl Into<String>) {
        self.ok = false;
        self.violations.push(TraceViolation {
            code: code.to_string(),
            message: message.into(),
            line_number,
        });
    }

    pub fn sort_deterministically(&mut self) {
        self.violations.sort_by(|a, b| {
            a.line_number
                .cmp(&b.line_number)
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });
    }
}

/// `YYYY-MM-DD HH:MM:SS.uuuuuu`
fn valid_timestamp(ts: &str) -> bool {
    let bytes = ts.as_bytes();
    if bytes.len() != 26 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b' ',
        13 | 16 => b == b':',
        19 => b == b'.',
        _ => b.is_ascii_digit(),
    })
}

/// Validate trace file contents.
#[must_use]
pub fn check_trace_text(text: &str) -> TraceCheckReport {
    let mut report = TraceCheckReport::ok();
    let mut unresolved = BTreeSet::new();
    let mut last_seq: Option<u64> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        if line.trim().is_empty() {
            report.push("blank_line", line_number, "empty trace line");
            continue;
        }
        report.lines += 1;

        let record: TraceRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                report.push("invalid_json", line_number, err.to_string());
                last_seq = None;
                continue;
            }
        };

        if !valid_timestamp(&record.timestamp) {
            report.push(
                "bad_timestamp",
                line_number,
                format!("timestamp '{}' is not YYYY-MM-DD HH:MM:SS.uuuuuu", record.timestamp),
            );
        }
        if record.message.is_empty() {
            report.push("empty_message", line_number, "message is empty");
        }

        match (last_seq, record.seq) {
            (_, 1) => report.runs += 1,
            (Some(prev), seq) if seq == prev + 1 => {}
            (Some(prev), seq) => report.push(
                "seq_gap",
                line_number,
                format!("seq {seq} follows {prev}"),
            ),
            (None, seq) => {
                report.runs += 1;
                report.push(
                    "seq_gap",
                    line_number,
                    format!("run starts at seq {seq}"),
                );
            }
        }
        last_seq = Some(record.seq);

        if let Some(name) = record.message.strip_prefix(UNRESOLVED_PREFIX) {
            unresolved.insert(name.to_string());
        }
    }

    report.unresolved = unresolved.into_iter().collect();
    report.sort_deterministically();
    report
}

/// Read and validate the trace file at `path`.
pub fn check_trace_file(path: &Path) -> Result<TraceCheckReport, HarnessError> {
    let text = std::fs::read_to_string(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(check_trace_text(&text))
}
