//! Trace output for intercepted calls.
//!
//! Provides:
//! - [`TraceSink`]: where entry points send their one-line messages.
//! - [`LineSink`]: timestamped, thread-tagged lines to a file, stderr or any
//!   writer, as plain text or JSONL.
//! - [`MemorySink`]: collects bare messages in memory (for tests).
//! - [`NullSink`]: discards everything and reports itself disabled.
//! - [`TraceRecord`]: the JSONL record layout.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sink trait
// ---------------------------------------------------------------------------

/// Destination for trace lines.
pub trait TraceSink: Send + Sync {
    /// Write one message. Implementations add their own framing.
    fn write_line(&self, message: &str);

    /// Whether messages are kept at all; callers skip formatting when not.
    fn enabled(&self) -> bool {
        true
    }
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn write_line(&self, _message: &str) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Keeps bare messages in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl TraceSink for MemorySink {
    fn write_line(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Targets and formats
// ---------------------------------------------------------------------------

/// Where a [`LineSink`] writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl TraceTarget {
    /// Parse a trace destination. `off`/`none`/`0` disable tracing,
    /// `stderr`/`-` select standard error, anything else is a file path.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "off" | "none" | "0" => Self::Off,
            "stderr" | "-" => Self::Stderr,
            _ => Self::File(PathBuf::from(trimmed)),
        }
    }
}

/// Line layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceFormat {
    /// `2026-10-16 09:41:07.123456 04711,  SQLFetch(0x55d0c8a3b2c0)`
    ///
    /// Timestamps are UTC, not local time, in both formats.
    #[default]
    Text,
    /// One [`TraceRecord`] per line.
    Jsonl,
}

impl TraceFormat {
    /// Parse from string (case-insensitive); unknown values mean `Text`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonl" | "json" | "ndjson" => Self::Jsonl,
            _ => Self::Text,
        }
    }
}

/// One JSONL trace line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub timestamp: String,
    pub thread: u64,
    pub seq: u64,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Line sink
// ---------------------------------------------------------------------------

/// Timestamped line writer.
///
/// Lines are numbered and written under one lock, so lines from
/// different threads never interleave and `seq` increases down the file.
pub struct LineSink {
    writer: Mutex<Box<dyn Write + Send>>,
    format: TraceFormat,
    seq: AtomicU64,
}

impl fmt::Debug for LineSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink")
            .field("format", &self.format)
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl LineSink {
    /// Wrap an arbitrary writer.
    #[must_use]
    pub fn with_writer(writer: Box<dyn Write + Send>, format: TraceFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            seq: AtomicU64::new(0),
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn append_to(path: &std::path::Path, format: TraceFormat) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Box::new(file), format))
    }

    /// Write to standard error.
    #[must_use]
    pub fn stderr(format: TraceFormat) -> Self {
        Self::with_writer(Box::new(std::io::stderr()), format)
    }

    /// Build the sink for a configured target.
    ///
    /// An unopenable file falls back to stderr; `Off` yields a [`NullSink`].
    #[must_use]
    pub fn for_target(target: &TraceTarget, format: TraceFormat) -> Box<dyn TraceSink> {
        match target {
            TraceTarget::Off => Box::new(NullSink),
            TraceTarget::Stderr => Box::new(Self::stderr(format)),
            TraceTarget::File(path) => match Self::append_to(path, format) {
                Ok(sink) => Box::new(sink),
                Err(err) => {
                    let sink = Self::stderr(format);
                    sink.write_line(&format!(
                        "trace file {} unavailable ({err}); tracing to stderr",
                        path.display()
                    ));
                    Box::new(sink)
                }
            },
        }
    }

    fn render(&self, message: &str) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let thread = current_thread_id();
        let timestamp = timestamp_now();
        match self.format {
            TraceFormat::Text => format_text_line(&timestamp, thread, message),
            TraceFormat::Jsonl => {
                let record = TraceRecord {
                    timestamp,
                    thread,
                    seq,
                    message: message.to_string(),
                };
                serde_json::to_string(&record)
                    .unwrap_or_else(|_| format_text_line(&record.timestamp, thread, message))
            }
        }
    }
}

impl TraceSink for LineSink {
    fn write_line(&self, message: &str) {
        let mut writer = self.writer.lock();
        // Rendered under the lock so `seq` follows file order.
        let line = self.render(message);
        // Tracing must never disturb the traced call; write errors are dropped.
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

/// Plain-text trace line layout.
#[must_use]
pub fn format_text_line(timestamp: &str, thread: u64, message: &str) -> String {
    format!("{timestamp} {thread:05},  {message}")
}

// ---------------------------------------------------------------------------
// Time and thread identity
// ---------------------------------------------------------------------------

/// Current UTC time as `YYYY-MM-DD HH:MM:SS.uuuuuu`.
#[must_use]
pub fn timestamp_now() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format_timestamp(since_epoch.as_secs(), since_epoch.subsec_micros())
}

/// Format seconds since the Unix epoch plus microseconds.
#[must_use]
pub fn format_timestamp(secs: u64, micros: u32) -> String {
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02}.{micros:06}",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60,
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// OS thread id of the caller.
#[cfg(target_os = "linux")]
#[must_use]
pub fn current_thread_id() -> u64 {
    // SAFETY: gettid has no preconditions.
    let tid = unsafe { libc::gettid() };
    tid as u64
}

/// Process-unique id of the calling thread.
#[cfg(not(target_os = "linux"))]
#[must_use]
pub fn current_thread_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    std::thread_local! {
        static ID: u64 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    ID.with(|id| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    #[test]
    fn epoch_formats() {
        assert_eq!(format_timestamp(0, 0), "1970-01-01 00:00:00.000000");
    }

    #[test]
    fn leap_day_formats() {
        // 2024-02-29T12:34:56Z
        assert_eq!(
            format_timestamp(1_709_210_096, 42),
            "2024-02-29 12:34:56.000042"
        );
    }

    #[test]
    fn end_of_year_formats() {
        // 2025-12-31T23:59:59Z
        assert_eq!(
            format_timestamp(1_767_225_599, 999_999),
            "2025-12-31 23:59:59.999999"
        );
    }

    #[test]
    fn timestamps_are_utc() {
        let epoch = |t: std::time::SystemTime| {
            let d = t.duration_since(std::time::UNIX_EPOCH).unwrap();
            format_timestamp(d.as_secs(), d.subsec_micros())
        };
        let before = epoch(std::time::SystemTime::now());
        let stamp = timestamp_now();
        let after = epoch(std::time::SystemTime::now());
        assert!(before <= stamp && stamp <= after, "{before} {stamp} {after}");
    }

    #[test]
    fn text_line_layout() {
        assert_eq!(
            format_text_line("2026-10-16 09:41:07.000001", 42, "SQLFetch(0x1)"),
            "2026-10-16 09:41:07.000001 00042,  SQLFetch(0x1)"
        );
    }

    #[test]
    fn text_sink_writes_one_line_per_message() {
        let buffer = SharedBuffer::default();
        let sink = LineSink::with_writer(Box::new(buffer.clone()), TraceFormat::Text);
        sink.write_line("SQLAllocEnv(0x0)");
        sink.write_line("SQLFreeEnv(0x10)");

        let text = buffer.text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(",  SQLAllocEnv(0x0)"));
        assert!(lines[1].ends_with(",  SQLFreeEnv(0x10)"));
        assert_eq!(lines[0].as_bytes()[4], b'-');
    }

    #[test]
    fn jsonl_sink_writes_records() {
        let buffer = SharedBuffer::default();
        let sink = LineSink::with_writer(Box::new(buffer.clone()), TraceFormat::Jsonl);
        sink.write_line("first");
        sink.write_line("second \"quoted\"");

        let text = buffer.text();
        let records: Vec<TraceRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq, 1);
        assert_eq!(records[1].seq, 2);
        assert_eq!(records[1].message, "second \"quoted\"");
        assert_eq!(records[0].thread, current_thread_id());
    }

    #[test]
    fn file_sink_appends() {
        let path = std::env::temp_dir().join(format!(
            "odbc-detour-trace-{}-{}.log",
            std::process::id(),
            current_thread_id()
        ));
        let _ = std::fs::remove_file(&path);
        {
            let sink = LineSink::append_to(&path, TraceFormat::Text).unwrap();
            sink.write_line("one");
        }
        {
            let sink = LineSink::append_to(&path, TraceFormat::Text).unwrap();
            sink.write_line("two");
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(",  one\n"));
        assert!(content.contains(",  two\n"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn null_sink_is_disabled() {
        assert!(!NullSink.enabled());
        assert!(!LineSink::for_target(&TraceTarget::Off, TraceFormat::Text).enabled());
        assert!(MemorySink::new().enabled());
    }

    #[test]
    fn parse_targets_and_formats() {
        assert_eq!(TraceTarget::from_str_loose("off"), TraceTarget::Off);
        assert_eq!(TraceTarget::from_str_loose(""), TraceTarget::Off);
        assert_eq!(TraceTarget::from_str_loose("STDERR"), TraceTarget::Stderr);
        assert_eq!(
            TraceTarget::from_str_loose("/tmp/Trace.log"),
            TraceTarget::File(PathBuf::from("/tmp/Trace.log"))
        );
        assert_eq!(TraceFormat::from_str_loose("JSONL"), TraceFormat::Jsonl);
        assert_eq!(TraceFormat::from_str_loose("text"), TraceFormat::Text);
        assert_eq!(TraceFormat::from_str_loose("bogus"), TraceFormat::Text);
    }
}
