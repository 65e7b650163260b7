//! Shim configuration.
//!
//! Read from the environment once, the first time the shim is entered:
//! - `ODBC_DETOUR_DRIVER`: path of the real driver module.
//! - `ODBC_DETOUR_TRACE`: trace destination (a file path, `stderr` or `off`).
//! - `ODBC_DETOUR_TRACE_FORMAT`: `text` (default) or `jsonl`.

use std::path::PathBuf;

use crate::trace::{TraceFormat, TraceTarget};

pub const DRIVER_ENV: &str = "ODBC_DETOUR_DRIVER";
pub const TRACE_ENV: &str = "ODBC_DETOUR_TRACE";
pub const TRACE_FORMAT_ENV: &str = "ODBC_DETOUR_TRACE_FORMAT";

/// File name of the trace log placed in the user's home directory.
pub const DEFAULT_TRACE_FILE: &str = "odbc-detour.log";

/// Driver path baked in at build time, or the generic fallback name.
#[must_use]
pub fn default_driver_path() -> PathBuf {
    PathBuf::from(option_env!("ODBC_DETOUR_DEFAULT_DRIVER").unwrap_or("libodbc-target.so"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetourConfig {
    pub driver_path: PathBuf,
    pub trace_target: TraceTarget,
    pub trace_format: TraceFormat,
}

impl Default for DetourConfig {
    fn default() -> Self {
        Self {
            driver_path: default_driver_path(),
            trace_target: TraceTarget::Stderr,
            trace_format: TraceFormat::Text,
        }
    }
}

impl DetourConfig {
    /// Read the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Empty values count as unset, except for the trace destination where
    /// an empty value is read as `off`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let driver_path = lookup(DRIVER_ENV)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_driver_path, |v| PathBuf::from(v.trim()));

        let trace_target = match lookup(TRACE_ENV) {
            Some(raw) => TraceTarget::from_str_loose(&raw),
            None => match lookup("HOME").filter(|h| !h.is_empty()) {
                Some(home) => TraceTarget::File(PathBuf::from(home).join(DEFAULT_TRACE_FILE)),
                None => TraceTarget::Stderr,
            },
        };

        let trace_format = lookup(TRACE_FORMAT_ENV)
            .map(|raw| TraceFormat::from_str_loose(&raw))
            .unwrap_or_default();

        Self {
            driver_path,
            trace_target,
            trace_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> DetourConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DetourConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_variables() {
        let cfg = config(&[]);
        assert_eq!(cfg.driver_path, default_driver_path());
        assert_eq!(cfg.trace_target, TraceTarget::Stderr);
        assert_eq!(cfg.trace_format, TraceFormat::Text);
    }

    #[test]
    fn trace_defaults_to_home_directory() {
        let cfg = config(&[("HOME", "/home/dba")]);
        assert_eq!(
            cfg.trace_target,
            TraceTarget::File(PathBuf::from("/home/dba/odbc-detour.log"))
        );
    }

    #[test]
    fn explicit_values_win() {
        let cfg = config(&[
            ("HOME", "/home/dba"),
            (DRIVER_ENV, " /opt/ace/libaceodbc.so "),
            (TRACE_ENV, "off"),
            (TRACE_FORMAT_ENV, "JSONL"),
        ]);
        assert_eq!(cfg.driver_path, PathBuf::from("/opt/ace/libaceodbc.so"));
        assert_eq!(cfg.trace_target, TraceTarget::Off);
        assert_eq!(cfg.trace_format, TraceFormat::Jsonl);
    }

    #[test]
    fn blank_driver_falls_back_to_default() {
        let cfg = config(&[(DRIVER_ENV, "   ")]);
        assert_eq!(cfg.driver_path, default_driver_path());
    }

    #[test]
    fn trace_to_named_file() {
        let cfg = config(&[(TRACE_ENV, "/var/log/odbc/trace.log")]);
        assert_eq!(
            cfg.trace_target,
            TraceTarget::File(PathBuf::from("/var/log/odbc/trace.log"))
        );
    }
}
