//! JSON report output.

use std::path::Path;

use serde::Serialize;

use crate::error::HarnessError;

/// Pretty-printed JSON for a report.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, HarnessError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write `report` to `path`, creating parent directories as needed.
pub fn write_json<T: Serialize>(report: &T, path: &Path) -> Result<(), HarnessError> {
    let body = to_json(report)?;
    let write_err = |source: std::io::Error| HarnessError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, body).map_err(write_err)
}
