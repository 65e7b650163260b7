//! Internal error type.
//!
//! None of these cross the exported ABI: entry points translate them into
//! `SQL_ERROR` (or simply trace them) before returning to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetourError {
    #[error("target driver {} could not be loaded: {reason}", path.display())]
    TargetUnavailable { path: PathBuf, reason: String },
    #[error("target driver could not be unloaded: {reason}")]
    UnloadFailed { reason: String },
    #[error("driver path {} contains an interior NUL byte", path.display())]
    InvalidPath { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = DetourError::TargetUnavailable {
            path: PathBuf::from("/opt/driver/libaceodbc.so"),
            reason: "file not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "target driver /opt/driver/libaceodbc.so could not be loaded: file not found"
        );
    }
}
