//! Driver export coverage.
//!
//! Loads a candidate target the same way the shim would, resolves the whole
//! catalog against it and reports which entry points callers would reach and
//! which would fall back.

use std::path::Path;

use odbc_detour_core::catalog::{CATALOG, ReturnClass};
use odbc_detour_loader::{Detour, MemorySink, ModuleLoader};
use serde::{Deserialize, Serialize};

/// An entry point the driver does not export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingEntryPoint {
    pub name: String,
    /// Value the shim returns for this entry point.
    pub fallback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeReport {
    pub driver: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub catalog_size: usize,
    pub resolved: Vec<String>,
    pub missing: Vec<MissingEntryPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unload_error: Option<String>,
    /// Messages the shim would have traced while loading and unloading.
    pub trace: Vec<String>,
}

impl ProbeReport {
    /// Every catalog entry point resolved.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.loaded && self.missing.is_empty()
    }
}

fn fallback_name(class: ReturnClass) -> &'static str {
    match class {
        ReturnClass::Status => "SQL_ERROR",
        ReturnClass::Bool => "FALSE",
    }
}

/// Probe `path` through `loader`.
///
/// Resolved names come back sorted; missing ones in catalog order, which is
/// also the order the shim traces them in.
pub fn probe_with<L: ModuleLoader>(loader: L, path: &Path) -> ProbeReport {
    let sink = MemorySink::new();
    let detour = Detour::new(loader, path, Box::new(sink.clone()));

    let mut report = ProbeReport {
        driver: path.display().to_string(),
        loaded: false,
        error: None,
        catalog_size: CATALOG.len(),
        resolved: Vec::new(),
        missing: Vec::new(),
        unload_error: None,
        trace: Vec::new(),
    };

    if let Err(err) = detour.acquire() {
        report.error = Some(err.to_string());
        report.trace = sink.lines();
        return report;
    }
    report.loaded = true;
    report.resolved = detour
        .registry()
        .resolved_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    report.missing = CATALOG
        .iter()
        .filter(|spec| detour.find(spec.name).is_none())
        .map(|spec| MissingEntryPoint {
            name: spec.name.to_string(),
            fallback: fallback_name(spec.class).to_string(),
        })
        .collect();

    if let Err(err) = detour.release() {
        report.unload_error = Some(err.to_string());
    }
    report.trace = sink.lines();
    report
}

/// Probe `path` with the real dynamic loader.
#[cfg(unix)]
pub fn probe_driver(path: &Path) -> ProbeReport {
    probe_with(odbc_detour_loader::DlLoader, path)
}
