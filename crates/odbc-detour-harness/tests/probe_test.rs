//! Probing real shared objects through the dynamic loader.

#![cfg(target_os = "linux")]

use std::path::Path;

use odbc_detour_core::catalog::CATALOG;
use odbc_detour_harness::probe_driver;

#[test]
fn library_without_odbc_exports_misses_everything() {
    let report = probe_driver(Path::new("libm.so.6"));
    assert!(report.loaded, "{:?}", report.error);
    assert!(report.resolved.is_empty());
    assert_eq!(report.missing.len(), CATALOG.len());
    assert_eq!(report.trace.len(), CATALOG.len());
    assert!(report.unload_error.is_none());

    let bools: Vec<&str> = report
        .missing
        .iter()
        .filter(|m| m.fallback == "FALSE")
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(bools, ["ConfigDriverW", "ConfigDSN", "ConfigDSNW"]);
}

#[test]
fn nonexistent_driver_is_not_loaded() {
    let report = probe_driver(Path::new("/nonexistent/odbc-detour/libtarget.so"));
    assert!(!report.loaded);
    assert!(!report.complete());
    assert!(
        report
            .error
            .as_deref()
            .is_some_and(|e| e.contains("/nonexistent/odbc-detour/libtarget.so"))
    );
}
