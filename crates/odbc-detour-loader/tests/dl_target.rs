//! Lifecycle against real modules through the platform loader.

#![cfg(target_os = "linux")]

use odbc_detour_loader::{Detour, DetourError, DlLoader, MemorySink};

#[test]
fn missing_driver_fails_acquire_and_traces_reason() {
    let sink = MemorySink::new();
    let detour = Detour::new(
        DlLoader,
        "/nonexistent/odbc-detour/libmissing.so",
        Box::new(sink.clone()),
    );

    let err = detour.acquire().unwrap_err();
    assert!(matches!(err, DetourError::TargetUnavailable { .. }));
    assert!(!detour.lifecycle().is_loaded());
    assert!(detour.registry().is_empty());

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("/nonexistent/odbc-detour/libmissing.so"));
}

#[test]
fn non_driver_library_resolves_nothing_but_stays_usable() {
    let sink = MemorySink::new();
    let detour = Detour::new(DlLoader, "libm.so.6", Box::new(sink.clone()));

    detour.acquire().unwrap();
    assert!(detour.lifecycle().is_loaded());
    assert!(detour.registry().is_empty());
    assert_eq!(sink.lines().len(), odbc_detour_core::CATALOG.len());

    detour.release().unwrap();
    assert!(!detour.lifecycle().is_loaded());
}

#[test]
fn partial_resolution_against_libm() {
    let sink = MemorySink::new();
    let detour = Detour::with_names(
        DlLoader,
        "libm.so.6",
        ["cos", "SQLFetch", "sin"],
        Box::new(sink.clone()),
    );

    detour.acquire().unwrap();
    assert_eq!(detour.registry().resolved_names(), ["cos", "sin"]);
    assert_eq!(sink.lines(), ["Failed to load function: SQLFetch"]);
    detour.release().unwrap();
}

#[test]
fn dependency_exports_are_not_resolved() {
    let sink = MemorySink::new();
    let detour = Detour::with_names(
        DlLoader,
        "libm.so.6",
        ["cos", "malloc", "free"],
        Box::new(sink.clone()),
    );

    detour.acquire().unwrap();
    assert_eq!(detour.registry().resolved_names(), ["cos"]);
    assert!(detour.find("malloc").is_none());
    assert_eq!(
        sink.lines(),
        [
            "Failed to load function: malloc",
            "Failed to load function: free",
        ]
    );
    detour.release().unwrap();
}
