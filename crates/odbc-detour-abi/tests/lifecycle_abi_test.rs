//! Environment reference counting through the exported entry points.
//!
//! The target is a system library that exports none of the ODBC names, so
//! loading succeeds and every forwarded call takes the unresolved path.

#![cfg(target_os = "linux")]

use std::ffi::c_void;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use odbc_detour_abi::handle_abi::{
    SQLAllocEnv, SQLAllocHandle, SQLFreeEnv, SQLFreeHandle,
};
use odbc_detour_abi::state::detour;
use odbc_detour_abi::statement_abi::SQLExecDirectW;
use odbc_detour_core::sql::{
    SQL_ERROR, SQL_HANDLE_DBC, SQL_HANDLE_ENV, SQL_NTS, SQLHANDLE, SQLHENV,
};

static SETUP: Once = Once::new();
static TEST_LOCK: Mutex<()> = Mutex::new(());

fn trace_path() -> PathBuf {
    std::env::temp_dir().join(format!("odbc-detour-lifecycle-{}.log", std::process::id()))
}

fn setup() {
    SETUP.call_once(|| {
        let _ = std::fs::remove_file(trace_path());
        // SAFETY: runs once, before any entry point reads the environment.
        unsafe {
            std::env::set_var("ODBC_DETOUR_DRIVER", "libm.so.6");
            std::env::set_var("ODBC_DETOUR_TRACE", trace_path());
            std::env::set_var("ODBC_DETOUR_TRACE_FORMAT", "text");
        }
    });
}

fn trace_lines() -> Vec<String> {
    std::fs::read_to_string(trace_path())
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn message(line: &str) -> &str {
    line.split_once(",  ").map_or("", |(_, m)| m)
}

#[test]
fn env_alloc_and_free_load_and_unload_the_target() {
    setup();
    let _guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let mut first: SQLHENV = std::ptr::null_mut();
    let mut second: SQLHANDLE = std::ptr::null_mut();

    // The target has no SQLAllocEnv, so the call itself fails, but the
    // environment reference is still taken.
    assert_eq!(unsafe { SQLAllocEnv(&raw mut first) }, SQL_ERROR);
    assert!(detour().lifecycle().is_loaded());
    assert_eq!(detour().lifecycle().use_count(), 1);

    let rc = unsafe { SQLAllocHandle(SQL_HANDLE_ENV, std::ptr::null_mut(), &raw mut second) };
    assert_eq!(rc, SQL_ERROR);
    assert_eq!(detour().lifecycle().use_count(), 2);

    // Non-environment handles leave the count alone.
    let mut dbc: SQLHANDLE = std::ptr::null_mut();
    unsafe { SQLAllocHandle(SQL_HANDLE_DBC, 0x40 as SQLHANDLE, &raw mut dbc) };
    unsafe { SQLFreeHandle(SQL_HANDLE_DBC, 0x41 as SQLHANDLE) };
    assert_eq!(detour().lifecycle().use_count(), 2);

    unsafe { SQLFreeHandle(SQL_HANDLE_ENV, 0x50 as SQLHANDLE) };
    assert!(detour().lifecycle().is_loaded());
    assert_eq!(detour().lifecycle().use_count(), 1);

    unsafe { SQLFreeEnv(0x51 as SQLHENV) };
    assert!(!detour().lifecycle().is_loaded());
    assert_eq!(detour().lifecycle().use_count(), 0);
    assert!(detour().registry().is_empty());

    // Resolution ran exactly once for the whole cycle.
    let misses = trace_lines()
        .iter()
        .filter(|line| message(line) == "Failed to load function: SQLFetch")
        .count();
    assert_eq!(misses, 1);
}

#[test]
fn text_trace_lines_are_timestamped() {
    setup();
    let _guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let mut statement: Vec<u16> = "SELECT 1".encode_utf16().chain([0]).collect();
    let rc = unsafe {
        SQLExecDirectW(0x60 as *mut c_void, statement.as_mut_ptr(), SQL_NTS)
    };
    assert_eq!(rc, SQL_ERROR);

    let lines = trace_lines();
    let line = lines
        .iter()
        .find(|line| message(line) == "SQLExecDirectW(0x60, \"SELECT 1\", -3) -> -1 (SQL_ERROR)")
        .expect("post-call line");

    // YYYY-MM-DD HH:MM:SS.uuuuuu <tid>,  <message>
    let bytes = line.as_bytes();
    assert_eq!(bytes[4], b'-');
    assert_eq!(bytes[7], b'-');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[19], b'.');
    assert_eq!(bytes[26], b' ');
    let (head, _) = line.split_once(",  ").unwrap();
    let tid = &head[27..];
    assert!(tid.len() >= 5);
    assert!(tid.bytes().all(|b| b.is_ascii_digit()));
}
