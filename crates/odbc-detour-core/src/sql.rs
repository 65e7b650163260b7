//! ODBC scalar types and constants.
//!
//! Widths follow the 64-bit ODBC headers (unixODBC and the Windows SDK agree
//! on these): `SQLLEN`/`SQLULEN` are pointer-sized, `SQLWCHAR` is a UTF-16
//! code unit.

#![allow(non_camel_case_types)]

use std::ffi::c_void;

pub type SQLSMALLINT = i16;
pub type SQLUSMALLINT = u16;
pub type SQLINTEGER = i32;
pub type SQLUINTEGER = u32;
pub type SQLLEN = isize;
pub type SQLULEN = usize;
pub type SQLSETPOSIROW = SQLULEN;
pub type SQLRETURN = i16;
pub type SQLCHAR = u8;
pub type SQLWCHAR = u16;

pub type SQLPOINTER = *mut c_void;
pub type SQLHANDLE = *mut c_void;
pub type SQLHENV = SQLHANDLE;
pub type SQLHDBC = SQLHANDLE;
pub type SQLHSTMT = SQLHANDLE;
pub type SQLHDESC = SQLHANDLE;
pub type SQLHWND = *mut c_void;

/// Installer (`odbcinst`) scalar types.
pub type BOOL = i32;
pub type WORD = u16;
pub type HWND = *mut c_void;

/// Return codes.
pub const SQL_SUCCESS: SQLRETURN = 0;
pub const SQL_SUCCESS_WITH_INFO: SQLRETURN = 1;
pub const SQL_STILL_EXECUTING: SQLRETURN = 2;
pub const SQL_NEED_DATA: SQLRETURN = 99;
pub const SQL_NO_DATA: SQLRETURN = 100;
pub const SQL_ERROR: SQLRETURN = -1;
pub const SQL_INVALID_HANDLE: SQLRETURN = -2;

pub const FALSE: BOOL = 0;
pub const TRUE: BOOL = 1;

/// Length sentinel: the string is NUL-terminated.
pub const SQL_NTS: i32 = -3;

/// Handle kinds accepted by `SQLAllocHandle` / `SQLFreeHandle`.
pub const SQL_HANDLE_ENV: SQLSMALLINT = 1;
pub const SQL_HANDLE_DBC: SQLSMALLINT = 2;
pub const SQL_HANDLE_STMT: SQLSMALLINT = 3;
pub const SQL_HANDLE_DESC: SQLSMALLINT = 4;

/// Returns `true` if `rc` is `SQL_SUCCESS` or `SQL_SUCCESS_WITH_INFO`.
#[inline]
pub fn succeeded(rc: SQLRETURN) -> bool {
    rc == SQL_SUCCESS || rc == SQL_SUCCESS_WITH_INFO
}

/// Symbolic name of a return code, for trace lines.
pub fn return_code_name(rc: SQLRETURN) -> Option<&'static str> {
    match rc {
        SQL_SUCCESS => Some("SQL_SUCCESS"),
        SQL_SUCCESS_WITH_INFO => Some("SQL_SUCCESS_WITH_INFO"),
        SQL_STILL_EXECUTING => Some("SQL_STILL_EXECUTING"),
        SQL_NEED_DATA => Some("SQL_NEED_DATA"),
        SQL_NO_DATA => Some("SQL_NO_DATA"),
        SQL_ERROR => Some("SQL_ERROR"),
        SQL_INVALID_HANDLE => Some("SQL_INVALID_HANDLE"),
        _ => None,
    }
}

/// Symbolic name of a handle kind, for trace lines.
pub fn handle_type_name(handle_type: SQLSMALLINT) -> Option<&'static str> {
    match handle_type {
        SQL_HANDLE_ENV => Some("SQL_HANDLE_ENV"),
        SQL_HANDLE_DBC => Some("SQL_HANDLE_DBC"),
        SQL_HANDLE_STMT => Some("SQL_HANDLE_STMT"),
        SQL_HANDLE_DESC => Some("SQL_HANDLE_DESC"),
        _ => None,
    }
}
