//! Installer (`odbcinst`) configuration entry points. These return `BOOL`.

use odbc_detour_core::sql::{BOOL, HWND, SQL_NTS, SQLCHAR, SQLWCHAR, WORD};

use crate::util::{narrow_arg, wide_arg};

odbc_fn! {
    fn ConfigDSN(
        window: HWND,
        request: WORD,
        driver: *const SQLCHAR,
        attributes: *const SQLCHAR,
    ) -> BOOL => [
        window,
        request,
        narrow_arg(driver, SQL_NTS),
        narrow_arg(attributes, SQL_NTS),
    ];
}

odbc_fn! {
    fn ConfigDSNW(
        window: HWND,
        request: WORD,
        driver: *const SQLWCHAR,
        attributes: *const SQLWCHAR,
    ) -> BOOL => [
        window,
        request,
        wide_arg(driver, SQL_NTS),
        wide_arg(attributes, SQL_NTS),
    ];
}

odbc_fn! {
    fn ConfigDriverW(
        window: HWND,
        request: WORD,
        driver: *const SQLWCHAR,
        arguments: *const SQLWCHAR,
        message: *mut SQLWCHAR,
        message_max: WORD,
        message_length: *mut WORD,
    ) -> BOOL => [
        window,
        request,
        wide_arg(driver, SQL_NTS),
        wide_arg(arguments, SQL_NTS),
        message,
        message_max,
        message_length,
    ];
}
