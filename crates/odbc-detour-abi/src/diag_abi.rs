//! Diagnostic records.
//!
//! Both functions only write to caller buffers, so their arguments are traced
//! as pointers.

use odbc_detour_core::sql::{
    SQLHANDLE, SQLINTEGER, SQLPOINTER, SQLRETURN, SQLSMALLINT, SQLWCHAR,
};

odbc_fn! {
    fn SQLGetDiagRecW(
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        record_number: SQLSMALLINT,
        sql_state: *mut SQLWCHAR,
        native_error: *mut SQLINTEGER,
        message_text: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        text_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetDiagFieldW(
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        record_number: SQLSMALLINT,
        diag_identifier: SQLSMALLINT,
        diag_info: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}
