//! Statement preparation, execution, result sets and statement attributes.

use odbc_detour_core::sql::{
    SQLHANDLE, SQLHSTMT, SQLINTEGER, SQLLEN, SQLPOINTER, SQLRETURN, SQLSETPOSIROW, SQLSMALLINT,
    SQLULEN, SQLUSMALLINT, SQLWCHAR,
};

use crate::util::wide_arg;

odbc_fn! {
    fn SQLPrepareW(
        statement_handle: SQLHSTMT,
        statement_text: *mut SQLWCHAR,
        text_length: SQLINTEGER,
    ) -> SQLRETURN => [statement_handle, wide_arg(statement_text, text_length), text_length];
}

odbc_fn! {
    fn SQLExecute(statement_handle: SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLExecDirectW(
        statement_handle: SQLHSTMT,
        statement_text: *mut SQLWCHAR,
        text_length: SQLINTEGER,
    ) -> SQLRETURN => [statement_handle, wide_arg(statement_text, text_length), text_length];
}

odbc_fn! {
    fn SQLNumResultCols(statement_handle: SQLHSTMT, column_count: *mut SQLSMALLINT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLColAttributeW(
        statement_handle: SQLHSTMT,
        column_number: SQLUSMALLINT,
        field_identifier: SQLUSMALLINT,
        character_attribute: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
        numeric_attribute: *mut SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLDescribeColW(
        statement_handle: SQLHSTMT,
        column_number: SQLUSMALLINT,
        column_name: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        name_length: *mut SQLSMALLINT,
        data_type: *mut SQLSMALLINT,
        column_size: *mut SQLULEN,
        decimal_digits: *mut SQLSMALLINT,
        nullable: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLFetch(statement_handle: SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLFetchScroll(
        statement_handle: SQLHSTMT,
        fetch_orientation: SQLSMALLINT,
        fetch_offset: SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLExtendedFetch(
        statement_handle: SQLHSTMT,
        fetch_orientation: SQLUSMALLINT,
        fetch_offset: SQLLEN,
        row_count: *mut SQLULEN,
        row_status_array: *mut SQLUSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetData(
        statement_handle: SQLHSTMT,
        column_number: SQLUSMALLINT,
        target_type: SQLSMALLINT,
        target_value: SQLPOINTER,
        buffer_length: SQLLEN,
        indicator: *mut SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLBindCol(
        statement_handle: SQLHSTMT,
        column_number: SQLUSMALLINT,
        target_type: SQLSMALLINT,
        target_value: SQLPOINTER,
        buffer_length: SQLLEN,
        indicator: *mut SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLBindParameter(
        statement_handle: SQLHSTMT,
        parameter_number: SQLUSMALLINT,
        input_output_type: SQLSMALLINT,
        value_type: SQLSMALLINT,
        parameter_type: SQLSMALLINT,
        column_size: SQLULEN,
        decimal_digits: SQLSMALLINT,
        parameter_value: SQLPOINTER,
        buffer_length: SQLLEN,
        indicator: *mut SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLRowCount(statement_handle: SQLHSTMT, row_count: *mut SQLLEN) -> SQLRETURN;
}

odbc_fn! {
    fn SQLMoreResults(statement_handle: SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLNumParams(statement_handle: SQLHSTMT, parameter_count: *mut SQLSMALLINT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLDescribeParam(
        statement_handle: SQLHSTMT,
        parameter_number: SQLUSMALLINT,
        data_type: *mut SQLSMALLINT,
        parameter_size: *mut SQLULEN,
        decimal_digits: *mut SQLSMALLINT,
        nullable: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLCloseCursor(statement_handle: SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLCancel(statement_handle: SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLCancelHandle(handle_type: SQLSMALLINT, handle: SQLHANDLE) -> SQLRETURN;
}

odbc_fn! {
    fn SQLCompleteAsync(
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        async_return_code: *mut SQLRETURN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetCursorNameW(
        statement_handle: SQLHSTMT,
        cursor_name: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        name_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetCursorNameW(
        statement_handle: SQLHSTMT,
        cursor_name: *mut SQLWCHAR,
        name_length: SQLSMALLINT,
    ) -> SQLRETURN => [statement_handle, wide_arg(cursor_name, name_length), name_length];
}

odbc_fn! {
    fn SQLParamData(statement_handle: SQLHSTMT, value: *mut SQLPOINTER) -> SQLRETURN;
}

odbc_fn! {
    fn SQLPutData(statement_handle: SQLHSTMT, data: SQLPOINTER, indicator: SQLLEN) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetPos(
        statement_handle: SQLHSTMT,
        row_number: SQLSETPOSIROW,
        operation: SQLUSMALLINT,
        lock_type: SQLUSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLBulkOperations(statement_handle: SQLHSTMT, operation: SQLSMALLINT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetScrollOptions(
        statement_handle: SQLHSTMT,
        concurrency: SQLUSMALLINT,
        keyset_size: SQLLEN,
        rowset_size: SQLUSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetStmtAttrW(
        statement_handle: SQLHSTMT,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        value_length: SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetStmtAttrW(
        statement_handle: SQLHSTMT,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetTypeInfoW(statement_handle: SQLHSTMT, data_type: SQLSMALLINT) -> SQLRETURN;
}
