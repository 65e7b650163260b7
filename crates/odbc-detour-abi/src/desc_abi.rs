//! Descriptor fields and records.

use odbc_detour_core::sql::{
    SQLHDESC, SQLINTEGER, SQLLEN, SQLPOINTER, SQLRETURN, SQLSMALLINT, SQLWCHAR,
};

odbc_fn! {
    fn SQLGetDescFieldW(
        descriptor_handle: SQLHDESC,
        record_number: SQLSMALLINT,
        field_identifier: SQLSMALLINT,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetDescRecW(
        descriptor_handle: SQLHDESC,
        record_number: SQLSMALLINT,
        name: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
        data_type: *mut SQLSMALLINT,
        sub_type: *mut SQLSMALLINT,
        length: *mut SQLLEN,
        precision: *mut SQLSMALLINT,
        scale: *mut SQLSMALLINT,
        nullable: *mut SQLSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetDescFieldW(
        descriptor_handle: SQLHDESC,
        record_number: SQLSMALLINT,
        field_identifier: SQLSMALLINT,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetDescRec(
        descriptor_handle: SQLHDESC,
        record_number: SQLSMALLINT,
        data_type: SQLSMALLINT,
        sub_type: SQLSMALLINT,
        length: SQLLEN,
        precision: SQLSMALLINT,
        scale: SQLSMALLINT,
        data: SQLPOINTER,
        string_length: *mut SQLLEN,
        indicator: *mut SQLLEN,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLCopyDesc(source_handle: SQLHDESC, target_handle: SQLHDESC) -> SQLRETURN;
}
