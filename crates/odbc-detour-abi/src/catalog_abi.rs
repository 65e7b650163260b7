//! Catalog functions. Every name pattern is traced as text.

use odbc_detour_core::sql::{SQLHSTMT, SQLRETURN, SQLSMALLINT, SQLUSMALLINT, SQLWCHAR};

use crate::util::wide_arg;

odbc_fn! {
    fn SQLTablesW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
        table_type: *mut SQLWCHAR,
        table_type_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
        wide_arg(table_type, table_type_length),
    ];
}

odbc_fn! {
    fn SQLColumnsW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
        column_name: *mut SQLWCHAR,
        column_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
        wide_arg(column_name, column_length),
    ];
}

odbc_fn! {
    fn SQLPrimaryKeysW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
    ];
}

odbc_fn! {
    fn SQLProceduresW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        procedure_name: *mut SQLWCHAR,
        procedure_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(procedure_name, procedure_length),
    ];
}

odbc_fn! {
    fn SQLProcedureColumnsW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        procedure_name: *mut SQLWCHAR,
        procedure_length: SQLSMALLINT,
        column_name: *mut SQLWCHAR,
        column_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(procedure_name, procedure_length),
        wide_arg(column_name, column_length),
    ];
}

odbc_fn! {
    fn SQLTablePrivilegesW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
    ];
}

odbc_fn! {
    fn SQLColumnPrivilegesW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
        column_name: *mut SQLWCHAR,
        column_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
        wide_arg(column_name, column_length),
    ];
}

odbc_fn! {
    fn SQLSpecialColumnsW(
        statement_handle: SQLHSTMT,
        identifier_type: SQLUSMALLINT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
        scope: SQLUSMALLINT,
        nullable: SQLUSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        identifier_type,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
        scope,
        nullable,
    ];
}

odbc_fn! {
    fn SQLStatisticsW(
        statement_handle: SQLHSTMT,
        catalog_name: *mut SQLWCHAR,
        catalog_length: SQLSMALLINT,
        schema_name: *mut SQLWCHAR,
        schema_length: SQLSMALLINT,
        table_name: *mut SQLWCHAR,
        table_length: SQLSMALLINT,
        unique: SQLUSMALLINT,
        reserved: SQLUSMALLINT,
    ) -> SQLRETURN => [
        statement_handle,
        wide_arg(catalog_name, catalog_length),
        wide_arg(schema_name, schema_length),
        wide_arg(table_name, table_length),
        unique,
        reserved,
    ];
}
