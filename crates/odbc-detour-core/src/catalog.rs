//! The fixed set of intercepted ODBC entry points.
//!
//! Every name here is resolved against the target driver when it is loaded
//! and exported by the shim under the same name. The order is the resolution
//! order, so failed lookups are reported in a stable sequence.

use std::fmt;

use crate::sql::{self, BOOL, SQLRETURN};

/// Native return convention of an entry point.
///
/// Selects the value handed back to the caller when the target does not
/// export the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnClass {
    /// `SQLRETURN` status code; fails with `SQL_ERROR`.
    Status,
    /// Installer `BOOL`; fails with `FALSE`.
    Bool,
}

impl ReturnClass {
    /// `==` usable in const context.
    #[must_use]
    pub const fn is(self, other: Self) -> bool {
        self as u8 == other as u8
    }
}

/// A native return type with a canonical failure value.
///
/// Only `SQLRETURN` and `BOOL` implement this. An entry point with any other
/// return type cannot be described, so there is no ambiguous fallback.
pub trait ReturnCode: Copy + fmt::Debug {
    /// Return class this type belongs to.
    const CLASS: ReturnClass;
    /// Value returned when forwarding cannot happen.
    const FAILURE: Self;

    /// Human-readable rendering for trace lines.
    fn describe(self) -> String;
}

impl ReturnCode for SQLRETURN {
    const CLASS: ReturnClass = ReturnClass::Status;
    const FAILURE: Self = sql::SQL_ERROR;

    fn describe(self) -> String {
        match sql::return_code_name(self) {
            Some(name) => format!("{self} ({name})"),
            None => self.to_string(),
        }
    }
}

impl ReturnCode for BOOL {
    const CLASS: ReturnClass = ReturnClass::Bool;
    const FAILURE: Self = sql::FALSE;

    fn describe(self) -> String {
        if self == sql::FALSE {
            "FALSE".to_string()
        } else {
            "TRUE".to_string()
        }
    }
}

/// Name and return class of one intercepted entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPointSpec {
    pub name: &'static str,
    pub class: ReturnClass,
}

const fn status(name: &'static str) -> EntryPointSpec {
    EntryPointSpec {
        name,
        class: ReturnClass::Status,
    }
}

const fn boolean(name: &'static str) -> EntryPointSpec {
    EntryPointSpec {
        name,
        class: ReturnClass::Bool,
    }
}

/// Every entry point the shim resolves and exports.
pub const CATALOG: [EntryPointSpec; 69] = [
    boolean("ConfigDriverW"),
    boolean("ConfigDSN"),
    boolean("ConfigDSNW"),
    status("SQLAllocConnect"),
    status("SQLAllocEnv"),
    status("SQLAllocHandle"),
    status("SQLAllocStmt"),
    status("SQLBindCol"),
    status("SQLBindParameter"),
    status("SQLBrowseConnectW"),
    status("SQLBulkOperations"),
    status("SQLCancel"),
    status("SQLCancelHandle"),
    status("SQLCloseCursor"),
    status("SQLColAttributeW"),
    status("SQLColumnPrivilegesW"),
    status("SQLColumnsW"),
    status("SQLCompleteAsync"),
    status("SQLConnectW"),
    status("SQLCopyDesc"),
    status("SQLDescribeColW"),
    status("SQLDescribeParam"),
    status("SQLDisconnect"),
    status("SQLDriverConnectW"),
    status("SQLEndTran"),
    status("SQLExecDirectW"),
    status("SQLExecute"),
    status("SQLExtendedFetch"),
    status("SQLFetch"),
    status("SQLFetchScroll"),
    status("SQLFreeConnect"),
    status("SQLFreeEnv"),
    status("SQLFreeHandle"),
    status("SQLFreeStmt"),
    status("SQLGetConnectAttrW"),
    status("SQLGetCursorNameW"),
    status("SQLGetData"),
    status("SQLGetDescFieldW"),
    status("SQLGetDescRecW"),
    status("SQLGetDiagFieldW"),
    status("SQLGetDiagRecW"),
    status("SQLGetEnvAttr"),
    status("SQLGetFunctions"),
    status("SQLGetInfoW"),
    status("SQLGetStmtAttrW"),
    status("SQLGetTypeInfoW"),
    status("SQLMoreResults"),
    status("SQLNativeSqlW"),
    status("SQLNumParams"),
    status("SQLNumResultCols"),
    status("SQLParamData"),
    status("SQLPrepareW"),
    status("SQLPrimaryKeysW"),
    status("SQLProcedureColumnsW"),
    status("SQLProceduresW"),
    status("SQLPutData"),
    status("SQLRowCount"),
    status("SQLSetConnectAttrW"),
    status("SQLSetCursorNameW"),
    status("SQLSetDescFieldW"),
    status("SQLSetDescRec"),
    status("SQLSetEnvAttr"),
    status("SQLSetPos"),
    status("SQLSetScrollOptions"),
    status("SQLSetStmtAttrW"),
    status("SQLSpecialColumnsW"),
    status("SQLStatisticsW"),
    status("SQLTablePrivilegesW"),
    status("SQLTablesW"),
];

/// Iterator over catalog names in resolution order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|spec| spec.name)
}

/// Look up the catalog entry for `name`.
pub fn lookup(name: &str) -> Option<&'static EntryPointSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Return class of `name`, evaluated at compile time by the exported wrappers
/// to check that each one matches its catalog entry.
#[must_use]
pub const fn class_of(name: &str) -> Option<ReturnClass> {
    let mut i = 0;
    while i < CATALOG.len() {
        if str_eq(CATALOG[i].name, name) {
            return Some(CATALOG[i].class);
        }
        i += 1;
    }
    None
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
