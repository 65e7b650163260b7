//! `SQLGetInfo` information types: symbolic names and value decoding.
//!
//! Each known information type carries an [`InfoValue`] whose variant says
//! how the driver's output buffer is laid out, and whose payload is a
//! plausible default for that type.

use std::borrow::Cow;

use crate::sql::SQLUSMALLINT;
use crate::text::{self, NULL_PLACEHOLDER};

/// Value of one information type.
#[derive(Debug, Clone, Copy)]
pub enum InfoValue {
    /// `SQLUSMALLINT` result.
    UShort(u16),
    /// `SQLUINTEGER` result (scalars and bitmasks).
    UInteger(u32),
    /// `SQLULEN` result.
    ULen(u64),
    /// Fixed character-string result.
    Text(&'static str),
    /// Character-string result computed when needed.
    Dynamic(fn() -> String),
}

impl InfoValue {
    /// Display form of the value itself.
    pub fn render(&self) -> String {
        match self {
            Self::UShort(v) => v.to_string(),
            Self::UInteger(v) => v.to_string(),
            Self::ULen(v) => v.to_string(),
            Self::Text(s) => (*s).to_string(),
            Self::Dynamic(f) => f(),
        }
    }

    /// Byte width of an integer result; `None` for strings.
    pub fn scalar_width(&self) -> Option<usize> {
        match self {
            Self::UShort(_) => Some(2),
            Self::UInteger(_) => Some(4),
            Self::ULen(_) => Some(8),
            Self::Text(_) | Self::Dynamic(_) => None,
        }
    }

    /// Write the value into an `SQLGetInfo` output buffer.
    ///
    /// Integers are written native-endian and must fit entirely; strings are
    /// written as UTF-16 and truncated to the buffer. Returns the number of
    /// bytes written, or `0` if an integer does not fit.
    pub fn write_into(&self, out: &mut [u8]) -> usize {
        match self {
            Self::UShort(v) => write_scalar(&v.to_ne_bytes(), out),
            Self::UInteger(v) => write_scalar(&v.to_ne_bytes(), out),
            Self::ULen(v) => write_scalar(&v.to_ne_bytes(), out),
            Self::Text(s) => text::encode_wide_bytes(s, out),
            Self::Dynamic(f) => text::encode_wide_bytes(&f(), out),
        }
    }

    /// Decode a driver-filled buffer laid out the way this variant says.
    ///
    /// `length` is the byte count the driver reported for string results.
    pub fn decode(&self, buffer: &[u8], length: usize) -> String {
        match self {
            Self::UShort(_) => read_scalar::<2>(buffer)
                .map(|b| u16::from_ne_bytes(b).to_string())
                .unwrap_or_else(|| NULL_PLACEHOLDER.to_string()),
            Self::UInteger(_) => read_scalar::<4>(buffer)
                .map(|b| u32::from_ne_bytes(b).to_string())
                .unwrap_or_else(|| NULL_PLACEHOLDER.to_string()),
            Self::ULen(_) => read_scalar::<8>(buffer)
                .map(|b| u64::from_ne_bytes(b).to_string())
                .unwrap_or_else(|| NULL_PLACEHOLDER.to_string()),
            Self::Text(_) | Self::Dynamic(_) => {
                text::decode_wide_bytes(&buffer[..length.min(buffer.len())])
            }
        }
    }
}

fn write_scalar(bytes: &[u8], out: &mut [u8]) -> usize {
    if out.len() < bytes.len() {
        return 0;
    }
    out[..bytes.len()].copy_from_slice(bytes);
    bytes.len()
}

fn read_scalar<const N: usize>(buffer: &[u8]) -> Option<[u8; N]> {
    buffer.get(..N)?.try_into().ok()
}

/// One known information type.
#[derive(Debug, Clone, Copy)]
pub struct InfoDefinition {
    pub code: SQLUSMALLINT,
    pub name: &'static str,
    pub value: InfoValue,
}

macro_rules! info {
    ($name:ident = $code:expr, $value:expr) => {
        InfoDefinition {
            code: $code,
            name: stringify!($name),
            value: $value,
        }
    };
}

fn driver_module_path() -> String {
    std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_default()
}

use InfoValue::{Dynamic, Text, UInteger, UShort};

/// Information types the shim knows by name.
pub const INFO_TYPES: &[InfoDefinition] = &[
    info!(SQL_MAX_DRIVER_CONNECTIONS = 0, UShort(0)),
    info!(SQL_MAX_CONCURRENT_ACTIVITIES = 1, UShort(0)),
    info!(SQL_DATA_SOURCE_NAME = 2, Text("ODBC Detour Database")),
    info!(SQL_DRIVER_NAME = 6, Dynamic(driver_module_path)),
    info!(SQL_DRIVER_VER = 7, Text("")),
    info!(SQL_SEARCH_PATTERN_ESCAPE = 14, Text("\\")),
    info!(SQL_DATABASE_NAME = 16, Text("")),
    info!(SQL_DBMS_NAME = 17, Text("")),
    info!(SQL_DBMS_VER = 18, Text("")),
    info!(SQL_ACCESSIBLE_TABLES = 19, Text("")),
    info!(SQL_ACCESSIBLE_PROCEDURES = 20, Text("N")),
    info!(SQL_CURSOR_COMMIT_BEHAVIOR = 23, UShort(1)),
    info!(SQL_CURSOR_ROLLBACK_BEHAVIOR = 24, UShort(1)),
    info!(SQL_DATA_SOURCE_READ_ONLY = 25, Text("N")),
    info!(SQL_EXPRESSIONS_IN_ORDERBY = 27, Text("")),
    info!(SQL_IDENTIFIER_QUOTE_CHAR = 29, Text("'")),
    info!(SQL_MAX_SCHEMA_NAME_LEN = 32, UShort(0)),
    info!(SQL_MAX_PROCEDURE_NAME_LEN = 33, UShort(0)),
    info!(SQL_MAX_CATALOG_NAME_LEN = 34, UShort(0)),
    info!(SQL_MAX_TABLE_NAME_LEN = 35, UShort(0)),
    info!(SQL_CATALOG_NAME_SEPARATOR = 41, Text(".")),
    info!(SQL_CATALOG_TERM = 42, Text("BASE")),
    info!(SQL_INTEGRITY = 73, Text("")),
    info!(SQL_CORRELATION_NAME = 74, UShort(2)),
    info!(SQL_NON_NULLABLE_COLUMNS = 75, UShort(0)),
    info!(SQL_DRIVER_ODBC_VER = 77, Text("03.51")),
    info!(SQL_GETDATA_EXTENSIONS = 81, UInteger(15)),
    info!(SQL_FILE_USAGE = 84, UShort(2)),
    info!(SQL_COLUMN_ALIAS = 87, Text("")),
    info!(SQL_KEYWORDS = 89, Text("")),
    info!(SQL_MAX_COLUMNS_IN_GROUP_BY = 97, UShort(0)),
    info!(SQL_MAX_COLUMNS_IN_INDEX = 98, UShort(0)),
    info!(SQL_MAX_COLUMNS_IN_ORDER_BY = 99, UShort(0)),
    info!(SQL_MAX_COLUMNS_IN_SELECT = 100, UShort(0)),
    info!(SQL_MAX_COLUMNS_IN_TABLE = 101, UShort(0)),
    info!(SQL_MAX_INDEX_SIZE = 102, UInteger(0)),
    info!(SQL_MAX_ROW_SIZE = 104, UInteger(0)),
    info!(SQL_MAX_STATEMENT_LEN = 105, UInteger(0)),
    info!(SQL_MAX_TABLES_IN_SELECT = 106, UShort(0)),
    info!(SQL_MAX_USER_NAME_LEN = 107, UShort(0)),
    info!(SQL_MAX_CHAR_LITERAL_LEN = 108, UInteger(0)),
    info!(SQL_MAX_BINARY_LITERAL_LEN = 112, UInteger(0)),
    info!(SQL_LIKE_ESCAPE_CLAUSE = 113, Text("")),
    info!(SQL_DM_VER = 171, Text("")),
    info!(SQL_DESCRIBE_PARAMETER = 10002, Text("")),
    info!(SQL_CATALOG_NAME = 10003, Text("")),
    info!(SQL_COLLATION_SEQ = 10004, Text("")),
    info!(SQL_MAX_IDENTIFIER_LEN = 10005, UShort(0)),
    info!(SQL_MAX_ASYNC_CONCURRENT_STATEMENTS = 10022, UInteger(0)),
];

/// Find the definition of an information type.
pub fn lookup(code: SQLUSMALLINT) -> Option<&'static InfoDefinition> {
    INFO_TYPES.iter().find(|def| def.code == code)
}

/// Symbolic name of an information type, or `Unknown type: <code>`.
pub fn describe_query_code(code: SQLUSMALLINT) -> Cow<'static, str> {
    match lookup(code) {
        Some(def) => Cow::Borrowed(def.name),
        None => Cow::Owned(format!("Unknown type: {code}")),
    }
}

/// Render the value a driver wrote for information type `code`.
///
/// `buffer` is the caller's output buffer and `length` the byte count the
/// driver reported (ignored for integer types).
pub fn describe_value(code: SQLUSMALLINT, buffer: &[u8], length: usize) -> String {
    match lookup(code) {
        Some(def) => def.value.decode(buffer, length),
        None => "Unknown Value".to_string(),
    }
}
