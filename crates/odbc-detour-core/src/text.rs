//! Display conversion for ODBC string arguments.
//!
//! ODBC passes strings as a buffer plus a length that is either a count of
//! characters, `SQL_NTS` for NUL-terminated, or a negative marker meaning the
//! value is absent. These helpers turn such a pair into text for a trace
//! line. Absent values render as [`NULL_PLACEHOLDER`].

use crate::sql::SQL_NTS;

/// Rendering of an absent string argument.
pub const NULL_PLACEHOLDER: &str = "NULL";

/// How many code units of a string argument should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextExtent {
    /// Value is absent; render the placeholder.
    Absent,
    /// Read up to the first NUL.
    NulTerminated,
    /// Read exactly this many code units.
    Counted(usize),
}

/// Classify an ODBC length argument.
///
/// `0` and every negative value other than `SQL_NTS` denote an absent value.
#[inline]
pub fn extent(length: i32) -> TextExtent {
    if length == SQL_NTS {
        TextExtent::NulTerminated
    } else if length <= 0 {
        TextExtent::Absent
    } else {
        TextExtent::Counted(length as usize)
    }
}

/// Returns the length of a NUL-terminated unit string (not counting the NUL).
///
/// If no NUL is found, returns the full slice length.
pub fn unit_len<T: Copy + Default + PartialEq>(s: &[T]) -> usize {
    let nul = T::default();
    s.iter().position(|&c| c == nul).unwrap_or(s.len())
}

/// Render a wide (UTF-16) string argument.
///
/// `units` is `None` for a null pointer. For [`TextExtent::NulTerminated`]
/// the slice is scanned for the terminator; for a counted length at most
/// `units.len()` code units are read. Unpaired surrogates become U+FFFD.
pub fn display_wide(units: Option<&[u16]>, length: i32) -> String {
    let Some(units) = units else {
        return NULL_PLACEHOLDER.to_string();
    };
    match extent(length) {
        TextExtent::Absent => NULL_PLACEHOLDER.to_string(),
        TextExtent::NulTerminated => String::from_utf16_lossy(&units[..unit_len(units)]),
        TextExtent::Counted(n) => String::from_utf16_lossy(&units[..n.min(units.len())]),
    }
}

/// Render a narrow (8-bit) string argument. Invalid UTF-8 is replaced.
pub fn display_narrow(bytes: Option<&[u8]>, length: i32) -> String {
    let Some(bytes) = bytes else {
        return NULL_PLACEHOLDER.to_string();
    };
    match extent(length) {
        TextExtent::Absent => NULL_PLACEHOLDER.to_string(),
        TextExtent::NulTerminated => {
            String::from_utf8_lossy(&bytes[..unit_len(bytes)]).into_owned()
        }
        TextExtent::Counted(n) => String::from_utf8_lossy(&bytes[..n.min(bytes.len())]).into_owned(),
    }
}

/// Decode a UTF-16 payload whose size is given in bytes.
///
/// Used for `SQLPOINTER` outputs, where the driver reports octets even when
/// the buffer holds wide characters. A trailing odd byte is ignored.
pub fn decode_wide_bytes(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units[..unit_len(&units)])
}

/// Encode `text` as UTF-16 into `out`, truncating to fit.
///
/// Returns the number of bytes written. No terminator is appended.
pub fn encode_wide_bytes(text: &str, out: &mut [u8]) -> usize {
    let mut written = 0;
    for unit in text.encode_utf16() {
        if written + 2 > out.len() {
            break;
        }
        out[written..written + 2].copy_from_slice(&unit.to_ne_bytes());
        written += 2;
    }
    written
}
