//! Shared internal utilities for entry-point adapters.

use std::fmt;

use odbc_detour_core::sql::{SQLCHAR, SQLWCHAR};
use odbc_detour_core::text::{self, NULL_PLACEHOLDER, TextExtent};

/// Upper bound on code units scanned for a NUL-terminated argument.
pub const MAX_TRACE_UNITS: usize = 64 * 1024;

/// Scan a NUL-terminated unit string, reading at most `bound` units.
///
/// Returns `(len, terminated)` where:
/// - `len` is the unit count before the first NUL or before the bound.
/// - `terminated` indicates whether a NUL unit was observed.
///
/// # Safety
///
/// `ptr` must be valid to read up to the discovered length, never more than
/// `bound` units.
pub unsafe fn scan_units<T: Copy + Default + PartialEq>(
    ptr: *const T,
    bound: usize,
) -> (usize, bool) {
    let nul = T::default();
    for i in 0..bound {
        if unsafe { *ptr.add(i) } == nul {
            return (i, true);
        }
    }
    (bound, false)
}

/// Borrow the units of a string argument as the text codec will read them.
///
/// # Safety
///
/// For a counted length `ptr` must be valid for that many units; for
/// `SQL_NTS` it must be NUL-terminated or valid for [`MAX_TRACE_UNITS`].
unsafe fn arg_units<'a, T: Copy + Default + PartialEq>(
    ptr: *const T,
    length: i32,
) -> Option<&'a [T]> {
    if ptr.is_null() {
        return None;
    }
    let len = match text::extent(length) {
        TextExtent::Absent => return None,
        TextExtent::NulTerminated => {
            let (len, terminated) = unsafe { scan_units(ptr, MAX_TRACE_UNITS) };
            len + usize::from(terminated)
        }
        TextExtent::Counted(n) => n,
    };
    // SAFETY: see function contract.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Render a wide string argument for a trace line.
///
/// # Safety
///
/// As for the pointer/length pair in the ODBC call it came from.
pub unsafe fn wide_arg(ptr: *const SQLWCHAR, length: impl Into<i32>) -> String {
    let length = length.into();
    match unsafe { arg_units(ptr, length) } {
        Some(units) => text::display_wide(Some(units), length),
        None => NULL_PLACEHOLDER.to_string(),
    }
}

/// Render a narrow string argument for a trace line.
///
/// # Safety
///
/// As for the pointer/length pair in the ODBC call it came from.
pub unsafe fn narrow_arg(ptr: *const SQLCHAR, length: impl Into<i32>) -> String {
    let length = length.into();
    match unsafe { arg_units(ptr, length) } {
        Some(bytes) => text::display_narrow(Some(bytes), length),
        None => NULL_PLACEHOLDER.to_string(),
    }
}

/// Text shown without the quotes `Debug` would add.
pub struct Plain<'a>(pub &'a str);

impl fmt::Debug for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Join arguments with `", "`, each in its `Debug` form.
///
/// Strings come out quoted and escaped, pointers in hex.
pub fn render_args(args: &[&dyn fmt::Debug]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{arg:?}"));
    }
    out
}
