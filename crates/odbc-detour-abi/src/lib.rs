// Every export takes raw pointers from the driver manager and hands them to the
// target unchanged; the safety contract is the ODBC one for each function.
#![allow(clippy::missing_safety_doc)]
//! # odbc-detour-abi
//!
//! The interposing ODBC driver library.
//!
//! This crate produces a `cdylib` that exports the intercepted ODBC entry
//! points under their standard names. Each one writes a trace line, forwards
//! the call to the real driver through `odbc-detour-loader`, and traces the
//! result.
//!
//! # Architecture
//!
//! ```text
//! driver manager -> ABI entry (this crate) -> Detour::forward -> target driver
//!                        |                          `-- unresolved: SQL_ERROR / FALSE
//!                        `-- trace sink
//! ```
//!
//! The target is loaded by the first environment allocation and unloaded
//! when the last environment is freed. Its path and the trace destination
//! come from `ODBC_DETOUR_DRIVER` and `ODBC_DETOUR_TRACE`.

#[cfg(unix)]
#[macro_use]
mod macros;

#[cfg(unix)]
pub mod state;
pub mod util;

#[cfg(unix)]
pub mod catalog_abi;
#[cfg(unix)]
pub mod connect_abi;
#[cfg(unix)]
pub mod desc_abi;
#[cfg(unix)]
pub mod diag_abi;
#[cfg(unix)]
pub mod handle_abi;
#[cfg(unix)]
pub mod installer_abi;
#[cfg(unix)]
pub mod statement_abi;
