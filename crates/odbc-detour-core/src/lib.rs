//! # odbc-detour-core
//!
//! Pure-logic building blocks for the odbc-detour interception shim.
//!
//! Nothing in this crate touches a raw pointer or a loaded module. It holds
//! the ODBC scalar types and constants the shim speaks, the fixed catalog of
//! intercepted entry points, the text codec used when rendering string
//! arguments, and the `SQLGetInfo` value-description tables.

#![deny(unsafe_code)]

pub mod catalog;
pub mod info;
pub mod sql;
pub mod text;

pub use catalog::{CATALOG, EntryPointSpec, ReturnClass, ReturnCode};
