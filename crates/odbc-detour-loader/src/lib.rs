//! # odbc-detour-loader
//!
//! The interception engine behind the odbc-detour shim.
//!
//! ```text
//! ABI entry -> Detour::forward::<E>() -> Registry::find(E::NAME)
//!                                          |-- hit:  call target, return its result
//!                                          `-- miss: E::Ret::FAILURE
//! ```
//!
//! [`Lifecycle`] loads the target driver on the first environment allocation,
//! asks the [`Registry`] to resolve the whole catalog once, and unloads the
//! driver when the last environment is freed. [`Detour`] ties the two to a
//! [`TraceSink`] and is the single object the ABI layer talks to.

pub mod config;
pub mod detour;
pub mod error;
pub mod forward;
pub mod lifecycle;
pub mod module;
pub mod registry;
pub mod trace;

pub use config::DetourConfig;
pub use detour::Detour;
pub use error::DetourError;
pub use forward::{EntryPoint, NativeFn};
pub use lifecycle::Lifecycle;
#[cfg(unix)]
pub use module::DlLoader;
pub use module::{ModuleLoader, RawSymbol, TargetModule};
pub use registry::Registry;
pub use trace::{LineSink, MemorySink, NullSink, TraceFormat, TraceSink, TraceTarget};
