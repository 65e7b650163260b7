//! The interception context: registry, lifecycle and trace sink together.

use std::fmt;
use std::path::PathBuf;

use crate::config::DetourConfig;
use crate::error::DetourError;
use crate::forward::{self, EntryPoint};
use crate::lifecycle::Lifecycle;
use crate::module::{ModuleLoader, RawSymbol};
use crate::registry::Registry;
use crate::trace::{LineSink, TraceSink};

/// Everything an exported entry point needs.
pub struct Detour<L: ModuleLoader> {
    registry: Registry,
    lifecycle: Lifecycle<L>,
    sink: Box<dyn TraceSink>,
}

impl<L: ModuleLoader> fmt::Debug for Detour<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detour")
            .field("registry", &self.registry)
            .field("lifecycle", &self.lifecycle)
            .field("tracing", &self.sink.enabled())
            .finish()
    }
}

impl<L: ModuleLoader> Detour<L> {
    /// Intercept the full catalog of the driver at `path`.
    pub fn new(loader: L, path: impl Into<PathBuf>, sink: Box<dyn TraceSink>) -> Self {
        Self {
            registry: Registry::new(),
            lifecycle: Lifecycle::new(loader, path),
            sink,
        }
    }

    /// Intercept only `names`.
    pub fn with_names<I>(
        loader: L,
        path: impl Into<PathBuf>,
        names: I,
        sink: Box<dyn TraceSink>,
    ) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            registry: Registry::new(),
            lifecycle: Lifecycle::with_names(loader, path, names),
            sink,
        }
    }

    /// Build from configuration, opening the configured trace destination.
    pub fn from_config(loader: L, config: &DetourConfig) -> Self {
        let sink = LineSink::for_target(&config.trace_target, config.trace_format);
        Self::new(loader, config.driver_path.clone(), sink)
    }

    /// Take an environment reference on the target. Load failures are traced.
    pub fn acquire(&self) -> Result<(), DetourError> {
        self.lifecycle
            .acquire(&self.registry, self.sink.as_ref())
            .inspect_err(|err| self.sink.write_line(&err.to_string()))
    }

    /// Drop an environment reference.
    pub fn release(&self) -> Result<(), DetourError> {
        self.lifecycle.release(&self.registry, self.sink.as_ref())
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<RawSymbol> {
        self.registry.find(name)
    }

    /// Call `E` in the target or return its failure value.
    ///
    /// # Safety
    /// As for [`forward::forward`].
    pub unsafe fn forward<E: EntryPoint>(&self, args: E::Args) -> E::Ret {
        // SAFETY: forwarded to the caller.
        unsafe { forward::forward::<E>(&self.registry, args) }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle<L> {
        &self.lifecycle
    }

    /// Whether trace lines are kept.
    #[must_use]
    pub fn tracing(&self) -> bool {
        self.sink.enabled()
    }

    pub fn trace(&self, message: &str) {
        self.sink.write_line(message);
    }
}
