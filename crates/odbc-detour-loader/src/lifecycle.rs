//! Reference-counted load/unload of the target driver.
//!
//! ```text
//! Unloaded --acquire--> Loaded(1) --acquire--> Loaded(n+1)
//! Loaded(n>1) --release--> Loaded(n-1)
//! Loaded(1)   --release, close ok--> Unloaded
//! Loaded(1)   --release, close err--> Loaded(1)
//! ```

use std::fmt;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::DetourError;
use crate::module::{ModuleLoader, TargetModule};
use crate::registry::Registry;
use crate::trace::TraceSink;

struct State<M> {
    module: Option<M>,
    use_count: usize,
}

/// Owns the target module handle and the environment use count.
pub struct Lifecycle<L: ModuleLoader> {
    loader: L,
    path: PathBuf,
    names: Vec<&'static str>,
    state: Mutex<State<L::Module>>,
}

impl<L: ModuleLoader> fmt::Debug for Lifecycle<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Lifecycle")
            .field("path", &self.path)
            .field("loaded", &state.module.is_some())
            .field("use_count", &state.use_count)
            .finish_non_exhaustive()
    }
}

impl<L: ModuleLoader> Lifecycle<L> {
    /// Manage the driver at `path`, resolving the full entry-point catalog.
    pub fn new(loader: L, path: impl Into<PathBuf>) -> Self {
        Self::with_names(loader, path, odbc_detour_core::catalog::names())
    }

    /// Manage the driver at `path`, resolving only `names`.
    pub fn with_names<I>(loader: L, path: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            loader,
            path: path.into(),
            names: names.into_iter().collect(),
            state: Mutex::new(State {
                module: None,
                use_count: 0,
            }),
        }
    }

    /// Take one reference on the target, loading and resolving it if needed.
    ///
    /// Missing entry points are traced but do not fail the call; only a
    /// module that cannot be opened does, and then the state is untouched.
    pub fn acquire(&self, registry: &Registry, sink: &dyn TraceSink) -> Result<(), DetourError> {
        let mut state = self.state.lock();
        if state.module.is_some() {
            state.use_count += 1;
            return Ok(());
        }

        let module = self.loader.open(&self.path)?;
        registry.clear();
        registry.resolve(&module, self.names.iter().copied(), sink);
        state.module = Some(module);
        state.use_count = 1;
        Ok(())
    }

    /// Drop one reference; the last one unloads the target.
    ///
    /// If the unload fails the module stays loaded with its count unchanged
    /// and the failure is traced and returned.
    pub fn release(&self, registry: &Registry, sink: &dyn TraceSink) -> Result<(), DetourError> {
        let mut state = self.state.lock();
        let State { module, use_count } = &mut *state;
        let Some(loaded) = module.as_mut() else {
            return Ok(());
        };
        if *use_count > 1 {
            *use_count -= 1;
            return Ok(());
        }

        if let Err(err) = loaded.close() {
            sink.write_line(&format!("Failed to unload {}: {err}", self.path.display()));
            return Err(err);
        }
        registry.clear();
        *module = None;
        *use_count = 0;
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state.lock().module.is_some()
    }

    #[must_use]
    pub fn use_count(&self) -> usize {
        self.state.lock().use_count
    }
}
