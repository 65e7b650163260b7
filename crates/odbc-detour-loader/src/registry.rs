//! Entry-point name to address table for the loaded target driver.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::module::{RawSymbol, TargetModule};
use crate::trace::TraceSink;

/// Resolved entry points of the currently loaded target.
///
/// A name is present iff it was resolved against the module that is loaded
/// right now. The table is written only while the lifecycle lock is held;
/// lookups take the read side and copy the address out.
#[derive(Debug, Default)]
pub struct Registry {
    symbols: RwLock<HashMap<&'static str, RawSymbol>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every name in `names` against `module`.
    ///
    /// A failed lookup is traced and skipped; the rest of the batch still
    /// runs. Always returns `true` once the whole list has been attempted.
    pub fn resolve<M, I>(&self, module: &M, names: I, sink: &dyn TraceSink) -> bool
    where
        M: TargetModule + ?Sized,
        I: IntoIterator<Item = &'static str>,
    {
        let mut resolved = Vec::new();
        for name in names {
            match module.symbol(name) {
                Some(sym) => resolved.push((name, sym)),
                None => sink.write_line(&format!("Failed to load function: {name}")),
            }
        }
        self.symbols.write().extend(resolved);
        true
    }

    /// Address of `name`, if it was resolved.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<RawSymbol> {
        self.symbols.read().get(name).copied()
    }

    /// Forget every resolved address.
    pub fn clear(&self) {
        self.symbols.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.read().is_empty()
    }

    /// Resolved names, sorted.
    #[must_use]
    pub fn resolved_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.symbols.read().keys().copied().collect();
        names.sort_unstable();
        names
    }
}
