//! Opening the target driver and looking up its symbols.
//!
//! [`ModuleLoader`] / [`TargetModule`] are the seam between the lifecycle
//! logic and the platform loader. [`DlLoader`] is the production
//! implementation on top of `dlopen`/`dlsym`/`dlclose`. Only symbols defined
//! by the target object itself resolve; a same-named export of one of its
//! dependencies does not.

use std::ffi::c_void;
use std::path::Path;
use std::ptr::NonNull;

use crate::error::DetourError;

/// Address of a resolved entry point.
///
/// Only meaningful while the module it came from stays loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol(NonNull<c_void>);

// SAFETY: a symbol address is an immutable code pointer; sharing the number
// between threads is fine. Calling through it is what requires care, and that
// is gated behind `unsafe` in the forwarder.
unsafe impl Send for RawSymbol {}
unsafe impl Sync for RawSymbol {}

impl RawSymbol {
    /// Wrap a raw address; `None` for null.
    #[must_use]
    pub fn new(addr: *mut c_void) -> Option<Self> {
        NonNull::new(addr).map(Self)
    }

    /// Wrap the address of a native function.
    #[must_use]
    pub fn from_fn_addr(addr: usize) -> Option<Self> {
        Self::new(addr as *mut c_void)
    }

    #[must_use]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// A loaded target module.
pub trait TargetModule: Send {
    /// Look up an exported symbol by name.
    fn symbol(&self, name: &str) -> Option<RawSymbol>;

    /// Unload the module.
    ///
    /// On error the module is still loaded and may be closed again later.
    fn close(&mut self) -> Result<(), DetourError>;
}

/// Opens target modules.
pub trait ModuleLoader: Send + Sync {
    type Module: TargetModule;

    fn open(&self, path: &Path) -> Result<Self::Module, DetourError>;
}

#[cfg(unix)]
pub use self::dl::{DlLoader, DlModule};

#[cfg(unix)]
mod dl {
    use std::ffi::{CStr, CString, c_void};
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    use super::{ModuleLoader, RawSymbol, TargetModule};
    use crate::error::DetourError;

    /// `dlopen`-backed loader. Modules are opened `RTLD_NOW | RTLD_LOCAL` so
    /// the driver's symbols never shadow the shim's own exports.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct DlLoader;

    /// Handle returned by `dlopen`.
    #[derive(Debug)]
    pub struct DlModule {
        handle: *mut c_void,
    }

    // SAFETY: a dlopen handle is process-global and the dl* functions are
    // thread-safe.
    unsafe impl Send for DlModule {}

    /// Take the thread-local `dlerror` message, if any.
    fn last_dl_error() -> String {
        // SAFETY: dlerror returns null or a NUL-terminated string owned by libc.
        let msg = unsafe { libc::dlerror() };
        if msg.is_null() {
            return "unknown dynamic loader error".to_string();
        }
        // SAFETY: non-null dlerror result is a valid C string until the next dl* call.
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }

    impl ModuleLoader for DlLoader {
        type Module = DlModule;

        fn open(&self, path: &Path) -> Result<DlModule, DetourError> {
            let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
                DetourError::InvalidPath {
                    path: path.to_path_buf(),
                }
            })?;
            // SAFETY: c_path is a valid NUL-terminated string.
            let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
            if handle.is_null() {
                return Err(DetourError::TargetUnavailable {
                    path: path.to_path_buf(),
                    reason: last_dl_error(),
                });
            }
            Ok(DlModule { handle })
        }
    }

    impl DlModule {
        /// Whether `symbol` lies in this object rather than in one of its
        /// dependencies. `dlsym` on a library handle searches the whole
        /// dependency tree.
        fn defines(&self, symbol: RawSymbol) -> bool {
            // SAFETY: Dl_info is plain pointers; all-zero is a valid value.
            let mut info: libc::Dl_info = unsafe { std::mem::zeroed() };
            // SAFETY: info is a valid out-pointer; any address may be queried.
            if unsafe { libc::dladdr(symbol.as_ptr().cast_const(), &raw mut info) } == 0
                || info.dli_fname.is_null()
            {
                return false;
            }
            // RTLD_NOLOAD hands back the handle of the already-loaded owner,
            // which equals ours iff the symbol is defined here.
            // SAFETY: dli_fname is a NUL-terminated path owned by the loader.
            let owner =
                unsafe { libc::dlopen(info.dli_fname, libc::RTLD_LAZY | libc::RTLD_NOLOAD) };
            if owner.is_null() {
                return false;
            }
            let same = owner == self.handle;
            // SAFETY: balances the reference taken by the RTLD_NOLOAD open.
            unsafe { libc::dlclose(owner) };
            same
        }
    }

    impl TargetModule for DlModule {
        fn symbol(&self, name: &str) -> Option<RawSymbol> {
            if self.handle.is_null() {
                return None;
            }
            let c_name = CString::new(name).ok()?;
            // SAFETY: handle came from dlopen and has not been closed; c_name
            // is NUL-terminated.
            let addr = unsafe { libc::dlsym(self.handle, c_name.as_ptr()) };
            let symbol = RawSymbol::new(addr)?;
            self.defines(symbol).then_some(symbol)
        }

        fn close(&mut self) -> Result<(), DetourError> {
            if self.handle.is_null() {
                return Ok(());
            }
            // SAFETY: handle came from dlopen and has not been closed yet.
            let rc = unsafe { libc::dlclose(self.handle) };
            if rc != 0 {
                return Err(DetourError::UnloadFailed {
                    reason: last_dl_error(),
                });
            }
            self.handle = std::ptr::null_mut();
            Ok(())
        }
    }
}
