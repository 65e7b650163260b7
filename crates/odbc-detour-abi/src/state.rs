//! Process-wide interception state and the per-call trace protocol.

use std::marker::PhantomData;
use std::sync::OnceLock;

use odbc_detour_core::ReturnCode;
use odbc_detour_loader::{Detour, DetourConfig, DlLoader, EntryPoint};

static DETOUR: OnceLock<Detour<DlLoader>> = OnceLock::new();

/// The shim's detour, configured from the environment on first use.
pub fn detour() -> &'static Detour<DlLoader> {
    DETOUR.get_or_init(|| Detour::from_config(DlLoader, &DetourConfig::from_env()))
}

/// One intercepted call.
///
/// `enter` writes `Name(args)`, `exit` writes `Name(args) -> result`. The
/// argument text is rendered once and only when tracing is on.
pub(crate) struct Call<E> {
    detour: &'static Detour<DlLoader>,
    shown: Option<String>,
    _entry: PhantomData<E>,
}

impl<E: EntryPoint> Call<E> {
    pub(crate) fn enter(render: impl FnOnce() -> String) -> Self {
        let detour = detour();
        let shown = detour.tracing().then(render);
        if let Some(shown) = &shown {
            detour.trace(&format!("{}({shown})", E::NAME));
        }
        Self {
            detour,
            shown,
            _entry: PhantomData,
        }
    }

    pub(crate) fn detour(&self) -> &'static Detour<DlLoader> {
        self.detour
    }

    /// # Safety
    /// `args` must satisfy the target function's contract.
    pub(crate) unsafe fn forward(&self, args: E::Args) -> E::Ret {
        // SAFETY: forwarded to the caller.
        unsafe { self.detour.forward::<E>(args) }
    }

    pub(crate) fn exit(self, rc: E::Ret) -> E::Ret {
        if let Some(shown) = &self.shown {
            self.detour
                .trace(&format!("{}({shown}) -> {}", E::NAME, rc.describe()));
        }
        rc
    }

    /// Like [`Call::exit`] but with a different argument list, for entry
    /// points whose outputs are worth showing.
    pub(crate) fn exit_as(self, rc: E::Ret, render: impl FnOnce() -> String) -> E::Ret {
        if self.shown.is_some() {
            self.detour
                .trace(&format!("{}({}) -> {}", E::NAME, render(), rc.describe()));
        }
        rc
    }
}

/// Trace, forward, trace.
///
/// # Safety
/// `args` must satisfy the target function's contract.
pub(crate) unsafe fn intercept<E: EntryPoint>(
    args: E::Args,
    render: impl FnOnce() -> String,
) -> E::Ret {
    let call = Call::<E>::enter(render);
    // SAFETY: forwarded to the caller.
    let rc = unsafe { call.forward(args) };
    call.exit(rc)
}
