//! Signature descriptors and the generic forwarder.
//!
//! Every exported entry point has a zero-sized marker type implementing
//! [`EntryPoint`], which names the function and fixes its native signature.
//! [`forward`] looks the name up in the [`Registry`] and either calls the
//! target's function with the argument tuple unchanged or returns the
//! failure value of the entry point's return class.

use std::ffi::c_void;

use odbc_detour_core::ReturnCode;

use crate::module::RawSymbol;
use crate::registry::Registry;

/// A native function pointer callable with an argument tuple.
pub trait NativeFn<Args>: Copy {
    type Output;

    /// Reinterpret a resolved address as this function type.
    ///
    /// # Safety
    /// `sym` must be the address of a function with exactly this signature and
    /// calling convention.
    unsafe fn from_symbol(sym: RawSymbol) -> Self;

    /// Call the function.
    ///
    /// # Safety
    /// The function's own contract applies to `args`, and the module that
    /// provides it must still be loaded.
    unsafe fn invoke(self, args: Args) -> Self::Output;
}

macro_rules! impl_native_fn {
    ($($ty:ident $arg:ident),*) => {
        impl<R, $($ty),*> NativeFn<($($ty,)*)> for unsafe extern "system" fn($($ty),*) -> R {
            type Output = R;

            unsafe fn from_symbol(sym: RawSymbol) -> Self {
                debug_assert_eq!(size_of::<Self>(), size_of::<*mut c_void>());
                // SAFETY: function pointers and data pointers share a
                // representation on every supported target; the caller
                // guarantees the signature.
                unsafe { std::mem::transmute_copy::<*mut c_void, Self>(&sym.as_ptr()) }
            }

            unsafe fn invoke(self, ($($arg,)*): ($($ty,)*)) -> R {
                // SAFETY: forwarded to the caller.
                unsafe { (self)($($arg),*) }
            }
        }
    };
}

impl_native_fn!();
impl_native_fn!(A0 a0);
impl_native_fn!(A0 a0, A1 a1);
impl_native_fn!(A0 a0, A1 a1, A2 a2);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9);
impl_native_fn!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10);

/// Signature descriptor for one intercepted entry point.
pub trait EntryPoint {
    /// Exported symbol name, looked up in the target as-is.
    const NAME: &'static str;
    type Args;
    type Ret: ReturnCode;
    type Fn: NativeFn<Self::Args, Output = Self::Ret>;
}

/// Declare an [`EntryPoint`] marker type.
///
/// The marker is named after the symbol unless a name is given with
/// `Marker = Symbol(..)`.
///
/// ```
/// use odbc_detour_core::sql::{SQLHSTMT, SQLRETURN};
/// use odbc_detour_loader::EntryPoint;
///
/// odbc_detour_loader::declare_entry_point!(pub SQLFetch(SQLHSTMT) -> SQLRETURN);
/// odbc_detour_loader::declare_entry_point!(Cancel = SQLCancel(SQLHSTMT) -> SQLRETURN);
///
/// assert_eq!(SQLFetch::NAME, "SQLFetch");
/// assert_eq!(Cancel::NAME, "SQLCancel");
/// ```
#[macro_export]
macro_rules! declare_entry_point {
    ($vis:vis $marker:ident = $name:ident($($ty:ty),* $(,)?) -> $ret:ty) => {
        #[allow(non_camel_case_types)]
        $vis enum $marker {}

        impl $crate::EntryPoint for $marker {
            const NAME: &'static str = stringify!($name);
            type Args = ($($ty,)*);
            type Ret = $ret;
            type Fn = unsafe extern "system" fn($($ty),*) -> $ret;
        }
    };
    ($vis:vis $name:ident($($ty:ty),* $(,)?) -> $ret:ty) => {
        $crate::declare_entry_point!($vis $name = $name($($ty),*) -> $ret);
    };
}

/// Call `E` in the target, or return its failure value if it is unresolved.
///
/// Arguments and the result pass through untouched. On the unresolved path
/// nothing is written through any pointer argument.
///
/// # Safety
/// The registry entry for `E::NAME` must have been resolved from a module that
/// exports it with `E`'s signature, and `args` must satisfy that function's
/// contract.
pub unsafe fn forward<E: EntryPoint>(registry: &Registry, args: E::Args) -> E::Ret {
    match registry.find(E::NAME) {
        // SAFETY: see function contract.
        Some(sym) => unsafe { E::Fn::from_symbol(sym).invoke(args) },
        None => <E::Ret as ReturnCode>::FAILURE,
    }
}
