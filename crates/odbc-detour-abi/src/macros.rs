//! Helper macros for exported entry points.
//!
//! `abi_fn!` generates the `#[unsafe(no_mangle)] pub unsafe extern "system" fn`
//! together with its [`EntryPoint`](odbc_detour_loader::EntryPoint) marker,
//! named `Entry` inside the function. `odbc_fn!` builds on it for the common
//! trace-forward-trace wrapper.

/// Generate an exported entry point with a hand-written body.
///
/// # Usage
///
/// ```ignore
/// abi_fn! {
///     fn SQLFreeEnv(environment_handle: SQLHENV) -> SQLRETURN {
///         let call = Call::<Entry>::enter(|| render_args(&[&environment_handle]));
///         // ...
///     }
/// }
/// ```
///
/// Fails to compile if the name is not in the entry-point catalog or its
/// return type does not match the catalog's return class.
macro_rules! abi_fn {
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        #[unsafe(no_mangle)]
        pub unsafe extern "system" fn $name( $($arg : $argty),* ) -> $ret {
            odbc_detour_loader::declare_entry_point!(Entry = $name($($argty),*) -> $ret);

            const _: () = assert!(
                matches!(
                    odbc_detour_core::catalog::class_of(stringify!($name)),
                    Some(class) if class.is(<$ret as odbc_detour_core::ReturnCode>::CLASS)
                ),
                concat!(stringify!($name), " does not match the entry-point catalog"),
            );

            unsafe { $body }
        }
    };
}

/// Generate a plain forwarding entry point.
///
/// Every argument is traced with `Debug` (integers in decimal, pointers in
/// hex), unless an explicit list follows `=>`.
///
/// ```ignore
/// odbc_fn! {
///     fn SQLPrepareW(statement_handle: SQLHSTMT, text: *mut SQLWCHAR, text_length: SQLINTEGER)
///         -> SQLRETURN => [statement_handle, wide_arg(text, text_length), text_length];
/// }
/// ```
macro_rules! odbc_fn {
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        => [ $($shown:expr),* $(,)? ];
    ) => {
        abi_fn! {
            $(#[$meta])*
            fn $name( $($arg : $argty),* ) -> $ret {
                $crate::state::intercept::<Entry>(
                    ($($arg,)*),
                    || $crate::util::render_args(&[$(&$shown),*]),
                )
            }
        }
    };
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty;
    ) => {
        odbc_fn! {
            $(#[$meta])*
            fn $name( $($arg : $argty),* ) -> $ret => [ $($arg),* ];
        }
    };
}

#[allow(unused_imports)]
pub(crate) use {abi_fn, odbc_fn};
