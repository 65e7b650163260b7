//! Handle allocation and environment attributes.
//!
//! Allocating an environment loads the target driver on first use; freeing
//! the last environment unloads it.

use odbc_detour_core::sql::{
    SQL_ERROR, SQL_HANDLE_ENV, SQLHANDLE, SQLHDBC, SQLHENV, SQLHSTMT, SQLINTEGER, SQLPOINTER,
    SQLRETURN, SQLSMALLINT, SQLUSMALLINT, handle_type_name,
};

use crate::state::Call;
use crate::util::{Plain, render_args};

fn handle_type_arg(handle_type: SQLSMALLINT) -> String {
    match handle_type_name(handle_type) {
        Some(name) => name.to_string(),
        None => handle_type.to_string(),
    }
}

abi_fn! {
    fn SQLAllocEnv(environment_handle: *mut SQLHENV) -> SQLRETURN {
        let call = Call::<Entry>::enter(|| render_args(&[&environment_handle]));
        if call.detour().acquire().is_err() {
            return call.exit(SQL_ERROR);
        }
        let rc = call.forward((environment_handle,));
        call.exit(rc)
    }
}

abi_fn! {
    fn SQLFreeEnv(environment_handle: SQLHENV) -> SQLRETURN {
        let call = Call::<Entry>::enter(|| render_args(&[&environment_handle]));
        let rc = call.forward((environment_handle,));
        // A failed unload is traced by the lifecycle and does not change `rc`.
        let _ = call.detour().release();
        call.exit(rc)
    }
}

abi_fn! {
    fn SQLAllocHandle(
        handle_type: SQLSMALLINT,
        input_handle: SQLHANDLE,
        output_handle: *mut SQLHANDLE,
    ) -> SQLRETURN {
        let call = Call::<Entry>::enter(|| {
            render_args(&[&Plain(&handle_type_arg(handle_type)), &input_handle, &output_handle])
        });
        if handle_type == SQL_HANDLE_ENV && call.detour().acquire().is_err() {
            return call.exit(SQL_ERROR);
        }
        let rc = call.forward((handle_type, input_handle, output_handle));
        call.exit(rc)
    }
}

abi_fn! {
    fn SQLFreeHandle(handle_type: SQLSMALLINT, handle: SQLHANDLE) -> SQLRETURN {
        let call = Call::<Entry>::enter(|| {
            render_args(&[&Plain(&handle_type_arg(handle_type)), &handle])
        });
        let rc = call.forward((handle_type, handle));
        if handle_type == SQL_HANDLE_ENV {
            let _ = call.detour().release();
        }
        call.exit(rc)
    }
}

odbc_fn! {
    fn SQLAllocConnect(environment_handle: SQLHENV, connection_handle: *mut SQLHDBC) -> SQLRETURN;
}

odbc_fn! {
    fn SQLFreeConnect(connection_handle: SQLHDBC) -> SQLRETURN;
}

odbc_fn! {
    fn SQLAllocStmt(connection_handle: SQLHDBC, statement_handle: *mut SQLHSTMT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLFreeStmt(statement_handle: SQLHSTMT, option: SQLUSMALLINT) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetEnvAttr(
        environment_handle: SQLHENV,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        value_length: SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetEnvAttr(
        environment_handle: SQLHENV,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odbc_detour_core::sql::SQL_HANDLE_STMT;

    #[test]
    fn handle_types_render_by_name() {
        assert_eq!(handle_type_arg(SQL_HANDLE_ENV), "SQL_HANDLE_ENV");
        assert_eq!(handle_type_arg(SQL_HANDLE_STMT), "SQL_HANDLE_STMT");
        assert_eq!(handle_type_arg(42), "42");
    }
}
