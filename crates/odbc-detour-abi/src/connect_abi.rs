//! Connections, connection attributes and driver information.

use odbc_detour_core::info;
use odbc_detour_core::sql::{
    SQLHANDLE, SQLHDBC, SQLHWND, SQLINTEGER, SQLPOINTER, SQLRETURN, SQLSMALLINT, SQLUSMALLINT,
    SQLWCHAR, succeeded,
};
use odbc_detour_core::text::NULL_PLACEHOLDER;

use crate::state::Call;
use crate::util::{Plain, render_args, wide_arg};

odbc_fn! {
    fn SQLConnectW(
        connection_handle: SQLHDBC,
        server_name: *mut SQLWCHAR,
        server_name_length: SQLSMALLINT,
        user_name: *mut SQLWCHAR,
        user_name_length: SQLSMALLINT,
        authentication: *mut SQLWCHAR,
        authentication_length: SQLSMALLINT,
    ) -> SQLRETURN => [
        connection_handle,
        wide_arg(server_name, server_name_length),
        server_name_length,
        wide_arg(user_name, user_name_length),
        user_name_length,
        authentication,
        authentication_length,
    ];
}

odbc_fn! {
    fn SQLDriverConnectW(
        connection_handle: SQLHDBC,
        window_handle: SQLHWND,
        in_connection_string: *mut SQLWCHAR,
        in_length: SQLSMALLINT,
        out_connection_string: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        out_length: *mut SQLSMALLINT,
        driver_completion: SQLUSMALLINT,
    ) -> SQLRETURN => [
        connection_handle,
        window_handle,
        wide_arg(in_connection_string, in_length),
        in_length,
        out_connection_string,
        buffer_length,
        out_length,
        driver_completion,
    ];
}

odbc_fn! {
    fn SQLBrowseConnectW(
        connection_handle: SQLHDBC,
        in_connection_string: *mut SQLWCHAR,
        in_length: SQLSMALLINT,
        out_connection_string: *mut SQLWCHAR,
        buffer_length: SQLSMALLINT,
        out_length: *mut SQLSMALLINT,
    ) -> SQLRETURN => [
        connection_handle,
        wide_arg(in_connection_string, in_length),
        in_length,
        out_connection_string,
        buffer_length,
        out_length,
    ];
}

odbc_fn! {
    fn SQLDisconnect(connection_handle: SQLHDBC) -> SQLRETURN;
}

odbc_fn! {
    fn SQLSetConnectAttrW(
        connection_handle: SQLHDBC,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        value_length: SQLINTEGER,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLGetConnectAttrW(
        connection_handle: SQLHDBC,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;
}

/// Decode what the driver wrote for `info_type`.
///
/// Integer types are read at their natural width; strings are read up to the
/// reported length, capped at the buffer size.
///
/// # Safety
///
/// `value` must be null or valid for the reads described above.
unsafe fn returned_info(
    info_type: SQLUSMALLINT,
    value: SQLPOINTER,
    buffer_length: SQLSMALLINT,
    string_length: *const SQLSMALLINT,
) -> String {
    if value.is_null() {
        return NULL_PLACEHOLDER.to_string();
    }
    let reported = if string_length.is_null() {
        0
    } else {
        usize::try_from(unsafe { *string_length }).unwrap_or(0)
    };
    let len = match info::lookup(info_type).and_then(|def| def.value.scalar_width()) {
        Some(width) => width,
        None => reported.min(usize::try_from(buffer_length).unwrap_or(0)),
    };
    // SAFETY: see function contract.
    let bytes = unsafe { std::slice::from_raw_parts(value.cast::<u8>().cast_const(), len) };
    info::describe_value(info_type, bytes, reported)
}

abi_fn! {
    fn SQLGetInfoW(
        connection_handle: SQLHDBC,
        info_type: SQLUSMALLINT,
        value: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
    ) -> SQLRETURN {
        let call = Call::<Entry>::enter(|| {
            render_args(&[
                &connection_handle,
                &Plain(&info::describe_query_code(info_type)),
                &value,
                &buffer_length,
                &string_length,
            ])
        });
        let rc = call.forward((connection_handle, info_type, value, buffer_length, string_length));
        call.exit_as(rc, || {
            let type_name = info::describe_query_code(info_type);
            if succeeded(rc) {
                let shown = returned_info(info_type, value, buffer_length, string_length);
                render_args(&[&connection_handle, &Plain(&type_name), &shown])
            } else {
                render_args(&[&connection_handle, &Plain(&type_name)])
            }
        })
    }
}

odbc_fn! {
    fn SQLGetFunctions(
        connection_handle: SQLHDBC,
        function_id: SQLUSMALLINT,
        supported: *mut SQLUSMALLINT,
    ) -> SQLRETURN;
}

odbc_fn! {
    fn SQLNativeSqlW(
        connection_handle: SQLHDBC,
        in_statement: *mut SQLWCHAR,
        in_length: SQLINTEGER,
        out_statement: *mut SQLWCHAR,
        buffer_length: SQLINTEGER,
        out_length: *mut SQLINTEGER,
    ) -> SQLRETURN => [
        connection_handle,
        wide_arg(in_statement, in_length),
        in_length,
        out_statement,
        buffer_length,
        out_length,
    ];
}

odbc_fn! {
    fn SQLEndTran(
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        completion_type: SQLSMALLINT,
    ) -> SQLRETURN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_info_reads_integers_at_natural_width() {
        // SQL_GETDATA_EXTENSIONS
        let mut value = 15u32;
        let shown = unsafe {
            returned_info(81, (&raw mut value).cast(), 0, std::ptr::null())
        };
        assert_eq!(shown, "15");
    }

    #[test]
    fn returned_info_reads_reported_string_length() {
        // SQL_DBMS_NAME
        let mut units: Vec<u16> = "ACE Engine".encode_utf16().collect();
        units.push(0);
        let reported: SQLSMALLINT = 6;
        let shown = unsafe {
            returned_info(17, units.as_mut_ptr().cast(), 64, &raw const reported)
        };
        assert_eq!(shown, "ACE");
    }

    #[test]
    fn returned_info_caps_at_buffer() {
        let mut units: Vec<u16> = "ACE Engine".encode_utf16().collect();
        let reported: SQLSMALLINT = 20;
        let shown = unsafe {
            returned_info(17, units.as_mut_ptr().cast(), 4, &raw const reported)
        };
        assert_eq!(shown, "AC");
    }

    #[test]
    fn returned_info_null_buffer() {
        let shown = unsafe { returned_info(17, std::ptr::null_mut(), 0, std::ptr::null()) };
        assert_eq!(shown, "NULL");
    }

    #[test]
    fn returned_info_unknown_type() {
        let mut value = 0u64;
        let reported: SQLSMALLINT = 8;
        let shown = unsafe {
            returned_info(4242, (&raw mut value).cast(), 8, &raw const reported)
        };
        assert_eq!(shown, "Unknown Value");
    }
}
