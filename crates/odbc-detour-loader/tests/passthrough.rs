//! End-to-end forwarding through a `Detour` backed by an in-process driver.

use std::collections::HashMap;
use std::ffi::c_void;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use odbc_detour_core::sql::{
    BOOL, FALSE, SQL_ERROR, SQL_HANDLE_ENV, SQL_SUCCESS, SQL_SUCCESS_WITH_INFO, SQLHANDLE,
    SQLINTEGER, SQLRETURN, SQLSMALLINT, SQLWCHAR, WORD,
};
use odbc_detour_loader::{
    Detour, DetourError, MemorySink, ModuleLoader, RawSymbol, TargetModule, declare_entry_point,
};

declare_entry_point!(SQLAllocHandle(SQLSMALLINT, SQLHANDLE, *mut SQLHANDLE) -> SQLRETURN);
declare_entry_point!(SQLGetInfoW(SQLHANDLE, u16, *mut c_void, SQLSMALLINT, *mut SQLSMALLINT) -> SQLRETURN);
declare_entry_point!(SQLExecDirectW(SQLHANDLE, *mut SQLWCHAR, SQLINTEGER) -> SQLRETURN);
declare_entry_point!(SQLCancel(SQLHANDLE) -> SQLRETURN);
declare_entry_point!(ConfigDSNW(*mut c_void, WORD, *const SQLWCHAR, *const SQLWCHAR) -> BOOL);

static EXEC_CALLS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "system" fn drv_alloc_handle(
    kind: SQLSMALLINT,
    _input: SQLHANDLE,
    out: *mut SQLHANDLE,
) -> SQLRETURN {
    unsafe { *out = (0x1000 + kind as usize) as SQLHANDLE };
    SQL_SUCCESS
}

unsafe extern "system" fn drv_get_info_w(
    _dbc: SQLHANDLE,
    _info_type: u16,
    value: *mut c_void,
    _buffer_len: SQLSMALLINT,
    string_len: *mut SQLSMALLINT,
) -> SQLRETURN {
    let text: Vec<u16> = "ACE".encode_utf16().collect();
    unsafe {
        std::ptr::copy_nonoverlapping(text.as_ptr(), value.cast::<u16>(), text.len());
        *string_len = (text.len() * 2) as SQLSMALLINT;
    }
    SQL_SUCCESS_WITH_INFO
}

unsafe extern "system" fn drv_exec_direct_w(
    _stmt: SQLHANDLE,
    _text: *mut SQLWCHAR,
    len: SQLINTEGER,
) -> SQLRETURN {
    EXEC_CALLS.fetch_add(1, Ordering::SeqCst);
    len as SQLRETURN
}

#[derive(Default)]
struct Counts {
    opens: AtomicUsize,
    closes: AtomicUsize,
}

struct InProcess {
    exports: HashMap<&'static str, usize>,
    counts: Arc<Counts>,
}

struct InProcessModule {
    exports: HashMap<&'static str, usize>,
    counts: Arc<Counts>,
}

impl TargetModule for InProcessModule {
    fn symbol(&self, name: &str) -> Option<RawSymbol> {
        RawSymbol::from_fn_addr(*self.exports.get(name)?)
    }

    fn close(&mut self) -> Result<(), DetourError> {
        self.counts.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl ModuleLoader for InProcess {
    type Module = InProcessModule;

    fn open(&self, _path: &Path) -> Result<InProcessModule, DetourError> {
        self.counts.opens.fetch_add(1, Ordering::SeqCst);
        Ok(InProcessModule {
            exports: self.exports.clone(),
            counts: Arc::clone(&self.counts),
        })
    }
}

fn driver() -> (InProcess, Arc<Counts>) {
    let alloc: unsafe extern "system" fn(SQLSMALLINT, SQLHANDLE, *mut SQLHANDLE) -> SQLRETURN =
        drv_alloc_handle;
    let info: unsafe extern "system" fn(
        SQLHANDLE,
        u16,
        *mut c_void,
        SQLSMALLINT,
        *mut SQLSMALLINT,
    ) -> SQLRETURN = drv_get_info_w;
    let exec: unsafe extern "system" fn(SQLHANDLE, *mut SQLWCHAR, SQLINTEGER) -> SQLRETURN =
        drv_exec_direct_w;
    let counts = Arc::new(Counts::default());
    let exports = HashMap::from([
        ("SQLAllocHandle", alloc as usize),
        ("SQLGetInfoW", info as usize),
        ("SQLExecDirectW", exec as usize),
    ]);
    (
        InProcess {
            exports,
            counts: Arc::clone(&counts),
        },
        counts,
    )
}

#[test]
fn full_catalog_reports_every_missing_entry_point() {
    let (loader, _) = driver();
    let sink = MemorySink::new();
    let detour = Detour::new(loader, "libinproc.so", Box::new(sink.clone()));
    detour.acquire().unwrap();

    assert_eq!(detour.registry().len(), 3);
    let lines = sink.lines();
    assert_eq!(lines.len(), odbc_detour_core::CATALOG.len() - 3);
    assert!(lines.iter().all(|l| l.starts_with("Failed to load function: ")));
    assert!(lines.contains(&"Failed to load function: SQLFetch".to_string()));
    assert!(!lines.contains(&"Failed to load function: SQLGetInfoW".to_string()));
}

#[test]
fn resolved_calls_are_transparent() {
    let (loader, _) = driver();
    let detour = Detour::new(loader, "libinproc.so", Box::new(MemorySink::new()));
    detour.acquire().unwrap();

    let mut env: SQLHANDLE = std::ptr::null_mut();
    let rc = unsafe {
        detour.forward::<SQLAllocHandle>((SQL_HANDLE_ENV, std::ptr::null_mut(), &raw mut env))
    };
    assert_eq!(rc, SQL_SUCCESS);
    assert_eq!(env as usize, 0x1001);

    let mut buffer = [0u16; 8];
    let mut written: SQLSMALLINT = 0;
    let rc = unsafe {
        detour.forward::<SQLGetInfoW>((
            env,
            17,
            buffer.as_mut_ptr().cast(),
            16,
            &raw mut written,
        ))
    };
    assert_eq!(rc, SQL_SUCCESS_WITH_INFO);
    assert_eq!(written, 6);
    assert_eq!(String::from_utf16_lossy(&buffer[..3]), "ACE");

    let before = EXEC_CALLS.load(Ordering::SeqCst);
    let mut sql: Vec<u16> = "SELECT 1".encode_utf16().collect();
    let rc = unsafe {
        detour.forward::<SQLExecDirectW>((env, sql.as_mut_ptr(), sql.len() as SQLINTEGER))
    };
    assert_eq!(rc, 8);
    assert_eq!(EXEC_CALLS.load(Ordering::SeqCst), before + 1);
}

#[test]
fn unresolved_calls_fail_by_return_class() {
    let (loader, _) = driver();
    let detour = Detour::new(loader, "libinproc.so", Box::new(MemorySink::new()));
    detour.acquire().unwrap();

    let rc = unsafe { detour.forward::<SQLCancel>((0x20 as SQLHANDLE,)) };
    assert_eq!(rc, SQL_ERROR);

    let null = std::ptr::null();
    let rc = unsafe { detour.forward::<ConfigDSNW>((std::ptr::null_mut(), 1, null, null)) };
    assert_eq!(rc, FALSE);
}

#[test]
fn calls_before_acquire_take_the_fallback() {
    let (loader, counts) = driver();
    let detour = Detour::new(loader, "libinproc.so", Box::new(MemorySink::new()));

    let mut env: SQLHANDLE = 0x77 as SQLHANDLE;
    let rc = unsafe {
        detour.forward::<SQLAllocHandle>((SQL_HANDLE_ENV, std::ptr::null_mut(), &raw mut env))
    };
    assert_eq!(rc, SQL_ERROR);
    assert_eq!(env as usize, 0x77);
    assert_eq!(counts.opens.load(Ordering::SeqCst), 0);
}

#[test]
fn balanced_environments_load_and_unload_once() {
    let (loader, counts) = driver();
    let detour = Detour::new(loader, "libinproc.so", Box::new(MemorySink::new()));

    for _ in 0..4 {
        detour.acquire().unwrap();
    }
    for _ in 0..4 {
        detour.release().unwrap();
    }
    assert_eq!(counts.opens.load(Ordering::SeqCst), 1);
    assert_eq!(counts.closes.load(Ordering::SeqCst), 1);
    assert!(detour.registry().is_empty());

    // After the final release every call falls back again.
    let rc = unsafe { detour.forward::<SQLCancel>((0x20 as SQLHANDLE,)) };
    assert_eq!(rc, SQL_ERROR);
    assert!(detour.find("SQLGetInfoW").is_none());
}

#[test]
fn concurrent_acquire_loads_once() {
    let (loader, counts) = driver();
    let detour = Arc::new(Detour::with_names(
        loader,
        "libinproc.so",
        ["SQLAllocHandle", "SQLGetInfoW"],
        Box::new(MemorySink::new()),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let detour = Arc::clone(&detour);
            std::thread::spawn(move || detour.acquire().unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counts.opens.load(Ordering::SeqCst), 1);
    assert_eq!(detour.lifecycle().use_count(), 8);
    assert_eq!(detour.registry().resolved_names(), ["SQLAllocHandle", "SQLGetInfoW"]);
}
