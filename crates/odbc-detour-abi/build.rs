fn main() {
    println!("cargo:rerun-if-changed=version_scripts/odbc.map");

    // GNU-style linkers only; elsewhere every `no_mangle` symbol is exported.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if !matches!(target_os.as_str(), "linux" | "android" | "freebsd") {
        return;
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let version_script = format!("{manifest_dir}/version_scripts/odbc.map");
    if std::path::Path::new(&version_script).exists() {
        println!("cargo:rustc-cdylib-link-arg=-Wl,--version-script={version_script}");
    }
}
