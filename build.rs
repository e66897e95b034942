fn main() {
    // Tauri-generated build configuration; only needed for the desktop shell.
    #[cfg(feature = "desktop")]
    tauri_build::build();

    println!("cargo:rerun-if-changed=tauri.conf.json");
}
