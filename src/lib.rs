pub mod breeding;
pub mod commands;
pub mod dataset;
pub mod error;
pub mod feedlot;
pub mod models;
pub mod project;
pub mod state;
pub mod tracker;

use std::path::{Path, PathBuf};

use state::{AppState, Tracker};

/// Per-user application directory name under the OS config / data dirs.
const APP_DIR: &str = "agrodash";

/// `<config_dir>/agrodash/breeding.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(APP_DIR)
        .join("breeding.toml")
}

/// `<data_local_dir>/agrodash/tracker.json`
pub fn default_tracker_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_default()
        .join(APP_DIR)
        .join("tracker.json")
}

/// Build the startup state.
///
/// A missing configuration file means defaults; an unreadable or invalid one
/// is logged and also means defaults. The tracker is loaded from
/// `tracker_path` with the default milestones as fallback; an unreadable
/// tracker file is not kept as the save target.
pub fn build_state(config_path: &Path, tracker_path: &Path) -> AppState {
    let config = if config_path.exists() {
        match breeding::config::load(config_path) {
            Ok(cfg) => {
                tracing::info!(path = %config_path.display(), "breeding configuration loaded");
                cfg
            }
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "using default breeding configuration");
                breeding::BreedingConfig::default()
            }
        }
    } else {
        breeding::BreedingConfig::default()
    };

    let outcome = project::load_or_seed(tracker_path);
    let tracker = Tracker {
        source_path: outcome.save_target(tracker_path),
        milestones: outcome.milestones,
        ..Tracker::default()
    };

    AppState::new(config, tracker)
}

/// Agrodash Tauri application library entry point.
///
/// All Tauri builder setup lives here so it can be tested and referenced
/// by the thin `main.rs` binary wrapper.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // ── Tracing setup (must happen before anything else) ────────────────────
    //
    // Logs are written to a single file in the OS data dir:
    //   Linux    ~/.local/share/agrodash/agrodash.log
    //   macOS    ~/Library/Application Support/agrodash/agrodash.log
    //   Windows  %LOCALAPPDATA%\agrodash\agrodash.log
    //
    // Log level is controlled by the RUST_LOG environment variable;
    // defaults to INFO when the variable is absent.
    let log_dir = dirs::data_local_dir().unwrap_or_default().join(APP_DIR);

    // tracing_appender::rolling::never panics if it cannot open the log file.
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::never(&log_dir, "agrodash.log");
    let (non_blocking, _tracing_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    tracing::info!("Agrodash starting");

    // ── Application state ────────────────────────────────────────────────────
    let state = build_state(&default_config_path(), &default_tracker_path());

    // ── Tauri builder ────────────────────────────────────────────────────────
    tauri::Builder::default()
        .manage(state)
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .invoke_handler(tauri::generate_handler![
            commands::herd::load_herd,
            commands::herd::set_filter,
            commands::herd::get_breeding_snapshot,
            commands::herd::get_window_detail,
            commands::herd::search_animal,
            commands::herd::get_filter_options,
            commands::herd::load_breeding_config,
            commands::feedlot::load_feedlot,
            commands::feedlot::set_feedlot_filter,
            commands::feedlot::get_feedlot_snapshot,
            commands::milestones::list_milestones,
            commands::milestones::add_milestone,
            commands::milestones::edit_milestone,
            commands::milestones::delete_milestone,
            commands::milestones::move_milestone,
            commands::milestones::reorder_milestones,
            commands::sub_milestones::add_sub_milestone,
            commands::sub_milestones::edit_sub_milestone,
            commands::sub_milestones::delete_sub_milestone,
            commands::documents::add_document,
            commands::documents::edit_document,
            commands::documents::delete_document,
            commands::file::get_tracker_snapshot,
            commands::file::load_tracker,
            commands::file::save_tracker,
            commands::file::reset_tracker,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
