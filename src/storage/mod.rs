//! Local storage for grocery-cli
//!
//! JSON files with atomic writes and automatic directory creation. The
//! grocery lists themselves live in the list store (see `crate::store`);
//! this layer keeps the per-user state around them.

pub mod file_io;
pub mod sessions;

pub use file_io::{read_json, write_json_atomic};
pub use sessions::SessionRepository;

use tracing::info;

use crate::config::paths::GroceryPaths;
use crate::config::settings::Settings;
use crate::error::GroceryResult;

/// Prepare a fresh installation
///
/// Creates the directory layout and writes default settings when none
/// exist yet. Returns whether anything was created.
pub fn initialize_storage(paths: &GroceryPaths) -> GroceryResult<bool> {
    let fresh = !paths.is_initialized();
    paths.ensure_directories()?;

    if fresh {
        Settings::default().save(paths)?;
        info!(path = %paths.settings_file().display(), "Wrote default settings");
    }
    Ok(fresh)
}
