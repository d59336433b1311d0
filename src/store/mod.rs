//! Remote list store
//!
//! The list store is a hierarchical key-value tree rooted at
//! `grocery_lists`; items live at `grocery_lists/<folder>/<key>`. Keys are
//! generated by the store on `push`. Two backends implement [`ListStore`]:
//! the Firebase Realtime Database REST API and a local JSON document with
//! the same tree layout.

pub mod file;
pub mod firebase;

pub use file::JsonFileStore;
pub use firebase::FirebaseStore;

use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::config::settings::StoreBackend;
use crate::config::{GroceryPaths, Settings};
use crate::error::{GroceryError, GroceryResult};
use crate::models::ItemKey;

/// Name of the subtree holding all folders
pub const ROOT: &str = "grocery_lists";

/// A path inside the store tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    /// `grocery_lists`
    pub fn root() -> Self {
        Self {
            segments: vec![ROOT.to_string()],
        }
    }

    /// `grocery_lists/<folder>`
    pub fn folder(folder: &str) -> Self {
        Self {
            segments: vec![ROOT.to_string(), folder.to_string()],
        }
    }

    /// `grocery_lists/<folder>/<key>`
    pub fn item(folder: &str, key: &ItemKey) -> Self {
        Self {
            segments: vec![ROOT.to_string(), folder.to_string(), key.to_string()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Hierarchical, persisted key-value store
///
/// Calls are synchronous and blocking. Read failures surface as
/// `GroceryError::StoreRead`, write and delete failures as
/// `GroceryError::StoreWrite`.
pub trait ListStore {
    /// Append `record` as a new child of `path`, returning the generated key
    fn push(&self, path: &StorePath, record: &Value) -> GroceryResult<ItemKey>;

    /// Read the value at `path`; `None` when nothing is stored there
    fn get(&self, path: &StorePath) -> GroceryResult<Option<Value>>;

    /// Remove the value at `path`; removing a missing path is not an error
    fn delete(&self, path: &StorePath) -> GroceryResult<()>;
}

/// Open the backend selected in the settings
pub fn open_store(settings: &Settings, paths: &GroceryPaths) -> GroceryResult<Box<dyn ListStore>> {
    match settings.store.backend {
        StoreBackend::File => {
            let path = paths.store_file();
            info!(path = %path.display(), "Using local file list store");
            Ok(Box::new(JsonFileStore::new(path)))
        }
        StoreBackend::Firebase => {
            let url = settings.store.url.as_deref().ok_or_else(|| {
                GroceryError::Config("Firebase backend requires a store url".into())
            })?;
            info!(url, "Using Firebase list store");
            Ok(Box::new(FirebaseStore::new(
                url,
                settings.store.auth_token.clone(),
                std::time::Duration::from_secs(settings.store.timeout_secs),
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        assert_eq!(StorePath::root().to_string(), "grocery_lists");
        assert_eq!(StorePath::folder("home").to_string(), "grocery_lists/home");
        assert_eq!(
            StorePath::item("home", &ItemKey::from("-Nabc")).to_string(),
            "grocery_lists/home/-Nabc"
        );
    }

    #[test]
    fn test_open_file_store_by_default() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_store(&Settings::default(), &paths).unwrap();
        assert_eq!(store.get(&StorePath::root()).unwrap(), None);
    }
}
