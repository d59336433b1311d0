//! Path management for grocery-cli
//!
//! ## Path Resolution Order
//!
//! 1. `GROCERY_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/grocery-cli` or `~/.config/grocery-cli`
//! 3. Windows: `%APPDATA%\grocery-cli`

use std::path::PathBuf;

use crate::error::GroceryError;

/// Manages all paths used by grocery-cli
#[derive(Debug, Clone)]
pub struct GroceryPaths {
    base_dir: PathBuf,
}

impl GroceryPaths {
    /// Create a new GroceryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, GroceryError> {
        let base_dir = if let Ok(custom) = std::env::var("GROCERY_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GroceryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/grocery-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding one file per live session
    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir().join("sessions")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the local list store document (file backend)
    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("grocery_lists.json")
    }

    /// Get the path of the pointer to the current session
    pub fn current_session_file(&self) -> PathBuf {
        self.sessions_dir().join("current")
    }

    /// Get the path of a session's state file
    pub fn session_file(&self, session_id: &str) -> PathBuf {
        self.sessions_dir().join(format!("{}.json", session_id))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), GroceryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GroceryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.sessions_dir()).map_err(|e| {
            GroceryError::Io(format!("Failed to create sessions directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if grocery-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, GroceryError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                GroceryError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("grocery-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, GroceryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| GroceryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("grocery-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.sessions_dir(),
            temp_dir.path().join("data").join("sessions")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("GROCERY_CLI_DATA_DIR", custom_path);

        let paths = GroceryPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("GROCERY_CLI_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.sessions_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.store_file(),
            temp_dir.path().join("data").join("grocery_lists.json")
        );
        assert_eq!(
            paths.session_file("abc"),
            temp_dir
                .path()
                .join("data")
                .join("sessions")
                .join("abc.json")
        );
    }
}
