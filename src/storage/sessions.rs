//! Session repository for JSON storage
//!
//! Each session lives in `sessions/<id>.json`. A plain-text `current` file
//! next to them names the session used when none is given explicitly.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::paths::GroceryPaths;
use crate::error::{GroceryError, GroceryResult};
use crate::models::{Session, SessionId};

use super::file_io::{read_json_required, remove_file_if_exists, write_json_atomic};

/// Repository for session persistence
pub struct SessionRepository {
    paths: GroceryPaths,
}

impl SessionRepository {
    pub fn new(paths: GroceryPaths) -> Self {
        Self { paths }
    }

    fn file_for(&self, id: &SessionId) -> PathBuf {
        self.paths.session_file(&id.to_string())
    }

    /// Load a session by id
    pub fn load(&self, id: &SessionId) -> GroceryResult<Session> {
        let path = self.file_for(id);
        if !path.exists() {
            return Err(GroceryError::session_not_found(id.to_string()));
        }
        read_json_required(&path)
    }

    /// Check whether a session has been persisted
    pub fn exists(&self, id: &SessionId) -> bool {
        self.file_for(id).exists()
    }

    /// Persist a session, replacing any previous state
    pub fn save(&self, session: &Session) -> GroceryResult<()> {
        debug!(session = %session.id.short(), "Saving session");
        write_json_atomic(self.file_for(&session.id), session)
    }

    /// Id recorded as the current session, if any
    pub fn current_id(&self) -> GroceryResult<Option<SessionId>> {
        let path = self.paths.current_session_file();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| GroceryError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let id = contents.trim().parse::<SessionId>().map_err(|e| {
            GroceryError::Session(format!("Corrupt current session pointer: {}", e))
        })?;
        Ok(Some(id))
    }

    /// Record `id` as the current session
    pub fn set_current(&self, id: &SessionId) -> GroceryResult<()> {
        let path = self.paths.current_session_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GroceryError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&path, id.to_string())
            .map_err(|e| GroceryError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Resolve the session to work in
    ///
    /// An explicit id wins and is created on first use. Otherwise the current
    /// session is resumed, or a new one is started. The resolved session
    /// becomes current.
    pub fn open_or_create(&self, explicit: Option<SessionId>) -> GroceryResult<Session> {
        let wanted = match explicit {
            Some(id) => Some(id),
            None => self.current_id()?,
        };

        let session = match wanted {
            Some(id) if self.exists(&id) => self.load(&id)?,
            Some(id) => {
                info!(session = %id.short(), "Starting named session");
                let mut session = Session::new();
                session.id = id;
                self.save(&session)?;
                session
            }
            None => self.start()?,
        };

        self.set_current(&session.id)?;
        Ok(session)
    }

    /// Start a brand-new session and make it current
    pub fn start(&self) -> GroceryResult<Session> {
        let session = Session::new();
        info!(session = %session.id.short(), "Starting session");
        self.save(&session)?;
        self.set_current(&session.id)?;
        Ok(session)
    }

    /// Tear a session down
    ///
    /// Removes its state file, and the current pointer when it names this
    /// session. Returns whether any state existed.
    pub fn end(&self, id: &SessionId) -> GroceryResult<bool> {
        let existed = self.exists(id);
        remove_file_if_exists(self.file_for(id))?;

        if self.current_id().ok().flatten().as_ref() == Some(id) {
            remove_file_if_exists(self.paths.current_session_file())?;
        }

        if existed {
            info!(session = %id.short(), "Session ended");
        }
        Ok(existed)
    }

    /// All persisted sessions, most recently updated first
    pub fn list(&self) -> GroceryResult<Vec<Session>> {
        let dir = self.paths.sessions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| GroceryError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

        let mut sessions = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| GroceryError::Io(format!("Failed to read session entry: {}", e)))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            sessions.push(read_json_required::<Session, _>(&path)?);
        }

        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyConverter, ItemKey, ListEntry, Money};
    use tempfile::TempDir;

    fn repository() -> (TempDir, SessionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        (temp_dir, SessionRepository::new(paths))
    }

    #[test]
    fn test_first_use_creates_and_marks_current() {
        let (_temp, repo) = repository();
        assert!(repo.current_id().unwrap().is_none());

        let session = repo.open_or_create(None).unwrap();

        assert!(repo.exists(&session.id));
        assert_eq!(repo.current_id().unwrap(), Some(session.id));
    }

    #[test]
    fn test_current_session_is_resumed() {
        let (_temp, repo) = repository();
        let mut session = repo.open_or_create(None).unwrap();

        let entry = ListEntry::new(
            "leche",
            Money::from_decimal(1000.0),
            None,
            "Dos Pinos",
            &CurrencyConverter::default(),
        );
        session.mirror.record("home", ItemKey::new("-Nabc"), entry);
        repo.save(&session).unwrap();

        let resumed = repo.open_or_create(None).unwrap();
        assert_eq!(resumed.id, session.id);
        assert_eq!(resumed.mirror.running_total(), Money::from_cents(194));
    }

    #[test]
    fn test_explicit_id_is_created_on_first_use() {
        let (_temp, repo) = repository();
        let first = repo.open_or_create(None).unwrap();
        let named = SessionId::new();

        let session = repo.open_or_create(Some(named)).unwrap();

        assert_eq!(session.id, named);
        assert_ne!(session.id, first.id);
        assert_eq!(repo.current_id().unwrap(), Some(named));
    }

    #[test]
    fn test_end_removes_state_and_pointer() {
        let (_temp, repo) = repository();
        let session = repo.open_or_create(None).unwrap();

        assert!(repo.end(&session.id).unwrap());
        assert!(!repo.exists(&session.id));
        assert!(repo.current_id().unwrap().is_none());
        assert!(repo.load(&session.id).unwrap_err().is_not_found());

        assert!(!repo.end(&session.id).unwrap());
    }

    #[test]
    fn test_end_keeps_pointer_to_other_session() {
        let (_temp, repo) = repository();
        let old = repo.start().unwrap();
        let current = repo.start().unwrap();

        repo.end(&old.id).unwrap();
        assert_eq!(repo.current_id().unwrap(), Some(current.id));
    }

    #[test]
    fn test_list_skips_pointer_file() {
        let (_temp, repo) = repository();
        repo.start().unwrap();
        repo.start().unwrap();

        assert_eq!(repo.list().unwrap().len(), 2);
    }
}
