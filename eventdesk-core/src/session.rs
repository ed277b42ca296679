//! The locally selected user and the cached users list.
//!
//! Nothing here authenticates anyone: selecting a user only decides who new
//! and edited events are attributed to.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CoreResult, EventDeskError};
use crate::event::User;
use crate::ids::Id;
use crate::remote::EventApi;

pub const SELECTED_USER_KEY: &str = "selectedUser";
pub const USERS_KEY: &str = "users";

/// JSON values stored one file per key.
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SessionStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// `Ok(None)` when the key was never written; `StorageCorruption` when
    /// it was written but can't be read back.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CoreResult<Option<T>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| EventDeskError::StorageCorruption(format!("{}: {}", key, e)))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> CoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string(value)
            .map_err(|e| EventDeskError::Serialization(e.to_string()))?;

        let path = self.path(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> CoreResult<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Read a key, treating unreadable data as absent.
    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unreadable session data");
                T::default()
            }
        }
    }
}

/// Session context, opened at startup and passed to whatever needs the
/// current user.
pub struct Session {
    storage: SessionStorage,
    current_user: Option<User>,
    users: Vec<User>,
    error: Option<String>,
}

impl Session {
    /// Load the persisted session. Corrupt or missing values start an empty,
    /// signed-out session instead of failing.
    pub fn open(storage: SessionStorage) -> Self {
        let current_user = storage.get_or_default::<Option<User>>(SELECTED_USER_KEY);
        let users = storage.get_or_default::<Vec<User>>(USERS_KEY);

        Session {
            storage,
            current_user,
            users,
            error: None,
        }
    }

    /// Write the session back and release the storage.
    pub fn close(self) -> CoreResult<SessionStorage> {
        self.persist_users()?;
        self.persist_current_user()?;
        Ok(self.storage)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user_by_id(&self, id: &Id) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Select a user ("log in"), or clear the selection with `None`.
    pub fn set_current_user(&mut self, user: Option<User>) -> CoreResult<()> {
        match &user {
            Some(u) => tracing::info!(id = %u.id, name = %u.name, "user selected"),
            None => tracing::info!("user cleared"),
        }
        self.current_user = user;
        self.persist_current_user()
    }

    pub fn logout(&mut self) -> CoreResult<()> {
        self.set_current_user(None)
    }

    pub fn can_edit_event(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn can_delete_event(&self) -> bool {
        self.can_edit_event()
    }

    /// Fetch the users list, cache it, and re-check the selected user
    /// against it: dropped if gone, refreshed if its record changed.
    ///
    /// A failed fetch only counts as an error when there is no cached list
    /// to fall back on.
    pub async fn refresh_users<A: EventApi>(&mut self, api: &A) -> CoreResult<()> {
        let users = match api.list_users().await {
            Ok(users) => users,
            Err(err) => {
                tracing::warn!(error = %err, cached = self.users.len(), "users fetch failed");
                if self.users.is_empty() {
                    self.error = Some(err.to_string());
                    return Err(err);
                }
                return Ok(());
            }
        };

        self.users = users;
        self.error = None;
        self.persist_users()?;

        if let Some(current) = &self.current_user {
            let fresh = self.user_by_id(&current.id).cloned();
            if fresh.is_none() {
                tracing::info!(id = %current.id, "selected user no longer exists");
            }
            self.current_user = fresh;
            self.persist_current_user()?;
        }

        Ok(())
    }

    fn persist_users(&self) -> CoreResult<()> {
        self.storage.set(USERS_KEY, &self.users)
    }

    fn persist_current_user(&self) -> CoreResult<()> {
        match &self.current_user {
            Some(user) => self.storage.set(SELECTED_USER_KEY, user),
            None => self.storage.remove(SELECTED_USER_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Role;
    use crate::sync::tests::MemoryApi;

    fn user(id: u64, name: &str) -> User {
        User {
            id: Id::from(id),
            name: name.to_string(),
            role: Role::User,
            image: None,
        }
    }

    #[test]
    fn empty_storage_opens_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(SessionStorage::new(dir.path()));
        assert!(session.current_user().is_none());
        assert!(session.users().is_empty());
        assert!(!session.can_edit_event());
    }

    #[test]
    fn corrupt_values_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("selectedUser.json"), "{not json").unwrap();
        std::fs::write(dir.path().join("users.json"), "[1, 2").unwrap();

        let storage = SessionStorage::new(dir.path());
        assert!(matches!(
            storage.get::<User>(SELECTED_USER_KEY),
            Err(EventDeskError::StorageCorruption(_))
        ));

        let session = Session::open(storage);
        assert!(session.current_user().is_none());
        assert!(session.users().is_empty());
    }

    #[test]
    fn selection_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::open(SessionStorage::new(dir.path()));
        session.set_current_user(Some(user(2, "Bo"))).unwrap();
        let storage = session.close().unwrap();

        let session = Session::open(storage);
        assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("Bo"));
        assert!(session.can_delete_event());
    }

    #[test]
    fn logout_removes_selection() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::open(SessionStorage::new(dir.path()));
        session.set_current_user(Some(user(2, "Bo"))).unwrap();
        session.logout().unwrap();

        assert!(!dir.path().join("selectedUser.json").exists());
        assert!(Session::open(SessionStorage::new(dir.path())).current_user().is_none());
    }

    #[tokio::test]
    async fn refresh_updates_selected_user_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(SessionStorage::new(dir.path()));
        session.set_current_user(Some(user(2, "Bo"))).unwrap();

        let api = MemoryApi::with_events(vec![]);
        *api.users.lock().unwrap() = vec![user(1, "Ann"), user(2, "Bodil")];

        session.refresh_users(&api).await.unwrap();

        assert_eq!(session.users().len(), 2);
        assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("Bodil"));
        assert_eq!(session.user_by_id(&Id::from(1)).map(|u| u.name.as_str()), Some("Ann"));
    }

    #[tokio::test]
    async fn refresh_drops_vanished_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(SessionStorage::new(dir.path()));
        session.set_current_user(Some(user(9, "Gone"))).unwrap();

        let api = MemoryApi::with_events(vec![]);
        *api.users.lock().unwrap() = vec![user(1, "Ann")];

        session.refresh_users(&api).await.unwrap();

        assert!(session.current_user().is_none());
        assert!(!dir.path().join("selectedUser.json").exists());
    }

    #[tokio::test]
    async fn failed_refresh_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path());
        storage.set(USERS_KEY, &vec![user(1, "Ann")]).unwrap();

        let mut session = Session::open(storage);
        let api = MemoryApi {
            fail_with: Some(503),
            ..MemoryApi::with_events(vec![])
        };

        session.refresh_users(&api).await.unwrap();
        assert_eq!(session.users().len(), 1);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_without_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(SessionStorage::new(dir.path()));
        let api = MemoryApi {
            fail_with: Some(503),
            ..MemoryApi::with_events(vec![])
        };

        assert!(session.refresh_users(&api).await.is_err());
        assert_eq!(session.error(), Some("HTTP error! status: 503"));
    }
}
