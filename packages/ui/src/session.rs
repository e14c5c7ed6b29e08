//! # Client session
//!
//! [`SessionStore`] holds the sanitized [`UserInfo`] of whoever is logged in
//! and mirrors it into a [`KeyValueStore`] under [`SESSION_KEY`] so it survives
//! a reload. It is a disposable copy of the server's record, used only to gate
//! the UI; nothing reconciles it with the server until the next login.
//!
//! Lifecycle:
//!
//! 1. [`SessionStore::new`]: `loading` is true, no user.
//! 2. [`SessionStore::load`]: hydrate from storage. A stored value that does
//!    not parse as a `UserInfo` (unknown fields included) or fails
//!    [`UserInfo::validate`] is deleted and the session starts empty.
//! 3. [`login`](SessionStore::login) / [`update_user`](SessionStore::update_user)
//!    replace the user and persist it; [`logout`](SessionStore::logout) clears
//!    both.
//!
//! Storage write failures are logged and otherwise ignored: the in-memory
//! session stays authoritative for the lifetime of the page.

use api::UserInfo;
use store::KeyValueStore;

/// Key the serialized session lives under.
pub const SESSION_KEY: &str = "user";

pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    user: Option<UserInfo>,
    loading: bool,
}

impl SessionStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            user: None,
            loading: true,
        }
    }

    /// Hydrate from storage, discarding anything that does not validate.
    pub fn load(&mut self) {
        self.user = self.read_stored();
        self.loading = false;
    }

    fn read_stored(&self) -> Option<UserInfo> {
        let raw = self.storage.get(SESSION_KEY)?;
        let parsed = serde_json::from_str::<UserInfo>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|user| user.validate().map(|()| user).map_err(str::to_string));

        match parsed {
            Ok(user) => Some(user),
            Err(reason) => {
                tracing::warn!(%reason, "discarding stored session");
                if let Err(err) = self.storage.remove(SESSION_KEY) {
                    tracing::warn!(error = %err, "failed to remove stored session");
                }
                None
            }
        }
    }

    pub fn login(&mut self, user: UserInfo) {
        self.persist(&user);
        self.user = Some(user);
    }

    pub fn update_user(&mut self, user: UserInfo) {
        self.login(user);
    }

    pub fn logout(&mut self) {
        self.user = None;
        if let Err(err) = self.storage.remove(SESSION_KEY) {
            tracing::warn!(error = %err, "failed to remove stored session");
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True until the first [`load`](Self::load) completes.
    pub fn loading(&self) -> bool {
        self.loading
    }

    fn persist(&self, user: &UserInfo) {
        let result = serde_json::to_string(user)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(SESSION_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use api::Role;
    use store::MemoryStorage;

    use super::*;

    fn alice() -> UserInfo {
        UserInfo {
            id: "9b2c".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            full_name: Some("Alice Doe".to_string()),
            role: Some(Role::WarehouseConfig),
            dashboard_type: Some("Warehouse Configuration Dashboard".to_string()),
            last_login: None,
            created_at: None,
        }
    }

    fn loaded(storage: &MemoryStorage) -> SessionStore {
        let mut session = SessionStore::new(Box::new(storage.clone()));
        session.load();
        session
    }

    #[test]
    fn test_starts_loading_and_unauthenticated() {
        let session = SessionStore::new(Box::new(MemoryStorage::new()));
        assert!(session.loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_storage_loads_unauthenticated() {
        let session = loaded(&MemoryStorage::new());
        assert!(!session.loading());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_survives_reload() {
        let storage = MemoryStorage::new();
        let mut session = loaded(&storage);
        session.login(alice());
        assert!(session.is_authenticated());

        let reloaded = loaded(&storage);
        assert_eq!(reloaded.user(), Some(&alice()));
    }

    #[test]
    fn test_logout_clears_storage() {
        let storage = MemoryStorage::new();
        let mut session = loaded(&storage);
        session.login(alice());
        session.logout();

        assert!(!session.is_authenticated());
        assert!(storage.get(SESSION_KEY).is_none());
        assert!(loaded(&storage).user().is_none());
    }

    #[test]
    fn test_update_user_replaces_and_persists() {
        let storage = MemoryStorage::new();
        let mut session = loaded(&storage);
        session.login(alice());

        let mut renamed = alice();
        renamed.full_name = Some("Alice Smith".to_string());
        session.update_user(renamed.clone());

        assert_eq!(session.user(), Some(&renamed));
        assert_eq!(loaded(&storage).user(), Some(&renamed));
    }

    #[test]
    fn test_corrupt_blob_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "{not json").unwrap();

        let session = loaded(&storage);
        assert!(!session.is_authenticated());
        assert!(storage.get(SESSION_KEY).is_none());
    }

    #[test]
    fn test_shape_mismatch_is_discarded() {
        let blobs = [
            // carries a password
            r#"{"id":"1","username":"a","email":"a@x.com","password":"secret1"}"#,
            // missing email
            r#"{"id":"1","username":"a"}"#,
            // blank username
            r#"{"id":"1","username":"","email":"a@x.com"}"#,
            // wrong type
            r#"{"id":1,"username":"a","email":"a@x.com"}"#,
            r#"["a"]"#,
        ];
        for blob in blobs {
            let storage = MemoryStorage::new();
            storage.set(SESSION_KEY, blob).unwrap();

            let session = loaded(&storage);
            assert!(!session.is_authenticated(), "{blob}");
            assert!(storage.get(SESSION_KEY).is_none(), "{blob}");
        }
    }

    #[test]
    fn test_unrecognized_role_is_kept() {
        let storage = MemoryStorage::new();
        storage
            .set(
                SESSION_KEY,
                r#"{"id":"1","username":"a","email":"a@x.com","role":"forklift_driver"}"#,
            )
            .unwrap();

        let session = loaded(&storage);
        let user = session.user().unwrap();
        assert_eq!(user.role, Some(Role::Unrecognized("forklift_driver".to_string())));
    }
}
