use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StoreError, UniqueField, UserStore};
use crate::models::User;

/// In-memory UserStore for tests and single-process deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Backend("user store lock poisoned".to_string()))
    }

    fn conflict(users: &[User], email: &str, username: &str) -> Option<UniqueField> {
        if users.iter().any(|u| u.email == email) {
            Some(UniqueField::Email)
        } else if users.iter().any(|u| u.username == username) {
            Some(UniqueField::Username)
        } else {
            None
        }
    }

    fn update<F>(&self, id: Uuid, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users()?;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                apply(user);
                Ok(())
            }
            None => Err(StoreError::Backend(format!("no user with id {id}"))),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.iter().find(|u| u.email == email).cloned())
    }

    async fn find_conflict(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UniqueField>, StoreError> {
        Ok(Self::conflict(&self.users()?, email, username))
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users()?;
        if let Some(field) = Self::conflict(&users, &user.email, &user.username) {
            return Err(StoreError::Duplicate(field));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.update(id, |user| user.last_login = Some(at))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.update(id, |user| user.password_hash = password_hash.to_string())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
            role: None,
            dashboard_type: None,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryUserStore::new();
        let alice = user("alice", "alice@x.com");
        store.insert(&alice).await.unwrap();

        assert_eq!(store.find_by_username("alice").await.unwrap(), Some(alice.clone()));
        assert_eq!(store.find_by_email("alice@x.com").await.unwrap(), Some(alice));
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_reported_before_username() {
        let store = MemoryUserStore::new();
        store.insert(&user("alice", "alice@x.com")).await.unwrap();

        let both = store.insert(&user("alice", "alice@x.com")).await;
        assert_eq!(both, Err(StoreError::Duplicate(UniqueField::Email)));

        let name_only = store.insert(&user("alice", "other@x.com")).await;
        assert_eq!(name_only, Err(StoreError::Duplicate(UniqueField::Username)));

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_conflict_prefers_email() {
        let store = MemoryUserStore::new();
        store.insert(&user("alice", "alice@x.com")).await.unwrap();
        store.insert(&user("bob", "bob@x.com")).await.unwrap();

        let cases = [
            ("alice@x.com", "bob", Some(UniqueField::Email)),
            ("carol@x.com", "bob", Some(UniqueField::Username)),
            ("carol@x.com", "carol", None),
            ("Alice@x.com", "Alice", None),
        ];
        for (email, username, expected) in cases {
            assert_eq!(store.find_conflict(email, username).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts_admit_one() {
        let store = MemoryUserStore::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(&user("racer", "racer@x.com")).await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_updates_touch_only_the_target() {
        let store = MemoryUserStore::new();
        let alice = user("alice", "alice@x.com");
        let bob = user("bob", "bob@x.com");
        store.insert(&alice).await.unwrap();
        store.insert(&bob).await.unwrap();

        let at = Utc::now();
        store.update_last_login(alice.id, at).await.unwrap();
        store.update_password(alice.id, "new-hash").await.unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].last_login, Some(at));
        assert_eq!(users[0].password_hash, "new-hash");
        assert_eq!(users[1], bob);

        assert!(store.update_password(Uuid::new_v4(), "x").await.is_err());
    }
}
