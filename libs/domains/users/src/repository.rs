use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// The narrow get/scan/put/delete contract every backing store has to
/// offer. Puts are conditional so uniqueness is enforced by the store
/// itself rather than by a separate existence check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by email
    async fn get(&self, email: &str) -> UserResult<Option<User>>;

    /// Read the whole table
    async fn scan(&self) -> UserResult<Vec<User>>;

    /// Store a new user, failing with `AlreadyExists` if the email is taken
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Overwrite an existing user, failing with `NotFound` if there is none
    async fn replace(&self, user: User) -> UserResult<User>;

    /// Delete a user by email; deleting a missing user is not an error
    async fn delete(&self, email: &str) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with existing records
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn scan(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(result)
    }

    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(UserError::AlreadyExists);
        }

        users.insert(user.email.clone(), user.clone());

        tracing::info!(email = %user.email, "Created user");
        Ok(user)
    }

    async fn replace(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.email) {
            Some(existing) => *existing = user.clone(),
            None => return Err(UserError::NotFound),
        }

        tracing::info!(email = %user.email, "Updated user");
        Ok(user)
    }

    async fn delete(&self, email: &str) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.remove(email).is_some() {
            tracing::info!(%email, "Deleted user");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("a@b.com", "A", "B");

        let created = repo.insert(user.clone()).await.unwrap();
        assert_eq!(created, user);

        let fetched = repo.get("a@b.com").await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.get("missing@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_original() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("a@b.com", "First", "Owner"))
            .await
            .unwrap();

        let result = repo.insert(User::new("a@b.com", "Second", "Owner")).await;
        assert!(matches!(result, Err(UserError::AlreadyExists)));

        let stored = repo.get("a@b.com").await.unwrap().unwrap();
        assert_eq!(stored.first_name, "First");
    }

    #[tokio::test]
    async fn test_replace_missing_user_writes_nothing() {
        let repo = InMemoryUserRepository::new();

        let result = repo.replace(User::new("ghost@x.com", "G", "H")).await;
        assert!(matches!(result, Err(UserError::NotFound)));
        assert!(repo.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_overwrites_every_field() {
        let repo = InMemoryUserRepository::with_users([User::new("a@b.com", "Old", "Name")]);

        let replacement = User::new("a@b.com", "New", "");
        repo.replace(replacement.clone()).await.unwrap();

        assert_eq!(repo.get("a@b.com").await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryUserRepository::with_users([User::new("a@b.com", "A", "B")]);

        repo.delete("a@b.com").await.unwrap();
        repo.delete("a@b.com").await.unwrap();
        assert_eq!(repo.get("a@b.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scan_returns_all_users_sorted() {
        let repo = InMemoryUserRepository::with_users([
            User::new("z@b.com", "Z", "Z"),
            User::new("a@b.com", "A", "A"),
        ]);

        let emails: Vec<String> = repo
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, vec!["a@b.com", "z@b.com"]);
    }
}
