//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Holds the repository behind an `Arc` so one store client built at
/// startup is shared by every request.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Look up a single user; `None` when no record matches
    #[instrument(skip(self))]
    pub async fn fetch_one(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.get(email).await
    }

    /// Every stored user
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> UserResult<Vec<User>> {
        self.repository.scan().await
    }

    /// Create a user after checking the email address
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create(&self, user: User) -> UserResult<User> {
        user.validate().map_err(|_| UserError::InvalidEmail)?;

        self.repository.insert(user).await
    }

    /// Replace an existing user wholesale
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn update(&self, user: User) -> UserResult<User> {
        self.repository.replace(user).await
    }

    /// Delete a user; missing users are not an error
    #[instrument(skip(self))]
    pub async fn delete(&self, email: &str) -> UserResult<()> {
        self.repository.delete(email).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn jane() -> User {
        User::new("jane@example.com", "Jane", "Doe")
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email_without_touching_store() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_insert().never();

        let service = UserService::new(mock_repo);
        let result = service.create(User::new("not-an-email", "A", "B")).await;

        assert!(matches!(result, Err(UserError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_create_returns_stored_user_unchanged() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .with(eq(jane()))
            .times(1)
            .returning(Ok);

        let service = UserService::new(mock_repo);
        let created = service.create(jane()).await.unwrap();

        assert_eq!(created, jane());
    }

    #[tokio::test]
    async fn test_create_surfaces_duplicate() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(UserError::AlreadyExists));

        let service = UserService::new(mock_repo);
        let result = service.create(jane()).await;

        assert!(matches!(result, Err(UserError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_surfaces_store_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(UserError::Put("throttled".into())));

        let service = UserService::new(mock_repo);
        let err = service.create(jane()).await.unwrap_err();

        assert_eq!(err.to_string(), "failed to put item");
    }

    #[tokio::test]
    async fn test_update_does_not_validate_email() {
        // Update only needs the key to exist; format checks happen on create.
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_replace()
            .times(1)
            .returning(|_| Err(UserError::NotFound));

        let service = UserService::new(mock_repo);
        let result = service.update(User::new("odd", "A", "B")).await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_fetch_one_passes_through_missing() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        assert_eq!(service.fetch_one("missing@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_all_surfaces_decode_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_scan()
            .returning(|| Err(UserError::DecodeAll("bad item".into())));

        let service = UserService::new(mock_repo);
        let err = service.fetch_all().await.unwrap_err();

        assert_eq!(err.to_string(), "failed to unmarshal all records");
    }

    #[tokio::test]
    async fn test_delete_surfaces_store_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(UserError::Delete("timeout".into())));

        let service = UserService::new(mock_repo);
        let err = service.delete("a@b.com").await.unwrap_err();

        assert_eq!(err.kind(), "delete");
    }
}
