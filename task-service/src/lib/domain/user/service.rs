use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Authorization decisions happen at the boundary; this service assumes the
/// caller has already been allowed to perform the operation.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Friendly up-front duplicate checks; the store's unique constraints
    /// remain the authoritative guard against the check-then-write race.
    async fn check_unused(
        &self,
        username: Option<&Username>,
        email: Option<&str>,
    ) -> Result<(), UserError> {
        if let Some(username) = username {
            if self.repository.find_by_username(username).await?.is_some() {
                return Err(UserError::UsernameAlreadyExists(username.to_string()));
            }
        }

        if let Some(email) = email {
            if self.repository.find_by_email(email).await?.is_some() {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.check_unused(Some(&command.username), Some(command.email.as_str()))
            .await?;

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, role = %created_user.role, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        // Re-check uniqueness only for values that actually change, so a
        // self-identical update never conflicts with the user's own row.
        // All checks run before any field is applied.
        let changed_username = command
            .username
            .as_ref()
            .filter(|username| **username != user.username);
        let changed_email = command.email.as_ref().filter(|email| **email != user.email);

        self.check_unused(changed_username, changed_email.map(|email| email.as_str()))
            .await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(&new_password)
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted with owned tasks");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn existing_user(username: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::Regular,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.role == Role::Admin
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: "password123".to_string(),
            role: Role::Admin,
        };

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        // Plaintext never stored
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_nothing_written() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|username| Ok(Some(existing_user(username.as_str(), "other@example.com"))));
        // The duplicate check fails before any write is attempted
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test2@example.com".to_string()).unwrap(),
            password: "password456".to_string(),
            role: Role::Regular,
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(existing_user("someoneelse", email))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("user2".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: "password456".to_string(),
            role: Role::Regular,
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_username_only_leaves_rest_untouched() {
        let mut repository = MockTestUserRepository::new();

        let current = existing_user("olduser", "old@example.com");
        let user_id = current.id;
        let prior_hash = current.password_hash.clone();
        let prior_email = current.email.clone();

        let returned = current.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        // Email did not change: no uniqueness lookup for it
        repository.expect_find_by_email().times(0);

        let expected_hash = prior_hash.clone();
        let expected_email = prior_email.clone();
        repository
            .expect_update()
            .withf(move |user| {
                user.username.as_str() == "newuser"
                    && user.email == expected_email
                    && user.password_hash == expected_hash
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("newuser".to_string()).unwrap()),
            email: None,
            password: None,
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.username.as_str(), "newuser");
        assert_eq!(updated.email, prior_email);
        assert_eq!(updated.password_hash, prior_hash);
    }

    #[tokio::test]
    async fn test_update_with_same_username_skips_duplicate_check() {
        let mut repository = MockTestUserRepository::new();

        let current = existing_user("alice", "alice@example.com");
        let user_id = current.id;

        let returned = current.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        // Value identical to the current one: must not conflict with itself
        repository.expect_find_by_username().times(0);
        repository.expect_find_by_email().times(0);
        repository
            .expect_update()
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("alice".to_string()).unwrap()),
            email: None,
            password: None,
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_update_duplicate_username_applies_nothing() {
        let mut repository = MockTestUserRepository::new();

        let current = existing_user("olduser", "old@example.com");
        let user_id = current.id;

        let returned = current.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|username| Ok(Some(existing_user(username.as_str(), "taken@example.com"))));
        // Duplicate check fails before any mutation reaches the store
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("taken".to_string()).unwrap()),
            email: Some(EmailAddress::new("new@example.com".to_string()).unwrap()),
            password: Some("newpassword".to_string()),
        };

        let result = service.update_user(&user_id, command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let mut repository = MockTestUserRepository::new();

        let current = existing_user("alice", "alice@example.com");
        let user_id = current.id;
        let prior_hash = current.password_hash.clone();

        let returned = current.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        let old_hash = prior_hash.clone();
        repository
            .expect_update()
            .withf(move |user| user.password_hash.starts_with("$argon2") && user.password_hash != old_hash)
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: None,
            email: None,
            password: Some("brand_new_password".to_string()),
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_ne!(updated.password_hash, prior_hash);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("newuser".to_string()).unwrap()),
            email: None,
            password: None,
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(user_id.to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&user_id).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
