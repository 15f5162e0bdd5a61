//! Unit tests for the auth crate
//!
//! Use cases are exercised against an in-memory repository and media host
//! so no database or network is needed.

use std::sync::{Arc, Mutex};

use kernel::id::UserId;
use platform::media::{MediaError, MediaStore, UploadedFile};

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::{DEFAULT_AVATAR, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    fn get(&self, user_id: &UserId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == *email))
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == *username))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.user_id == user.user_id) {
            *existing = user.clone();
        }
        Ok(())
    }
}

#[derive(Clone)]
struct FakeMediaHost {
    fail: bool,
}

impl MediaStore for FakeMediaHost {
    async fn upload(&self, file: &UploadedFile) -> Result<String, MediaError> {
        if self.fail {
            return Err(MediaError::UploadFailed("host unreachable".to_string()));
        }
        Ok(format!("https://media.test/{}", file.filename()))
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    repo: Arc<InMemoryUserRepository>,
    media: Arc<FakeMediaHost>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryUserRepository::default()),
            media: Arc::new(FakeMediaHost { fail: false }),
            config: Arc::new(AuthConfig::with_random_secrets()),
        }
    }

    fn register(&self) -> RegisterUseCase<InMemoryUserRepository, FakeMediaHost> {
        RegisterUseCase::new(self.repo.clone(), self.media.clone(), self.config.clone())
    }

    fn login(&self) -> LoginUseCase<InMemoryUserRepository> {
        LoginUseCase::new(self.repo.clone(), self.config.clone())
    }

    async fn register_alice(&self) -> User {
        self.register()
            .execute(RegisterInput {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "abc12@".to_string(),
                avatar: None,
            })
            .await
            .unwrap()
            .user
    }
}

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn register_never_stores_plaintext_and_relogin_succeeds() {
    let h = Harness::new();
    let user = h.register_alice().await;

    // Stored password is the Argon2id hash, never the plaintext
    assert_ne!(user.password_hash.as_phc_string(), "abc12@");
    assert_eq!(user.avatar_url, DEFAULT_AVATAR);

    // Re-login with the original plaintext succeeds
    let output = h
        .login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();
    assert_eq!(output.user.user_id, user.user_id);
}

#[tokio::test]
async fn register_duplicate_email_fails_regardless_of_username() {
    let h = Harness::new();
    h.register_alice().await;

    let err = h
        .register()
        .execute(RegisterInput {
            username: "different_name".to_string(),
            email: "alice@example.com".to_string(),
            password: "xyz34$z".to_string(),
            avatar: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(h.repo.len(), 1);
}

#[tokio::test]
async fn register_missing_fields_rejected() {
    let h = Harness::new();

    let err = h
        .register()
        .execute(RegisterInput {
            username: "alice".to_string(),
            email: "".to_string(),
            password: "abc12@".to_string(),
            avatar: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
    assert_eq!(h.repo.len(), 0);
}

#[tokio::test]
async fn register_weak_password_rejected() {
    let h = Harness::new();

    // No special character
    let err = h
        .register()
        .execute(RegisterInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "abcdef1".to_string(),
            avatar: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn register_with_avatar_stores_hosted_url() {
    let h = Harness::new();
    let avatar = UploadedFile::new(vec![1, 2, 3], "me.png", "image/png").unwrap();

    let user = h
        .register()
        .execute(RegisterInput {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "abc12@".to_string(),
            avatar: Some(avatar),
        })
        .await
        .unwrap()
        .user;

    assert_eq!(user.avatar_url, "https://media.test/me.png");
}

#[tokio::test]
async fn register_aborts_when_upload_fails() {
    let h = Harness::new();
    let use_case = RegisterUseCase::new(
        h.repo.clone(),
        Arc::new(FakeMediaHost { fail: true }),
        h.config.clone(),
    );
    let avatar = UploadedFile::new(vec![1, 2, 3], "me.png", "image/png").unwrap();

    let err = use_case
        .execute(RegisterInput {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "abc12@".to_string(),
            avatar: Some(avatar),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Upload(_)));
    // No partial record persisted
    assert_eq!(h.repo.len(), 0);
}

// ============================================================================
// Login / Logout / Refresh
// ============================================================================

#[tokio::test]
async fn login_unknown_email_is_not_found() {
    let h = Harness::new();

    let err = h
        .login()
        .execute(login_input("nobody@example.com", "abc12@"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let h = Harness::new();
    h.register_alice().await;

    let err = h
        .login()
        .execute(login_input("alice@example.com", "wrong9@x"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidPassword));
}

#[tokio::test]
async fn login_rotates_stored_refresh_token() {
    let h = Harness::new();
    let user = h.register_alice().await;

    let first = h
        .login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();

    let stored = h.repo.get(&user.user_id).unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some(first.refresh_token.as_str()));

    // A second login replaces the stored token: one session per account
    let second = h
        .login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();

    let stored = h.repo.get(&user.user_id).unwrap();
    assert_eq!(
        stored.refresh_token.as_deref(),
        Some(second.refresh_token.as_str())
    );
}

#[tokio::test]
async fn logout_clears_stored_refresh_token() {
    let h = Harness::new();
    let user = h.register_alice().await;
    h.login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();

    LogoutUseCase::new(h.repo.clone())
        .execute(&user.user_id)
        .await
        .unwrap();

    let stored = h.repo.get(&user.user_id).unwrap();
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn refresh_rejects_rotated_out_token() {
    let h = Harness::new();
    let user = h.register_alice().await;

    let first = h
        .login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();

    // A later login elsewhere replaced the stored token
    let mut stored = h.repo.get(&user.user_id).unwrap();
    stored.rotate_refresh_token("a-newer-session-token".to_string());
    h.repo.update(&stored).await.unwrap();

    let use_case = RefreshUseCase::new(h.repo.clone(), h.config.clone());
    let err = use_case.execute(&first.refresh_token).await.unwrap_err();

    assert!(matches!(err, AuthError::RefreshTokenMismatch));
}

#[tokio::test]
async fn refresh_with_current_token_rotates_pair() {
    let h = Harness::new();
    let user = h.register_alice().await;

    let login = h
        .login()
        .execute(login_input("alice@example.com", "abc12@"))
        .await
        .unwrap();

    let use_case = RefreshUseCase::new(h.repo.clone(), h.config.clone());
    let refreshed = use_case.execute(&login.refresh_token).await.unwrap();

    let stored = h.repo.get(&user.user_id).unwrap();
    assert_eq!(
        stored.refresh_token.as_deref(),
        Some(refreshed.refresh_token.as_str())
    );

    // After logout there is no active session left to exchange
    LogoutUseCase::new(h.repo.clone())
        .execute(&user.user_id)
        .await
        .unwrap();
    assert!(matches!(
        use_case.execute(&refreshed.refresh_token).await.unwrap_err(),
        AuthError::RefreshTokenMismatch
    ));
}
