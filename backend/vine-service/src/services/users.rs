/// Account service - registration, login and current-user lookup
use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{LoginRequest, NewUser, RegisterRequest, User};
use crypto_core::{avatar, hash_password, verify_password, JwtKeys, PasswordError};
use std::sync::Arc;
use uuid::Uuid;

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid Credentials";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    keys: Arc<JwtKeys>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, keys: Arc<JwtKeys>) -> Self {
        Self { users, keys }
    }

    /// Create an account and return a token for it
    pub async fn register(&self, req: RegisterRequest) -> Result<String> {
        let email = normalize_email(&req.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation_msg(USER_EXISTS));
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            avatar: avatar::gravatar_url(&email),
            email,
            password_hash,
        };

        let user = self
            .users
            .create_user(new_user)
            .await?
            .ok_or_else(|| AppError::validation_msg(USER_EXISTS))?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(self.keys.issue(user.id)?)
    }

    /// Check credentials and return a fresh token
    pub async fn login(&self, req: LoginRequest) -> Result<String> {
        let email = normalize_email(&req.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::validation_msg(INVALID_CREDENTIALS))?;

        let password = req.password;
        let stored_hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;

        match verified {
            Ok(()) => Ok(self.keys.issue(user.id)?),
            Err(PasswordError::Mismatch) => {
                tracing::debug!(user_id = %user.id, "login rejected: wrong password");
                Err(AppError::validation_msg(INVALID_CREDENTIALS))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Display name and avatar to copy onto new posts and comments
    pub async fn author_snapshot(&self, user_id: Uuid) -> Result<(String, String)> {
        let user = self.current_user(user_id).await?;
        Ok((user.name, user.avatar))
    }
}
