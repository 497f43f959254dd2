//! # AccountService
//!
//! Signup, login, profile update and account deletion. Credentials are
//! verified here; everything below this layer only ever sees the hash.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::validation;
use domains::{
    AppError, MediaStore, NewUser, PasswordHasher, Result, TokenCodec, User, UserChanges, UserRepo,
};

pub struct AccountService {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    media: Arc<dyn MediaStore>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            media,
        }
    }

    /// Creates an account and returns it together with a fresh bearer token.
    pub async fn signup(&self, new_user: NewUser) -> Result<(User, String)> {
        let mut errors = validation::validate_new_user(&new_user);
        // Uniqueness needs the repo, so it lives here rather than in the
        // pure validators. Only probe when the address itself parsed.
        if !new_user.email.trim().is_empty() && self.users.email_taken(&new_user.email).await? {
            errors.push("Email has already been taken".to_string());
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let password_hash = self.hasher.hash(&new_user.password)?;
        let image = match new_user.image {
            Some(upload) => Some(self.media.save(upload.data, &upload.content_type).await?),
            None => None,
        };

        let user = User {
            id: Uuid::now_v7(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            image,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;
        tracing::info!(user_id = %user.id, "account created");

        let token = self.tokens.issue(user.id)?;
        Ok((user, token))
    }

    /// Verifies credentials and issues a token. Unknown email and wrong
    /// password are indistinguishable in the result.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        match self.users.find_by_email(email).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => {
                let token = self.tokens.issue(user.id)?;
                Ok((user, token))
            }
            _ => Err(AppError::Unauthorized("Invalid credentials".to_string())),
        }
    }

    /// Applies whitelisted profile changes. Email is immutable: any value
    /// differing from the stored one fails validation outright.
    pub async fn update(&self, caller: Uuid, id: Uuid, changes: UserChanges) -> Result<User> {
        let mut user = self.fetch_owned(caller, id).await?;

        if let Some(email) = &changes.email {
            if email != &user.email {
                return Err(AppError::validation("Email can't be updated"));
            }
        }

        let mut errors = Vec::new();
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                errors.push("Name can't be blank".to_string());
            } else {
                user.name = name;
            }
        }
        if let Some(password) = &changes.password {
            errors.extend(validation::validate_password(
                password,
                changes.password_confirmation.as_deref(),
            ));
            if errors.is_empty() {
                user.password_hash = self.hasher.hash(password)?;
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        if let Some(upload) = changes.image {
            user.image = Some(self.media.save(upload.data, &upload.content_type).await?);
        }

        self.users.update(&user).await?;
        Ok(user)
    }

    /// Deletes the account and everything it owns.
    pub async fn destroy(&self, caller: Uuid, id: Uuid) -> Result<()> {
        self.fetch_owned(caller, id).await?;
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "account deleted");
        Ok(())
    }

    /// Resolves the caller's identity for the request guard. A token that
    /// points at a vanished user yields no identity rather than an error.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<User>> {
        match self.tokens.verify(token) {
            Some(user_id) => self.users.find(user_id).await,
            None => Ok(None),
        }
    }

    // Not-found is checked before ownership: the target must exist for the
    // caller to be judged against it.
    async fn fetch_owned(&self, caller: Uuid, id: Uuid) -> Result<User> {
        let user = self
            .users
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        if user.id != caller {
            return Err(AppError::Unauthorized("Unauthorized access".to_string()));
        }
        Ok(user)
    }
}
