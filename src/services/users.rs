//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::{AuthConfig, ClientConfig},
    error::{AppError, AppResult},
    models::user::{
        CompleteOnboarding, Login, Profile, ProfileStats, Register, ResetClaims, UpdateProfile,
        User, UserClaims, UserStats,
    },
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
    client: ClientConfig,
    email: EmailService,
}

impl UsersService {
    pub fn new(
        repository: Repository,
        config: AuthConfig,
        client: ClientConfig,
        email: EmailService,
    ) -> Self {
        Self { repository, config, client, email }
    }

    /// Register a new account and return a token for it.
    /// The initial profile name is derived from the email local part;
    /// onboarding fills in the rest later.
    pub async fn register(&self, request: Register) -> AppResult<(String, User)> {
        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email is already in use".to_string()));
        }

        let name = request
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(&request.email, &password_hash, &name)
            .await?;

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Authenticate by email and password, returning a JWT token
    pub async fn login(&self, request: Login) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Authentication("No account with this email".to_string()))?;

        if !self.verify_password(&user, &request.password)? {
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Email a short-lived password-reset link
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            sub: user.email.clone(),
            user_id: user.id,
            exp: now + (self.config.reset_token_expiration_minutes as i64 * 60),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create reset token: {}", e)))?;

        let reset_link = format!("{}/reset-password?token={}", self.client.base_url, token);
        self.email.send_password_reset(&user.email, &reset_link).await
    }

    /// Set a new password from a reset-link token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        let claims = ResetClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired reset token".to_string()))?;

        // Make sure the account still exists
        self.repository.users.get_by_id(claims.user_id).await?;

        let password_hash = self.hash_password(new_password)?;
        self.repository
            .users
            .update_password(claims.user_id, &password_hash)
            .await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users (admin view)
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Profile page payload: the user plus booking counters
    pub async fn get_profile(&self, user_id: i32) -> AppResult<Profile> {
        let user = self.repository.users.get_by_id(user_id).await?;
        let bookings_count = self.repository.bookings.count_for_user(user_id).await?;

        Ok(Profile {
            user,
            stats: ProfileStats { bookings_count },
        })
    }

    /// Update the caller's profile
    pub async fn update_profile(&self, user_id: i32, profile: UpdateProfile) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.update_profile(user_id, &profile).await
    }

    /// Complete the onboarding flow (username + profile details)
    pub async fn complete_onboarding(
        &self,
        user_id: i32,
        data: CompleteOnboarding,
    ) -> AppResult<User> {
        if self
            .repository
            .users
            .username_exists(&data.username, Some(user_id))
            .await?
        {
            return Err(AppError::Conflict("This username is already taken".to_string()));
        }

        self.repository.users.complete_onboarding(user_id, &data).await
    }

    /// Booking-derived activity summary for the personal dashboard
    pub async fn user_stats(&self, user_id: i32) -> AppResult<UserStats> {
        let total_games = self.repository.bookings.count_for_user(user_id).await?;
        let last_played = self.repository.bookings.last_created(user_id).await?;
        let favorite_location = self.repository.bookings.favorite_location(user_id).await?;

        Ok(UserStats {
            total_games,
            last_played,
            favorite_location,
        })
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = user.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
