//! User model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::models::enums::{Gender, Occupation, Role};

/// Social network links attached to a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Socials {
    pub vk: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
}

/// Internal row structure for database queries (with String fields)
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    id: i32,
    email: String,
    password: Option<String>,
    username: Option<String>,
    name: String,
    phone: Option<String>,
    avatar: Option<String>,
    gender: Option<String>,
    birth_date: Option<NaiveDate>,
    native_language: Option<String>,
    occupation: Option<String>,
    bio: Option<String>,
    socials: Option<serde_json::Value>,
    role: String,
    completed_onboarding: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password: row.password,
            username: row.username,
            name: row.name,
            phone: row.phone,
            avatar: row.avatar,
            gender: row.gender.and_then(|g| g.parse().ok()),
            birth_date: row.birth_date,
            native_language: row.native_language,
            occupation: row.occupation.and_then(|o| o.parse().ok()),
            bio: row.bio,
            socials: row
                .socials
                .and_then(|v| serde_json::from_value(v).ok()),
            role: Role::from(row.role),
            completed_onboarding: row.completed_onboarding,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub username: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    /// Preferred language (ISO 639-1 code: "ru", "en", ...)
    pub native_language: Option<String>,
    pub occupation: Option<Occupation>,
    pub bio: Option<String>,
    pub socials: Option<Socials>,
    pub role: Role,
    pub completed_onboarding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct Register {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPassword {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Token response for register/login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Update own profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub native_language: Option<String>,
    pub occupation: Option<Occupation>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    pub socials: Option<Socials>,
}

/// Complete onboarding request (first profile setup after registration)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteOnboarding {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub native_language: Option<String>,
    pub occupation: Option<Occupation>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

/// Per-user booking summary shown on the profile page
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileStats {
    pub bookings_count: i64,
}

/// Profile response (user plus derived stats)
#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub stats: ProfileStats,
}

/// Booking-derived activity summary for the personal dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct UserStats {
    pub total_games: i64,
    pub last_played: Option<DateTime<Utc>>,
    pub favorite_location: Option<crate::models::game_stats::FavoriteLocation>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}

/// Short-lived claims embedded in password-reset links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    pub user_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl ResetClaims {
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a reset token (expiry included)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
