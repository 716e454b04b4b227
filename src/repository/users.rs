//! Users repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{CompleteOnboarding, UpdateProfile, User, UserRow},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        Ok(row.into())
    }

    /// Get user by email (primary authentication method)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Check if username is taken by another user
    pub async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1) AND id != $2)",
            )
            .bind(username)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
            )
            .bind(username)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(exists)
    }

    /// List all users (admin view)
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new user account with the minimum registration fields
    pub async fn create(&self, email: &str, password_hash: &str, name: &str) -> AppResult<User> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (email, password, name, role, completed_onboarding, created_at, updated_at)
            VALUES ($1, $2, $3, 'user', false, $4, $4)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update user's own profile
    pub async fn update_profile(&self, id: i32, profile: &UpdateProfile) -> AppResult<User> {
        let now = Utc::now();
        let socials = profile
            .socials
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Failed to serialize socials: {}", e)))?;

        sqlx::query(
            r#"
            UPDATE users SET
                name = $1,
                gender = $2,
                birth_date = $3,
                native_language = $4,
                occupation = $5,
                bio = $6,
                socials = COALESCE($7, socials),
                updated_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&profile.name)
        .bind(profile.gender.map(|g| g.as_str()))
        .bind(profile.birth_date)
        .bind(&profile.native_language)
        .bind(profile.occupation.map(|o| o.as_str()))
        .bind(&profile.bio)
        .bind(socials)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Fill in the profile from the onboarding flow and mark it complete
    pub async fn complete_onboarding(&self, id: i32, data: &CompleteOnboarding) -> AppResult<User> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE users SET
                username = $1,
                name = $2,
                phone = $3,
                gender = $4,
                birth_date = $5,
                native_language = $6,
                occupation = $7,
                bio = $8,
                completed_onboarding = true,
                updated_at = $9
            WHERE id = $10
            "#,
        )
        .bind(&data.username)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(data.gender.map(|g| g.as_str()))
        .bind(data.birth_date)
        .bind(&data.native_language)
        .bind(data.occupation.map(|o| o.as_str()))
        .bind(&data.bio)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Replace a user's password hash (password reset)
    pub async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password = $1, updated_at = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
