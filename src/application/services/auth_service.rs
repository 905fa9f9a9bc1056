//! Authentication Service
//!
//! Handles admin login, token issuing/verification and the bootstrap account.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{Admin, AdminRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Role carried by every admin token.
pub const ADMIN_ROLE: &str = "admin";

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate an admin with credentials
    async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError>;

    /// Validate an access token and return its claims
    fn verify_token(&self, token: &str) -> Result<AdminClaims, AuthError>;

    /// Create the first admin when none exists. Returns whether one was created.
    async fn ensure_bootstrap_admin(&self, username: &str, password: &str)
        -> Result<bool, AuthError>;
}

/// Issued admin token
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject (admin ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

impl AdminClaims {
    pub fn admin_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials | AuthError::TokenExpired | AuthError::InvalidToken => {
                AppError::Unauthorized(e.to_string())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
            AuthError::App(e) => e,
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl {
    admins: Arc<dyn AdminRepository>,
    id_generator: Arc<SnowflakeGenerator>,
    jwt_settings: JwtSettings,
    /// Checked when the username is unknown.
    dummy_hash: OnceCell<String>,
}

impl AuthServiceImpl {
    /// Create a new AuthServiceImpl
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        id_generator: Arc<SnowflakeGenerator>,
        jwt_settings: JwtSettings,
    ) -> Self {
        Self {
            admins,
            id_generator,
            jwt_settings,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Hash a password using Argon2id
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn dummy_hash(&self) -> Result<&str, AuthError> {
        self.dummy_hash
            .get_or_try_init(|| Self::hash_password("unknown-admin-placeholder"))
            .map(String::as_str)
    }

    fn issue_token(&self, admin: &Admin) -> Result<AdminSession, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.jwt_settings.expiry_minutes);

        let claims = AdminClaims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AdminSession {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_settings.expiry_minutes * 60,
            username: admin.username.clone(),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        let Some(admin) = self.admins.find_by_username(username.trim()).await? else {
            Self::verify_password(password, self.dummy_hash()?)?;
            tracing::warn!(username = %username.trim(), "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !Self::verify_password(password, &admin.password_hash)? {
            tracing::warn!(username = %admin.username, "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.issue_token(&admin)?;

        if let Err(e) = self.admins.touch_last_login(admin.id, Utc::now()).await {
            tracing::warn!(admin_id = admin.id, error = %e, "Failed to record last login");
        }
        tracing::info!(admin_id = admin.id, username = %admin.username, "Admin logged in");

        Ok(session)
    }

    fn verify_token(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let token_data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        let claims = token_data.claims;
        if claims.role != ADMIN_ROLE || claims.admin_id().is_none() {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        if self.admins.count().await? > 0 {
            return Ok(false);
        }

        let username = username.trim();
        if username.is_empty() || password.len() < 8 {
            return Err(AuthError::Internal(
                "Bootstrap admin needs a username and a password of at least 8 characters".into(),
            ));
        }

        let admin = Admin {
            id: self.id_generator.generate(),
            username: username.to_string(),
            password_hash: Self::hash_password(password)?,
            created_at: Utc::now(),
            last_login_at: None,
        };
        self.admins.create(&admin).await?;

        tracing::info!(username = %admin.username, "Bootstrap admin created");
        Ok(true)
    }
}
