use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use validator::ValidateEmail;

use crate::config::Config;
use crate::database::models::{CreateUserInput, LoginInput, TokenPair, User, UserInfo};
use crate::database::repositories::UserRepository;
use crate::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub sub: String, // email
    pub username: String,
    pub exp: usize,
}

/// Refresh token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String, // user id
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

/// Bearer guard: protected handlers take `Claims` as an argument.
impl FromRequest for Claims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<Claims, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::forbidden("Invalid authorization code."))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::forbidden("Invalid authorization code."))?;

    if scheme != "Bearer" {
        return Err(AppError::forbidden("Invalid authentication scheme."));
    }

    let config = req.app_data::<Data<Config>>().ok_or_else(|| {
        log::error!("Config is not registered as app data");
        AppError::internal_server_error_message("Server misconfiguration")
    })?;

    decode_access_token(token.trim(), config)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        log::error!("Failed to hash password: {}", e);
        AppError::internal_server_error_message("Failed to hash password")
    })
}

pub fn verify_password(plain_password: &str, password_hash: &str) -> bool {
    verify(plain_password, password_hash).unwrap_or(false)
}

fn expiry(minutes: i64) -> usize {
    (Utc::now() + Duration::minutes(minutes)).timestamp() as usize
}

pub fn create_access_token(user: &User, config: &Config) -> Result<String, AppError> {
    let claims = Claims {
        user_id: user.id,
        sub: user.email.clone(),
        username: user.username.clone(),
        exp: expiry(config.access_token_expire_minutes),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::internal_server_error_message(format!("Failed to sign token: {}", e)))
}

pub fn create_refresh_token(user_id: i64, config: &Config) -> Result<String, AppError> {
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        exp: expiry(config.refresh_token_expire_minutes),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_refresh_secret.as_ref()),
    )
    .map_err(|e| AppError::internal_server_error_message(format!("Failed to sign token: {}", e)))
}

/// Verifies signature and expiry of an access token.
pub fn decode_access_token(token: &str, config: &Config) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected access token: {}", e);
        AppError::forbidden("Invalid token or expired token.")
    })
}

pub fn decode_refresh_token(token: &str, config: &Config) -> Result<RefreshClaims, AppError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_refresh_secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected refresh token: {}", e);
        AppError::forbidden("Invalid token or expired token.")
    })
}

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    config: Config,
}

impl AuthService {
    pub fn new(config: Config, user_repository: UserRepository) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    pub async fn register(&self, request: CreateUserInput) -> Result<UserInfo, AppError> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        if username.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }
        if !email.as_str().validate_email() {
            return Err(AppError::bad_request("Email format is invalid"));
        }
        if self.user_repository.email_exists(&email).await? {
            return Err(AppError::bad_request("Email already exists"));
        }
        if self.user_repository.username_exists(&username).await? {
            return Err(AppError::bad_request("Username already exists"));
        }
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .user_repository
            .create_user(&username, &email, &password_hash)
            .await?;

        log::info!("Registered user {} ({})", user.id, user.username);

        Ok(user.into())
    }

    pub async fn login(&self, request: LoginInput) -> Result<TokenPair, AppError> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid Email"))?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::bad_request("Invalid Password"));
        }

        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = decode_refresh_token(refresh_token, &self.config)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::forbidden("Invalid token or expired token."))?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Invalid token or expired token."))?;

        self.issue_tokens(&user)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode_access_token(token, &self.config)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserInfo, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(UserInfo::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub async fn get_users(&self) -> Result<Vec<UserInfo>, AppError> {
        let users = self.user_repository.get_all_users().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        let access = create_access_token(user, &self.config)?;
        let refresh = create_refresh_token(user.id, &self.config)?;

        Ok(TokenPair::bearer(access, refresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::from_env_only().unwrap();
        config.jwt_secret = "unit-test-access-secret".to_string();
        config.jwt_refresh_secret = "unit-test-refresh-secret".to_string();
        config
    }

    fn test_user() -> User {
        User {
            id: 7,
            username: "juan".to_string(),
            email: "juan@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trip_keeps_identity() {
        let config = test_config();
        let token = create_access_token(&test_user(), &config).unwrap();

        let claims = decode_access_token(&token, &config).unwrap();
        assert_eq!(claims.user_id(), 7);
        assert_eq!(claims.sub, "juan@example.com");
        assert_eq!(claims.username, "juan");
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let mut config = test_config();
        config.access_token_expire_minutes = -10;
        let token = create_access_token(&test_user(), &config).unwrap();

        let err = decode_access_token(&token, &config).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let config = test_config();
        let refresh = create_refresh_token(7, &config).unwrap();

        assert!(decode_access_token(&refresh, &config).is_err());
        assert_eq!(decode_refresh_token(&refresh, &config).unwrap().sub, "7");
    }

    #[test]
    fn password_hash_verifies() {
        let hashed = hash_password("password123").unwrap();
        assert!(verify_password("password123", &hashed));
        assert!(!verify_password("wrongpass", &hashed));
    }
}
