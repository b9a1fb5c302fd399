#![allow(dead_code, unused_macros)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use fake::Fake;
use fake::faker::internet::en::{SafeEmail, Username};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use portal::database::init_database;
use portal::database::models::{CreateUserInput, LoginInput, UploadPayload, UserInfo};
use portal::handlers::shared::ApiResponse;
use portal::{AppState, Config};

pub const TEST_PASSWORD: &str = "password123";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01";

pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub state: AppState,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());

        let mut config = Config::from_env_only()?;
        config.database_url = database_url.clone();
        config.jwt_secret = "test-access-secret-key".to_string();
        config.jwt_refresh_secret = "test-refresh-secret-key".to_string();
        config.environment = "test".to_string();
        config.upload_dir = temp_dir.path().join("uploads").display().to_string();
        config.public_base_url = "http://localhost:8000".to_string();
        config.profanity_words_path = Some(
            temp_dir
                .path()
                .join("profanity_words.json")
                .display()
                .to_string(),
        );

        let pool = init_database(&database_url).await?;
        let state = AppState::new(pool.clone(), config.clone());

        Ok(TestContext {
            pool,
            config,
            state,
            temp_dir,
        })
    }

    /// Registers a user with generated details and returns it.
    pub async fn create_user(&self) -> UserInfo {
        let input = MockData::user();
        self.state
            .auth_service
            .register(input)
            .await
            .expect("Failed to register test user")
    }

    /// Registers a user and returns a valid access token for it.
    pub async fn create_user_with_token(&self) -> (UserInfo, String) {
        let input = MockData::user();
        let email = input.email.clone();
        let user = self
            .state
            .auth_service
            .register(input)
            .await
            .expect("Failed to register test user");
        let tokens = self
            .state
            .auth_service
            .login(LoginInput {
                email,
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to log in test user");

        (user, tokens.access_token)
    }
}

/// Initializes the full application against a context's state.
macro_rules! test_app {
    ($ctx:expr) => {{
        let state = $ctx.state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| state.register(cfg))
                .configure(portal::routes::configure),
        )
        .await
    }};
}

pub struct MockData;

impl MockData {
    pub fn user() -> CreateUserInput {
        let username: String = Username().fake();
        let email: String = SafeEmail().fake();
        CreateUserInput {
            // fake can repeat names across calls, so make them unique
            username: format!("{}_{}", username, uuid::Uuid::new_v4().simple()),
            email: format!("{}.{}", uuid::Uuid::new_v4().simple(), email),
            password: TEST_PASSWORD.to_string(),
        }
    }

    pub fn png_upload(filename: &str) -> UploadPayload {
        UploadPayload {
            filename: filename.to_string(),
            content_base64: STANDARD.encode(PNG_BYTES),
        }
    }
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn read_envelope<B: MessageBody>(resp: ServiceResponse<B>) -> ApiResponse<Value> {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("Failed to parse JSON envelope")
}

pub fn data_as<T: DeserializeOwned>(envelope: &ApiResponse<Value>) -> T {
    let data = envelope
        .data
        .clone()
        .expect("Expected data in successful response");
    serde_json::from_value(data).expect("Failed to deserialize response data")
}

pub async fn assert_record_count(pool: &SqlitePool, table: &str, expected_count: i64) {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    let count = sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(pool)
        .await
        .expect("Failed to count records");

    assert_eq!(
        count, expected_count,
        "Expected {} records in {} table, but found {}",
        expected_count, table, count
    );
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
