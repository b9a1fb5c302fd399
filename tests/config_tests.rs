use portal::config::Config;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

mod common;

const KEYS: &[&str] = &[
    "DATABASE_URL",
    "JWT_SECRET_KEY",
    "JWT_REFRESH_KEY",
    "ACCESS_TOKEN_EXPIRE_MINUTES",
    "REFRESH_TOKEN_EXPIRE_MINUTES",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "UPLOAD_DIR",
    "PUBLIC_BASE_URL",
    "CORS_ORIGINS",
    "PROFANITY_WORDS_PATH",
];

// Runs `f` with the portal variables cleared, restoring them afterwards
fn with_clean_env(f: impl FnOnce()) {
    let original: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }

    f();

    for (key, value) in original {
        unsafe {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    common::setup_test_env();
    with_clean_env(|| {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.database_url, "sqlite:./portal.db");
        assert_eq!(config.access_token_expire_minutes, 30);
        assert_eq!(config.refresh_token_expire_minutes, 60 * 24 * 7);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost", "http://localhost:5173"]
        );
        assert_eq!(config.profanity_words_path, None);
        assert!(config.is_development());
        assert!(!config.is_production());
    });
}

#[test]
#[serial]
fn test_config_custom_values() {
    common::setup_test_env();
    with_clean_env(|| {
        unsafe {
            env::set_var("DATABASE_URL", "sqlite:./custom.db");
            env::set_var("JWT_SECRET_KEY", "access-secret");
            env::set_var("JWT_REFRESH_KEY", "refresh-secret");
            env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "15");
            env::set_var("PORT", "9090");
            env::set_var("ENVIRONMENT", "production");
            env::set_var("CORS_ORIGINS", "https://lgu.example.ph, https://admin.lgu.example.ph");
            env::set_var("PROFANITY_WORDS_PATH", "data/words.json");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.database_url, "sqlite:./custom.db");
        assert_eq!(config.jwt_secret, "access-secret");
        assert_eq!(config.jwt_refresh_secret, "refresh-secret");
        assert_eq!(config.access_token_expire_minutes, 15);
        assert_eq!(config.port, 9090);
        assert!(config.is_production());
        assert_eq!(config.server_address(), "127.0.0.1:9090");
        assert_eq!(
            config.cors_origins,
            vec!["https://lgu.example.ph", "https://admin.lgu.example.ph"]
        );
        assert_eq!(config.profanity_words_path.as_deref(), Some("data/words.json"));
    });
}

#[test]
#[serial]
fn test_config_invalid_numbers_fall_back() {
    common::setup_test_env();
    with_clean_env(|| {
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "soon");
        }

        let config = Config::from_env_only().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.access_token_expire_minutes, 30);
    });
}
