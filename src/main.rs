use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger, web};
use anyhow::Result;

use portal::database::init_database;
use portal::middleware::{RequestIdMiddleware, RequestInfoMiddleware};
use portal::{AppState, Config, routes};

fn build_cors(config: &Config) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-correlation-id"),
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting portal API server");

    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);
    if config.is_production() && config.jwt_secret.starts_with("change-this") {
        log::warn!("JWT_SECRET_KEY is not set; using the built-in development secret");
    }

    let pool = init_database(&config.database_url).await?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = AppState::new(pool, config.clone());
    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .configure(|cfg| state.register(cfg))
            .wrap(build_cors(&config))
            .wrap(RequestInfoMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .app_data(web::JsonConfig::default().limit(50 * 1024 * 1024))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
