//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgUserRepository, user_router};
use axum::{
    Json, Router,
    extract::{ConnectInfo, DefaultBodyLimit, State},
    http,
    http::{Method, header},
    response::IntoResponse,
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose;
use blog::{PgBlogRepository, SiteConfig, comments_router, feeds_router, posts_router};
use platform::mail::{ContactMessage, MailConfig, Mailer};
use platform::media::{HttpMediaHost, MediaConfig};
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimitStore};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use kernel::response::ApiResponse;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load signing secrets from environment
        load_auth_config()?
    };

    // Media host configuration
    let media_config = MediaConfig {
        upload_url: env::var("MEDIA_UPLOAD_URL")
            .unwrap_or_else(|_| "https://api.media.example/upload".to_string()),
        upload_preset: env::var("MEDIA_UPLOAD_PRESET").unwrap_or_else(|_| "intraverse".to_string()),
    };
    let media = HttpMediaHost::new(media_config);

    // Site configuration for feeds
    let site = SiteConfig {
        site_url: env::var("SITE_URL").unwrap_or_else(|_| "https://intraverse.me".to_string()),
        ..SiteConfig::default()
    };

    // Outbound mail for the contact form
    let mail_config = MailConfig {
        smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
        smtp_port: env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        smtp_username: env::var("SMTP_USER").ok(),
        smtp_password: env::var("SMTP_PASS").ok(),
        smtp_secure: env::var("SMTP_SECURE").is_ok_and(|v| v == "true"),
        inbox: env::var("SMTP_USER").unwrap_or_else(|_| "owner@intraverse.me".to_string()),
    };
    let mailer = Mailer::new(&mail_config)?;

    let contact_state = ContactState {
        mailer,
        limiter: Arc::new(InMemoryRateLimitStore::new()),
        // 5 requests per 15 minutes per client
        limit: RateLimitConfig::new(5, 15 * 60),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,https://intraverse.me".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/", get(root))
        .merge(feeds_router(PgBlogRepository::new(pool.clone()), site))
        .nest(
            "/api",
            posts_router(
                PgBlogRepository::new(pool.clone()),
                media.clone(),
                PgUserRepository::new(pool.clone()),
                auth_config.clone(),
            ),
        )
        .nest(
            "/api/user",
            user_router(PgUserRepository::new(pool.clone()), media, auth_config),
        )
        .nest(
            "/api/comments",
            comments_router(PgBlogRepository::new(pool.clone())),
        )
        .merge(
            Router::new()
                .route("/api/contact", post(contact))
                .with_state(contact_state),
        )
        .fallback(not_found)
        // Multipart uploads carry images up to 5 MiB plus form overhead
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Load production auth configuration from the environment
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let access_b64 =
        env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set in production");
    let refresh_b64 =
        env::var("REFRESH_TOKEN_SECRET").expect("REFRESH_TOKEN_SECRET must be set in production");

    let mut config = AuthConfig {
        access_token_secret: Engine::decode(&general_purpose::STANDARD, &access_b64)?,
        refresh_token_secret: Engine::decode(&general_purpose::STANDARD, &refresh_b64)?,
        ..AuthConfig::default()
    };

    if let Some(secs) = env::var("ACCESS_TOKEN_EXPIRY_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.access_token_ttl = std::time::Duration::from_secs(secs);
    }
    if let Some(secs) = env::var("REFRESH_TOKEN_EXPIRY_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.refresh_token_ttl = std::time::Duration::from_secs(secs);
    }

    Ok(config)
}

/// GET / - liveness check
async fn root() -> &'static str {
    "Welcome to my IntraVerse API"
}

/// Fallback for unmatched routes
async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}

// ============================================================================
// Contact form
// ============================================================================

#[derive(Clone)]
struct ContactState {
    mailer: Mailer,
    limiter: Arc<InMemoryRateLimitStore>,
    limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
struct ContactRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    message: String,
}

/// POST /api/contact - relay a contact-form submission by mail
async fn contact(
    State(state): State<ContactState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ContactRequest>,
) -> AppResult<impl IntoResponse> {
    let result = state
        .limiter
        .check_and_increment(&addr.ip().to_string(), &state.limit)
        .await
        .map_err(|e| AppError::internal(format!("Rate limit check failed: {e}")))?;

    if !result.allowed {
        return Err(AppError::too_many_requests(
            "Too many contact requests, please try again later",
        ));
    }

    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.subject.trim().is_empty()
        || req.message.trim().is_empty()
    {
        return Err(AppError::bad_request("All fields are required"));
    }

    state
        .mailer
        .send_contact(&ContactMessage {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        })
        .await
        .map_err(|e| AppError::internal("Internal Server Error").with_source(e))?;

    Ok(ApiResponse::ok(
        "Email sent successfully",
        serde_json::Value::Null,
    ))
}
