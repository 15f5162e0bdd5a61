//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Multipart, State};
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use kernel::response::ApiResponse;
use platform::cookie::{CookieConfig, extract_cookie};
use platform::media::{MediaStore, UploadedFile};

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterResponse, TokensResponse, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for user handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/user/register
///
/// Multipart form: `username`, `email`, `password`, optional `avatar` file.
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    mut multipart: Multipart,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let mut username = String::new();
    let mut email = String::new();
    let mut password = String::new();
    let mut avatar: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AuthError::Validation("Malformed multipart form".to_string()))?
    {
        match field.name() {
            Some("username") => username = read_text(field).await?,
            Some("email") => email = read_text(field).await?,
            Some("password") => password = read_text(field).await?,
            Some("avatar") => avatar = Some(read_file(field).await?),
            _ => {}
        }
    }

    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.media.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            username,
            email,
            password,
            avatar,
        })
        .await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        RegisterResponse {
            user: UserResponse::from(&output.user),
        },
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/user/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookies = session_cookies(
        &state.config,
        &output.user,
        &output.access_token,
        &output.refresh_token,
    );

    let body = LoginResponse {
        user: UserResponse::from(&output.user),
        tokens: TokensResponse {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        },
    };

    Ok((
        AppendHeaders(cookies),
        ApiResponse::ok("User logged in successfully", body),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /api/user/logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&current.id).await?;

    Ok((
        AppendHeaders(clear_cookies(&state.config)),
        ApiResponse::ok("User logged out successfully", serde_json::Value::Null),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /api/user/refresh-token
pub async fn refresh_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .ok_or(AuthError::TokenMissing)?;

    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&token).await?;

    let cookies = session_cookies(
        &state.config,
        &output.user,
        &output.access_token,
        &output.refresh_token,
    );

    let body = LoginResponse {
        user: UserResponse::from(&output.user),
        tokens: TokensResponse {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        },
    };

    Ok((
        AppendHeaders(cookies),
        ApiResponse::ok("Tokens refreshed successfully", body),
    ))
}

// ============================================================================
// Helpers
// ============================================================================

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AuthResult<String> {
    field
        .text()
        .await
        .map_err(|_| AuthError::Validation("Malformed multipart form".to_string()))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> AuthResult<UploadedFile> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| AuthError::Validation("Malformed multipart form".to_string()))?;

    Ok(UploadedFile::new(bytes.to_vec(), filename, content_type)?)
}

fn cookie_config(config: &AuthConfig, max_age_secs: i64) -> CookieConfig {
    CookieConfig {
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(max_age_secs),
    }
}

/// Build the three session cookies set on login and refresh
fn session_cookies(
    config: &AuthConfig,
    user: &User,
    access_token: &str,
    refresh_token: &str,
) -> Vec<(header::HeaderName, String)> {
    let access = cookie_config(config, config.access_ttl_secs());
    let refresh = cookie_config(config, config.refresh_ttl_secs());

    vec![
        (
            header::SET_COOKIE,
            access.build_set_cookie(&config.access_cookie_name, access_token),
        ),
        (
            header::SET_COOKIE,
            refresh.build_set_cookie(&config.refresh_cookie_name, refresh_token),
        ),
        (
            header::SET_COOKIE,
            access.build_set_cookie(&config.user_cookie_name, &user.user_id.to_string()),
        ),
    ]
}

/// Build expired cookies clearing the whole session
fn clear_cookies(config: &AuthConfig) -> Vec<(header::HeaderName, String)> {
    let cookie = cookie_config(config, 0);

    vec![
        (
            header::SET_COOKIE,
            cookie.build_delete_cookie(&config.access_cookie_name),
        ),
        (
            header::SET_COOKIE,
            cookie.build_delete_cookie(&config.refresh_cookie_name),
        ),
        (
            header::SET_COOKIE,
            cookie.build_delete_cookie(&config.user_cookie_name),
        ),
    ]
}
