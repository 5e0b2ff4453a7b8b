use axum::{extract::State, routing::post, Extension, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use meridian_exam::models::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::{Claims, ROLE_ADMIN, ROLE_STUDENT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: User,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::Student => ROLE_STUDENT,
        Role::Admin => ROLE_ADMIN,
    }
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: role_str(user.role).to_string(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = {
        let mut hub = state.exam.write().await;
        let user = hub.directory.register(&req.name, &req.email, &req.password)?;
        hub.persist_accounts(state.snapshot.as_ref());
        user
    };
    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = {
        let hub = state.exam.read().await;
        hub.directory.login(&req.email, &req.password)?
    };
    let token = issue_token(&state, &user)?;
    tracing::info!(email = %user.email, "login succeeded");
    Ok(Json(AuthResponse { token, user }))
}

/// Profile for the current token, mounted behind the auth middleware.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, AppError> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Malformed token subject".to_string()))?;

    let hub = state.exam.read().await;
    let user = hub.directory.find_by_id(user_id).unwrap_or_else(|| User {
        // The built-in administrator has no directory record.
        id: user_id,
        name: "Administrator".to_string(),
        email: claims.email.clone(),
        role: if claims.role == ROLE_ADMIN {
            Role::Admin
        } else {
            Role::Student
        },
    });
    Ok(Json(user))
}
