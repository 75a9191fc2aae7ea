use crate::error::{AppError, AppResult};
use crate::password::{hash_password, verify_password};
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    routing::post,
    Json, RequestPartsExt, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use wayfare_core::profile::{LoginRequest, LoginResponse, RegisterRequest, Role};
use wayfare_shared::Masked;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

pub fn issue_token(state: &AppState, user_id: &str, email: &str, role: Role) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
}

// ============================================================================
// Extractors
// ============================================================================

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// A signed-in operator; everyone else gets 403.
#[derive(Debug, Clone)]
pub struct OperatorUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Authentication("Please log in".to_string()))?;

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))?;

        Ok(AuthUser(token_data.claims))
    }
}

impl FromRequestParts<AppState> for OperatorUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Operator {
            return Err(AppError::Authorization("Operators only".to_string()));
        }
        Ok(OperatorUser(claims))
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> AppResult<Json<LoginResponse>> {
    let rejected = || AppError::Authentication("Invalid email or password".to_string());

    let (profile, hash) = state.db.credentials(req.email.trim()).await.ok_or_else(rejected)?;
    let password = req.password.into_inner();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(format!("Stored hash unreadable: {}", e)))?;
    if !valid {
        warn!("Failed login for {}", profile.email);
        return Err(rejected());
    }

    let token = issue_token(&state, &profile.id, &profile.email, profile.role)?;
    info!("User {} logged in", profile.id);
    Ok(Json(LoginResponse {
        token: Masked::new(token),
        role: profile.role,
        user_id: Some(profile.id),
    }))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let email = req.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    let password = req.password.into_inner();
    if password.len() < 6 {
        return Err(AppError::Validation("Password must be at least 6 characters long".to_string()));
    }

    let role = match (&req.sign_up_code, &state.auth.operator_sign_up_code) {
        (None, _) => Role::User,
        (Some(given), Some(expected)) if given == expected => Role::Operator,
        (Some(_), _) => return Err(AppError::Validation("Invalid sign-up code".to_string())),
    };
    let username = req
        .username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let profile = state.db.insert_user(&email, &username, hash, role).await?;
    info!("Registered user {} as {:?}", profile.id, role);
    Ok((StatusCode::CREATED, Json(json!({ "message": "Registered" }))))
}
