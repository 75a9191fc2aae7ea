use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use tracing::info;
use wayfare_core::favorite::FavoritesResponse;
use wayfare_core::profile::{Profile, UpdateUsernameRequest};
use wayfare_core::{HotelKey, HotelSource};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(me))
        .route("/users/me/name", put(rename))
        .route("/users/me/avatar", put(upload_avatar))
        .route("/users/me/favorites", post(add_favorite))
        .route("/users/me/favorites/{source}/{id}", delete(remove_favorite))
}

async fn me(State(state): State<AppState>, AuthUser(claims): AuthUser) -> AppResult<Json<Profile>> {
    // A token for a user that no longer exists is as good as no token
    let profile = state
        .db
        .profile(&claims.sub)
        .await
        .map_err(|_| AppError::Authentication("Please log in again".to_string()))?;
    Ok(Json(profile))
}

async fn rename(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateUsernameRequest>,
) -> AppResult<Json<Profile>> {
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("Username cannot be empty".to_string()));
    }
    let profile = state
        .db
        .update_profile(&claims.sub, |p| p.username = username)
        .await?;
    info!("User {} renamed", claims.sub);
    Ok(Json(profile))
}

/// Multipart with a single `avatar` image part.
async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<Profile>> {
    let mut file_name = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        let is_image = field.content_type().is_some_and(|ct| ct.starts_with("image/"));
        let name = field.file_name().unwrap_or("avatar").to_string();
        let bytes = field.bytes().await.map_err(|e| AppError::Validation(e.to_string()))?;
        if !is_image || bytes.is_empty() {
            return Err(AppError::Validation("Avatar must be a non-empty image".to_string()));
        }
        file_name = Some(name);
    }
    let file_name = file_name.ok_or_else(|| AppError::Validation("No avatar uploaded".to_string()))?;

    let now = Utc::now().timestamp_millis();
    let profile = state
        .db
        .update_profile(&claims.sub, |p| {
            p.avatar_url = Some(format!("/uploads/avatars/{}-{}", p.id, file_name));
            p.avatar_updated_at = Some(now);
        })
        .await?;
    info!("User {} uploaded a new avatar", claims.sub);
    Ok(Json(profile))
}

async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(hotel): Json<HotelKey>,
) -> AppResult<Json<FavoritesResponse>> {
    if hotel.id.trim().is_empty() {
        return Err(AppError::Validation("hotelId is required".to_string()));
    }
    let favorites = state.db.set_favorite(&claims.sub, &hotel, true).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((source, id)): Path<(String, String)>,
) -> AppResult<Json<FavoritesResponse>> {
    let source: HotelSource = source
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown hotel source: {}", source)))?;
    let favorites = state
        .db
        .set_favorite(&claims.sub, &HotelKey::new(id, source), false)
        .await?;
    Ok(Json(FavoritesResponse { favorites }))
}
