use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::info;
use wayfare_core::review::{NewReview, Review, ReviewAuthor};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/localHotels/{id}", get(hotel_reviews))
        .route("/reviews/{id}", delete(delete_review))
}

async fn create_review(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<NewReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if req.comment.trim().is_empty() {
        return Err(AppError::Validation("Comment cannot be empty".to_string()));
    }
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation("Rating must be between 1 and 5".to_string()));
    }

    let author = state.db.profile(&claims.sub).await?;
    let review = state
        .db
        .insert_review(
            ReviewAuthor {
                id: author.id,
                username: Some(author.username),
            },
            &req,
        )
        .await?;
    info!("Review {} posted on hotel {}", review.id, req.hotel_id);
    Ok((StatusCode::CREATED, Json(review)))
}

async fn hotel_reviews(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Review>> {
    Json(state.db.reviews_for(&id).await)
}

async fn delete_review(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.db.delete_review(&claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
