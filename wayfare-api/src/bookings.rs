use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, warn};
use wayfare_core::{Booking, NewBooking, MAX_STAY_DAYS};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/my", get(my_bookings))
        .route("/bookings/{id}", delete(cancel_booking))
}

/// Same validation as the client, plus the per-user (hotel, source, day)
/// uniqueness the client can only approximate.
async fn create_booking(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<NewBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    if req.hotel_id.trim().is_empty() {
        return Err(AppError::Validation("Please select a hotel".to_string()));
    }
    if req.stay_days < 1 {
        return Err(AppError::Validation("Stay must be at least 1 night".to_string()));
    }
    if req.stay_days > MAX_STAY_DAYS {
        return Err(AppError::Validation(format!("Stay cannot exceed {} nights", MAX_STAY_DAYS)));
    }

    let booking = state.db.insert_booking(&claims.sub, &req).await.map_err(|e| {
        warn!("Booking by {} for {} rejected: {}", claims.sub, req.slot().hotel, e);
        AppError::from(e)
    })?;
    info!("Booking {} created by {}", booking.id, claims.sub);
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn my_bookings(State(state): State<AppState>, AuthUser(claims): AuthUser) -> Json<Vec<Booking>> {
    Json(state.db.bookings_for(&claims.sub).await)
}

async fn cancel_booking(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.db.delete_booking(&claims.sub, &id).await?;
    info!("Booking {} cancelled by {}", id, claims.sub);
    Ok(StatusCode::NO_CONTENT)
}
