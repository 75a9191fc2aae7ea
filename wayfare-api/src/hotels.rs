use crate::auth::OperatorUser;
use crate::db::HotelFields;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use wayfare_core::hotel::{ExternalDetailResponse, ExternalSearchResponse, LocalHotel, PriceResponse};
use wayfare_core::search::HotelSearchRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/localHotels", get(list_local).post(create_local))
        .route(
            "/localHotels/{id}",
            get(get_local).put(update_local).delete(delete_local),
        )
        .route("/hotels/search-with-images", get(search_external))
        .route("/hotels/hotel-details", get(external_detail))
        .route("/hotels/price", get(external_price))
}

async fn list_local(State(state): State<AppState>) -> Json<Vec<LocalHotel>> {
    Json(state.db.local_hotels().await)
}

async fn get_local(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<LocalHotel>> {
    Ok(Json(state.db.local_hotel(&id).await?))
}

/// Reads the operator hotel form: `name`, `location`, `price`, optional
/// `description` and `image` parts.
async fn read_hotel_form(mut multipart: Multipart) -> AppResult<HotelFields> {
    let mut fields = HotelFields::default();
    let mut price = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(|e| AppError::Validation(e.to_string()))?;
                if !bytes.is_empty() {
                    fields.image_filename = Some(file_name);
                }
            }
            "name" | "location" | "price" | "description" => {
                let text = field.text().await.map_err(|e| AppError::Validation(e.to_string()))?;
                let text = text.trim().to_string();
                match name.as_str() {
                    "name" => fields.name = text,
                    "location" => fields.location = text,
                    "price" => price = Some(text),
                    _ => fields.description = Some(text).filter(|d| !d.is_empty()),
                }
            }
            _ => {}
        }
    }

    if fields.name.is_empty() {
        return Err(AppError::Validation("Hotel name is required".to_string()));
    }
    fields.price = price
        .and_then(|p| p.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| AppError::Validation("Price must be a non-negative number".to_string()))?;
    Ok(fields)
}

async fn create_local(
    State(state): State<AppState>,
    OperatorUser(claims): OperatorUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<LocalHotel>)> {
    let fields = read_hotel_form(multipart).await?;
    let hotel = state.db.insert_local_hotel(fields).await;
    info!("Operator {} created hotel {}", claims.sub, hotel.id);
    Ok((StatusCode::CREATED, Json(hotel)))
}

async fn update_local(
    State(state): State<AppState>,
    OperatorUser(claims): OperatorUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<LocalHotel>> {
    let fields = read_hotel_form(multipart).await?;
    let hotel = state.db.update_local_hotel(&id, fields).await?;
    info!("Operator {} updated hotel {}", claims.sub, hotel.id);
    Ok(Json(hotel))
}

async fn delete_local(
    State(state): State<AppState>,
    OperatorUser(claims): OperatorUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.db.delete_local_hotel(&id).await?;
    info!("Operator {} deleted hotel {}", claims.sub, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn search_external(
    State(state): State<AppState>,
    Query(req): Query<HotelSearchRequest>,
) -> AppResult<Json<ExternalSearchResponse>> {
    if req.city.trim().is_empty() {
        return Err(AppError::Validation("City is required".to_string()));
    }
    if req.check_out <= req.check_in {
        return Err(AppError::Validation("Check-out must be later than check-in".to_string()));
    }
    Ok(Json(ExternalSearchResponse {
        hotels: state.db.catalog().search(&req.city),
    }))
}

#[derive(Debug, Deserialize)]
struct HotelCodeParams {
    #[serde(rename = "hotelId")]
    hotel_id: String,
}

impl HotelCodeParams {
    fn code(&self) -> AppResult<u64> {
        self.hotel_id
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid hotel code: {}", self.hotel_id)))
    }
}

async fn external_detail(
    State(state): State<AppState>,
    Query(params): Query<HotelCodeParams>,
) -> AppResult<Json<ExternalDetailResponse>> {
    let code = params.code()?;
    Ok(Json(ExternalDetailResponse {
        hotel: state.db.catalog().get(code).map(|h| h.detail.clone()),
    }))
}

async fn external_price(
    State(state): State<AppState>,
    Query(params): Query<HotelCodeParams>,
) -> AppResult<Json<PriceResponse>> {
    let code = params.code()?;
    Ok(Json(PriceResponse {
        min_price: state.db.catalog().get(code).and_then(|h| h.summary.min_price),
    }))
}
