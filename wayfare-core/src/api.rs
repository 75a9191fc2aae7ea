use async_trait::async_trait;
use crate::booking::{Booking, NewBooking};
use crate::favorite::FavoriteSet;
use crate::flight::Flight;
use crate::hotel::{ExternalHotel, ExternalHotelDetail, HotelKey, LocalHotel, LocalHotelForm};
use crate::message::{Locale, Message};
use crate::profile::{LoginRequest, LoginResponse, Profile, RegisterRequest};
use crate::review::{NewReview, Review};
use crate::search::HotelSearchRequest;

/// A failed backend call: HTTP status (absent for transport failures) plus the
/// optional `message` field of the error body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("backend call failed (status {status:?}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self { status: Some(status), message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, message: Some(message.into()) }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == Some(409)
    }

    /// Server message verbatim when there is one, else the localized fallback.
    /// Transport failures always use the fallback.
    pub fn display_message(&self, locale: Locale, fallback: Message) -> String {
        match (&self.status, &self.message) {
            (Some(_), Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            _ => fallback.text(locale).to_string(),
        }
    }
}

/// File part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self) -> ApiResult<Profile>;

    async fn update_username(&self, username: &str) -> ApiResult<Profile>;

    /// Multipart upload under the `avatar` field.
    async fn upload_avatar(&self, file: FileUpload) -> ApiResult<Profile>;
}

/// Both calls answer with the authoritative favorite list.
#[async_trait]
pub trait FavoriteApi: Send + Sync {
    async fn add_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet>;

    async fn remove_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet>;
}

#[async_trait]
pub trait HotelApi: Send + Sync {
    async fn list_local_hotels(&self) -> ApiResult<Vec<LocalHotel>>;

    async fn local_hotel(&self, id: &str) -> ApiResult<LocalHotel>;

    async fn create_local_hotel(&self, form: LocalHotelForm) -> ApiResult<LocalHotel>;

    async fn update_local_hotel(&self, id: &str, form: LocalHotelForm) -> ApiResult<LocalHotel>;

    async fn delete_local_hotel(&self, id: &str) -> ApiResult<()>;

    async fn search_external(&self, request: &HotelSearchRequest) -> ApiResult<Vec<ExternalHotel>>;

    async fn external_detail(&self, code: &str) -> ApiResult<Option<ExternalHotelDetail>>;

    async fn external_min_price(&self, code: &str) -> ApiResult<Option<f64>>;
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, booking: &NewBooking) -> ApiResult<Booking>;

    async fn my_bookings(&self) -> ApiResult<Vec<Booking>>;

    async fn cancel_booking(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn create_review(&self, review: &NewReview) -> ApiResult<()>;

    async fn reviews_for_local_hotel(&self, hotel_id: &str) -> ApiResult<Vec<Review>>;

    async fn delete_review(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait FlightApi: Send + Sync {
    async fn list_flights(&self, limit: u32) -> ApiResult<Vec<Flight>>;
}
