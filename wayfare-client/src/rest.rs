use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use wayfare_core::api::{
    ApiResult, AuthApi, BookingApi, FavoriteApi, FileUpload, FlightApi, HotelApi, ProfileApi, ReviewApi,
};
use wayfare_core::favorite::FavoritesResponse;
use wayfare_core::flight::{Flight, FlightsResponse};
use wayfare_core::hotel::{
    ExternalDetailResponse, ExternalHotel, ExternalHotelDetail, ExternalSearchResponse, LocalHotel,
    LocalHotelForm, PriceResponse,
};
use wayfare_core::profile::{LoginRequest, LoginResponse, Profile, RegisterRequest, UpdateUsernameRequest};
use wayfare_core::review::{NewReview, Review};
use wayfare_core::search::HotelSearchRequest;
use wayfare_core::{Booking, FavoriteSet, HotelKey, NewBooking};
use wayfare_store::app_config::Config;
use wayfare_store::TokenSlot;

/// Client for the booking backend. Attaches the bearer token from the shared
/// [`TokenSlot`] whenever one is present.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<TokenSlot>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, token: Arc<TokenSlot>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, token: Arc<TokenSlot>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, token }
    }

    pub fn from_config(config: &Config, token: Arc<TokenSlot>) -> Self {
        Self::new(config.api.base_url.clone(), token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &Arc<TokenSlot> {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment so ids cannot smuggle in `/`, `?` or `#`.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|_| ClientError::BaseUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.authorized(self.http.request(method, url))
    }

    fn request_at(&self, method: reqwest::Method, segments: &[&str]) -> ClientResult<reqwest::RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        Ok(self.authorized(self.http.request(method, url)))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.bearer() {
            Some(bearer) => builder.header(reqwest::header::AUTHORIZATION, bearer),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = Self::ensure_success(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, builder: reqwest::RequestBuilder) -> ClientResult<()> {
        Self::ensure_success(builder.send().await?).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::GET, path).query(query)).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::POST, path).json(body)).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::PUT, path).json(body)).await
    }

    async fn get_at<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        self.send(self.request_at(reqwest::Method::GET, segments)?).await
    }

    async fn delete_at(&self, segments: &[&str]) -> ClientResult<()> {
        self.send_empty(self.request_at(reqwest::Method::DELETE, segments)?).await
    }

    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with {}: {}", status, body);
            return Err(ClientError::from_body(status.as_u16(), &body));
        }
        Ok(response)
    }
}

fn file_part(file: FileUpload) -> ClientResult<reqwest::multipart::Part> {
    Ok(reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime_type)?)
}

fn hotel_form(form: LocalHotelForm) -> ClientResult<reqwest::multipart::Form> {
    let mut multipart = reqwest::multipart::Form::new()
        .text("name", form.name)
        .text("location", form.location)
        .text("price", form.price.to_string());
    if let Some(description) = form.description {
        multipart = multipart.text("description", description);
    }
    if let Some(image) = form.image {
        multipart = multipart.part("image", file_part(image)?);
    }
    Ok(multipart)
}

#[async_trait]
impl AuthApi for RestClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        Ok(self.post_json("/auth/login", request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let builder = self.request(reqwest::Method::POST, "/auth/register").json(request);
        Ok(self.send_empty(builder).await?)
    }
}

#[async_trait]
impl ProfileApi for RestClient {
    async fn fetch_profile(&self) -> ApiResult<Profile> {
        Ok(self.get("/users/me").await?)
    }

    async fn update_username(&self, username: &str) -> ApiResult<Profile> {
        let body = UpdateUsernameRequest { username: username.to_string() };
        Ok(self.put_json("/users/me/name", &body).await?)
    }

    async fn upload_avatar(&self, file: FileUpload) -> ApiResult<Profile> {
        let form = reqwest::multipart::Form::new().part("avatar", file_part(file)?);
        let builder = self.request(reqwest::Method::PUT, "/users/me/avatar").multipart(form);
        Ok(self.send(builder).await?)
    }
}

#[async_trait]
impl FavoriteApi for RestClient {
    async fn add_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet> {
        let resp: FavoritesResponse = self.post_json("/users/me/favorites", hotel).await?;
        Ok(resp.favorites)
    }

    async fn remove_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet> {
        let builder = self.request_at(
            reqwest::Method::DELETE,
            &["users", "me", "favorites", hotel.source.as_str(), &hotel.id],
        )?;
        let resp: FavoritesResponse = self.send(builder).await?;
        Ok(resp.favorites)
    }
}

#[async_trait]
impl HotelApi for RestClient {
    async fn list_local_hotels(&self) -> ApiResult<Vec<LocalHotel>> {
        Ok(self.get("/localHotels").await?)
    }

    async fn local_hotel(&self, id: &str) -> ApiResult<LocalHotel> {
        Ok(self.get_at(&["localHotels", id]).await?)
    }

    async fn create_local_hotel(&self, form: LocalHotelForm) -> ApiResult<LocalHotel> {
        let builder = self.request(reqwest::Method::POST, "/localHotels").multipart(hotel_form(form)?);
        Ok(self.send(builder).await?)
    }

    async fn update_local_hotel(&self, id: &str, form: LocalHotelForm) -> ApiResult<LocalHotel> {
        let builder = self
            .request_at(reqwest::Method::PUT, &["localHotels", id])?
            .multipart(hotel_form(form)?);
        Ok(self.send(builder).await?)
    }

    async fn delete_local_hotel(&self, id: &str) -> ApiResult<()> {
        Ok(self.delete_at(&["localHotels", id]).await?)
    }

    async fn search_external(&self, request: &HotelSearchRequest) -> ApiResult<Vec<ExternalHotel>> {
        let resp: ExternalSearchResponse = self.get_query("/hotels/search-with-images", request).await?;
        Ok(resp.hotels)
    }

    async fn external_detail(&self, code: &str) -> ApiResult<Option<ExternalHotelDetail>> {
        let resp: ExternalDetailResponse = self.get_query("/hotels/hotel-details", &[("hotelId", code)]).await?;
        Ok(resp.hotel)
    }

    async fn external_min_price(&self, code: &str) -> ApiResult<Option<f64>> {
        let resp: PriceResponse = self.get_query("/hotels/price", &[("hotelId", code)]).await?;
        Ok(resp.min_price)
    }
}

#[async_trait]
impl BookingApi for RestClient {
    async fn create_booking(&self, booking: &NewBooking) -> ApiResult<Booking> {
        Ok(self.post_json("/bookings", booking).await?)
    }

    async fn my_bookings(&self) -> ApiResult<Vec<Booking>> {
        Ok(self.get("/bookings/my").await?)
    }

    async fn cancel_booking(&self, id: &str) -> ApiResult<()> {
        Ok(self.delete_at(&["bookings", id]).await?)
    }
}

#[async_trait]
impl ReviewApi for RestClient {
    async fn create_review(&self, review: &NewReview) -> ApiResult<()> {
        let builder = self.request(reqwest::Method::POST, "/reviews").json(review);
        Ok(self.send_empty(builder).await?)
    }

    async fn reviews_for_local_hotel(&self, hotel_id: &str) -> ApiResult<Vec<Review>> {
        Ok(self.get_at(&["reviews", "localHotels", hotel_id]).await?)
    }

    async fn delete_review(&self, id: &str) -> ApiResult<()> {
        Ok(self.delete_at(&["reviews", id]).await?)
    }
}

#[async_trait]
impl FlightApi for RestClient {
    async fn list_flights(&self, limit: u32) -> ApiResult<Vec<Flight>> {
        let resp: FlightsResponse = self.get_query("/flights", &[("limit", limit)]).await?;
        Ok(resp.flights)
    }
}
