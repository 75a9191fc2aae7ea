use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use wayfare_core::api::{
    ApiError, ApiResult, AuthApi, BookingApi, FavoriteApi, FileUpload, FlightApi, HotelApi, ProfileApi, ReviewApi,
};
use wayfare_core::flight::Flight;
use wayfare_core::hotel::{ExternalHotel, ExternalHotelDetail, LocalHotel, LocalHotelForm, TextContent};
use wayfare_core::profile::{LoginRequest, LoginResponse, Profile, RegisterRequest, Role};
use wayfare_core::review::{NewReview, Review, ReviewAuthor};
use wayfare_core::search::HotelSearchRequest;
use wayfare_core::{Booking, FavoriteSet, HotelKey, NewBooking};
use wayfare_shared::Masked;

/// In-memory backend for view tests. Every call is counted; `fail_with` makes
/// every subsequent call fail with that error.
#[derive(Default)]
pub struct MockBackend {
    pub calls: AtomicUsize,
    pub fail_with: Mutex<Option<ApiError>>,
    pub favorites: Mutex<FavoriteSet>,
    pub bookings: Mutex<Vec<Booking>>,
    pub reviews: Mutex<Vec<Review>>,
    pub profile: Mutex<Option<Profile>>,
    pub local: Mutex<Vec<LocalHotel>>,
    pub external: Mutex<Vec<ExternalHotel>>,
    pub detail_fails: Mutex<bool>,
    pub price_fails: Mutex<bool>,
    pub role: Mutex<Role>,
    /// Per-operation failures, checked after `fail_with`.
    pub fail_ops: Mutex<HashMap<&'static str, ApiError>>,
    /// When set, `add_favorite` answers with a list that leaves the hotel out.
    pub refuse_adds: Mutex<bool>,
    /// When set, favorite calls wait here before answering.
    pub hold_favorites: Mutex<Option<Arc<Notify>>>,
    pub counts: Mutex<HashMap<&'static str, usize>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, err: ApiError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn heal(&self) {
        *self.fail_with.lock().unwrap() = None;
        self.fail_ops.lock().unwrap().clear();
    }

    pub fn fail_on(&self, op: &'static str, err: ApiError) {
        self.fail_ops.lock().unwrap().insert(op, err);
    }

    pub fn count(&self, op: &str) -> usize {
        self.counts.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    fn hit(&self, op: &'static str) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.counts.lock().unwrap().entry(op).or_default() += 1;
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        match self.fail_ops.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn maybe_hold(&self) {
        let notify = self.hold_favorites.lock().unwrap().clone();
        if let Some(notify) = notify {
            notify.notified().await;
        }
    }
}

pub fn profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        username: id.to_string(),
        avatar_url: None,
        role: Role::User,
        avatar_updated_at: None,
        favorites: FavoriteSet::new(),
    }
}

pub fn booking(id: &str, hotel: HotelKey, check_in: &str, stay_days: u32) -> Booking {
    Booking {
        id: id.to_string(),
        hotel_id: hotel.id,
        hotel_source: hotel.source,
        user_id: Some("u1".to_string()),
        check_in_date: wayfare_core::parse_instant(check_in).unwrap(),
        stay_days,
        check_out_date: None,
    }
}

pub fn local_hotel(id: &str, name: &str, location: &str, price: f64) -> LocalHotel {
    LocalHotel {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        price,
        description: None,
        image_filename: None,
        images: Vec::new(),
    }
}

pub fn external_hotel(code: u64, name: &str, zone: &str, min_price: Option<f64>) -> ExternalHotel {
    ExternalHotel {
        code,
        name: name.to_string(),
        category_name: "3 STARS".to_string(),
        zone_name: zone.to_string(),
        min_price,
        thumbnail: None,
    }
}

pub fn review(id: &str, author: &str, comment: &str) -> Review {
    Review {
        id: id.to_string(),
        hotel_id: Some("h1".to_string()),
        author: Some(ReviewAuthor { id: author.to_string(), username: Some(author.to_string()) }),
        comment: comment.to_string(),
        rating: 4,
        created_at: wayfare_core::parse_instant("2025-07-02T10:00:00Z").unwrap(),
    }
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.hit("login")?;
        if request.password.expose() != "secret" {
            return Err(ApiError::status(401, Some("Invalid credentials".into())));
        }
        Ok(LoginResponse {
            token: Masked::from("mock-token"),
            role: *self.role.lock().unwrap(),
            user_id: Some("u1".into()),
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<()> {
        self.hit("register")
    }
}

#[async_trait]
impl ProfileApi for MockBackend {
    async fn fetch_profile(&self) -> ApiResult<Profile> {
        self.hit("fetch_profile")?;
        let mut p = self.profile.lock().unwrap().clone().unwrap_or_else(|| profile("u1"));
        p.favorites = self.favorites.lock().unwrap().clone();
        Ok(p)
    }

    async fn update_username(&self, username: &str) -> ApiResult<Profile> {
        self.hit("update_username")?;
        let mut p = self.fetch_profile().await?;
        p.username = username.to_string();
        *self.profile.lock().unwrap() = Some(p.clone());
        Ok(p)
    }

    async fn upload_avatar(&self, file: FileUpload) -> ApiResult<Profile> {
        self.hit("upload_avatar")?;
        let mut p = self.fetch_profile().await?;
        p.avatar_url = Some(format!("/uploads/{}", file.file_name));
        p.avatar_updated_at = Some(1);
        Ok(p)
    }
}

#[async_trait]
impl FavoriteApi for MockBackend {
    async fn add_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet> {
        self.maybe_hold().await;
        self.hit("add_favorite")?;
        let mut favorites = self.favorites.lock().unwrap();
        if !*self.refuse_adds.lock().unwrap() {
            favorites.insert(hotel.clone());
        }
        Ok(favorites.clone())
    }

    async fn remove_favorite(&self, hotel: &HotelKey) -> ApiResult<FavoriteSet> {
        self.maybe_hold().await;
        self.hit("remove_favorite")?;
        let mut favorites = self.favorites.lock().unwrap();
        favorites.remove(hotel);
        Ok(favorites.clone())
    }
}

#[async_trait]
impl HotelApi for MockBackend {
    async fn list_local_hotels(&self) -> ApiResult<Vec<LocalHotel>> {
        self.hit("list_local_hotels")?;
        Ok(self.local.lock().unwrap().clone())
    }

    async fn local_hotel(&self, id: &str) -> ApiResult<LocalHotel> {
        self.hit("local_hotel")?;
        self.local
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| ApiError::status(404, Some("Hotel not found".into())))
    }

    async fn create_local_hotel(&self, form: LocalHotelForm) -> ApiResult<LocalHotel> {
        self.hit("create_local_hotel")?;
        let hotel = local_hotel("new", &form.name, &form.location, form.price);
        self.local.lock().unwrap().push(hotel.clone());
        Ok(hotel)
    }

    async fn update_local_hotel(&self, id: &str, form: LocalHotelForm) -> ApiResult<LocalHotel> {
        self.hit("update_local_hotel")?;
        Ok(local_hotel(id, &form.name, &form.location, form.price))
    }

    async fn delete_local_hotel(&self, id: &str) -> ApiResult<()> {
        self.hit("delete_local_hotel")?;
        self.local.lock().unwrap().retain(|h| h.id != id);
        Ok(())
    }

    async fn search_external(&self, _request: &HotelSearchRequest) -> ApiResult<Vec<ExternalHotel>> {
        self.hit("search_external")?;
        Ok(self.external.lock().unwrap().clone())
    }

    async fn external_detail(&self, code: &str) -> ApiResult<Option<ExternalHotelDetail>> {
        self.hit("external_detail")?;
        if *self.detail_fails.lock().unwrap() {
            return Err(ApiError::status(502, None));
        }
        Ok(Some(ExternalHotelDetail {
            name: TextContent { content: format!("Hotel {}", code) },
            description: None,
            address: None,
            images: Vec::new(),
            category: None,
            zone: None,
        }))
    }

    async fn external_min_price(&self, _code: &str) -> ApiResult<Option<f64>> {
        self.hit("external_min_price")?;
        if *self.price_fails.lock().unwrap() {
            return Err(ApiError::status(502, None));
        }
        Ok(Some(420.0))
    }
}

#[async_trait]
impl BookingApi for MockBackend {
    async fn create_booking(&self, new: &NewBooking) -> ApiResult<Booking> {
        self.hit("create_booking")?;
        let mut bookings = self.bookings.lock().unwrap();
        let created = Booking {
            id: format!("b{}", bookings.len() + 1),
            hotel_id: new.hotel_id.clone(),
            hotel_source: new.hotel_source,
            user_id: Some("u1".into()),
            check_in_date: new.check_in_date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
            stay_days: new.stay_days,
            check_out_date: None,
        };
        bookings.push(created.clone());
        Ok(created)
    }

    async fn my_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.hit("my_bookings")?;
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn cancel_booking(&self, id: &str) -> ApiResult<()> {
        self.hit("cancel_booking")?;
        self.bookings.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReviewApi for MockBackend {
    async fn create_review(&self, new: &NewReview) -> ApiResult<()> {
        self.hit("create_review")?;
        let mut reviews = self.reviews.lock().unwrap();
        let mut created = review(&format!("r{}", reviews.len() + 1), "u1", &new.comment);
        created.rating = new.rating;
        created.hotel_id = Some(new.hotel_id.clone());
        reviews.push(created);
        Ok(())
    }

    async fn reviews_for_local_hotel(&self, _hotel_id: &str) -> ApiResult<Vec<Review>> {
        self.hit("reviews_for_local_hotel")?;
        Ok(self.reviews.lock().unwrap().clone())
    }

    async fn delete_review(&self, id: &str) -> ApiResult<()> {
        self.hit("delete_review")?;
        self.reviews.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl FlightApi for MockBackend {
    async fn list_flights(&self, limit: u32) -> ApiResult<Vec<Flight>> {
        self.hit("list_flights")?;
        Ok((0..limit)
            .map(|i| Flight {
                flight_date: "2025-07-01".into(),
                flight_status: "scheduled".into(),
                flight_number: format!("CX{}", 100 + i),
                airline_name: "Cathay Pacific".into(),
                departure_airport: "Hong Kong International".into(),
                departure_iata: "HKG".into(),
                departure_scheduled: "2025-07-01T08:00:00+00:00".into(),
                arrival_airport: "Narita".into(),
                arrival_iata: "NRT".into(),
                arrival_scheduled: "2025-07-01T13:00:00+00:00".into(),
            })
            .collect())
    }
}
