use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use wayfare_api::{app, AppState, AuthConfig, Database};
use wayfare_client::RestClient;
use wayfare_core::api::{
    AuthApi, BookingApi, FavoriteApi, FileUpload, FlightApi, HotelApi, ProfileApi, ReviewApi,
};
use wayfare_core::hotel::LocalHotelForm;
use wayfare_core::profile::{LoginRequest, RegisterRequest, Role};
use wayfare_core::review::NewReview;
use wayfare_core::search::HotelSearchRequest;
use wayfare_core::{HotelKey, HotelSource, NewBooking};
use wayfare_shared::Masked;
use wayfare_store::{SessionStore, TokenSlot};
use wayfare_views::{
    BookingForm, FavoriteToggle, LoginView, Navigator, Route, RouteState, ToggleOutcome, ViewError,
};

const OPERATOR_CODE: &str = "AGENCY-2025";

async fn spawn_server() -> String {
    let state = AppState::new(
        Database::default(),
        AuthConfig {
            secret: "flow-test-secret".to_string(),
            expiration: 3600,
            operator_sign_up_code: Some(OPERATOR_CODE.to_string()),
        },
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str) -> (Arc<RestClient>, Arc<TokenSlot>) {
    let token = Arc::new(TokenSlot::new());
    (Arc::new(RestClient::new(base_url, token.clone())), token)
}

/// Registers and signs in; the returned client carries the bearer token.
async fn signed_in(base_url: &str, email: &str, sign_up_code: Option<&str>) -> (Arc<RestClient>, Arc<TokenSlot>) {
    let (api, token) = client(base_url);
    api.register(&RegisterRequest {
        email: email.to_string(),
        password: Masked::new("secret123".to_string()),
        username: None,
        sign_up_code: sign_up_code.map(str::to_string),
    })
    .await
    .unwrap();

    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password: Masked::new("secret123".to_string()),
        })
        .await
        .unwrap();
    token.set(response.token);
    (api, token)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let base = spawn_server().await;
    let (api, _token) = signed_in(&base, "mei@example.com", None).await;

    let profile = api.fetch_profile().await.unwrap();
    assert_eq!(profile.email, "mei@example.com");
    assert_eq!(profile.username, "mei");
    assert_eq!(profile.role, Role::User);
    assert!(profile.favorites.is_empty());

    let renamed = api.update_username("Mei Ling").await.unwrap();
    assert_eq!(renamed.username, "Mei Ling");

    let with_avatar = api
        .upload_avatar(FileUpload {
            file_name: "me.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })
        .await
        .unwrap();
    assert!(with_avatar.avatar_url.unwrap().ends_with("me.png"));
    assert!(with_avatar.avatar_updated_at.is_some());
}

#[tokio::test]
async fn test_wrong_password_and_duplicate_email() {
    let base = spawn_server().await;
    let (api, _token) = signed_in(&base, "kai@example.com", None).await;

    let err = api
        .login(&LoginRequest {
            email: "kai@example.com".to_string(),
            password: Masked::new("nope".to_string()),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message.as_deref(), Some("Invalid email or password"));

    let err = api
        .register(&RegisterRequest {
            email: "KAI@example.com".to_string(),
            password: Masked::new("secret123".to_string()),
            username: None,
            sign_up_code: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let base = spawn_server().await;
    let (api, _token) = client(&base);

    assert!(api.fetch_profile().await.unwrap_err().is_unauthorized());
    assert!(api.my_bookings().await.unwrap_err().is_unauthorized());
    // Public reads still work
    assert!(api.list_local_hotels().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_view_routes_operator_to_dashboard() {
    let base = spawn_server().await;
    signed_in(&base, "ops@example.com", Some(OPERATOR_CODE)).await;

    let token = Arc::new(TokenSlot::new());
    let rest = Arc::new(RestClient::new(base.as_str(), token.clone()));
    let store = Arc::new(SessionStore::new());
    let routes = Arc::new(RouteState::default());
    let mut view = LoginView::new(rest.clone(), rest.clone(), rest, store.clone(), token.clone(), routes.clone());
    view.email = "ops@example.com".to_string();
    view.password = Masked::new("secret123".to_string());

    assert_eq!(view.submit().await.unwrap(), Role::Operator);
    assert_eq!(routes.current(), Route::Dashboard);
    assert!(token.is_present());
    assert_eq!(store.profile().unwrap().email, "ops@example.com");
}

#[tokio::test]
async fn test_wrong_sign_up_code_is_rejected() {
    let base = spawn_server().await;
    let (api, _) = client(&base);
    let err = api
        .register(&RegisterRequest {
            email: "fake@example.com".to_string(),
            password: Masked::new("secret123".to_string()),
            username: None,
            sign_up_code: Some("GUESS".to_string()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
}

#[tokio::test]
async fn test_operator_manages_local_hotels() {
    let base = spawn_server().await;
    let (ops, _) = signed_in(&base, "agency@example.com", Some(OPERATOR_CODE)).await;
    let (guest, _) = signed_in(&base, "guest@example.com", None).await;

    let form = || LocalHotelForm {
        name: "Peak View".to_string(),
        location: "The Peak".to_string(),
        price: 650.0,
        description: Some("Quiet rooms".to_string()),
        image: Some(FileUpload {
            file_name: "peak.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }),
    };

    let err = guest.create_local_hotel(form()).await.unwrap_err();
    assert_eq!(err.status, Some(403));

    let hotel = ops.create_local_hotel(form()).await.unwrap();
    assert_eq!(hotel.name, "Peak View");
    assert_eq!(hotel.image_filename.as_deref(), Some("peak.jpg"));

    let mut changed = form();
    changed.price = 700.0;
    changed.image = None;
    let updated = ops.update_local_hotel(&hotel.id, changed).await.unwrap();
    assert_eq!(updated.price, 700.0);

    let listed = guest.list_local_hotels().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(guest.local_hotel(&hotel.id).await.unwrap().price, 700.0);

    ops.delete_local_hotel(&hotel.id).await.unwrap();
    assert_eq!(guest.local_hotel(&hotel.id).await.unwrap_err().status, Some(404));
}

#[tokio::test]
async fn test_external_search_detail_and_price() {
    let base = spawn_server().await;
    let (api, _) = client(&base);

    let hotels = api
        .search_external(&HotelSearchRequest {
            city: "Hong Kong".to_string(),
            check_in: day(2025, 7, 1),
            check_out: day(2025, 7, 3),
        })
        .await
        .unwrap();
    assert_eq!(hotels.len(), 3);

    let detail = api.external_detail("101201").await.unwrap().unwrap();
    assert_eq!(detail.name.content, "Harbourfront Suites");
    assert_eq!(api.external_min_price("101201").await.unwrap(), Some(980.0));
    assert_eq!(api.external_min_price("101203").await.unwrap(), None);
    assert!(api.external_detail("999999").await.unwrap().is_none());

    let err = api
        .search_external(&HotelSearchRequest {
            city: "Hong Kong".to_string(),
            check_in: day(2025, 7, 3),
            check_out: day(2025, 7, 3),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
}

#[tokio::test]
async fn test_server_rejects_duplicate_booking() {
    let base = spawn_server().await;
    let (api, token) = signed_in(&base, "lam@example.com", None).await;
    let hotel = HotelKey::external("202301");

    // A fresh store knows nothing about earlier bookings, so only the server can refuse
    let store = Arc::new(SessionStore::new());
    let routes = Arc::new(RouteState::default());
    routes.navigate(Route::ExternalHotel("202301".to_string()));
    let mut form = BookingForm::new(api.clone(), store.clone(), token.clone(), routes.clone(), Duration::from_millis(10))
        .for_hotel(hotel.clone());
    form.draft.check_in = Some(day(2025, 8, 10));
    form.draft.stay_days = 2;

    let booking = form.submit().await.unwrap();
    assert_eq!(booking.hotel_source, HotelSource::External);
    assert_eq!(store.bookings().len(), 1);
    form.take_redirect().unwrap().await.unwrap();
    assert_eq!(routes.current(), Route::Home);

    let err = api
        .create_booking(&NewBooking {
            hotel_id: "202301".to_string(),
            hotel_source: HotelSource::External,
            check_in_date: day(2025, 8, 10),
            stay_days: 1,
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // The same day for a different user is fine
    let (other, _) = signed_in(&base, "chan@example.com", None).await;
    let second = other
        .create_booking(&NewBooking {
            hotel_id: "202301".to_string(),
            hotel_source: HotelSource::External,
            check_in_date: day(2025, 8, 10),
            stay_days: 1,
        })
        .await;
    assert!(second.is_ok());

    let mut stale = BookingForm::new(api.clone(), Arc::new(SessionStore::new()), token, routes, Duration::ZERO)
        .for_hotel(hotel);
    stale.draft.check_in = Some(day(2025, 8, 10));
    match stale.submit().await {
        Err(ViewError::Api { source, .. }) => assert!(source.is_conflict()),
        other => panic!("expected conflict, got {:?}", other.map(|b| b.id)),
    }

    form.cancel(&booking.id).await.unwrap();
    assert!(store.bookings().is_empty());
    assert!(api.my_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_unknown_hotel_is_not_found() {
    let base = spawn_server().await;
    let (api, _) = signed_in(&base, "tse@example.com", None).await;
    let err = api
        .create_booking(&NewBooking {
            hotel_id: "nope".to_string(),
            hotel_source: HotelSource::Local,
            check_in_date: day(2025, 8, 10),
            stay_days: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_overlong_stay_gets_a_message() {
    let base = spawn_server().await;
    let (api, _) = signed_in(&base, "long@example.com", None).await;
    let err = api
        .create_booking(&NewBooking {
            hotel_id: "101201".to_string(),
            hotel_source: HotelSource::External,
            check_in_date: day(2025, 7, 1),
            stay_days: u32::MAX,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message.as_deref(), Some("Stay cannot exceed 365 nights"));

    // The server is still serving after the rejection
    assert!(api.my_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_follow_the_server() {
    let base = spawn_server().await;
    let (api, token) = signed_in(&base, "fav@example.com", None).await;
    let store = Arc::new(SessionStore::new());
    store.set_profile(Some(api.fetch_profile().await.unwrap()));

    let toggle = FavoriteToggle::new(api.clone(), store.clone(), token);
    let hotel = HotelKey::external("101202");

    assert_eq!(toggle.toggle(&hotel).await.unwrap(), ToggleOutcome::Confirmed { favorited: true });
    assert!(store.is_favorite(&hotel));
    assert!(api.fetch_profile().await.unwrap().favorites.contains(&hotel));

    assert_eq!(toggle.toggle(&hotel).await.unwrap(), ToggleOutcome::Confirmed { favorited: false });
    assert!(!store.is_favorite(&hotel));
    assert!(api.fetch_profile().await.unwrap().favorites.is_empty());
}

#[tokio::test]
async fn test_review_lifecycle() {
    let base = spawn_server().await;
    let (ops, _) = signed_in(&base, "owner@example.com", Some(OPERATOR_CODE)).await;
    let hotel = ops
        .create_local_hotel(LocalHotelForm {
            name: "Harbour Hostel".to_string(),
            location: "Sheung Wan".to_string(),
            price: 300.0,
            description: None,
            image: None,
        })
        .await
        .unwrap();

    let (author, _) = signed_in(&base, "writer@example.com", None).await;
    let (stranger, _) = signed_in(&base, "stranger@example.com", None).await;

    author
        .create_review(&NewReview {
            hotel_id: hotel.id.clone(),
            comment: "Clean and close to the ferry".to_string(),
            rating: 4,
        })
        .await
        .unwrap();

    let err = author
        .create_review(&NewReview {
            hotel_id: hotel.id.clone(),
            comment: "Too high".to_string(),
            rating: 6,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));

    let reviews = stranger.reviews_for_local_hotel(&hotel.id).await.unwrap();
    assert_eq!(reviews.len(), 1);
    let review = &reviews[0];
    assert_eq!(review.author.as_ref().unwrap().username.as_deref(), Some("writer"));

    assert_eq!(stranger.delete_review(&review.id).await.unwrap_err().status, Some(403));
    author.delete_review(&review.id).await.unwrap();
    assert!(author.reviews_for_local_hotel(&hotel.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_flights_limit() {
    let base = spawn_server().await;
    let (api, _) = client(&base);
    assert_eq!(api.list_flights(3).await.unwrap().len(), 3);
    assert_eq!(api.list_flights(50).await.unwrap().len(), 6);
}
