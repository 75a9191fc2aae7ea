use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod db;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod password;
pub mod reviews;
pub mod seed;
pub mod state;
pub mod users;

pub use db::Database;
pub use state::{AppState, AuthConfig};

/// Every route lives under `/api`, matching the client's base URL.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let api = Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(hotels::routes())
        .merge(bookings::routes())
        .merge(reviews::routes())
        .merge(flights::routes());

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
