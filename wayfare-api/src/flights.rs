use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use wayfare_core::flight::FlightsResponse;

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct FlightQuery {
    limit: Option<usize>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights", get(list_flights))
}

async fn list_flights(State(state): State<AppState>, Query(query): Query<FlightQuery>) -> Json<FlightsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    Json(FlightsResponse {
        flights: state.db.catalog().flights(limit),
    })
}
