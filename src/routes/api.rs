// Handlers for the JSON API endpoints exposing the cached collections and
// the derived occupied-date set.

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::AppResult,
    filter::{BookingFilter, Category},
    models::{Booking, Vehicle},
    occupancy,
    AppState,
};

pub async fn get_vehicles(State(app_state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    tracing::info!("[HANDLER] /api/vehicles - Request received.");
    let store = app_state.store.read().await;
    Ok(Json(store.vehicles.clone()))
}

pub async fn get_bookings(State(app_state): State<AppState>) -> AppResult<Json<Vec<Booking>>> {
    tracing::info!("[HANDLER] /api/bookings - Request received.");
    let store = app_state.store.read().await;
    Ok(Json(store.bookings.clone()))
}

#[derive(Deserialize)]
pub struct OccupancyQuery {
    pub year: Option<i32>,
    pub category: Option<String>,
    pub q: Option<String>,
    pub exclude: Option<u32>,
}

// Sorted list of occupied days under the given filter, optionally restricted
// to a year and optionally excluding one booking.
pub async fn get_occupancy(
    State(app_state): State<AppState>,
    Query(params): Query<OccupancyQuery>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    let filter = BookingFilter::new(
        Category::from_param(params.category.as_deref()),
        params.q.unwrap_or_default(),
    );
    tracing::info!(
        year = ?params.year,
        category = filter.category.as_str(),
        exclude = ?params.exclude,
        "[HANDLER] /api/occupancy - Request received."
    );

    let store = app_state.store.read().await;
    let lookup = occupancy::vehicles_by_id(&store.vehicles);
    let occupied = occupancy::occupied_dates(
        &store.bookings,
        &lookup,
        &filter,
        params.year,
        params.exclude,
    );
    Ok(Json(occupied.into_iter().collect()))
}
