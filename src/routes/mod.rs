// Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

// Declare submodules for different route groups
mod actions;
mod api;
mod pages;

// create_router accepts the AppState and returns a Router; the state is
// provided when the router is consumed in main.rs.
pub fn create_router(app_state: AppState) -> Router {
    // JSON endpoints mirroring the surface the browser page consumed.
    let api_router = Router::new()
        .route("/vehicles", get(api::get_vehicles))
        .route("/bookings", get(api::get_bookings))
        .route("/occupancy", get(api::get_occupancy))
        .with_state(app_state.clone());

    Router::new()
        // Page routes
        .route("/", get(pages::home_page))
        .route("/day/:date", get(pages::day_page))
        .route("/bookings/:id/edit", get(pages::edit_page))
        // Form actions
        .route("/bookings/:id", post(actions::save_booking))
        .route("/bookings/:id/delete", post(actions::delete_booking))
        // Nest the API router which already has state
        .nest("/api", api_router)
        .with_state(app_state)
}
