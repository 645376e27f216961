// Handlers for the edit-page form actions: saving a booking and the
// two-phase delete. Both follow post/redirect/get; validation failures and
// transport failures redirect back with flash state, never a 500.

use axum::{
    extract::{Form, Path, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::{
    booking_api,
    error::{AppError, AppResult},
    models::{Booking, BookingForm},
    selection::{self, DeleteFlow, Selection, SelectionError},
    AppState,
};

#[derive(Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub sel: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

fn error_code(reason: &SelectionError) -> &'static str {
    match reason {
        SelectionError::MissingFields => "fields",
        SelectionError::IncompleteRange | SelectionError::RangeCollision => "range",
    }
}

// Edit URL preserving the submitted selection and detail fields, so nothing
// the user typed is lost across the redirect.
fn edit_url_with(booking_id: u32, selection: &Selection, details: &BookingForm, flash: &str) -> String {
    format!(
        "/bookings/{booking_id}/edit?sel={selection}&name={}&email={}&phone={}&{flash}",
        urlencoding::encode(&details.name),
        urlencoding::encode(&details.email),
        urlencoding::encode(&details.phone),
    )
}

pub async fn save_booking(
    State(app_state): State<AppState>,
    Path(booking_id): Path<u32>,
    Form(form): Form<SaveForm>,
) -> AppResult<Redirect> {
    let selection = Selection::from_query(&form.sel);
    let details = BookingForm {
        name: form.name,
        email: form.email,
        phone: form.phone,
    };

    // Nothing incomplete or colliding may reach the network.
    let (start_date, end_date) = match selection::validate_save(&details, &selection) {
        Ok(range) => range,
        Err(reason) => {
            tracing::info!(booking_id, %reason, "Save rejected by validation");
            let flash = format!("error={}", error_code(&reason));
            return Ok(Redirect::to(&edit_url_with(
                booking_id, &selection, &details, &flash,
            )));
        }
    };

    // Snapshot the cached record; the lock is not held across the upstream call.
    let snapshot = {
        let store = app_state.store.read().await;
        store.booking(booking_id).cloned()
    };
    let Some(snapshot) = snapshot else {
        return Err(AppError::NotFound(format!("No booking with id {booking_id}")));
    };

    let updated = Booking {
        name: details.name.clone(),
        email: details.email.clone(),
        phone: details.phone.clone(),
        start_date,
        end_date,
        ..snapshot
    };

    match booking_api::update_booking(&app_state.http_client, &app_state.settings, &updated).await {
        Ok(saved) => {
            // Merge the canonical record back by identifier.
            let mut store = app_state.store.write().await;
            if !store.replace_booking(saved) {
                tracing::warn!(booking_id, "Saved booking is no longer in the local cache");
            }
            Ok(Redirect::to(&format!("/bookings/{booking_id}/edit?saved=1")))
        }
        Err(e) => {
            // Prior state stays intact; the user may retry manually.
            tracing::error!(booking_id, error = ?e, "Failed to update booking upstream");
            Ok(Redirect::to(&edit_url_with(
                booking_id, &selection, &details, "error=save",
            )))
        }
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    pub confirmed: Option<String>,
}

pub async fn delete_booking(
    State(app_state): State<AppState>,
    Path(booking_id): Path<u32>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Redirect> {
    let flow = if form.confirmed.as_deref() == Some("yes") {
        DeleteFlow::Idle.request()
    } else {
        DeleteFlow::Idle
    };
    let flow = flow.begin();
    if flow != DeleteFlow::Deleting {
        // A delete that was never confirmed has no effect.
        tracing::warn!(booking_id, "Unconfirmed delete request ignored");
        return Ok(Redirect::to(&format!("/bookings/{booking_id}/edit")));
    }

    if app_state.store.read().await.booking(booking_id).is_none() {
        return Err(AppError::NotFound(format!("No booking with id {booking_id}")));
    }

    match booking_api::delete_booking(&app_state.http_client, &app_state.settings, booking_id).await
    {
        Ok(()) => {
            // Targeted removal by identifier; no full reload.
            let mut store = app_state.store.write().await;
            store.remove_booking(booking_id);
            Ok(Redirect::to("/"))
        }
        Err(e) => {
            tracing::error!(booking_id, error = ?e, "Failed to delete booking upstream");
            match flow.fail() {
                // Back to the confirmation prompt; the delete stays retryable.
                DeleteFlow::Confirming => Ok(Redirect::to(&format!(
                    "/bookings/{booking_id}/edit?delete=confirm"
                ))),
                _ => Ok(Redirect::to(&format!("/bookings/{booking_id}/edit"))),
            }
        }
    }
}
