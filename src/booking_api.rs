// Functions to interact with the upstream booking service (fetching
// vehicles and bookings, replacing and deleting bookings).

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::Settings;
use crate::models::{Booking, Vehicle};

fn api_url(settings: &Settings, path: &str) -> String {
    format!("{}{}", settings.booking_api_url.trim_end_matches('/'), path)
}

pub async fn fetch_vehicles(client: &Client, settings: &Settings) -> Result<Vec<Vehicle>> {
    let url = api_url(settings, "/api/vehicles");
    tracing::debug!(%url, "Fetching vehicles");

    let vehicles: Vec<Vehicle> = client
        .get(&url)
        .send()
        .await
        .context("Failed to reach booking service for vehicles")?
        .error_for_status()
        .context("Booking service returned an error for vehicles")?
        .json()
        .await
        .context("Failed to parse vehicles response")?;

    tracing::debug!(count = vehicles.len(), "Fetched vehicles");
    Ok(vehicles)
}

// Date normalization happens inside Booking's deserializer, so callers only
// ever see plain calendar days.
pub async fn fetch_bookings(client: &Client, settings: &Settings) -> Result<Vec<Booking>> {
    let url = api_url(settings, "/api/bookings");
    tracing::debug!(%url, "Fetching bookings");

    let bookings: Vec<Booking> = client
        .get(&url)
        .send()
        .await
        .context("Failed to reach booking service for bookings")?
        .error_for_status()
        .context("Booking service returned an error for bookings")?
        .json()
        .await
        .context("Failed to parse bookings response")?;

    tracing::debug!(count = bookings.len(), "Fetched bookings");
    Ok(bookings)
}

// Idempotent full-record replace. The service responds with the canonical
// stored record, which the caller substitutes into the local cache.
pub async fn update_booking(
    client: &Client,
    settings: &Settings,
    booking: &Booking,
) -> Result<Booking> {
    let url = api_url(settings, "/api/bookings");
    tracing::debug!(%url, booking_id = booking.booking_id, "Replacing booking");

    let saved: Booking = client
        .put(&url)
        .json(booking)
        .send()
        .await
        .context("Failed to reach booking service to update booking")?
        .error_for_status()
        .context("Booking service rejected the booking update")?
        .json()
        .await
        .context("Failed to parse updated booking response")?;

    tracing::info!(booking_id = saved.booking_id, "Booking updated upstream");
    Ok(saved)
}

pub async fn delete_booking(client: &Client, settings: &Settings, booking_id: u32) -> Result<()> {
    let url = api_url(settings, &format!("/api/bookings/{booking_id}"));
    tracing::debug!(%url, booking_id, "Deleting booking");

    client
        .delete(&url)
        .send()
        .await
        .context("Failed to reach booking service to delete booking")?
        .error_for_status()
        .context("Booking service rejected the booking delete")?;

    tracing::info!(booking_id, "Booking deleted upstream");
    Ok(())
}
