use anyhow::{Context, Result};
use axum::{extract::FromRef, Router};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::store::Store;

// Declare modules
mod booking_api;
mod calendar;
mod config;
mod error;
mod filter;
mod models;
mod occupancy;
mod routes;
mod selection;
mod store;

// Define the application state struct
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: Arc<Client>,
    pub store: Arc<RwLock<Store>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetbook=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing Fleetbook server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    // Shared client for every call to the booking service
    let http_client = Arc::new(
        Client::builder()
            .build()
            .context("Failed to build shared reqwest client")?,
    );

    // Fetch both collections concurrently before accepting requests; nothing
    // is renderable until they are present.
    let (vehicles, bookings) = futures::future::try_join(
        booking_api::fetch_vehicles(&http_client, &shared_settings),
        booking_api::fetch_bookings(&http_client, &shared_settings),
    )
    .await
    .context("Initial load from the booking service failed")?;
    tracing::info!(
        vehicles = vehicles.len(),
        bookings = bookings.len(),
        "Initial data loaded from booking service."
    );

    let app_state = AppState {
        settings: shared_settings.clone(),
        http_client,
        store: Arc::new(RwLock::new(Store::new(vehicles, bookings))),
    };

    let router: Router = routes::create_router(app_state);

    // Combine the router with static file serving
    let app = router.nest_service("/static", ServeDir::new("static"));

    // Parse the server address from settings
    let addr: SocketAddr = match shared_settings.server_address.parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(
                "Invalid server address format in configuration ('{}'): {}",
                shared_settings.server_address,
                e
            );
            return Err(anyhow::anyhow!(
                "Invalid server address format: {}",
                shared_settings.server_address
            ));
        }
    };

    // Create a TCP listener
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    // Run the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
