// Handlers that render the calendar, list, day-detail and edit pages.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::{
    calendar::{self, MonthGrid},
    error::{AppError, AppResult},
    filter::{BookingFilter, Category},
    occupancy,
    selection::{ClickOutcome, DeleteFlow, Selection, SelectionError},
    AppState,
};

// --- Templates ---

#[derive(Template)]
#[template(path = "calendar.html")]
struct CalendarTemplate {
    year: i32,
    months: Vec<MonthGrid>,
    q: String,
    category: &'static str,
    is_list: bool,
    tabs: Vec<Tab>,
    toggle_href: String,
    toggle_label: &'static str,
    day_query: String,
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListTemplate {
    q: String,
    category: &'static str,
    is_list: bool,
    tabs: Vec<Tab>,
    toggle_href: String,
    toggle_label: &'static str,
    rows: Vec<VehicleRow>,
}

#[derive(Template)]
#[template(path = "day.html")]
struct DayTemplate {
    date: NaiveDate,
    rows: Vec<DayRow>,
    back_href: String,
}

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate {
    booking_id: u32,
    vehicle_label: String,
    months: Vec<MonthGrid>,
    sel_query: String,
    name: String,
    email: String,
    phone: String,
    range_label: String,
    banner: Option<Banner>,
    confirming: bool,
}

struct Tab {
    label: &'static str,
    href: String,
    active: bool,
}

struct VehicleRow {
    label: String,
    bookings: Vec<BookingRow>,
}

struct BookingRow {
    name: String,
    period: String,
    edit_href: String,
}

struct DayRow {
    vehicle_label: String,
    vin: String,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    edit_href: String,
}

struct Banner {
    error: bool,
    message: String,
}

fn render<T: Template>(template: T) -> AppResult<Html<String>> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}

fn home_href(category: Category, search: &str, list_view: bool) -> String {
    let mut href = format!("/?category={}", category.as_str());
    if !search.is_empty() {
        href.push_str(&format!("&q={}", urlencoding::encode(search)));
    }
    if list_view {
        href.push_str("&view=list");
    }
    href
}

fn category_tabs(active: Category, search: &str, list_view: bool) -> Vec<Tab> {
    Category::ALL
        .iter()
        .map(|c| Tab {
            label: c.as_str(),
            href: home_href(*c, search, list_view),
            active: *c == active,
        })
        .collect()
}

// --- Page Handlers ---

#[derive(Deserialize)]
pub struct HomeQuery {
    category: Option<String>,
    q: Option<String>,
    view: Option<String>,
}

// The annual calendar, or the per-vehicle booking list when `view=list`.
pub async fn home_page(
    State(app_state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> AppResult<Html<String>> {
    let category = Category::from_param(params.category.as_deref());
    let search = params.q.unwrap_or_default();
    let is_list = params.view.as_deref() == Some("list");
    let filter = BookingFilter::new(category, search.clone());
    tracing::info!(category = category.as_str(), search = %search, is_list, "Rendering home view");

    let store = app_state.store.read().await;
    let tabs = category_tabs(category, &search, is_list);
    let toggle_href = home_href(category, &search, !is_list);
    let toggle_label = if is_list { "Calendar View" } else { "List View" };

    if is_list {
        let mut vehicles: Vec<_> = store
            .vehicles
            .iter()
            .filter(|v| filter.matches_vehicle(v))
            .collect();
        vehicles.sort_by_key(|v| v.vehicle_id);

        let rows = vehicles
            .into_iter()
            .map(|v| VehicleRow {
                label: format!("{} {} (ID: {})", v.model, v.trim, v.vehicle_id),
                bookings: store
                    .bookings
                    .iter()
                    .filter(|b| b.vehicle_id == v.vehicle_id && filter.matches(b, Some(v)))
                    .map(|b| BookingRow {
                        name: b.name.clone(),
                        period: format!(
                            "{} - {}",
                            b.start_date.format("%d/%m/%Y"),
                            b.end_date.format("%d/%m/%Y")
                        ),
                        edit_href: format!("/bookings/{}/edit", b.booking_id),
                    })
                    .collect(),
            })
            .collect();

        render(ListTemplate {
            q: search,
            category: category.as_str(),
            is_list,
            tabs,
            toggle_href,
            toggle_label,
            rows,
        })
    } else {
        let year = chrono::Local::now().date_naive().year();
        let lookup = occupancy::vehicles_by_id(&store.vehicles);
        let occupied =
            occupancy::occupied_dates(&store.bookings, &lookup, &filter, Some(year), None);
        let grid = calendar::year_grid(year, &occupied, &Selection::Empty);

        let mut day_query = format!("?category={}", category.as_str());
        if !search.is_empty() {
            day_query.push_str(&format!("&q={}", urlencoding::encode(&search)));
        }

        render(CalendarTemplate {
            year: grid.year,
            months: grid.months,
            q: search,
            category: category.as_str(),
            is_list,
            tabs,
            toggle_href,
            toggle_label,
            day_query,
        })
    }
}

#[derive(Deserialize)]
pub struct DayQuery {
    category: Option<String>,
    q: Option<String>,
}

// Every booking covering the clicked day, under the active filter.
pub async fn day_page(
    State(app_state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(params): Query<DayQuery>,
) -> AppResult<Html<String>> {
    let category = Category::from_param(params.category.as_deref());
    let search = params.q.unwrap_or_default();
    let filter = BookingFilter::new(category, search.clone());
    tracing::info!(%date, category = category.as_str(), "Rendering day view");

    let store = app_state.store.read().await;
    let lookup = occupancy::vehicles_by_id(&store.vehicles);
    let rows = occupancy::bookings_on(date, &store.bookings, &lookup, &filter)
        .into_iter()
        .filter_map(|b| {
            lookup.get(&b.vehicle_id).map(|v| DayRow {
                vehicle_label: format!("{} {}", v.model, v.trim),
                vin: v.vin.clone(),
                name: b.name.clone(),
                start: b.start_date,
                end: b.end_date,
                edit_href: format!("/bookings/{}/edit", b.booking_id),
            })
        })
        .collect();

    render(DayTemplate {
        date,
        rows,
        back_href: home_href(category, &search, false),
    })
}

#[derive(Deserialize)]
pub struct EditQuery {
    sel: Option<String>,
    click: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    delete: Option<String>,
    error: Option<String>,
    saved: Option<String>,
}

// Flash codes carried through redirects from the save/delete actions.
fn flash_message(code: &str) -> String {
    match code {
        "fields" => SelectionError::MissingFields.to_string(),
        "range" => SelectionError::IncompleteRange.to_string(),
        "save" => "Failed to update booking in database.".to_string(),
        _ => "Something went wrong.".to_string(),
    }
}

// The edit page: a twelve-month grid of clickable days plus the detail form.
// Selection state rides in the `sel` query parameter; a `click` parameter is
// one date-click event applied through the range selector.
pub async fn edit_page(
    State(app_state): State<AppState>,
    Path(booking_id): Path<u32>,
    Query(params): Query<EditQuery>,
) -> AppResult<Html<String>> {
    let store = app_state.store.read().await;
    let booking = store
        .booking(booking_id)
        .ok_or_else(|| AppError::NotFound(format!("No booking with id {booking_id}")))?;
    // A booking whose vehicle no longer resolves is not actionable.
    let vehicle = store.vehicle(booking.vehicle_id).ok_or_else(|| {
        AppError::NotFound(format!(
            "Vehicle {} for booking {booking_id} is unknown",
            booking.vehicle_id
        ))
    })?;

    // Days taken by other bookings on this vehicle. The booking under edit is
    // excluded so its own range can be kept or shrunk.
    let occupied =
        occupancy::vehicle_occupied_dates(&store.bookings, booking.vehicle_id, booking.booking_id);

    let mut selection = match params.sel.as_deref() {
        Some(raw) => Selection::from_query(raw),
        None => Selection::range(booking.start_date, booking.end_date),
    };

    let mut banner = None;
    if let Some(raw) = params.click.as_deref() {
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            match selection.click(day, &occupied) {
                ClickOutcome::Updated(next) => selection = next,
                ClickOutcome::Rejected {
                    selection: kept,
                    reason,
                } => {
                    tracing::info!(booking_id, %day, %reason, "Range selection rejected");
                    selection = kept;
                    banner = Some(Banner {
                        error: true,
                        message: reason.to_string(),
                    });
                }
            }
        }
    }
    if banner.is_none() {
        if let Some(code) = params.error.as_deref() {
            banner = Some(Banner {
                error: true,
                message: flash_message(code),
            });
        } else if params.saved.is_some() {
            banner = Some(Banner {
                error: false,
                message: "Changes successfully saved!".to_string(),
            });
        }
    }

    let confirming = DeleteFlow::from_param(params.delete.as_deref()).is_confirming();

    let year = chrono::Local::now().date_naive().year();
    let grid = calendar::year_grid(year, &occupied, &selection);

    let range_label = match selection {
        Selection::Range { start, end } => format!("Booking: {start} to {end}"),
        Selection::Anchor(anchor) => format!("Booking: {anchor} to ..."),
        Selection::Empty => String::new(),
    };

    render(EditTemplate {
        booking_id,
        vehicle_label: format!("{} {} ({})", vehicle.model, vehicle.trim, vehicle.vin),
        months: grid.months,
        sel_query: selection.to_string(),
        name: params.name.unwrap_or_else(|| booking.name.clone()),
        email: params.email.unwrap_or_else(|| booking.email.clone()),
        phone: params.phone.unwrap_or_else(|| booking.phone.clone()),
        range_label,
        banner,
        confirming,
    })
}
