// Derives the set of occupied calendar days from the cached booking
// collection. Everything here is a pure function over in-memory data;
// the sets are recomputed per render and never persisted.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::filter::BookingFilter;
use crate::models::{Booking, Vehicle};

// Every day from `start` to `end` inclusive. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

// Identifier lookup the occupancy functions resolve vehicles through.
pub fn vehicles_by_id(vehicles: &[Vehicle]) -> HashMap<u32, &Vehicle> {
    vehicles.iter().map(|v| (v.vehicle_id, v)).collect()
}

// All days covered by at least one booking that passes `filter`, optionally
// restricted to a single year and optionally ignoring one booking (so an
// in-progress edit does not collide with its own prior range). Bookings whose
// vehicle does not resolve are skipped outright.
pub fn occupied_dates(
    bookings: &[Booking],
    vehicles: &HashMap<u32, &Vehicle>,
    filter: &BookingFilter,
    year: Option<i32>,
    exclude: Option<u32>,
) -> BTreeSet<NaiveDate> {
    let mut occupied = BTreeSet::new();
    for booking in bookings {
        if exclude == Some(booking.booking_id) {
            continue;
        }
        let vehicle = vehicles.get(&booking.vehicle_id).copied();
        if !filter.matches(booking, vehicle) {
            continue;
        }
        for day in days_inclusive(booking.start_date, booking.end_date) {
            // A range spanning a year boundary contributes only its in-year
            // days to that year's calendar.
            if year.map_or(true, |y| day.year() == y) {
                occupied.insert(day);
            }
        }
    }
    occupied
}

// Edit-mode variant: days taken on one specific vehicle by bookings other
// than the one being edited. No category/search filtering and no year
// restriction apply here.
pub fn vehicle_occupied_dates(
    bookings: &[Booking],
    vehicle_id: u32,
    exclude_booking_id: u32,
) -> BTreeSet<NaiveDate> {
    let mut occupied = BTreeSet::new();
    for booking in bookings {
        if booking.vehicle_id != vehicle_id || booking.booking_id == exclude_booking_id {
            continue;
        }
        occupied.extend(days_inclusive(booking.start_date, booking.end_date));
    }
    occupied
}

// The bookings covering a given day under the active filter, for the
// day-detail view. Uses the same predicate as `occupied_dates`.
pub fn bookings_on<'a>(
    date: NaiveDate,
    bookings: &'a [Booking],
    vehicles: &HashMap<u32, &Vehicle>,
    filter: &BookingFilter,
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.start_date <= date && date <= b.end_date)
        .filter(|b| filter.matches(b, vehicles.get(&b.vehicle_id).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Category;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn vehicle(id: u32, trim: &str) -> Vehicle {
        Vehicle {
            vehicle_id: id,
            model: "Ranger".into(),
            trim: trim.into(),
            vin: format!("VIN{id:05}"),
        }
    }

    fn booking(id: u32, vehicle_id: u32, name: &str, start: &str, end: &str) -> Booking {
        Booking {
            booking_id: id,
            vehicle_id,
            name: name.into(),
            email: "x@example.com".into(),
            phone: "0400 000 000".into(),
            start_date: d(start),
            end_date: d(end),
        }
    }

    #[test]
    fn covers_every_day_of_a_matching_booking_inclusive() {
        let vehicles = vec![vehicle(7, "XLT")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![booking(1, 7, "Ann", "2025-03-10", "2025-03-12")];

        let occupied =
            occupied_dates(&bookings, &lookup, &BookingFilter::default(), Some(2025), None);
        assert_eq!(
            occupied.iter().copied().collect::<Vec<_>>(),
            vec![d("2025-03-10"), d("2025-03-11"), d("2025-03-12")]
        );
    }

    #[test]
    fn single_day_booking_occupies_exactly_one_day() {
        let vehicles = vec![vehicle(7, "XLT")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![booking(1, 7, "Ann", "2025-06-01", "2025-06-01")];

        let occupied = occupied_dates(&bookings, &lookup, &BookingFilter::default(), None, None);
        assert_eq!(occupied.len(), 1);
        assert!(occupied.contains(&d("2025-06-01")));
    }

    #[test]
    fn output_is_invariant_under_booking_order() {
        let vehicles = vec![vehicle(7, "XLT"), vehicle(8, "PRO")];
        let lookup = vehicles_by_id(&vehicles);
        let a = booking(1, 7, "Ann", "2025-03-10", "2025-03-12");
        let b = booking(2, 8, "Bob", "2025-05-01", "2025-05-03");
        let c = booking(3, 7, "Cho", "2025-03-12", "2025-03-14");

        let forward = occupied_dates(
            &[a.clone(), b.clone(), c.clone()],
            &lookup,
            &BookingFilter::default(),
            Some(2025),
            None,
        );
        let backward =
            occupied_dates(&[c, b, a], &lookup, &BookingFilter::default(), Some(2025), None);
        assert_eq!(forward, backward);
    }

    #[test]
    fn year_restriction_keeps_only_in_year_days() {
        let vehicles = vec![vehicle(7, "XLT")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![booking(1, 7, "Ann", "2024-12-30", "2025-01-02")];

        let in_2025 =
            occupied_dates(&bookings, &lookup, &BookingFilter::default(), Some(2025), None);
        assert_eq!(
            in_2025.iter().copied().collect::<Vec<_>>(),
            vec![d("2025-01-01"), d("2025-01-02")]
        );

        let unrestricted =
            occupied_dates(&bookings, &lookup, &BookingFilter::default(), None, None);
        assert_eq!(unrestricted.len(), 4);
    }

    #[test]
    fn orphaned_booking_occupies_nothing() {
        let vehicles = vec![vehicle(7, "XLT")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![booking(1, 99, "Ann", "2025-03-10", "2025-03-12")];

        let occupied = occupied_dates(&bookings, &lookup, &BookingFilter::default(), None, None);
        assert!(occupied.is_empty());
    }

    #[test]
    fn filtered_out_booking_contributes_no_days() {
        let vehicles = vec![vehicle(7, "XLT"), vehicle(8, "PRO")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![
            booking(1, 7, "Ann Smith", "2025-03-10", "2025-03-11"),
            booking(2, 8, "Bob Jones", "2025-04-01", "2025-04-02"),
        ];

        let filter = BookingFilter::new(Category::Xlt, "smith");
        let occupied = occupied_dates(&bookings, &lookup, &filter, Some(2025), None);
        assert!(occupied.contains(&d("2025-03-10")));
        assert!(occupied.contains(&d("2025-03-11")));
        assert!(!occupied.contains(&d("2025-04-01")));
    }

    #[test]
    fn exclusion_removes_only_uniquely_covered_days() {
        let vehicles = vec![vehicle(7, "XLT")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![
            booking(1, 7, "Ann", "2025-03-10", "2025-03-12"),
            booking(2, 7, "Bob", "2025-03-12", "2025-03-13"),
        ];

        let occupied =
            occupied_dates(&bookings, &lookup, &BookingFilter::default(), None, Some(1));
        // 03-12 stays occupied through booking 2; 03-10 and 03-11 were only
        // covered by the excluded booking.
        assert!(!occupied.contains(&d("2025-03-10")));
        assert!(!occupied.contains(&d("2025-03-11")));
        assert!(occupied.contains(&d("2025-03-12")));
        assert!(occupied.contains(&d("2025-03-13")));
    }

    #[test]
    fn vehicle_variant_scopes_to_one_vehicle_and_excludes_the_edited_booking() {
        let bookings = vec![
            booking(1, 7, "Ann", "2025-03-10", "2025-03-12"),
            booking(2, 7, "Bob", "2025-03-20", "2025-03-21"),
            booking(3, 8, "Cho", "2025-03-10", "2025-03-12"),
        ];

        let occupied = vehicle_occupied_dates(&bookings, 7, 1);
        assert!(!occupied.contains(&d("2025-03-11")));
        assert!(occupied.contains(&d("2025-03-20")));
        assert!(occupied.contains(&d("2025-03-21")));
        // Vehicle 8's booking is out of scope entirely.
        assert_eq!(occupied.len(), 2);
    }

    #[test]
    fn bookings_on_lists_exactly_the_coverers_that_pass_the_filter() {
        let vehicles = vec![vehicle(7, "XLT"), vehicle(8, "PRO")];
        let lookup = vehicles_by_id(&vehicles);
        let bookings = vec![
            booking(1, 7, "Ann Smith", "2025-03-10", "2025-03-12"),
            booking(2, 8, "Bob Jones", "2025-03-11", "2025-03-11"),
            booking(3, 7, "Cho Park", "2025-03-13", "2025-03-14"),
        ];

        let all = bookings_on(d("2025-03-11"), &bookings, &lookup, &BookingFilter::default());
        assert_eq!(
            all.iter().map(|b| b.booking_id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let xlt_only = bookings_on(
            d("2025-03-11"),
            &bookings,
            &lookup,
            &BookingFilter::new(Category::Xlt, ""),
        );
        assert_eq!(
            xlt_only.iter().map(|b| b.booking_id).collect::<Vec<_>>(),
            vec![1]
        );
    }
}
