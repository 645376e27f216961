// The single predicate deciding which bookings are visible under the active
// category/search filter. Occupancy computation and every listing surface go
// through this, so "occupies a date" and "appears in a list" cannot diverge.

use crate::models::{Booking, Vehicle};

// Vehicle category tabs. Tokens are canonical uppercase codes matched as
// substrings of the vehicle's free-text trim field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Xlt,
    Pro,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::All, Category::Xlt, Category::Pro];

    // Lenient parse for query parameters: anything unrecognized means ALL.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("XLT") => Category::Xlt,
            Some("PRO") => Category::Pro,
            _ => Category::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "ALL",
            Category::Xlt => "XLT",
            Category::Pro => "PRO",
        }
    }

    // The trim substring an active category requires; ALL disables filtering.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Xlt => Some("XLT"),
            Category::Pro => Some("PRO"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub category: Category,
    pub search: String,
}

impl BookingFilter {
    pub fn new(category: Category, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    // A booking whose vehicle reference does not resolve is orphaned data
    // from the remote service; it never matches anything.
    pub fn matches(&self, booking: &Booking, vehicle: Option<&Vehicle>) -> bool {
        let Some(vehicle) = vehicle else {
            return false;
        };
        if let Some(token) = self.category.token() {
            // Category tokens are canonical uppercase; the trim match is
            // deliberately case-sensitive substring containment.
            if !vehicle.trim.contains(token) {
                return false;
            }
        }
        if !self.search.is_empty()
            && !booking
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        true
    }

    // Vehicle-only half of the predicate, for list rows that exist even when
    // a vehicle has no bookings.
    pub fn matches_vehicle(&self, vehicle: &Vehicle) -> bool {
        match self.category.token() {
            Some(token) => vehicle.trim.contains(token),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vehicle(trim: &str) -> Vehicle {
        Vehicle {
            vehicle_id: 7,
            model: "Ranger".into(),
            trim: trim.into(),
            vin: "1FTER4EH0LLA00001".into(),
        }
    }

    fn booking(name: &str) -> Booking {
        Booking {
            booking_id: 1,
            vehicle_id: 7,
            name: name.into(),
            email: "x@example.com".into(),
            phone: "0400 000 000".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        }
    }

    #[test]
    fn orphaned_booking_never_matches() {
        let f = BookingFilter::default();
        assert!(!f.matches(&booking("Ann Smith"), None));
    }

    #[test]
    fn all_category_disables_trim_filtering() {
        let f = BookingFilter::new(Category::All, "");
        assert!(f.matches(&booking("Ann Smith"), Some(&vehicle("Wildtrak"))));
    }

    #[test]
    fn category_token_must_appear_in_trim() {
        let f = BookingFilter::new(Category::Xlt, "");
        assert!(f.matches(&booking("Ann Smith"), Some(&vehicle("XLT 4x4"))));
        assert!(!f.matches(&booking("Ann Smith"), Some(&vehicle("PRO 4x2"))));
    }

    #[test]
    fn trim_match_is_case_sensitive() {
        let f = BookingFilter::new(Category::Xlt, "");
        assert!(!f.matches(&booking("Ann Smith"), Some(&vehicle("xlt 4x4"))));
    }

    #[test]
    fn trim_containing_both_tokens_matches_both_categories() {
        // Substring semantics are preserved as-is: a trim like "XLTPRO"
        // satisfies either category tab.
        let v = vehicle("XLTPRO");
        assert!(BookingFilter::new(Category::Xlt, "").matches(&booking("Ann"), Some(&v)));
        assert!(BookingFilter::new(Category::Pro, "").matches(&booking("Ann"), Some(&v)));
    }

    #[test]
    fn search_is_case_insensitive_on_renter_name() {
        let v = vehicle("XLT");
        let f = BookingFilter::new(Category::All, "SMITH");
        assert!(f.matches(&booking("ann smith"), Some(&v)));
        assert!(!f.matches(&booking("Bob Jones"), Some(&v)));
    }

    #[test]
    fn empty_search_matches_every_name() {
        let f = BookingFilter::new(Category::All, "");
        assert!(f.matches(&booking("anyone at all"), Some(&vehicle("XLT"))));
    }

    #[test]
    fn category_and_search_combine() {
        let f = BookingFilter::new(Category::Xlt, "smith");
        assert!(f.matches(&booking("Ann Smith"), Some(&vehicle("XLT"))));
        assert!(!f.matches(&booking("Ann Smith"), Some(&vehicle("PRO"))));
        assert!(!f.matches(&booking("Bob Jones"), Some(&vehicle("XLT"))));
    }

    #[test]
    fn vehicle_only_predicate_ignores_search() {
        let f = BookingFilter::new(Category::Pro, "smith");
        assert!(f.matches_vehicle(&vehicle("PRO 4x2")));
        assert!(!f.matches_vehicle(&vehicle("XLT 4x4")));
    }
}
