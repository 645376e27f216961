// Data structures shared across the app: the records owned by the remote
// booking service and the form payloads received from the browser.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// A vehicle in the fleet. Immutable from our side; the remote service owns it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Vehicle {
    pub vehicle_id: u32,
    pub model: String,
    // Free-text trim tag; category codes like "XLT" or "PRO" appear as substrings.
    pub trim: String,
    pub vin: String,
}

// A booking as cached locally. Dates are inclusive calendar days with no time
// component; `start_date <= end_date` is guaranteed by the remote service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Booking {
    pub booking_id: u32,
    pub vehicle_id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "dateform::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "dateform::deserialize")]
    pub end_date: NaiveDate,
}

// Booking details submitted from the edit form.
#[derive(Debug, Deserialize, Clone)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

// The upstream service serializes dates in an unspecified form: sometimes a
// plain `YYYY-MM-DD`, sometimes a full timestamp. Normalize to a calendar day
// here so nothing past this boundary ever sees a time component.
pub(crate) mod dateform {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        // A timestamp like "2025-03-10T00:00:00.000Z" starts with the day.
        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn booking_dates_accept_plain_days() {
        let b: Booking = serde_json::from_str(
            r#"{"booking_id":1,"vehicle_id":7,"name":"Ann Smith","email":"ann@example.com",
                "phone":"0400 000 000","start_date":"2025-03-10","end_date":"2025-03-12"}"#,
        )
        .unwrap();
        assert_eq!(b.start_date, d("2025-03-10"));
        assert_eq!(b.end_date, d("2025-03-12"));
    }

    #[test]
    fn booking_dates_accept_timestamps() {
        let b: Booking = serde_json::from_str(
            r#"{"booking_id":1,"vehicle_id":7,"name":"Ann Smith","email":"ann@example.com",
                "phone":"0400 000 000","start_date":"2025-03-10T00:00:00.000Z",
                "end_date":"2025-03-12T14:30:00+10:00"}"#,
        )
        .unwrap();
        assert_eq!(b.start_date, d("2025-03-10"));
        assert_eq!(b.end_date, d("2025-03-12"));
    }

    #[test]
    fn booking_serializes_dates_as_plain_days() {
        let b = Booking {
            booking_id: 1,
            vehicle_id: 7,
            name: "Ann Smith".into(),
            email: "ann@example.com".into(),
            phone: "0400 000 000".into(),
            start_date: d("2025-03-10"),
            end_date: d("2025-03-12"),
        };
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["start_date"], "2025-03-10");
        assert_eq!(json["end_date"], "2025-03-12");
    }

    #[test]
    fn malformed_booking_date_is_a_deserialization_error() {
        let result: Result<Booking, _> = serde_json::from_str(
            r#"{"booking_id":1,"vehicle_id":7,"name":"Ann","email":"a@b.c",
                "phone":"0","start_date":"soon","end_date":"2025-03-12"}"#,
        );
        assert!(result.is_err());
    }
}
