use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn badge_color(&self) -> &'static str {
        match self {
            BookingStatus::Active => "green",
            BookingStatus::Completed => "blue",
            BookingStatus::Cancelled => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_phone: String,
    pub user_name: String,
    pub host_id: String,
    pub host_name: String,
    pub host_phone: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price_per_day: Decimal,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub vehicle_plate_number: String,
}

impl Booking {
    /// Rental length in whole days, partial days rounded up.
    pub fn rental_days(&self) -> i64 {
        let seconds = (self.end_date - self.start_date).num_seconds().abs();
        (seconds + 86_399) / 86_400
    }
}

/// Time window the booking list is narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    Today,
    Week,
    Month,
    Past,
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Today => write!(f, "today"),
            TimeFilter::Week => write!(f, "week"),
            TimeFilter::Month => write!(f, "month"),
            TimeFilter::Past => write!(f, "past"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingQuery {
    pub filter: TimeFilter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingList {
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn booking(start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
        Booking {
            id: "b-1".into(),
            user_id: "u-1".into(),
            user_email: "renter@example.com".into(),
            user_phone: "+250780000001".into(),
            user_name: "Renter".into(),
            host_id: "h-1".into(),
            host_name: "Host".into(),
            host_phone: "+250780000002".into(),
            start_date: start,
            end_date: end,
            price_per_day: dec!(45),
            total_price: dec!(225),
            status: BookingStatus::Active,
            vehicle_plate_number: "RAD123A".into(),
        }
    }

    #[test]
    fn rental_days_rounds_partial_days_up() {
        let start = Utc.with_ymd_and_hms(2026, 2, 20, 8, 0, 0).unwrap();
        let full = booking(start, start + chrono::Duration::days(5));
        assert_eq!(full.rental_days(), 5);

        let partial = booking(start, start + chrono::Duration::hours(30));
        assert_eq!(partial.rental_days(), 2);
    }

    #[test]
    fn time_filter_serializes_lowercase() {
        let body = serde_json::to_value(BookingQuery {
            filter: TimeFilter::Week,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"filter": "week"}));
    }
}
