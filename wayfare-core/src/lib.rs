pub mod api;
pub mod booking;
pub mod favorite;
pub mod flight;
pub mod hotel;
pub mod listing;
pub mod message;
pub mod optimistic;
pub mod profile;
pub mod review;
pub mod search;

pub use booking::{Booking, BookingDraft, BookingGuard, BookingRejection, NewBooking, MAX_STAY_DAYS};
pub use favorite::FavoriteSet;
pub use hotel::{HotelKey, HotelRef, HotelSource};
pub use listing::{HotelListView, HotelListing, PriceSort};
pub use message::{Locale, Message};
pub use optimistic::Optimistic;

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Parses a date as typed into a date input (`YYYY-MM-DD`) or as sent by the
/// backend (RFC 3339). Date-only values are pinned to midnight UTC.
pub fn parse_instant(raw: &str) -> CoreResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let day = parse_calendar_day(raw)?;
    Ok(day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()).unwrap_or_default())
}

/// Parses the calendar day of either accepted date format, ignoring time of day.
pub fn parse_calendar_day(raw: &str) -> CoreResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::InvalidDate("empty date".to_string()));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| CoreError::InvalidDate(format!("{}: {}", raw, e)))
}

pub(crate) mod serde_dates {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn flexible<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::parse_instant(&raw).map_err(serde::de::Error::custom)
    }

    pub fn flexible_day<'de, D>(deserializer: D) -> Result<chrono::NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::parse_calendar_day(&raw).map_err(serde::de::Error::custom)
    }

    pub fn flexible_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(raw) if !raw.trim().is_empty() => crate::parse_instant(&raw).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only_and_timestamp() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(parse_calendar_day("2025-07-01").unwrap(), day);
        assert_eq!(parse_calendar_day("2025-07-01T18:30:00.000Z").unwrap(), day);
        assert_eq!(parse_instant("2025-07-01").unwrap().date_naive(), day);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_calendar_day("").is_err());
        assert!(parse_calendar_day("07/01/2025").is_err());
    }
}
