use crate::hotel::{HotelKey, HotelSource};
use crate::message::Message;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Longest stay a single booking may cover.
pub const MAX_STAY_DAYS: u32 = 365;

/// A booking as returned by the backend. Bookings are created and deleted, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub hotel_id: String,
    #[serde(default)]
    pub hotel_source: HotelSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "crate::serde_dates::flexible")]
    pub check_in_date: DateTime<Utc>,
    #[serde(default = "default_stay_days")]
    pub stay_days: u32,
    #[serde(
        default,
        deserialize_with = "crate::serde_dates::flexible_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_out_date: Option<DateTime<Utc>>,
}

fn default_stay_days() -> u32 {
    1
}

impl Booking {
    pub fn hotel_key(&self) -> HotelKey {
        HotelKey::new(self.hotel_id.clone(), self.hotel_source)
    }

    /// Calendar day of check-in (UTC), ignoring time of day.
    pub fn check_in_day(&self) -> NaiveDate {
        self.check_in_date.date_naive()
    }

    /// Server-supplied check-out, else check-in plus the stay length. A stay
    /// running past the calendar's range clamps to check-in.
    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out_date.unwrap_or_else(|| {
            self.check_in_date
                .checked_add_signed(Duration::days(i64::from(self.stay_days)))
                .unwrap_or(self.check_in_date)
        })
    }

    /// The tuple that must be unique per user.
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            hotel: self.hotel_key(),
            day: self.check_in_day(),
        }
    }
}

/// (hotelId, hotelSource, check-in calendar day).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingSlot {
    pub hotel: HotelKey,
    pub day: NaiveDate,
}

/// Request body for `POST /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub hotel_id: String,
    #[serde(default)]
    pub hotel_source: HotelSource,
    #[serde(deserialize_with = "crate::serde_dates::flexible_day")]
    pub check_in_date: NaiveDate,
    #[serde(default = "default_stay_days")]
    pub stay_days: u32,
}

impl NewBooking {
    /// `None` when the stay is empty, longer than [`MAX_STAY_DAYS`], or runs
    /// past the last representable date.
    pub fn check_out_day(&self) -> Option<NaiveDate> {
        if self.stay_days < 1 || self.stay_days > MAX_STAY_DAYS {
            return None;
        }
        self.check_in_date
            .checked_add_days(chrono::Days::new(u64::from(self.stay_days)))
    }

    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            hotel: HotelKey::new(self.hotel_id.clone(), self.hotel_source),
            day: self.check_in_date,
        }
    }
}

/// Why a booking was refused before reaching the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingRejection {
    #[error("no hotel selected")]
    HotelNotSelected,
    #[error("check-in date missing")]
    CheckInMissing,
    #[error("stay length {0} is below 1")]
    StayTooShort(i64),
    #[error("stay length {0} exceeds 365 nights")]
    StayTooLong(i64),
    #[error("duplicate of booking {existing_booking_id}")]
    Duplicate { existing_booking_id: String },
}

impl BookingRejection {
    pub fn message(&self) -> Message {
        match self {
            BookingRejection::HotelNotSelected => Message::HotelNotSelected,
            BookingRejection::CheckInMissing => Message::CheckInMissing,
            BookingRejection::StayTooShort(_) => Message::StayTooShort,
            BookingRejection::StayTooLong(_) => Message::StayTooLong,
            BookingRejection::Duplicate { .. } => Message::DuplicateBooking,
        }
    }
}

/// Form state of the booking panel. `stay_days` is signed because the input
/// field can hold zero or negatives until validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub hotel: Option<HotelKey>,
    pub check_in: Option<NaiveDate>,
    pub stay_days: i64,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            hotel: None,
            check_in: None,
            stay_days: 1,
        }
    }
}

impl BookingDraft {
    pub fn for_hotel(hotel: HotelKey) -> Self {
        Self {
            hotel: Some(hotel),
            ..Self::default()
        }
    }

    /// Accepts a full timestamp; only its calendar day is kept.
    pub fn set_check_in_at(&mut self, at: DateTime<Utc>) {
        self.check_in = Some(at.date_naive());
    }

    /// Field checks in order: hotel, check-in date, stay length (1..=365 nights).
    /// First failure wins.
    pub fn validate(&self) -> Result<NewBooking, BookingRejection> {
        let hotel = self.hotel.as_ref().ok_or(BookingRejection::HotelNotSelected)?;
        let check_in = self.check_in.ok_or(BookingRejection::CheckInMissing)?;
        if self.stay_days < 1 {
            return Err(BookingRejection::StayTooShort(self.stay_days));
        }
        let stay_days = u32::try_from(self.stay_days)
            .ok()
            .filter(|n| *n <= MAX_STAY_DAYS)
            .ok_or(BookingRejection::StayTooLong(self.stay_days))?;

        let candidate = NewBooking {
            hotel_id: hotel.id.clone(),
            hotel_source: hotel.source,
            check_in_date: check_in,
            stay_days,
        };
        // Check-in near the end of the calendar can still overflow
        if candidate.check_out_day().is_none() {
            return Err(BookingRejection::StayTooLong(self.stay_days));
        }
        Ok(candidate)
    }
}

/// Client-side pre-check run before `POST /bookings`. Advisory only: two tabs
/// or bookings the client has not fetched can still collide, so the backend
/// enforces the same rule.
pub struct BookingGuard;

impl BookingGuard {
    pub fn check(draft: &BookingDraft, existing: &[Booking]) -> Result<NewBooking, BookingRejection> {
        let candidate = draft.validate()?;
        if let Some(dup) = find_duplicate(&candidate, existing) {
            tracing::warn!(
                "Duplicate booking rejected locally: {} on {} (existing {})",
                candidate.slot().hotel,
                candidate.check_in_date,
                dup.id
            );
            return Err(BookingRejection::Duplicate {
                existing_booking_id: dup.id.clone(),
            });
        }
        Ok(candidate)
    }
}

pub fn find_duplicate<'a>(candidate: &NewBooking, existing: &'a [Booking]) -> Option<&'a Booking> {
    let slot = candidate.slot();
    existing.iter().find(|b| b.slot() == slot)
}
