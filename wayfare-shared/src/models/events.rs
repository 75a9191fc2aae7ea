use serde::{Deserialize, Serialize};

/// Emitted by the session store after every write, so dependents can react
/// without polling the snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    ProfileReplaced(ProfileReplacedEvent),
    FavoritesUpdated(FavoritesUpdatedEvent),
    BookingsSynced(BookingsSyncedEvent),
    BookingAdded(BookingChangedEvent),
    BookingRemoved(BookingChangedEvent),
    Cleared { timestamp: i64 },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfileReplacedEvent {
    pub user_id: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FavoritesUpdatedEvent {
    pub favorite_count: usize,
    /// `true` while the change is an unconfirmed optimistic write.
    pub tentative: bool,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingsSyncedEvent {
    pub booking_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingChangedEvent {
    pub booking_id: String,
    pub timestamp: i64,
}

impl SessionEvent {
    pub fn now() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            SessionEvent::ProfileReplaced(e) => e.timestamp,
            SessionEvent::FavoritesUpdated(e) => e.timestamp,
            SessionEvent::BookingsSynced(e) => e.timestamp,
            SessionEvent::BookingAdded(e) | SessionEvent::BookingRemoved(e) => e.timestamp,
            SessionEvent::Cleared { timestamp } => *timestamp,
        }
    }
}
