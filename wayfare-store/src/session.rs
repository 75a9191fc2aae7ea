use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use wayfare_core::profile::Profile;
use wayfare_core::{Booking, FavoriteSet, HotelKey};
use wayfare_shared::models::events::{
    BookingChangedEvent, BookingsSyncedEvent, FavoritesUpdatedEvent, ProfileReplacedEvent,
};
use wayfare_shared::SessionEvent;

/// Everything the views share about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub profile: Option<Profile>,
    pub favorites: FavoriteSet,
    pub bookings: Vec<Booking>,
}

/// Observable holder of the session snapshot. All mutation goes through the
/// writer methods below; readers either take a snapshot or subscribe. Last
/// write wins.
pub struct SessionStore {
    state: watch::Sender<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::restore(None)
    }

    /// Start from a previously persisted profile.
    pub fn restore(profile: Option<Profile>) -> Self {
        let favorites = profile.as_ref().map(|p| p.favorites.clone()).unwrap_or_default();
        let (state, _) = watch::channel(SessionSnapshot {
            profile,
            favorites,
            bookings: Vec::new(),
        });
        let (events, _) = broadcast::channel(64);
        Self { state, events }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.borrow().profile.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.borrow().profile.as_ref().map(|p| p.id.clone())
    }

    pub fn favorites(&self) -> FavoriteSet {
        self.state.borrow().favorites.clone()
    }

    pub fn is_favorite(&self, hotel: &HotelKey) -> bool {
        self.state.borrow().favorites.contains(hotel)
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state.borrow().bookings.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Replace the profile. Its favorite list becomes the current favorite set.
    pub fn set_profile(&self, profile: Option<Profile>) {
        let user_id = profile.as_ref().map(|p| p.id.clone());
        self.state.send_modify(|s| {
            s.favorites = profile.as_ref().map(|p| p.favorites.clone()).unwrap_or_default();
            s.profile = profile;
        });
        info!("Profile replaced (user: {:?})", user_id);
        self.emit(SessionEvent::ProfileReplaced(ProfileReplacedEvent {
            user_id,
            timestamp: SessionEvent::now(),
        }));
    }

    /// Replace the favorite set, mirroring it into the profile. `tentative`
    /// marks optimistic writes that a server answer will later overwrite.
    pub fn update_favorites(&self, favorites: FavoriteSet, tentative: bool) {
        let favorite_count = favorites.len();
        self.state.send_modify(|s| {
            if let Some(profile) = s.profile.as_mut() {
                profile.favorites = favorites.clone();
            }
            s.favorites = favorites;
        });
        debug!("Favorites updated: {} entries (tentative: {})", favorite_count, tentative);
        self.emit(SessionEvent::FavoritesUpdated(FavoritesUpdatedEvent {
            favorite_count,
            tentative,
            timestamp: SessionEvent::now(),
        }));
    }

    /// Replace the "my bookings" cache with the server's list.
    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        let booking_count = bookings.len();
        self.state.send_modify(|s| s.bookings = bookings);
        self.emit(SessionEvent::BookingsSynced(BookingsSyncedEvent {
            booking_count,
            timestamp: SessionEvent::now(),
        }));
    }

    pub fn push_booking(&self, booking: Booking) {
        let booking_id = booking.id.clone();
        self.state.send_modify(|s| s.bookings.push(booking));
        self.emit(SessionEvent::BookingAdded(BookingChangedEvent {
            booking_id,
            timestamp: SessionEvent::now(),
        }));
    }

    pub fn remove_booking(&self, booking_id: &str) -> bool {
        let removed = self.state.send_if_modified(|s| {
            let before = s.bookings.len();
            s.bookings.retain(|b| b.id != booking_id);
            s.bookings.len() != before
        });
        if removed {
            self.emit(SessionEvent::BookingRemoved(BookingChangedEvent {
                booking_id: booking_id.to_string(),
                timestamp: SessionEvent::now(),
            }));
        }
        removed
    }

    /// Logout: drop profile, favorites and bookings.
    pub fn clear(&self) {
        self.state.send_replace(SessionSnapshot::default());
        info!("Session cleared");
        self.emit(SessionEvent::Cleared { timestamp: SessionEvent::now() });
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
