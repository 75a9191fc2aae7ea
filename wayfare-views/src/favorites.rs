use crate::error::{ViewError, ViewResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use wayfare_core::api::FavoriteApi;
use wayfare_core::{HotelKey, Message, Optimistic};
use wayfare_store::{SessionStore, TokenSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server answered; `favorited` is membership in its list.
    Confirmed { favorited: bool },
    /// A toggle for the same hotel was still in flight.
    Ignored,
}

/// Heart button logic shared by every hotel card.
///
/// A toggle flips the card's state in the store at once, then reconciles with
/// the server's list or puts the old state back on failure.
pub struct FavoriteToggle {
    api: Arc<dyn FavoriteApi>,
    store: Arc<SessionStore>,
    token: Arc<TokenSlot>,
    in_flight: Mutex<HashSet<HotelKey>>,
}

/// Clears the hotel's in-flight mark however the toggle ends.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<HotelKey>>,
    hotel: HotelKey,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a Mutex<HashSet<HotelKey>>, hotel: &HotelKey) -> Option<Self> {
        let mut guard = set.lock().unwrap_or_else(|e| e.into_inner());
        if !guard.insert(hotel.clone()) {
            return None;
        }
        Some(Self { set, hotel: hotel.clone() })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.hotel);
    }
}

impl FavoriteToggle {
    pub fn new(api: Arc<dyn FavoriteApi>, store: Arc<SessionStore>, token: Arc<TokenSlot>) -> Self {
        Self {
            api,
            store,
            token,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_favorite(&self, hotel: &HotelKey) -> bool {
        self.store.is_favorite(hotel)
    }

    pub fn is_pending(&self, hotel: &HotelKey) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(hotel)
    }

    pub async fn toggle(&self, hotel: &HotelKey) -> ViewResult<ToggleOutcome> {
        if !self.token.is_present() {
            return Err(ViewError::LoginRequired);
        }
        let Some(_in_flight) = InFlight::acquire(&self.in_flight, hotel) else {
            debug!("Ignoring toggle of {} while a request is pending", hotel);
            return Ok(ToggleOutcome::Ignored);
        };

        let was_favorited = self.store.is_favorite(hotel);
        let op = Optimistic::begin(was_favorited, !was_favorited);
        self.store
            .update_favorites(self.store.favorites().with(hotel, *op.tentative()), true);

        let result = if was_favorited {
            self.api.remove_favorite(hotel).await
        } else {
            self.api.add_favorite(hotel).await
        };

        match result {
            Ok(server) => {
                let favorited = op.commit(server.contains(hotel));
                self.store.update_favorites(server, false);
                info!("Favorite {} is now {}", hotel, favorited);
                Ok(ToggleOutcome::Confirmed { favorited })
            }
            Err(e) => {
                // Only this card goes back; other hotels may have moved meanwhile
                let restored = op.rollback();
                self.store
                    .update_favorites(self.store.favorites().with(hotel, restored), false);
                warn!("Favorite toggle of {} failed, reverted: {}", hotel, e);
                Err(ViewError::api(e, Message::FavoriteFailed))
            }
        }
    }
}
