use crate::error::{ViewError, ViewResult};
use crate::navigation::{Navigator, Route};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use wayfare_core::api::BookingApi;
use wayfare_core::{Booking, BookingDraft, BookingGuard, HotelKey, Message};
use wayfare_store::{SessionStore, TokenSlot};

/// Booking panel of a hotel detail page.
pub struct BookingForm {
    api: Arc<dyn BookingApi>,
    store: Arc<SessionStore>,
    token: Arc<TokenSlot>,
    navigator: Arc<dyn Navigator>,
    redirect_after: Duration,
    pub draft: BookingDraft,
    loading: bool,
    redirect: Option<JoinHandle<()>>,
}

impl BookingForm {
    pub fn new(
        api: Arc<dyn BookingApi>,
        store: Arc<SessionStore>,
        token: Arc<TokenSlot>,
        navigator: Arc<dyn Navigator>,
        redirect_after: Duration,
    ) -> Self {
        Self {
            api,
            store,
            token,
            navigator,
            redirect_after,
            draft: BookingDraft::default(),
            loading: false,
            redirect: None,
        }
    }

    pub fn for_hotel(mut self, hotel: HotelKey) -> Self {
        self.draft = BookingDraft::for_hotel(hotel);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate, reject duplicates of cached bookings, then create. On success
    /// the booking joins the cache and a delayed redirect home is scheduled.
    pub async fn submit(&mut self) -> ViewResult<Booking> {
        let candidate = BookingGuard::check(&self.draft, &self.store.bookings())?;
        if !self.token.is_present() {
            return Err(ViewError::LoginRequired);
        }

        self.loading = true;
        let result = self.api.create_booking(&candidate).await;
        self.loading = false;

        let booking = result.map_err(|e| {
            warn!("Booking for {} failed: {}", candidate.slot().hotel, e);
            ViewError::api(e, Message::BookingFailed)
        })?;

        info!("Booking {} created for {} on {}", booking.id, booking.hotel_key(), booking.check_in_day());
        self.store.push_booking(booking.clone());
        self.schedule_redirect();
        Ok(booking)
    }

    fn schedule_redirect(&mut self) {
        let navigator = self.navigator.clone();
        let delay = self.redirect_after;
        if let Some(previous) = self.redirect.take() {
            previous.abort();
        }
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(Route::Home);
        }));
    }

    /// Handle of the pending redirect, if a booking was just made.
    pub fn take_redirect(&mut self) -> Option<JoinHandle<()>> {
        self.redirect.take()
    }

    /// Replace the cache with the server's list of the user's bookings.
    pub async fn sync(&self) -> ViewResult<Vec<Booking>> {
        let bookings = self
            .api
            .my_bookings()
            .await
            .map_err(|e| ViewError::api(e, Message::Generic))?;
        self.store.set_bookings(bookings.clone());
        Ok(bookings)
    }

    pub async fn cancel(&self, booking_id: &str) -> ViewResult<()> {
        self.api
            .cancel_booking(booking_id)
            .await
            .map_err(|e| ViewError::api(e, Message::BookingCancelFailed))?;
        info!("Booking {} cancelled", booking_id);
        self.store.remove_booking(booking_id);
        // The cancellation went through; a stale list is only logged
        if let Err(e) = self.sync().await {
            warn!("Booking {} cancelled but resync failed: {}", booking_id, e);
        }
        Ok(())
    }
}
