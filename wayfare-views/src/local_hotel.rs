use crate::error::{ViewError, ViewResult};
use std::sync::Arc;
use tracing::{info, warn};
use wayfare_core::api::{HotelApi, ReviewApi};
use wayfare_core::hotel::LocalHotel;
use wayfare_core::review::{Review, ReviewDraft};
use wayfare_core::{HotelKey, Message};
use wayfare_store::{SessionStore, TokenSlot};

/// Detail page of one of our own hotels, with its review section.
pub struct LocalHotelView {
    hotels: Arc<dyn HotelApi>,
    reviews_api: Arc<dyn ReviewApi>,
    store: Arc<SessionStore>,
    token: Arc<TokenSlot>,
    hotel_id: String,
    hotel: Option<LocalHotel>,
    reviews: Vec<Review>,
    pub draft: ReviewDraft,
    submitting: bool,
}

impl LocalHotelView {
    pub fn new(
        hotels: Arc<dyn HotelApi>,
        reviews_api: Arc<dyn ReviewApi>,
        store: Arc<SessionStore>,
        token: Arc<TokenSlot>,
        hotel_id: impl Into<String>,
    ) -> Self {
        Self {
            hotels,
            reviews_api,
            store,
            token,
            hotel_id: hotel_id.into(),
            hotel: None,
            reviews: Vec::new(),
            draft: ReviewDraft::default(),
            submitting: false,
        }
    }

    pub fn hotel(&self) -> Option<&LocalHotel> {
        self.hotel.as_ref()
    }

    pub fn hotel_key(&self) -> HotelKey {
        HotelKey::local(self.hotel_id.clone())
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn load(&mut self) -> ViewResult<()> {
        let hotel = self.hotels.local_hotel(&self.hotel_id).await.map_err(|e| {
            if e.status == Some(404) {
                ViewError::api(e, Message::HotelNotFound)
            } else {
                ViewError::api(e, Message::HotelLoadFailed)
            }
        })?;
        self.hotel = Some(hotel);
        self.load_reviews().await
    }

    pub async fn load_reviews(&mut self) -> ViewResult<()> {
        self.reviews = self
            .reviews_api
            .reviews_for_local_hotel(&self.hotel_id)
            .await
            .map_err(|e| ViewError::api(e, Message::ReviewsLoadFailed))?;
        Ok(())
    }

    /// Only the author sees a delete button.
    pub fn can_delete(&self, review: &Review) -> bool {
        self.store
            .user_id()
            .is_some_and(|me| review.is_authored_by(&me))
    }

    /// Comment and rating are checked before the login requirement.
    pub async fn submit_review(&mut self) -> ViewResult<()> {
        let review = self.draft.validate(&self.hotel_id)?;
        if !self.token.is_present() {
            return Err(ViewError::LoginRequired);
        }

        self.submitting = true;
        let result = self.reviews_api.create_review(&review).await;
        self.submitting = false;

        result.map_err(|e| ViewError::api(e, Message::ReviewFailed))?;
        info!("Review posted for hotel {}", self.hotel_id);
        self.draft.reset();
        self.load_reviews().await
    }

    pub async fn delete_review(&mut self, review_id: &str) -> ViewResult<()> {
        if !self.token.is_present() {
            return Err(ViewError::LoginRequired);
        }
        self.reviews_api.delete_review(review_id).await.map_err(|e| {
            warn!("Deleting review {} failed: {}", review_id, e);
            ViewError::api(e, Message::ReviewDeleteFailed)
        })?;
        self.load_reviews().await
    }
}
