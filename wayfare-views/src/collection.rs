use crate::error::{ViewError, ViewResult};
use std::sync::Arc;
use tracing::{debug, warn};
use wayfare_core::api::{ApiError, HotelApi};
use wayfare_core::hotel::HotelRef;
use wayfare_core::{HotelKey, HotelListing, HotelSource, Message};
use wayfare_store::SessionStore;

/// "My Collection": the signed-in user's favorites resolved into list rows.
pub struct FavoritesView {
    api: Arc<dyn HotelApi>,
    store: Arc<SessionStore>,
    rows: Vec<HotelListing>,
    /// Favorites whose hotel no longer exists.
    missing: Vec<HotelKey>,
    loading: bool,
}

impl FavoritesView {
    pub fn new(api: Arc<dyn HotelApi>, store: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            rows: Vec::new(),
            missing: Vec::new(),
            loading: false,
        }
    }

    pub fn rows(&self) -> &[HotelListing] {
        &self.rows
    }

    pub fn missing(&self) -> &[HotelKey] {
        &self.missing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Text for the empty state, once loaded with nothing to show.
    pub fn empty_message(&self) -> Option<Message> {
        self.rows.is_empty().then_some(Message::NoFavorites)
    }

    /// Rows keep the order of the favorite set. Hotels deleted since they
    /// were saved are skipped; any other failure aborts the load.
    pub async fn load(&mut self) -> ViewResult<()> {
        if self.store.profile().is_none() {
            self.rows.clear();
            self.missing.clear();
            return Err(ViewError::LoginRequired);
        }

        let favorites = self.store.favorites();
        self.loading = true;
        let mut rows = Vec::with_capacity(favorites.len());
        let mut missing = Vec::new();
        let mut failure = None;
        for key in favorites.iter() {
            match self.resolve(key).await {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => missing.push(key.clone()),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        self.loading = false;

        if let Some(e) = failure {
            return Err(ViewError::api(e, Message::HotelLoadFailed));
        }
        debug!("Collection resolved: {} rows, {} gone", rows.len(), missing.len());
        self.rows = rows;
        self.missing = missing;
        Ok(())
    }

    async fn resolve(&self, key: &HotelKey) -> Result<Option<HotelListing>, ApiError> {
        match key.source {
            HotelSource::Local => match self.api.local_hotel(&key.id).await {
                Ok(hotel) => Ok(Some(HotelListing::from(&hotel))),
                Err(e) if e.status == Some(404) => {
                    warn!("Favorite {} points at a deleted hotel", key);
                    Ok(None)
                }
                Err(e) => Err(e),
            },
            HotelSource::External => {
                let (detail, price) = tokio::join!(
                    self.api.external_detail(&key.id),
                    self.api.external_min_price(&key.id)
                );
                let Some(detail) = detail? else {
                    warn!("Favorite {} is unknown to the provider", key);
                    return Ok(None);
                };
                let location = detail
                    .zone
                    .as_ref()
                    .map(|z| z.name.clone())
                    .or_else(|| detail.address.as_ref().map(|a| a.content.clone()))
                    .unwrap_or_default();
                Ok(Some(HotelListing {
                    hotel: HotelRef {
                        id: key.id.clone(),
                        name: detail.name.content.clone(),
                        source: HotelSource::External,
                    },
                    location,
                    price: price?,
                    thumbnail: detail.image_paths().first().map(|p| p.to_string()),
                }))
            }
        }
    }
}
