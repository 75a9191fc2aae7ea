use crate::error::{ViewError, ViewResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};
use wayfare_core::api::HotelApi;
use wayfare_core::hotel::{ExternalHotel, LocalHotel};
use wayfare_core::search::SearchDraft;
use wayfare_core::{HotelListView, HotelListing, Message, PriceSort};

/// Hotel list page: our own inventory followed by the provider's search results.
pub struct HotelBrowser {
    api: Arc<dyn HotelApi>,
    local: Vec<LocalHotel>,
    external: Vec<ExternalHotel>,
    list: HotelListView,
    pub search: SearchDraft,
    loading: bool,
}

impl HotelBrowser {
    pub fn new(api: Arc<dyn HotelApi>) -> Self {
        Self {
            api,
            local: Vec::new(),
            external: Vec::new(),
            list: HotelListView::default(),
            search: SearchDraft::default(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load_local(&mut self) -> ViewResult<usize> {
        self.loading = true;
        let result = self.api.list_local_hotels().await;
        self.loading = false;

        self.local = result.map_err(|e| ViewError::api(e, Message::HotelLoadFailed))?;
        debug!("Loaded {} local hotels", self.local.len());
        self.list.replace_results(&self.local, &self.external);
        Ok(self.local.len())
    }

    pub fn set_check_in(&mut self, day: NaiveDate) {
        self.search.set_check_in(day);
    }

    /// Provider search; replaces the external part of the list.
    pub async fn search_external(&mut self) -> ViewResult<usize> {
        let request = self.search.validate()?;

        self.loading = true;
        let result = self.api.search_external(&request).await;
        self.loading = false;

        self.external = result.map_err(|e| ViewError::api(e, Message::HotelLoadFailed))?;
        info!("Provider search in {} returned {} hotels", request.city, self.external.len());
        self.list.replace_results(&self.local, &self.external);
        Ok(self.external.len())
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.list.set_filter(filter);
    }

    pub fn set_sort(&mut self, sort: Option<PriceSort>) {
        self.list.set_sort(sort);
    }

    /// Back to the unsorted, unfiltered merged list.
    pub fn reset(&mut self) {
        self.list.reset();
    }

    pub fn visible(&self) -> Vec<HotelListing> {
        self.list.visible()
    }

    pub fn list(&self) -> &HotelListView {
        &self.list
    }
}
