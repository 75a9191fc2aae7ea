use crate::error::{ViewError, ViewResult};
use std::sync::Arc;
use tracing::warn;
use wayfare_core::api::HotelApi;
use wayfare_core::hotel::ExternalHotelDetail;
use wayfare_core::{HotelKey, Message};

/// Detail page of a provider hotel.
pub struct ExternalHotelView {
    api: Arc<dyn HotelApi>,
    code: String,
    detail: Option<ExternalHotelDetail>,
    min_price: Option<f64>,
    loading: bool,
}

impl ExternalHotelView {
    pub fn new(api: Arc<dyn HotelApi>, code: impl Into<String>) -> Self {
        Self {
            api,
            code: code.into(),
            detail: None,
            min_price: None,
            loading: false,
        }
    }

    pub fn hotel_key(&self) -> HotelKey {
        HotelKey::external(self.code.clone())
    }

    pub fn detail(&self) -> Option<&ExternalHotelDetail> {
        self.detail.as_ref()
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Detail and price are fetched together; if either fails neither is shown.
    pub async fn load(&mut self) -> ViewResult<()> {
        self.loading = true;
        let (detail, price) = tokio::join!(
            self.api.external_detail(&self.code),
            self.api.external_min_price(&self.code)
        );
        self.loading = false;

        match (detail, price) {
            (Ok(Some(detail)), Ok(price)) => {
                self.detail = Some(detail);
                self.min_price = price;
                Ok(())
            }
            (Ok(None), Ok(_)) => {
                self.detail = None;
                self.min_price = None;
                Err(ViewError::Invalid(Message::HotelNotFound))
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Loading provider hotel {} failed: {}", self.code, e);
                self.detail = None;
                self.min_price = None;
                Err(ViewError::api(e, Message::HotelLoadFailed))
            }
        }
    }
}
