use crate::error::{ViewError, ViewResult};
use std::sync::Arc;
use wayfare_core::api::FlightApi;
use wayfare_core::flight::Flight;
use wayfare_core::Message;

pub struct FlightsView {
    api: Arc<dyn FlightApi>,
    limit: u32,
    flights: Vec<Flight>,
    loading: bool,
}

impl FlightsView {
    pub fn new(api: Arc<dyn FlightApi>, limit: u32) -> Self {
        Self {
            api,
            limit,
            flights: Vec::new(),
            loading: false,
        }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load(&mut self) -> ViewResult<()> {
        self.loading = true;
        let result = self.api.list_flights(self.limit).await;
        self.loading = false;
        self.flights = result.map_err(|e| ViewError::api(e, Message::FlightsLoadFailed))?;
        Ok(())
    }
}
