use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub flight_date: String,
    pub flight_status: String,
    pub flight_number: String,
    pub airline_name: String,
    pub departure_airport: String,
    pub departure_iata: String,
    pub departure_scheduled: String,
    pub arrival_airport: String,
    pub arrival_iata: String,
    pub arrival_scheduled: String,
}

impl Flight {
    /// Row key; flight numbers repeat across days.
    pub fn row_key(&self) -> String {
        format!("{}-{}", self.flight_number, self.flight_date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightsResponse {
    #[serde(default)]
    pub flights: Vec<Flight>,
}
