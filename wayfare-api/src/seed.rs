use wayfare_core::flight::Flight;
use wayfare_core::hotel::{ExternalHotel, ExternalHotelDetail, ImagePath, NamedItem, TextContent};

/// One provider hotel: the search summary plus its detail page.
pub struct CatalogHotel {
    pub city: String,
    pub summary: ExternalHotel,
    pub detail: ExternalHotelDetail,
}

/// Stand-in for the hotel provider and the flight feed.
pub struct Catalog {
    pub hotels: Vec<CatalogHotel>,
    pub flights: Vec<Flight>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self { hotels: Vec::new(), flights: Vec::new() }
    }

    pub fn seeded() -> Self {
        let hotels = vec![
            hotel("Hong Kong", 101_201, "Harbourfront Suites", "4 STARS", "Tsim Sha Tsui", Some(980.0)),
            hotel("Hong Kong", 101_202, "Mong Kok Budget Inn", "2 STARS", "Mong Kok", Some(420.0)),
            hotel("Hong Kong", 101_203, "Lantau Airport Lodge", "3 STARS", "Lantau", None),
            hotel("Tokyo", 202_301, "Shinjuku Granbell", "4 STARS", "Shinjuku", Some(1380.0)),
            hotel("Tokyo", 202_302, "Asakusa Ryokan", "3 STARS", "Asakusa", Some(760.0)),
        ];
        let flights = vec![
            flight("CX500", "Cathay Pacific", "HKG", "Hong Kong International", "NRT", "Narita", "08:15", "13:30"),
            flight("CX520", "Cathay Pacific", "HKG", "Hong Kong International", "HND", "Haneda", "10:05", "15:10"),
            flight("JL26", "Japan Airlines", "HND", "Haneda", "HKG", "Hong Kong International", "09:00", "12:55"),
            flight("NH811", "All Nippon Airways", "NRT", "Narita", "HKG", "Hong Kong International", "17:10", "21:05"),
            flight("UO846", "HK Express", "HKG", "Hong Kong International", "KIX", "Kansai", "07:20", "12:00"),
            flight("SQ891", "Singapore Airlines", "SIN", "Changi", "HKG", "Hong Kong International", "13:40", "17:35"),
        ];
        Self { hotels, flights }
    }

    /// Case-insensitive match on the city name.
    pub fn search(&self, city: &str) -> Vec<ExternalHotel> {
        let city = city.trim().to_lowercase();
        self.hotels
            .iter()
            .filter(|h| h.city.to_lowercase() == city)
            .map(|h| h.summary.clone())
            .collect()
    }

    pub fn get(&self, code: u64) -> Option<&CatalogHotel> {
        self.hotels.iter().find(|h| h.summary.code == code)
    }

    pub fn flights(&self, limit: usize) -> Vec<Flight> {
        self.flights.iter().take(limit).cloned().collect()
    }
}

fn hotel(city: &str, code: u64, name: &str, category: &str, zone: &str, min_price: Option<f64>) -> CatalogHotel {
    let image = format!("{}/{}_a_001.jpg", code / 1000, code);
    CatalogHotel {
        city: city.to_string(),
        summary: ExternalHotel {
            code,
            name: name.to_string(),
            category_name: category.to_string(),
            zone_name: zone.to_string(),
            min_price,
            thumbnail: Some(image.clone()),
        },
        detail: ExternalHotelDetail {
            name: TextContent { content: name.to_string() },
            description: Some(TextContent { content: format!("{} in the heart of {}.", name, zone) }),
            address: Some(TextContent { content: format!("1 {} Road, {}", zone, city) }),
            images: vec![ImagePath { path: Some(image) }],
            category: Some(NamedItem { name: category.to_string() }),
            zone: Some(NamedItem { name: zone.to_string() }),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn flight(
    number: &str,
    airline: &str,
    dep_iata: &str,
    dep_airport: &str,
    arr_iata: &str,
    arr_airport: &str,
    dep_time: &str,
    arr_time: &str,
) -> Flight {
    let date = "2025-07-01";
    Flight {
        flight_date: date.to_string(),
        flight_status: "scheduled".to_string(),
        flight_number: number.to_string(),
        airline_name: airline.to_string(),
        departure_airport: dep_airport.to_string(),
        departure_iata: dep_iata.to_string(),
        departure_scheduled: format!("{}T{}:00+00:00", date, dep_time),
        arrival_airport: arr_airport.to_string(),
        arrival_iata: arr_iata.to_string(),
        arrival_scheduled: format!("{}T{}:00+00:00", date, arr_time),
    }
}
