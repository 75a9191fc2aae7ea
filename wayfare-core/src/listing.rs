use crate::hotel::{ExternalHotel, HotelKey, HotelRef, LocalHotel};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the combined hotel list, whichever inventory it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelListing {
    pub hotel: HotelRef,
    pub location: String,
    /// `None` when the provider has no price for the stay.
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
}

impl HotelListing {
    pub fn key(&self) -> HotelKey {
        self.hotel.key()
    }

    fn matches(&self, needle: &str) -> bool {
        self.hotel.name.to_lowercase().contains(needle) || self.location.to_lowercase().contains(needle)
    }
}

impl From<&LocalHotel> for HotelListing {
    fn from(hotel: &LocalHotel) -> Self {
        Self {
            hotel: hotel.hotel_ref(),
            location: hotel.location.clone(),
            price: Some(hotel.price),
            thumbnail: hotel.image_filename.clone(),
        }
    }
}

impl From<&ExternalHotel> for HotelListing {
    fn from(hotel: &ExternalHotel) -> Self {
        Self {
            hotel: hotel.hotel_ref(),
            location: hotel.zone_name.clone(),
            price: hotel.min_price,
            thumbnail: hotel.thumbnail.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
    Ascending,
    Descending,
}

/// Local entries first, external appended. No de-duplication across sources.
pub fn merge(local: &[LocalHotel], external: &[ExternalHotel]) -> Vec<HotelListing> {
    local
        .iter()
        .map(HotelListing::from)
        .chain(external.iter().map(HotelListing::from))
        .collect()
}

/// Case-insensitive substring match on name or location. A blank needle keeps everything.
pub fn filter_listings(listings: &[HotelListing], needle: &str) -> Vec<HotelListing> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return listings.to_vec();
    }
    listings.iter().filter(|l| l.matches(&needle)).cloned().collect()
}

/// Stable price sort. Unpriced rows go last in both directions.
pub fn sort_by_price(listings: &mut [HotelListing], order: PriceSort) {
    listings.sort_by(|a, b| compare_price(a.price, b.price, order));
}

fn compare_price(a: Option<f64>, b: Option<f64>, order: PriceSort) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            PriceSort::Ascending => a.total_cmp(&b),
            PriceSort::Descending => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merged list plus the user's current filter text and sort mode.
#[derive(Debug, Clone, Default)]
pub struct HotelListView {
    merged: Vec<HotelListing>,
    filter: String,
    sort: Option<PriceSort>,
}

impl HotelListView {
    pub fn new(local: &[LocalHotel], external: &[ExternalHotel]) -> Self {
        Self {
            merged: merge(local, external),
            filter: String::new(),
            sort: None,
        }
    }

    /// Replace the underlying results, keeping the current filter and sort.
    pub fn replace_results(&mut self, local: &[LocalHotel], external: &[ExternalHotel]) {
        self.merged = merge(local, external);
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn set_sort(&mut self, sort: Option<PriceSort>) {
        self.sort = sort;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<PriceSort> {
        self.sort
    }

    pub fn reset(&mut self) {
        self.filter.clear();
        self.sort = None;
    }

    pub fn merged(&self) -> &[HotelListing] {
        &self.merged
    }

    /// Rows to display: filter first, then sort.
    pub fn visible(&self) -> Vec<HotelListing> {
        let mut rows = filter_listings(&self.merged, &self.filter);
        if let Some(order) = self.sort {
            sort_by_price(&mut rows, order);
        }
        rows
    }
}
