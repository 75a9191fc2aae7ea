use crate::hotel::HotelKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The user's favorited hotels, as last reported by the server (or an
/// unconfirmed optimistic copy of it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    hotels: BTreeSet<HotelKey>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &HotelKey) -> bool {
        self.hotels.contains(key)
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HotelKey> {
        self.hotels.iter()
    }

    pub fn insert(&mut self, key: HotelKey) -> bool {
        self.hotels.insert(key)
    }

    pub fn remove(&mut self, key: &HotelKey) -> bool {
        self.hotels.remove(key)
    }

    /// Copy with `key` set to `favorited`.
    pub fn with(&self, key: &HotelKey, favorited: bool) -> Self {
        let mut next = self.clone();
        if favorited {
            next.insert(key.clone());
        } else {
            next.remove(key);
        }
        next
    }
}

impl FromIterator<HotelKey> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = HotelKey>>(iter: I) -> Self {
        Self {
            hotels: iter.into_iter().collect(),
        }
    }
}

/// Body of the favorite add/remove responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesResponse {
    #[serde(default)]
    pub favorites: FavoriteSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_does_not_touch_original() {
        let set: FavoriteSet = [HotelKey::local("a")].into_iter().collect();
        let next = set.with(&HotelKey::external("a"), true);
        assert_eq!(set.len(), 1);
        assert_eq!(next.len(), 2);
        assert!(!next.with(&HotelKey::local("a"), false).contains(&HotelKey::local("a")));
    }

    #[test]
    fn test_response_wire_format() {
        let json = r#"{"favorites":[{"hotelId":"a","hotelSource":"local"},{"hotelId":"77","hotelSource":"external"}]}"#;
        let resp: FavoritesResponse = serde_json::from_str(json).unwrap();
        assert!(resp.favorites.contains(&HotelKey::external("77")));
        assert_eq!(resp.favorites.len(), 2);
    }
}
