use serde::{Deserialize, Serialize};
use std::fmt;

/// Which inventory a hotel id belongs to. The two id spaces never overlap in meaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HotelSource {
    #[default]
    Local,
    External,
}

impl HotelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelSource::Local => "local",
            HotelSource::External => "external",
        }
    }
}

impl fmt::Display for HotelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HotelSource {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(HotelSource::Local),
            "external" => Ok(HotelSource::External),
            other => Err(crate::CoreError::ValidationError(format!("unknown hotel source: {}", other))),
        }
    }
}

/// Identity of a hotel: (id, source).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HotelKey {
    #[serde(rename = "hotelId")]
    pub id: String,
    #[serde(rename = "hotelSource", default)]
    pub source: HotelSource,
}

impl HotelKey {
    pub fn new(id: impl Into<String>, source: HotelSource) -> Self {
        Self { id: id.into(), source }
    }

    pub fn local(id: impl Into<String>) -> Self {
        Self::new(id, HotelSource::Local)
    }

    pub fn external(id: impl Into<String>) -> Self {
        Self::new(id, HotelSource::External)
    }
}

impl fmt::Display for HotelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelRef {
    pub id: String,
    pub name: String,
    pub source: HotelSource,
}

impl HotelRef {
    pub fn key(&self) -> HotelKey {
        HotelKey::new(self.id.clone(), self.source)
    }
}

/// Inventory owned by our own backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalHotel {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl LocalHotel {
    pub fn hotel_ref(&self) -> HotelRef {
        HotelRef {
            id: self.id.clone(),
            name: self.name.clone(),
            source: HotelSource::Local,
        }
    }
}

/// Inventory from the third-party provider, keyed by the provider's hotel code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalHotel {
    pub code: u64,
    pub name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub zone_name: String,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ExternalHotel {
    pub fn hotel_ref(&self) -> HotelRef {
        HotelRef {
            id: self.code.to_string(),
            name: self.name.clone(),
            source: HotelSource::External,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExternalSearchResponse {
    #[serde(default)]
    pub hotels: Vec<ExternalHotel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedItem {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagePath {
    #[serde(default)]
    pub path: Option<String>,
}

/// Provider detail payload; the provider nests most text fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalHotelDetail {
    pub name: TextContent,
    #[serde(default)]
    pub description: Option<TextContent>,
    #[serde(default)]
    pub address: Option<TextContent>,
    #[serde(default)]
    pub images: Vec<ImagePath>,
    #[serde(default)]
    pub category: Option<NamedItem>,
    #[serde(default)]
    pub zone: Option<NamedItem>,
}

impl ExternalHotelDetail {
    /// Image paths with empty entries dropped.
    pub fn image_paths(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter_map(|img| img.path.as_deref())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExternalDetailResponse {
    #[serde(default)]
    pub hotel: Option<ExternalHotelDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(default)]
    pub min_price: Option<f64>,
}

/// Fields an operator submits when creating or editing a local hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalHotelForm {
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: Option<crate::api::FileUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_different_source_is_distinct() {
        let local = HotelKey::local("H1");
        let external = HotelKey::external("H1");
        assert_ne!(local, external);
        assert_eq!(local.to_string(), "local:H1");
    }

    #[test]
    fn test_local_hotel_accepts_mongo_id() {
        let json = r#"{"_id":"abc","name":"Harbour View","location":"Kowloon","price":880}"#;
        let hotel: LocalHotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.id, "abc");
        assert_eq!(hotel.hotel_ref().key(), HotelKey::local("abc"));
        assert!(hotel.images.is_empty());
    }

    #[test]
    fn test_external_hotel_maps_image_url() {
        let json = r#"{"code":1234,"name":"Peak Inn","categoryName":"3 STARS","zoneName":"Central","minPrice":null,"imageUrl":"http://img/1.jpg"}"#;
        let hotel: ExternalHotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.thumbnail.as_deref(), Some("http://img/1.jpg"));
        assert_eq!(hotel.min_price, None);
        assert_eq!(hotel.hotel_ref().id, "1234");
    }

    #[test]
    fn test_detail_image_paths_skip_empty() {
        let json = r#"{"name":{"content":"Peak Inn"},"images":[{"path":"a.jpg"},{"path":""},{}]}"#;
        let detail: ExternalHotelDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.image_paths(), vec!["a.jpg"]);
    }
}
