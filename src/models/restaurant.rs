use serde::{Deserialize, Serialize};

/// Coordinate pair for map marker placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One restaurant directory entry.
///
/// Records are immutable snapshots: the cache core stores and retrieves
/// whole records, never partial updates. Ids are unique and stable
/// within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine_type: String,
    pub neighborhood: String,
    pub latlng: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form display fields (operating hours, reviews, ...) carried
    /// through unmodified.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Restaurant {
    /// Detail page URL for this restaurant.
    pub fn page_url(&self) -> String {
        format!("./restaurant.html?id={}", self.id)
    }

    /// Image URL, with a placeholder when no photograph is on record.
    pub fn image_url(&self) -> String {
        match &self.photograph {
            Some(photo) => format!("/dist/img/{}.webp", photo),
            None => "/dist/img/no_image.webp".to_string(),
        }
    }
}
