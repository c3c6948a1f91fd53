use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

// --- Geocoding ---

/// Free-text location fields attached to an incident. Any of them may be
/// missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeRequest {
    #[serde(default)]
    pub incident_address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city_state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

impl GeocodeRequest {
    /// Fields in canonical order: address, neighborhood, city/state, county.
    pub fn fields(&self) -> [Option<&str>; 4] {
        [
            self.incident_address.as_deref(),
            self.neighborhood.as_deref(),
            self.city_state.as_deref(),
            self.county.as_deref(),
        ]
    }
}

/// A resolved coordinate pair. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResult {
    /// Returns `None` unless both components are finite.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// True when lat is within [-90, 90] and lng within [-180, 180].
    pub fn within_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

// --- Wanted persons ---

/// Normalized record describing a wanted person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedPerson {
    pub full_name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub crimes: Vec<String>,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(default)]
    pub police_station: Option<String>,
    #[serde(default)]
    pub source_url: Option<Url>,
}

impl WantedPerson {
    /// Identity used for deduplication: lowercased name and alias.
    pub fn identity(&self) -> (String, Option<String>) {
        (
            self.full_name.to_lowercase(),
            self.alias.as_ref().map(|a| a.to_lowercase()),
        )
    }
}

/// A captured dataset of wanted persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedPersonsPayload {
    pub scraped_at: DateTime<Utc>,
    pub source_url: Url,
    #[serde(default)]
    pub items: Vec<WantedPerson>,
}
