use crate::adapters::geolocation::{FixedGeolocator, UnavailableGeolocator};
use crate::adapters::google_places::{GooglePlacesClient, DEFAULT_BASE_URL};
use crate::core::markers::DEFAULT_FOCUS_ZOOM;
use crate::core::render::{
    ContactChannel, DEFAULT_CONTACT_BASE_URL, DEFAULT_CONTACT_IDENTIFIER, DEFAULT_CONTACT_LABEL,
};
use crate::core::search::{
    SearchSettings, DEFAULT_CATEGORY, DEFAULT_NEARBY_RADIUS_M, DEFAULT_VIEWPORT_RADIUS_M,
};
use crate::domain::model::LatLng;
use crate::domain::ports::Geolocator;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub places: PlacesConfig,
    pub map: MapConfig,
    pub search: SearchConfig,
    pub contact: ContactConfig,
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: Some(10),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_lat: f64,
    pub default_lng: f64,
    pub default_zoom: u8,
    pub focus_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Cairo
        Self {
            default_lat: 30.0444,
            default_lng: 31.2357,
            default_zoom: 12,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub nearby_radius_m: u32,
    pub default_category: String,
    pub viewport_radius_m: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            default_category: DEFAULT_CATEGORY.to_string(),
            viewport_radius_m: DEFAULT_VIEWPORT_RADIUS_M,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub base_url: String,
    pub identifier: String,
    pub label: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONTACT_BASE_URL.to_string(),
            identifier: DEFAULT_CONTACT_IDENTIFIER.to_string(),
            label: DEFAULT_CONTACT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
        }
    }
}

impl FinderConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value. Unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Check that every value is in range.
    pub fn validate_config(&self) -> Result<()> {
        validate_url("places.base_url", &self.places.base_url)?;
        if let Some(timeout) = self.places.timeout_seconds {
            validate_positive_number("places.timeout_seconds", timeout, 1)?;
        }

        validate_range("map.default_lat", self.map.default_lat, -90.0, 90.0)?;
        validate_range("map.default_lng", self.map.default_lng, -180.0, 180.0)?;
        validate_range("map.default_zoom", self.map.default_zoom, 0, 22)?;
        validate_range("map.focus_zoom", self.map.focus_zoom, 0, 22)?;

        validate_range("search.nearby_radius_m", self.search.nearby_radius_m, 1, 50_000)?;
        validate_positive_number(
            "search.viewport_radius_m",
            u64::from(self.search.viewport_radius_m),
            1,
        )?;
        validate_non_empty_string("search.default_category", &self.search.default_category)?;

        validate_url("contact.base_url", &self.contact.base_url)?;
        validate_non_empty_string("contact.identifier", &self.contact.identifier)?;

        if let Some(lat) = self.geolocation.latitude {
            validate_range("geolocation.latitude", lat, -90.0, 90.0)?;
        }
        if let Some(lng) = self.geolocation.longitude {
            validate_range("geolocation.longitude", lng, -180.0, 180.0)?;
        }

        Ok(())
    }

    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.map.default_lat, self.map.default_lng)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            nearby_radius_m: self.search.nearby_radius_m,
            default_category: self.search.default_category.clone(),
            viewport_radius_m: self.search.viewport_radius_m,
        }
    }

    pub fn contact_channel(&self) -> Result<ContactChannel> {
        ContactChannel::new(
            &self.contact.base_url,
            &self.contact.identifier,
            self.contact.label.clone(),
        )
    }

    /// `None` means the geolocation capability is absent altogether.
    pub fn geolocator(&self) -> Option<Arc<dyn Geolocator>> {
        if !self.geolocation.enabled {
            return None;
        }
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (Some(lat), Some(lng)) => Some(Arc::new(FixedGeolocator::new(LatLng::new(lat, lng)))),
            _ => Some(Arc::new(UnavailableGeolocator::new(
                "no position configured",
            ))),
        }
    }

    pub fn places_client(&self) -> Result<GooglePlacesClient> {
        let api_key = validate_required_field("places.api_key", &self.places.api_key)?;
        validate_non_empty_string("places.api_key", api_key)?;
        if api_key.starts_with("${") {
            return Err(FinderError::MissingConfigError {
                field: "places.api_key".to_string(),
            });
        }

        let mut client = GooglePlacesClient::with_base_url(&self.places.base_url, api_key);
        if let Some(timeout) = self.places.timeout_seconds {
            client = client.with_timeout(Duration::from_secs(timeout));
        }
        Ok(client)
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
