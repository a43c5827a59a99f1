use crate::domain::model::LatLng;
use crate::domain::ports::Geolocator;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;

/// Reports a position given up front (CLI flags or config).
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: LatLng,
}

impl FixedGeolocator {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<LatLng> {
        Ok(self.position)
    }
}

/// Geolocation is supported but no position can be obtained.
#[derive(Debug, Clone)]
pub struct UnavailableGeolocator {
    reason: String,
}

impl UnavailableGeolocator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<LatLng> {
        Err(FinderError::GeolocationError {
            message: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_and_unavailable() {
        let fixed = FixedGeolocator::new(LatLng::new(30.0, 31.0));
        assert_eq!(fixed.current_position().await.unwrap(), LatLng::new(30.0, 31.0));

        let unavailable = UnavailableGeolocator::new("permission denied");
        let err = unavailable.current_position().await.unwrap_err();
        assert_eq!(err.to_string(), "Geolocation failed: permission denied");
    }
}
