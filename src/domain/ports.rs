use crate::domain::model::{
    AutocompleteRequest, InfoPanelContent, LatLng, NearbySearchRequest, PanelHandle, PinHandle,
    Place, Prediction, ResultCard, TextSearchRequest,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The external places service.
///
/// A non-OK service status is reported as `FinderError::ProviderStatus`.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn text_search(&self, request: &TextSearchRequest) -> Result<Vec<Place>>;
    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<Vec<Place>>;
    async fn autocomplete(&self, request: &AutocompleteRequest) -> Result<Vec<Prediction>>;
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<LatLng>;
}

/// The shared map surface. Only the session touches it.
pub trait MapSurface: Send {
    fn center(&self) -> LatLng;
    fn set_center(&mut self, at: LatLng);
    fn set_zoom(&mut self, zoom: u8);
    fn place_pin(&mut self, at: LatLng, title: &str) -> PinHandle;
    fn remove_pin(&mut self, pin: PinHandle);
    fn open_info_panel(&mut self, anchor: PinHandle, content: &InfoPanelContent) -> PanelHandle;
    fn close_info_panel(&mut self, panel: PanelHandle);
}

/// A results container: cards, inline messages and a loading indicator.
pub trait ResultsView: Send {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn clear(&mut self);
    fn show_message(&mut self, message: &str);
    fn append_card(&mut self, card: &ResultCard);
}

/// Blocking, user-facing alerts.
pub trait Notifier: Send {
    fn alert(&mut self, message: &str);
}
