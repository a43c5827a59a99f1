//! Picks the page mode from the slots a front-end supplies and wires it up.

use crate::app::pages::{MapPage, Page, SearchPage};
use crate::core::markers::{MarkerManager, DEFAULT_FOCUS_ZOOM};
use crate::core::render::ResultRenderer;
use crate::core::search::{SearchOrchestrator, SearchSettings};
use crate::core::session::{PageSession, SearchForm};
use crate::domain::model::LatLng;
use crate::domain::ports::{Geolocator, MapSurface, Notifier, PlacesProvider, ResultsView};
use crate::utils::error::{FinderError, Result};
use std::sync::Arc;

/// Named page slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Map,
    MapContainer,
    SearchInput,
    PlaceType,
    Results,
    MapResults,
    MapSearchInput,
}

impl SlotId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::Map => "map",
            SlotId::MapContainer => "map-container",
            SlotId::SearchInput => "search-input",
            SlotId::PlaceType => "place-type",
            SlotId::Results => "results",
            SlotId::MapResults => "map-results",
            SlotId::MapSearchInput => "map-search-input",
        }
    }
}

/// What a front-end hands the bootstrapper. Unfilled slots stay `None`.
pub struct PageSlots<M, V> {
    pub map: Option<M>,
    pub map_container: Option<M>,
    pub search_input: Option<String>,
    pub place_type: Option<String>,
    pub results: Option<V>,
    pub map_results: Option<V>,
    pub map_search_input: Option<String>,
}

impl<M, V> Default for PageSlots<M, V> {
    fn default() -> Self {
        Self {
            map: None,
            map_container: None,
            search_input: None,
            place_type: None,
            results: None,
            map_results: None,
            map_search_input: None,
        }
    }
}

impl<M, V> PageSlots<M, V> {
    /// Slots for the search-and-list page.
    pub fn search_page(
        map: M,
        results: V,
        query: impl Into<String>,
        place_type: impl Into<String>,
    ) -> Self {
        Self {
            map: Some(map),
            search_input: Some(query.into()),
            place_type: Some(place_type.into()),
            results: Some(results),
            ..Self::default()
        }
    }

    /// Slots for the map-first page.
    pub fn map_page(map_container: M, map_results: V, query: impl Into<String>) -> Self {
        Self {
            map_container: Some(map_container),
            map_results: Some(map_results),
            map_search_input: Some(query.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub center: LatLng,
    pub zoom: u8,
    pub focus_zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: LatLng::new(30.0444, 31.2357),
            zoom: 12,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
        }
    }
}

/// External capabilities shared by both page modes.
pub struct PageServices<N> {
    pub provider: Arc<dyn PlacesProvider>,
    pub geolocator: Option<Arc<dyn Geolocator>>,
    pub notifier: N,
    pub renderer: ResultRenderer,
    pub settings: SearchSettings,
    pub map_defaults: MapDefaults,
}

fn require<T>(slot: Option<T>, id: SlotId) -> Result<T> {
    slot.ok_or(FinderError::MissingSlot { slot: id.as_str() })
}

/// Initializes exactly one page mode: map-first when a `map-container` slot
/// is present, search-and-list otherwise.
pub fn bootstrap<M, V, N>(
    slots: PageSlots<M, V>,
    services: PageServices<N>,
) -> Result<Page<M, V, N>>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    let PageSlots {
        map,
        map_container,
        search_input,
        place_type,
        results,
        map_results,
        map_search_input,
    } = slots;

    if let Some(map_container) = map_container {
        let map_results = require(map_results, SlotId::MapResults)?;
        let query = require(map_search_input, SlotId::MapSearchInput)?;

        tracing::info!("🗺️ Initializing map-first page");
        let orchestrator = build_orchestrator(
            map_container,
            map_results,
            SearchForm::new(query, None),
            services,
        );
        return Ok(Page::Map(MapPage::new(orchestrator)));
    }

    let map = require(map, SlotId::Map)?;
    let query = require(search_input, SlotId::SearchInput)?;
    let place_type = require(place_type, SlotId::PlaceType)?;
    let results = require(results, SlotId::Results)?;

    tracing::info!("🔍 Initializing search page");
    let orchestrator = build_orchestrator(
        map,
        results,
        SearchForm::new(query, Some(place_type)),
        services,
    );
    Ok(Page::Search(SearchPage::new(orchestrator)))
}

fn build_orchestrator<M, V, N>(
    mut map: M,
    view: V,
    form: SearchForm,
    services: PageServices<N>,
) -> SearchOrchestrator<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    let defaults = services.map_defaults;
    map.set_center(defaults.center);
    map.set_zoom(defaults.zoom);

    let session = PageSession::new(
        map,
        view,
        services.notifier,
        MarkerManager::new(defaults.focus_zoom),
    )
    .with_form(form);

    SearchOrchestrator::new(
        session,
        services.provider,
        services.geolocator,
        services.renderer,
        services.settings,
    )
}
