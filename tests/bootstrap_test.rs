use async_trait::async_trait;
use place_finder::adapters::{FixedGeolocator, TerminalMap, TerminalNotifier, TerminalView};
use place_finder::app::{
    bootstrap, MapDefaults, PageEvent, PageMode, PageResponse, PageServices, PageSlots,
};
use place_finder::core::render::{ContactChannel, ResultRenderer};
use place_finder::core::search::{SearchOutcome, SearchSettings};
use place_finder::domain::model::{
    AutocompleteRequest, LatLng, NearbySearchRequest, Place, Prediction, TextSearchRequest,
};
use place_finder::domain::ports::{MapSurface, PlacesProvider, ResultsView};
use place_finder::{FinderError, Result};
use std::sync::{Arc, Mutex};

/// Returns a fixed result set and remembers the last text query it saw.
#[derive(Default)]
struct StaticProvider {
    places: Vec<Place>,
    last_text: Mutex<Option<TextSearchRequest>>,
}

#[async_trait]
impl PlacesProvider for StaticProvider {
    async fn text_search(&self, request: &TextSearchRequest) -> Result<Vec<Place>> {
        *self.last_text.lock().unwrap() = Some(request.clone());
        Ok(self.places.clone())
    }

    async fn nearby_search(&self, _request: &NearbySearchRequest) -> Result<Vec<Place>> {
        Ok(self.places.clone())
    }

    async fn autocomplete(&self, _request: &AutocompleteRequest) -> Result<Vec<Prediction>> {
        Ok(Vec::new())
    }
}

fn provider(places: Vec<Place>) -> Arc<StaticProvider> {
    Arc::new(StaticProvider {
        places,
        last_text: Mutex::new(None),
    })
}

fn services(provider: Arc<StaticProvider>) -> PageServices<TerminalNotifier> {
    PageServices {
        provider,
        geolocator: Some(Arc::new(FixedGeolocator::new(LatLng::new(30.0, 31.0)))),
        notifier: TerminalNotifier::silent(),
        renderer: ResultRenderer::new(ContactChannel::whatsapp().unwrap()),
        settings: SearchSettings::default(),
        map_defaults: MapDefaults::default(),
    }
}

fn blank_map() -> TerminalMap {
    TerminalMap::new(LatLng::new(0.0, 0.0), 1)
}

fn places() -> Vec<Place> {
    vec![
        Place::new("Pyramid View Cafe")
            .with_address("Giza")
            .with_location(LatLng::new(29.98, 31.13)),
        Place::new("Nameless Kiosk"),
    ]
}

#[tokio::test]
async fn test_map_container_selects_map_first_mode() {
    let slots = PageSlots::map_page(blank_map(), TerminalView::new(), "");
    let page = bootstrap(slots, services(provider(places()))).unwrap();

    assert_eq!(page.mode(), PageMode::MapFirst);
    let session = page.orchestrator().session().await;
    assert_eq!(session.map().center(), LatLng::new(30.0444, 31.2357));
    assert_eq!(session.map().zoom(), 12);
}

#[tokio::test]
async fn test_without_map_container_selects_search_mode() {
    let slots = PageSlots::search_page(blank_map(), TerminalView::new(), "tea", "cafe");
    let page = bootstrap(slots, services(provider(places()))).unwrap();

    assert_eq!(page.mode(), PageMode::SearchAndList);
    let session = page.orchestrator().session().await;
    assert_eq!(session.form().query, "tea");
    assert_eq!(session.form().category.as_deref(), Some("cafe"));
}

#[test]
fn test_missing_slots_are_reported_by_name() {
    let mut slots = PageSlots::search_page(blank_map(), TerminalView::new(), "tea", "");
    slots.results = None;
    let err = bootstrap(slots, services(provider(places()))).err().unwrap();
    assert!(matches!(err, FinderError::MissingSlot { slot: "results" }));

    let mut slots = PageSlots::map_page(blank_map(), TerminalView::new(), "");
    slots.map_search_input = None;
    let err = bootstrap(slots, services(provider(places()))).err().unwrap();
    assert!(matches!(err, FinderError::MissingSlot { slot: "map-search-input" }));

    let slots: PageSlots<TerminalMap, TerminalView> = PageSlots::default();
    let err = bootstrap(slots, services(provider(places()))).err().unwrap();
    assert!(matches!(err, FinderError::MissingSlot { slot: "map" }));
}

#[tokio::test]
async fn test_search_page_events() {
    let provider = provider(places());
    let slots = PageSlots::search_page(blank_map(), TerminalView::new(), "", "");
    let page = bootstrap(slots, services(provider.clone())).unwrap();

    let response = page
        .dispatch(PageEvent::QueryChanged("koshary".to_string()))
        .await
        .unwrap();
    assert_eq!(response, PageResponse::Updated);

    let response = page
        .dispatch(PageEvent::CategoryChanged("restaurant".to_string()))
        .await
        .unwrap();
    assert_eq!(
        response,
        PageResponse::Search(SearchOutcome::Rendered { cards: 2, markers: 1 })
    );
    let last = provider.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(last.query, "koshary");
    assert_eq!(last.category.as_deref(), Some("restaurant"));

    let response = page
        .dispatch(PageEvent::MapQuerySubmitted("ignored".to_string()))
        .await
        .unwrap();
    assert_eq!(response, PageResponse::Ignored);

    let response = page.dispatch(PageEvent::NearbyClicked).await.unwrap();
    assert_eq!(
        response,
        PageResponse::Search(SearchOutcome::Rendered { cards: 2, markers: 1 })
    );
    assert_eq!(
        page.orchestrator().session().await.map().center(),
        LatLng::new(30.0, 31.0)
    );
}

#[tokio::test]
async fn test_map_page_search_box_populates_markers_and_cards() {
    let provider = provider(places());
    let slots = PageSlots::map_page(blank_map(), TerminalView::new(), "");
    let page = bootstrap(slots, services(provider.clone())).unwrap();

    let response = page
        .dispatch(PageEvent::MapQuerySubmitted("cafe near pyramids".to_string()))
        .await
        .unwrap();
    assert_eq!(
        response,
        PageResponse::Search(SearchOutcome::Rendered { cards: 2, markers: 1 })
    );

    let last = provider.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(last.bias.unwrap().center, LatLng::new(30.0444, 31.2357));

    let marker = page.orchestrator().session().await.markers().nth(1).unwrap();
    let response = page.dispatch(PageEvent::MarkerActivated(marker)).await.unwrap();
    assert!(matches!(response, PageResponse::PanelOpened(Some(_))));

    assert_eq!(
        page.dispatch(PageEvent::NearbyClicked).await.unwrap(),
        PageResponse::Ignored
    );
}

#[tokio::test]
async fn test_map_page_keeps_results_when_search_box_finds_nothing() {
    let provider = provider(Vec::new());
    let slots = PageSlots::map_page(blank_map(), TerminalView::new(), "");
    let page = bootstrap(slots, services(provider)).unwrap();
    {
        let card = ResultRenderer::new(ContactChannel::whatsapp().unwrap())
            .render(&Place::new("Earlier"));
        page.orchestrator().session().await.view_mut().append_card(&card);
    }

    let response = page
        .dispatch(PageEvent::MapQuerySubmitted("nothing here".to_string()))
        .await
        .unwrap();

    assert_eq!(response, PageResponse::Search(SearchOutcome::NoResults));
    let session = page.orchestrator().session().await;
    assert_eq!(session.view().cards().len(), 1);
    assert!(session.view().message().is_none());
    assert!(!session.view().is_loading());
}
