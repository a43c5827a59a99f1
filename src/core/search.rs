use crate::core::render::ResultRenderer;
use crate::core::session::{EmptyResults, PageSession};
use crate::domain::model::{
    AutocompleteRequest, LocationBias, MarkerId, NearbySearchRequest, PanelHandle, Place,
    Prediction, TextSearchRequest,
};
use crate::domain::ports::{Geolocator, MapSurface, Notifier, PlacesProvider, ResultsView};
use crate::utils::error::{FinderError, Result};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, MutexGuard};

pub const ENTER_SEARCH_TERM_MESSAGE: &str = "Please enter a search term";
pub const GEOLOCATION_FAILED_MESSAGE: &str = "Geolocation failed. Using default location.";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Your browser doesn't support geolocation.";
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 1000;
pub const DEFAULT_CATEGORY: &str = "restaurant";
pub const DEFAULT_VIEWPORT_RADIUS_M: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub nearby_radius_m: u32,
    pub default_category: String,
    /// Radius of the viewport bias used by map-page searches and suggestions.
    pub viewport_radius_m: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            default_category: DEFAULT_CATEGORY.to_string(),
            viewport_radius_m: DEFAULT_VIEWPORT_RADIUS_M,
        }
    }
}

/// How one search invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Rendered { cards: usize, markers: usize },
    NoResults,
    EmptyQuery,
    Failed { reason: String },
    GeolocationUnsupported,
    /// Geolocation failed and the text search below ran instead.
    FellBack(Box<SearchOutcome>),
    /// A newer search started before this one completed; nothing was rendered.
    Superseded,
}

impl SearchOutcome {
    /// True when the provider call failed, including behind a fallback.
    pub fn is_failure(&self) -> bool {
        match self {
            SearchOutcome::Failed { .. } => true,
            SearchOutcome::FellBack(inner) => inner.is_failure(),
            _ => false,
        }
    }
}

/// Cancellation token for one search. Stale once a newer search starts.
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    latest: watch::Receiver<u64>,
}

impl SearchTicket {
    pub fn is_current(&self) -> bool {
        *self.latest.borrow() == self.generation
    }

    /// Resolves once a newer search has been started.
    pub async fn superseded(&mut self) {
        loop {
            if *self.latest.borrow_and_update() != self.generation {
                return;
            }
            if self.latest.changed().await.is_err() {
                // sender gone: nothing can supersede us any more
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Runs searches against the places provider and reflects them in the page.
///
/// Cloning is cheap; clones share the same session. When searches overlap,
/// the most recently started one wins and older ones are cancelled.
pub struct SearchOrchestrator<M, V, N> {
    session: Arc<Mutex<PageSession<M, V, N>>>,
    provider: Arc<dyn PlacesProvider>,
    geolocator: Option<Arc<dyn Geolocator>>,
    renderer: Arc<ResultRenderer>,
    settings: Arc<SearchSettings>,
    generations: Arc<watch::Sender<u64>>,
}

impl<M, V, N> Clone for SearchOrchestrator<M, V, N> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            provider: Arc::clone(&self.provider),
            geolocator: self.geolocator.clone(),
            renderer: Arc::clone(&self.renderer),
            settings: Arc::clone(&self.settings),
            generations: Arc::clone(&self.generations),
        }
    }
}

impl<M, V, N> SearchOrchestrator<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    pub fn new(
        session: PageSession<M, V, N>,
        provider: Arc<dyn PlacesProvider>,
        geolocator: Option<Arc<dyn Geolocator>>,
        renderer: ResultRenderer,
        settings: SearchSettings,
    ) -> Self {
        let (generations, _) = watch::channel(0);
        Self {
            session: Arc::new(Mutex::new(session)),
            provider,
            geolocator,
            renderer: Arc::new(renderer),
            settings: Arc::new(settings),
            generations: Arc::new(generations),
        }
    }

    pub async fn session(&self) -> MutexGuard<'_, PageSession<M, V, N>> {
        self.session.lock().await
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Starts a new search generation, invalidating every older ticket.
    pub fn begin_search(&self) -> SearchTicket {
        self.generations.send_modify(|g| *g += 1);
        let latest = self.generations.subscribe();
        let generation = *latest.borrow();
        SearchTicket { generation, latest }
    }

    /// Text search with the query and category currently in the form.
    pub async fn search_by_query(&self) -> Result<SearchOutcome> {
        let (mut ticket, request) = {
            let mut session = self.session.lock().await;
            let query = session.form().query.trim().to_string();

            if query.is_empty() {
                tracing::debug!("Empty query, no request issued");
                let view = session.view_mut();
                view.clear();
                view.show_message(ENTER_SEARCH_TERM_MESSAGE);
                return Ok(SearchOutcome::EmptyQuery);
            }

            let request = TextSearchRequest {
                query,
                category: session.form().category.clone(),
                bias: None,
            };
            session.view_mut().show_loading();
            (self.begin_search(), request)
        };

        tracing::info!(
            "🔍 Text search '{}' (category: {})",
            request.query,
            request.category.as_deref().unwrap_or("any")
        );

        let result = tokio::select! {
            result = self.provider.text_search(&request) => Some(result),
            _ = ticket.superseded() => None,
        };

        match result {
            Some(result) => {
                self.complete(&ticket, result, EmptyResults::ShowMessage)
                    .await
            }
            None => Ok(self.superseded("text search")),
        }
    }

    /// Proximity search around the current position, falling back to a text
    /// search when the position cannot be determined.
    pub async fn search_nearby(&self) -> Result<SearchOutcome> {
        let Some(geolocator) = self.geolocator.clone() else {
            self.session
                .lock()
                .await
                .alert(GEOLOCATION_UNSUPPORTED_MESSAGE);
            return Ok(SearchOutcome::GeolocationUnsupported);
        };

        let mut ticket = {
            let mut session = self.session.lock().await;
            session.view_mut().show_loading();
            self.begin_search()
        };

        let position = tokio::select! {
            position = geolocator.current_position() => Some(position),
            _ = ticket.superseded() => None,
        };
        let Some(position) = position else {
            return Ok(self.superseded("geolocation"));
        };

        let position = match position {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("📡 Geolocation unavailable: {}", e);
                {
                    let mut session = self.session.lock().await;
                    if !ticket.is_current() {
                        return Ok(self.superseded("geolocation"));
                    }
                    session.view_mut().hide_loading();
                    session.alert(GEOLOCATION_FAILED_MESSAGE);
                }
                let fallback = self.search_by_query().await?;
                return Ok(SearchOutcome::FellBack(Box::new(fallback)));
            }
        };

        let request = {
            let mut session = self.session.lock().await;
            if !ticket.is_current() {
                return Ok(self.superseded("geolocation"));
            }
            session.map_mut().set_center(position);
            NearbySearchRequest {
                location: position,
                radius_m: self.settings.nearby_radius_m,
                category: session
                    .form()
                    .category
                    .clone()
                    .unwrap_or_else(|| self.settings.default_category.clone()),
            }
        };

        tracing::info!(
            "📍 Nearby search at {} within {}m (category: {})",
            request.location,
            request.radius_m,
            request.category
        );

        let result = tokio::select! {
            result = self.provider.nearby_search(&request) => Some(result),
            _ = ticket.superseded() => None,
        };

        match result {
            Some(result) => {
                self.complete(&ticket, result, EmptyResults::ShowMessage)
                    .await
            }
            None => Ok(self.superseded("nearby search")),
        }
    }

    /// Search-box search biased to the visible map area. An empty result keeps
    /// what is already on the page.
    pub async fn search_in_viewport(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        let (mut ticket, request) = {
            let mut session = self.session.lock().await;
            let request = TextSearchRequest {
                query: query.to_string(),
                category: None,
                bias: Some(LocationBias {
                    center: session.map().center(),
                    radius_m: self.settings.viewport_radius_m,
                }),
            };
            session.view_mut().show_loading();
            (self.begin_search(), request)
        };

        tracing::info!("🔍 Map search '{}'", request.query);

        let result = tokio::select! {
            result = self.provider.text_search(&request) => Some(result),
            _ = ticket.superseded() => None,
        };

        match result {
            Some(result) => {
                self.complete(&ticket, result, EmptyResults::KeepPrevious)
                    .await
            }
            None => Ok(self.superseded("map search")),
        }
    }

    /// Autocomplete predictions for partial input, biased to the map view.
    pub async fn suggest(&self, input: &str) -> Result<Vec<Prediction>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let center = self.session.lock().await.map().center();
        let request = AutocompleteRequest {
            input: input.to_string(),
            bias: Some(LocationBias {
                center,
                radius_m: self.settings.viewport_radius_m,
            }),
        };

        let predictions = self.provider.autocomplete(&request).await?;
        tracing::debug!("💡 {} suggestions for '{}'", predictions.len(), input);
        Ok(predictions)
    }

    pub async fn activate_marker(&self, id: MarkerId) -> Option<PanelHandle> {
        self.session.lock().await.activate_marker(id)
    }

    async fn complete(
        &self,
        ticket: &SearchTicket,
        result: Result<Vec<Place>>,
        on_empty: EmptyResults,
    ) -> Result<SearchOutcome> {
        let mut session = self.session.lock().await;
        // checked under the lock so no newer render can interleave
        if !ticket.is_current() {
            return Ok(self.superseded("completion"));
        }

        session.view_mut().hide_loading();

        match result {
            Ok(places) => Ok(
                match session.render_result_set(&places, &self.renderer, on_empty) {
                    Some(summary) => SearchOutcome::Rendered {
                        cards: summary.cards,
                        markers: summary.markers,
                    },
                    None => SearchOutcome::NoResults,
                },
            ),
            Err(FinderError::ProviderStatus { status, message }) => {
                if let Some(message) = &message {
                    tracing::debug!("Provider message: {}", message);
                }
                session.alert(&format!("Search failed: {}", status));
                Ok(SearchOutcome::Failed { reason: status })
            }
            Err(e) => {
                tracing::error!("❌ Places request failed: {}", e);
                session.alert(&format!("Search failed: {}", e));
                Ok(SearchOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn superseded(&self, stage: &str) -> SearchOutcome {
        tracing::debug!("⏭️ Dropping superseded {}", stage);
        SearchOutcome::Superseded
    }
}
