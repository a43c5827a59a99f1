use crate::core::search::{SearchOrchestrator, SearchOutcome};
use crate::domain::model::{MarkerId, PanelHandle, Prediction};
use crate::domain::ports::{MapSurface, Notifier, ResultsView};
use crate::utils::error::Result;

/// User interactions a page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    QueryChanged(String),
    CategoryChanged(String),
    SearchClicked,
    NearbyClicked,
    MapQuerySubmitted(String),
    SuggestRequested(String),
    MarkerActivated(MarkerId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    Search(SearchOutcome),
    PanelOpened(Option<PanelHandle>),
    Suggestions(Vec<Prediction>),
    /// Input state changed; nothing was requested.
    Updated,
    /// The active page mode does not wire this event.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    SearchAndList,
    MapFirst,
}

/// Map + free-text search + category filter + geolocation button.
pub struct SearchPage<M, V, N> {
    orchestrator: SearchOrchestrator<M, V, N>,
}

/// Map with an embedded search box feeding both markers and cards.
pub struct MapPage<M, V, N> {
    orchestrator: SearchOrchestrator<M, V, N>,
}

pub enum Page<M, V, N> {
    Search(SearchPage<M, V, N>),
    Map(MapPage<M, V, N>),
}

impl<M, V, N> SearchPage<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    pub fn new(orchestrator: SearchOrchestrator<M, V, N>) -> Self {
        Self { orchestrator }
    }

    pub async fn dispatch(&self, event: PageEvent) -> Result<PageResponse> {
        let orchestrator = &self.orchestrator;
        let response = match event {
            PageEvent::QueryChanged(query) => {
                orchestrator.session().await.form_mut().query = query;
                PageResponse::Updated
            }
            PageEvent::CategoryChanged(category) => {
                orchestrator.session().await.form_mut().set_category(category);
                PageResponse::Search(orchestrator.search_by_query().await?)
            }
            PageEvent::SearchClicked => PageResponse::Search(orchestrator.search_by_query().await?),
            PageEvent::NearbyClicked => PageResponse::Search(orchestrator.search_nearby().await?),
            PageEvent::SuggestRequested(input) => {
                PageResponse::Suggestions(orchestrator.suggest(&input).await?)
            }
            PageEvent::MarkerActivated(id) => {
                PageResponse::PanelOpened(orchestrator.activate_marker(id).await)
            }
            PageEvent::MapQuerySubmitted(_) => PageResponse::Ignored,
        };
        Ok(response)
    }
}

impl<M, V, N> MapPage<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    pub fn new(orchestrator: SearchOrchestrator<M, V, N>) -> Self {
        Self { orchestrator }
    }

    pub async fn dispatch(&self, event: PageEvent) -> Result<PageResponse> {
        let orchestrator = &self.orchestrator;
        let response = match event {
            PageEvent::QueryChanged(query) => {
                orchestrator.session().await.form_mut().query = query;
                PageResponse::Updated
            }
            PageEvent::MapQuerySubmitted(query) => {
                orchestrator.session().await.form_mut().query = query.clone();
                PageResponse::Search(orchestrator.search_in_viewport(&query).await?)
            }
            PageEvent::SearchClicked => {
                let query = orchestrator.session().await.form().query.clone();
                PageResponse::Search(orchestrator.search_in_viewport(&query).await?)
            }
            PageEvent::SuggestRequested(input) => {
                PageResponse::Suggestions(orchestrator.suggest(&input).await?)
            }
            PageEvent::MarkerActivated(id) => {
                PageResponse::PanelOpened(orchestrator.activate_marker(id).await)
            }
            PageEvent::CategoryChanged(_) | PageEvent::NearbyClicked => PageResponse::Ignored,
        };
        Ok(response)
    }
}

impl<M, V, N> Page<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    pub fn mode(&self) -> PageMode {
        match self {
            Page::Search(_) => PageMode::SearchAndList,
            Page::Map(_) => PageMode::MapFirst,
        }
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator<M, V, N> {
        match self {
            Page::Search(page) => &page.orchestrator,
            Page::Map(page) => &page.orchestrator,
        }
    }

    pub async fn dispatch(&self, event: PageEvent) -> Result<PageResponse> {
        tracing::debug!("Dispatching {:?} to {:?} page", event, self.mode());
        let response = match self {
            Page::Search(page) => page.dispatch(event).await?,
            Page::Map(page) => page.dispatch(event).await?,
        };
        if response == PageResponse::Ignored {
            tracing::debug!("Event not wired in {:?} mode", self.mode());
        }
        Ok(response)
    }
}
