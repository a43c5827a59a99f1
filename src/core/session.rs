use crate::core::markers::MarkerManager;
use crate::core::render::ResultRenderer;
use crate::domain::model::{MarkerId, PanelHandle, Place};
use crate::domain::ports::{MapSurface, Notifier, ResultsView};

pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// The search inputs of a page: free-text query and optional category filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub query: String,
    pub category: Option<String>,
}

impl SearchForm {
    pub fn new(query: impl Into<String>, category: Option<String>) -> Self {
        let mut form = Self {
            query: query.into(),
            category: None,
        };
        form.set_category(category.unwrap_or_default());
        form
    }

    /// An empty selection means "any category".
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category.trim().to_string())
        };
    }
}

/// What to do with the previous results when a search comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyResults {
    /// Clear everything and say so inline.
    ShowMessage,
    /// Leave the previous cards and markers in place.
    KeepPrevious,
}

/// Counts of what one rendered result set put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub cards: usize,
    pub markers: usize,
}

/// Everything one page owns: map, results view, alerts, markers and inputs.
pub struct PageSession<M, V, N> {
    map: M,
    view: V,
    notifier: N,
    markers: MarkerManager,
    form: SearchForm,
}

impl<M, V, N> PageSession<M, V, N>
where
    M: MapSurface,
    V: ResultsView,
    N: Notifier,
{
    pub fn new(map: M, view: V, notifier: N, markers: MarkerManager) -> Self {
        Self {
            map,
            view,
            notifier,
            markers,
            form: SearchForm::default(),
        }
    }

    pub fn with_form(mut self, form: SearchForm) -> Self {
        self.form = form;
        self
    }

    /// Replaces the current result set.
    ///
    /// Cards and markers from the previous set are gone before the first new
    /// one is added. Returns `None` when `places` is empty.
    pub fn render_result_set(
        &mut self,
        places: &[Place],
        renderer: &ResultRenderer,
        on_empty: EmptyResults,
    ) -> Option<RenderSummary> {
        if places.is_empty() {
            if on_empty == EmptyResults::ShowMessage {
                self.view.clear();
                self.markers.clear_markers(&mut self.map);
                self.view.show_message(NO_RESULTS_MESSAGE);
            }
            return None;
        }

        self.view.clear();
        self.markers.clear_markers(&mut self.map);

        let mut summary = RenderSummary {
            cards: 0,
            markers: 0,
        };
        for place in places {
            renderer.render_into(place, &mut self.view);
            summary.cards += 1;
            if self.markers.add_marker(&mut self.map, place).is_some() {
                summary.markers += 1;
            }
        }

        tracing::info!(
            "🗺️ Rendered {} cards and {} markers",
            summary.cards,
            summary.markers
        );
        Some(summary)
    }

    pub fn activate_marker(&mut self, id: MarkerId) -> Option<PanelHandle> {
        self.markers.activate(&mut self.map, id)
    }

    pub fn alert(&mut self, message: &str) {
        tracing::warn!("⚠️ {}", message);
        self.notifier.alert(message);
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn markers(&self) -> &MarkerManager {
        &self.markers
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }
}
