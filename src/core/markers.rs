use crate::domain::model::{InfoPanelContent, Marker, MarkerId, PanelHandle, Place};
use crate::domain::ports::MapSurface;
use crate::core::render::ADDRESS_PLACEHOLDER;

pub const DEFAULT_FOCUS_ZOOM: u8 = 16;

/// Owns the pins currently shown on the map and the single open info panel.
#[derive(Debug)]
pub struct MarkerManager {
    markers: Vec<Marker>,
    active_panel: Option<PanelHandle>,
    next_id: u64,
    focus_zoom: u8,
}

impl MarkerManager {
    pub fn new(focus_zoom: u8) -> Self {
        Self {
            markers: Vec::new(),
            active_panel: None,
            next_id: 0,
            focus_zoom,
        }
    }

    /// Pins a place on the map. Places without a location are skipped.
    pub fn add_marker(&mut self, map: &mut dyn MapSurface, place: &Place) -> Option<MarkerId> {
        let location = place.location?;

        let pin = map.place_pin(location, &place.name);
        self.next_id += 1;
        let id = MarkerId(self.next_id);

        tracing::debug!("📍 Added {} for '{}' at {}", id, place.name, location);
        self.markers.push(Marker {
            id,
            place: place.clone(),
            pin,
        });

        Some(id)
    }

    /// Handles a click on a pin: focus the map on it and swap the info panel.
    pub fn activate(&mut self, map: &mut dyn MapSurface, id: MarkerId) -> Option<PanelHandle> {
        let Some(marker) = self.markers.iter().find(|m| m.id == id) else {
            tracing::debug!("Ignoring activation of unknown {}", id);
            return None;
        };
        // add_marker only keeps located places
        let location = marker.place.location?;

        map.set_center(location);
        map.set_zoom(self.focus_zoom);

        if let Some(previous) = self.active_panel.take() {
            map.close_info_panel(previous);
        }

        let content = InfoPanelContent {
            title: marker.place.name.clone(),
            body: marker
                .place
                .formatted_address
                .clone()
                .unwrap_or_else(|| ADDRESS_PLACEHOLDER.to_string()),
        };
        let panel = map.open_info_panel(marker.pin, &content);
        self.active_panel = Some(panel);

        tracing::debug!("🗨️ Opened info panel for '{}'", content.title);
        Some(panel)
    }

    /// Removes every pin from the map. Safe to call on an empty set.
    pub fn clear_markers(&mut self, map: &mut dyn MapSurface) {
        if let Some(panel) = self.active_panel.take() {
            map.close_info_panel(panel);
        }

        let removed = self.markers.len();
        for marker in self.markers.drain(..) {
            map.remove_pin(marker.pin);
        }

        if removed > 0 {
            tracing::debug!("🧹 Cleared {} markers", removed);
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn active_panel(&self) -> Option<PanelHandle> {
        self.active_panel
    }

    /// Id of the marker at a 1-based display position.
    pub fn nth(&self, position: usize) -> Option<MarkerId> {
        position
            .checked_sub(1)
            .and_then(|index| self.markers.get(index))
            .map(|m| m.id)
    }
}

impl Default for MarkerManager {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_ZOOM)
    }
}
