//! In-memory map surface, results view and notifier for the terminal front-end.

use crate::domain::model::{InfoPanelContent, LatLng, PanelHandle, PinHandle, ResultCard};
use crate::domain::ports::{MapSurface, Notifier, ResultsView};
use crate::utils::error::{FinderError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub at: LatLng,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenPanel {
    pub anchor: PinHandle,
    pub content: InfoPanelContent,
}

#[derive(Debug, Clone)]
pub struct TerminalMap {
    center: LatLng,
    zoom: u8,
    pins: BTreeMap<PinHandle, Pin>,
    panels: BTreeMap<PanelHandle, OpenPanel>,
    next_handle: u64,
}

impl TerminalMap {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            pins: BTreeMap::new(),
            panels: BTreeMap::new(),
            next_handle: 0,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    pub fn open_panels(&self) -> impl Iterator<Item = &OpenPanel> {
        self.panels.values()
    }

    fn issue_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl MapSurface for TerminalMap {
    fn center(&self) -> LatLng {
        self.center
    }

    fn set_center(&mut self, at: LatLng) {
        tracing::debug!("🧭 Map centered on {}", at);
        self.center = at;
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
    }

    fn place_pin(&mut self, at: LatLng, title: &str) -> PinHandle {
        let pin = PinHandle(self.issue_handle());
        self.pins.insert(
            pin,
            Pin {
                at,
                title: title.to_string(),
            },
        );
        pin
    }

    fn remove_pin(&mut self, pin: PinHandle) {
        self.pins.remove(&pin);
    }

    fn open_info_panel(&mut self, anchor: PinHandle, content: &InfoPanelContent) -> PanelHandle {
        let panel = PanelHandle(self.issue_handle());
        self.panels.insert(
            panel,
            OpenPanel {
                anchor,
                content: content.clone(),
            },
        );
        panel
    }

    fn close_info_panel(&mut self, panel: PanelHandle) {
        self.panels.remove(&panel);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(FinderError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: text, json, csv".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TerminalView {
    cards: Vec<ResultCard>,
    message: Option<String>,
    loading: bool,
}

#[derive(Serialize)]
struct JsonResults<'a> {
    message: Option<&'a str>,
    cards: &'a [ResultCard],
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[ResultCard] {
        &self.cards
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn write_to<W: Write>(&self, mut out: W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                if let Some(message) = &self.message {
                    writeln!(out, "{}", message)?;
                }
                for card in &self.cards {
                    writeln!(out, "{}", card.title)?;
                    writeln!(out, "  {}", card.subtitle)?;
                    writeln!(out, "  {}: {}", card.contact_label, card.contact_url)?;
                    writeln!(out)?;
                }
            }
            OutputFormat::Json => {
                let results = JsonResults {
                    message: self.message(),
                    cards: &self.cards,
                };
                serde_json::to_writer_pretty(&mut out, &results)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(out);
                for card in &self.cards {
                    writer.serialize(card)?;
                }
                writer.flush()?;
            }
        }
        Ok(())
    }
}

impl ResultsView for TerminalView {
    fn show_loading(&mut self) {
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn clear(&mut self) {
        self.cards.clear();
        self.message = None;
    }

    fn show_message(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn append_card(&mut self, card: &ResultCard) {
        self.cards.push(card.clone());
    }
}

/// Prints alerts to stderr and keeps a record of them.
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier {
    alerts: Vec<String>,
    echo: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            echo: true,
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        if self.echo {
            eprintln!("⚠️  {}", message);
        }
        self.alerts.push(message.to_string());
    }
}
