// Adapters layer: concrete implementations of the domain ports (http, geolocation, terminal).

pub mod geolocation;
pub mod google_places;
pub mod terminal;

pub use geolocation::{FixedGeolocator, UnavailableGeolocator};
pub use google_places::GooglePlacesClient;
pub use terminal::{OutputFormat, TerminalMap, TerminalNotifier, TerminalView};
