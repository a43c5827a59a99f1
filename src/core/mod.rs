pub mod markers;
pub mod render;
pub mod search;
pub mod session;

pub use crate::domain::model::{LatLng, Marker, MarkerId, Place, ResultCard};
pub use crate::domain::ports::{Geolocator, MapSurface, Notifier, PlacesProvider, ResultsView};
pub use crate::utils::error::Result;
