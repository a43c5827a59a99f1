pub mod bootstrap;
pub mod pages;

pub use bootstrap::{bootstrap, MapDefaults, PageServices, PageSlots, SlotId};
pub use pages::{MapPage, Page, PageEvent, PageMode, PageResponse, SearchPage};
