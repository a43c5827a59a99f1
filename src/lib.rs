pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::{bootstrap, Page, PageEvent, PageResponse, PageServices, PageSlots};
pub use config::FinderConfig;
pub use crate::core::search::{SearchOrchestrator, SearchOutcome};
pub use utils::error::{FinderError, Result};
