use crate::adapters::terminal::OutputFormat;
use crate::config::FinderConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "place-finder")]
#[command(about = "Search for places and list them as contact cards and map pins")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Places API key (overrides the config file)")]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Places service base URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, default_value = "text", help = "text, json or csv")]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "Open the info panel of the N-th marker")]
    pub open: Option<usize>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Free-text search with an optional category filter
    Search {
        query: String,
        #[arg(long = "type")]
        place_type: Option<String>,
    },
    /// Search around the current position
    Nearby {
        #[arg(long = "type")]
        place_type: Option<String>,
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Query used if the position cannot be determined
        #[arg(long)]
        query: Option<String>,
    },
    /// Map-first search biased to the visible map area
    Map { query: String },
    /// Autocomplete suggestions for partial input
    Suggest { input: String },
}

impl CliConfig {
    /// Loads the config file (if any) and applies CLI overrides on top.
    pub fn resolve(&self) -> Result<FinderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                FinderConfig::from_file(path)?
            }
            None => FinderConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.places.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.places.base_url = base_url.clone();
        }
        if let Command::Nearby {
            lat: Some(lat),
            lng: Some(lng),
            ..
        } = &self.command
        {
            config.geolocation.enabled = true;
            config.geolocation.latitude = Some(*lat);
            config.geolocation.longitude = Some(*lng);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let cli = CliConfig::parse_from([
            "place-finder",
            "--format",
            "json",
            "search",
            "coffee",
            "--type",
            "cafe",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Search { query, place_type } => {
                assert_eq!(query, "coffee");
                assert_eq!(place_type.as_deref(), Some("cafe"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_nearby_coordinates_override_geolocation() {
        let cli = CliConfig::parse_from([
            "place-finder",
            "--api-key",
            "k",
            "nearby",
            "--lat",
            "-33.86",
            "--lng",
            "151.2",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.places.api_key.as_deref(), Some("k"));
        assert_eq!(config.geolocation.latitude, Some(-33.86));
        assert_eq!(config.geolocation.longitude, Some(151.2));
    }

    #[test]
    fn test_invalid_base_url_fails_resolution() {
        let cli = CliConfig::parse_from(["place-finder", "--base-url", "nope", "suggest", "caf"]);
        assert!(cli.resolve().is_err());
    }
}
