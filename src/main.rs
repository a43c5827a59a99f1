use clap::Parser;
use place_finder::adapters::{TerminalMap, TerminalNotifier, TerminalView};
use place_finder::app::{MapDefaults, PageEvent, PageResponse, PageServices, PageSlots};
use place_finder::core::render::ResultRenderer;
use place_finder::domain::ports::PlacesProvider;
use place_finder::utils::error::ErrorSeverity;
use place_finder::utils::logger;
use place_finder::{bootstrap, CliConfig, Command, FinderConfig, FinderError, SearchOutcome};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting place-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match run(&cli, &config).await {
        Ok(outcome) => {
            tracing::info!("✅ Finished: {:?}", outcome);
            if outcome.as_ref().is_some_and(SearchOutcome::is_failure) {
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ place-finder failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(
    cli: &CliConfig,
    config: &FinderConfig,
) -> Result<Option<SearchOutcome>, FinderError> {
    let provider: Arc<dyn PlacesProvider> = Arc::new(config.places_client()?);
    let services = PageServices {
        provider,
        geolocator: config.geolocator(),
        notifier: TerminalNotifier::new(),
        renderer: ResultRenderer::new(config.contact_channel()?),
        settings: config.search_settings(),
        map_defaults: MapDefaults {
            center: config.default_center(),
            zoom: config.map.default_zoom,
            focus_zoom: config.map.focus_zoom,
        },
    };

    let map = TerminalMap::new(config.default_center(), config.map.default_zoom);
    let view = TerminalView::new();
    let (slots, event) = match &cli.command {
        Command::Search { query, place_type } => (
            PageSlots::search_page(
                map,
                view,
                query.clone(),
                place_type.clone().unwrap_or_default(),
            ),
            PageEvent::SearchClicked,
        ),
        Command::Nearby {
            place_type, query, ..
        } => (
            PageSlots::search_page(
                map,
                view,
                query.clone().unwrap_or_default(),
                place_type.clone().unwrap_or_default(),
            ),
            PageEvent::NearbyClicked,
        ),
        Command::Map { query } => (
            PageSlots::map_page(map, view, query.clone()),
            PageEvent::SearchClicked,
        ),
        Command::Suggest { input } => (
            PageSlots::search_page(map, view, "", ""),
            PageEvent::SuggestRequested(input.clone()),
        ),
    };

    let page = bootstrap(slots, services)?;
    let response = page.dispatch(event).await?;

    if let PageResponse::Suggestions(predictions) = &response {
        let mut stdout = std::io::stdout().lock();
        for prediction in predictions {
            writeln!(stdout, "{}", prediction.description)?;
        }
        return Ok(None);
    }

    if let Some(position) = cli.open {
        let marker = page.orchestrator().session().await.markers().nth(position);
        match marker {
            Some(id) => {
                page.dispatch(PageEvent::MarkerActivated(id)).await?;
            }
            None => tracing::warn!("🔶 No marker at position {}", position),
        }
    }

    let session = page.orchestrator().session().await;
    let mut stdout = std::io::stdout().lock();
    session.view().write_to(&mut stdout, cli.format)?;
    for panel in session.map().open_panels() {
        writeln!(stdout, "📌 {} | {}", panel.content.title, panel.content.body)?;
    }

    Ok(match response {
        PageResponse::Search(outcome) => Some(outcome),
        _ => None,
    })
}
