use chrono::Utc;
use feed_pipeline::{
    init_logging, AppConfig, FeedFetcher, FeedStatus, SourceRegistry, SourceReport,
};
use tracing::{debug, error, info, warn};

// --- Main ---

/// Fetch the named sources (all of them when none are given), filter their
/// entries and print one JSON report per source to stdout.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    // 1. Load sources
    let registry = match &config.sources_file {
        Some(path) => {
            info!(path = %path.display(), "Loading sources from file");
            SourceRegistry::from_json_file(path)?
        }
        None => SourceRegistry::builtin()?,
    };
    info!(count = registry.len(), "Loaded sources");

    let requested: Vec<String> = std::env::args().skip(1).collect();
    let sources = registry.select(&requested).map_err(|e| {
        let known: Vec<&str> = registry.names().collect();
        error!(error = %e, known = ?known, "Unknown source requested");
        e
    })?;

    // 2. Fetch
    let fetcher = FeedFetcher::new(&config.fetch)?;
    info!(count = sources.len(), "Fetching feeds");
    let fetched = fetcher.fetch_all(&sources).await;

    // 3. Filter against a single clock reading so every source sees the same window
    let now = Utc::now();
    let reports: Vec<SourceReport> = fetched
        .into_iter()
        .map(|(source, result)| SourceReport::build(source, result, &config.filter, now))
        .collect();

    for report in &reports {
        match &report.status {
            FeedStatus::Ready { count } => {
                info!(source = %report.source, count, "Articles ready")
            }
            FeedStatus::NoEntries => {
                warn!(source = %report.source, "No articles found; try another source")
            }
            FeedStatus::AllFiltered { fetched } => {
                warn!(source = %report.source, fetched, "Every article was filtered out")
            }
            FeedStatus::Unavailable { reason } => {
                warn!(source = %report.source, reason = %reason, "Source unavailable")
            }
        }
    }

    // 4. Hand off to the presentation layer
    let output = serde_json::to_string_pretty(&reports)?;
    println!("{}", output);
    debug!(bytes = output.len(), "Reports written");

    Ok(())
}
