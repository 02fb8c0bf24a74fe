//! Feed ingestion and normalization for the AI/tech news dashboard.
//!
//! Sources are fetched by [`FeedFetcher`], turned into [`Article`]s by the
//! pure [`build_articles`] pipeline and wrapped in a [`SourceReport`] for
//! whatever renders them.

pub mod config;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod noise;
pub mod pipeline;
pub mod recency;
pub mod registry;
pub mod report;
pub mod summary;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::{AppConfig, FetchConfig, FilterConfig};
pub use entry::{Article, RawEntry};
pub use error::{ConfigError, FeedError};
pub use fetcher::FeedFetcher;
pub use noise::is_noise;
pub use pipeline::build_articles;
pub use recency::is_recent;
pub use registry::{Source, SourceRegistry};
pub use report::{FeedStatus, SourceReport};
pub use summary::normalize_summary;

// --- Shared Logging ---

/// Initialize structured logging with JSON format in production (when RUST_LOG is set),
/// or compact human output for local runs. Logs go to stderr so stdout stays
/// free for the rendered reports.
pub fn init_logging() {
    let is_production = std::env::var("RUST_LOG").is_ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if is_production {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .try_init();
    }
}
