pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FileStore, HttpTransport, MemoryStore};
pub use config::PortfolioConfig;
pub use core::{
    analytics::AnalyticsTracker,
    bundled::BundledContent,
    contact::ContactService,
    content::ContentService,
    fallback::{ContentSource, FallbackResolver, Resolved},
    grouping::{flatten_categories, group_skills_by_category},
};
pub use utils::error::{FetchFailure, PortfolioError, Result};
