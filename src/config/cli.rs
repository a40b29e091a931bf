use crate::config::toml_config::TomlConfig;
use crate::adapters::storage::{FileStore, MemoryStore};
use crate::config::PortfolioConfig;
use crate::domain::model::AnalyticsEventType;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-content")]
#[command(about = "Load portfolio content from the API with cache and bundled fallbacks")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Serve bundled data only, without network or cache access
    #[arg(long, global = true)]
    pub static_mode: bool,

    /// Keep the content cache in memory for this run (the stored auth token is still read from disk)
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List projects
    Projects {
        /// Only featured projects
        #[arg(long)]
        featured: bool,
    },

    /// Show one project by id
    Project { id: i64 },

    /// List experience entries
    Experience,

    /// List skills
    Skills {
        /// Group skills by category
        #[arg(long)]
        grouped: bool,
    },

    /// Check whether the API is reachable
    Health,

    /// Submit the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },

    /// Send an analytics event
    Track {
        #[arg(value_enum)]
        event: TrackedEvent,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        project_id: Option<i64>,
        #[arg(long)]
        project_title: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TrackedEvent {
    PageView,
    ResumeDownload,
    ProjectClick,
    ContactSubmit,
}

impl From<TrackedEvent> for AnalyticsEventType {
    fn from(event: TrackedEvent) -> Self {
        match event {
            TrackedEvent::PageView => AnalyticsEventType::PageView,
            TrackedEvent::ResumeDownload => AnalyticsEventType::ResumeDownload,
            TrackedEvent::ProjectClick => AnalyticsEventType::ProjectClick,
            TrackedEvent::ContactSubmit => AnalyticsEventType::ContactSubmit,
        }
    }
}

impl CliConfig {
    /// 預設值 → TOML 檔 → 環境變數 → 命令列參數
    pub fn resolve(&self) -> Result<PortfolioConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.into_portfolio_config()
            }
            None => PortfolioConfig::default(),
        };

        config.apply_env_overrides()?;

        if let Some(url) = &self.base_url {
            config.api_base_url = url.clone();
        }
        if self.static_mode {
            config.features.use_static_data = true;
        }

        Ok(config)
    }

    /// 回傳 (內容快取, 憑證) 兩個 store；`--no-cache` 只影響內容快取
    pub fn stores(
        &self,
        config: &PortfolioConfig,
    ) -> (Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>) {
        let credentials: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.cache_dir.clone()));
        let cache = if self.no_cache {
            Arc::new(MemoryStore::new())
        } else {
            credentials.clone()
        };
        (cache, credentials)
    }
}
