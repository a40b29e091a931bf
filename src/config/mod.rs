#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CACHE_DIR: &str = ".portfolio-cache";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub health: String,
    pub projects: String,
    pub experience: String,
    pub skills: String,
    pub contact: String,
    pub analytics: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            health: "/api/health".to_string(),
            projects: "/api/content/projects".to_string(),
            experience: "/api/content/experience".to_string(),
            skills: "/api/content/skills".to_string(),
            contact: "/api/contact".to_string(),
            analytics: "/api/analytics/track".to_string(),
        }
    }
}

/// 啟動時讀取一次的功能開關
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// 直接使用內建資料，不發任何請求也不讀快取
    pub use_static_data: bool,
    pub enable_analytics: bool,
    pub environment: String,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            use_static_data: false,
            enable_analytics: false,
            environment: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub auth_token: String,
    pub cached_projects: String,
    pub cached_experience: String,
    pub cached_skills: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            auth_token: "portfolio_auth_token".to_string(),
            cached_projects: "portfolio_cached_projects".to_string(),
            cached_experience: "portfolio_cached_experience".to_string(),
            cached_skills: "portfolio_cached_skills".to_string(),
        }
    }
}

/// 完整且不可變的執行設定。建構完成後傳入各 service，之後不再讀取環境變數。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub endpoints: Endpoints,
    pub features: FeatureFlags,
    pub storage_keys: StorageKeys,
    pub cache_dir: PathBuf,
    pub bundled_dir: Option<PathBuf>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            endpoints: Endpoints::default(),
            features: FeatureFlags::default(),
            storage_keys: StorageKeys::default(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            bundled_dir: None,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

impl PortfolioConfig {
    /// 以 PORTFOLIO_* 環境變數覆蓋設定
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PORTFOLIO_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(timeout) = lookup("PORTFOLIO_API_TIMEOUT_MS") {
            self.request_timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| PortfolioError::InvalidConfigValueError {
                        field: "PORTFOLIO_API_TIMEOUT_MS".to_string(),
                        value: timeout.clone(),
                        reason: "Expected a whole number of milliseconds".to_string(),
                    })?;
        }
        if let Some(flag) = lookup("PORTFOLIO_USE_STATIC_DATA") {
            self.features.use_static_data = parse_flag(&flag);
        }
        if let Some(flag) = lookup("PORTFOLIO_ENABLE_ANALYTICS") {
            self.features.enable_analytics = parse_flag(&flag);
        }
        if let Some(environment) = lookup("PORTFOLIO_ENVIRONMENT") {
            self.features.environment = environment;
        }
        if let Some(dir) = lookup("PORTFOLIO_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PORTFOLIO_BUNDLED_DIR") {
            self.bundled_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

impl Validate for PortfolioConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_base_url)?;
        validation::validate_range("api.timeout_ms", self.request_timeout_ms, 100, 120_000)?;
        validation::validate_path("storage.cache_dir", &self.cache_dir.to_string_lossy())?;

        let endpoints = [
            ("endpoints.health", &self.endpoints.health),
            ("endpoints.projects", &self.endpoints.projects),
            ("endpoints.experience", &self.endpoints.experience),
            ("endpoints.skills", &self.endpoints.skills),
            ("endpoints.contact", &self.endpoints.contact),
            ("endpoints.analytics", &self.endpoints.analytics),
        ];
        for (field, path) in endpoints {
            validation::validate_endpoint_path(field, path)?;
        }

        let keys = [
            ("storage.keys.auth_token", &self.storage_keys.auth_token),
            ("storage.keys.cached_projects", &self.storage_keys.cached_projects),
            ("storage.keys.cached_experience", &self.storage_keys.cached_experience),
            ("storage.keys.cached_skills", &self.storage_keys.cached_skills),
        ];
        for (field, key) in keys {
            validation::validate_non_empty_string(field, key)?;
        }

        Ok(())
    }
}

impl ConfigProvider for PortfolioConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn features(&self) -> &FeatureFlags {
        &self.features
    }

    fn storage_keys(&self) -> &StorageKeys {
        &self.storage_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = PortfolioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoints.projects, "/api/content/projects");
        assert_eq!(config.storage_keys.cached_skills, "portfolio_cached_skills");
        assert!(!config.features.use_static_data);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORTFOLIO_API_BASE_URL", "https://api.example.com"),
            ("PORTFOLIO_API_TIMEOUT_MS", "2500"),
            ("PORTFOLIO_USE_STATIC_DATA", "true"),
            ("PORTFOLIO_ENABLE_ANALYTICS", "0"),
            ("PORTFOLIO_ENVIRONMENT", "production"),
        ]);

        let mut config = PortfolioConfig::default();
        config
            .apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.request_timeout_ms, 2500);
        assert!(config.features.use_static_data);
        assert!(!config.features.enable_analytics);
        assert_eq!(config.features.environment, "production");
    }

    #[test]
    fn test_bad_timeout_override_is_rejected() {
        let mut config = PortfolioConfig::default();
        let result = config.apply_overrides_from(|name| {
            (name == "PORTFOLIO_API_TIMEOUT_MS").then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(PortfolioError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_relative_endpoint() {
        let mut config = PortfolioConfig::default();
        config.endpoints.skills = "api/content/skills".to_string();
        assert!(config.validate().is_err());
    }
}
