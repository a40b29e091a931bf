use crate::config::{Endpoints, FeatureFlags, PortfolioConfig, StorageKeys};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub cache_dir: Option<String>,
    pub bundled_dir: Option<String>,
    #[serde(default)]
    pub keys: StorageKeys,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortfolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_HOST})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PortfolioError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把檔案內容疊加到預設值上
    pub fn into_portfolio_config(self) -> PortfolioConfig {
        let defaults = PortfolioConfig::default();

        PortfolioConfig {
            api_base_url: self.api.base_url.unwrap_or(defaults.api_base_url),
            request_timeout_ms: self.api.timeout_ms.unwrap_or(defaults.request_timeout_ms),
            endpoints: self.endpoints,
            features: self.features,
            storage_keys: self.storage.keys,
            cache_dir: self
                .storage
                .cache_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            bundled_dir: self.storage.bundled_dir.map(PathBuf::from),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_portfolio_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
timeout_ms = 5000

[endpoints]
projects = "/v2/projects"

[features]
use_static_data = true
enable_analytics = true
environment = "production"

[storage]
cache_dir = "/tmp/portfolio"

[storage.keys]
cached_projects = "projects_v2"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_portfolio_config();

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.endpoints.projects, "/v2/projects");
        // 未指定的端點使用預設值
        assert_eq!(config.endpoints.skills, "/api/content/skills");
        assert!(config.features.use_static_data);
        assert!(config.features.enable_analytics);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/portfolio"));
        assert_eq!(config.storage_keys.cached_projects, "projects_v2");
        assert_eq!(config.storage_keys.auth_token, "portfolio_auth_token");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap().into_portfolio_config();
        assert_eq!(config, PortfolioConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PORTFOLIO_TOML_TEST_HOST", "https://test.api.com");

        let toml_content = r#"
[api]
base_url = "${PORTFOLIO_TOML_TEST_HOST}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://test.api.com"));

        std::env::remove_var("PORTFOLIO_TOML_TEST_HOST");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[api\nbase_url = 1");
        assert!(matches!(
            result,
            Err(PortfolioError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://file.example.com"

[features]
enable_analytics = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://file.example.com"));
        assert!(config.features.enable_analytics);
        assert!(!config.features.use_static_data);
    }
}
