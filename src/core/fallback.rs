use crate::config::FeatureFlags;
use crate::domain::model::ApiResponse;
use crate::domain::ports::{KeyValueStore, RemoteSource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// 最終提供資料的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// static 模式，直接使用內建資料
    Static,
    Remote,
    Cache,
    Bundled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ContentSource,
}

/// 遠端 → 快取 → 內建資料 的解析策略。任何路徑都會回傳一個值，不會回傳錯誤。
#[derive(Clone)]
pub struct FallbackResolver {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn KeyValueStore>,
    static_mode: bool,
}

impl FallbackResolver {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn KeyValueStore>,
        features: &FeatureFlags,
    ) -> Self {
        Self {
            remote,
            store,
            static_mode: features.use_static_data,
        }
    }

    pub async fn resolve<T>(&self, endpoint: &str, bundled: T, cache_key: Option<&str>) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.resolve_with_source(endpoint, bundled, cache_key)
            .await
            .value
    }

    pub async fn resolve_with_source<T>(
        &self,
        endpoint: &str,
        bundled: T,
        cache_key: Option<&str>,
    ) -> Resolved<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.static_mode {
            tracing::debug!("📦 Static mode, using bundled data for {}", endpoint);
            return Resolved {
                value: bundled,
                source: ContentSource::Static,
            };
        }

        match self.remote.get(endpoint).await.decode::<T>() {
            ApiResponse::Success(value) => {
                tracing::debug!("✅ Loaded data from API: {}", endpoint);
                if let Some(key) = cache_key {
                    self.write_cache(key, &value);
                }
                return Resolved {
                    value,
                    source: ContentSource::Remote,
                };
            }
            ApiResponse::Failure(failure) if failure.is_transport() => {
                tracing::warn!("⚠️ Failed to reach API for {}: {}", endpoint, failure);
            }
            ApiResponse::Failure(failure) => {
                tracing::warn!("⚠️ API error for {}: {}", endpoint, failure);
            }
        }

        if let Some(key) = cache_key {
            if let Some(value) = self.read_cache(key) {
                tracing::info!("📦 Using cached data for {}", endpoint);
                return Resolved {
                    value,
                    source: ContentSource::Cache,
                };
            }
        }

        tracing::info!("📦 Using bundled data for {}", endpoint);
        Resolved {
            value: bundled,
            source: ContentSource::Bundled,
        }
    }

    /// 快取寫入失敗只記錄，不影響回傳值
    fn write_cache<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::warn!("⚠️ Could not serialize value for cache '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &serialized) {
            tracing::warn!("⚠️ Could not write cache '{}': {}", key, e);
        }
    }

    /// 讀不到或無法反序列化的快取都視為不存在
    fn read_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("⚠️ Could not read cache '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring corrupted cache entry '{}': {}", key, e);
                None
            }
        }
    }
}
