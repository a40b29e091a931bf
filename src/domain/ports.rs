use crate::config::{Endpoints, FeatureFlags, StorageKeys};
use crate::domain::model::ApiResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 遠端內容來源。實作必須把所有失敗轉成 `ApiResponse::Failure`，不可 panic 或回傳錯誤。
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn get(&self, endpoint: &str) -> ApiResponse<serde_json::Value>;

    async fn post(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> ApiResponse<serde_json::Value>;
}

/// 同步、字串鍵值的持久化儲存，沒有過期時間
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn endpoints(&self) -> &Endpoints;
    fn features(&self) -> &FeatureFlags;
    fn storage_keys(&self) -> &StorageKeys;
}
