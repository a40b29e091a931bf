use crate::config::{Endpoints, StorageKeys};
use crate::core::bundled::BundledContent;
use crate::core::fallback::{FallbackResolver, Resolved};
use crate::core::grouping::group_skills_by_category;
use crate::domain::model::{
    sort_by_display_order, ContentRecord, ExperienceEntry, Project, Skill, SkillCategory,
};
use crate::domain::ports::{ConfigProvider, KeyValueStore, RemoteSource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// 各類內容的存取入口。每次呼叫都重新解析，不保留共享的可變狀態。
pub struct ContentService {
    resolver: FallbackResolver,
    remote: Arc<dyn RemoteSource>,
    bundled: BundledContent,
    endpoints: Endpoints,
    keys: StorageKeys,
}

impl ContentService {
    pub fn new<C: ConfigProvider>(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn KeyValueStore>,
        bundled: BundledContent,
        config: &C,
    ) -> Self {
        Self {
            resolver: FallbackResolver::new(remote.clone(), store, config.features()),
            remote,
            bundled,
            endpoints: config.endpoints().clone(),
            keys: config.storage_keys().clone(),
        }
    }

    async fn load_sorted<T>(&self, endpoint: &str, bundled: &[T], cache_key: &str) -> Resolved<Vec<T>>
    where
        T: ContentRecord + Clone + Serialize + DeserializeOwned,
    {
        let resolved = self
            .resolver
            .resolve_with_source(endpoint, bundled.to_vec(), Some(cache_key))
            .await;

        tracing::debug!(
            "📂 {} records from {:?} for {}",
            resolved.value.len(),
            resolved.source,
            endpoint
        );

        Resolved {
            value: sort_by_display_order(resolved.value),
            source: resolved.source,
        }
    }

    pub async fn projects_with_source(&self) -> Resolved<Vec<Project>> {
        self.load_sorted(
            &self.endpoints.projects,
            &self.bundled.projects,
            &self.keys.cached_projects,
        )
        .await
    }

    pub async fn get_projects(&self) -> Vec<Project> {
        self.projects_with_source().await.value
    }

    pub async fn get_project_by_id(&self, id: i64) -> Option<Project> {
        self.get_projects().await.into_iter().find(|p| p.id == id)
    }

    pub async fn get_featured_projects(&self) -> Vec<Project> {
        self.get_projects()
            .await
            .into_iter()
            .filter(|p| p.is_featured)
            .collect()
    }

    pub async fn experience_with_source(&self) -> Resolved<Vec<ExperienceEntry>> {
        self.load_sorted(
            &self.endpoints.experience,
            &self.bundled.experience,
            &self.keys.cached_experience,
        )
        .await
    }

    pub async fn get_experience(&self) -> Vec<ExperienceEntry> {
        self.experience_with_source().await.value
    }

    pub async fn skills_with_source(&self) -> Resolved<Vec<Skill>> {
        self.load_sorted(
            &self.endpoints.skills,
            &self.bundled.skills,
            &self.keys.cached_skills,
        )
        .await
    }

    pub async fn get_skills(&self) -> Vec<Skill> {
        self.skills_with_source().await.value
    }

    pub async fn get_skills_by_category(&self) -> Vec<SkillCategory> {
        group_skills_by_category(&self.get_skills().await)
    }

    /// 不經過 static 模式與快取，直接探測 API
    pub async fn check_api_health(&self) -> bool {
        let healthy = self.remote.get(&self.endpoints.health).await.is_success();
        if healthy {
            tracing::info!("✅ API is healthy");
        } else {
            tracing::warn!("⚠️ API health check failed");
        }
        healthy
    }
}
