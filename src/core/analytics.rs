use crate::domain::model::{AnalyticsEvent, AnalyticsEventType, EventData};
use crate::domain::ports::{ConfigProvider, RemoteSource};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 盡力而為的事件追蹤：失敗只記錄 warn，永遠不回報給呼叫端
#[derive(Clone)]
pub struct AnalyticsTracker {
    remote: Arc<dyn RemoteSource>,
    endpoint: String,
    enabled: bool,
    referrer: Option<String>,
}

impl AnalyticsTracker {
    pub fn new<C: ConfigProvider>(remote: Arc<dyn RemoteSource>, config: &C) -> Self {
        Self {
            remote,
            endpoint: config.endpoints().analytics.clone(),
            enabled: config.features().enable_analytics,
            referrer: None,
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn track_event(&self, event_type: AnalyticsEventType, event_data: Option<EventData>) {
        if !self.enabled {
            tracing::debug!("📊 Analytics disabled, skipping event: {}", event_type.as_str());
            return;
        }

        let event = AnalyticsEvent {
            event_type,
            event_data,
            referrer: self.referrer.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let body = match serde_json::to_value(&event) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("⚠️ Failed to encode analytics event: {}", e);
                return;
            }
        };

        match self.remote.post(&self.endpoint, &body).await.failure() {
            None => tracing::debug!("📊 Analytics event tracked: {}", event_type.as_str()),
            Some(failure) => {
                tracing::warn!("⚠️ Failed to track analytics event: {}", failure)
            }
        }
    }

    /// 需要在 tokio runtime 內呼叫；沒有 runtime 時略過事件並回傳 None
    fn spawn(
        &self,
        event_type: AnalyticsEventType,
        event_data: EventData,
    ) -> Option<JoinHandle<()>> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let tracker = self.clone();
                Some(handle.spawn(async move {
                    tracker.track_event(event_type, Some(event_data)).await
                }))
            }
            Err(_) => {
                tracing::debug!(
                    "📊 No async runtime, dropping analytics event: {}",
                    event_type.as_str()
                );
                None
            }
        }
    }

    pub fn track_page_view(&self, page: &str) -> Option<JoinHandle<()>> {
        self.spawn(AnalyticsEventType::PageView, data(json!({ "page": page })))
    }

    pub fn track_resume_download(&self) -> Option<JoinHandle<()>> {
        self.spawn(
            AnalyticsEventType::ResumeDownload,
            data(json!({ "timestamp": chrono::Utc::now().timestamp_millis() })),
        )
    }

    pub fn track_project_click(
        &self,
        project_id: i64,
        project_title: &str,
    ) -> Option<JoinHandle<()>> {
        self.spawn(
            AnalyticsEventType::ProjectClick,
            data(json!({ "project_id": project_id, "project_title": project_title })),
        )
    }

    pub fn track_contact_submit(&self) -> Option<JoinHandle<()>> {
        self.spawn(
            AnalyticsEventType::ContactSubmit,
            data(json!({ "timestamp": chrono::Utc::now().timestamp_millis() })),
        )
    }
}

fn data(value: serde_json::Value) -> EventData {
    match value {
        serde_json::Value::Object(map) => map,
        _ => EventData::new(),
    }
}
