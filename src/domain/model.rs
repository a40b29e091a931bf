use crate::utils::error::FetchFailure;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// 所有內容記錄共用的排序介面
pub trait ContentRecord {
    fn display_order(&self) -> i32;
}

/// 欄位缺少或為 null 時都使用預設值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 依 display_order 升冪排序；相同值保持原本順序
pub fn sort_by_display_order<T: ContentRecord>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_key(|r| r.display_order());
    records
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ContentRecord for Project {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: NaiveDate,
    /// 目前任職中則為 None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_current: bool,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ContentRecord for ExperienceEntry {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<String>,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ContentRecord for Skill {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

/// 依 category 分組後的技能，不做持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactAck {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    PageView,
    ResumeDownload,
    ProjectClick,
    ContactSubmit,
}

impl AnalyticsEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventType::PageView => "page_view",
            AnalyticsEventType::ResumeDownload => "resume_download",
            AnalyticsEventType::ProjectClick => "project_click",
            AnalyticsEventType::ContactSubmit => "contact_submit",
        }
    }
}

pub type EventData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_type: AnalyticsEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<EventData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    pub created_at: String,
}

/// 遠端呼叫的兩種終態
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(FetchFailure),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure(failure) => Some(failure),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// 把 JSON 轉成指定型別；形狀不符視為 Malformed
    pub fn decode<T: DeserializeOwned>(self) -> ApiResponse<T> {
        match self {
            ApiResponse::Success(value) => match serde_json::from_value(value) {
                Ok(data) => ApiResponse::Success(data),
                Err(e) => ApiResponse::Failure(FetchFailure::Malformed(e.to_string())),
            },
            ApiResponse::Failure(failure) => ApiResponse::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: i64, order: i32) -> Skill {
        Skill {
            id,
            name: format!("skill-{}", id),
            category: "Tools".to_string(),
            proficiency_level: None,
            display_order: order,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_sort_by_display_order_is_stable() {
        let sorted = sort_by_display_order(vec![skill(1, 3), skill(2, 1), skill(3, 1), skill(4, 2)]);
        let ids: Vec<i64> = sorted.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_experience_dates_parse_from_iso() {
        let entry: ExperienceEntry = serde_json::from_value(serde_json::json!({
            "id": 1,
            "company": "Acme",
            "position": "Engineer",
            "location": "Remote",
            "start_date": "2023-06-01",
            "is_current": true,
            "description": "Builds things",
            "display_order": 1
        }))
        .unwrap();

        assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert!(entry.end_date.is_none());
        assert!(entry.achievements.is_empty());
    }

    #[test]
    fn test_null_lists_and_flags_become_defaults() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "T",
            "subtitle": "S",
            "description": "D",
            "tech_stack": null,
            "is_featured": null,
            "display_order": 1
        }))
        .unwrap();

        assert!(project.tech_stack.is_empty());
        assert!(!project.is_featured);
    }

    #[test]
    fn test_decode_wrong_shape_is_malformed() {
        let response = ApiResponse::Success(serde_json::json!({"items": []}));
        let decoded: ApiResponse<Vec<Skill>> = response.decode();
        assert!(matches!(decoded, ApiResponse::Failure(FetchFailure::Malformed(_))));
    }

    #[test]
    fn test_analytics_event_type_serializes_snake_case() {
        let value = serde_json::to_value(AnalyticsEventType::ResumeDownload).unwrap();
        assert_eq!(value, serde_json::json!("resume_download"));
        assert_eq!(AnalyticsEventType::ProjectClick.as_str(), "project_click");
    }
}
