use crate::domain::model::{ExperienceEntry, Project, Skill};
use crate::utils::error::{PortfolioError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

const EMBEDDED_PROJECTS: &str = include_str!("../data/projects.json");
const EMBEDDED_EXPERIENCE: &str = include_str!("../data/experience.json");
const EMBEDDED_SKILLS: &str = include_str!("../data/skills.json");

/// 隨程式發佈的內建資料，啟動時載入一次，作為最後的備援
#[derive(Debug, Clone, PartialEq)]
pub struct BundledContent {
    pub projects: Vec<Project>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<Skill>,
}

fn parse<T: DeserializeOwned>(source_name: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| PortfolioError::BundledDataError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

impl BundledContent {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            projects: parse("projects.json", EMBEDDED_PROJECTS)?,
            experience: parse("experience.json", EMBEDDED_EXPERIENCE)?,
            skills: parse("skills.json", EMBEDDED_SKILLS)?,
        })
    }

    /// 從目錄讀取 projects.json / experience.json / skills.json
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| -> Result<String> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| PortfolioError::BundledDataError {
                source_name: path.display().to_string(),
                message: e.to_string(),
            })
        };

        let content = Self {
            projects: parse("projects.json", &read("projects.json")?)?,
            experience: parse("experience.json", &read("experience.json")?)?,
            skills: parse("skills.json", &read("skills.json")?)?,
        };

        tracing::info!(
            "📦 Loaded bundled data from {} ({} projects, {} experience, {} skills)",
            dir.display(),
            content.projects.len(),
            content.experience.len(),
            content.skills.len()
        );
        Ok(content)
    }

    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }
}
