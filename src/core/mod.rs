pub mod analytics;
pub mod bundled;
pub mod contact;
pub mod content;
pub mod fallback;
pub mod grouping;

pub use crate::domain::model::{
    ApiResponse, ContactAck, ContactForm, ExperienceEntry, Project, Skill, SkillCategory,
};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore, RemoteSource};
pub use crate::utils::error::Result;
