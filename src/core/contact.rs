use crate::domain::model::{ApiResponse, ContactAck, ContactForm};
use crate::domain::ports::{ConfigProvider, RemoteSource};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{is_valid_email, validate_length, Validate};
use regex::Regex;
use std::sync::{Arc, LazyLock};

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 100;
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MAX_LENGTH: usize = 1000;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern is valid"));

impl Validate for ContactForm {
    fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PortfolioError::validation("name", "Name is required"));
        }
        validate_length("name", "Name", name, NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;
        if !NAME_PATTERN.is_match(name) {
            return Err(PortfolioError::validation(
                "name",
                "Name can only contain letters and spaces",
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(PortfolioError::validation("email", "Email is required"));
        }
        if !is_valid_email(email) {
            return Err(PortfolioError::validation(
                "email",
                "Please enter a valid email address",
            ));
        }

        let message = self.message.trim();
        if message.is_empty() {
            return Err(PortfolioError::validation("message", "Message is required"));
        }
        validate_length(
            "message",
            "Message",
            message,
            MESSAGE_MIN_LENGTH,
            MESSAGE_MAX_LENGTH,
        )?;

        Ok(())
    }
}

/// 聯絡表單送出。驗證失敗直接回傳錯誤，不會發出請求；送出失敗不自動重試。
pub struct ContactService {
    remote: Arc<dyn RemoteSource>,
    endpoint: String,
}

impl ContactService {
    pub fn new<C: ConfigProvider>(remote: Arc<dyn RemoteSource>, config: &C) -> Self {
        Self {
            remote,
            endpoint: config.endpoints().contact.clone(),
        }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<ApiResponse<ContactAck>> {
        form.validate()?;

        let payload = ContactForm {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
        };
        let body = serde_json::to_value(&payload)?;

        let response = self.remote.post(&self.endpoint, &body).await.decode::<ContactAck>();
        match &response {
            ApiResponse::Success(_) => tracing::info!("✅ Contact form submitted successfully"),
            ApiResponse::Failure(failure) => {
                tracing::error!("❌ Contact form submission failed: {}", failure)
            }
        }
        Ok(response)
    }
}
