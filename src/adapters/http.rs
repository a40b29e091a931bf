use crate::domain::model::ApiResponse;
use crate::domain::ports::{ConfigProvider, KeyValueStore, RemoteSource};
use crate::utils::error::{FetchFailure, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// 以 reqwest 實作的遠端來源：固定逾時，所有失敗都轉成 `ApiResponse::Failure`
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn KeyValueStore>,
    auth_token_key: String,
}

impl HttpTransport {
    pub fn new<C: ConfigProvider>(config: &C, credentials: Arc<dyn KeyValueStore>) -> Result<Self> {
        let timeout = config.request_timeout();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            timeout,
            credentials,
            auth_token_key: config.storage_keys().auth_token.clone(),
        })
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn auth_token(&self) -> Option<String> {
        match self.credentials.get(&self.auth_token_key) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::debug!("Could not read auth token: {}", e);
                None
            }
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn classify(&self, error: &reqwest::Error) -> FetchFailure {
        if error.is_timeout() {
            FetchFailure::Timeout(self.timeout)
        } else if error.is_decode() {
            FetchFailure::Malformed(error.to_string())
        } else {
            FetchFailure::Network(error.to_string())
        }
    }

    async fn execute(&self, method: &str, url: &str, request: RequestBuilder) -> ApiResponse<serde_json::Value> {
        tracing::debug!("🚀 API Request: {} {}", method, url);

        let response = match self.authorize(request).send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = self.classify(&e);
                tracing::debug!("❌ API Error: {} {}", url, failure);
                return ApiResponse::Failure(failure);
            }
        };

        let status = response.status();
        tracing::debug!("✅ API Response: {} {}", url, status);

        if !status.is_success() {
            // 伺服器回傳錯誤時，優先使用 body 中的 message 欄位
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| "Server error occurred".to_string()),
                Err(_) => "Server error occurred".to_string(),
            };
            return ApiResponse::Failure(FetchFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return ApiResponse::Failure(self.classify(&e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => ApiResponse::Success(value),
            Err(e) => ApiResponse::Failure(FetchFailure::Malformed(e.to_string())),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpTransport {
    async fn get(&self, endpoint: &str) -> ApiResponse<serde_json::Value> {
        let url = self.url_for(endpoint);
        let request = self.client.get(&url);
        self.execute("GET", &url, request).await
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> ApiResponse<serde_json::Value> {
        let url = self.url_for(endpoint);
        let request = self.client.post(&url).json(body);
        self.execute("POST", &url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::config::PortfolioConfig;
    use httpmock::prelude::*;

    fn transport_for(base_url: String, store: Arc<MemoryStore>) -> HttpTransport {
        let config = PortfolioConfig {
            api_base_url: base_url,
            request_timeout_ms: 500,
            ..PortfolioConfig::default()
        };
        HttpTransport::new(&config, store).unwrap()
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let transport = transport_for("http://localhost:8000/".to_string(), Arc::new(MemoryStore::new()));
        assert_eq!(
            transport.url_for("/api/health"),
            "http://localhost:8000/api/health"
        );
        assert_eq!(
            transport.url_for("api/health"),
            "http://localhost:8000/api/health"
        );
    }

    #[tokio::test]
    async fn test_get_success_returns_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": "healthy"}));
        });

        let transport = transport_for(server.base_url(), Arc::new(MemoryStore::new()));
        let response = transport.get("/api/health").await;

        api_mock.assert();
        assert_eq!(
            response.into_data(),
            Some(serde_json::json!({"status": "healthy"}))
        );
    }

    #[tokio::test]
    async fn test_error_status_uses_body_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/content/projects");
            then.status(503)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"message": "maintenance"}));
        });

        let transport = transport_for(server.base_url(), Arc::new(MemoryStore::new()));
        let response = transport.get("/api/content/projects").await;

        assert_eq!(
            response.failure(),
            Some(&FetchFailure::Status {
                status: 503,
                message: "maintenance".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/content/skills");
            then.status(200).body("<html>not json</html>");
        });

        let transport = transport_for(server.base_url(), Arc::new(MemoryStore::new()));
        let response = transport.get("/api/content/skills").await;

        assert!(matches!(
            response.failure(),
            Some(FetchFailure::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/contact")
                .header("Authorization", "Bearer secret-token");
            then.status(200).json_body(serde_json::json!({"message": "ok"}));
        });

        let store = Arc::new(MemoryStore::new());
        store.set("portfolio_auth_token", "secret-token").unwrap();

        let transport = transport_for(server.base_url(), store);
        let response = transport
            .post("/api/contact", &serde_json::json!({"name": "x"}))
            .await;

        api_mock.assert();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // 保留一個埠後立即釋放，確保沒有服務在監聽
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = transport_for(format!("http://{}", addr), Arc::new(MemoryStore::new()));
        let response = transport.get("/api/health").await;

        assert!(response.failure().unwrap().is_transport());
    }
}
