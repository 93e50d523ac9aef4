use crate::domain::model::{HttpMethod, HttpRequestOptions};
use crate::domain::ports::HttpClient;
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// `HttpClient` backed by a shared reqwest connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, options: &HttpRequestOptions) -> Result<Value> {
        let mut request = self
            .client
            .request(to_reqwest_method(options.method), &options.url)
            .timeout(Duration::from_millis(options.timeout_ms));

        for (key, value) in &options.headers {
            request = request.header(key, value);
        }

        tracing::debug!("Making {} request to: {}", options.method.as_str(), options.url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NodeError::TransportError {
                item_index: None,
                message: format!(
                    "Request failed with status code {}: {}",
                    status.as_u16(),
                    body.trim()
                ),
            });
        }

        let text = response.text().await?;
        Ok(Value::String(text))
    }
}
