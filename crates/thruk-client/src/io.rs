//! HTTP client abstraction for testability

use async_trait::async_trait;

use crate::config::ClientConfig;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, e.g. "Not Found"
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    /// Convert into an error if the status is 400 or above
    pub fn error_for_status(self) -> crate::Result<Self> {
        if self.status >= 400 {
            return Err(self.into_status_error());
        }
        Ok(self)
    }

    /// Convert into an error unless the status is exactly 200
    pub fn require_ok(self) -> crate::Result<Self> {
        if self.status != 200 {
            return Err(self.into_status_error());
        }
        Ok(self)
    }

    fn into_status_error(self) -> crate::ThrukError {
        crate::ThrukError::HttpStatus {
            status: self.status,
            reason: self.reason,
        }
    }
}

/// Abstraction over HTTP client for dependency injection
///
/// Implementations are expected to attach credentials themselves.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request to the given URL
    async fn get(&self, url: &str) -> crate::Result<HttpResponse>;

    /// Send a POST request with an optional JSON body
    async fn post_json(&self, url: &str, body: Option<String>) -> crate::Result<HttpResponse>;

    /// Send a DELETE request to the given URL
    async fn delete(&self, url: &str) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest with basic authentication
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    username: String,
    password: String,
}

impl std::fmt::Debug for ReqwestHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpClient")
            .field("username", &self.username)
            .finish()
    }
}

impl ReqwestHttpClient {
    pub fn new(config: &ClientConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()
            .map_err(|e| crate::ThrukError::Http(format!("Building HTTP client: {}", e)))?;

        if config.insecure_skip_verify {
            tracing::debug!("TLS certificate verification disabled for {}", config.url);
        }

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("{} {}", method, url);
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| crate::ThrukError::Http(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| crate::ThrukError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("{} {} -> {} ({} bytes)", method, url, status.as_u16(), body.len());
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
        self.send("GET", url, self.client.get(url)).await
    }

    async fn post_json(&self, url: &str, body: Option<String>) -> crate::Result<HttpResponse> {
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        self.send("POST", url, request).await
    }

    async fn delete(&self, url: &str) -> crate::Result<HttpResponse> {
        self.send("DELETE", url, self.client.delete(url)).await
    }
}
