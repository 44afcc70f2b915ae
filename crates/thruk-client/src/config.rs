//! Connection settings for the Thruk configuration client

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection parameters for a Thruk site
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Thruk server, e.g. `https://monitoring.example.com`
    pub url: String,
    /// Site name, the first path segment of every API call
    pub site: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Path of the REST API below the site, without surrounding slashes
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// Accept invalid TLS certificates (self-signed test sites)
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Overall timeout applied to every request
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_path", &self.api_path)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(
        url: impl Into<String>,
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            site: site.into(),
            username: username.into(),
            password: password.into(),
            api_path: default_api_path(),
            insecure_skip_verify: false,
            timeout: default_timeout(),
        }
    }

    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the settings can address a site
    pub fn validate(&self) -> crate::Result<()> {
        if self.url.trim().is_empty() {
            return Err(crate::ThrukError::Config("url must not be empty".to_string()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(crate::ThrukError::Config(format!(
                "url must start with http:// or https://, got {:?}",
                self.url
            )));
        }
        if self.site.trim().is_empty() {
            return Err(crate::ThrukError::Config(
                "site must not be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(crate::ThrukError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Root of the configuration API, e.g. `https://host/demo/thruk/r/config`
    pub fn config_root(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let site = self.site.trim_matches('/');
        let api_path = self.api_path.trim_matches('/');
        if api_path.is_empty() {
            format!("{}/{}/config", base, site)
        } else {
            format!("{}/{}/{}/config", base, site, api_path)
        }
    }
}

fn default_api_path() -> String {
    "thruk/r".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}

/// Load client settings from a JSON file
pub fn load_config(path: &Path) -> crate::Result<ClientConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::ThrukError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: ClientConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
