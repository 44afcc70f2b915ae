//! Thruk configuration API client

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::object::{CheckResult, ConfigObject, CreateResponse, ReloadResult};
use crate::views::ConfigView;
use crate::{Result, ThrukError};

/// Client for the configuration endpoints of one Thruk site
///
/// Every operation is a single request; nothing is cached between calls.
#[derive(Clone)]
pub struct ThrukClient {
    config_root: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ThrukClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrukClient")
            .field("config_root", &self.config_root)
            .finish()
    }
}

impl ThrukClient {
    /// Create a client using reqwest with the configured credentials and TLS policy
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = Arc::new(ReqwestHttpClient::new(config)?);
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client on top of a custom transport
    pub fn with_http_client(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        let config_root = config.config_root();
        tracing::debug!("Created ThrukClient for {}", config_root);
        Self { config_root, http }
    }

    fn objects_url(&self) -> Result<reqwest::Url> {
        let url = format!("{}/objects", self.config_root);
        reqwest::Url::parse(&url)
            .map_err(|e| ThrukError::Config(format!("Invalid API URL {}: {}", url, e)))
    }

    /// Objects collection URL with an encoded query filter
    fn filter_url(&self, filter: &[(&str, &str)]) -> Result<String> {
        let mut url = self.objects_url()?;
        url.query_pairs_mut().extend_pairs(filter);
        Ok(url.into())
    }

    /// URL of a single object, the id encoded as one path segment
    fn object_url(&self, id: &str) -> Result<String> {
        let mut url = self.objects_url()?;
        let root = &self.config_root;
        url.path_segments_mut()
            .map_err(|_| ThrukError::Config(format!("{} cannot take a path", root)))?
            .push(id);
        Ok(url.into())
    }

    /// Fetch any configuration object by id
    pub async fn fetch_object(&self, id: &str) -> Result<ConfigObject> {
        check_id(id)?;
        let url = self.filter_url(&[(":ID", id)])?;
        self.lookup(&url, id).await
    }

    /// Fetch an object by id, filtered to the view's type
    pub async fn fetch<V: ConfigView>(&self, id: &str) -> Result<V> {
        check_id(id)?;
        let url = self.filter_url(&[(":TYPE", V::KIND.as_str()), (":ID", id)])?;
        let object = self.lookup(&url, id).await?;
        Ok(V::from(object))
    }

    async fn lookup(&self, url: &str, id: &str) -> Result<ConfigObject> {
        let response = self.http.get(url).await?.error_for_status()?;
        let objects: Vec<ConfigObject> = serde_json::from_str(&response.body)?;

        if objects.len() > 1 {
            tracing::debug!("{} objects match id {}, using the first", objects.len(), id);
        }
        objects
            .into_iter()
            .next()
            .ok_or_else(|| ThrukError::ObjectNotFound { id: id.to_string() })
    }

    /// Create an object and return the id the server assigned to it
    pub async fn create_object(&self, object: &ConfigObject) -> Result<String> {
        let missing = object.missing_identity();
        if !missing.is_empty() {
            return Err(ThrukError::MissingRequiredFields(missing.join(", ")));
        }

        let body = serde_json::to_string(object)?;
        let url = format!("{}/", self.objects_url()?);
        let response = self
            .http
            .post_json(&url, Some(body))
            .await?
            .error_for_status()?;

        let created: CreateResponse = serde_json::from_str(&response.body)?;
        if created.count != created.objects.len() as u64 {
            tracing::debug!(
                "Server counted {} created objects but returned {}",
                created.count,
                created.objects.len()
            );
        }
        let first = created
            .objects
            .into_iter()
            .next()
            .ok_or(ThrukError::ObjectNotCreated {
                message: created.message,
            })?;
        let id = first
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ThrukError::InvalidResponse("created object has no id".to_string()))?;

        tracing::debug!("Created {} object {} in {}", object.object_type, id, object.file);
        Ok(id)
    }

    /// Create an object from a typed view
    pub async fn create<V: ConfigView>(&self, view: V) -> Result<String> {
        let missing = view.missing_fields();
        if !missing.is_empty() {
            return Err(ThrukError::MissingRequiredFields(missing.join(", ")));
        }
        tracing::debug!("Creating {} in {}", V::KIND, view.meta().file);
        let object: ConfigObject = view.into();
        self.create_object(&object).await
    }

    /// Delete an object by id
    ///
    /// No existence check is made; the server decides what deleting an
    /// unknown id means.
    pub async fn delete(&self, id: &str) -> Result<()> {
        check_id(id)?;
        let url = self.object_url(id)?;
        self.http.delete(&url).await?.error_for_status()?;
        tracing::debug!("Deleted object {}", id);
        Ok(())
    }

    /// Drop staged changes that have not been saved
    pub async fn discard(&self) -> Result<()> {
        self.lifecycle("discard").await.map(|_| ())
    }

    /// Write staged changes to the config files
    pub async fn save(&self) -> Result<()> {
        self.lifecycle("save").await.map(|_| ())
    }

    /// Activate the saved configuration on every peer
    pub async fn reload(&self) -> Result<Vec<ReloadResult>> {
        let body = self.lifecycle("reload").await?;
        let results: Vec<ReloadResult> = serde_json::from_str(&body)?;

        if let Some(failed) = results.iter().find(|r| r.failed) {
            return Err(ThrukError::ReloadFailed {
                peer_key: failed.peer_key.clone(),
                output: failed.output.clone(),
            });
        }
        Ok(results)
    }

    /// Run the configuration check and return the raw per-peer results
    pub async fn check_report(&self) -> Result<Vec<CheckResult>> {
        let body = self.lifecycle("check").await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Whether the configuration check passes
    ///
    /// Any failure to run the check also yields `false`; use
    /// [`ThrukClient::check_report`] to tell the two apart.
    pub async fn validate(&self) -> bool {
        match self.check_report().await {
            Ok(results) => {
                for result in results.iter().filter(|r| r.failed) {
                    tracing::debug!("Config check failed: {}", result.output);
                }
                !results.iter().any(|r| r.failed)
            }
            Err(e) => {
                tracing::warn!("Config check could not be evaluated: {}", e);
                false
            }
        }
    }

    async fn lifecycle(&self, action: &str) -> Result<String> {
        let url = format!("{}/{}", self.config_root, action);
        let response = self.http.post_json(&url, None).await?.require_ok()?;
        tracing::debug!("Config {} done", action);
        Ok(response.body)
    }
}

/// Reject ids that are empty or would address a different path
fn check_id(id: &str) -> Result<()> {
    match id {
        "" => Err(ThrukError::InvalidInput("id must not be empty".to_string())),
        "." | ".." => Err(ThrukError::InvalidInput(format!("invalid id {:?}", id))),
        _ => Ok(()),
    }
}
