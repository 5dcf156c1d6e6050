use crate::error::RepositoryError;
use crate::repositories::KeyValueStore;
use std::sync::Arc;

/// Fixed slot holding the webhook endpoint
pub const WEBHOOK_URL_KEY: &str = "bettrackr_webhook_url";

/// Repository for the single user-configured setting
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    /// Create a new SettingsRepository
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Configured webhook URL, if any non-blank value is stored
    pub async fn webhook_url(&self) -> Result<Option<String>, RepositoryError> {
        let url = self.store.get(WEBHOOK_URL_KEY).await?;
        Ok(url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()))
    }

    /// Store the webhook URL, which must be an http(s) address
    pub async fn set_webhook_url(&self, url: &str) -> Result<(), RepositoryError> {
        let url = url.trim();
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| RepositoryError::InvalidInput(format!("Invalid webhook URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RepositoryError::InvalidInput(format!(
                "Webhook URL must use http or https, got {}",
                parsed.scheme()
            )));
        }

        self.store.set(WEBHOOK_URL_KEY, url).await
    }

    pub async fn clear_webhook_url(&self) -> Result<(), RepositoryError> {
        self.store.remove(WEBHOOK_URL_KEY).await
    }
}
