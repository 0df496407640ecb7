use anyhow::Result;
use async_trait::async_trait;

use crate::types::{BackendSettings, ServerContentRecord};

/// Content known to one media-server backend, keyed by provider id.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn lookup(&self, provider_id: &str) -> Result<Option<ServerContentRecord>>;
}

/// Per-backend settings source.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn fetch(&self) -> Result<BackendSettings>;
}

// A settings snapshot can stand in for a provider.
#[async_trait]
impl SettingsProvider for BackendSettings {
    async fn fetch(&self) -> Result<BackendSettings> { Ok(self.clone()) }
}
