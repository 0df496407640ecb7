pub mod backend;
pub mod config;
pub mod dao;
pub mod db;
pub mod links;
pub mod rules;
pub mod storage;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::backend::BackendKind;
    pub use crate::rules::{AvailabilityRule, RuleSet, SearchRule};
    pub use crate::storage::{ContentRepository, SettingsProvider};
    pub use crate::types::{BackendSettings, RuleOutcome, SearchResult, ServerConnectionDescriptor, ServerContentRecord};
    pub use crate::ReelCheck;
}

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::backend::BackendKind;
use crate::db::{Database, SqlContentRepository, SqlSettingsProvider};
use crate::rules::{AvailabilityRule, RuleSet};
use crate::types::{BackendSettings, RuleOutcome, SearchResult, ServerConnectionDescriptor, ServerContentRecord};

/// Async library entry point. Owns the database and the availability rules wired against it.
pub struct ReelCheck {
    db: Database,
    rules: RuleSet,
}

impl ReelCheck {
    /// Connect with availability rules for every backend.
    pub async fn connect(database_url: Option<&str>, run_migrations: bool) -> Result<Self> {
        Self::connect_with_backends(database_url, run_migrations, &BackendKind::ALL).await
    }

    /// Connect and wire one availability rule per entry of `backends`, in that order.
    pub async fn connect_with_backends(database_url: Option<&str>, run_migrations: bool, backends: &[BackendKind]) -> Result<Self> {
        let db = Database::open(database_url, run_migrations).await?;
        let mut rules = RuleSet::new();
        for &kind in backends {
            let content = Arc::new(SqlContentRepository::new(db.clone(), kind));
            let settings = Arc::new(SqlSettingsProvider::new(db.clone(), kind));
            rules.push(Arc::new(AvailabilityRule::new(kind, content, settings)));
        }
        info!(rules = ?rules.names(), "rules ready");
        Ok(Self { db, rules })
    }

    pub fn rules(&self) -> &RuleSet { &self.rules }

    /// Run every rule against one search result.
    pub async fn check(&self, result: &mut SearchResult) -> Result<Vec<RuleOutcome>> {
        self.rules.execute(result).await
    }

    /// Run every rule against many search results concurrently.
    pub async fn check_many(&self, results: &mut [SearchResult]) -> Result<Vec<Vec<RuleOutcome>>> {
        self.rules.execute_all(results).await
    }

    // --- settings ---

    pub async fn settings(&self, kind: BackendKind) -> Result<BackendSettings> {
        Ok(dao::get_settings(self.db.pool(), kind).await?.unwrap_or_default())
    }

    pub async fn save_settings(&self, kind: BackendKind, settings: &BackendSettings) -> Result<()> {
        dao::put_settings(self.db.pool(), kind, settings).await
    }

    pub async fn set_enabled(&self, kind: BackendKind, enabled: bool) -> Result<()> {
        let mut s = self.settings(kind).await?;
        s.enabled = enabled;
        self.save_settings(kind, &s).await
    }

    /// Append a server. Non-empty hostnames must parse as absolute URLs.
    pub async fn add_server(&self, kind: BackendKind, server: ServerConnectionDescriptor) -> Result<()> {
        let host = server.hostname.trim();
        if !host.is_empty() {
            Url::parse(host).map_err(|e| anyhow!("invalid hostname `{}`: {}", host, e))?;
        }
        let mut s = self.settings(kind).await?;
        s.servers.push(ServerConnectionDescriptor { hostname: host.to_string(), ..server });
        self.save_settings(kind, &s).await?;
        info!(backend = %kind, servers = s.servers.len(), "server added");
        Ok(())
    }

    // --- content ---

    pub async fn add_content(&self, kind: BackendKind, record: &ServerContentRecord) -> Result<()> {
        dao::upsert_content(self.db.pool(), kind, record).await
    }

    pub async fn remove_content(&self, kind: BackendKind, provider_id: &str) -> Result<u64> {
        dao::delete_content(self.db.pool(), kind, provider_id).await
    }

    pub async fn list_content(&self, kind: BackendKind) -> Result<Vec<ServerContentRecord>> {
        dao::list_content(self.db.pool(), kind).await
    }
}
