use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::backend::BackendKind;
use crate::links;
use crate::rules::SearchRule;
use crate::storage::{ContentRepository, SettingsProvider};
use crate::types::{RuleOutcome, SearchResult};

/// Marks a search result available when the backend already has it and links into the web client.
pub struct AvailabilityRule {
    kind: BackendKind,
    content: Arc<dyn ContentRepository>,
    settings: Arc<dyn SettingsProvider>,
}

impl AvailabilityRule {
    pub fn new(kind: BackendKind, content: Arc<dyn ContentRepository>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self { kind, content, settings }
    }
}

#[async_trait]
impl SearchRule for AvailabilityRule {
    fn name(&self) -> String { format!("{}-availability", self.kind) }

    async fn execute(&self, result: &mut SearchResult) -> Result<RuleOutcome> {
        let Some(record) = self.content.lookup(&result.provider_id).await? else {
            debug!(backend = %self.kind, provider_id = %result.provider_id, "not on server");
            result.available = false;
            result.set_deep_link(self.kind, None);
            return Ok(RuleOutcome::success());
        };
        result.available = true;
        if result.title.is_none() { result.title = record.title.clone(); }

        let settings = self.settings.fetch().await?;
        // Records synced without an item id can't be linked to.
        let url = record.item_id.as_deref().map(|item_id| links::deep_link(self.kind, &settings.servers, item_id));
        debug!(backend = %self.kind, provider_id = %result.provider_id, url = ?url, "available");
        result.set_deep_link(self.kind, url);
        Ok(RuleOutcome::success())
    }
}
