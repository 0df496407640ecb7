pub mod availability;

pub use availability::AvailabilityRule;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::try_join_all;

use crate::types::{RuleOutcome, SearchResult};

/// One evaluation step over a search result.
#[async_trait]
pub trait SearchRule: Send + Sync {
    fn name(&self) -> String;
    async fn execute(&self, result: &mut SearchResult) -> Result<RuleOutcome>;
}

/// Ordered set of search rules.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn SearchRule>>,
}

impl RuleSet {
    pub fn new() -> Self { Self::default() }

    pub fn with_rule(mut self, rule: Arc<dyn SearchRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: Arc<dyn SearchRule>) { self.rules.push(rule); }

    pub fn names(&self) -> Vec<String> { self.rules.iter().map(|r| r.name()).collect() }

    /// Runs every rule in order. The first collaborator fault aborts the run.
    /// The result ends up available if any rule found it.
    pub async fn execute(&self, result: &mut SearchResult) -> Result<Vec<RuleOutcome>> {
        let mut outcomes = Vec::with_capacity(self.rules.len());
        let mut available = false;
        for rule in &self.rules {
            outcomes.push(rule.execute(result).await?);
            available |= result.available;
        }
        result.available = available;
        Ok(outcomes)
    }

    /// Evaluates independent results concurrently.
    pub async fn execute_all(&self, results: &mut [SearchResult]) -> Result<Vec<Vec<RuleOutcome>>> {
        try_join_all(results.iter_mut().map(|r| self.execute(r))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::storage::ContentRepository;
    use crate::types::{BackendSettings, ServerContentRecord};

    struct OnlyIds(Vec<&'static str>);

    #[async_trait]
    impl ContentRepository for OnlyIds {
        async fn lookup(&self, provider_id: &str) -> Result<Option<ServerContentRecord>> {
            Ok(self.0.iter().find(|id| **id == provider_id).map(|id| ServerContentRecord {
                provider_id: id.to_string(),
                item_id: Some(format!("item-{}", id)),
                title: None,
            }))
        }
    }

    fn availability(kind: BackendKind, ids: Vec<&'static str>) -> Arc<dyn SearchRule> {
        Arc::new(AvailabilityRule::new(kind, Arc::new(OnlyIds(ids)), Arc::new(BackendSettings::default())))
    }

    #[tokio::test]
    async fn both_backends_annotate_one_result() {
        let set = RuleSet::new()
            .with_rule(availability(BackendKind::Emby, vec!["1"]))
            .with_rule(availability(BackendKind::Jellyfin, vec!["1"]));
        assert_eq!(set.names(), vec!["emby-availability", "jellyfin-availability"]);

        let mut search = SearchResult::new("1");
        let outcomes = set.execute(&mut search).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.success));
        assert!(search.available);
        assert!(search.emby_url.as_deref().unwrap().contains("id=item-1"));
        assert!(search.jellyfin_url.as_deref().unwrap().starts_with("http://localhost:8096/"));
    }

    #[tokio::test]
    async fn later_miss_keeps_earlier_match() {
        let set = RuleSet::new()
            .with_rule(availability(BackendKind::Emby, vec!["1"]))
            .with_rule(availability(BackendKind::Jellyfin, vec![]));
        let mut search = SearchResult::new("1");
        set.execute(&mut search).await.unwrap();
        assert!(search.available);
        assert_eq!(search.jellyfin_url, None);
    }

    #[tokio::test]
    async fn earlier_miss_does_not_hide_later_match() {
        let set = RuleSet::new()
            .with_rule(availability(BackendKind::Emby, vec![]))
            .with_rule(availability(BackendKind::Jellyfin, vec!["1"]));
        let mut search = SearchResult::new("1");
        set.execute(&mut search).await.unwrap();
        assert!(search.available);
        assert_eq!(search.emby_url, None);
        assert!(search.jellyfin_url.is_some());
    }

    #[tokio::test]
    async fn stale_input_is_reset_when_no_backend_matches() {
        let set = RuleSet::new()
            .with_rule(availability(BackendKind::Emby, vec![]))
            .with_rule(availability(BackendKind::Jellyfin, vec![]));
        let mut search = SearchResult {
            available: true,
            emby_url: Some("http://old.example/".into()),
            jellyfin_url: Some("http://old.example/".into()),
            ..SearchResult::new("1")
        };
        set.execute(&mut search).await.unwrap();
        assert!(!search.available);
        assert_eq!(search.emby_url, None);
        assert_eq!(search.jellyfin_url, None);
    }

    #[tokio::test]
    async fn empty_set_marks_nothing_available() {
        let set = RuleSet::new();
        let mut search = SearchResult { available: true, ..SearchResult::new("1") };
        assert!(set.execute(&mut search).await.unwrap().is_empty());
        assert!(!search.available);
    }

    #[tokio::test]
    async fn execute_all_handles_each_result() {
        let set = RuleSet::new().with_rule(availability(BackendKind::Emby, vec!["1", "3"]));
        let mut results = vec![SearchResult::new("1"), SearchResult::new("2"), SearchResult::new("3")];
        let outcomes = set.execute_all(&mut results).await.unwrap();
        assert_eq!(outcomes.len(), 3);
        let available: Vec<bool> = results.iter().map(|r| r.available).collect();
        assert_eq!(available, vec![true, false, true]);
    }
}
