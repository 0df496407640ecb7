use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// One candidate title returned by a metadata search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub provider_id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub available: bool,
    pub emby_url: Option<String>,
    pub jellyfin_url: Option<String>,
}

impl SearchResult {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self { provider_id: provider_id.into(), ..Default::default() }
    }

    pub fn deep_link(&self, kind: BackendKind) -> Option<&str> {
        match kind {
            BackendKind::Emby => self.emby_url.as_deref(),
            BackendKind::Jellyfin => self.jellyfin_url.as_deref(),
        }
    }

    /// Replaces this backend's link; `None` clears it.
    pub fn set_deep_link(&mut self, kind: BackendKind, url: Option<String>) {
        match kind {
            BackendKind::Emby => self.emby_url = url,
            BackendKind::Jellyfin => self.jellyfin_url = url,
        }
    }
}

/// A title as known to one media-server backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerContentRecord {
    pub provider_id: String,
    pub item_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConnectionDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub server_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub servers: Vec<ServerConnectionDescriptor>,
}

/// Result reported back to the rule runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl RuleOutcome {
    pub fn success() -> Self { Self { success: true, message: None } }
}
