use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Supported media-server integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Emby,
    Jellyfin,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Emby, BackendKind::Jellyfin];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Emby => "emby",
            BackendKind::Jellyfin => "jellyfin",
        }
    }

    /// Web client base used when no server hostname is configured. Always ends with `/`.
    pub fn default_base_url(self) -> &'static str {
        match self {
            BackendKind::Emby => "https://app.emby.media/",
            BackendKind::Jellyfin => "http://localhost:8096/",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emby" => Ok(Self::Emby),
            "jellyfin" => Ok(Self::Jellyfin),
            other => Err(anyhow!("unknown backend `{}` (expected emby, jellyfin)", other)),
        }
    }
}
