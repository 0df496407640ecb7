use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::backend::BackendKind;

pub const DATABASE_URL_ENV: &str = "REELCHECK_DATABASE_URL";
pub const LOG_ENV: &str = "REELCHECK_LOG";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `reelcheck=debug`.
    #[serde(default)]
    pub log: Option<String>,
    /// Backends to wire availability rules for, in evaluation order.
    #[serde(default = "all_backends")]
    pub backends: Vec<BackendKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self { database_url: None, log: None, backends: all_backends() }
    }
}

fn all_backends() -> Vec<BackendKind> { BackendKind::ALL.to_vec() }

impl Config {
    /// Reads `path` (or the default location) and applies env overrides.
    /// An unreadable or malformed file yields defaults plus a warning for the caller to log,
    /// since logging is configured from the result.
    pub fn load(path: Option<&Path>) -> (Self, Option<String>) {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);
        let (mut cfg, warning) = match path.as_deref() {
            Some(p) => read_file(p),
            None => (Config::default(), None),
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        (cfg, warning)
    }

    pub fn parse(s: &str) -> Result<Self, toml::de::Error> { toml::from_str(s) }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(DATABASE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(log) = var(LOG_ENV).filter(|s| !s.trim().is_empty()) {
            self.log = Some(log);
        }
    }
}

fn read_file(path: &Path) -> (Config, Option<String>) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return (Config::default(), None),
        Err(e) => return (Config::default(), Some(format!("cannot read config {}: {}", path.display(), e))),
    };
    match Config::parse(&raw) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(format!("ignoring malformed config {}: {}", path.display(), e))),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "reelcheck", "reelcheck").map(|p| p.config_dir().join("reelcheck.toml"))
}
