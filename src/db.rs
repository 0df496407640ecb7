use anyhow::{Context, Result};
use directories::ProjectDirs;
use sqlx::{any::AnyConnectOptions, AnyPool, ConnectOptions, migrate::Migrator};
use sqlx::any::AnyPoolOptions;
use std::{path::{Path, PathBuf}, str::FromStr};
use std::sync::Once;
use tracing::info;

use crate::backend::BackendKind;
use crate::dao;
use crate::storage::{ContentRepository, SettingsProvider};
use crate::types::{BackendSettings, ServerContentRecord};

static INSTALL_DRIVERS: Once = Once::new();

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Opens the pool (SQLite in the user's data dir when no URL is given) and
    /// optionally brings the schema up to date.
    pub async fn open(database_url: Option<&str>, run_migrations: bool) -> Result<Self> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let url = resolve_url(database_url)?;
        let opts = AnyConnectOptions::from_str(&url)
            .with_context(|| format!("invalid database URL: {url}"))?
            .disable_statement_logging();
        let pool = AnyPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to connect to database: {url}"))?;

        let db = Self { pool };
        if run_migrations {
            MIGRATOR.run(&db.pool).await.context("running migrations")?;
        }
        info!(%url, migrated = run_migrations, "database ready");
        Ok(db)
    }

    pub fn pool(&self) -> &AnyPool { &self.pool }
}

/// Content repository for one backend, stored in `server_content`.
#[derive(Clone)]
pub struct SqlContentRepository {
    db: Database,
    kind: BackendKind,
}

impl SqlContentRepository {
    pub fn new(db: Database, kind: BackendKind) -> Self { Self { db, kind } }
}

#[async_trait::async_trait]
impl ContentRepository for SqlContentRepository {
    async fn lookup(&self, provider_id: &str) -> Result<Option<ServerContentRecord>> {
        dao::find_content(self.db.pool(), self.kind, provider_id).await
    }
}

/// Settings for one backend, stored as JSON in `backend_settings`. A missing row reads as defaults.
#[derive(Clone)]
pub struct SqlSettingsProvider {
    db: Database,
    kind: BackendKind,
}

impl SqlSettingsProvider {
    pub fn new(db: Database, kind: BackendKind) -> Self { Self { db, kind } }
}

#[async_trait::async_trait]
impl SettingsProvider for SqlSettingsProvider {
    async fn fetch(&self) -> Result<BackendSettings> {
        Ok(dao::get_settings(self.db.pool(), self.kind).await?.unwrap_or_default())
    }
}

pub fn sqlite_url_for(path: &Path) -> String {
    // Encode spaces in the path for a valid sqlite URL
    let path_str = path.to_string_lossy().replace(' ', "%20");
    format!("sqlite://{path_str}?mode=rwc")
}

fn resolve_url(database_url: Option<&str>) -> Result<String> {
    if let Some(url) = database_url.map(str::trim).filter(|u| !u.is_empty()) {
        return Ok(url.to_string());
    }
    let proj = ProjectDirs::from("dev", "reelcheck", "reelcheck")
        .context("unable to determine data directory for default sqlite path")?;
    let mut path: PathBuf = proj.data_dir().to_path_buf();
    std::fs::create_dir_all(&path).with_context(|| format!("creating data dir: {}", path.display()))?;
    path.push("reelcheck.db");
    Ok(sqlite_url_for(&path))
}
