//! Environment-driven configuration.

use std::path::PathBuf;

use anyhow::bail;

/// Which storage backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Whole-document JSON files under `data_dir`.
    Json { data_dir: PathBuf },
    /// SQLite database at `db_path`.
    Sqlite { db_path: String },
}

/// Engine settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: Backend,
}

impl Settings {
    /// Read settings from the environment, honoring a `.env` file when one
    /// is present.
    ///
    /// - `CRYPTCRAWL_BACKEND`: `json` (default) or `sqlite`
    /// - `CRYPTCRAWL_DATA_DIR`: JSON store directory (default `data`)
    /// - `CRYPTCRAWL_DB`: SQLite path (default `cryptcrawl.db`)
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env is normal; only explicit variables matter.
        let _ = dotenvy::dotenv();

        let backend = std::env::var("CRYPTCRAWL_BACKEND").unwrap_or_else(|_| "json".into());
        let backend = match backend.as_str() {
            "json" => Backend::Json {
                data_dir: std::env::var("CRYPTCRAWL_DATA_DIR")
                    .unwrap_or_else(|_| "data".into())
                    .into(),
            },
            "sqlite" => Backend::Sqlite {
                db_path: std::env::var("CRYPTCRAWL_DB")
                    .unwrap_or_else(|_| "cryptcrawl.db".into()),
            },
            other => bail!("unknown CRYPTCRAWL_BACKEND: {other} (expected json or sqlite)"),
        };

        Ok(Self { backend })
    }
}
