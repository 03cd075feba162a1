use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{config::Config, errors::RentError, portfolio::Portfolio, utils};

use super::{Result, StorageBackend};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const PORTFOLIO_DIR: &str = "portfolios";
const BACKUP_DIR: &str = "backups";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file persistence rooted in the app data directory.
///
/// Live snapshots land in `portfolios/<name>.json`; backups are timestamped
/// copies under `backups/<name>/`, pruned to the retention count.
#[derive(Clone)]
pub struct JsonStorage {
    portfolios_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(utils::app_data_dir);
        let portfolios_dir = root.join(PORTFOLIO_DIR);
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&portfolios_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            portfolios_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    /// Builds a backend honouring the configured backup retention.
    pub fn with_config(root: Option<PathBuf>, config: &Config) -> Result<Self> {
        Self::new(root, Some(config.backup_retention))
    }

    pub fn portfolio_path(&self, name: &str) -> PathBuf {
        self.portfolios_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let mut backups = self.list_backups(name)?;
        backups.sort();
        while backups.len() > self.retention {
            let oldest = backups.remove(0);
            let path = self.backup_dir(name).join(format!("{oldest}.json"));
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, portfolio: &Portfolio, name: &str) -> Result<()> {
        self.save_to_path(portfolio, &self.portfolio_path(name))
    }

    fn load(&self, name: &str) -> Result<Portfolio> {
        let path = self.portfolio_path(name);
        if !path.exists() {
            return Err(RentError::NotFound(format!("portfolio `{name}`")));
        }
        self.load_from_path(&path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    fn backup(&self, portfolio: &Portfolio, name: &str, note: Option<&str>) -> Result<()> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let file_name = match note {
            Some(note) => format!("{stamp}_{}.json", canonical_name(note)),
            None => format!("{stamp}.json"),
        };
        self.save_to_path(portfolio, &dir.join(file_name))?;
        tracing::info!(portfolio = name, "backup snapshot written");
        self.prune_backups(name)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<Portfolio> {
        let source = self.backup_dir(name).join(format!("{backup_name}.json"));
        if !source.exists() {
            return Err(RentError::NotFound(format!("backup `{backup_name}`")));
        }
        let restored = self.load_from_path(&source)?;
        self.save(&restored, name)?;
        Ok(restored)
    }
}

/// Normalizes a user-facing name into a safe file stem.
fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn save_portfolio_to_path(portfolio: &Portfolio, path: &Path) -> Result<()> {
    crate::utils::persistence::save_portfolio_to_file(portfolio, path)
}

pub fn load_portfolio_from_path(path: &Path) -> Result<Portfolio> {
    crate::utils::persistence::load_portfolio_from_file(path)
}
