use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::RentError, utils};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Application-level settings shared by embedding shells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// ISO 4217 code of the currency the portfolio is kept in. Rendering is
    /// a shell concern; the engine only carries the code.
    pub currency: String,
    /// How many backup snapshots to keep per portfolio.
    pub backup_retention: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "CNY".into(),
            backup_retention: 5,
            last_opened: None,
        }
    }
}

/// Loads and saves the config file under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, RentError> {
        Self::from_base(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, RentError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, RentError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, RentError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), RentError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(TMP_SUFFIX)
}
