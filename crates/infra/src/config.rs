//! Process configuration from environment variables.

use std::path::PathBuf;

use stockroom_auth::DEFAULT_PASSPHRASE;

pub const DATA_DIR_VAR: &str = "STOCKROOM_DATA_DIR";
pub const PASSPHRASE_VAR: &str = "STOCKROOM_PASSPHRASE";
pub const DEFAULT_DATA_DIR: &str = "./stockroom-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    /// Directory holding the `<key>.json` snapshot files.
    pub data_dir: PathBuf,
    pub passphrase: String,
}

impl StockroomConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = get(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let passphrase = get(PASSPHRASE_VAR).unwrap_or_else(|| {
            tracing::warn!("{PASSPHRASE_VAR} not set; using insecure dev default");
            DEFAULT_PASSPHRASE.to_string()
        });

        Self {
            data_dir,
            passphrase,
        }
    }
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            passphrase: DEFAULT_PASSPHRASE.to_string(),
        }
    }
}
