//! Process configuration.
//!
//! Everything comes from environment variables with logged defaults; there are
//! no config files and no command-line flags.

use std::path::PathBuf;

/// Environment variable that overrides the inventory file location.
pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";

/// Default inventory file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/inventory.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    pub data_file: PathBuf,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StockroomConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = match lookup(DATA_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => {
                tracing::debug!("{DATA_FILE_ENV} not set; using {DEFAULT_DATA_FILE}");
                PathBuf::from(DEFAULT_DATA_FILE)
            }
        };

        Self { data_file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        assert_eq!(StockroomConfig::from_lookup(|_| None), StockroomConfig::default());
        assert_eq!(
            StockroomConfig::from_lookup(|_| Some("  ".to_string())).data_file,
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn env_override_wins() {
        let config = StockroomConfig::from_lookup(|key| {
            (key == DATA_FILE_ENV).then(|| "/var/lib/stockroom/stock.json".to_string())
        });
        assert_eq!(config.data_file, PathBuf::from("/var/lib/stockroom/stock.json"));
    }
}
