//! Configuration for the banking core

use credit_bureau::BureauConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for RocksDB
    pub data_dir: PathBuf,

    /// Sort code of this institution (single-branch legacy constant)
    pub sort_code: String,

    /// Page size for accounts-by-customer queries (legacy terminal page)
    pub accounts_page_size: usize,

    /// RocksDB configuration
    pub rocksdb: RocksDbConfig,

    /// Credit check configuration
    pub credit: CreditCheckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/bank"),
            sort_code: "987654".to_string(),
            accounts_page_size: 20,
            rocksdb: RocksDbConfig::default(),
            credit: CreditCheckConfig::default(),
        }
    }
}

/// RocksDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocksDbConfig {
    /// Write buffer size (MB)
    pub write_buffer_size_mb: usize,

    /// Max write buffers
    pub max_write_buffer_number: i32,

    /// Max background jobs (compaction + flush)
    pub max_background_jobs: i32,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            write_buffer_size_mb: 64,
            max_write_buffer_number: 4,
            max_background_jobs: 4,
        }
    }
}

/// Credit check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCheckConfig {
    /// Worker pool settings
    pub bureau: BureauConfig,

    /// How long customer creation waits before falling back
    pub timeout_ms: u64,

    /// Score recorded when the check does not answer in time
    pub fallback_score: u16,
}

impl Default for CreditCheckConfig {
    fn default() -> Self {
        Self {
            bureau: BureauConfig::default(),
            // Legacy callers waited synchronously up to 10 seconds
            timeout_ms: 10_000,
            // 0 is outside the scored 1-999 range: "never scored"
            fallback_score: 0,
        }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(data_dir) = std::env::var("BANK_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(sort_code) = std::env::var("BANK_SORT_CODE") {
            config.sort_code = sort_code;
        }

        if let Ok(timeout) = std::env::var("BANK_CREDIT_TIMEOUT_MS") {
            config.credit.timeout_ms = timeout
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad timeout: {}", timeout)))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sort_code, "987654");
        assert_eq!(config.accounts_page_size, 20);
        assert_eq!(config.credit.bureau.agencies, 5);
        assert_eq!(config.credit.timeout_ms, 10_000);
        assert_eq!(config.credit.fallback_score, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sort_code, config.sort_code);
        assert_eq!(parsed.credit.timeout_ms, config.credit.timeout_ms);
    }
}
