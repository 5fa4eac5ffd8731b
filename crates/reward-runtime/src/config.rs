//! # Runtime Configuration
//!
//! Loaded from an optional TOML file, then overridden by `RC_*` environment
//! variables, then validated. Every field has a default, so an empty file
//! (or no file) yields a working configuration.
//!
//! ```toml
//! log_level = "info"
//!
//! [store]
//! data_dir = "/var/lib/reward-core"
//!
//! [claim]
//! min_wallet_reserve_pac = 500
//! memo = "TestNet reward claim from RoboPac"
//!
//! [booster]
//! program_cap = 500
//! min_account_age_years = 2
//! min_followers = 200
//! high_follower_threshold = 1000
//! pac_standard = 150
//! pac_high = 200
//! retweet_max_age_days = 7
//! memo = "Validator Booster Program"
//!
//! [network]
//! refresh_interval_secs = 60
//! call_timeout_secs = 30
//! ```
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `RC_DATA_DIR` | `store.data_dir` |
//! | `RC_LOG_LEVEL` | `log_level` |
//! | `RC_REFRESH_SECS` | `network.refresh_interval_secs` |
//! | `RC_CALL_TIMEOUT_SECS` | `network.call_timeout_secs` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use rc_03_claim_workflow::ClaimConfig;
use rc_04_booster_engine::BoosterConfig;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// File path.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// An environment override could not be parsed.
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Record store settings.
    pub store: StoreSection,
    /// Claim workflow settings.
    pub claim: ClaimSection,
    /// Booster program settings.
    pub booster: BoosterSection,
    /// Collaborator call settings.
    pub network: NetworkSection,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

/// `[store]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Directory holding the table documents.
    pub data_dir: PathBuf,
}

/// `[claim]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimSection {
    /// Wallet reserve in PAC.
    pub min_wallet_reserve_pac: i64,
    /// Bond memo.
    pub memo: String,
}

/// `[booster]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterSection {
    /// Maximum number of parties.
    pub program_cap: usize,
    /// Minimum account age for unverified accounts.
    pub min_account_age_years: u32,
    /// Minimum followers for unverified accounts.
    pub min_followers: u64,
    /// Follower count that unlocks the larger package.
    pub high_follower_threshold: u64,
    /// Standard package, in PAC.
    pub pac_standard: i64,
    /// Large package, in PAC.
    pub pac_high: i64,
    /// Oldest accepted retweet, in days.
    pub retweet_max_age_days: u32,
    /// Bond memo.
    pub memo: String,
}

/// `[network]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Snapshot refresh period.
    pub refresh_interval_secs: u64,
    /// Deadline for each collaborator call.
    pub call_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            claim: ClaimSection::default(),
            booster: BoosterSection::default(),
            network: NetworkSection::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for ClaimSection {
    fn default() -> Self {
        let defaults = ClaimConfig::default();
        Self {
            min_wallet_reserve_pac: rc_03_claim_workflow::config::DEFAULT_MIN_WALLET_RESERVE_PAC,
            memo: defaults.memo,
        }
    }
}

impl Default for BoosterSection {
    fn default() -> Self {
        let defaults = BoosterConfig::default();
        Self {
            program_cap: defaults.program_cap,
            min_account_age_years: defaults.min_account_age_years,
            min_followers: defaults.min_followers,
            high_follower_threshold: defaults.high_follower_threshold,
            pac_standard: defaults.pac_standard,
            pac_high: defaults.pac_high,
            retweet_max_age_days: defaults.retweet_max_age_days,
            memo: defaults.memo,
        }
    }
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            call_timeout_secs: 30,
        }
    }
}

impl RuntimeConfig {
    /// Load from `path` (if any), apply `RC_*` overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file. No overrides, no validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dir) = lookup("RC_DATA_DIR") {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("RC_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(value) = lookup("RC_REFRESH_SECS") {
            self.network.refresh_interval_secs = parse_env("RC_REFRESH_SECS", value)?;
        }
        if let Some(value) = lookup("RC_CALL_TIMEOUT_SECS") {
            self.network.call_timeout_secs = parse_env("RC_CALL_TIMEOUT_SECS", value)?;
        }
        Ok(())
    }

    /// Reject values the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.booster.program_cap == 0 {
            return Err(ConfigError::Invalid("booster.program_cap must be positive".into()));
        }
        if self.network.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "network.refresh_interval_secs must be positive".into(),
            ));
        }
        if self.network.call_timeout_secs == 0 {
            return Err(ConfigError::Invalid("network.call_timeout_secs must be positive".into()));
        }
        if self.claim.min_wallet_reserve_pac < 0 {
            return Err(ConfigError::Invalid(
                "claim.min_wallet_reserve_pac must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Snapshot refresh period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.network.refresh_interval_secs)
    }

    /// Deadline for each collaborator call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.network.call_timeout_secs)
    }

    /// Claim workflow settings.
    pub fn claim_config(&self) -> ClaimConfig {
        ClaimConfig {
            min_wallet_reserve: Amount::from_pac(self.claim.min_wallet_reserve_pac),
            memo: self.claim.memo.clone(),
            call_timeout: self.call_timeout(),
        }
    }

    /// Booster engine settings. The booster bond shares the claim reserve.
    pub fn booster_config(&self) -> BoosterConfig {
        BoosterConfig {
            program_cap: self.booster.program_cap,
            min_account_age_years: self.booster.min_account_age_years,
            min_followers: self.booster.min_followers,
            high_follower_threshold: self.booster.high_follower_threshold,
            pac_standard: self.booster.pac_standard,
            pac_high: self.booster.pac_high,
            retweet_max_age_days: self.booster.retweet_max_age_days,
            memo: self.booster.memo.clone(),
            min_wallet_reserve: Amount::from_pac(self.claim.min_wallet_reserve_pac),
            call_timeout: self.call_timeout(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
