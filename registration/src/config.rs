//! Configuration for the registration orchestrator

use serde::{Deserialize, Serialize};
use wallet_ledger::Amount;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Flat fee debited from a pickup-match host, minor units.
    /// Non-refundable even if nobody joins.
    pub platform_fee: Amount,

    /// Entries per round-robin group
    pub group_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_fee: 10_000, // ₹100
            group_size: 4,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(fee) = std::env::var("CLUB_PLATFORM_FEE") {
            config.platform_fee = fee
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad CLUB_PLATFORM_FEE: {fee}")))?;
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
        assert_eq!(config.platform_fee, 10_000);
        assert_eq!(config.group_size, 4);
    }
}
