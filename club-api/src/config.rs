//! Top-level service configuration

use payment_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use standings::PointsScheme;

/// Configuration for the whole request surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Orchestrator settings (platform fee, group size)
    pub registration: registration::Config,

    /// Gateway credentials and endpoint
    pub gateway: GatewayConfig,

    /// Standings points scheme
    pub points: PointsScheme,
}

impl ApiConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ApiConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self {
            registration: registration::Config::from_env()
                .map_err(|e| crate::Error::Config(e.to_string()))?,
            gateway: GatewayConfig::from_env()
                .map_err(|e| crate::Error::Config(e.to_string()))?,
            points: PointsScheme::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.registration.platform_fee, 10_000);
        assert_eq!(config.points.win, 3);
    }
}
