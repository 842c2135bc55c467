//! Gateway credentials and endpoint configuration

use serde::{Deserialize, Serialize};

/// Payment gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Public key ID, handed to the client checkout widget
    pub key_id: String,

    /// Secret key used to sign orders and verify callbacks.
    /// Never leaves the server.
    pub key_secret: String,

    /// Gateway API base URL
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            key_id: "rzp_test_key".to_string(),
            key_secret: "rzp_test_secret".to_string(),
            base_url: "https://api.razorpay.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = GatewayConfig::default();

        if let Ok(key_id) = std::env::var("GATEWAY_KEY_ID") {
            config.key_id = key_id;
        }
        if let Ok(key_secret) = std::env::var("GATEWAY_KEY_SECRET") {
            config.key_secret = key_secret;
        }
        if let Ok(base_url) = std::env::var("GATEWAY_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }
}
