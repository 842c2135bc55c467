//! Gateway clients
//!
//! `PaymentGateway` is the seam the API layer talks to. The HTTP client is
//! the production implementation; the mock one mints orders locally and
//! signs its own callbacks for tests and demos.

use crate::config::GatewayConfig;
use crate::types::{Order, PaymentCallback};
use crate::verify::{sign, verify_callback};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use wallet_ledger::Amount;

/// External payment processor boundary. Implementations never touch wallet
/// state; they only mint orders and check callback signatures.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint an order for a real-money top-up
    async fn create_order(&self, amount: Amount) -> Result<Order>;

    /// Verify a checkout callback signature
    fn verify(&self, callback: &PaymentCallback) -> Result<()>;
}

/// Production gateway client over HTTPS
pub struct HttpGateway {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

impl HttpGateway {
    /// Build a client from config
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_order(&self, amount: Amount) -> Result<Order> {
        if amount <= 0 {
            return Err(Error::InvalidAmount(amount));
        }

        let url = format!("{}/orders", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&serde_json::json!({
                "amount": amount,
                "currency": "INR",
                "receipt": uuid::Uuid::new_v4().to_string(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GatewayRejected { status, body });
        }

        let order: OrderResponse = response.json().await?;
        tracing::info!(order_id = %order.id, amount = order.amount, "Gateway order created");

        Ok(Order {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: self.config.key_id.clone(),
        })
    }

    fn verify(&self, callback: &PaymentCallback) -> Result<()> {
        verify_callback(&self.config.key_secret, callback)
    }
}

/// Local gateway for tests and demos. Orders are minted in-process; the
/// signature scheme matches production so verification paths stay honest.
pub struct MockGateway {
    key_secret: String,
    counter: AtomicU64,
}

impl MockGateway {
    /// Mock gateway with the given signing secret
    pub fn new(key_secret: impl Into<String>) -> Self {
        Self {
            key_secret: key_secret.into(),
            counter: AtomicU64::new(1),
        }
    }

    /// Fabricate the callback a successful checkout would post back
    pub fn complete_checkout(&self, order_id: &str) -> PaymentCallback {
        let payment_id = format!("pay_{}", self.counter.fetch_add(1, Ordering::SeqCst));
        let signature = sign(&self.key_secret, order_id, &payment_id);
        PaymentCallback {
            order_id: order_id.to_string(),
            payment_id,
            signature,
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(&self, amount: Amount) -> Result<Order> {
        if amount <= 0 {
            return Err(Error::InvalidAmount(amount));
        }
        let order_id = format!("order_{}", self.counter.fetch_add(1, Ordering::SeqCst));
        Ok(Order {
            order_id,
            amount,
            currency: "INR".to_string(),
            key_id: "rzp_test_key".to_string(),
        })
    }

    fn verify(&self, callback: &PaymentCallback) -> Result<()> {
        verify_callback(&self.key_secret, callback)
    }
}
