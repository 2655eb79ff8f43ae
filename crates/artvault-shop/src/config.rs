//! Storefront configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Runtime knobs for a [`Storefront`](crate::dispatch::Storefront).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Currency every catalog price is expressed in.
    #[serde(default)]
    pub currency: Currency,
    /// Simulated acknowledgment latency for checkout and contact submission.
    #[serde(default = "default_ack_delay_ms")]
    pub ack_delay_ms: u64,
    /// How long the newsletter confirmation stays visible.
    #[serde(default = "default_newsletter_notice_ms")]
    pub newsletter_notice_ms: u64,
    /// Show the "added to your cart" toast after an add.
    #[serde(default = "default_toast_on_add")]
    pub toast_on_add: bool,
    /// Number used by the call picker and the messaging hand-off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

fn default_ack_delay_ms() -> u64 {
    1500
}

fn default_newsletter_notice_ms() -> u64 {
    4000
}

fn default_toast_on_add() -> bool {
    true
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            ack_delay_ms: default_ack_delay_ms(),
            newsletter_notice_ms: default_newsletter_notice_ms(),
            toast_on_add: default_toast_on_add(),
            contact_phone: None,
        }
    }
}

impl ShopConfig {
    pub fn ack_delay(&self) -> Duration {
        Duration::from_millis(self.ack_delay_ms)
    }

    pub fn newsletter_notice(&self) -> Duration {
        Duration::from_millis(self.newsletter_notice_ms)
    }

    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub fn with_ack_delay(mut self, delay: Duration) -> Self {
        self.ack_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ShopConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ShopConfig::default());
        assert_eq!(config.ack_delay(), Duration::from_millis(1500));
        assert_eq!(config.newsletter_notice(), Duration::from_millis(4000));
        assert!(config.toast_on_add);
        assert!(config.contact_phone.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config: ShopConfig =
            serde_json::from_str(r#"{"ack_delay_ms": 10, "contact_phone": "+1 555 0100"}"#).unwrap();
        assert_eq!(config.ack_delay_ms, 10);
        assert_eq!(config.contact_phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(config.currency, Currency::USD);
    }

    #[test]
    fn test_builders() {
        let config = ShopConfig::default()
            .with_ack_delay(Duration::from_millis(250))
            .with_currency(Currency::EUR)
            .with_contact_phone("0044 20 7946 0000");
        assert_eq!(config.ack_delay_ms, 250);
        assert_eq!(config.currency, Currency::EUR);
        assert!(config.contact_phone.is_some());
    }
}
