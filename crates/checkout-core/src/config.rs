//! Checkout Configuration

/// Checkout configuration
///
/// Amount, currency, method tag, and endpoint are injectable; the
/// defaults keep the request shape byte-compatible with the backend
/// contract.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Gateway publishable key (`pk_…`)
    pub publishable_key: String,

    /// Absolute URL of the backend payment endpoint
    pub endpoint: String,

    /// Charge amount in minor units (cents)
    pub amount: i64,

    /// ISO currency code sent to the backend
    pub currency: String,

    /// Payment method tag the backend switches on
    pub method: String,

    /// DOM id of the card element container
    pub container_id: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            publishable_key: String::new(),
            endpoint: "http://localhost:8080/v1/payments/make-payment".into(),
            amount: 1000,
            currency: "usd".into(),
            method: "visa/mastercard".into(),
            container_id: "card-element".into(),
        }
    }
}

impl CheckoutConfig {
    /// Create a config with the given publishable key and default values
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            ..Default::default()
        }
    }

    /// Amount formatted for display, e.g. `$10.00`
    pub fn display_amount(&self) -> String {
        format!("${:.2}", self.amount as f64 / 100.0)
    }

    /// CSS selector for the card element container
    pub fn container_selector(&self) -> String {
        format!("#{}", self.container_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = CheckoutConfig::default();
        assert_eq!(config.amount, 1000);
        assert_eq!(config.currency, "usd");
        assert_eq!(config.method, "visa/mastercard");
        assert_eq!(
            config.endpoint,
            "http://localhost:8080/v1/payments/make-payment"
        );
    }

    #[test]
    fn display_amount_formats_minor_units() {
        assert_eq!(CheckoutConfig::default().display_amount(), "$10.00");

        let mut config = CheckoutConfig::default();
        config.amount = 2950;
        assert_eq!(config.display_amount(), "$29.50");
    }

    #[test]
    fn container_selector_prefixes_the_id() {
        assert_eq!(CheckoutConfig::default().container_selector(), "#card-element");
    }
}
