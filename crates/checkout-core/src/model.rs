//! Wire Types
//!
//! Request/response value objects for the backend payment endpoint.

use serde::{Deserialize, Serialize};

use crate::config::CheckoutConfig;

/// Single-use token id minted by the gateway for one submission attempt
///
/// Consumed immediately by the outbound request; never cached or reused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToken(String);

impl PaymentToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the token id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON body POSTed to the payment endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in minor units
    pub amount: i64,

    /// ISO currency code
    pub currency: String,

    /// Token id from the gateway
    pub payment_method_id: String,

    /// Fixed tag the backend switches on (not derived from card brand)
    pub method: String,
}

impl PaymentRequest {
    /// Build the request body for one submission attempt
    pub fn new(config: &CheckoutConfig, token: &PaymentToken) -> Self {
        Self {
            amount: config.amount,
            currency: config.currency.clone(),
            payment_method_id: token.as_str().to_string(),
            method: config.method.clone(),
        }
    }
}

/// Response from the payment endpoint
///
/// Only these fields are consumed; everything else is ignored. Missing
/// fields deserialize to their defaults and land in the failed branch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default, rename = "requiresAction")]
    pub requires_action: bool,

    #[serde(default, rename = "stripeStatus")]
    pub stripe_status: Option<String>,

    #[serde(default, rename = "clientSecret")]
    pub client_secret: Option<String>,
}

/// How a response is handled, in priority order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Charge already completed
    Completed,

    /// Secondary authentication required; carries the client secret
    RequiresAuth(String),

    /// Anything else
    Failed,
}

impl PaymentResponse {
    /// Classify the response.
    ///
    /// The challenge branch needs the full `requiresAction` +
    /// `stripeStatus == "requires_action"` + client secret triple; any
    /// partial shape falls through to [`Disposition::Failed`].
    pub fn disposition(&self) -> Disposition {
        if self.status == "completed" {
            return Disposition::Completed;
        }

        if self.requires_action && self.stripe_status.as_deref() == Some("requires_action") {
            if let Some(secret) = &self.client_secret {
                return Disposition::RequiresAuth(secret.clone());
            }
        }

        Disposition::Failed
    }
}
