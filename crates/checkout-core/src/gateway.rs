//! Gateway Seams
//!
//! Trait boundaries between the checkout flow and its collaborators: the
//! payment SDK session on one side, the backend payment endpoint on the
//! other. Implement [`GatewayProvider`] per SDK (the Stripe.js one lives
//! in `checkout-stripe`) and [`PaymentApi`] per transport.

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::CheckoutConfig;
use crate::model::{PaymentRequest, PaymentResponse, PaymentToken};

/// Error reported by the payment SDK
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayError {
    /// Human-readable message, shown to the user verbatim
    pub message: String,

    /// SDK error category, e.g. `validation_error`
    pub error_type: Option<String>,

    /// SDK error code, e.g. `incomplete_number`
    pub code: Option<String>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Transport or decode failure talking to the payment endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// An initialized SDK session with a mounted card input.
///
/// Futures are `?Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait GatewaySession {
    /// Tokenize the card input's current contents
    async fn create_payment_token(&self) -> Result<PaymentToken, GatewayError>;

    /// Run the secondary-authentication challenge for a client secret
    async fn confirm_card_payment(&self, client_secret: &str) -> Result<(), GatewayError>;
}

/// Factory for gateway sessions (Strategy pattern).
///
/// `connect` performs the whole initialization protocol: load the SDK,
/// derive the element group, create the card input, and mount it into
/// the configured container. It must be idempotent — a repeated call
/// returns the session that is already mounted.
#[async_trait(?Send)]
pub trait GatewayProvider {
    async fn connect(
        &self,
        config: &CheckoutConfig,
    ) -> Result<Rc<dyn GatewaySession>, GatewayError>;
}

/// Backend payment endpoint
#[async_trait(?Send)]
pub trait PaymentApi {
    /// Submit one payment request. Single POST, no timeout, no retry.
    async fn submit_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, TransportError>;
}
