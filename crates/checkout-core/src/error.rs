//! Error Types

use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Submission attempted before the gateway session is ready
    #[error("payment form is not ready")]
    NotReady,

    /// Submission attempted while another one is in flight
    #[error("a submission is already in flight")]
    Busy,

    /// SDK rejected the card input during tokenization
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// Request to the payment endpoint failed or returned garbage
    #[error("payment request failed: {0}")]
    Transport(String),

    /// Secondary-authentication challenge failed
    #[error("authentication failed: {0}")]
    SecondaryAuth(String),

    /// Backend reported neither success nor a challenge
    #[error("payment declined")]
    Declined,
}

impl CheckoutError {
    /// Message to surface to the user, or `None` for the silent variants.
    ///
    /// Tokenization and secondary-auth errors carry the SDK's wording
    /// verbatim; transport and decline failures stay generic and keep the
    /// underlying detail in the logs.
    pub fn user_message(&self) -> Option<String> {
        match self {
            CheckoutError::NotReady | CheckoutError::Busy => None,
            CheckoutError::Tokenization(msg) => Some(format!("Payment failed: {}", msg)),
            CheckoutError::Transport(_) => {
                Some("An error occurred during payment. Please try again.".into())
            }
            CheckoutError::SecondaryAuth(msg) => {
                Some(format!("Authentication failed: {}", msg))
            }
            CheckoutError::Declined => Some("Payment failed. Please try again.".into()),
        }
    }
}
