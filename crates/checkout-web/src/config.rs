//! Frontend Configuration

use checkout_core::CheckoutConfig;

/// Publishable key baked into the build
pub const PUBLISHABLE_KEY: &str =
    "pk_test_51Q8zKdF2hTgXaVbM0cPq7RrY5sLW3nJe1uDoE6fGh9iKmN4pSt8vWxYzAbCd2eFg0hIj5kLm7nOp9qRs1tUv00wXyZaBcD";

/// Checkout configuration for this deployment.
///
/// Everything but the key rides on the defaults: $10.00 in usd against
/// the local payment endpoint.
pub fn checkout_config() -> CheckoutConfig {
    CheckoutConfig::new(PUBLISHABLE_KEY)
}
