//! User Notifications
//!
//! Blocking alert-style dialogs; no inline error display. Silent error
//! variants go to the browser console only.

use checkout_core::{CheckoutError, CheckoutOutcome};

/// Show a blocking alert
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Report a finished submission attempt to the user
pub fn report(outcome: &Result<CheckoutOutcome, CheckoutError>) {
    match outcome {
        Ok(CheckoutOutcome::Completed) => alert("Payment successful!"),
        Ok(CheckoutOutcome::CompletedAfterAuth) => {
            alert("Payment successful after authentication!");
        }
        Err(err) => match err.user_message() {
            Some(message) => alert(&message),
            None => web_sys::console::error_1(&format!("checkout: {}", err).into()),
        },
    }
}
