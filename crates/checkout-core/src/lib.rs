//! # checkout-core
//!
//! SDK-agnostic core of the card checkout widget: the submission flow,
//! its wire types, and the trait seams toward the payment SDK and the
//! backend payment endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CheckoutFlow                          │
//! │  ┌───────────────┐  ┌────────────────┐  ┌────────────────┐  │
//! │  │ CheckoutPhase │  │ GatewaySession │  │   PaymentApi   │  │
//! │  │ state machine │──│   (SDK seam)   │──│  (HTTP seam)   │  │
//! │  └───────────────┘  └────────────────┘  └────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `GatewayProvider`/`GatewaySession` traits let the widget swap the
//! real Stripe.js bindings for a test double, and `PaymentApi` does the
//! same for the backend endpoint. Everything here compiles natively so
//! the flow can be tested off-browser.

pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod model;

pub use config::CheckoutConfig;
pub use error::{CheckoutError, Result};
pub use flow::{CheckoutFlow, CheckoutOutcome, CheckoutPhase};
pub use gateway::{GatewayError, GatewayProvider, GatewaySession, PaymentApi, TransportError};
pub use model::{Disposition, PaymentRequest, PaymentResponse, PaymentToken};
