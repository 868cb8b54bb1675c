//! # checkout-stripe
//!
//! Stripe.js v3 interop for the checkout widget: raw wasm-bindgen
//! bindings, a one-shot script loader, and the `GatewayProvider` /
//! `GatewaySession` implementations the flow consumes.
//!
//! The SDK is treated as an opaque capability provider — load, mount,
//! tokenize, confirm. Its internals (iframes, the network calls it makes
//! on its own) stay behind the bindings.

pub mod bindings;
pub mod client;
pub mod loader;
pub mod style;

pub use bindings::{JsCardElement, JsElements, JsStripe};
pub use client::{StripeGateway, StripeSession};
pub use style::{BaseStyle, CardElementOptions, CardStyle, PlaceholderStyle};
