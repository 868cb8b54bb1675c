//! Stripe Gateway
//!
//! [`GatewayProvider`]/[`GatewaySession`] implementations over the raw
//! Stripe.js bindings: initialize the client, mount the card element,
//! tokenize, and run secondary-authentication confirmations.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Object, Promise, Reflect};

use checkout_core::{
    CheckoutConfig, GatewayError, GatewayProvider, GatewaySession, PaymentToken,
};

use crate::bindings::{new_stripe, JsCardElement, JsStripe};
use crate::loader::ensure_loaded;
use crate::style::CardElementOptions;

/// Error shape inside `createPaymentMethod`/`confirmCardPayment` results
#[derive(Debug, Deserialize)]
struct SdkError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn sdk_error(value: &JsValue) -> GatewayError {
    match value.into_serde::<SdkError>() {
        Ok(err) => GatewayError {
            message: err
                .message
                .unwrap_or_else(|| "Unknown payment error".into()),
            error_type: err.error_type,
            code: err.code,
        },
        Err(_) => GatewayError::new("Unknown payment error"),
    }
}

fn js_error(context: &str, value: &JsValue) -> GatewayError {
    GatewayError::new(format!("{}: {:?}", context, value))
}

/// Await a Stripe.js promise, failing on a populated `error` field
async fn sdk_result(promise: Promise) -> Result<JsValue, GatewayError> {
    let result = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("sdk call rejected", &e))?;

    let error = Reflect::get(&result, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
    if !error.is_undefined() && !error.is_null() {
        return Err(sdk_error(&error));
    }

    Ok(result)
}

/// A connected Stripe session with its mounted card element
pub struct StripeSession {
    stripe: JsStripe,
    card: JsCardElement,
}

impl StripeSession {
    fn new(stripe: JsStripe, card: JsCardElement) -> Self {
        Self { stripe, card }
    }
}

#[async_trait(?Send)]
impl GatewaySession for StripeSession {
    async fn create_payment_token(&self) -> Result<PaymentToken, GatewayError> {
        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("type"),
            &JsValue::from_str("card"),
        )
        .map_err(|e| js_error("failed to build tokenize options", &e))?;
        Reflect::set(&options, &JsValue::from_str("card"), self.card.as_ref())
            .map_err(|e| js_error("failed to build tokenize options", &e))?;

        let promise = self
            .stripe
            .create_payment_method(options.into())
            .map_err(|e| js_error("createPaymentMethod failed", &e))?;
        let result = sdk_result(promise).await?;

        let payment_method = Reflect::get(&result, &JsValue::from_str("paymentMethod"))
            .map_err(|e| js_error("malformed createPaymentMethod result", &e))?;
        let id = Reflect::get(&payment_method, &JsValue::from_str("id"))
            .ok()
            .and_then(|v| v.as_string())
            .ok_or_else(|| GatewayError::new("payment method has no id"))?;

        Ok(PaymentToken::new(id))
    }

    async fn confirm_card_payment(&self, client_secret: &str) -> Result<(), GatewayError> {
        let promise = self
            .stripe
            .confirm_card_payment(client_secret)
            .map_err(|e| js_error("confirmCardPayment failed", &e))?;
        sdk_result(promise).await?;
        Ok(())
    }
}

/// Stripe.js-backed gateway provider.
///
/// Caches its session: repeated initialization (a widget remount) reuses
/// the already-mounted card element instead of double-mounting it.
pub struct StripeGateway {
    session: RefCell<Option<Rc<StripeSession>>>,
}

impl StripeGateway {
    pub fn new() -> Self {
        Self {
            session: RefCell::new(None),
        }
    }
}

impl Default for StripeGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl GatewayProvider for StripeGateway {
    async fn connect(
        &self,
        config: &CheckoutConfig,
    ) -> Result<Rc<dyn GatewaySession>, GatewayError> {
        if let Some(session) = self.session.borrow().as_ref() {
            return Ok(Rc::clone(session) as Rc<dyn GatewaySession>);
        }

        ensure_loaded().await?;

        let stripe = new_stripe(&config.publishable_key);
        let elements = stripe
            .elements()
            .map_err(|e| js_error("elements() failed", &e))?;

        let options = JsValue::from_serde(&CardElementOptions::default())
            .map_err(|e| GatewayError::new(format!("style serialization failed: {}", e)))?;
        let card = elements
            .create_element("card", options)
            .map_err(|e| js_error("card element creation failed", &e))?;
        card.mount(&config.container_selector())
            .map_err(|e| js_error("card element mount failed", &e))?;

        let session = Rc::new(StripeSession::new(stripe, card));
        *self.session.borrow_mut() = Some(Rc::clone(&session));
        Ok(session as Rc<dyn GatewaySession>)
    }
}
