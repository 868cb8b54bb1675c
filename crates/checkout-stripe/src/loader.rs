//! Stripe.js Script Loader
//!
//! Injects `https://js.stripe.com/v3/` once and resolves when the script
//! has loaded. Skipped entirely when `window.Stripe` already exists, so
//! pages that ship the tag in their HTML work too.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Reflect;
use web_sys::HtmlScriptElement;

use checkout_core::GatewayError;

const STRIPE_JS_URL: &str = "https://js.stripe.com/v3/";

/// Ensure Stripe.js is present on the page
pub async fn ensure_loaded() -> Result<(), GatewayError> {
    let window = web_sys::window().ok_or_else(|| GatewayError::new("no window object"))?;
    if Reflect::has(&window, &JsValue::from_str("Stripe")).unwrap_or(false) {
        return Ok(());
    }

    let document = window
        .document()
        .ok_or_else(|| GatewayError::new("no document object"))?;
    let head = document
        .head()
        .ok_or_else(|| GatewayError::new("document has no <head>"))?;

    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(|_| GatewayError::new("failed to create the script element"))?
        .dyn_into()
        .map_err(|_| GatewayError::new("script element has an unexpected type"))?;
    script.set_src(STRIPE_JS_URL);

    // Both listeners race for the same one-shot sender.
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let tx = Rc::clone(&tx);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = {
        let tx = Rc::clone(&tx);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(false);
            }
        })
    };

    script
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .map_err(|_| GatewayError::new("failed to attach the load listener"))?;
    script
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .map_err(|_| GatewayError::new("failed to attach the error listener"))?;

    head.append_child(&script)
        .map_err(|_| GatewayError::new("failed to insert the script tag"))?;

    // The listener closures must outlive this function.
    on_load.forget();
    on_error.forget();

    match rx.await {
        Ok(true) => Ok(()),
        _ => Err(GatewayError::new("failed to load Stripe.js")),
    }
}
