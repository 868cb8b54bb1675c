//! Checkout Page

use std::rc::Rc;

use leptos::prelude::*;

use checkout_core::{CheckoutFlow, CheckoutPhase, GatewayProvider};
use checkout_stripe::StripeGateway;

use crate::api::HttpPaymentApi;
use crate::components::CardField;
use crate::config;
use crate::notify;

/// Card checkout widget.
///
/// Initializes the gateway once on first display, then drives one
/// submission per click: tokenize, POST to the payment endpoint, and at
/// most one secondary-authentication round trip. The provider prop
/// exists so tests and other deployments can swap the SDK out.
#[component]
pub fn CheckoutPage(
    #[prop(default = Rc::new(StripeGateway::new()))] provider: Rc<dyn GatewayProvider>,
) -> impl IntoView {
    let checkout_config = config::checkout_config();
    let flow = Rc::new(CheckoutFlow::new(
        HttpPaymentApi::new(checkout_config.endpoint.clone()),
        checkout_config,
    ));

    let (ready, set_ready) = signal(false);
    let (phase, set_phase) = signal(CheckoutPhase::Idle);

    flow.on_phase_change(move |p| set_phase.set(p));

    let pay_label = format!("Pay {}", flow.config().display_amount());
    let container_id = flow.config().container_id.clone();

    // Initialization protocol. The async hop puts it after the card
    // container below has been attached to the DOM.
    {
        let flow = Rc::clone(&flow);
        leptos::task::spawn_local(async move {
            match flow.initialize(provider.as_ref()).await {
                Ok(()) => set_ready.set(true),
                Err(err) => {
                    // No user-visible feedback; the pay button simply
                    // stays disabled.
                    web_sys::console::error_1(
                        &format!("gateway initialization failed: {}", err).into(),
                    );
                }
            }
        });
    }

    let submit = move |_| {
        let flow = Rc::clone(&flow);
        leptos::task::spawn_local(async move {
            let outcome = flow.submit().await;
            notify::report(&outcome);
        });
    };

    view! {
        <div class="checkout">
            <h1>"Card Checkout"</h1>

            <CardField id=container_id />

            <button
                class="btn btn-primary"
                on:click=submit
                disabled=move || !ready.get() || phase.get().is_busy()
            >
                {move || {
                    if phase.get().is_busy() {
                        "Processing...".to_string()
                    } else {
                        pay_label.clone()
                    }
                }}
            </button>

            <p class="hint">"Test with card number: 4242 4242 4242 4242"</p>
        </div>
    }
}
