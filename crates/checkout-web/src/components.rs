//! UI Components

use leptos::prelude::*;

/// Labeled container the SDK mounts its card iframe into
#[component]
pub fn CardField(id: String) -> impl IntoView {
    view! {
        <div class="field">
            <label class="field-label">"Card Information"</label>
            <div id=id class="card-input"></div>
        </div>
    }
}
