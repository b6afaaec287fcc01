//! Fallback shown in place of the widget body after a fault

use leptos::prelude::*;

use crate::composition::boundary::Fault;
use crate::composition::i18n::Message;
use crate::runtime;
use crate::state::context::use_widget_context;

#[component]
pub fn FaultFallback(fault: Fault) -> impl IntoView {
    let handle = use_widget_context();
    let (title, retry) = handle.with_value(|ctx| (ctx.i18n.t(Message::FaultTitle), ctx.i18n.t(Message::FaultRetry)));

    view! {
        <div class="swap-fault" role="alert" style="padding: 1rem; text-align: center; color: var(--swap-primary);">
            <p style="font-weight: 600; margin-bottom: 0.5rem;">{title}</p>
            <p style="color: var(--swap-error); font-size: 0.875rem; word-break: break-word;">{fault.message}</p>
            <button
                class="swap-action"
                style="margin-top: 1rem;"
                on:click=move |_| handle.with_value(runtime::recover)
            >
                {retry}
            </button>
        </div>
    }
}
