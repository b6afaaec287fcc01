//! Swap Widget - Leptos entry component
//!
//! `<Widget config=... />` composes a fresh context, provides it to every descendant
//! and renders the themed box: the dialog anchor, then the supervised widget body.

use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;

use crate::bridge;
use crate::components::{DialogLayer, FaultFallback, SwapPanel};
use crate::composition::compose;
use crate::config::handlers::{TransactionEventHandlers, WidgetEventHandlers};
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::runtime;
use crate::state::context::{provide_widget_context, use_widget_context, WidgetHandle};

#[component]
pub fn Widget(
    config: WidgetConfig,
    /// Rendered below the swap panel, inside the token-list region
    #[prop(optional)]
    children: Option<ChildrenFn>,
) -> impl IntoView {
    let context = Rc::new(compose(&config));
    let handle = provide_widget_context(context.clone());

    let class = context.sizing.class();
    let style = format!("{} {}", context.sizing.style(), context.theme.theme().css_variables());
    let dialog_style = context.theme.dialog_wrapper_style();
    let anchor_ref = NodeRef::<Div>::new();
    drop(context);

    // Host-supplied anchors take precedence, see DialogAnchor::attach
    Effect::new(move || {
        if let Some(element) = anchor_ref.get() {
            let element: web_sys::Element = element.into();
            handle.with_value(|ctx| ctx.dialog.anchor().attach(element));
        }
    });

    Effect::new(move || {
        if let Err(err) = bridge::browser::observe_body() {
            log::warn!("resize observer unavailable: {:?}", err);
        }
        untrack(|| handle.with_value(runtime::start));
    });

    view! {
        <div class=class style=style>
            <div class="swap-dialog-wrapper" style=dialog_style node_ref=anchor_ref>
                <DialogLayer/>
            </div>
            <WidgetUpdater
                widget_handlers=config.widget_handlers.clone()
                transaction_handlers=config.transaction_handlers.clone()
            />
            <ErrorBoundary fallback=move |errors| {
                move || {
                    for (id, error) in errors.get() {
                        handle.with_value(|ctx| {
                            ctx.boundary.capture_once(&format!("{:?}", id), "view", WidgetError::Render(error.to_string()))
                        });
                    }
                    handle
                        .with_value(|ctx| ctx.boundary.fault())
                        .map(|fault| view! { <FaultFallback fault=fault/> })
                }
            }>
                {move || guarded_body(handle, children.clone())}
            </ErrorBoundary>
        </div>
    }
}

/// Copies the consumer's handlers into the live atom scope after mount. The atoms
/// themselves were seeded during composition; only the callbacks are re-synced.
#[component]
fn WidgetUpdater(widget_handlers: WidgetEventHandlers, transaction_handlers: TransactionEventHandlers) -> impl IntoView {
    let handle = use_widget_context();
    Effect::new(move || {
        let (widget, transactions) = (widget_handlers.clone(), transaction_handlers.clone());
        handle.with_value(|ctx| ctx.atoms.sync_event_handlers(widget, transactions));
    });
}

fn guarded_body(handle: WidgetHandle, children: Option<ChildrenFn>) -> AnyView {
    match handle.with_value(|ctx| ctx.boundary.fault()) {
        Some(fault) => view! { <FaultFallback fault=fault/> }.into_any(),
        None => view! {
            <SwapPanel/>
            <div class="swap-token-region">{children.map(|children| children())}</div>
        }
        .into_any(),
    }
}
