//! # Swap Widget
//!
//! Embeddable token-swap widget for Blast Sepolia and the other Uniswap-supported chains.
//!
//! A host mounts it either directly into an element with a JS options object
//! (`mount_swap_widget`) or as a framed page configured through the URL
//! (`mount_from_location`). In framed mode the widget reports its height to the parent
//! window so the iframe can follow its content.
//!
//! The crate splits into a DOM-free core ([`composition`], [`config`], [`state`],
//! [`web3`], [`bridge`]) and the Leptos layer ([`app`], [`components`]) on top of it.

pub mod app;
pub mod bridge;
pub mod components;
pub mod composition;
pub mod config;
pub mod error;
pub mod runtime;
pub mod state;
pub mod utils;
pub mod web3;

use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use app::Widget;
use config::handlers::{Handler, TransactionEventHandlers, WidgetEventHandlers, WidgetEventKind};
use config::{WidgetConfig, WidgetOptions};
use error::WidgetError;
use web3::provider::eip1193_provider;

pub use composition::{compose, WidgetContext};
pub use error::Result;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("swap widget {} loaded", env!("CARGO_PKG_VERSION"));
}

/// Mount a widget into `parent`. `options` is a flat object: widget options, flags,
/// `on*` callbacks, an EIP-1193 `provider` and an optional `dialog` element.
#[wasm_bindgen(js_name = mountSwapWidget)]
pub fn mount_swap_widget(parent: web_sys::HtmlElement, options: JsValue) -> std::result::Result<(), JsValue> {
    let config = config_from_js(&options).map_err(to_js_error)?;
    log::info!("mounting swap widget into <{}>", parent.tag_name().to_lowercase());
    leptos::mount::mount_to(parent, move || view! { <Widget config=config/> }).forget();
    Ok(())
}

/// Mount a widget into `<body>`, configured from the page's query string. Values that
/// do not parse are logged and ignored.
#[wasm_bindgen(js_name = mountFromLocation)]
pub fn mount_from_location() {
    let params = utils::url::get_query_params();
    let config = WidgetConfig::new(WidgetOptions::from_query(&params));
    log::info!("mounting swap widget from {} query parameters", params.len());
    leptos::mount::mount_to_body(move || view! { <Widget config=config/> });
}

fn to_js_error(err: WidgetError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn config_from_js(options: &JsValue) -> Result<WidgetConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(WidgetConfig::default());
    }
    let mut config = WidgetConfig::new(WidgetOptions::from_js(options)?);

    if let Some(on_error) = js_function(options, "onError") {
        config = config.with_on_error(js_handler(on_error));
    }

    let mut widget_handlers = WidgetEventHandlers::new();
    for kind in WidgetEventKind::ALL {
        if let Some(f) = js_function(options, kind.handler_name()) {
            widget_handlers = widget_handlers.on(kind, js_handler(f));
        }
    }
    config = config
        .with_widget_handlers(widget_handlers)
        .with_transaction_handlers(TransactionEventHandlers {
            on_tx_submit: js_function(options, "onTxSubmit").map(js_handler),
            on_tx_success: js_function(options, "onTxSuccess").map(js_handler),
            on_tx_fail: js_function(options, "onTxFail").map(js_handler),
        });

    if let Some(provider) = js_property(options, "provider").and_then(|p| p.dyn_into::<js_sys::Object>().ok()) {
        config = config.with_provider(eip1193_provider(provider));
    }
    if let Some(dialog) = js_property(options, "dialog").and_then(|d| d.dyn_into::<web_sys::Element>().ok()) {
        config = config.with_dialog(dialog);
    }
    Ok(config)
}

fn js_property(object: &JsValue, name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn js_function(object: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_property(object, name).and_then(|value| value.dyn_into().ok())
}

/// Wrap a JS callback; the argument is passed as a plain object.
fn js_handler<A: Serialize + 'static>(f: js_sys::Function) -> Handler<A> {
    Handler::new(move |arg: &A| {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match arg.serialize(&serializer) {
            Ok(value) => {
                if let Err(err) = f.call1(&JsValue::NULL, &value) {
                    log::warn!("host callback threw: {:?}", err);
                }
            }
            Err(err) => log::warn!("could not pass event to host callback: {}", err),
        }
    })
}
