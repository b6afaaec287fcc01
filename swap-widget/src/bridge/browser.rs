//! Browser side of the resize bridge

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ResizeObserver, Window};

use shared::dto::ResizeNotification;

use super::{BodyMetrics, MessageTransport, ResizeBridge};
use crate::utils::url::current_href;

/// Posts to `window.parent`, or to the window itself when the page is top-level.
pub struct WindowTransport {
    window: Window,
}

impl WindowTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn target(&self) -> Window {
        match self.window.parent() {
            Ok(Some(parent)) => parent,
            _ => self.window.clone(),
        }
    }
}

impl MessageTransport for WindowTransport {
    fn post(&self, message: &ResizeNotification, target_origin: &str) {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = match message.serialize(&serializer) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("could not encode resize notification: {}", err);
                return;
            }
        };
        if let Err(err) = self.target().post_message(&value, target_origin) {
            log::debug!("postMessage failed: {:?}", err);
        }
    }
}

/// Attach a `ResizeObserver` to `<body>` that reports every size change through the
/// bridge. The observer lives as long as the page.
pub fn observe_body() -> Result<(), JsValue> {
    let window = gloo_utils::window();
    let body = gloo_utils::body();
    let bridge = ResizeBridge::new(WindowTransport::new(window));

    let observed = body.clone();
    let on_resize = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(move |_entries, _observer| {
        let metrics = BodyMetrics {
            offset_height: observed.offset_height(),
            scroll_height: observed.scroll_height(),
        };
        bridge.on_resize(metrics, &current_href());
    });

    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&body);
    on_resize.forget();
    log::info!("resize bridge attached to document body");
    Ok(())
}
