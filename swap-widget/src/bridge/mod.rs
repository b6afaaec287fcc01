//! # Resize Bridge
//!
//! When the widget runs inside an iframe the host page cannot see its content height.
//! Every time `<body>` changes size the bridge posts a [`ResizeNotification`] to the
//! embedding window so it can resize the frame. Delivery is fire-and-forget: there is
//! no acknowledgement, and a top-level page simply receives its own message.

pub mod browser;

use std::cell::RefCell;
use std::rc::Rc;

use shared::dto::{ResizeNotification, ANY_ORIGIN};

/// Outbound channel for resize notifications.
pub trait MessageTransport {
    fn post(&self, message: &ResizeNotification, target_origin: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyMetrics {
    pub offset_height: i32,
    pub scroll_height: i32,
}

impl BodyMetrics {
    /// The smaller of the two heights is reported.
    pub fn reported_height(&self) -> i32 {
        self.offset_height.min(self.scroll_height)
    }
}

pub struct ResizeBridge<T> {
    transport: T,
}

impl<T: MessageTransport> ResizeBridge<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Build and post the notification for one observed resize.
    pub fn on_resize(&self, metrics: BodyMetrics, location: &str) -> ResizeNotification {
        let notification = ResizeNotification::new(metrics.reported_height(), location);
        log::debug!("posting iframe height {}", notification.iframe_height);
        self.transport.post(&notification, ANY_ORIGIN);
        notification
    }
}

/// Keeps every posted notification; for tests and the preview harness.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Rc<RefCell<Vec<(ResizeNotification, String)>>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<(ResizeNotification, String)> {
        self.sent.borrow().clone()
    }
}

impl MessageTransport for RecordingTransport {
    fn post(&self, message: &ResizeNotification, target_origin: &str) {
        self.sent.borrow_mut().push((message.clone(), target_origin.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::WIDGET_MESSAGE_ID;

    const SRC: &str = "https://swap.example/?theme=dark";

    #[test]
    fn test_reports_smaller_height() {
        let transport = RecordingTransport::default();
        let bridge = ResizeBridge::new(transport.clone());

        bridge.on_resize(BodyMetrics { offset_height: 500, scroll_height: 800 }, SRC);
        bridge.on_resize(BodyMetrics { offset_height: 800, scroll_height: 500 }, SRC);

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(n, _)| n.iframe_height == 500));
    }

    #[test]
    fn test_message_shape() {
        let transport = RecordingTransport::default();
        let notification = ResizeBridge::new(transport.clone())
            .on_resize(BodyMetrics { offset_height: 612, scroll_height: 612 }, SRC);

        assert_eq!(notification.id, WIDGET_MESSAGE_ID);
        assert_eq!(notification.id, "mappingfunk-uniswap-widgets");
        assert_eq!(notification.iframe_src, SRC);

        let (_, origin) = &transport.sent()[0];
        assert_eq!(origin, "*");

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["iframeHeight"], 612);
        assert_eq!(json["iframeSrc"], SRC);
    }
}
