//! # Messaging Data Transfer Objects
//!
//! The single outbound message the widget sends to its embedding frame.

use serde::{Deserialize, Serialize};

/// Identifier carried by every resize notification, independent of configuration.
///
/// Host pages filter `message` events on this value.
pub const WIDGET_MESSAGE_ID: &str = "mappingfunk-uniswap-widgets";

/// Target origin used when posting to the parent frame.
pub const ANY_ORIGIN: &str = "*";

/// Size report sent to the parent window whenever the widget body is resized.
///
/// Fire-and-forget: receivers should treat every notification as idempotent and keep
/// only the latest height.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResizeNotification {
    pub id: String,
    pub iframe_height: i32,
    pub iframe_src: String,
}

impl ResizeNotification {
    pub fn new(iframe_height: i32, iframe_src: impl Into<String>) -> Self {
        Self {
            id: WIDGET_MESSAGE_ID.to_string(),
            iframe_height,
            iframe_src: iframe_src.into(),
        }
    }
}
