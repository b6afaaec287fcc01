//! # Data Transfer Objects (DTOs)
//!
//! Structures the widget exchanges with the page that embeds it.
//!
//! ## Module Organization
//!
//! - [`messaging`] - Cross-frame notifications posted to `window.parent`
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase, because the receiver is JavaScript
//! - **All types**: Implement both `Serialize` and `Deserialize`
//!
//! ## Example Message
//!
//! ```text
//! window.parent.postMessage({
//!   "id": "mappingfunk-uniswap-widgets",
//!   "iframeHeight": 512,
//!   "iframeSrc": "https://swap.example/?locale=en-US"
//! }, "*")
//! ```

pub mod messaging;

pub use messaging::*;
