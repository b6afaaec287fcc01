//! # Shared Widget Configuration Library
//!
//! Static configuration tables and wire types consumed by the swap widget and its
//! preview harness. Nothing in here has behaviour beyond lookups and (de)serialisation.
//!
//! ## Structure
//!
//! - **[`chains`]**: Supported chain identifiers and their URL-friendly names
//! - **[`addresses`]**: Per-role contract address tables (multicall, router, ...)
//! - **[`tokens`]**: Token descriptors, the built-in token list and token-list documents
//! - **[`dto`]**: Messages exchanged with the embedding page
//!   - **[`dto::messaging`]**: The resize notification posted to the parent frame
//! - **[`utils`]**: Address formatting helpers
//!
//! ## Wire Format
//!
//! Everything that crosses a JavaScript boundary serialises with **camelCase** field names
//! so it matches what host pages and token-list documents already use:
//!
//! ```rust
//! use shared::dto::messaging::ResizeNotification;
//!
//! let message = ResizeNotification::new(480, "https://widget.example/?theme=dark");
//! let json = serde_json::to_value(&message).unwrap();
//! assert_eq!(json["id"], "mappingfunk-uniswap-widgets");
//! assert_eq!(json["iframeHeight"], 480);
//! ```

pub mod addresses;
pub mod chains;
pub mod dto;
pub mod tokens;
pub mod utils;

pub use addresses::AddressTable;
pub use chains::SupportedChainId;
pub use dto::*;
pub use tokens::{TokenDescriptor, TokenList, TokenListError};
pub use utils::*;
