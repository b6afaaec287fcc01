//! # Widget Configuration
//!
//! Everything a host page can pass to the widget. [`WidgetOptions`] is the plain-data part
//! and deserialises from a JS object, a JSON document or URL query parameters;
//! [`WidgetConfig`] adds the parts that cannot be serialised (callbacks, the chain
//! provider, a host-owned dialog anchor).
//!
//! A config is fixed for the lifetime of a mount. Changing it means composing a new
//! widget; only the event handlers are re-synced into a live widget.

pub mod handlers;
pub mod query;

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::composition::boundary::OnError;
use crate::composition::dialog::DialogOptions;
use crate::composition::sizing::WidgetWidth;
use crate::composition::theme::ThemeInput;
use crate::error::Result;
use crate::web3::provider::ChainProvider;
pub use crate::web3::token_list::TokenListSource;
use handlers::{Handler, TransactionEventHandlers, WidgetEventHandlers};

/// UI flags and swap defaults. They seed the atom scope before the first frame, so
/// changing them after mount has no effect.
///
/// `permit2`, `router_url` and the convenience-fee pair configure swap routing and
/// execution. The widget core does not interpret them; they are carried unchanged in
/// the atom scope for whatever submits the swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub branded_footer: bool,
    #[serde(rename = "hideConnectionUI")]
    pub hide_connection_ui: bool,
    pub permit2: bool,
    pub router_url: Option<String>,
    pub default_chain_id: Option<u64>,
    pub default_input_token_address: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub default_input_amount: Option<String>,
    pub default_output_token_address: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub default_output_amount: Option<String>,
    /// Fee in basis points taken on the output
    pub convenience_fee: Option<u32>,
    pub convenience_fee_recipient: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            branded_footer: true,
            hide_connection_ui: false,
            permit2: false,
            router_url: None,
            default_chain_id: None,
            default_input_token_address: None,
            default_input_amount: None,
            default_output_token_address: None,
            default_output_amount: None,
            convenience_fee: None,
            convenience_fee_recipient: None,
        }
    }
}

/// Amounts arrive as numbers from JS and as strings from query strings.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// One JSON-RPC URL or several, per chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcUrls {
    One(String),
    Many(Vec<String>),
}

impl RpcUrls {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RpcUrls::One(url) => vec![url.clone()],
            RpcUrls::Many(urls) => urls.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetOptions {
    pub theme: Option<ThemeInput>,
    pub locale: Option<String>,
    pub token_list: Option<TokenListSource>,
    pub width: Option<WidgetWidth>,
    pub class_name: Option<String>,
    pub dialog_options: DialogOptions,
    /// Keyed by decimal chain id
    pub json_rpc_url_map: BTreeMap<String, RpcUrls>,
    /// Read from the same top-level object, see [`WidgetOptions::from_json`]
    #[serde(skip)]
    pub flags: Flags,
}

impl WidgetOptions {
    /// Parse a flat JSON options object; flags live next to the other options.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let flags: Flags = serde_json::from_value(value.clone())?;
        let mut options: WidgetOptions = serde_json::from_value(value)?;
        options.flags = flags;
        Ok(options)
    }

    /// Parse a flat JS options object. Function-valued properties are ignored here and
    /// read separately as handlers.
    pub fn from_js(value: &wasm_bindgen::JsValue) -> Result<Self> {
        let flags: Flags = serde_wasm_bindgen::from_value(value.clone())?;
        let mut options: WidgetOptions = serde_wasm_bindgen::from_value(value.clone())?;
        options.flags = flags;
        Ok(options)
    }

    pub fn rpc_urls(&self) -> BTreeMap<u64, Vec<String>> {
        self.json_rpc_url_map
            .iter()
            .filter_map(|(chain, urls)| match chain.parse::<u64>() {
                Ok(chain_id) => Some((chain_id, urls.to_vec())),
                Err(_) => {
                    log::warn!("Ignoring JSON-RPC urls for non-numeric chain key {}", chain);
                    None
                }
            })
            .collect()
    }
}

/// Complete configuration for one widget mount.
#[derive(Clone, Default)]
pub struct WidgetConfig {
    pub options: WidgetOptions,
    pub on_error: Option<OnError>,
    pub widget_handlers: WidgetEventHandlers,
    pub transaction_handlers: TransactionEventHandlers,
    pub provider: Option<Rc<dyn ChainProvider>>,
    /// Host-owned node to render modals into
    pub dialog: Option<web_sys::Element>,
}

impl WidgetConfig {
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = Some(on_error);
        self
    }

    pub fn with_widget_handlers(mut self, handlers: WidgetEventHandlers) -> Self {
        self.widget_handlers = handlers;
        self
    }

    pub fn with_transaction_handlers(mut self, handlers: TransactionEventHandlers) -> Self {
        self.transaction_handlers = handlers;
        self
    }

    pub fn with_provider(mut self, provider: Rc<dyn ChainProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_dialog(mut self, dialog: web_sys::Element) -> Self {
        self.dialog = Some(dialog);
        self
    }

    pub fn flags(&self) -> &Flags {
        &self.options.flags
    }
}

impl std::fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("options", &self.options)
            .field("on_error", &self.on_error.is_some())
            .field("widget_handlers", &self.widget_handlers.len())
            .field("provider", &self.provider.is_some())
            .field("dialog", &self.dialog.is_some())
            .finish()
    }
}

/// Shorthand for building an `on_error` callback.
pub fn on_error(f: impl Fn(&crate::composition::boundary::Fault) + 'static) -> OnError {
    Handler::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::dialog::DialogAnimation;
    use serde_json::json;

    #[test]
    fn test_flat_options_object() {
        let options = WidgetOptions::from_json(json!({
            "theme": "dark",
            "locale": "fr-FR",
            "width": 682,
            "tokenList": "https://tokens.example/list.json",
            "brandedFooter": false,
            "hideConnectionUI": true,
            "defaultInputTokenAddress": "0x684063aB93Aa493F8a1389cD2Fbc5E9fBd324A91",
            "defaultInputAmount": 0,
            "defaultOutputAmount": "2.5",
            "convenienceFee": 30,
            "dialogOptions": { "animationType": "slide", "pageCentered": true },
            "jsonRpcUrlMap": { "168587773": "https://sepolia.blast.io", "1": ["https://a", "https://b"] }
        }))
        .unwrap();

        assert_eq!(options.locale.as_deref(), Some("fr-FR"));
        assert_eq!(options.width, Some(WidgetWidth::Px(682)));
        assert_eq!(
            options.token_list,
            Some(TokenListSource::Url("https://tokens.example/list.json".to_string()))
        );
        assert!(!options.flags.branded_footer);
        assert!(options.flags.hide_connection_ui);
        assert_eq!(options.flags.default_input_amount.as_deref(), Some("0"));
        assert_eq!(options.flags.default_output_amount.as_deref(), Some("2.5"));
        assert_eq!(options.flags.convenience_fee, Some(30));
        assert_eq!(options.dialog_options.animation_type, DialogAnimation::Slide);

        let urls = options.rpc_urls();
        assert_eq!(urls[&168587773], vec!["https://sepolia.blast.io".to_string()]);
        assert_eq!(urls[&1].len(), 2);
    }

    #[test]
    fn test_defaults() {
        let options = WidgetOptions::from_json(json!({})).unwrap();
        assert!(options.flags.branded_footer);
        assert!(!options.flags.hide_connection_ui);
        assert!(options.token_list.is_none());
        assert!(options.rpc_urls().is_empty());
    }

    #[test]
    fn test_inline_token_list() {
        let options = WidgetOptions::from_json(json!({
            "tokenList": [{
                "chainId": 1,
                "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                "symbol": "DAI",
                "name": "Dai Stablecoin",
                "decimals": 18
            }]
        }))
        .unwrap();
        match options.token_list {
            Some(TokenListSource::Inline(tokens)) => assert_eq!(tokens[0].symbol, "DAI"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_config_builder() {
        let config = WidgetConfig::new(WidgetOptions::default()).with_on_error(on_error(|_| {}));
        assert!(config.on_error.is_some());
        assert!(config.provider.is_none());
        assert!(format!("{:?}", config).contains("on_error: true"));
    }
}
