//! # Chain Providers
//!
//! [`ChainProvider`] is the seam between the widget and a chain. Two transports back it:
//! an injected EIP-1193 object (`window.ethereum` or whatever the host passes) and a plain
//! JSON-RPC endpoint over HTTP. Both speak the same four read methods, so
//! [`RpcProvider`] wraps either one.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::{Result, WidgetError};
use crate::web3::multicall::Call;

pub type ProviderFuture<'a, T> = LocalBoxFuture<'a, Result<T>>;

/// Read access to one chain.
pub trait ChainProvider {
    fn chain_id(&self) -> ProviderFuture<'_, u64>;
    fn accounts(&self) -> ProviderFuture<'_, Vec<String>>;
    fn block_number(&self) -> ProviderFuture<'_, u64>;
    /// `eth_call` at `block_number`; `None` when the call reverted or returned nothing
    fn call(&self, call: Call, block_number: u64) -> ProviderFuture<'_, Option<String>>;
    fn transaction_receipt(&self, hash: String) -> ProviderFuture<'_, Option<TransactionReceipt>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    /// 1 on success, 0 on revert
    pub status: u8,
    pub gas_used: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    block_number: String,
    status: Option<String>,
    gas_used: Option<String>,
}

impl TryFrom<RawReceipt> for TransactionReceipt {
    type Error = WidgetError;

    fn try_from(raw: RawReceipt) -> Result<Self> {
        Ok(TransactionReceipt {
            transaction_hash: raw.transaction_hash,
            block_number: parse_quantity(&raw.block_number)?,
            status: match raw.status.as_deref() {
                Some(status) => parse_quantity(status)? as u8,
                None => 1,
            },
            gas_used: raw.gas_used,
        })
    }
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(value: &str) -> Result<u64> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| WidgetError::Provider(format!("expected hex quantity, got {}", value)))?;
    u64::from_str_radix(digits, 16).map_err(|e| WidgetError::Provider(format!("bad quantity {}: {}", value, e)))
}

pub fn format_quantity(value: u64) -> String {
    format!("0x{:x}", value)
}

// region:    --- Transports

/// Raw JSON-RPC request channel.
pub trait RpcTransport {
    fn request(&self, method: &'static str, params: Value) -> LocalBoxFuture<'_, Result<Value>>;
}

/// JSON-RPC methods over any transport.
pub struct RpcProvider<T> {
    transport: T,
}

impl<T: RpcTransport> RpcProvider<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn quantity(&self, method: &'static str) -> Result<u64> {
        let value = self.transport.request(method, json!([])).await?;
        let text = value
            .as_str()
            .ok_or_else(|| WidgetError::Provider(format!("{} returned {}", method, value)))?;
        parse_quantity(text)
    }
}

impl<T: RpcTransport> ChainProvider for RpcProvider<T> {
    fn chain_id(&self) -> ProviderFuture<'_, u64> {
        Box::pin(self.quantity("eth_chainId"))
    }

    fn accounts(&self) -> ProviderFuture<'_, Vec<String>> {
        Box::pin(async move {
            let value = self.transport.request("eth_accounts", json!([])).await?;
            Ok(serde_json::from_value(value)?)
        })
    }

    fn block_number(&self) -> ProviderFuture<'_, u64> {
        Box::pin(self.quantity("eth_blockNumber"))
    }

    fn call(&self, call: Call, block_number: u64) -> ProviderFuture<'_, Option<String>> {
        Box::pin(async move {
            let params = json!([{ "to": call.address, "data": call.call_data }, format_quantity(block_number)]);
            let value = self.transport.request("eth_call", params).await?;
            Ok(value.as_str().filter(|data| *data != "0x").map(str::to_string))
        })
    }

    fn transaction_receipt(&self, hash: String) -> ProviderFuture<'_, Option<TransactionReceipt>> {
        Box::pin(async move {
            let value = self.transport.request("eth_getTransactionReceipt", json!([hash])).await?;
            if value.is_null() {
                return Ok(None);
            }
            let raw: RawReceipt = serde_json::from_value(value)?;
            Ok(Some(raw.try_into()?))
        })
    }
}

/// An injected EIP-1193 provider object.
pub struct Eip1193Transport {
    provider: js_sys::Object,
}

impl Eip1193Transport {
    pub fn new(provider: js_sys::Object) -> Self {
        Self { provider }
    }
}

impl RpcTransport for Eip1193Transport {
    fn request(&self, method: &'static str, params: Value) -> LocalBoxFuture<'_, Result<Value>> {
        Box::pin(async move {
            let request = js_sys::Reflect::get(&self.provider, &JsValue::from_str("request"))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
                .ok_or_else(|| WidgetError::Provider("provider has no request() method".to_string()))?;

            let serializer = serde_wasm_bindgen::Serializer::json_compatible();
            let args = json!({ "method": method, "params": params }).serialize(&serializer)?;
            let promise = request
                .call1(&self.provider, &args)
                .map_err(|e| WidgetError::Provider(format!("{} failed: {:?}", method, e)))?;
            let result = JsFuture::from(js_sys::Promise::from(promise))
                .await
                .map_err(|e| WidgetError::Provider(format!("{} rejected: {:?}", method, e)))?;

            if result.is_undefined() || result.is_null() {
                return Ok(Value::Null);
            }
            Ok(serde_wasm_bindgen::from_value(result)?)
        })
    }
}

/// A JSON-RPC endpoint reached over HTTP.
pub struct HttpTransport {
    url: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RpcTransport for HttpTransport {
    fn request(&self, method: &'static str, params: Value) -> LocalBoxFuture<'_, Result<Value>> {
        Box::pin(async move {
            let body = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params });
            let response: RpcResponse = gloo_net::http::Request::post(&self.url)
                .json(&body)?
                .send()
                .await?
                .json()
                .await?;
            if let Some(error) = response.error {
                return Err(WidgetError::Provider(format!("{} ({}): {}", method, error.code, error.message)));
            }
            Ok(response.result.unwrap_or(Value::Null))
        })
    }
}

// endregion: --- Transports

pub fn eip1193_provider(provider: js_sys::Object) -> Rc<dyn ChainProvider> {
    Rc::new(RpcProvider::new(Eip1193Transport::new(provider)))
}

pub fn json_rpc_provider(url: &str) -> Rc<dyn ChainProvider> {
    log::info!("using JSON-RPC endpoint {}", url);
    Rc::new(RpcProvider::new(HttpTransport::new(url)))
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned responses keyed by method name.
    #[derive(Default)]
    pub struct MockTransport {
        pub responses: RefCell<HashMap<&'static str, Value>>,
        pub requests: RefCell<Vec<(&'static str, Value)>>,
    }

    impl MockTransport {
        pub fn respond(self, method: &'static str, value: Value) -> Self {
            self.responses.borrow_mut().insert(method, value);
            self
        }
    }

    impl RpcTransport for MockTransport {
        fn request(&self, method: &'static str, params: Value) -> LocalBoxFuture<'_, Result<Value>> {
            self.requests.borrow_mut().push((method, params));
            let response = self
                .responses
                .borrow()
                .get(method)
                .cloned()
                .ok_or_else(|| WidgetError::Provider(format!("no response for {}", method)));
            Box::pin(async move { response })
        }
    }

    impl<T: RpcTransport> RpcTransport for Rc<T> {
        fn request(&self, method: &'static str, params: Value) -> LocalBoxFuture<'_, Result<Value>> {
            self.as_ref().request(method, params)
        }
    }
}
