//! # Event Handlers
//!
//! Host-supplied callbacks. UI events are dispatched through [`WidgetEventHandlers`],
//! transaction lifecycle events through [`TransactionEventHandlers`]. Both are plain data
//! that the widget copies into its atom scope; neither is invoked outside the UI thread.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use shared::TokenDescriptor;

use crate::state::atoms::Field;
use crate::web3::provider::TransactionReceipt;
use crate::web3::transactions::TransactionInfo;

/// A single-threaded callback taking its argument by reference.
pub struct Handler<A: ?Sized>(Rc<dyn Fn(&A)>);

impl<A: ?Sized> Handler<A> {
    pub fn new(f: impl Fn(&A) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, arg: &A) {
        (self.0)(arg)
    }

    pub fn same_as(&self, other: &Handler<A>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A: ?Sized> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: ?Sized> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

// region:    --- Widget UI events

/// UI interactions reported to the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetEvent {
    ConnectWalletClick,
    TokenSelectorClick { field: Field },
    TokenChange { field: Field, token: TokenDescriptor },
    AmountChange { field: Field, amount: String },
    SwitchTokens,
    ReviewSwapClick,
    ExpandSwapDetails,
    SettingsReset,
    #[serde(rename_all = "camelCase")]
    SlippageChange { max_slippage: Option<f64> },
    #[serde(rename_all = "camelCase")]
    TransactionDeadlineChange { ttl_minutes: Option<u32> },
    #[serde(rename_all = "camelCase")]
    SwitchChain { chain_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEventKind {
    ConnectWalletClick,
    TokenSelectorClick,
    TokenChange,
    AmountChange,
    SwitchTokens,
    ReviewSwapClick,
    ExpandSwapDetails,
    SettingsReset,
    SlippageChange,
    TransactionDeadlineChange,
    SwitchChain,
}

impl WidgetEventKind {
    pub const ALL: [WidgetEventKind; 11] = [
        WidgetEventKind::ConnectWalletClick,
        WidgetEventKind::TokenSelectorClick,
        WidgetEventKind::TokenChange,
        WidgetEventKind::AmountChange,
        WidgetEventKind::SwitchTokens,
        WidgetEventKind::ReviewSwapClick,
        WidgetEventKind::ExpandSwapDetails,
        WidgetEventKind::SettingsReset,
        WidgetEventKind::SlippageChange,
        WidgetEventKind::TransactionDeadlineChange,
        WidgetEventKind::SwitchChain,
    ];

    /// Property name the host uses for this handler in an options object.
    pub fn handler_name(&self) -> &'static str {
        match self {
            WidgetEventKind::ConnectWalletClick => "onConnectWalletClick",
            WidgetEventKind::TokenSelectorClick => "onTokenSelectorClick",
            WidgetEventKind::TokenChange => "onTokenChange",
            WidgetEventKind::AmountChange => "onAmountChange",
            WidgetEventKind::SwitchTokens => "onSwitchTokens",
            WidgetEventKind::ReviewSwapClick => "onReviewSwapClick",
            WidgetEventKind::ExpandSwapDetails => "onExpandSwapDetails",
            WidgetEventKind::SettingsReset => "onSettingsReset",
            WidgetEventKind::SlippageChange => "onSlippageChange",
            WidgetEventKind::TransactionDeadlineChange => "onTransactionDeadlineChange",
            WidgetEventKind::SwitchChain => "onSwitchChain",
        }
    }
}

impl WidgetEvent {
    pub fn kind(&self) -> WidgetEventKind {
        match self {
            WidgetEvent::ConnectWalletClick => WidgetEventKind::ConnectWalletClick,
            WidgetEvent::TokenSelectorClick { .. } => WidgetEventKind::TokenSelectorClick,
            WidgetEvent::TokenChange { .. } => WidgetEventKind::TokenChange,
            WidgetEvent::AmountChange { .. } => WidgetEventKind::AmountChange,
            WidgetEvent::SwitchTokens => WidgetEventKind::SwitchTokens,
            WidgetEvent::ReviewSwapClick => WidgetEventKind::ReviewSwapClick,
            WidgetEvent::ExpandSwapDetails => WidgetEventKind::ExpandSwapDetails,
            WidgetEvent::SettingsReset => WidgetEventKind::SettingsReset,
            WidgetEvent::SlippageChange { .. } => WidgetEventKind::SlippageChange,
            WidgetEvent::TransactionDeadlineChange { .. } => WidgetEventKind::TransactionDeadlineChange,
            WidgetEvent::SwitchChain { .. } => WidgetEventKind::SwitchChain,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetEventHandlers {
    handlers: HashMap<WidgetEventKind, Handler<WidgetEvent>>,
}

impl WidgetEventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, kind: WidgetEventKind, handler: Handler<WidgetEvent>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Invoke the handler registered for the event's kind, if any.
    pub fn dispatch(&self, event: &WidgetEvent) -> bool {
        match self.handlers.get(&event.kind()) {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, kind: WidgetEventKind) -> Option<&Handler<WidgetEvent>> {
        self.handlers.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

// endregion: --- Widget UI events

// region:    --- Transaction events

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionEvent {
    Submit { hash: String, info: TransactionInfo },
    Success { hash: String, receipt: TransactionReceipt },
    Fail { hash: String, receipt: TransactionReceipt },
}

#[derive(Debug, Clone, Default)]
pub struct TransactionEventHandlers {
    pub on_tx_submit: Option<Handler<TransactionEvent>>,
    pub on_tx_success: Option<Handler<TransactionEvent>>,
    pub on_tx_fail: Option<Handler<TransactionEvent>>,
}

impl TransactionEventHandlers {
    pub fn dispatch(&self, event: &TransactionEvent) {
        let handler = match event {
            TransactionEvent::Submit { .. } => &self.on_tx_submit,
            TransactionEvent::Success { .. } => &self.on_tx_success,
            TransactionEvent::Fail { .. } => &self.on_tx_fail,
        };
        if let Some(handler) = handler {
            handler.call(event);
        }
    }
}

// endregion: --- Transaction events

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_dispatch_routes_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let handlers = WidgetEventHandlers::new().on(
            WidgetEventKind::AmountChange,
            Handler::new(move |event: &WidgetEvent| s.borrow_mut().push(event.clone())),
        );

        let change = WidgetEvent::AmountChange {
            field: Field::Input,
            amount: "1.5".to_string(),
        };
        assert!(handlers.dispatch(&change));
        assert!(!handlers.dispatch(&WidgetEvent::SwitchTokens));
        assert_eq!(seen.borrow().as_slice(), &[change]);
    }

    #[test]
    fn test_handler_names_are_distinct() {
        let mut names: Vec<_> = WidgetEventKind::ALL.iter().map(|k| k.handler_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WidgetEventKind::ALL.len());
        assert!(names.iter().all(|n| n.starts_with("on")));
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_value(WidgetEvent::SwitchChain { chain_id: 8453 }).unwrap();
        assert_eq!(json["type"], "switchChain");
        assert_eq!(json["chainId"], 8453);
    }

    #[test]
    fn test_handler_identity() {
        let a = Handler::new(|_: &u8| {});
        let b = a.clone();
        assert!(a.same_as(&b));
        assert!(!a.same_as(&Handler::new(|_: &u8| {})));
    }
}
