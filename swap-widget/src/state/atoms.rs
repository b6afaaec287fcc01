//! # Atom Scope
//!
//! Fine-grained widget state: flags, the swap form, user settings, tracked transactions
//! and the host's event handlers. Every atom is seeded synchronously during composition
//! so the first rendered frame already reflects the configuration.

use std::cell::RefCell;
use std::collections::BTreeMap;

use leptos::prelude::{ArcRwSignal, Set, Update};
use serde::Serialize;
use shared::TokenDescriptor;

use crate::config::handlers::{TransactionEvent, TransactionEventHandlers, WidgetEvent, WidgetEventHandlers};
use crate::config::Flags;
use crate::web3::transactions::Transaction;

/// Side of the swap form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Input,
    Output,
}

impl Field {
    pub fn other(self) -> Field {
        match self {
            Field::Input => Field::Output,
            Field::Output => Field::Input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapState {
    pub input_token: Option<String>,
    pub input_amount: String,
    pub output_token: Option<String>,
    pub output_amount: String,
    /// The side the user typed into; the other side is quoted
    pub independent_field: Field,
}

impl SwapState {
    pub fn token(&self, field: Field) -> Option<&str> {
        match field {
            Field::Input => self.input_token.as_deref(),
            Field::Output => self.output_token.as_deref(),
        }
    }

    pub fn amount(&self, field: Field) -> &str {
        match field {
            Field::Input => &self.input_amount,
            Field::Output => &self.output_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Percent; `None` is automatic slippage
    pub max_slippage: Option<f64>,
    /// Minutes; `None` is the router default
    pub ttl_minutes: Option<u32>,
}

/// Everything the atoms are seeded with. Derived purely from the flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomInitialValues {
    pub flags: Flags,
    pub swap: SwapState,
}

impl AtomInitialValues {
    pub fn from_flags(flags: &Flags) -> Self {
        let input_amount = flags.default_input_amount.clone().unwrap_or_default();
        let output_amount = flags.default_output_amount.clone().unwrap_or_default();
        let independent_field = if input_amount.is_empty() && !output_amount.is_empty() {
            Field::Output
        } else {
            Field::Input
        };
        Self {
            flags: flags.clone(),
            swap: SwapState {
                input_token: flags.default_input_token_address.clone(),
                input_amount,
                output_token: flags.default_output_token_address.clone(),
                output_amount,
                independent_field,
            },
        }
    }
}

impl Default for AtomInitialValues {
    fn default() -> Self {
        Self::from_flags(&Flags::default())
    }
}

/// Atoms are signals owned by the scope rather than by the reactive owner, so they live
/// exactly as long as the widget context.
pub struct AtomScope {
    pub flags: ArcRwSignal<Flags>,
    pub swap: ArcRwSignal<SwapState>,
    pub settings: ArcRwSignal<Settings>,
    /// Keyed by transaction hash
    pub transactions: ArcRwSignal<BTreeMap<String, Transaction>>,
    widget_handlers: RefCell<WidgetEventHandlers>,
    transaction_handlers: RefCell<TransactionEventHandlers>,
}

impl AtomScope {
    pub fn new(initial: AtomInitialValues) -> Self {
        Self {
            flags: ArcRwSignal::new(initial.flags),
            swap: ArcRwSignal::new(initial.swap),
            settings: ArcRwSignal::new(Settings::default()),
            transactions: ArcRwSignal::new(BTreeMap::new()),
            widget_handlers: RefCell::new(WidgetEventHandlers::default()),
            transaction_handlers: RefCell::new(TransactionEventHandlers::default()),
        }
    }

    /// Replace the host's handlers with the ones from the latest render.
    pub fn sync_event_handlers(&self, widget: WidgetEventHandlers, transactions: TransactionEventHandlers) {
        log::debug!("syncing {} widget event handlers", widget.len());
        *self.widget_handlers.borrow_mut() = widget;
        *self.transaction_handlers.borrow_mut() = transactions;
    }

    /// Handlers are cloned out before the call so a handler may re-enter the scope.
    pub fn emit(&self, event: WidgetEvent) {
        let handlers = self.widget_handlers.borrow().clone();
        handlers.dispatch(&event);
    }

    pub fn emit_transaction(&self, event: TransactionEvent) {
        let handlers = self.transaction_handlers.borrow().clone();
        handlers.dispatch(&event);
    }

    pub fn set_amount(&self, field: Field, amount: String) {
        self.swap.update(|swap| {
            match field {
                Field::Input => swap.input_amount = amount.clone(),
                Field::Output => swap.output_amount = amount.clone(),
            }
            swap.independent_field = field;
        });
        self.emit(WidgetEvent::AmountChange { field, amount });
    }

    /// Picking the token already on the other side swaps the two sides.
    pub fn select_token(&self, field: Field, token: TokenDescriptor) {
        let switched = self.swap.try_update(|swap| {
            let same_as_other = swap
                .token(field.other())
                .is_some_and(|other| other.eq_ignore_ascii_case(&token.address));
            if same_as_other {
                std::mem::swap(&mut swap.input_token, &mut swap.output_token);
            } else {
                match field {
                    Field::Input => swap.input_token = Some(token.address.clone()),
                    Field::Output => swap.output_token = Some(token.address.clone()),
                }
            }
            same_as_other
        });
        if switched == Some(true) {
            self.emit(WidgetEvent::SwitchTokens);
        } else {
            self.emit(WidgetEvent::TokenChange { field, token });
        }
    }

    pub fn switch_tokens(&self) {
        self.swap.update(|swap| {
            std::mem::swap(&mut swap.input_token, &mut swap.output_token);
            std::mem::swap(&mut swap.input_amount, &mut swap.output_amount);
            swap.independent_field = swap.independent_field.other();
        });
        self.emit(WidgetEvent::SwitchTokens);
    }

    pub fn set_slippage(&self, max_slippage: Option<f64>) {
        self.settings.update(|s| s.max_slippage = max_slippage);
        self.emit(WidgetEvent::SlippageChange { max_slippage });
    }

    pub fn set_deadline(&self, ttl_minutes: Option<u32>) {
        self.settings.update(|s| s.ttl_minutes = ttl_minutes);
        self.emit(WidgetEvent::TransactionDeadlineChange { ttl_minutes });
    }

    pub fn reset_settings(&self) {
        self.settings.set(Settings::default());
        self.emit(WidgetEvent::SettingsReset);
    }
}
