//! Swap Panel Component
//!
//! The form itself: two token/amount rows, a switch button, the connect or review
//! button and the branded footer. [`SwapPanelModel`] is everything the panel shows,
//! computed from the widget context so it can be checked without a DOM.

use leptos::prelude::*;
use shared::addresses::swap_router_addresses;
use shared::truncate_address;

use crate::composition::dialog::DialogKind;
use crate::composition::i18n::Message;
use crate::composition::WidgetContext;
use crate::config::handlers::WidgetEvent;
use crate::state::atoms::Field;
use crate::state::context::use_widget_context;
use crate::web3::token_list::TokenListStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct SideModel {
    pub field: Field,
    pub label: &'static str,
    pub token_address: Option<String>,
    /// `None` until a token is picked, or while its list entry is unknown
    pub token_symbol: Option<String>,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapPanelModel {
    pub title: &'static str,
    pub chain_id: u64,
    pub input: SideModel,
    pub output: SideModel,
    pub show_connect_button: bool,
    /// Shortened connected account
    pub account: Option<String>,
    /// The active chain has a swap router
    pub network_supported: bool,
    pub review_enabled: bool,
    pub show_branded_footer: bool,
    pub tokens_loading: bool,
}

impl SwapPanelModel {
    pub fn from_context(ctx: &WidgetContext) -> Self {
        let flags = ctx.atoms.flags.get();
        let swap = ctx.atoms.swap.get();
        let chain_id = ctx.connectivity.chain_id();

        let side = |field: Field, label: Message| {
            let token_address = swap.token(field).map(str::to_string);
            let token_symbol = token_address
                .as_deref()
                .and_then(|address| ctx.token_list.find(chain_id, address))
                .map(|token| token.symbol);
            SideModel {
                field,
                label: ctx.i18n.t(label),
                token_address,
                token_symbol,
                amount: swap.amount(field).to_string(),
            }
        };
        let input = side(Field::Input, Message::YouPay);
        let output = side(Field::Output, Message::YouReceive);

        let network_supported = swap_router_addresses().contains(chain_id);
        let has_amount = swap
            .amount(swap.independent_field)
            .parse::<f64>()
            .is_ok_and(|amount| amount > 0.0);

        Self {
            title: ctx.i18n.t(Message::Swap),
            chain_id,
            review_enabled: network_supported
                && input.token_address.is_some()
                && output.token_address.is_some()
                && has_amount,
            input,
            output,
            show_connect_button: !flags.hide_connection_ui && !ctx.connectivity.is_connected(),
            account: ctx.connectivity.account().map(|account| truncate_address(&account)),
            network_supported,
            show_branded_footer: flags.branded_footer,
            tokens_loading: ctx.token_list.status() == TokenListStatus::Loading,
        }
    }
}

#[component]
pub fn SwapPanel() -> impl IntoView {
    let handle = use_widget_context();
    let (connect_label, review_label, settings_label, footer_label, select_label) = handle.with_value(|ctx| {
        (
            ctx.i18n.t(Message::ConnectWallet),
            ctx.i18n.t(Message::ReviewSwap),
            ctx.i18n.t(Message::Settings),
            ctx.i18n.t(Message::PoweredBy),
            ctx.i18n.t(Message::SelectToken),
        )
    });

    view! {
        <div class="swap-panel" style="background: var(--swap-module); border-radius: var(--swap-radius-large); padding: 0.75rem;">
            {move || {
                let model = handle.with_value(|ctx| SwapPanelModel::from_context(ctx));
                let review_enabled = model.review_enabled;

                view! {
                    <div class="swap-panel-body">
                        <div class="swap-panel-header" style="display: flex; justify-content: space-between; align-items: center;">
                            <span style="color: var(--swap-primary); font-weight: 600;">{model.title}</span>
                            {model.account.map(|account| view! {
                                <span class="swap-account" style="color: var(--swap-secondary); font-family: monospace;">{account}</span>
                            })}
                            <button
                                class="swap-icon-button"
                                title=settings_label
                                on:click=move |_| handle.with_value(|ctx| ctx.dialog.open(DialogKind::Settings))
                            >
                                "⚙"
                            </button>
                        </div>

                        <SwapSide side=model.input select_label=select_label/>
                        <button
                            class="swap-switch"
                            on:click=move |_| handle.with_value(|ctx| ctx.atoms.switch_tokens())
                        >
                            "↓"
                        </button>
                        <SwapSide side=model.output select_label=select_label/>

                        {if model.show_connect_button {
                            view! {
                                <button
                                    class="swap-action"
                                    style="width: 100%; background: var(--swap-accent); color: var(--swap-on-interactive);"
                                    on:click=move |_| handle.with_value(|ctx| ctx.atoms.emit(WidgetEvent::ConnectWalletClick))
                                >
                                    {connect_label}
                                </button>
                            }.into_any()
                        } else {
                            view! {
                                <button
                                    class="swap-action"
                                    style="width: 100%; background: var(--swap-accent); color: var(--swap-on-interactive);"
                                    disabled={!review_enabled}
                                    on:click=move |_| handle.with_value(|ctx| ctx.atoms.emit(WidgetEvent::ReviewSwapClick))
                                >
                                    {review_label}
                                </button>
                            }.into_any()
                        }}

                        {model.show_branded_footer.then(|| view! {
                            <p class="swap-footer" style="color: var(--swap-hint); text-align: center; font-size: 0.75rem;">
                                {footer_label}
                            </p>
                        })}
                    </div>
                }
            }}
        </div>
    }
}

#[component]
fn SwapSide(side: SideModel, select_label: &'static str) -> impl IntoView {
    let handle = use_widget_context();
    let field = side.field;
    let symbol = side.token_symbol.unwrap_or_else(|| select_label.to_string());

    view! {
        <div class="swap-side" style="background: var(--swap-interactive); border-radius: var(--swap-radius-medium); padding: 0.75rem; margin: 0.25rem 0;">
            <span class="swap-side-label" style="color: var(--swap-secondary); font-size: 0.875rem;">{side.label}</span>
            <div style="display: flex; align-items: center; gap: 0.5rem;">
                <input
                    class="swap-amount"
                    inputmode="decimal"
                    placeholder="0"
                    style="flex: 1; background: transparent; border: none; color: var(--swap-primary); font-size: 1.5rem;"
                    prop:value=side.amount
                    on:change=move |ev| {
                        let amount = event_target_value(&ev);
                        handle.with_value(|ctx| ctx.atoms.set_amount(field, amount));
                    }
                />
                <button
                    class="swap-token-select"
                    on:click=move |_| {
                        handle.with_value(|ctx| {
                            ctx.atoms.emit(WidgetEvent::TokenSelectorClick { field });
                            ctx.dialog.open(DialogKind::TokenSelector(field));
                        })
                    }
                >
                    {symbol}
                </button>
            </div>
        </div>
    }
}
