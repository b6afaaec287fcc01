//! Dialogs
//!
//! Rendered inside the widget's dialog anchor, or portalled into the host's anchor node
//! when one was supplied. Only the topmost open dialog is shown.

use leptos::portal::Portal;
use leptos::prelude::*;

use crate::composition::dialog::DialogKind;
use crate::composition::i18n::Message;
use crate::state::atoms::Field;
use crate::state::context::use_widget_context;
use crate::utils::constants::{DEFAULT_DEADLINE_MINUTES, SLIPPAGE_OPTIONS};
use crate::web3::token_list::TokenListStatus;

#[component]
pub fn DialogLayer() -> impl IntoView {
    let handle = use_widget_context();

    match handle.with_value(|ctx| ctx.dialog.portal_target()) {
        Some(mount) => {
            // The host node sits outside the themed box, so the theme travels along
            let theme = handle.with_value(|ctx| ctx.theme.theme().css_variables());
            log::debug!("dialogs portalled into the host anchor");
            view! {
                <Portal mount=mount>
                    <div class="swap-dialog-portal" style=theme.clone()>
                        <ActiveDialog/>
                    </div>
                </Portal>
            }
            .into_any()
        }
        None => view! { <ActiveDialog/> }.into_any(),
    }
}

#[component]
fn ActiveDialog() -> impl IntoView {
    let handle = use_widget_context();

    move || match handle.with_value(|ctx| ctx.dialog.active()) {
        None => ().into_any(),
        Some(DialogKind::TokenSelector(field)) => view! { <TokenSelector field=field/> }.into_any(),
        Some(DialogKind::Settings) => view! { <SettingsDialog/> }.into_any(),
    }
}

#[component]
fn DialogFrame(title: &'static str, children: Children) -> impl IntoView {
    let handle = use_widget_context();
    let (class, style, close) = handle.with_value(|ctx| {
        (
            ctx.dialog.container_class(),
            ctx.dialog.container_style(),
            ctx.i18n.t(Message::Close),
        )
    });

    view! {
        <div class=class style=style role="dialog">
            <div style="background: var(--swap-dialog); border-radius: var(--swap-radius-large); padding: 1rem; height: 100%; overflow-y: auto;">
                <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.75rem;">
                    <span style="color: var(--swap-primary); font-weight: 600;">{title}</span>
                    <button
                        class="swap-icon-button"
                        title=close
                        on:click=move |_| {
                            handle.with_value(|ctx| ctx.dialog.close());
                        }
                    >
                        "✕"
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn TokenSelector(field: Field) -> impl IntoView {
    let handle = use_widget_context();
    let (title, loading, empty) = handle.with_value(|ctx| {
        (
            ctx.i18n.t(Message::SelectToken),
            ctx.i18n.t(Message::LoadingTokens),
            ctx.i18n.t(Message::NoTokens),
        )
    });

    view! {
        <DialogFrame title=title>
            {move || {
                let (status, tokens) = handle.with_value(|ctx| {
                    let chain_id = ctx.connectivity.chain_id();
                    (ctx.token_list.status(), ctx.token_list.tokens_for_chain(chain_id))
                });
                match status {
                    TokenListStatus::Loading => view! { <p style="color: var(--swap-hint);">{loading}</p> }.into_any(),
                    TokenListStatus::Failed(message) => {
                        view! { <p style="color: var(--swap-error);">{message}</p> }.into_any()
                    }
                    TokenListStatus::Ready if tokens.is_empty() => {
                        view! { <p style="color: var(--swap-hint);">{empty}</p> }.into_any()
                    }
                    TokenListStatus::Ready => view! {
                        <ul class="swap-token-list" style="list-style: none; padding: 0; margin: 0;">
                            {tokens.into_iter().map(move |token| {
                                let symbol = token.symbol.clone();
                                let name = token.name.clone();
                                let logo = token.logo_uri.clone();
                                view! {
                                    <li>
                                        <button
                                            class="swap-token-row"
                                            style="display: flex; width: 100%; gap: 0.5rem; align-items: center; background: transparent; border: none; padding: 0.5rem 0; color: var(--swap-primary);"
                                            on:click=move |_| {
                                                let token = token.clone();
                                                handle.with_value(|ctx| {
                                                    ctx.atoms.select_token(field, token);
                                                    ctx.dialog.close();
                                                });
                                            }
                                        >
                                            {logo.map(|src| view! { <img src=src alt="" style="width: 24px; height: 24px; border-radius: 50%;"/> })}
                                            <span style="font-weight: 600;">{symbol}</span>
                                            <span style="color: var(--swap-secondary); font-size: 0.875rem;">{name}</span>
                                        </button>
                                    </li>
                                }
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any(),
                }
            }}
        </DialogFrame>
    }
}

#[component]
fn SettingsDialog() -> impl IntoView {
    let handle = use_widget_context();
    let (title, slippage_label, deadline_label, auto, reset) = handle.with_value(|ctx| {
        (
            ctx.i18n.t(Message::Settings),
            ctx.i18n.t(Message::MaxSlippage),
            ctx.i18n.t(Message::TransactionDeadline),
            ctx.i18n.t(Message::Auto),
            ctx.i18n.t(Message::Reset),
        )
    });

    view! {
        <DialogFrame title=title>
            {move || {
                let settings = handle.with_value(|ctx| ctx.atoms.settings.get());
                let deadline = settings.ttl_minutes.unwrap_or(DEFAULT_DEADLINE_MINUTES).to_string();
                view! {
                    <div class="swap-settings">
                        <p style="color: var(--swap-secondary);">{slippage_label}</p>
                        <div style="display: flex; gap: 0.25rem; flex-wrap: wrap;">
                            <button
                                class="swap-chip"
                                class:selected={settings.max_slippage.is_none()}
                                on:click=move |_| handle.with_value(|ctx| ctx.atoms.set_slippage(None))
                            >
                                {auto}
                            </button>
                            {SLIPPAGE_OPTIONS.iter().map(|&(value, label)| view! {
                                <button
                                    class="swap-chip"
                                    class:selected={settings.max_slippage == Some(value)}
                                    on:click=move |_| handle.with_value(|ctx| ctx.atoms.set_slippage(Some(value)))
                                >
                                    {label}
                                </button>
                            }).collect::<Vec<_>>()}
                        </div>

                        <p style="color: var(--swap-secondary); margin-top: 0.75rem;">{deadline_label}</p>
                        <input
                            class="swap-deadline"
                            inputmode="numeric"
                            prop:value=deadline
                            on:change=move |ev| {
                                let ttl = event_target_value(&ev).trim().parse::<u32>().ok().filter(|m| *m > 0);
                                handle.with_value(|ctx| ctx.atoms.set_deadline(ttl));
                            }
                        />

                        <button
                            class="swap-action"
                            style="margin-top: 1rem; width: 100%;"
                            on:click=move |_| handle.with_value(|ctx| ctx.atoms.reset_settings())
                        >
                            {reset}
                        </button>
                    </div>
                }
            }}
        </DialogFrame>
    }
}
