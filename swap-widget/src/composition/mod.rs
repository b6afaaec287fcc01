//! # Composition
//!
//! [`compose`] builds every scope a mounted widget needs, in a fixed order, before any
//! component renders. Each step may use the handles produced before it; the atom scope
//! in particular is seeded from the flags inside this function so the very first frame
//! already reflects the configuration.
//!
//! ```text
//! Strict > Theme > Sizing > I18n > Dialog > ErrorBoundary > Store > Atoms
//!        > Connectivity > BlockNumber > Multicall > Transactions > TokenList
//! ```
//!
//! Nothing here is global. Mounting twice composes twice.

pub mod boundary;
pub mod dialog;
pub mod i18n;
pub mod sizing;
pub mod strict;
pub mod theme;

use std::fmt;

use shared::addresses::multicall_address;

use crate::config::WidgetConfig;
use crate::state::atoms::{AtomInitialValues, AtomScope};
use crate::state::store::Store;
use crate::web3::block_number::BlockNumberScope;
use crate::web3::multicall::MulticallUpdater;
use crate::web3::token_list::TokenListScope;
use crate::web3::transactions::TransactionsUpdater;
use crate::web3::ConnectivityScope;
use boundary::FaultBoundary;
use dialog::{DialogAnchor, DialogScope};
use i18n::I18nScope;
use sizing::SizingScope;
use strict::StrictScope;
use theme::ThemeScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Strict,
    Theme,
    Sizing,
    I18n,
    Dialog,
    ErrorBoundary,
    Store,
    Atoms,
    Connectivity,
    BlockNumber,
    Multicall,
    Transactions,
    TokenList,
}

/// Outermost first.
pub const LAYER_ORDER: [Layer; 13] = [
    Layer::Strict,
    Layer::Theme,
    Layer::Sizing,
    Layer::I18n,
    Layer::Dialog,
    Layer::ErrorBoundary,
    Layer::Store,
    Layer::Atoms,
    Layer::Connectivity,
    Layer::BlockNumber,
    Layer::Multicall,
    Layer::Transactions,
    Layer::TokenList,
];

pub struct WidgetContext {
    pub strict: StrictScope,
    pub theme: ThemeScope,
    pub sizing: SizingScope,
    pub i18n: I18nScope,
    pub dialog: DialogScope,
    pub boundary: FaultBoundary,
    pub store: Store,
    pub atoms: AtomScope,
    pub connectivity: ConnectivityScope,
    pub block_number: BlockNumberScope,
    pub multicall: MulticallUpdater,
    pub transactions: TransactionsUpdater,
    pub token_list: TokenListScope,
    established: Vec<Layer>,
}

impl WidgetContext {
    /// Layers in the order they were established.
    pub fn established(&self) -> &[Layer] {
        &self.established
    }
}

impl fmt::Debug for WidgetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetContext")
            .field("store", &self.store.id())
            .field("dialog_anchor", &self.dialog.anchor().id())
            .field("locale", &self.i18n.locale())
            .field("established", &self.established)
            .finish()
    }
}

pub fn compose(config: &WidgetConfig) -> WidgetContext {
    let options = &config.options;
    let mut established = Vec::with_capacity(LAYER_ORDER.len());

    let strict = StrictScope::new();
    established.push(Layer::Strict);

    let theme = ThemeScope::new(options.theme.as_ref());
    established.push(Layer::Theme);

    let sizing = SizingScope::new(options.width.as_ref(), options.class_name.as_deref());
    established.push(Layer::Sizing);

    let i18n = I18nScope::new(options.locale.as_deref());
    established.push(Layer::I18n);

    let dialog = DialogScope::new(DialogAnchor::new(config.dialog.clone()), options.dialog_options);
    established.push(Layer::Dialog);

    let boundary = FaultBoundary::new(config.on_error.clone());
    established.push(Layer::ErrorBoundary);

    let store = Store::new();
    established.push(Layer::Store);

    let initial = boundary
        .guard("atoms", || {
            strict.initialize("atom", || AtomInitialValues::from_flags(&options.flags))
        })
        .unwrap_or_default();
    let atoms = AtomScope::new(initial);
    established.push(Layer::Atoms);

    let connectivity = ConnectivityScope::new(
        config.provider.clone(),
        &options.rpc_urls(),
        options.flags.default_chain_id,
    );
    established.push(Layer::Connectivity);

    let block_number = BlockNumberScope::new();
    established.push(Layer::BlockNumber);

    let multicall = MulticallUpdater::new(multicall_address());
    established.push(Layer::Multicall);

    let transactions = TransactionsUpdater::new();
    established.push(Layer::Transactions);

    let token_list = TokenListScope::resolve(options.token_list.as_ref());
    established.push(Layer::TokenList);

    log::info!(
        "composed widget: {}, locale {}, chain {}",
        store.id(),
        i18n.locale(),
        connectivity.default_chain_id()
    );

    WidgetContext {
        strict,
        theme,
        sizing,
        i18n,
        dialog,
        boundary,
        store,
        atoms,
        connectivity,
        block_number,
        multicall,
        transactions,
        token_list,
        established,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::swap_panel::SwapPanelModel;
    use crate::config::{Flags, WidgetOptions};
    use crate::web3::token_list::TokenListSource;
    use leptos::prelude::GetUntracked;
    use shared::TokenDescriptor;

    fn config(flags: Flags) -> WidgetConfig {
        WidgetConfig::new(WidgetOptions {
            flags,
            ..Default::default()
        })
    }

    #[test]
    fn test_layers_established_in_order() {
        let ctx = compose(&WidgetConfig::default());
        assert_eq!(ctx.established(), &LAYER_ORDER);
    }

    #[test]
    fn test_first_frame_reflects_flags() {
        let ctx = compose(&config(Flags {
            hide_connection_ui: true,
            branded_footer: false,
            default_input_token_address: Some("0x684063aB93Aa493F8a1389cD2Fbc5E9fBd324A91".into()),
            default_input_amount: Some("0".into()),
            ..Flags::default()
        }));

        let frame = SwapPanelModel::from_context(&ctx);
        assert!(!frame.show_connect_button);
        assert!(!frame.show_branded_footer);
        assert_eq!(frame.input.amount, "0");
        assert_eq!(frame.input.token_symbol.as_deref(), Some("F(BTC,20)"));
        assert_eq!(frame.chain_id, 168587773);
    }

    #[test]
    fn test_remount_builds_fresh_scopes() {
        let config = WidgetConfig::default();
        let first = compose(&config);
        let second = compose(&config);
        assert_ne!(first.store.id(), second.store.id());
        assert!(!first.dialog.anchor().same_as(second.dialog.anchor()));

        first.atoms.set_amount(crate::state::atoms::Field::Input, "5".into());
        assert_eq!(second.atoms.swap.get_untracked().input_amount, "");
    }

    #[test]
    fn test_token_list_reaches_provider_as_given() {
        let token = TokenDescriptor {
            chain_id: 1,
            address: "0x6B175474E89094C44Da98b954EedeAC495271d0F".into(),
            symbol: "DAI".into(),
            name: "Dai Stablecoin".into(),
            decimals: 18,
            logo_uri: None,
        };
        let ctx = compose(&WidgetConfig::new(WidgetOptions {
            token_list: Some(TokenListSource::Inline(vec![token.clone(), token.clone()])),
            ..Default::default()
        }));
        assert_eq!(ctx.token_list.tokens(), vec![token.clone(), token]);
    }

    #[test]
    fn test_composition_does_not_report_faults() {
        let ctx = compose(&WidgetConfig::default());
        assert!(!ctx.boundary.is_faulted());
        assert_eq!(ctx.boundary.reported(), 0);
    }
}
