//! # Background Work
//!
//! Async tasks started once a widget has mounted: the token-list fetch and the chain
//! poller. Tasks hold a weak reference to the widget context and stop on their own once
//! the widget is unmounted and the context dropped.

use std::rc::{Rc, Weak};

use futures::future::join_all;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

use crate::composition::WidgetContext;
use crate::error::Result;
use crate::utils::constants::POLLING_INTERVAL_MS;
use crate::web3::provider::ChainProvider;
use crate::web3::token_list::HttpTokenListFetcher;

pub fn start(context: &Rc<WidgetContext>) {
    if context.token_list.pending_url().is_some() {
        spawn_local(load_token_list(Rc::downgrade(context)));
    }
    match context.connectivity.provider() {
        Some(provider) => spawn_local(poll_chain(Rc::downgrade(context), provider)),
        None => log::info!("no chain provider configured, chain polling disabled"),
    }
}

/// Leave the fault fallback. A token list that failed to load is fetched again.
pub fn recover(context: &Rc<WidgetContext>) {
    let refetch = context.token_list.begin_retry();
    context.boundary.reset();
    if refetch {
        log::info!("retrying token list");
        spawn_local(load_token_list(Rc::downgrade(context)));
    }
}

async fn load_token_list(context: Weak<WidgetContext>) {
    let Some(ctx) = context.upgrade() else { return };
    if let Err(err) = ctx.token_list.load(&HttpTokenListFetcher).await {
        ctx.boundary.capture("token list", err);
    }
}

async fn poll_chain(context: Weak<WidgetContext>, provider: Rc<dyn ChainProvider>) {
    loop {
        let Some(ctx) = context.upgrade() else {
            log::debug!("widget unmounted, chain polling stopped");
            return;
        };
        poll_once(&ctx, provider.as_ref()).await;
        drop(ctx);
        TimeoutFuture::new(POLLING_INTERVAL_MS).await;
    }
}

/// One polling round: chain and account, head block, outdated contract reads, then
/// receipts for pending transactions. Provider errors end the round quietly; the next
/// round retries.
pub async fn poll_once(ctx: &WidgetContext, provider: &dyn ChainProvider) {
    match provider.chain_id().await {
        Ok(chain_id) => ctx.connectivity.set_chain_id(chain_id),
        Err(err) => log::debug!("eth_chainId failed: {}", err),
    }
    match provider.accounts().await {
        Ok(accounts) => ctx.connectivity.set_account(accounts.into_iter().next()),
        Err(err) => log::debug!("eth_accounts failed: {}", err),
    }

    let chain_id = ctx.connectivity.chain_id();
    let block = match provider.block_number().await {
        Ok(block) => block,
        Err(err) => {
            log::debug!("eth_blockNumber failed: {}", err);
            return;
        }
    };
    if !ctx.block_number.observe(chain_id, block) {
        return;
    }

    for batch in ctx.multicall.plan(&ctx.store, chain_id, block) {
        let outcome: Result<Vec<Option<String>>> =
            join_all(batch.calls.iter().map(|call| provider.call(call.clone(), block)))
                .await
                .into_iter()
                .collect();
        ctx.multicall.apply(&ctx.store, &batch, outcome);
    }

    for hash in ctx.transactions.pending(&ctx.atoms) {
        match provider.transaction_receipt(hash.clone()).await {
            Ok(Some(receipt)) => {
                ctx.transactions.apply_receipt(&ctx.atoms, &hash, receipt);
            }
            Ok(None) => {}
            Err(err) => log::debug!("receipt for {} failed: {}", hash, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::compose;
    use crate::config::handlers::{Handler, TransactionEvent, TransactionEventHandlers, WidgetEventHandlers};
    use crate::config::WidgetConfig;
    use crate::web3::multicall::Call;
    use crate::web3::provider::mock::MockTransport;
    use crate::web3::provider::RpcProvider;
    use crate::web3::transactions::TransactionInfo;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    const BLAST_SEPOLIA: u64 = 168587773;

    fn provider(block: &str) -> RpcProvider<MockTransport> {
        RpcProvider::new(
            MockTransport::default()
                .respond("eth_chainId", json!("0xa0c71fd"))
                .respond("eth_accounts", json!(["0xabc"]))
                .respond("eth_blockNumber", json!(block))
                .respond("eth_call", json!("0x2a"))
                .respond(
                    "eth_getTransactionReceipt",
                    json!({ "transactionHash": "0xaa", "blockNumber": block, "status": "0x1" }),
                ),
        )
    }

    #[test]
    fn test_round_updates_every_collaborator() {
        let ctx = compose(&WidgetConfig::default());
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let s = submitted.clone();
        ctx.atoms.sync_event_handlers(
            WidgetEventHandlers::default(),
            TransactionEventHandlers {
                on_tx_success: Some(Handler::new(move |e: &TransactionEvent| s.borrow_mut().push(e.clone()))),
                ..Default::default()
            },
        );
        let call = Call::new("0xF6B7843BdC72534ad0eE374836001b352AcB0d9F", "0x0f28c97d");
        ctx.store.listen(BLAST_SEPOLIA, vec![call.clone()]);
        ctx.transactions.add(&ctx.atoms, "0xaa", TransactionInfo::Wrap { amount: "1".into() }, None);

        block_on(poll_once(&ctx, &provider("0x64")));

        assert_eq!(ctx.connectivity.chain_id(), BLAST_SEPOLIA);
        assert!(ctx.connectivity.is_connected());
        assert_eq!(ctx.block_number.block(BLAST_SEPOLIA), Some(100));
        assert_eq!(ctx.store.call_result(BLAST_SEPOLIA, &call).unwrap().data.as_deref(), Some("0x2a"));
        assert_eq!(submitted.borrow().len(), 1);
        assert!(ctx.transactions.pending(&ctx.atoms).is_empty());
    }

    #[test]
    fn test_same_block_is_not_refetched() {
        let ctx = compose(&WidgetConfig::default());
        let call = Call::new("0xF6B7843BdC72534ad0eE374836001b352AcB0d9F", "0x0f28c97d");
        ctx.store.listen(BLAST_SEPOLIA, vec![call]);

        let first = provider("0x64");
        block_on(poll_once(&ctx, &first));
        let second = Rc::new(MockTransport::default()
            .respond("eth_chainId", json!("0xa0c71fd"))
            .respond("eth_accounts", json!([]))
            .respond("eth_blockNumber", json!("0x64")));
        block_on(poll_once(&ctx, &RpcProvider::new(second.clone())));

        assert!(second.requests.borrow().iter().all(|(method, _)| *method != "eth_call"));
        assert!(!ctx.connectivity.is_connected());
    }

    #[test]
    fn test_recover_leaves_fallback() {
        let ctx = Rc::new(compose(&WidgetConfig::default()));
        ctx.boundary.capture("view", crate::error::WidgetError::Render("boom".into()));
        assert!(ctx.boundary.is_faulted());

        recover(&ctx);
        assert!(!ctx.boundary.is_faulted());
        assert_eq!(ctx.token_list.status(), crate::web3::token_list::TokenListStatus::Ready);
    }
}
