//! # Transactions
//!
//! Submitted transactions are tracked in the atom scope until a receipt arrives. Each
//! lifecycle event reaches the host exactly once: `on_tx_submit` when a hash is added,
//! then either `on_tx_success` or `on_tx_fail` when it is mined.

use leptos::prelude::{Update, WithUntracked};
use serde::Serialize;

use crate::config::handlers::TransactionEvent;
use crate::state::atoms::AtomScope;
use crate::web3::provider::TransactionReceipt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionInfo {
    #[serde(rename_all = "camelCase")]
    Approval { token_address: String, spender_address: String },
    #[serde(rename_all = "camelCase")]
    Swap {
        input_token: String,
        output_token: String,
        input_amount: String,
        output_amount: String,
    },
    Wrap { amount: String },
    Unwrap { amount: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub hash: String,
    pub info: TransactionInfo,
    pub added_block: Option<u64>,
    pub status: TransactionStatus,
    pub receipt: Option<TransactionReceipt>,
}

#[derive(Default)]
pub struct TransactionsUpdater;

impl TransactionsUpdater {
    pub fn new() -> Self {
        Self
    }

    /// Start tracking `hash`. A hash already tracked is ignored.
    pub fn add(&self, atoms: &AtomScope, hash: &str, info: TransactionInfo, block: Option<u64>) -> bool {
        let added = atoms.transactions.try_maybe_update(|txs| {
            if txs.contains_key(hash) {
                return (false, false);
            }
            txs.insert(
                hash.to_string(),
                Transaction {
                    hash: hash.to_string(),
                    info: info.clone(),
                    added_block: block,
                    status: TransactionStatus::Pending,
                    receipt: None,
                },
            );
            (true, true)
        });
        if added == Some(true) {
            log::info!("tracking transaction {}", hash);
            atoms.emit_transaction(TransactionEvent::Submit {
                hash: hash.to_string(),
                info,
            });
        }
        added == Some(true)
    }

    pub fn pending(&self, atoms: &AtomScope) -> Vec<String> {
        atoms.transactions.with_untracked(|txs| {
            txs.values()
                .filter(|tx| tx.status == TransactionStatus::Pending)
                .map(|tx| tx.hash.clone())
                .collect()
        })
    }

    /// Settle a pending transaction. Returns `false` for unknown or already settled hashes.
    pub fn apply_receipt(&self, atoms: &AtomScope, hash: &str, receipt: TransactionReceipt) -> bool {
        let settled = atoms.transactions.try_maybe_update(|txs| match txs.get_mut(hash) {
            Some(tx) if tx.status == TransactionStatus::Pending => {
                tx.status = if receipt.succeeded() {
                    TransactionStatus::Confirmed
                } else {
                    TransactionStatus::Failed
                };
                tx.receipt = Some(receipt.clone());
                (true, true)
            }
            _ => (false, false),
        });
        if settled != Some(true) {
            return false;
        }

        let event = if receipt.succeeded() {
            TransactionEvent::Success { hash: hash.to_string(), receipt }
        } else {
            log::warn!("transaction {} reverted", hash);
            TransactionEvent::Fail { hash: hash.to_string(), receipt }
        };
        atoms.emit_transaction(event);
        true
    }
}
