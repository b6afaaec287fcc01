//! # Connectivity
//!
//! Chain-facing collaborators established below the atom scope: the active chain and
//! account, the latest block, contract reads through multicall, transaction tracking and
//! the token list.

pub mod block_number;
pub mod multicall;
pub mod provider;
pub mod token_list;
pub mod transactions;

use std::collections::BTreeMap;
use std::rc::Rc;

use leptos::prelude::{ArcRwSignal, Get, GetUntracked, Set, Update};
use shared::SupportedChainId;

use provider::{json_rpc_provider, ChainProvider};

pub struct ConnectivityScope {
    provider: Option<Rc<dyn ChainProvider>>,
    default_chain_id: u64,
    reported_chain_id: ArcRwSignal<Option<u64>>,
    account: ArcRwSignal<Option<String>>,
}

impl ConnectivityScope {
    /// An injected provider wins; otherwise the first JSON-RPC URL of the default chain
    /// is used for reads.
    pub fn new(
        provider: Option<Rc<dyn ChainProvider>>,
        rpc_urls: &BTreeMap<u64, Vec<String>>,
        default_chain_id: Option<u64>,
    ) -> Self {
        let default_chain_id = default_chain_id.unwrap_or_else(|| SupportedChainId::BlastSepolia.id());
        if SupportedChainId::from_id(default_chain_id).is_none() {
            log::warn!("default chain {} is not a supported chain", default_chain_id);
        }
        let provider = provider.or_else(|| {
            rpc_urls
                .get(&default_chain_id)
                .and_then(|urls| urls.first())
                .map(|url| json_rpc_provider(url))
        });
        Self {
            provider,
            default_chain_id,
            reported_chain_id: ArcRwSignal::new(None),
            account: ArcRwSignal::new(None),
        }
    }

    pub fn provider(&self) -> Option<Rc<dyn ChainProvider>> {
        self.provider.clone()
    }

    /// Chain the provider is on, or the configured default before it has answered.
    pub fn chain_id(&self) -> u64 {
        self.reported_chain_id.get().unwrap_or(self.default_chain_id)
    }

    pub fn default_chain_id(&self) -> u64 {
        self.default_chain_id
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        if self.reported_chain_id.get_untracked() != Some(chain_id) {
            log::info!("provider is on chain {}", chain_id);
            self.reported_chain_id.set(Some(chain_id));
        }
    }

    pub fn set_account(&self, account: Option<String>) {
        self.account.maybe_update(|current| {
            if *current == account {
                return false;
            }
            *current = account;
            true
        });
    }

    pub fn account(&self) -> Option<String> {
        self.account.get()
    }

    pub fn is_connected(&self) -> bool {
        self.account().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_resolution() {
        let scope = ConnectivityScope::new(None, &BTreeMap::new(), None);
        assert_eq!(scope.chain_id(), 168587773);
        assert!(scope.provider().is_none());

        let scope = ConnectivityScope::new(None, &BTreeMap::new(), Some(1));
        assert_eq!(scope.chain_id(), 1);
        scope.set_chain_id(8453);
        assert_eq!(scope.chain_id(), 8453);
        assert_eq!(scope.default_chain_id(), 1);
    }

    #[test]
    fn test_rpc_url_provides_reads() {
        let urls = BTreeMap::from([(168587773, vec!["https://sepolia.blast.io".to_string()])]);
        let scope = ConnectivityScope::new(None, &urls, None);
        assert!(scope.provider().is_some());

        let elsewhere = ConnectivityScope::new(None, &urls, Some(1));
        assert!(elsewhere.provider().is_none());
    }

    #[test]
    fn test_account() {
        let scope = ConnectivityScope::new(None, &BTreeMap::new(), None);
        assert!(!scope.is_connected());
        scope.set_account(Some("0xabc".into()));
        assert!(scope.is_connected());
    }
}
