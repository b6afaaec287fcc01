//! # Token List
//!
//! The token list handed to the token-list provider. An inline list is used exactly as
//! given, duplicates included. A URL is fetched once after mount; until it arrives the
//! scope reports [`TokenListStatus::Loading`]. Without either, the built-in Blast Sepolia
//! list is used.

use futures::future::LocalBoxFuture;
use leptos::prelude::{ArcRwSignal, Get, GetUntracked, Set, With};
use serde::{Deserialize, Serialize};
use shared::tokens::{blast_sepolia_tokens, parse_token_list};
use shared::TokenDescriptor;

use crate::error::{Result, WidgetError};

/// Where the token list comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenListSource {
    Url(String),
    Inline(Vec<TokenDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenListStatus {
    Loading,
    Ready,
    Failed(String),
}

pub trait TokenListFetcher {
    fn fetch(&self, url: String) -> LocalBoxFuture<'_, Result<Vec<TokenDescriptor>>>;
}

/// Fetches token-list documents over HTTP.
pub struct HttpTokenListFetcher;

impl TokenListFetcher for HttpTokenListFetcher {
    fn fetch(&self, url: String) -> LocalBoxFuture<'_, Result<Vec<TokenDescriptor>>> {
        Box::pin(async move {
            let response = gloo_net::http::Request::get(&url).send().await?;
            if !response.ok() {
                return Err(WidgetError::TokenList(format!(
                    "{} answered {} {}",
                    url,
                    response.status(),
                    response.status_text()
                )));
            }
            let body = response.text().await?;
            Ok(parse_token_list(&body)?)
        })
    }
}

pub struct TokenListScope {
    pending_url: Option<String>,
    tokens: ArcRwSignal<Vec<TokenDescriptor>>,
    status: ArcRwSignal<TokenListStatus>,
}

impl TokenListScope {
    pub fn resolve(source: Option<&TokenListSource>) -> Self {
        let (pending_url, tokens, status) = match source {
            Some(TokenListSource::Inline(tokens)) => (None, tokens.clone(), TokenListStatus::Ready),
            Some(TokenListSource::Url(url)) => (Some(url.clone()), Vec::new(), TokenListStatus::Loading),
            None => (None, blast_sepolia_tokens(), TokenListStatus::Ready),
        };
        Self {
            pending_url,
            tokens: ArcRwSignal::new(tokens),
            status: ArcRwSignal::new(status),
        }
    }

    /// URL still to be fetched, if the list came from one.
    pub fn pending_url(&self) -> Option<&str> {
        self.pending_url.as_deref()
    }

    /// Fetch the pending URL, if any, and settle the scope with the outcome.
    pub async fn load(&self, fetcher: &dyn TokenListFetcher) -> Result<()> {
        let Some(url) = self.pending_url.clone() else {
            return Ok(());
        };
        log::info!("fetching token list from {}", url);
        let outcome = fetcher.fetch(url).await;
        self.complete(outcome)
    }

    /// On failure the error is also returned so the caller can route it to the boundary.
    pub fn complete(&self, outcome: Result<Vec<TokenDescriptor>>) -> Result<()> {
        match outcome {
            Ok(tokens) => {
                log::info!("token list ready, {} tokens", tokens.len());
                self.tokens.set(tokens);
                self.status.set(TokenListStatus::Ready);
                Ok(())
            }
            Err(err) => {
                self.status.set(TokenListStatus::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Put a failed URL list back into loading. Returns `false` when there is nothing to
    /// fetch again.
    pub fn begin_retry(&self) -> bool {
        let failed = matches!(self.status.get_untracked(), TokenListStatus::Failed(_));
        if !failed || self.pending_url.is_none() {
            return false;
        }
        self.status.set(TokenListStatus::Loading);
        true
    }

    pub fn status(&self) -> TokenListStatus {
        self.status.get()
    }

    pub fn tokens(&self) -> Vec<TokenDescriptor> {
        self.tokens.get()
    }

    pub fn tokens_for_chain(&self, chain_id: u64) -> Vec<TokenDescriptor> {
        self.tokens().into_iter().filter(|t| t.chain_id == chain_id).collect()
    }

    /// First descriptor for `address` on `chain_id`.
    pub fn find(&self, chain_id: u64, address: &str) -> Option<TokenDescriptor> {
        self.tokens.with(|tokens| tokens.iter().find(|t| t.matches(chain_id, address)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn dai(chain_id: u64) -> TokenDescriptor {
        TokenDescriptor {
            chain_id,
            address: "0x6B175474E89094C44Da98b954EedeAC495271d0F".to_string(),
            symbol: "DAI".to_string(),
            name: "Dai Stablecoin".to_string(),
            decimals: 18,
            logo_uri: None,
        }
    }

    struct StaticFetcher(Result<Vec<TokenDescriptor>>);

    impl TokenListFetcher for StaticFetcher {
        fn fetch(&self, _url: String) -> LocalBoxFuture<'_, Result<Vec<TokenDescriptor>>> {
            let out = self.0.clone();
            Box::pin(async move { out })
        }
    }

    #[test]
    fn test_inline_duplicates_pass_through() {
        let scope = TokenListScope::resolve(Some(&TokenListSource::Inline(vec![dai(1), dai(1)])));
        assert_eq!(scope.status(), TokenListStatus::Ready);
        assert_eq!(scope.tokens().len(), 2);
        assert_eq!(scope.tokens_for_chain(1).len(), 2);
        assert!(scope.pending_url().is_none());
    }

    #[test]
    fn test_builtin_list_by_default() {
        let scope = TokenListScope::resolve(None);
        let weth = scope.find(168587773, "0x4200000000000000000000000000000000000023").unwrap();
        assert_eq!(weth.symbol, "WETH");
    }

    #[test]
    fn test_url_loads() {
        let scope = TokenListScope::resolve(Some(&TokenListSource::Url("https://tokens.example".into())));
        assert_eq!(scope.status(), TokenListStatus::Loading);
        assert!(scope.tokens().is_empty());

        block_on(scope.load(&StaticFetcher(Ok(vec![dai(1)])))).unwrap();
        assert_eq!(scope.status(), TokenListStatus::Ready);
        assert!(scope.find(1, "0x6b175474e89094c44da98b954eedeac495271d0f").is_some());
    }

    #[test]
    fn test_url_failure_surfaces() {
        let scope = TokenListScope::resolve(Some(&TokenListSource::Url("https://tokens.example".into())));
        let err = block_on(scope.load(&StaticFetcher(Err(WidgetError::TokenList("404".into()))))).unwrap_err();
        assert_eq!(err.code(), "TokenList");
        assert!(matches!(scope.status(), TokenListStatus::Failed(_)));
    }

    #[test]
    fn test_failed_url_can_be_fetched_again() {
        let scope = TokenListScope::resolve(Some(&TokenListSource::Url("https://tokens.example".into())));
        assert!(!scope.begin_retry());

        let _ = block_on(scope.load(&StaticFetcher(Err(WidgetError::TokenList("503".into())))));
        assert!(scope.begin_retry());
        assert_eq!(scope.status(), TokenListStatus::Loading);

        block_on(scope.load(&StaticFetcher(Ok(vec![dai(1)])))).unwrap();
        assert_eq!(scope.status(), TokenListStatus::Ready);
        assert_eq!(scope.tokens().len(), 1);
    }

    #[test]
    fn test_nothing_to_retry_without_url() {
        let scope = TokenListScope::resolve(None);
        let _ = scope.complete(Err(WidgetError::TokenList("bad".into())));
        assert!(!scope.begin_retry());
    }
}
