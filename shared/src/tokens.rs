//! # Token Descriptors and Token Lists
//!
//! Token metadata in the shape of the community token-list standard, so inline lists
//! supplied by a host page and documents fetched from a URL deserialise into the same
//! [`TokenDescriptor`] type.
//!
//! Lists are passed along exactly as given. Two descriptors with the same
//! `(chain_id, address)` are both kept; de-duplication is left to whoever consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chains::SupportedChainId;

/// Metadata identifying one tradable asset on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl TokenDescriptor {
    /// Case-insensitive address comparison on the same chain.
    pub fn matches(&self, chain_id: u64, address: &str) -> bool {
        self.chain_id == chain_id && self.address.eq_ignore_ascii_case(address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenListVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// A token-list document as published at a token-list URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub version: TokenListVersion,
    pub tokens: Vec<TokenDescriptor>,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TokenListError {
    #[error("malformed token list: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenListPayload {
    Document(TokenList),
    Tokens(Vec<TokenDescriptor>),
}

/// Parse either a full token-list document or a bare array of descriptors.
pub fn parse_token_list(json: &str) -> Result<Vec<TokenDescriptor>, TokenListError> {
    let payload: TokenListPayload = serde_json::from_str(json)?;
    Ok(match payload {
        TokenListPayload::Document(list) => list.tokens,
        TokenListPayload::Tokens(tokens) => tokens,
    })
}

struct StaticToken {
    address: &'static str,
    symbol: &'static str,
    name: &'static str,
    decimals: u8,
    logo_uri: Option<&'static str>,
}

const BLAST_SEPOLIA_TOKENS: &[StaticToken] = &[
    StaticToken {
        address: "0x4200000000000000000000000000000000000023",
        symbol: "WETH",
        name: "Wrapped Ether",
        decimals: 18,
        logo_uri: Some(
            "https://raw.githubusercontent.com/Uniswap/assets/master/blockchains/ethereum/assets/0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2/logo.png",
        ),
    },
    StaticToken {
        address: "0x684063aB93Aa493F8a1389cD2Fbc5E9fBd324A91",
        symbol: "F(BTC,20)",
        name: "F(BTC,20)",
        decimals: 18,
        logo_uri: None,
    },
];

/// The token list the widget falls back to when the host page supplies none.
pub fn blast_sepolia_tokens() -> Vec<TokenDescriptor> {
    let chain_id = SupportedChainId::BlastSepolia.id();
    BLAST_SEPOLIA_TOKENS
        .iter()
        .map(|token| TokenDescriptor {
            chain_id,
            address: token.address.to_string(),
            symbol: token.symbol.to_string(),
            name: token.name.to_string(),
            decimals: token.decimals,
            logo_uri: token.logo_uri.map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list_has_unique_keys() {
        let tokens = blast_sepolia_tokens();
        assert!(!tokens.is_empty());
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert!(!a.matches(b.chain_id, &b.address), "duplicate {}", a.symbol);
            }
            assert_eq!(a.chain_id, 168587773);
        }
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "name": "Test List",
            "timestamp": "2024-03-01T00:00:00.000Z",
            "version": { "major": 1, "minor": 2, "patch": 0 },
            "tokens": [{
                "chainId": 1,
                "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                "symbol": "DAI",
                "name": "Dai Stablecoin",
                "decimals": 18,
                "logoURI": "https://example.com/dai.png"
            }]
        }"#;
        let tokens = parse_token_list(json).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].symbol, "DAI");
        assert_eq!(tokens[0].logo_uri.as_deref(), Some("https://example.com/dai.png"));
    }

    #[test]
    fn test_parse_bare_array_keeps_duplicates_and_missing_logo() {
        let json = r#"[
            {"chainId": 1, "address": "0x3819f64f282bf135d62168C1e513280dAF905e06", "symbol": "HDRN", "name": "Hedron", "decimals": 9},
            {"chainId": 1, "address": "0x3819f64f282bf135d62168C1e513280dAF905e06", "symbol": "HDRN", "name": "Hedron", "decimals": 9}
        ]"#;
        let tokens = parse_token_list(json).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], tokens[1]);
        assert!(tokens[0].logo_uri.is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_token_list("{\"tokens\": 3}"), Err(TokenListError::Malformed(_))));
    }

    #[test]
    fn test_logo_uri_wire_name() {
        let token = &blast_sepolia_tokens()[0];
        let json = serde_json::to_value(token).unwrap();
        assert!(json.get("logoURI").is_some());
        assert_eq!(json["chainId"], 168587773);
    }
}
