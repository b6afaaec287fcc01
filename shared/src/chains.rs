//! # Supported Chains
//!
//! Chain identifiers the widget ships configuration for, and the URL-friendly names
//! used by query-string configuration (`?defaultChainId=blast-sepolia`).

use serde::{Deserialize, Serialize};

/// EVM chains with entries in the address and token tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum SupportedChainId {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
    ArbitrumOne,
    ArbitrumRinkeby,
    Optimism,
    OptimismGoerli,
    Polygon,
    PolygonMumbai,
    Celo,
    CeloAlfajores,
    Bnb,
    Base,
    BlastSepolia,
}

impl SupportedChainId {
    pub const ALL: [SupportedChainId; 16] = [
        SupportedChainId::Mainnet,
        SupportedChainId::Ropsten,
        SupportedChainId::Rinkeby,
        SupportedChainId::Goerli,
        SupportedChainId::Kovan,
        SupportedChainId::ArbitrumOne,
        SupportedChainId::ArbitrumRinkeby,
        SupportedChainId::Optimism,
        SupportedChainId::OptimismGoerli,
        SupportedChainId::Polygon,
        SupportedChainId::PolygonMumbai,
        SupportedChainId::Celo,
        SupportedChainId::CeloAlfajores,
        SupportedChainId::Bnb,
        SupportedChainId::Base,
        SupportedChainId::BlastSepolia,
    ];

    /// L1 networks that share deterministic deployment addresses.
    pub const DEFAULT_NETWORKS: [SupportedChainId; 5] = [
        SupportedChainId::Mainnet,
        SupportedChainId::Ropsten,
        SupportedChainId::Rinkeby,
        SupportedChainId::Goerli,
        SupportedChainId::Kovan,
    ];

    pub fn id(&self) -> u64 {
        match self {
            SupportedChainId::Mainnet => 1,
            SupportedChainId::Ropsten => 3,
            SupportedChainId::Rinkeby => 4,
            SupportedChainId::Goerli => 5,
            SupportedChainId::Kovan => 42,
            SupportedChainId::ArbitrumOne => 42161,
            SupportedChainId::ArbitrumRinkeby => 421611,
            SupportedChainId::Optimism => 10,
            SupportedChainId::OptimismGoerli => 420,
            SupportedChainId::Polygon => 137,
            SupportedChainId::PolygonMumbai => 80001,
            SupportedChainId::Celo => 42220,
            SupportedChainId::CeloAlfajores => 44787,
            SupportedChainId::Bnb => 56,
            SupportedChainId::Base => 8453,
            SupportedChainId::BlastSepolia => 168587773,
        }
    }

    /// Name used in query strings and preview option lists.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedChainId::Mainnet => "mainnet",
            SupportedChainId::Ropsten => "ropsten",
            SupportedChainId::Rinkeby => "rinkeby",
            SupportedChainId::Goerli => "goerli",
            SupportedChainId::Kovan => "kovan",
            SupportedChainId::ArbitrumOne => "arbitrum_one",
            SupportedChainId::ArbitrumRinkeby => "arbitrum_rinkeby",
            SupportedChainId::Optimism => "optimism",
            SupportedChainId::OptimismGoerli => "optimism_goerli",
            SupportedChainId::Polygon => "polygon",
            SupportedChainId::PolygonMumbai => "polygon_mumbai",
            SupportedChainId::Celo => "celo",
            SupportedChainId::CeloAlfajores => "celo_alfajores",
            SupportedChainId::Bnb => "bnb",
            SupportedChainId::Base => "base",
            SupportedChainId::BlastSepolia => "blast-sepolia",
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.id() == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.name() == name)
    }

    /// Resolve either a numeric id or a chain name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.parse::<u64>() {
            Ok(id) => Self::from_id(id),
            Err(_) => Self::from_name(value),
        }
    }
}

impl From<SupportedChainId> for u64 {
    fn from(chain: SupportedChainId) -> Self {
        chain.id()
    }
}

impl TryFrom<u64> for SupportedChainId {
    type Error = String;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unsupported chain id {}", id))
    }
}

impl std::fmt::Display for SupportedChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_and_id() {
        assert_eq!(SupportedChainId::parse("blast-sepolia"), Some(SupportedChainId::BlastSepolia));
        assert_eq!(SupportedChainId::parse("168587773"), Some(SupportedChainId::BlastSepolia));
        assert_eq!(SupportedChainId::parse("8453"), Some(SupportedChainId::Base));
        assert_eq!(SupportedChainId::parse("bitcoin"), None);
        assert_eq!(SupportedChainId::parse("999999"), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u64> = SupportedChainId::ALL.iter().map(|chain| chain.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SupportedChainId::ALL.len());
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&SupportedChainId::Polygon).unwrap();
        assert_eq!(json, "137");
        let chain: SupportedChainId = serde_json::from_str("10").unwrap();
        assert_eq!(chain, SupportedChainId::Optimism);
        assert!(serde_json::from_str::<SupportedChainId>("7").is_err());
    }
}
