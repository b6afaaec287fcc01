//! # Contract Address Tables
//!
//! One [`AddressTable`] per contract role. Each table maps a chain id to at most one
//! address; later inserts for the same chain replace earlier ones, so a table can start
//! from a shared deterministic deployment and override individual chains.

use std::collections::BTreeMap;

use crate::chains::SupportedChainId;

/// Chain id → contract address for a single contract role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressTable {
    entries: BTreeMap<u64, String>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same address on every L1 default network plus `additional` chains.
    pub fn same_address(address: &str, additional: &[SupportedChainId]) -> Self {
        let mut table = Self::new();
        for chain in SupportedChainId::DEFAULT_NETWORKS.iter().chain(additional) {
            table.insert(chain.id(), address);
        }
        table
    }

    /// Builder-style insert.
    pub fn with(mut self, chain: SupportedChainId, address: &str) -> Self {
        self.insert(chain.id(), address);
        self
    }

    pub fn insert(&mut self, chain_id: u64, address: &str) {
        self.entries.insert(chain_id, address.to_string());
    }

    pub fn get(&self, chain_id: u64) -> Option<&str> {
        self.entries.get(&chain_id).map(|s| s.as_str())
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.entries.contains_key(&chain_id)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Multicall aggregator used by the batched-call updater.
pub fn multicall_address() -> AddressTable {
    AddressTable::same_address(
        "0x1F98415757620B543A52E61c46B32eB19261F984",
        &[
            SupportedChainId::OptimismGoerli,
            SupportedChainId::Optimism,
            SupportedChainId::PolygonMumbai,
            SupportedChainId::Polygon,
        ],
    )
    .with(SupportedChainId::ArbitrumOne, "0xadF885960B47eA2CD9B55E6DAc6B42b7Cb2806dB")
    .with(SupportedChainId::ArbitrumRinkeby, "0xa501c031958F579dB7676fF1CE78AD305794d579")
    .with(SupportedChainId::Celo, "0x633987602DE5C4F337e3DbF265303A1080324204")
    .with(SupportedChainId::CeloAlfajores, "0x633987602DE5C4F337e3DbF265303A1080324204")
    .with(SupportedChainId::Base, "0x091e99cb1C49331a94dD62755D168E941AbD0693")
    .with(SupportedChainId::BlastSepolia, "0xF6B7843BdC72534ad0eE374836001b352AcB0d9F")
}

/// Router the swap UI submits to; chains without one cannot swap.
pub fn swap_router_addresses() -> AddressTable {
    AddressTable::same_address(
        "0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45",
        &[
            SupportedChainId::Optimism,
            SupportedChainId::OptimismGoerli,
            SupportedChainId::ArbitrumOne,
            SupportedChainId::ArbitrumRinkeby,
            SupportedChainId::Polygon,
            SupportedChainId::PolygonMumbai,
        ],
    )
    .with(SupportedChainId::Celo, "0x5615CDAb10dc425a742d643d949a7F474C01abc4")
    .with(SupportedChainId::CeloAlfajores, "0x5615CDAb10dc425a742d643d949a7F474C01abc4")
    .with(SupportedChainId::Base, "0x2626664c2603336E57B271c5C0b26F421741e481")
    .with(SupportedChainId::BlastSepolia, "0xcDf9136c2AB0DA6e556F28152A80a09e327fF9Cf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_address_covers_default_networks() {
        let table = AddressTable::same_address("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", &[]);
        assert_eq!(table.len(), SupportedChainId::DEFAULT_NETWORKS.len());
        for chain in SupportedChainId::DEFAULT_NETWORKS {
            assert_eq!(table.get(chain.id()), Some("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"));
        }
        assert!(!table.contains(SupportedChainId::Base.id()));
    }

    #[test]
    fn test_override_keeps_one_address_per_chain() {
        let table = AddressTable::same_address("0xaaaa", &[SupportedChainId::Base])
            .with(SupportedChainId::Base, "0xbbbb");
        assert_eq!(table.get(SupportedChainId::Base.id()), Some("0xbbbb"));
        assert_eq!(table.chain_ids().filter(|id| *id == 8453).count(), 1);
    }

    #[test]
    fn test_blast_sepolia_entries() {
        let chain = SupportedChainId::BlastSepolia.id();
        assert_eq!(multicall_address().get(chain), Some("0xF6B7843BdC72534ad0eE374836001b352AcB0d9F"));
        assert_eq!(swap_router_addresses().get(chain), Some("0xcDf9136c2AB0DA6e556F28152A80a09e327fF9Cf"));
        assert!(multicall_address().contains(SupportedChainId::Base.id()));
    }
}
