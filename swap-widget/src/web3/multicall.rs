//! # Multicall
//!
//! Components register the contract reads they care about as listeners in the store.
//! On every new block the [`MulticallUpdater`] works out which of them are outdated,
//! splits them into batches against the chain's multicall contract, marks them as
//! fetching, and folds the results back in. A result never overwrites one from a
//! newer block.

use std::collections::BTreeMap;

use serde::Serialize;
use shared::AddressTable;

use crate::error::WidgetError;
use crate::state::store::{Store, StoreAction};
use crate::utils::constants::MULTICALL_CHUNK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub address: String,
    pub call_data: String,
}

impl Call {
    /// Addresses and calldata compare case-insensitively.
    pub fn new(address: &str, call_data: &str) -> Self {
        Self {
            address: address.to_ascii_lowercase(),
            call_data: call_data.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    pub block_number: u64,
    /// `None` when the call failed or returned no data
    pub data: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MulticallAction {
    AddListeners { chain_id: u64, calls: Vec<Call> },
    RemoveListeners { chain_id: u64, calls: Vec<Call> },
    Fetching { chain_id: u64, calls: Vec<Call>, block_number: u64 },
    Results { chain_id: u64, block_number: u64, results: Vec<(Call, Option<String>)> },
    Errored { chain_id: u64, calls: Vec<Call>, block_number: u64 },
}

#[derive(Debug, Default)]
pub struct MulticallState {
    listeners: BTreeMap<u64, BTreeMap<Call, u32>>,
    results: BTreeMap<u64, BTreeMap<Call, CallResult>>,
    fetching: BTreeMap<u64, BTreeMap<Call, u64>>,
}

impl MulticallState {
    pub fn reduce(&mut self, action: MulticallAction) {
        match action {
            MulticallAction::AddListeners { chain_id, calls } => {
                let listeners = self.listeners.entry(chain_id).or_default();
                for call in calls {
                    *listeners.entry(call).or_default() += 1;
                }
            }
            MulticallAction::RemoveListeners { chain_id, calls } => {
                if let Some(listeners) = self.listeners.get_mut(&chain_id) {
                    for call in calls {
                        match listeners.get_mut(&call) {
                            Some(count) if *count > 1 => *count -= 1,
                            Some(_) => {
                                listeners.remove(&call);
                            }
                            None => {}
                        }
                    }
                }
            }
            MulticallAction::Fetching { chain_id, calls, block_number } => {
                let fetching = self.fetching.entry(chain_id).or_default();
                for call in calls {
                    let newer = fetching.get(&call).is_some_and(|b| *b >= block_number);
                    if !newer {
                        fetching.insert(call, block_number);
                    }
                }
            }
            MulticallAction::Results { chain_id, block_number, results } => {
                for (call, data) in results {
                    self.store_result(chain_id, call, block_number, data);
                }
            }
            MulticallAction::Errored { chain_id, calls, block_number } => {
                for call in calls {
                    let fetching_this = self
                        .fetching
                        .get(&chain_id)
                        .and_then(|f| f.get(&call))
                        .is_some_and(|b| *b == block_number);
                    if fetching_this {
                        self.store_result(chain_id, call, block_number, None);
                    }
                }
            }
        }
    }

    fn store_result(&mut self, chain_id: u64, call: Call, block_number: u64, data: Option<String>) {
        if let Some(fetching) = self.fetching.get_mut(&chain_id) {
            if fetching.get(&call).is_some_and(|b| *b <= block_number) {
                fetching.remove(&call);
            }
        }
        let results = self.results.entry(chain_id).or_default();
        let newer_exists = results.get(&call).is_some_and(|r| r.block_number > block_number);
        if !newer_exists {
            results.insert(call, CallResult { block_number, data });
        }
    }

    pub fn listener_count(&self, chain_id: u64, call: &Call) -> u32 {
        self.listeners
            .get(&chain_id)
            .and_then(|l| l.get(call))
            .copied()
            .unwrap_or(0)
    }

    pub fn active_calls(&self, chain_id: u64) -> Vec<Call> {
        self.listeners
            .get(&chain_id)
            .map(|l| l.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn result(&self, chain_id: u64, call: &Call) -> Option<&CallResult> {
        self.results.get(&chain_id).and_then(|r| r.get(call))
    }

    /// Listened calls with no result at `block_number` that are not already being fetched
    /// for it.
    pub fn outdated_calls(&self, chain_id: u64, block_number: u64) -> Vec<Call> {
        self.active_calls(chain_id)
            .into_iter()
            .filter(|call| {
                let fresh = self.result(chain_id, call).is_some_and(|r| r.block_number >= block_number);
                let in_flight = self
                    .fetching
                    .get(&chain_id)
                    .and_then(|f| f.get(call))
                    .is_some_and(|b| *b >= block_number);
                !fresh && !in_flight
            })
            .collect()
    }
}

/// One round-trip worth of calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBatch {
    pub chain_id: u64,
    pub block_number: u64,
    pub multicall_address: String,
    pub calls: Vec<Call>,
}

pub struct MulticallUpdater {
    addresses: AddressTable,
    chunk_size: usize,
}

impl MulticallUpdater {
    pub fn new(addresses: AddressTable) -> Self {
        Self {
            addresses,
            chunk_size: MULTICALL_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Batches to fetch for `block_number`. The returned calls are marked as fetching.
    pub fn plan(&self, store: &Store, chain_id: u64, block_number: u64) -> Vec<CallBatch> {
        let Some(multicall_address) = self.addresses.get(chain_id) else {
            log::warn!("no multicall contract on chain {}, skipping contract reads", chain_id);
            return Vec::new();
        };
        let outdated = store.with_multicall(|state| state.outdated_calls(chain_id, block_number));
        if outdated.is_empty() {
            return Vec::new();
        }

        store.dispatch(StoreAction::Multicall(MulticallAction::Fetching {
            chain_id,
            calls: outdated.clone(),
            block_number,
        }));
        log::debug!("fetching {} calls at block {}", outdated.len(), block_number);

        outdated
            .chunks(self.chunk_size)
            .map(|chunk| CallBatch {
                chain_id,
                block_number,
                multicall_address: multicall_address.to_string(),
                calls: chunk.to_vec(),
            })
            .collect()
    }

    pub fn apply(&self, store: &Store, batch: &CallBatch, outcome: Result<Vec<Option<String>>, WidgetError>) {
        let action = match outcome {
            Ok(data) if data.len() == batch.calls.len() => MulticallAction::Results {
                chain_id: batch.chain_id,
                block_number: batch.block_number,
                results: batch.calls.iter().cloned().zip(data).collect(),
            },
            Ok(data) => {
                log::warn!("multicall returned {} results for {} calls", data.len(), batch.calls.len());
                MulticallAction::Errored {
                    chain_id: batch.chain_id,
                    calls: batch.calls.clone(),
                    block_number: batch.block_number,
                }
            }
            Err(err) => {
                log::debug!("multicall batch failed: {}", err);
                MulticallAction::Errored {
                    chain_id: batch.chain_id,
                    calls: batch.calls.clone(),
                    block_number: batch.block_number,
                }
            }
        };
        store.dispatch(StoreAction::Multicall(action));
    }
}
