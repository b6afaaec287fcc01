//! Global application store, one per mounted widget.
//!
//! Holds the multicall listener/result table. Updates go through
//! [`Store::dispatch`] so every change notifies readers in one place.

use std::fmt;

use leptos::prelude::{ArcRwSignal, Update, With};
use uuid::Uuid;

use crate::web3::multicall::{Call, CallResult, MulticallAction, MulticallState};

/// Identity of a store instance. Two mounts never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(Uuid);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum StoreAction {
    Multicall(MulticallAction),
}

pub struct Store {
    id: StoreId,
    multicall: ArcRwSignal<MulticallState>,
}

impl Store {
    pub fn new() -> Self {
        let store = Self {
            id: StoreId(Uuid::new_v4()),
            multicall: ArcRwSignal::new(MulticallState::default()),
        };
        log::debug!("created {}", store.id);
        store
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    pub fn dispatch(&self, action: StoreAction) {
        match action {
            StoreAction::Multicall(action) => self.multicall.update(|state| state.reduce(action)),
        }
    }

    /// Read the multicall table; tracks changes when called inside a reactive scope.
    pub fn with_multicall<R>(&self, f: impl FnOnce(&MulticallState) -> R) -> R {
        self.multicall.with(f)
    }

    /// Register interest in `calls`; they are fetched on every new block until removed.
    pub fn listen(&self, chain_id: u64, calls: Vec<Call>) {
        self.dispatch(StoreAction::Multicall(MulticallAction::AddListeners { chain_id, calls }));
    }

    pub fn unlisten(&self, chain_id: u64, calls: Vec<Call>) {
        self.dispatch(StoreAction::Multicall(MulticallAction::RemoveListeners { chain_id, calls }));
    }

    pub fn call_result(&self, chain_id: u64, call: &Call) -> Option<CallResult> {
        self.with_multicall(|state| state.result(chain_id, call).cloned())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_store_has_its_own_identity() {
        let a = Store::new();
        let b = Store::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("store-"));
    }

    #[test]
    fn test_listen_and_unlisten() {
        let store = Store::new();
        let call = Call::new("0xF6B7843BdC72534ad0eE374836001b352AcB0d9F", "0x0f28c97d");
        store.listen(168587773, vec![call.clone()]);
        store.listen(168587773, vec![call.clone()]);
        assert_eq!(store.with_multicall(|s| s.listener_count(168587773, &call)), 2);

        store.unlisten(168587773, vec![call.clone()]);
        store.unlisten(168587773, vec![call.clone()]);
        assert_eq!(store.with_multicall(|s| s.active_calls(168587773)), Vec::<Call>::new());
        assert!(store.call_result(168587773, &call).is_none());
    }

    #[test]
    fn test_stores_do_not_share_state() {
        let a = Store::new();
        let b = Store::new();
        let call = Call::new("0x1", "0x2");
        a.listen(1, vec![call.clone()]);
        assert_eq!(b.with_multicall(|s| s.listener_count(1, &call)), 0);
    }
}
