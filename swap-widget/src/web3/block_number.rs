//! Latest block for the active chain

use leptos::prelude::{ArcRwSignal, Update, With};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Head {
    chain_id: u64,
    block: u64,
}

pub struct BlockNumberScope {
    head: ArcRwSignal<Option<Head>>,
}

impl BlockNumberScope {
    pub fn new() -> Self {
        Self {
            head: ArcRwSignal::new(None),
        }
    }

    /// Record a polled block. Returns `true` when it advanced the known head. Older
    /// blocks are ignored; a chain switch starts over.
    pub fn observe(&self, chain_id: u64, block: u64) -> bool {
        self.head
            .try_maybe_update(|head| match head {
                Some(current) if current.chain_id == chain_id => {
                    if current.block >= block {
                        return (false, false);
                    }
                    current.block = block;
                    (true, true)
                }
                _ => {
                    log::debug!("block tracking switched to chain {}", chain_id);
                    *head = Some(Head { chain_id, block });
                    (true, true)
                }
            })
            .unwrap_or(false)
    }

    /// Tracked read of the head for `chain_id`.
    pub fn block(&self, chain_id: u64) -> Option<u64> {
        self.head.with(|head| {
            head.filter(|current| current.chain_id == chain_id)
                .map(|current| current.block)
        })
    }
}

impl Default for BlockNumberScope {
    fn default() -> Self {
        Self::new()
    }
}
