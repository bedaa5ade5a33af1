//! Per-order mutual exclusion.
//!
//! Mutations on the same order id run one at a time; mutations on different
//! ids never wait on each other beyond the brief table lookup. Slots are
//! created on demand and dropped again once nobody holds or waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use supplyflow_core::OrderId;

type Slot = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub struct OrderLocks {
    slots: Mutex<HashMap<OrderId, Slot>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the exclusive slot for `id`.
    ///
    /// A panic inside another holder's closure does not wedge the id: the
    /// guarded data is `()`, so a poisoned slot is simply taken over.
    pub fn with_lock<T>(&self, id: OrderId, f: impl FnOnce() -> T) -> T {
        let release = SlotRelease {
            locks: self,
            id,
            slot: Some(Arc::clone(self.table().entry(id).or_default())),
        };

        let _guard = release.lock();
        f()
    }

    /// Number of ids with a live slot.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, HashMap<OrderId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds one reference to a slot and gives it back on drop, unwinding included.
///
/// Slot references are only ever cloned or dropped under the table lock, so
/// the strong count seen there is exact.
struct SlotRelease<'a> {
    locks: &'a OrderLocks,
    id: OrderId,
    slot: Option<Slot>,
}

impl SlotRelease<'_> {
    fn lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.slot
            .as_ref()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        let mut slots = self.locks.table();
        drop(self.slot.take());
        if slots
            .get(&self.id)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.id);
        }
    }
}
