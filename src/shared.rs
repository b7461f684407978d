//! Shared Store
//!
//! A cloneable handle for several threads using one store.
//!
//! ## Concurrency Model
//! One lock around the whole store. A caller holds it from validation
//! through persistence, so foreign-key checks and cascades never see a table
//! another caller is halfway through changing. There is no timeout: a stuck
//! filesystem write blocks every caller queued behind it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::storage::{JsonlStorage, Persistence};
use crate::store::RecordStore;

pub struct SharedStore<P: Persistence = JsonlStorage> {
    inner: Arc<Mutex<RecordStore<P>>>,
}

impl<P: Persistence> SharedStore<P> {
    pub fn new(store: RecordStore<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a read-only operation under the store lock
    pub fn read<R>(&self, op: impl FnOnce(&RecordStore<P>) -> R) -> R {
        let store = self.inner.lock();
        op(&store)
    }

    /// Run a mutation under the store lock
    pub fn write<R>(&self, op: impl FnOnce(&mut RecordStore<P>) -> R) -> R {
        let mut store = self.inner.lock();
        op(&mut store)
    }
}

impl<P: Persistence> Clone for SharedStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
