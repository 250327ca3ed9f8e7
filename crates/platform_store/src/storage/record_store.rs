//! Dashboard record-store contract and baseline adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;

/// Record key holding the entire persisted dashboard blob.
pub const DASHBOARD_STATE_KEY: &str = "dashboard.state.v1";

/// Object-safe boxed future used by [`DashboardRecordStore`] methods.
pub type RecordStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Durable key-value store owned by the host side of the bridge.
///
/// A single key holds the whole dashboard payload; the store performs no
/// validation of the blob and trusts the surface-side normalizer on every
/// load.
pub trait DashboardRecordStore {
    /// Loads the persisted payload for `key`, or `None` when absent.
    fn load_record<'a>(
        &'a self,
        key: &'a str,
    ) -> RecordStoreFuture<'a, Result<Option<Value>, String>>;

    /// Overwrites the persisted payload for `key`.
    fn save_record<'a>(
        &'a self,
        key: &'a str,
        payload: &'a Value,
    ) -> RecordStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op record store for unsupported targets and baseline tests.
pub struct NoopRecordStore;

impl DashboardRecordStore for NoopRecordStore {
    fn load_record<'a>(
        &'a self,
        _key: &'a str,
    ) -> RecordStoreFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_record<'a>(
        &'a self,
        _key: &'a str,
        _payload: &'a Value,
    ) -> RecordStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory record store keyed by record name.
pub struct MemoryRecordStore {
    inner: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryRecordStore {
    /// Reads a record synchronously, bypassing the async contract. Test
    /// helper.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }
}

impl DashboardRecordStore for MemoryRecordStore {
    fn load_record<'a>(
        &'a self,
        key: &'a str,
    ) -> RecordStoreFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_record<'a>(
        &'a self,
        key: &'a str,
        payload: &'a Value,
    ) -> RecordStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), payload.clone());
            Ok(())
        })
    }
}
